#![doc = include_str!("../README.md")]

extern crate generic_array;
extern crate typenum;

pub mod abc;
pub mod codon;
pub mod count;
pub mod dense;
pub mod err;
pub mod matcher;
pub mod motif;
pub mod seq;
pub mod table;

pub use abc::Alphabet;
pub use abc::AminoAcid;
pub use abc::Background;
pub use abc::Protein;
pub use abc::Symbol;
pub use codon::Baseline;
pub use codon::Chance;
pub use codon::CodonLookup;
pub use count::PeptideCounter;
pub use count::PeptideReport;
pub use count::PeptideRow;
pub use count::SequenceOutcome;
pub use dense::DenseMatrix;
pub use err::ConfigError;
pub use err::InvalidSymbol;
pub use matcher::MotifMatcher;
pub use matcher::MotifReport;
pub use matcher::MotifRow;
pub use matcher::RowOutcome;
pub use motif::Motif;
pub use motif::Motifs;
pub use seq::EncodedSequence;
pub use table::CountTable;

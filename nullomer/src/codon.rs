//! Chance models for the occurrence of a peptide or motif.
//!
//! The [`CodonLookup`] model assumes every sense codon is drawn with the same
//! probability, so that the chance of a residue is proportional to the number
//! of codons encoding it under the genetic code. The [`Background`] model uses
//! residue frequencies observed in a reference database instead.

use generic_array::GenericArray;

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::str::FromStr;

use super::abc::Alphabet;
use super::abc::Background;
use super::abc::Protein;
use super::abc::Symbol;
use super::err::InvalidData;
use super::err::InvalidSymbol;

// --- Chance ------------------------------------------------------------------

/// A model giving the probability of observing a string of symbols by chance.
pub trait Chance<A: Alphabet> {
    /// The probability of a single symbol.
    fn symbol_chance(&self, symbol: A::Symbol) -> f64;

    /// The probability of a string of symbols, positions being independent.
    fn chance_of(&self, symbols: &[A::Symbol]) -> f64 {
        symbols.iter().map(|&s| self.symbol_chance(s)).product()
    }

    /// The probability of a string given in textual form.
    fn chance(&self, text: &str) -> Result<f64, InvalidSymbol> {
        text.chars().try_fold(1.0, |p, c| {
            A::Symbol::from_char(c).map(|s| p * self.symbol_chance(s))
        })
    }
}

impl<A: Alphabet> Chance<A> for Background<A> {
    /// The observed frequency of a residue, or one for the wildcard.
    fn symbol_chance(&self, symbol: A::Symbol) -> f64 {
        if A::is_residue(symbol) {
            self.frequency(symbol)
        } else {
            1.0
        }
    }
}

// --- CodonLookup -------------------------------------------------------------

/// The number of codons encoding each symbol of an alphabet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodonLookup<A: Alphabet> {
    codons: GenericArray<u8, A::K>,
    sense: u32,
}

impl<A: Alphabet> CodonLookup<A> {
    /// Create a lookup from a table of codon counts indexed by symbol.
    ///
    /// The number of sense codons is the sum of the residue counts, the
    /// wildcard entry is expected to be equal to it.
    pub fn new<T>(codons: T) -> Self
    where
        T: Into<GenericArray<u8, A::K>>,
    {
        let codons = codons.into();
        let sense = A::residues()
            .iter()
            .map(|s| codons[s.as_index()] as u32)
            .sum();
        Self { codons, sense }
    }

    /// The number of sense codons of the genetic code.
    #[inline]
    pub fn sense_codons(&self) -> u32 {
        self.sense
    }

    /// The number of codons encoding a symbol.
    #[inline]
    pub fn codons(&self, symbol: A::Symbol) -> u8 {
        self.codons[symbol.as_index()]
    }

    /// The number of codons encoding each symbol of a string.
    pub fn counts_of(&self, symbols: &[A::Symbol]) -> Vec<u8> {
        symbols.iter().map(|&s| self.codons(s)).collect()
    }

    /// The number of codons encoding each symbol of a string in textual form.
    pub fn codon_counts(&self, text: &str) -> Result<Vec<u8>, InvalidSymbol> {
        text.chars()
            .map(|c| A::Symbol::from_char(c).map(|s| self.codons(s)))
            .collect()
    }

    /// The sum of the per-position codon counts of a string.
    pub fn total_of(&self, symbols: &[A::Symbol]) -> u32 {
        symbols.iter().map(|&s| self.codons(s) as u32).sum()
    }

    /// The sum of the per-position codon counts of a string in textual form.
    pub fn total(&self, text: &str) -> Result<u32, InvalidSymbol> {
        self.codon_counts(text)
            .map(|counts| counts.into_iter().map(u32::from).sum())
    }

    /// The chance of drawing a string from random sense codons.
    #[inline]
    pub fn codon_chance(&self, text: &str) -> Result<f64, InvalidSymbol> {
        self.chance(text)
    }
}

impl<A: Alphabet> Chance<A> for CodonLookup<A> {
    #[inline]
    fn symbol_chance(&self, symbol: A::Symbol) -> f64 {
        self.codons(symbol) as f64 / self.sense as f64
    }
}

impl CodonLookup<Protein> {
    /// The degeneracy of the standard genetic code.
    pub fn standard() -> Self {
        #[rustfmt::skip]
        let codons: [u8; 21] = [
        //  A  C  D  E  F  G  H  I  K  L  M  N  P  Q  R  S  T  V  W  Y   X
            4, 2, 2, 2, 2, 4, 2, 3, 2, 6, 1, 2, 4, 2, 6, 6, 4, 4, 1, 2, 61,
        ];
        Self::new(codons)
    }
}

impl Default for CodonLookup<Protein> {
    fn default() -> Self {
        Self::standard()
    }
}

// --- Baseline ----------------------------------------------------------------

/// The chance model used to estimate occurrence rates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Baseline {
    /// Uniform sense codons under the standard genetic code.
    #[default]
    Codon,
    /// Residue frequencies observed in UniProtKB/Swiss-Prot.
    Observed,
}

impl Baseline {
    /// Get the chance model for this baseline.
    pub fn model(&self) -> Box<dyn Chance<Protein>> {
        match self {
            Baseline::Codon => Box::new(CodonLookup::standard()),
            Baseline::Observed => Box::new(Background::swissprot()),
        }
    }
}

impl Display for Baseline {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Baseline::Codon => f.write_str("codon"),
            Baseline::Observed => f.write_str("observed"),
        }
    }
}

impl FromStr for Baseline {
    type Err = InvalidData;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "codon" => Ok(Baseline::Codon),
            "observed" => Ok(Baseline::Observed),
            _ => Err(InvalidData),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::abc::AminoAcid;

    #[test]
    fn test_standard_sense_codons() {
        let codons = CodonLookup::standard();
        assert_eq!(codons.sense_codons(), 61);
        assert_eq!(codons.codons(AminoAcid::X), 61);
        assert_eq!(codons.codons(AminoAcid::L), 6);
        assert_eq!(codons.codons(AminoAcid::M), 1);
    }

    #[test]
    fn test_codon_chance() {
        let codons = CodonLookup::standard();
        let w = codons.chance("W").unwrap();
        assert!((w - 1.0 / 61.0).abs() < 1e-12);
        assert!((w - 0.01639).abs() < 1e-5);
        assert_eq!(codons.chance("W.").unwrap(), w);
        assert_eq!(codons.chance("W..").unwrap(), w);
        let aa = codons.chance("AA").unwrap();
        assert!((aa - 16.0 / 3721.0).abs() < 1e-12);
    }

    #[test]
    fn test_codon_counts() {
        let codons = CodonLookup::standard();
        assert_eq!(codons.codon_counts("A.W").unwrap(), vec![4, 61, 1]);
        assert_eq!(codons.codon_counts("AB"), Err(InvalidSymbol('B')));
        assert_eq!(codons.chance("AZ"), Err(InvalidSymbol('Z')));
        let symbols = [AminoAcid::A, AminoAcid::X, AminoAcid::W];
        assert_eq!(codons.total_of(&symbols), 66);
    }

    #[test]
    fn test_custom_table() {
        let mut table = [1u8; 21];
        table[20] = 20;
        let codons = CodonLookup::<Protein>::new(table);
        assert_eq!(codons.sense_codons(), 20);
        assert!((codons.chance("AC").unwrap() - 0.0025).abs() < 1e-12);
    }

    #[test]
    fn test_total() {
        let codons = CodonLookup::standard();
        assert_eq!(codons.total("A.W"), Ok(66));
        assert_eq!(codons.total("AJ"), Err(InvalidSymbol('J')));
        assert_eq!(codons.codon_chance("W"), codons.chance("W"));
    }

    #[test]
    fn test_baseline() {
        assert_eq!("codon".parse::<Baseline>(), Ok(Baseline::Codon));
        assert_eq!("observed".parse::<Baseline>(), Ok(Baseline::Observed));
        assert!("uniform".parse::<Baseline>().is_err());
        assert_eq!(Baseline::default().to_string(), "codon");
        let w = Baseline::Codon.model().chance("W").unwrap();
        assert!((w - 1.0 / 61.0).abs() < 1e-12);
        let l = Baseline::Observed.model().chance("L").unwrap();
        assert!((l - 0.0966).abs() < 1e-3);
    }

    #[test]
    fn test_background_chance() {
        let bg = Background::<Protein>::uniform();
        assert!((bg.chance("AC.").unwrap() - 0.0025).abs() < 1e-12);
        assert!(bg.chance("A*").is_err());
    }
}

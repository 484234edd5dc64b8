//! Writer for motif reports.
//!
//! A motif report lists every motif of a given length, best explainers
//! first, in right-aligned comma-terminated columns:
//! ```text
//!     Motif,    Count,   %Match,ValidCodons,SumMatchingCodons,CodonChance
//!        ..,      395, 100.000%,  [61;61],      122, 1.000e+00
//!        A.,       18,   4.557%,   [4;61],       65, 6.557e-02
//! ```

use std::io::Write;

use nullomer::abc::Alphabet;
use nullomer::matcher::MotifRow;

use crate::error::Error;
use crate::fmt::Scientific;

/// The width of each column of a motif report.
pub const COLUMN_WIDTH: usize = 10;

/// The number of decimals of the codon chance.
pub const CHANCE_DECIMALS: usize = 3;

const COLUMNS: &[&str] = &[
    "Motif,",
    "Count,",
    "%Match,",
    "ValidCodons,",
    "SumMatchingCodons,",
    "CodonChance",
];

/// Render per-position codon counts as `[4;61;2]`.
pub fn codon_list(codons: &[u8]) -> String {
    let items = codons.iter().map(u8::to_string).collect::<Vec<_>>();
    format!("[{}]", items.join(";"))
}

// ---

/// A writer for motif reports.
pub struct Writer<W: Write> {
    writer: W,
    rows: u64,
}

impl<W: Write> Writer<W> {
    /// Create a new `Writer` and write the report header.
    pub fn new(mut writer: W) -> Result<Self, Error> {
        for column in COLUMNS {
            write!(writer, "{:>width$}", column, width = COLUMN_WIDTH)?;
        }
        writeln!(writer)?;
        Ok(Self { writer, rows: 0 })
    }

    /// Write a single row.
    pub fn write_row<A: Alphabet>(&mut self, row: &MotifRow<A>) -> Result<(), Error> {
        writeln!(
            self.writer,
            "{:>w$}{:>w$}{:>8.3}%,{:>w$}{:>w$}{:>w$}",
            format!("{},", row.motif),
            format!("{},", row.count),
            row.percent,
            format!("{},", codon_list(&row.codons)),
            format!("{},", row.codon_sum),
            Scientific(row.chance, CHANCE_DECIMALS).to_string(),
            w = COLUMN_WIDTH,
        )?;
        self.rows += 1;
        Ok(())
    }

    /// The number of rows written so far.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush the writer and return the underlying stream.
    pub fn into_inner(mut self) -> Result<W, Error> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Write a complete motif report, returning the number of rows.
pub fn write<W, A, I>(writer: W, rows: I) -> Result<u64, Error>
where
    W: Write,
    A: Alphabet,
    I: IntoIterator<Item = MotifRow<A>>,
{
    let mut writer = Writer::new(writer)?;
    for row in rows {
        writer.write_row(&row)?;
    }
    let n = writer.rows();
    writer.into_inner()?;
    Ok(n)
}

//! Reader and writer for peptide count reports.
//!
//! A peptide count report is a comma-separated file with a single header,
//! followed by one row per peptide giving its occurrence rate (the ratio of
//! the expected count to the observed count) and its observed count:
//! ```text
//! Peptide,OccurrenceRate,PeptideOccurrenceCount
//! AA,0.01376,3
//! WW,0.01639,1
//! CW,-1.0,0
//! ```
//! Nullomers have an occurrence rate of `-1.0`.

use std::io::BufRead;
use std::io::Write;

use nullomer::abc::Alphabet;
use nullomer::abc::Protein;
use nullomer::count::PeptideRow;
use nullomer::seq::EncodedSequence;

use crate::error::Error;
use crate::fmt::General;

mod parse;

/// The header line of a peptide count report.
pub const HEADER: &str = nullomer::count::REPORT_HEADER;

/// The number of significant digits of the occurrence rate.
pub const RATE_DIGITS: usize = 4;

// ---

/// A writer for peptide count reports.
pub struct Writer<W: Write> {
    writer: W,
    rows: u64,
}

impl<W: Write> Writer<W> {
    /// Create a new `Writer` and write the report header.
    pub fn new(mut writer: W) -> Result<Self, Error> {
        writeln!(writer, "{}", HEADER)?;
        Ok(Self { writer, rows: 0 })
    }

    /// Write a single row.
    pub fn write_row<A: Alphabet>(&mut self, row: &PeptideRow<A>) -> Result<(), Error> {
        writeln!(
            self.writer,
            "{},{},{}",
            row.peptide(),
            General(row.rate(), RATE_DIGITS),
            row.count()
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

/// Write a complete peptide count report, returning the number of rows.
pub fn write<W, A, I>(writer: W, rows: I) -> Result<u64, Error>
where
    W: Write,
    A: Alphabet,
    I: IntoIterator<Item = PeptideRow<A>>,
{
    let mut writer = Writer::new(writer)?;
    for row in rows {
        writer.write_row(&row)?;
    }
    let n = writer.rows();
    writer.into_inner()?;
    Ok(n)
}

// ---

/// An iterative reader for peptide count reports.
///
/// The header line is skipped if present. Unlike the motif matcher, which
/// skips malformed rows, the reader reports them as errors.
pub struct Reader<B: BufRead> {
    buffer: String,
    bufread: B,
    line: usize,
}

impl<B: BufRead> Reader<B> {
    /// Create a new `Reader` from a buffered reader.
    pub fn new(reader: B) -> Self {
        Self {
            buffer: String::new(),
            bufread: reader,
            line: 0,
        }
    }
}

impl<B: BufRead> Iterator for Reader<B> {
    type Item = Result<PeptideRow<Protein>, Error>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.bufread.read_line(&mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line += 1;
                    if self.line == 1 && self::parse::header(&self.buffer).is_ok() {
                        continue;
                    }
                    if self.buffer.trim().is_empty() {
                        continue;
                    }
                    let (peptide, rate, count) = match self::parse::row(&self.buffer) {
                        Ok((_, fields)) => fields,
                        Err(e) => return Some(Err(Error::from(e))),
                    };
                    return Some(
                        EncodedSequence::<Protein>::encode_residues(peptide)
                            .map(|seq| PeptideRow::new(seq, rate, count))
                            .map_err(Error::from),
                    );
                }
                Err(e) => return Some(Err(Error::from(e))),
            }
        }
    }
}

/// Read the rows from a peptide count report.
pub fn read<B: BufRead>(reader: B) -> self::Reader<B> {
    self::Reader::new(reader)
}

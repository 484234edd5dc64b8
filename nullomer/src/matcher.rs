//! Ranking of wildcard motifs by the number of nullomers they explain.
//!
//! Rather than testing each of the `21^m` candidate motifs against every
//! nullomer row, the matcher expands each length-`m` window of a row into
//! the `2^m` motifs obtained by masking some of its positions with the
//! wildcard. This yields exactly the set of motifs occurring at that
//! window, so a single pass over the windows updates all the tallies.

use std::cmp::Reverse;
use std::collections::HashMap;

use super::abc::Alphabet;
use super::abc::Symbol;
use super::codon::Chance;
use super::codon::CodonLookup;
use super::count::DEFAULT_MEMORY_LIMIT;
use super::count::REPORT_HEADER;
use super::err::ConfigError;
use super::motif::Motif;
use super::table::CountTable;

/// How a row of a peptide count report was handled by the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// The row is the report header and was skipped.
    Header,
    /// The row is not valid text, has no delimiter or no valid count,
    /// and was skipped.
    Malformed,
    /// The row describes a peptide that was observed at least once.
    Observed,
    /// The row describes a nullomer, and its motifs were tallied.
    Nullomer,
}

/// Running statistics of a [`MotifMatcher`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatcherStats {
    /// Number of rows seen, header included.
    pub rows: u64,
    /// Number of malformed rows.
    pub malformed: u64,
    /// Number of nullomer rows.
    pub nullomers: u64,
}

// --- MotifMatcher ------------------------------------------------------------

/// A tally of motif occurrences across the nullomers of a peptide report.
#[derive(Debug, Clone)]
pub struct MotifMatcher<A: Alphabet> {
    tallies: CountTable<A::K>,
    stats: MatcherStats,
    next_free: HashMap<usize, usize>,
}

impl<A: Alphabet> MotifMatcher<A> {
    /// Create a new matcher for motifs of length `m`.
    pub fn new(m: usize) -> Result<Self, ConfigError> {
        Self::with_limit(m, DEFAULT_MEMORY_LIMIT)
    }

    /// Create a new matcher, using at most `limit` bytes for the tallies
    /// and their ranking.
    pub fn with_limit(m: usize, limit: usize) -> Result<Self, ConfigError> {
        let tallies = CountTable::with_limit(m, limit)?;
        log::info!(
            "allocated tallies for {} motifs of length {}",
            tallies.len(),
            m
        );
        Ok(Self {
            tallies,
            stats: MatcherStats::default(),
            next_free: HashMap::new(),
        })
    }

    /// The length of the matched motifs.
    #[inline]
    pub fn motif_length(&self) -> usize {
        self.tallies.length()
    }

    /// The number of nullomer rows scanned so far.
    #[inline]
    pub fn nullomers(&self) -> u64 {
        self.stats.nullomers
    }

    /// The statistics accumulated so far.
    #[inline]
    pub fn stats(&self) -> &MatcherStats {
        &self.stats
    }

    /// The current tally of a motif.
    pub fn tally(&self, motif: &Motif<A>) -> Option<u64> {
        if motif.len() != self.motif_length() {
            return None;
        }
        Some(self.tallies.get(motif.index()))
    }

    /// Scan a single row of a peptide count report.
    ///
    /// The count is read from the text after the last comma. Only the
    /// peptide field, before the first comma, is searched for motifs.
    pub fn scan_row(&mut self, row: &str) -> RowOutcome {
        let row = row.trim_end_matches(['\r', '\n']);
        let first = self.stats.rows == 0;
        self.stats.rows += 1;
        if first && row == REPORT_HEADER {
            return RowOutcome::Header;
        }

        let (peptide, count) = match (row.find(','), row.rfind(',')) {
            (Some(i), Some(j)) => (&row[..i], row[j + 1..].trim()),
            _ => {
                self.stats.malformed += 1;
                return RowOutcome::Malformed;
            }
        };
        match count.parse::<u64>() {
            Ok(0) => (),
            Ok(_) => return RowOutcome::Observed,
            Err(_) => {
                self.stats.malformed += 1;
                return RowOutcome::Malformed;
            }
        }

        self.stats.nullomers += 1;
        self.tally_text(peptide);
        RowOutcome::Nullomer
    }

    /// Scan a single row given as raw bytes.
    ///
    /// Rows that are not valid UTF-8 are counted as malformed.
    pub fn scan_bytes(&mut self, row: &[u8]) -> RowOutcome {
        match std::str::from_utf8(row) {
            Ok(text) => self.scan_row(text),
            Err(_) => {
                self.stats.rows += 1;
                self.stats.malformed += 1;
                RowOutcome::Malformed
            }
        }
    }

    /// Scan all the rows of an iterator.
    pub fn scan_rows<I>(&mut self, rows: I)
    where
        I: IntoIterator,
        <I as IntoIterator>::Item: AsRef<str>,
    {
        for row in rows {
            self.scan_row(row.as_ref());
        }
    }

    /// Add the non-overlapping occurrences of every motif in `text`.
    fn tally_text(&mut self, text: &str) {
        let m = self.motif_length();
        let wildcard = A::default_symbol().as_index();
        let digits = text
            .bytes()
            .map(|c| match A::Symbol::from_ascii(c) {
                Ok(s) if A::is_residue(s) => Some(s.as_index()),
                _ => None,
            })
            .collect::<Vec<_>>();

        // bit `i` of a mask hides position `m - 1 - i` behind the wildcard
        let weights = self.tallies.weights();
        let mut masked = vec![0; 1 << m];

        self.next_free.clear();
        for (pos, window) in digits.windows(m).enumerate() {
            if window.iter().any(Option::is_none) {
                continue;
            }
            let residues = window.iter().map(|d| d.unwrap_or(wildcard));
            masked[0] = self.tallies.index_of(residues);
            for mask in 1..masked.len() {
                let bit = mask.trailing_zeros() as usize;
                let digit = window[m - 1 - bit].unwrap_or(wildcard);
                masked[mask] = masked[mask & (mask - 1)] + (wildcard - digit) * weights[bit];
            }
            for &index in masked.iter() {
                let free = self.next_free.entry(index).or_insert(0);
                if *free <= pos {
                    *free = pos + m;
                    self.tallies.increment(index);
                }
            }
        }
    }

    /// Rank all motifs by decreasing tally.
    ///
    /// Fails with [`ConfigError::NoNullomers`] when no nullomer row was
    /// scanned, since match percentages would be undefined.
    pub fn finish(self, codons: &CodonLookup<A>) -> Result<MotifReport<A>, ConfigError> {
        log::debug!("scanned {:?}", self.stats);
        if self.stats.nullomers == 0 {
            return Err(ConfigError::NoNullomers);
        }
        let mut order = (0..self.tallies.len()).collect::<Vec<_>>();
        order.sort_by_key(|&i| Reverse(self.tallies.get(i)));
        log::info!(
            "ranked {} motifs against {} nullomers",
            order.len(),
            self.stats.nullomers
        );
        Ok(MotifReport {
            tallies: self.tallies,
            nullomers: self.stats.nullomers,
            codons: codons.clone(),
            order: order.into_iter(),
        })
    }
}

// --- MotifRow ----------------------------------------------------------------

/// A single row of a motif report.
#[derive(Debug, Clone, PartialEq)]
pub struct MotifRow<A: Alphabet> {
    /// The motif.
    pub motif: Motif<A>,
    /// The number of non-overlapping occurrences across nullomers.
    pub count: u64,
    /// The count as a percentage of the number of nullomers.
    pub percent: f64,
    /// The number of codons encoding each position of the motif.
    pub codons: Vec<u8>,
    /// The sum of the per-position codon counts.
    pub codon_sum: u32,
    /// The chance of drawing the motif from random sense codons.
    pub chance: f64,
}

// --- MotifReport -------------------------------------------------------------

/// An iterator over the rows of a motif report, best explainers first.
///
/// Motifs with the same tally appear in fixed-radix order.
#[derive(Debug)]
pub struct MotifReport<A: Alphabet> {
    tallies: CountTable<A::K>,
    nullomers: u64,
    codons: CodonLookup<A>,
    order: std::vec::IntoIter<usize>,
}

impl<A: Alphabet> MotifReport<A> {
    /// The number of nullomers the percentages are relative to.
    #[inline]
    pub fn nullomers(&self) -> u64 {
        self.nullomers
    }
}

impl<A: Alphabet> Iterator for MotifReport<A> {
    type Item = MotifRow<A>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.order.next()?;
        let motif = Motif::<A>::from_index(index, self.tallies.length());
        let count = self.tallies.get(index);
        Some(MotifRow {
            percent: count as f64 / self.nullomers as f64 * 100.0,
            codons: self.codons.counts_of(motif.as_ref()),
            codon_sum: self.codons.total_of(motif.as_ref()),
            chance: self.codons.chance_of(motif.as_ref()),
            motif,
            count,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<A: Alphabet> ExactSizeIterator for MotifReport<A> {}

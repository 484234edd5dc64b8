//! Exhaustive counting of fixed-length peptides in a sequence stream.

use std::collections::BTreeMap;

use super::abc::Alphabet;
use super::abc::Symbol;
use super::codon::Chance;
use super::err::ConfigError;
use super::err::InvalidSymbol;
use super::seq::EncodedSequence;
use super::table::CountTable;

/// The default ceiling for the memory used by a dense table, in bytes.
pub const DEFAULT_MEMORY_LIMIT: usize = 4 << 30;

/// The header line of a peptide count report.
pub const REPORT_HEADER: &str = "Peptide,OccurrenceRate,PeptideOccurrenceCount";

/// The occurrence rate reported for peptides that were never observed.
pub const NULLOMER_RATE: f64 = -1.0;

// --- SequenceOutcome ---------------------------------------------------------

/// What happened to a sequence passed to a [`PeptideCounter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceOutcome {
    /// The sequence was shorter than the peptide length.
    TooShort,
    /// The sequence contained a non-residue character and was skipped.
    Rejected(InvalidSymbol),
    /// The given number of peptides were counted.
    Counted(usize),
}

/// Running statistics of a [`PeptideCounter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterStats {
    /// Number of sequences seen.
    pub sequences: u64,
    /// Number of sequences shorter than the peptide length.
    pub too_short: u64,
    /// Number of sequences skipped because of an invalid character.
    pub rejected: u64,
    /// Number of peptide occurrences counted.
    pub peptides: u64,
}

// --- PeptideCounter ----------------------------------------------------------

/// A counter for every possible peptide of a fixed length.
///
/// Counts are kept in a dense [`CountTable`] covering the whole
/// combinatorial space of residues, so that peptides which are never seen
/// are reported as well.
#[derive(Debug, Clone)]
pub struct PeptideCounter<A: Alphabet> {
    table: CountTable<A::R>,
    stats: CounterStats,
    alphabet: std::marker::PhantomData<A>,
}

impl<A: Alphabet> PeptideCounter<A> {
    /// Create a new counter for peptides of length `k`.
    pub fn new(k: usize) -> Result<Self, ConfigError> {
        Self::with_limit(k, DEFAULT_MEMORY_LIMIT)
    }

    /// Create a new counter, using at most `limit` bytes for the table.
    pub fn with_limit(k: usize, limit: usize) -> Result<Self, ConfigError> {
        let table = CountTable::with_limit(k, limit)?;
        log::info!(
            "allocated table for {} peptides of length {}",
            table.len(),
            k
        );
        Ok(Self {
            table,
            stats: CounterStats::default(),
            alphabet: std::marker::PhantomData,
        })
    }

    /// The length of the counted peptides.
    #[inline]
    pub fn peptide_length(&self) -> usize {
        self.table.length()
    }

    /// The underlying count table.
    #[inline]
    pub fn table(&self) -> &CountTable<A::R> {
        &self.table
    }

    /// The statistics accumulated so far.
    #[inline]
    pub fn stats(&self) -> &CounterStats {
        &self.stats
    }

    /// The count of a single peptide.
    pub fn count_of(&self, peptide: &[A::Symbol]) -> Option<u64> {
        if peptide.len() != self.peptide_length() || !peptide.iter().all(|&s| A::is_residue(s)) {
            return None;
        }
        let index = self.table.index_of(peptide.iter().map(Symbol::as_index));
        Some(self.table.get(index))
    }

    /// Count all the peptides of a sequence given in textual form.
    ///
    /// A sequence containing any character outside the residues is skipped
    /// entirely, none of its peptides are counted.
    pub fn count_sequence(&mut self, sequence: &str) -> SequenceOutcome {
        let k = self.peptide_length();
        self.stats.sequences += 1;
        if sequence.len() < k {
            self.stats.too_short += 1;
            return SequenceOutcome::TooShort;
        }
        match EncodedSequence::<A>::encode_residues(sequence) {
            Ok(encoded) => self.count_encoded(&encoded),
            Err(e) => {
                self.stats.rejected += 1;
                SequenceOutcome::Rejected(e)
            }
        }
    }

    /// Count all the peptides of an encoded sequence of residues.
    pub fn count_encoded(&mut self, sequence: &EncodedSequence<A>) -> SequenceOutcome {
        let k = self.peptide_length();
        if sequence.len() < k {
            return SequenceOutcome::TooShort;
        }
        if let Some(s) = sequence.iter().find(|&&s| !A::is_residue(s)) {
            return SequenceOutcome::Rejected(InvalidSymbol(s.as_char()));
        }

        let mut symbols = sequence.iter().map(Symbol::as_index);
        let mut index = self.table.index_of(symbols.by_ref().take(k - 1));
        for digit in symbols {
            index = self.table.shift(index, digit);
            self.table.increment(index);
        }

        let n = sequence.len() - k + 1;
        self.stats.peptides += n as u64;
        SequenceOutcome::Counted(n)
    }

    /// Count all the peptides of every sequence of an iterator.
    pub fn count_sequences<I>(&mut self, sequences: I)
    where
        I: IntoIterator,
        <I as IntoIterator>::Item: AsRef<str>,
    {
        for sequence in sequences {
            self.count_sequence(sequence.as_ref());
        }
    }

    /// The total number of peptide occurrences in the table.
    pub fn total(&self) -> u64 {
        self.table.sum()
    }

    /// Build a report of the counts, grouped by decreasing count value.
    ///
    /// Peptides with a count strictly below `cutoff` are omitted. The
    /// occurrence rate of each peptide is computed with the `baseline`
    /// chance model.
    pub fn report<'a, B>(&'a self, cutoff: u64, baseline: &'a B) -> PeptideReport<'a, A, B>
    where
        B: Chance<A> + ?Sized,
    {
        PeptideReport::new(self, cutoff, baseline)
    }
}

// --- PeptideRow --------------------------------------------------------------

/// A single row of a peptide count report.
#[derive(Debug, Clone, PartialEq)]
pub struct PeptideRow<A: Alphabet> {
    peptide: EncodedSequence<A>,
    rate: f64,
    count: u64,
}

impl<A: Alphabet> PeptideRow<A> {
    /// Create a new row.
    pub fn new(peptide: EncodedSequence<A>, rate: f64, count: u64) -> Self {
        Self {
            peptide,
            rate,
            count,
        }
    }

    /// The peptide of the row.
    #[inline]
    pub fn peptide(&self) -> &EncodedSequence<A> {
        &self.peptide
    }

    /// The ratio of the expected count to the observed count.
    ///
    /// Equal to [`NULLOMER_RATE`] for peptides that were never observed.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// The number of occurrences of the peptide.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Check whether the peptide was never observed.
    #[inline]
    pub fn is_nullomer(&self) -> bool {
        self.count == 0
    }
}

// --- PeptideReport -----------------------------------------------------------

/// An iterator over the rows of a peptide count report.
///
/// Rows are grouped by decreasing count; within a group, peptides appear
/// in table order, i.e. sorted by residue index.
pub struct PeptideReport<'a, A: Alphabet, B: Chance<A> + ?Sized> {
    counter: &'a PeptideCounter<A>,
    baseline: &'a B,
    total: u64,
    order: std::vec::IntoIter<usize>,
}

impl<'a, A: Alphabet, B: Chance<A> + ?Sized> PeptideReport<'a, A, B> {
    fn new(counter: &'a PeptideCounter<A>, cutoff: u64, baseline: &'a B) -> Self {
        let table = counter.table();
        let total = table.sum();

        // histogram of the reported count values, largest first
        let mut groups = BTreeMap::<u64, usize>::new();
        for count in table.iter().filter(|&c| c >= cutoff) {
            *groups.entry(count).or_default() += 1;
        }
        log::debug!(
            "reporting {} distinct count values (max = {}, sum = {})",
            groups.len(),
            groups.keys().next_back().copied().unwrap_or(0),
            total
        );

        // bucket the table indices by count value, keeping table order
        let mut offsets = BTreeMap::<u64, usize>::new();
        let mut n = 0;
        for (&count, &size) in groups.iter().rev() {
            offsets.insert(count, n);
            n += size;
        }
        let mut order = vec![0; n];
        for (index, count) in table.iter().enumerate() {
            if let Some(offset) = offsets.get_mut(&count) {
                order[*offset] = index;
                *offset += 1;
            }
        }

        Self {
            counter,
            baseline,
            total,
            order: order.into_iter(),
        }
    }

    /// The total number of peptide occurrences in the counted sequences.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }
}

impl<'a, A: Alphabet, B: Chance<A> + ?Sized> Iterator for PeptideReport<'a, A, B> {
    type Item = PeptideRow<A>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.order.next()?;
        let table = self.counter.table();
        let count = table.get(index);
        let peptide = table
            .digits_of(index)
            .into_iter()
            .map(|d| A::residues()[d])
            .collect::<Vec<_>>();
        let rate = if count == 0 {
            NULLOMER_RATE
        } else {
            self.baseline.chance_of(&peptide) * self.total as f64 / count as f64
        };
        Some(PeptideRow::new(EncodedSequence::new(peptide), rate, count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<'a, A: Alphabet, B: Chance<A> + ?Sized> ExactSizeIterator for PeptideReport<'a, A, B> {}

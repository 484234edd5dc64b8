//! Dense count tables addressed by fixed-radix symbol strings.
//!
//! A table for strings of length `n` over `C` symbols holds `C^n` counters
//! in a single flat buffer. The string `s` is stored at the index
//! `s[0] * C^(n-1) + s[1] * C^(n-2) + ... + s[n-1]`, so the counters are
//! laid out in lexicographic order of the symbol indices. Internally, the
//! buffer is a [`DenseMatrix`] with one row per prefix of length `n - 1`
//! and one column per final symbol.

use typenum::marker_traits::Unsigned;

use super::dense::DenseMatrix;
use super::err::ConfigError;

/// A dense table of counters for every string of a fixed length.
#[derive(Clone, Debug)]
pub struct CountTable<C: Unsigned> {
    data: DenseMatrix<u64, C>,
    length: usize,
}

impl<C: Unsigned> CountTable<C> {
    /// The number of bytes of the dense counters for `length`.
    ///
    /// Returns `None` for a zero length or if the size overflows.
    pub fn table_bytes(length: usize) -> Option<usize> {
        let exp = u32::try_from(length.checked_sub(1)?).ok()?;
        let rows = C::USIZE.checked_pow(exp)?;
        DenseMatrix::<u64, C>::allocation(rows)?.checked_mul(std::mem::size_of::<u64>())
    }

    /// The number of bytes needed to count and rank strings of `length`.
    ///
    /// This is the size of the dense counters plus one `usize` index per
    /// counter, as allocated when the counters are sorted for a report.
    /// Returns `None` for a zero length or if the size overflows.
    pub fn required_bytes(length: usize) -> Option<usize> {
        let entries = C::USIZE.checked_pow(u32::try_from(length).ok()?)?;
        let order = entries.checked_mul(std::mem::size_of::<usize>())?;
        Self::table_bytes(length)?.checked_add(order)
    }

    /// Allocate a zeroed table, failing if it would not fit in `limit` bytes
    /// along with the index needed to rank it.
    pub fn with_limit(length: usize, limit: usize) -> Result<Self, ConfigError> {
        if length == 0 {
            return Err(ConfigError::InvalidLength(length));
        }
        match Self::required_bytes(length) {
            Some(required) if required <= limit => (),
            required => {
                return Err(ConfigError::MemoryLimit {
                    length,
                    required,
                    limit,
                })
            }
        }
        let rows = C::USIZE.pow((length - 1) as u32);
        log::debug!(
            "allocating count table for length {} ({} entries)",
            length,
            rows * C::USIZE
        );
        Ok(Self {
            data: DenseMatrix::new(rows),
            length,
        })
    }

    /// The radix of the table, i.e. the number of symbols per position.
    #[inline]
    pub const fn radix() -> usize {
        C::USIZE
    }

    /// The length of the strings addressing the table.
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// The number of counters in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.rows() * C::USIZE
    }

    /// Check whether the table has no counters.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the index of the string with the given symbol indices.
    ///
    /// At most `length` digits must be given; a shorter string is read as
    /// if it was padded with leading zeros.
    #[inline]
    pub fn index_of<I>(&self, digits: I) -> usize
    where
        I: IntoIterator<Item = usize>,
    {
        digits
            .into_iter()
            .fold(0, |index, digit| index * C::USIZE + digit)
    }

    /// Get the weight of each position, last position first.
    ///
    /// Changing the digit at position `length - 1 - i` by `d` changes the
    /// index by `d * weights[i]`.
    pub fn weights(&self) -> Vec<usize> {
        (0..self.length).map(|i| C::USIZE.pow(i as u32)).collect()
    }

    /// Get the symbol indices of the string stored at `index`.
    pub fn digits_of(&self, mut index: usize) -> Vec<usize> {
        let mut digits = vec![0; self.length];
        for d in digits.iter_mut().rev() {
            *d = index % C::USIZE;
            index /= C::USIZE;
        }
        digits
    }

    /// Slide `index` by one position, appending `digit` to its string.
    ///
    /// The first symbol of the string is dropped, which allows computing
    /// the indices of all the windows of a sequence in a single pass.
    #[inline]
    pub fn shift(&self, index: usize, digit: usize) -> usize {
        (index % self.data.rows()) * C::USIZE + digit
    }

    /// Get the counter at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> u64 {
        self.data[index / C::USIZE][index % C::USIZE]
    }

    /// Add `n` to the counter at `index`.
    #[inline]
    pub fn add(&mut self, index: usize, n: u64) {
        self.data[index / C::USIZE][index % C::USIZE] += n;
    }

    /// Add one to the counter at `index`.
    #[inline]
    pub fn increment(&mut self, index: usize) {
        self.add(index, 1)
    }

    /// Iterate over all counters, in index order.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.data.iter().flat_map(|row| row.iter().copied())
    }

    /// The sum of all counters.
    pub fn sum(&self) -> u64 {
        self.iter().sum()
    }

    /// The largest counter value.
    pub fn max(&self) -> u64 {
        self.iter().max().unwrap_or(0)
    }

    /// Reset all counters to zero.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }
}

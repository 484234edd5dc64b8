//! Fixed-length motifs made of residues and wildcards.

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::ops::Index;
use std::str::FromStr;

use typenum::marker_traits::Unsigned;

use super::abc::Alphabet;
use super::abc::Symbol;
use super::err::InvalidSymbol;

/// The character used to render the wildcard in a motif.
pub const WILDCARD: char = '.';

// --- Motif -------------------------------------------------------------------

/// A string of residues where the wildcard matches any single residue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Motif<A: Alphabet> {
    symbols: Vec<A::Symbol>,
}

impl<A: Alphabet> Motif<A> {
    /// Create a new motif from a list of symbols.
    pub fn new(symbols: Vec<A::Symbol>) -> Self {
        Self { symbols }
    }

    /// Create the motif of the given length stored at a fixed-radix index.
    ///
    /// The first symbol is the most significant digit, and the wildcard is
    /// the last digit of each position.
    pub fn from_index(mut index: usize, length: usize) -> Self {
        let mut symbols = vec![A::default_symbol(); length];
        for s in symbols.iter_mut().rev() {
            *s = A::symbols()[index % A::K::USIZE];
            index /= A::K::USIZE;
        }
        Self::new(symbols)
    }

    /// The fixed-radix index of the motif.
    pub fn index(&self) -> usize {
        self.symbols
            .iter()
            .fold(0, |i, s| i * A::K::USIZE + s.as_index())
    }

    /// The number of positions of the motif.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check whether the motif is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The number of wildcard positions of the motif.
    pub fn wildcards(&self) -> usize {
        self.symbols.iter().filter(|&&s| !A::is_residue(s)).count()
    }

    /// Check whether the motif matches the text starting at `pos`.
    ///
    /// A wildcard only matches residue characters.
    pub fn matches_at(&self, text: &[u8], pos: usize) -> bool {
        match text.get(pos..pos + self.len()) {
            None => false,
            Some(window) => self.symbols.iter().zip(window).all(|(&s, &c)| {
                match A::Symbol::from_ascii(c) {
                    Ok(t) if A::is_residue(t) => !A::is_residue(s) || s == t,
                    _ => false,
                }
            }),
        }
    }

    /// Count the leftmost non-overlapping occurrences of the motif in `text`.
    pub fn count_in(&self, text: &str) -> usize {
        let bytes = text.as_bytes();
        let m = self.len();
        if m == 0 {
            return 0;
        }
        let mut count = 0;
        let mut pos = 0;
        while pos + m <= bytes.len() {
            if self.matches_at(bytes, pos) {
                count += 1;
                pos += m;
            } else {
                pos += 1;
            }
        }
        count
    }
}

impl<A: Alphabet> AsRef<[A::Symbol]> for Motif<A> {
    fn as_ref(&self) -> &[A::Symbol] {
        &self.symbols
    }
}

impl<A: Alphabet> Index<usize> for Motif<A> {
    type Output = A::Symbol;
    fn index(&self, index: usize) -> &Self::Output {
        &self.symbols[index]
    }
}

impl<A: Alphabet> Display for Motif<A> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for &s in self.symbols.iter() {
            if A::is_residue(s) {
                write!(f, "{}", s.as_char())?;
            } else {
                write!(f, "{}", WILDCARD)?;
            }
        }
        Ok(())
    }
}

impl<A: Alphabet> FromStr for Motif<A> {
    type Err = InvalidSymbol;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| {
                if c == WILDCARD {
                    Ok(A::default_symbol())
                } else {
                    A::Symbol::from_char(c)
                }
            })
            .collect::<Result<_, _>>()
            .map(Self::new)
    }
}

// --- Motifs ------------------------------------------------------------------

/// An iterator over every motif of a given length, in fixed-radix order.
#[derive(Debug, Clone)]
pub struct Motifs<A: Alphabet> {
    length: usize,
    indices: std::ops::Range<usize>,
    alphabet: std::marker::PhantomData<A>,
}

impl<A: Alphabet> Motifs<A> {
    /// Enumerate all the motifs of length `m`.
    ///
    /// Returns `None` if the number of motifs overflows.
    pub fn enumerate(m: usize) -> Option<Self> {
        let total = A::K::USIZE.checked_pow(u32::try_from(m).ok()?)?;
        Some(Self {
            length: m,
            indices: 0..total,
            alphabet: std::marker::PhantomData,
        })
    }
}

impl<A: Alphabet> Iterator for Motifs<A> {
    type Item = Motif<A>;
    fn next(&mut self) -> Option<Self::Item> {
        self.indices
            .next()
            .map(|i| Motif::from_index(i, self.length))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<A: Alphabet> ExactSizeIterator for Motifs<A> {}

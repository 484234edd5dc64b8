//! Digital encoding for protein sequences using an alphabet.

use std::fmt::Debug;

use generic_array::ArrayLength;
use generic_array::GenericArray;
use typenum::consts::U20;
use typenum::consts::U21;
use typenum::marker_traits::NonZero;
use typenum::marker_traits::Unsigned;

use super::err::InvalidData;
use super::err::InvalidSymbol;

// --- Symbol ------------------------------------------------------------------

/// A symbol from a biological alphabet.
pub trait Symbol: Default + Sized + Copy + Eq + Debug {
    /// View this symbol as a zero-based index.
    fn as_index(&self) -> usize;
    /// View this symbol as a string character.
    fn as_char(&self) -> char {
        self.as_ascii() as char
    }
    /// Parse a string character into a symbol.
    fn from_char(c: char) -> Result<Self, InvalidSymbol> {
        if c.is_ascii() {
            Self::from_ascii(c as u8)
        } else {
            Err(InvalidSymbol(c))
        }
    }
    /// View this symbol as an ASCII charater.
    fn as_ascii(&self) -> u8;
    /// Parse an ASCII character into a symbol.
    fn from_ascii(c: u8) -> Result<Self, InvalidSymbol>;
}

// --- Alphabet ----------------------------------------------------------------

/// A biological alphabet made of residues and a single wildcard.
///
/// The residues occupy indices `0..R`, and the wildcard, which is also the
/// default symbol, occupies index `R`, so that `K == R + 1`. Peptides are
/// written with residues only, motifs may use the wildcard as well.
pub trait Alphabet: Debug + Copy + Default + 'static {
    type Symbol: Symbol;
    /// The number of symbols, wildcard included.
    type K: Unsigned + NonZero + ArrayLength + Debug;
    /// The number of residues, wildcard excluded.
    type R: Unsigned + NonZero + ArrayLength + Debug;

    /// Get the wildcard symbol for this alphabet.
    fn default_symbol() -> Self::Symbol {
        Default::default()
    }

    /// Get all the symbols of this alphabet, sorted by index.
    fn symbols() -> &'static [Self::Symbol];

    /// Get the residues of this alphabet, sorted by index.
    fn residues() -> &'static [Self::Symbol] {
        &Self::symbols()[..Self::R::USIZE]
    }

    /// Check whether the symbol is a residue rather than the wildcard.
    #[inline]
    fn is_residue(symbol: Self::Symbol) -> bool {
        symbol.as_index() < Self::R::USIZE
    }

    /// Get a string with all symbols from this alphabet.
    fn as_str() -> &'static str;
}

// --- Protein -----------------------------------------------------------------

/// The standard protein alphabet composed of 20 residues and a wildcard.
///
/// Residues are indexed in alphabetical order of their one-letter code,
/// which keeps table addresses reproducible across runs and platforms.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Protein;

impl Alphabet for Protein {
    type Symbol = AminoAcid;
    type K = U21;
    type R = U20;

    fn symbols() -> &'static [AminoAcid] {
        use self::AminoAcid::*;
        &[
            A, C, D, E, F, G, H, I, K, L, M, N, P, Q, R, S, T, V, W, Y, X,
        ]
    }

    fn as_str() -> &'static str {
        "ACDEFGHIKLMNPQRSTVWYX"
    }
}

/// A proteinogenic amino acid, or the `X` wildcard.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum AminoAcid {
    /// Alanine.
    A = 0,
    /// Cysteine.
    C = 1,
    /// Aspartic acid.
    D = 2,
    /// Glutamic acid.
    E = 3,
    /// Phenylalanine.
    F = 4,
    /// Glycine.
    G = 5,
    /// Histidine.
    H = 6,
    /// Isoleucine.
    I = 7,
    /// Lysine.
    K = 8,
    /// Leucine.
    L = 9,
    /// Methionine.
    M = 10,
    /// Asparagine.
    N = 11,
    /// Proline.
    P = 12,
    /// Glutamine.
    Q = 13,
    /// Arginine.
    R = 14,
    /// Serine.
    S = 15,
    /// Threonine.
    T = 16,
    /// Valine.
    V = 17,
    /// Tryptophan.
    W = 18,
    /// Tyrosine.
    Y = 19,
    /// Any residue.
    #[default]
    X = 20,
}

impl Symbol for AminoAcid {
    #[inline]
    fn as_index(&self) -> usize {
        *self as usize
    }

    #[inline]
    fn as_ascii(&self) -> u8 {
        Protein::as_str().as_bytes()[self.as_index()]
    }

    /// Parse an uppercase one-letter code.
    ///
    /// Both `X` and `.` are accepted for the wildcard. Ambiguity codes
    /// (`B`, `Z`, `J`), rare residues (`U`, `O`) and lowercase letters are
    /// rejected.
    fn from_ascii(c: u8) -> Result<Self, InvalidSymbol> {
        use self::AminoAcid::*;
        match c {
            b'A' => Ok(A),
            b'C' => Ok(C),
            b'D' => Ok(D),
            b'E' => Ok(E),
            b'F' => Ok(F),
            b'G' => Ok(G),
            b'H' => Ok(H),
            b'I' => Ok(I),
            b'K' => Ok(K),
            b'L' => Ok(L),
            b'M' => Ok(M),
            b'N' => Ok(N),
            b'P' => Ok(P),
            b'Q' => Ok(Q),
            b'R' => Ok(R),
            b'S' => Ok(S),
            b'T' => Ok(T),
            b'V' => Ok(V),
            b'W' => Ok(W),
            b'Y' => Ok(Y),
            b'X' | b'.' => Ok(X),
            _ => Err(InvalidSymbol(c as char)),
        }
    }
}

// --- Background --------------------------------------------------------------

/// Observed residue frequencies for an alphabet.
///
/// The wildcard always has a frequency of zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Background<A: Alphabet> {
    frequencies: GenericArray<f64, A::K>,
    alphabet: std::marker::PhantomData<A>,
}

impl<A: Alphabet> Background<A> {
    /// Create a new background with the given frequencies.
    ///
    /// The array must contain valid frequencies, i.e. real numbers between
    /// zero and one that sum to one, with a zero frequency for the wildcard.
    pub fn new<F>(frequencies: F) -> Result<Self, InvalidData>
    where
        F: Into<GenericArray<f64, A::K>>,
    {
        let frequencies = frequencies.into();
        let mut sum = 0.0;
        for &f in frequencies.iter() {
            if !(0.0..=1.0).contains(&f) {
                return Err(InvalidData);
            }
            sum += f;
        }
        if (sum - 1.0).abs() > 1e-6 || frequencies[A::default_symbol().as_index()] != 0.0 {
            return Err(InvalidData);
        }
        Ok(Self {
            frequencies,
            alphabet: std::marker::PhantomData,
        })
    }

    /// Create a new background from non-negative residue weights.
    ///
    /// Weights are normalized to sum to one; the wildcard weight is ignored.
    pub fn from_weights<F>(weights: F) -> Result<Self, InvalidData>
    where
        F: Into<GenericArray<f64, A::K>>,
    {
        let mut frequencies = weights.into();
        frequencies[A::default_symbol().as_index()] = 0.0;
        if frequencies.iter().any(|&w| !w.is_finite() || w < 0.0) {
            return Err(InvalidData);
        }
        let total: f64 = frequencies.iter().sum();
        if total <= 0.0 {
            return Err(InvalidData);
        }
        for f in frequencies.iter_mut() {
            *f /= total;
        }
        Ok(Self {
            frequencies,
            alphabet: std::marker::PhantomData,
        })
    }

    /// Create a new background with uniform residue frequencies.
    ///
    /// # Example
    /// ```
    /// # use nullomer::abc::*;
    /// let bg = Background::<Protein>::uniform();
    /// assert_eq!(bg.frequencies()[0], 0.05);
    /// assert_eq!(bg.frequencies()[20], 0.0);
    /// ```
    pub fn uniform() -> Self {
        let frequencies = (0..A::K::USIZE)
            .map(|i| {
                if i < A::R::USIZE {
                    1.0 / (A::R::USIZE as f64)
                } else {
                    0.0
                }
            })
            .collect();
        Self {
            frequencies,
            alphabet: std::marker::PhantomData,
        }
    }

    /// A reference to the raw background frequencies.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// The frequency of a single symbol.
    #[inline]
    pub fn frequency(&self, symbol: A::Symbol) -> f64 {
        self.frequencies[symbol.as_index()]
    }
}

impl Background<Protein> {
    /// Residue composition of UniProtKB/Swiss-Prot.
    ///
    /// Percentages from the release statistics, normalized.
    pub fn swissprot() -> Self {
        #[rustfmt::skip]
        let weights = [
        //  A     C     D     E     F     G     H     I     K     L
            8.25, 1.37, 5.45, 6.75, 3.86, 7.07, 2.27, 5.96, 5.84, 9.66,
        //  M     N     P     Q     R     S     T     V     W     Y     X
            2.42, 4.06, 4.70, 3.93, 5.53, 6.56, 5.34, 6.87, 1.08, 2.92, 0.0,
        ];
        match Self::from_weights(weights) {
            Ok(bg) => bg,
            Err(_) => unreachable!("static weights are valid"),
        }
    }
}

impl<A: Alphabet> AsRef<[f64]> for Background<A> {
    fn as_ref(&self) -> &[f64] {
        self.frequencies()
    }
}

impl<A: Alphabet> Default for Background<A> {
    fn default() -> Self {
        Self::uniform()
    }
}

//! Error types shared by the counting and matching stages.

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// The given character is not a valid symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSymbol(pub char);

impl Display for InvalidSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "invalid symbol: {:?}", self.0)
    }
}

impl std::error::Error for InvalidSymbol {}

/// Invalid data was passed to initialize a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidData;

impl Display for InvalidData {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("invalid data")
    }
}

impl std::error::Error for InvalidData {}

/// A run was configured with parameters that cannot be honoured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A peptide or motif length of zero was requested.
    InvalidLength(usize),
    /// The dense table for the requested length, with its ranking index,
    /// does not fit the limit.
    ///
    /// `required` is `None` when the size overflows the address space.
    MemoryLimit {
        length: usize,
        required: Option<usize>,
        limit: usize,
    },
    /// No nullomer row was found, so match percentages are undefined.
    NoNullomers,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ConfigError::InvalidLength(n) => {
                write!(f, "invalid length: {} (must be at least 1)", n)
            }
            ConfigError::MemoryLimit {
                length,
                required: Some(required),
                limit,
            } => write!(
                f,
                "counting strings of length {} needs {} bytes, above the limit of {} bytes",
                length, required, limit
            ),
            ConfigError::MemoryLimit {
                length,
                required: None,
                limit,
            } => write!(
                f,
                "a dense table for length {} overflows the address space (limit is {} bytes)",
                length, limit
            ),
            ConfigError::NoNullomers => {
                f.write_str("no nullomer found in the input, match percentages are undefined")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

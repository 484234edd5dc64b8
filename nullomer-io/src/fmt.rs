//! Number formatting shared by the report writers.
//!
//! Reports are meant to be consumed by spreadsheet tools and scripts, and
//! use the general and scientific notations of C `printf` rather than the
//! shortest round-trip representation of Rust floats.

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Split a float into a rounded mantissa and decimal exponent.
fn decompose(value: f64, digits: usize) -> (String, i32) {
    let text = format!("{:.*e}", digits.saturating_sub(1), value);
    match text.split_once('e') {
        Some((mantissa, exp)) => (mantissa.to_string(), exp.parse().unwrap_or(0)),
        None => (text, 0),
    }
}

fn trim_zeros(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

fn write_exponent(f: &mut Formatter<'_>, exp: i32) -> FmtResult {
    let sign = if exp < 0 { '-' } else { '+' };
    write!(f, "e{}{:02}", sign, exp.abs())
}

// --- General -----------------------------------------------------------------

/// A float in general notation with a number of significant digits.
///
/// Trailing zeros are removed, but fixed notation keeps at least one digit
/// after the decimal point, e.g. `0.01639`, `2.0` or `2.5e-07`. Values
/// whose exponent is at least the number of digits minus one switch to
/// scientific notation, since their fixed form would need an extra digit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct General(pub f64, pub usize);

impl Display for General {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let General(value, digits) = *self;
        let digits = digits.max(1);
        if !value.is_finite() {
            return write!(f, "{}", value);
        }
        if value == 0.0 {
            return f.write_str(if value.is_sign_negative() { "-0.0" } else { "0.0" });
        }
        let (mantissa, exp) = decompose(value, digits);
        if exp < -4 || exp >= digits as i32 - 1 {
            f.write_str(trim_zeros(&mantissa))?;
            write_exponent(f, exp)
        } else {
            let decimals = (digits as i32 - 1 - exp) as usize;
            let text = format!("{:.*}", decimals, value);
            let trimmed = trim_zeros(&text);
            if trimmed.contains('.') {
                f.write_str(trimmed)
            } else {
                write!(f, "{}.0", trimmed)
            }
        }
    }
}

// --- Scientific --------------------------------------------------------------

/// A float in scientific notation with a fixed number of decimals.
///
/// The exponent is signed and has at least two digits, e.g. `1.639e-02`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scientific(pub f64, pub usize);

impl Display for Scientific {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let Scientific(value, decimals) = *self;
        if !value.is_finite() {
            return write!(f, "{}", value);
        }
        let (mantissa, exp) = decompose(value, decimals + 1);
        f.write_str(&mantissa)?;
        write_exponent(f, exp)
    }
}

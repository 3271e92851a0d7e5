//! Numeric argument extraction
//!
//! Arguments are validated against a caller-supplied inclusive range.
//! Extraction never panics; every failure is a [`ParseError`].

/// Reasons a numeric argument was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// No token at the requested position
    Missing,
    /// Token is not a finite number
    Malformed,
    /// Value lies outside the permitted range
    OutOfRange,
    /// Value has a fractional part where a whole number is required
    NotInteger,
}

/// Extract the floating point argument at `index`, inclusive range `[min, max]`
pub fn extract_num(tokens: &[&str], index: usize, min: f64, max: f64) -> Result<f64, ParseError> {
    let token = tokens.get(index).ok_or(ParseError::Missing)?;
    let value: f64 = token.parse().map_err(|_| ParseError::Malformed)?;
    if !value.is_finite() {
        return Err(ParseError::Malformed);
    }
    if value < min || value > max {
        return Err(ParseError::OutOfRange);
    }
    Ok(value)
}

/// Extract a whole-number argument at `index`, inclusive range `[min, max]`
///
/// The token may be written in any form `extract_num` accepts (`12`,
/// `12.0`, `1.2e1`) as long as it has no fractional part.
pub fn extract_int(tokens: &[&str], index: usize, min: i32, max: i32) -> Result<i32, ParseError> {
    let value = extract_num(tokens, index, min as f64, max as f64)?;
    if value % 1.0 != 0.0 {
        return Err(ParseError::NotInteger);
    }
    Ok(value as i32)
}

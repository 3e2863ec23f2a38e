use log::debug;

use crate::operations::errors::OperationError;

/// Rounds to the nearest integer, ties to even
///
/// # Errors
///
/// Returns an error for NaN, infinities and values outside the `i64` range.
pub fn round_half_even(value: f64) -> Result<i64, OperationError> {
    let rounded = value.round_ties_even();
    // i64::MAX is not representable in f64; 2^63 is the first value past the range
    if !rounded.is_finite() || rounded < -(2_f64.powi(63)) || rounded >= 2_f64.powi(63) {
        debug!("Cannot represent {} as an integer", value);
        return Err(OperationError::NotRepresentable { value });
    }
    Ok(rounded as i64)
}

/// `percent` percent of `number`
pub fn percentage(number: f64, percent: f64) -> f64 {
    percent / 100.0 * number
}

use std::fmt;

use log::{debug, info};
use rayon::prelude::*;

use crate::expression::float_pow;
use crate::operations::errors::OperationError;

/// `base ** exponent` in floating point
///
/// # Errors
///
/// Returns an error for a negative base with a fractional exponent, zero raised to a
/// negative power, or a result too large for `f64`.
pub fn power(base: f64, exponent: f64) -> Result<f64, OperationError> {
    debug!("Computing {} ** {}", base, exponent);
    Ok(float_pow(base, exponent)?)
}

/// One way of writing a number as `base ^ exponent`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerfectPower {
    pub number: i64,
    pub base: i64,
    pub exponent: u32,
}

impl fmt::Display for PerfectPower {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} is: {}^{}", self.number, self.base, self.exponent)
    }
}

/// Integer `exponent`-th root of `number`, if it is exact and at least 2
fn exact_root(number: i64, exponent: u32) -> Option<i64> {
    let estimate = (number as f64).powf(1.0 / f64::from(exponent)).round() as i64;
    (estimate.saturating_sub(1)..=estimate.saturating_add(1))
        .filter(|&base| base >= 2)
        .find(|&base| base.checked_pow(exponent) == Some(number))
}

/// Every `(base, exponent)` pair with both at least 2 and `base ^ exponent == number`,
/// ordered by base
pub fn perfect_powers(number: i64) -> Vec<PerfectPower> {
    info!("Searching for perfect power forms of {}", number);

    if number < 4 {
        return Vec::new();
    }

    let mut found: Vec<PerfectPower> = (2..i64::BITS)
        .into_par_iter()
        .filter_map(|exponent| {
            exact_root(number, exponent).map(|base| PerfectPower {
                number,
                base,
                exponent,
            })
        })
        .collect();
    found.sort_unstable_by_key(|p| p.base);

    debug!("Found {} perfect power forms of {}", found.len(), number);
    found
}

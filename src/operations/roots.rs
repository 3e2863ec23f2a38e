use std::fmt;

use log::debug;

use crate::operations::errors::OperationError;

/// `coefficient * degree-th_root(remaining)`, the simplified form of a root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootForm {
    pub number: i64,
    pub degree: u32,
    pub coefficient: i64,
    pub remaining: i64,
}

impl RootForm {
    pub fn is_exact(&self) -> bool {
        self.remaining == 1
    }
}

impl fmt::Display for RootForm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_exact() {
            write!(f, "{}-th root of {} = {}", self.degree, self.number, self.coefficient)
        } else {
            write!(
                f,
                "{}-th root of {} = {} * {}-th_root({})",
                self.degree, self.number, self.coefficient, self.degree, self.remaining
            )
        }
    }
}

/// Pulls the largest perfect `degree`-th power factor out of `number`
///
/// # Errors
///
/// Returns an error if `number` is not positive or `degree` is zero.
pub fn simplify_root(number: i64, degree: u32) -> Result<RootForm, OperationError> {
    if number < 1 {
        return Err(OperationError::NonPositive { value: number });
    }
    if degree == 0 {
        return Err(OperationError::InvalidDegree);
    }

    // Float estimate of the root, corrected upward where it undershoots
    let mut start = (number as f64).powf(1.0 / f64::from(degree)).round() as i64;
    while start
        .checked_add(1)
        .and_then(|next| next.checked_pow(degree))
        .is_some_and(|p| p <= number)
    {
        start += 1;
    }

    let (coefficient, factor) = (1..=start.max(1))
        .rev()
        .find_map(|candidate| {
            candidate
                .checked_pow(degree)
                .filter(|p| number % p == 0)
                .map(|p| (candidate, p))
        })
        .unwrap_or((1, 1));

    let form = RootForm {
        number,
        degree,
        coefficient,
        remaining: number / factor,
    };
    debug!("Simplified root: {}", form);
    Ok(form)
}

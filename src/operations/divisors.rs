use log::debug;

use crate::operations::errors::OperationError;

/// All positive divisors of `number`, largest first
///
/// # Errors
///
/// Returns an error if `number` is not positive.
pub fn divisors(number: i64) -> Result<Vec<i64>, OperationError> {
    if number < 1 {
        return Err(OperationError::NonPositive { value: number });
    }

    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut candidate: i64 = 1;
    while candidate <= number / candidate {
        if number % candidate == 0 {
            small.push(candidate);
            let pair = number / candidate;
            if pair != candidate {
                large.push(pair);
            }
        }
        candidate += 1;
    }

    // `large` is already descending; `small` is ascending
    large.extend(small.into_iter().rev());
    debug!("Found {} divisors of {}", large.len(), number);
    Ok(large)
}

use dashu::integer::IBig;

use super::{Number, NumericError};

/// Largest argument accepted by [`factorial`]. `12!` is the largest factorial
/// that fits in an `i32`.
pub const FACTORIAL_MAX_ARGUMENT: u32 = 12;

/// Exact factorial of a small non-negative integer.
///
/// # Errors
///
/// Returns [`NumericError::InvalidFactorialArgument`] unless `n` is an integer
/// in `0..=FACTORIAL_MAX_ARGUMENT`.
pub fn factorial(n: &Number) -> Result<Number, NumericError> {
    let invalid = NumericError::InvalidFactorialArgument {
        max: FACTORIAL_MAX_ARGUMENT,
    };
    let Number::Integer(value) = n else {
        return Err(invalid);
    };
    let n = u32::try_from(value.clone()).map_err(|_| invalid)?;
    if n > FACTORIAL_MAX_ARGUMENT {
        return Err(invalid);
    }

    let product = (1..=n).fold(IBig::ONE, |product, k| product * IBig::from(k));
    Ok(Number::Integer(product))
}

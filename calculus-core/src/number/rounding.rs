use dashu::integer::IBig;

use super::{Number, NumericError, arith::sub};

/// Direction in which a non-integral value is rounded to an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundMode {
    /// Toward positive infinity.
    Ceil,
    /// Toward negative infinity.
    Floor,
    /// Toward zero.
    Inward,
    /// Away from zero.
    Outward,
}

/// Rounds `value` to an integer according to `mode`.
///
/// Integers are returned unchanged. Other values are truncated toward zero and
/// then moved one unit when `mode` and the sign of `value` require it.
///
/// # Errors
///
/// Returns [`NumericError::InfiniteCannotBeRounded`] for infinite reals.
pub fn round(value: &Number, mode: RoundMode) -> Result<Number, NumericError> {
    let truncated = match value {
        Number::Integer(integer) => return Ok(Number::Integer(integer.clone())),
        Number::Rational(rational) => {
            rational.numerator() / IBig::from(rational.denominator().clone())
        }
        Number::Real(_) if !value.is_finite() => {
            return Err(NumericError::InfiniteCannotBeRounded);
        }
        Number::Real(real) => real.trunc().to_int().value(),
    };

    if value.is_integral() {
        return Ok(Number::Integer(truncated));
    }

    let negative = value.is_negative();
    let adjusted = match (mode, negative) {
        (RoundMode::Inward, _) | (RoundMode::Ceil, true) | (RoundMode::Floor, false) => truncated,
        (RoundMode::Outward | RoundMode::Floor, true) => truncated - IBig::ONE,
        (RoundMode::Outward | RoundMode::Ceil, false) => truncated + IBig::ONE,
    };
    Ok(Number::Integer(adjusted))
}

/// Returns the fractional part, `value - round(value, Inward)`.
///
/// The result keeps the sign of `value` and its representation.
///
/// # Errors
///
/// Returns [`NumericError::InfiniteCannotBeRounded`] for infinite reals.
pub fn frac(value: &Number) -> Result<Number, NumericError> {
    let integral = round(value, RoundMode::Inward)?;
    sub(value, &[integral])
}

/// Splits `value` into its integral and fractional parts.
///
/// # Errors
///
/// Returns [`NumericError::InfiniteCannotBeRounded`] for infinite reals.
pub fn split(value: &Number) -> Result<(Number, Number), NumericError> {
    let integral = round(value, RoundMode::Inward)?;
    let fractional = sub(value, std::slice::from_ref(&integral))?;
    Ok((integral, fractional))
}

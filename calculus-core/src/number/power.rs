use dashu::{
    base::{Abs, BitTest, UnsignedAbs},
    integer::IBig,
    rational::RBig,
};

use super::{
    Number, NumericError, Real,
    arith::{Pair, unify_pair},
    at_working_precision, real_from_rational,
};

/// Raises `base` to `exponent`.
///
/// Integer powers are exact: non-negative exponents produce integers and
/// negative exponents produce the exact rational reciprocal. As soon as either
/// operand is rational or real the power is computed in the real domain as
/// `exp(exponent * ln(base))`.
///
/// # Errors
///
/// - [`NumericError::InvalidPowerOperation`] for `0^0`, or a negative base
///   raised to a non-integral exponent.
/// - [`NumericError::DivisionByZero`] for zero raised to a negative exponent.
/// - [`NumericError::PrecisionLimitExceeded`] if an exact result cannot be
///   materialised.
pub fn pow(base: &Number, exponent: &Number) -> Result<Number, NumericError> {
    match unify_pair(base, exponent)? {
        Pair::Integers(base, exponent) => integer_pow(&base, &exponent),
        Pair::Rationals(base, exponent) => {
            real_pow(&real_from_rational(&base), &real_from_rational(&exponent)).map(Number::Real)
        }
        Pair::Reals(base, exponent) => real_pow(&base, &exponent).map(Number::Real),
    }
}

/// Returns the `degree`-th root of `base`, i.e. `base^(1/degree)`.
///
/// # Errors
///
/// Fails like [`pow`], or with [`NumericError::DivisionByZero`] for a zero
/// degree.
pub fn root(base: &Number, degree: &Number) -> Result<Number, NumericError> {
    pow(base, &degree.inv()?)
}

/// Natural logarithm, always computed in the real domain.
///
/// # Errors
///
/// Returns [`NumericError::LogarithmOfNegative`] for non-positive arguments.
pub fn ln(value: &Number) -> Result<Number, NumericError> {
    real_ln(&value.finite_real()?).map(Number::Real)
}

/// Logarithm of `power` in `base`, computed as `ln(power) / ln(base)`.
///
/// # Errors
///
/// Returns [`NumericError::LogarithmOfNegative`] if either argument is
/// non-positive, or [`NumericError::DivisionByZero`] for base `1`.
pub fn log(base: &Number, power: &Number) -> Result<Number, NumericError> {
    let numerator = real_ln(&power.finite_real()?)?;
    let denominator = real_ln(&base.finite_real()?)?;
    if denominator == Real::ZERO {
        return Err(NumericError::DivisionByZero);
    }
    Ok(Number::Real(at_working_precision(numerator / denominator)))
}

/// Natural exponential, always computed in the real domain.
///
/// # Errors
///
/// Returns [`NumericError::NonFiniteOperand`] for infinite arguments.
pub fn exp(value: &Number) -> Result<Number, NumericError> {
    Ok(Number::Real(at_working_precision(value.finite_real()?.exp())))
}

fn real_ln(value: &Real) -> Result<Real, NumericError> {
    if *value <= Real::ZERO {
        return Err(NumericError::LogarithmOfNegative);
    }
    Ok(at_working_precision(value.ln()))
}

/// Largest exact power, in bits, that [`pow`] will materialise.
pub const MAX_EXACT_POWER_BITS: usize = 1 << 24;

fn integer_pow(base: &IBig, exponent: &IBig) -> Result<Number, NumericError> {
    if *exponent == IBig::ZERO {
        if *base == IBig::ZERO {
            return Err(NumericError::InvalidPowerOperation);
        }
        return Ok(Number::one());
    }

    let negative = *exponent < IBig::ZERO;
    if negative && *base == IBig::ZERO {
        return Err(NumericError::DivisionByZero);
    }

    let magnitude = exponent.clone().abs();
    let power = match trivial_power(base, &magnitude) {
        Some(power) => power,
        None => {
            let exponent =
                usize::try_from(magnitude).map_err(|_| NumericError::PrecisionLimitExceeded)?;
            let result_bits = base.unsigned_abs().bit_len().checked_mul(exponent);
            if result_bits.is_none_or(|bits| bits > MAX_EXACT_POWER_BITS) {
                return Err(NumericError::PrecisionLimitExceeded);
            }
            binary_pow(base, exponent)
        }
    };

    if negative {
        Ok(Number::Rational(RBig::ONE / RBig::from(power)))
    } else {
        Ok(Number::Integer(power))
    }
}

/// Powers of `0`, `1` and `-1`, which never need the exponent materialised.
fn trivial_power(base: &IBig, magnitude: &IBig) -> Option<IBig> {
    if *base == IBig::ZERO || *base == IBig::ONE {
        return Some(base.clone());
    }
    if *base == IBig::NEG_ONE {
        let odd = magnitude % IBig::from(2) != IBig::ZERO;
        return Some(if odd { IBig::NEG_ONE } else { IBig::ONE });
    }
    None
}

fn binary_pow(base: &IBig, mut exponent: usize) -> IBig {
    let mut result = IBig::ONE;
    let mut factor = base.clone();
    while exponent > 0 {
        if exponent & 1 == 1 {
            result *= &factor;
        }
        exponent >>= 1;
        if exponent > 0 {
            factor = &factor * &factor;
        }
    }
    result
}

fn real_pow(base: &Real, exponent: &Real) -> Result<Real, NumericError> {
    if *base == Real::ZERO {
        return if *exponent > Real::ZERO {
            Ok(base.clone())
        } else if *exponent == Real::ZERO {
            Err(NumericError::InvalidPowerOperation)
        } else {
            Err(NumericError::DivisionByZero)
        };
    }

    if *base > Real::ZERO {
        return Ok(at_working_precision((exponent.clone() * base.ln()).exp()));
    }

    let truncated = exponent.trunc();
    if truncated != *exponent {
        return Err(NumericError::InvalidPowerOperation);
    }
    let odd = truncated.to_int().value() % IBig::from(2) != IBig::ZERO;
    let magnitude = at_working_precision((exponent.clone() * (-base.clone()).ln()).exp());
    Ok(if odd { -magnitude } else { magnitude })
}

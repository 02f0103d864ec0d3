use super::{Number, NumericError};

/// Sine of an angle in radians.
///
/// # Errors
///
/// Returns [`NumericError::PrecisionLimitExceeded`] if the angle does not fit
/// in an `f64`.
pub fn sin(angle: &Number) -> Result<Number, NumericError> {
    Number::try_from(native(angle)?.sin())
}

/// Cosine of an angle in radians.
///
/// # Errors
///
/// Returns [`NumericError::PrecisionLimitExceeded`] if the angle does not fit
/// in an `f64`.
pub fn cos(angle: &Number) -> Result<Number, NumericError> {
    Number::try_from(native(angle)?.cos())
}

/// Tangent of an angle in radians.
///
/// # Errors
///
/// Returns [`NumericError::TangentOfVertical`] where the cosine vanishes, or
/// [`NumericError::PrecisionLimitExceeded`] if the angle does not fit in an
/// `f64`.
pub fn tan(angle: &Number) -> Result<Number, NumericError> {
    let angle = native(angle)?;
    if angle.cos().abs() <= f64::EPSILON {
        return Err(NumericError::TangentOfVertical);
    }
    Number::try_from(angle.tan())
}

fn native(angle: &Number) -> Result<f64, NumericError> {
    let value = angle.finite_real()?.to_f64().value();
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NumericError::PrecisionLimitExceeded)
    }
}

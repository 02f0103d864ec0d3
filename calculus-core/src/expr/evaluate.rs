use crate::{
    Error,
    number::{self, Number, NumericError},
};

use super::{Arguments, Expr};

impl Expr {
    /// Evaluates the expression with every free variable taken from
    /// `arguments`.
    ///
    /// # Errors
    ///
    /// - [`Error::UndefinedValue`] if a free variable has no binding.
    /// - [`Error::Numeric`] if a numeric operation fails.
    /// - [`Error::UndefinedOnInteger`] if a defective-on-integer node is
    ///   evaluated at an integral point.
    /// - Any goal-seek error.
    pub fn evaluate(&self, arguments: &Arguments) -> Result<Number, Error> {
        Ok(match self {
            Self::Variable(variable) => arguments
                .get(variable)
                .cloned()
                .ok_or_else(|| Error::UndefinedValue {
                    variable: variable.clone(),
                })?,
            Self::Constant(value) => value.clone(),
            Self::Add(terms) => number::add(&evaluate_all(terms, arguments)?)?,
            Self::Mul(factors) => number::mul(&evaluate_all(factors, arguments)?)?,
            Self::Negate(inner) => -inner.evaluate(arguments)?,
            Self::Invert(inner) => inner.evaluate(arguments)?.inv()?,
            Self::Power { base, exponent } => {
                number::pow(&base.evaluate(arguments)?, &exponent.evaluate(arguments)?)?
            }
            Self::Ln(inner) => number::ln(&inner.evaluate(arguments)?)?,
            Self::Log { base, power } => {
                number::log(&base.evaluate(arguments)?, &power.evaluate(arguments)?)?
            }
            Self::Exp(inner) => number::exp(&inner.evaluate(arguments)?)?,
            Self::Sin(inner) => number::sin(&inner.evaluate(arguments)?)?,
            Self::Cos(inner) => number::cos(&inner.evaluate(arguments)?)?,
            Self::Tan(inner) => number::tan(&inner.evaluate(arguments)?)?,
            Self::Factorial(inner) => number::factorial(&inner.evaluate(arguments)?)?,
            Self::Round { inner, mode } => number::round(&inner.evaluate(arguments)?, *mode)?,
            Self::Frac(inner) => number::frac(&inner.evaluate(arguments)?)?,
            Self::DefectiveOnInteger { bypassed, value } => {
                defective_on_integer(&bypassed.evaluate(arguments)?, value)?
            }
            Self::GoalSeek(goal_seek) => goal_seek.evaluate(arguments)?,
        })
    }
}

fn evaluate_all(children: &[Expr], arguments: &Arguments) -> Result<Vec<Number>, Error> {
    children.iter().map(|child| child.evaluate(arguments)).collect()
}

pub(super) fn defective_on_integer(bypassed: &Number, value: &Number) -> Result<Number, Error> {
    if !bypassed.is_finite() {
        Err(NumericError::InfiniteCannotBeRounded.into())
    } else if bypassed.is_integral() {
        Err(Error::UndefinedOnInteger)
    } else {
        Ok(value.clone())
    }
}

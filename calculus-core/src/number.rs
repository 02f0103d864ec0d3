//! Multi-precision numeric tower.
//!
//! A [`Number`] is an exact integer, an exact rational, or a binary
//! floating-point real with [`REAL_PRECISION`] bits of working precision.
//! Every operation classifies its operands into a [`Domain`], broadens them
//! to the narrowest domain containing all of them, and computes there, so
//! exact arithmetic survives as long as it can.
//!
//! Reals never narrow back: once a value leaves the exact domains it stays a
//! real.

mod arith;
mod domain;
mod error;
mod factorial;
mod power;
mod rounding;
mod trig;

use std::{cmp::Ordering, fmt};

use dashu::{
    base::Abs,
    float::{FBig, round::mode::HalfEven},
    integer::IBig,
    rational::RBig,
};
use num_traits::{FromPrimitive, ToPrimitive};

pub use arith::{add, div, mul, near, opposite_signs, sub};
pub use domain::Domain;
pub use error::NumericError;
pub use factorial::{FACTORIAL_MAX_ARGUMENT, factorial};
pub use power::{MAX_EXACT_POWER_BITS, exp, ln, log, pow, root};
pub use rounding::{RoundMode, frac, round, split};
pub use trig::{cos, sin, tan};

/// Arbitrary-precision binary float backing the real domain.
pub type Real = FBig<HalfEven, 2>;

/// Working precision, in bits, of every real produced by the tower.
pub const REAL_PRECISION: usize = 256;

/// A numeric value tagged by its representation.
#[derive(Debug, Clone)]
pub enum Number {
    Integer(IBig),
    Rational(RBig),
    Real(Real),
}

impl Number {
    /// The integer `0`.
    #[must_use]
    pub fn zero() -> Self {
        Self::Integer(IBig::ZERO)
    }

    /// The integer `1`.
    #[must_use]
    pub fn one() -> Self {
        Self::Integer(IBig::ONE)
    }

    /// Creates the exact rational `numerator / denominator`.
    ///
    /// # Errors
    ///
    /// Returns [`NumericError::DivisionByZero`] if `denominator` is zero.
    pub fn rational(
        numerator: impl Into<IBig>,
        denominator: impl Into<IBig>,
    ) -> Result<Self, NumericError> {
        let denominator = denominator.into();
        if denominator == IBig::ZERO {
            return Err(NumericError::DivisionByZero);
        }
        Ok(Self::Rational(
            RBig::from(numerator.into()) / RBig::from(denominator),
        ))
    }

    /// Returns the narrowest domain this value belongs to.
    #[must_use]
    pub fn domain(&self) -> Domain {
        match self {
            Self::Integer(value) => match value.cmp(&IBig::ZERO) {
                Ordering::Greater => Domain::N,
                Ordering::Equal => Domain::N0,
                Ordering::Less => Domain::Z,
            },
            Self::Rational(_) => Domain::Q,
            Self::Real(_) => Domain::R,
        }
    }

    /// Returns whether this value is a member of `domain`.
    #[must_use]
    pub fn belongs_to(&self, domain: Domain) -> bool {
        self.domain() <= domain
    }

    /// Converts the value to a real at working precision.
    #[must_use]
    pub fn to_real(&self) -> Real {
        match self {
            Self::Integer(value) => real_from_integer(value),
            Self::Rational(value) => real_from_rational(value),
            Self::Real(value) => value.clone(),
        }
    }

    /// Returns whether the value is finite. Exact values always are.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Real(value) => is_finite_real(value),
            _ => true,
        }
    }

    /// Returns whether the value has no fractional part.
    #[must_use]
    pub fn is_integral(&self) -> bool {
        match self {
            Self::Integer(_) => true,
            Self::Rational(value) => value.denominator().is_one(),
            Self::Real(value) => is_finite_real(value) && value.trunc() == *value,
        }
    }

    /// Returns whether the value is the additive identity.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Integer(value) => *value == IBig::ZERO,
            Self::Rational(value) => value.is_zero(),
            Self::Real(value) => *value == Real::ZERO,
        }
    }

    /// Returns whether the value is the multiplicative identity.
    #[must_use]
    pub fn is_one(&self) -> bool {
        match self {
            Self::Integer(value) => *value == IBig::ONE,
            Self::Rational(value) => *value == RBig::ONE,
            Self::Real(value) => *value == Real::ONE,
        }
    }

    /// Returns whether the value is strictly below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Integer(value) => *value < IBig::ZERO,
            Self::Rational(value) => *value < RBig::ZERO,
            Self::Real(value) => real_sign(value) == Ordering::Less,
        }
    }

    /// Returns whether the value is strictly above zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        match self {
            Self::Integer(value) => *value > IBig::ZERO,
            Self::Rational(value) => *value > RBig::ZERO,
            Self::Real(value) => real_sign(value) == Ordering::Greater,
        }
    }

    /// Returns the absolute value, in the same representation.
    #[must_use]
    pub fn abs(&self) -> Self {
        match self {
            Self::Integer(value) => Self::Integer(value.clone().abs()),
            Self::Rational(value) => Self::Rational(value.clone().abs()),
            Self::Real(value) if is_finite_real(value) && *value < Real::ZERO => {
                Self::Real(-value.clone())
            }
            Self::Real(value) if is_finite_real(value) => Self::Real(value.clone()),
            Self::Real(_) => Self::Real(Real::INFINITY),
        }
    }

    /// Returns the reciprocal. Integers invert to exact rationals.
    ///
    /// # Errors
    ///
    /// Returns [`NumericError::DivisionByZero`] for zero.
    pub fn inv(&self) -> Result<Self, NumericError> {
        if self.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        match self {
            Self::Integer(value) => Ok(Self::Rational(RBig::ONE / RBig::from(value.clone()))),
            Self::Rational(value) => Ok(Self::Rational(RBig::ONE / value.clone())),
            Self::Real(value) => {
                let value = finite(value)?;
                Ok(Self::Real(real_from_integer(&IBig::ONE) / value))
            }
        }
    }

    /// Returns the value as an exact rational, or `None` for reals.
    pub(crate) fn exact_rational(&self) -> Option<RBig> {
        match self {
            Self::Integer(value) => Some(RBig::from(value.clone())),
            Self::Rational(value) => Some(value.clone()),
            Self::Real(_) => None,
        }
    }

    /// Returns the value as a real, rejecting infinities.
    pub(crate) fn finite_real(&self) -> Result<Real, NumericError> {
        match self {
            Self::Real(value) => finite(value),
            exact => Ok(exact.to_real()),
        }
    }
}

impl std::ops::Neg for Number {
    type Output = Number;

    fn neg(self) -> Number {
        match self {
            Self::Integer(value) => Self::Integer(-value),
            Self::Rational(value) => Self::Rational(-value),
            Self::Real(value) => Self::Real(-value),
        }
    }
}

impl std::ops::Neg for &Number {
    type Output = Number;

    fn neg(self) -> Number {
        -self.clone()
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    /// Compares numerically after broadening both operands.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => Some(a.cmp(b)),
            (Self::Real(_), _) | (_, Self::Real(_)) => self.to_real().partial_cmp(&other.to_real()),
            _ => {
                let a = self.exact_rational()?;
                let b = other.exact_rational()?;
                Some(a.cmp(&b))
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Rational(value) => write!(f, "{value}"),
            Self::Real(value) => write!(f, "{}", value.to_f64().value()),
        }
    }
}

impl ToPrimitive for Number {
    fn to_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => i64::try_from(value.clone()).ok(),
            Self::Rational(value) => {
                let truncated = value.numerator() / IBig::from(value.denominator().clone());
                i64::try_from(truncated).ok()
            }
            Self::Real(value) => value.to_f64().value().to_i64(),
        }
    }

    fn to_u64(&self) -> Option<u64> {
        match self {
            Self::Integer(value) => u64::try_from(value.clone()).ok(),
            Self::Rational(value) => {
                let truncated = value.numerator() / IBig::from(value.denominator().clone());
                u64::try_from(truncated).ok()
            }
            Self::Real(value) => value.to_f64().value().to_u64(),
        }
    }

    fn to_f64(&self) -> Option<f64> {
        Some(self.to_real().to_f64().value())
    }
}

impl FromPrimitive for Number {
    fn from_i64(n: i64) -> Option<Self> {
        Some(Self::from(n))
    }

    fn from_u64(n: u64) -> Option<Self> {
        Some(Self::from(n))
    }

    fn from_f64(n: f64) -> Option<Self> {
        Self::try_from(n).ok()
    }
}

macro_rules! impl_from_primitive_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(value: $t) -> Self {
                    Self::Integer(IBig::from(value))
                }
            }
        )*
    };
}

impl_from_primitive_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<IBig> for Number {
    fn from(value: IBig) -> Self {
        Self::Integer(value)
    }
}

impl From<RBig> for Number {
    fn from(value: RBig) -> Self {
        Self::Rational(value)
    }
}

impl From<Real> for Number {
    /// Wraps a real, rounded to [`REAL_PRECISION`] bits.
    fn from(value: Real) -> Self {
        Self::Real(at_working_precision(value))
    }
}

impl TryFrom<f64> for Number {
    type Error = NumericError;

    /// Converts a native float to a real at working precision.
    ///
    /// Infinities are kept as non-finite reals; arithmetic on them fails with
    /// [`NumericError::NonFiniteOperand`].
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_nan() {
            return Err(NumericError::NotANumber);
        }
        if value.is_infinite() {
            let infinity = if value > 0.0 {
                Real::INFINITY
            } else {
                Real::NEG_INFINITY
            };
            return Ok(Self::Real(infinity));
        }
        let real = Real::try_from(value).map_err(|_| NumericError::NotANumber)?;
        Ok(Self::Real(at_working_precision(real)))
    }
}

pub(crate) fn real_from_integer(value: &IBig) -> Real {
    at_working_precision(Real::from(value.clone()))
}

/// Rounds a finite real to [`REAL_PRECISION`] bits.
///
/// Some dashu results (`exp(0)`, exact conversions) carry precision 0, which
/// dashu's transcendental functions reject with a panic.
pub(crate) fn at_working_precision(value: Real) -> Real {
    if is_finite_real(&value) {
        value.with_precision(REAL_PRECISION).value()
    } else {
        value
    }
}

pub(crate) fn real_from_rational(value: &RBig) -> Real {
    real_from_integer(value.numerator()) / real_from_integer(&IBig::from(value.denominator().clone()))
}

/// Sign of a real as an ordering against zero, infinities included.
fn real_sign(value: &Real) -> Ordering {
    if *value == Real::INFINITY {
        Ordering::Greater
    } else if *value == Real::NEG_INFINITY {
        Ordering::Less
    } else if *value == Real::ZERO {
        Ordering::Equal
    } else if *value < Real::ZERO {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

fn is_finite_real(value: &Real) -> bool {
    *value != Real::INFINITY && *value != Real::NEG_INFINITY
}

fn finite(value: &Real) -> Result<Real, NumericError> {
    if is_finite_real(value) {
        Ok(at_working_precision(value.clone()))
    } else {
        Err(NumericError::NonFiniteOperand)
    }
}

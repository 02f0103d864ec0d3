use dashu::{integer::IBig, rational::RBig};

use super::{Domain, Number, NumericError, Real};

/// Operands up-cast to the representation of their common domain.
pub(super) enum Operands {
    Integers(Vec<IBig>),
    Rationals(Vec<RBig>),
    Reals(Vec<Real>),
}

/// A pair of operands up-cast to a common representation.
pub(super) enum Pair {
    Integers(IBig, IBig),
    Rationals(RBig, RBig),
    Reals(Real, Real),
}

/// Broadens `values` to their common domain and up-casts each of them.
pub(super) fn unify(values: &[&Number]) -> Result<Operands, NumericError> {
    let domain = Domain::broadest(values.iter().map(|value| value.domain())).unwrap_or(Domain::N0);

    Ok(match domain {
        Domain::R => Operands::Reals(
            values
                .iter()
                .map(|value| value.finite_real())
                .collect::<Result<_, _>>()?,
        ),
        Domain::Q => Operands::Rationals(values.iter().filter_map(|value| value.exact_rational()).collect()),
        Domain::N | Domain::N0 | Domain::Z => Operands::Integers(
            values
                .iter()
                .filter_map(|value| match value {
                    Number::Integer(integer) => Some(integer.clone()),
                    _ => None,
                })
                .collect(),
        ),
    })
}

/// Broadens two values to their common domain and up-casts both.
pub(super) fn unify_pair(a: &Number, b: &Number) -> Result<Pair, NumericError> {
    Ok(match (a, b) {
        (Number::Integer(a), Number::Integer(b)) => Pair::Integers(a.clone(), b.clone()),
        (Number::Real(_), _) | (_, Number::Real(_)) => Pair::Reals(a.finite_real()?, b.finite_real()?),
        (Number::Integer(a), Number::Rational(b)) => Pair::Rationals(RBig::from(a.clone()), b.clone()),
        (Number::Rational(a), Number::Integer(b)) => Pair::Rationals(a.clone(), RBig::from(b.clone())),
        (Number::Rational(a), Number::Rational(b)) => Pair::Rationals(a.clone(), b.clone()),
    })
}

/// Adds all terms in their common domain. The empty sum is `0`.
///
/// # Errors
///
/// Returns [`NumericError::NonFiniteOperand`] if a term is an infinite real.
pub fn add(terms: &[Number]) -> Result<Number, NumericError> {
    let refs: Vec<&Number> = terms.iter().collect();
    if refs.is_empty() {
        return Ok(Number::zero());
    }

    Ok(match unify(&refs)? {
        Operands::Integers(values) => {
            Number::Integer(values.into_iter().fold(IBig::ZERO, |sum, value| sum + value))
        }
        Operands::Rationals(values) => {
            Number::Rational(values.into_iter().fold(RBig::ZERO, |sum, value| sum + value))
        }
        Operands::Reals(values) => match values.into_iter().reduce(|sum, value| sum + value) {
            Some(sum) => Number::Real(sum),
            None => Number::zero(),
        },
    })
}

/// Subtracts the sum of `subtrahends` from `minuend`.
///
/// # Errors
///
/// Returns [`NumericError::NonFiniteOperand`] if an operand is an infinite real.
pub fn sub(minuend: &Number, subtrahends: &[Number]) -> Result<Number, NumericError> {
    if subtrahends.is_empty() {
        return Ok(minuend.clone());
    }
    let subtrahend = add(subtrahends)?;

    Ok(match unify_pair(minuend, &subtrahend)? {
        Pair::Integers(a, b) => Number::Integer(a - b),
        Pair::Rationals(a, b) => Number::Rational(a - b),
        Pair::Reals(a, b) => Number::Real(a - b),
    })
}

/// Multiplies all factors in their common domain. The empty product is `1`.
///
/// # Errors
///
/// Returns [`NumericError::NonFiniteOperand`] if a factor is an infinite real.
pub fn mul(factors: &[Number]) -> Result<Number, NumericError> {
    let refs: Vec<&Number> = factors.iter().collect();
    if refs.is_empty() {
        return Ok(Number::one());
    }

    Ok(match unify(&refs)? {
        Operands::Integers(values) => {
            Number::Integer(values.into_iter().fold(IBig::ONE, |product, value| product * value))
        }
        Operands::Rationals(values) => {
            Number::Rational(values.into_iter().fold(RBig::ONE, |product, value| product * value))
        }
        Operands::Reals(values) => match values.into_iter().reduce(|product, value| product * value) {
            Some(product) => Number::Real(product),
            None => Number::one(),
        },
    })
}

/// Divides `dividend` by the product of `divisors`.
///
/// Integer division is exact and produces a rational.
///
/// # Errors
///
/// Returns [`NumericError::DivisionByZero`] if the divisor product is zero,
/// or [`NumericError::NonFiniteOperand`] for infinite operands.
pub fn div(dividend: &Number, divisors: &[Number]) -> Result<Number, NumericError> {
    if divisors.is_empty() {
        return Ok(dividend.clone());
    }
    let divisor = mul(divisors)?;
    if divisor.is_zero() {
        return Err(NumericError::DivisionByZero);
    }

    Ok(match unify_pair(dividend, &divisor)? {
        Pair::Integers(a, b) => Number::Rational(RBig::from(a) / RBig::from(b)),
        Pair::Rationals(a, b) => Number::Rational(a / b),
        Pair::Reals(a, b) => Number::Real(a / b),
    })
}

/// Returns whether `a` and `b` have strictly opposite signs.
#[must_use]
pub fn opposite_signs(a: &Number, b: &Number) -> bool {
    (a.is_negative() && b.is_positive()) || (a.is_positive() && b.is_negative())
}

/// Returns whether `|a - b| <= epsilon`.
///
/// # Errors
///
/// Returns [`NumericError::NonFiniteOperand`] if an operand is an infinite real.
pub fn near(a: &Number, b: &Number, epsilon: &Number) -> Result<bool, NumericError> {
    let distance = sub(a, std::slice::from_ref(b))?.abs();
    Ok(distance <= *epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn int(value: i64) -> Number {
        Number::from(value)
    }

    #[test]
    fn integer_division_is_exact_rational() {
        let quotient = div(&int(6), &[int(4)]).unwrap();
        assert!(matches!(quotient, Number::Rational(_)));
        assert_eq!(quotient, Number::rational(3, 2).unwrap());

        let whole = div(&int(8), &[int(2)]).unwrap();
        assert!(matches!(whole, Number::Rational(_)));
        assert_eq!(whole, int(4));
    }

    #[test]
    fn divides_by_product_of_divisors() {
        let quotient = div(&int(24), &[int(2), int(3)]).unwrap();
        assert_eq!(quotient, int(4));
    }

    #[test]
    fn division_by_zero_fails() {
        assert!(matches!(
            div(&int(1), &[int(0)]),
            Err(NumericError::DivisionByZero)
        ));
        assert!(matches!(
            div(&int(1), &[Number::try_from(0.0).unwrap()]),
            Err(NumericError::DivisionByZero)
        ));
    }

    #[test]
    fn mixing_integer_and_rational_yields_rational() {
        let sum = add(&[int(1), Number::rational(1, 2).unwrap()]).unwrap();
        assert!(matches!(sum, Number::Rational(_)));
        assert_eq!(sum, Number::rational(3, 2).unwrap());
    }

    #[test]
    fn any_real_operand_yields_real() {
        let product = mul(&[int(2), Number::rational(1, 2).unwrap(), Number::try_from(1.5).unwrap()])
            .unwrap();
        assert!(matches!(product, Number::Real(_)));
        assert_eq!(product, Number::try_from(1.5).unwrap());
    }

    #[test]
    fn empty_folds_are_identities() {
        assert_eq!(add(&[]).unwrap(), Number::zero());
        assert_eq!(mul(&[]).unwrap(), Number::one());
    }

    #[test]
    fn subtraction_of_several_terms() {
        let difference = sub(&int(10), &[int(3), int(4)]).unwrap();
        assert_eq!(difference, int(3));
    }

    #[test]
    fn infinite_operands_are_rejected() {
        let infinity = Number::try_from(f64::INFINITY).unwrap();
        assert!(matches!(
            add(&[int(1), infinity]),
            Err(NumericError::NonFiniteOperand)
        ));
    }

    #[test]
    fn sign_predicates() {
        assert!(opposite_signs(&int(-2), &int(3)));
        assert!(!opposite_signs(&int(2), &int(3)));
        assert!(!opposite_signs(&int(0), &int(3)));
        assert!(near(&int(1), &Number::try_from(1.05).unwrap(), &Number::rational(1, 10).unwrap()).unwrap());
        assert!(!near(&int(1), &int(2), &Number::rational(1, 10).unwrap()).unwrap());
    }

    proptest! {
        #[test]
        fn integer_sum_and_product_stay_exact(a in -10_000i64..10_000, b in -10_000i64..10_000) {
            let sum = add(&[int(a), int(b)]).unwrap();
            prop_assert!(matches!(sum, Number::Integer(_)));
            prop_assert_eq!(sum, int(a + b));

            let product = mul(&[int(a), int(b)]).unwrap();
            prop_assert!(matches!(product, Number::Integer(_)));
            prop_assert_eq!(product, int(a * b));
        }

        #[test]
        fn integer_quotient_is_exact(a in -10_000i64..10_000, b in prop_oneof![-100i64..=-1, 1i64..=100]) {
            let quotient = div(&int(a), &[int(b)]).unwrap();
            prop_assert!(matches!(quotient, Number::Rational(_)));
            prop_assert_eq!(mul(&[quotient, int(b)]).unwrap(), int(a));
        }
    }
}

use crate::{Error, number::Number};

use super::{Expr, Variable};

impl Expr {
    /// Returns the simplified derivative with respect to `wrt`.
    ///
    /// Rounding nodes differentiate to [`Expr::DefectiveOnInteger`], which is
    /// undefined wherever the rounded expression is integral.
    ///
    /// # Errors
    ///
    /// - [`Error::NotDerivableExpression`] for a factorial or goal-seek that
    ///   depends on `wrt`.
    /// - Any error raised while simplifying the result.
    pub fn derivative(&self, wrt: &Variable) -> Result<Expr, Error> {
        self.derive(wrt)?.simplify()
    }

    /// Unsimplified derivative.
    fn derive(&self, wrt: &Variable) -> Result<Expr, Error> {
        if self.is_constant(wrt) {
            return Ok(zero());
        }

        Ok(match self {
            // Constant leaves were handled above.
            Self::Variable(_) => one(),
            Self::Constant(_) => zero(),
            Self::Add(terms) => Self::add(
                terms
                    .iter()
                    .map(|term| term.derive(wrt))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Self::Mul(factors) => product_rule(factors, wrt)?,
            Self::Negate(inner) => Self::negate(inner.derive(wrt)?),
            Self::Invert(inner) => {
                // d(1/f) = -f' * f^-2
                Self::negate(Self::mul([
                    inner.derive(wrt)?,
                    Self::pow((**inner).clone(), Self::constant(-2)),
                ]))
            }
            Self::Power { base, exponent } => power_rule(base, exponent, wrt)?,
            Self::Ln(inner) => Self::mul([inner.derive(wrt)?, Self::invert((**inner).clone())]),
            Self::Log { base, power } => Self::div(
                Self::ln((**power).clone()),
                Self::ln((**base).clone()),
            )
            .derive(wrt)?,
            Self::Exp(inner) => Self::mul([self.clone(), inner.derive(wrt)?]),
            Self::Sin(inner) => Self::mul([Self::cos((**inner).clone()), inner.derive(wrt)?]),
            Self::Cos(inner) => Self::negate(Self::mul([
                Self::sin((**inner).clone()),
                inner.derive(wrt)?,
            ])),
            Self::Tan(inner) => Self::mul([
                Self::pow(Self::cos((**inner).clone()), Self::constant(-2)),
                inner.derive(wrt)?,
            ]),
            Self::Round { inner, .. } => Self::defective_on_integer((**inner).clone(), Number::zero()),
            Self::Frac(inner) => Self::mul([
                Self::defective_on_integer((**inner).clone(), Number::one()),
                inner.derive(wrt)?,
            ]),
            Self::DefectiveOnInteger { bypassed, .. } => {
                Self::defective_on_integer((**bypassed).clone(), Number::zero())
            }
            Self::Factorial(_) | Self::GoalSeek(_) => return Err(Error::NotDerivableExpression),
        })
    }
}

fn zero() -> Expr {
    Expr::Constant(Number::zero())
}

fn one() -> Expr {
    Expr::Constant(Number::one())
}

/// `(f1 * f2 * ... * fn)' = sum over i of fi' * (product of the others)`.
fn product_rule(factors: &[Expr], wrt: &Variable) -> Result<Expr, Error> {
    let mut terms = Vec::with_capacity(factors.len());
    for (index, factor) in factors.iter().enumerate() {
        if factor.is_constant(wrt) {
            continue;
        }
        let others = factors
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != index)
            .map(|(_, other)| other.clone());
        terms.push(Expr::mul(std::iter::once(factor.derive(wrt)?).chain(others)));
    }
    Ok(Expr::add(terms))
}

fn power_rule(base: &Expr, exponent: &Expr, wrt: &Variable) -> Result<Expr, Error> {
    let base = base.simplify()?;
    let exponent = exponent.simplify()?;

    Ok(match (base.is_constant(wrt), exponent.is_constant(wrt)) {
        (true, true) => zero(),
        // b^e * ln(b) * e'
        (true, false) => Expr::mul([
            Expr::pow(base.clone(), exponent.clone()),
            Expr::ln(base),
            exponent.derive(wrt)?,
        ]),
        // e * b^(e - 1) * b'
        (false, true) => Expr::mul([
            exponent.clone(),
            Expr::pow(base.clone(), Expr::sub(exponent, one())),
            base.derive(wrt)?,
        ]),
        // b^(e - 1) * (e * b' + b * ln(b) * e')
        (false, false) => Expr::mul([
            Expr::pow(base.clone(), Expr::sub(exponent.clone(), one())),
            Expr::add([
                Expr::mul([exponent.clone(), base.derive(wrt)?]),
                Expr::mul([base.clone(), Expr::ln(base.clone()), exponent.derive(wrt)?]),
            ]),
        ]),
    })
}

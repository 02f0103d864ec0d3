use crate::{
    Error,
    number::{self, Number, NumericError},
};

use super::{Arguments, Expr, evaluate::defective_on_integer};

impl Expr {
    /// Folds constant subexpressions and removes identities.
    ///
    /// - Operators whose operands are all constant are replaced by their value.
    /// - Sums drop a zero constant and products drop a one constant; each
    ///   keeps at most one constant, placed last.
    /// - A product with a zero factor becomes zero without simplifying the
    ///   factors after it.
    /// - Single-term sums and products collapse to the term, and `x^1` to `x`.
    /// - A goal-seek with no free variables is solved and folded.
    ///
    /// Simplifying twice gives the same tree as simplifying once.
    ///
    /// # Errors
    ///
    /// Returns an error if folding a constant subexpression fails, e.g. the
    /// logarithm of a negative constant.
    pub fn simplify(&self) -> Result<Expr, Error> {
        Ok(match self {
            Self::Variable(_) | Self::Constant(_) => self.clone(),
            Self::Add(terms) => simplify_add(terms)?,
            Self::Mul(factors) => simplify_mul(factors)?,
            Self::Negate(inner) => match inner.simplify()? {
                Self::Constant(value) => Self::Constant(-value),
                inner => Self::negate(inner),
            },
            Self::Invert(inner) => match inner.simplify()? {
                Self::Constant(value) => Self::Constant(value.inv()?),
                inner => Self::invert(inner),
            },
            Self::Power { base, exponent } => match (base.simplify()?, exponent.simplify()?) {
                (Self::Constant(base), Self::Constant(exponent)) => {
                    Self::Constant(number::pow(&base, &exponent)?)
                }
                (base, Self::Constant(exponent)) if exponent.is_one() => base,
                (base, exponent) => Self::pow(base, exponent),
            },
            Self::Log { base, power } => match (base.simplify()?, power.simplify()?) {
                (Self::Constant(base), Self::Constant(power)) => {
                    Self::Constant(number::log(&base, &power)?)
                }
                (base, power) => Self::log(base, power),
            },
            Self::Ln(inner) => fold(inner, number::ln, Self::ln)?,
            Self::Exp(inner) => fold(inner, number::exp, Self::exp)?,
            Self::Sin(inner) => fold(inner, number::sin, Self::sin)?,
            Self::Cos(inner) => fold(inner, number::cos, Self::cos)?,
            Self::Tan(inner) => fold(inner, number::tan, Self::tan)?,
            Self::Factorial(inner) => fold(inner, number::factorial, Self::factorial)?,
            Self::Frac(inner) => fold(inner, number::frac, Self::frac)?,
            Self::Round { inner, mode } => fold(
                inner,
                |value| number::round(value, *mode),
                |inner| Self::round(inner, *mode),
            )?,
            Self::DefectiveOnInteger { bypassed, value } => match bypassed.simplify()? {
                Self::Constant(bypassed) => Self::Constant(defective_on_integer(&bypassed, value)?),
                bypassed => Self::defective_on_integer(bypassed, value.clone()),
            },
            Self::GoalSeek(goal_seek) => {
                let node = Self::GoalSeek(
                    goal_seek.with_parts(goal_seek.goal().simplify()?, goal_seek.target().simplify()?),
                );
                if node.variables().is_empty() {
                    Self::Constant(node.evaluate(&Arguments::new())?)
                } else {
                    node
                }
            }
        })
    }
}

/// Simplifies a unary node, folding it when its operand becomes constant.
fn fold(
    inner: &Expr,
    apply: impl FnOnce(&Number) -> Result<Number, NumericError>,
    build: impl FnOnce(Expr) -> Expr,
) -> Result<Expr, Error> {
    Ok(match inner.simplify()? {
        Expr::Constant(value) => Expr::Constant(apply(&value)?),
        inner => build(inner),
    })
}

/// Simplified children split into folded constants and everything else.
#[derive(Default)]
struct Partition {
    constants: Vec<Number>,
    rest: Vec<Expr>,
}

impl Partition {
    fn push(&mut self, expr: Expr) {
        match expr {
            Expr::Constant(value) => self.constants.push(value),
            expr => self.rest.push(expr),
        }
    }

    /// Rebuilds the node, dropping `summary` when it is the identity.
    fn finish(mut self, summary: Number, is_identity: bool, build: fn(Vec<Expr>) -> Expr) -> Expr {
        if self.rest.is_empty() {
            return Expr::Constant(summary);
        }
        if !is_identity {
            self.rest.push(Expr::Constant(summary));
        }
        if self.rest.len() == 1 {
            self.rest.swap_remove(0)
        } else {
            build(self.rest)
        }
    }
}

fn simplify_add(terms: &[Expr]) -> Result<Expr, Error> {
    let mut partition = Partition::default();
    for term in terms {
        match term.simplify()? {
            Expr::Add(inner) => inner.into_iter().for_each(|term| partition.push(term)),
            term => partition.push(term),
        }
    }

    let sum = number::add(&partition.constants)?;
    let is_zero = sum.is_zero();
    Ok(partition.finish(sum, is_zero, Expr::Add))
}

fn simplify_mul(factors: &[Expr]) -> Result<Expr, Error> {
    let mut partition = Partition::default();
    for factor in factors {
        match factor.simplify()? {
            Expr::Constant(value) if value.is_zero() => return Ok(Expr::Constant(value)),
            Expr::Mul(inner) => inner.into_iter().for_each(|factor| partition.push(factor)),
            factor => partition.push(factor),
        }
    }

    let product = number::mul(&partition.constants)?;
    if product.is_zero() {
        return Ok(Expr::Constant(product));
    }
    let is_one = product.is_one();
    Ok(partition.finish(product, is_one, Expr::Mul))
}

//! Immutable expression trees.
//!
//! An [`Expr`] is built once through its smart constructors and never mutated.
//! [`Expr::simplify`], [`Expr::curry`] and [`Expr::derivative`] all return new
//! trees, so a tree can be shared freely between evaluations and threads.
//!
//! The constructors normalise as they build:
//!
//! - nested sums and products are flattened
//! - double negation and double inversion cancel
//! - inverting a negation yields the negation of the inversion
//! - negating a negative constant yields the positive constant

mod curry;
mod derivative;
mod display;
mod evaluate;
mod goal_seek;
mod simplify;

use std::{
    collections::{BTreeSet, HashMap},
    fmt,
    sync::Arc,
};

use crate::{
    Error,
    number::{Number, RoundMode},
};

pub use goal_seek::{AlgorithmFactory, GoalSeek, GoalSeekAlgorithm};

/// A named free variable. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(Arc<str>);

impl Variable {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Variable {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Variable {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

/// An ordered set of variables.
pub type Variables = BTreeSet<Variable>;

/// Values bound to variables for evaluation or currying.
pub type Arguments = HashMap<Variable, Number>;

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Variable(Variable),
    Constant(Number),
    Add(Vec<Expr>),
    Mul(Vec<Expr>),
    Negate(Box<Expr>),
    Invert(Box<Expr>),
    Power { base: Box<Expr>, exponent: Box<Expr> },
    Ln(Box<Expr>),
    Log { base: Box<Expr>, power: Box<Expr> },
    Exp(Box<Expr>),
    Sin(Box<Expr>),
    Cos(Box<Expr>),
    Tan(Box<Expr>),
    Factorial(Box<Expr>),
    Round { inner: Box<Expr>, mode: RoundMode },
    Frac(Box<Expr>),
    /// Evaluates to `value` unless `bypassed` evaluates to an integral value,
    /// where it is undefined. Produced when differentiating [`Expr::Round`]
    /// and [`Expr::Frac`].
    DefectiveOnInteger { bypassed: Box<Expr>, value: Number },
    GoalSeek(GoalSeek),
}

impl Expr {
    pub fn var(name: impl Into<Variable>) -> Self {
        Self::Variable(name.into())
    }

    pub fn constant(value: impl Into<Number>) -> Self {
        Self::Constant(value.into())
    }

    /// Sum of `terms`, flattening nested sums.
    pub fn add(terms: impl IntoIterator<Item = Expr>) -> Self {
        let mut flat = Vec::new();
        for term in terms {
            match term {
                Self::Add(inner) => flat.extend(inner),
                term => flat.push(term),
            }
        }
        Self::Add(flat)
    }

    /// Product of `factors`, flattening nested products.
    pub fn mul(factors: impl IntoIterator<Item = Expr>) -> Self {
        let mut flat = Vec::new();
        for factor in factors {
            match factor {
                Self::Mul(inner) => flat.extend(inner),
                factor => flat.push(factor),
            }
        }
        Self::Mul(flat)
    }

    #[must_use]
    pub fn negate(inner: Expr) -> Self {
        match inner {
            Self::Negate(inner) => *inner,
            Self::Constant(value) if value.is_negative() => Self::Constant(-value),
            inner => Self::Negate(Box::new(inner)),
        }
    }

    #[must_use]
    pub fn invert(inner: Expr) -> Self {
        match inner {
            Self::Invert(inner) => *inner,
            Self::Negate(inner) => Self::negate(Self::invert(*inner)),
            inner => Self::Invert(Box::new(inner)),
        }
    }

    #[must_use]
    pub fn pow(base: Expr, exponent: Expr) -> Self {
        Self::Power {
            base: Box::new(base),
            exponent: Box::new(exponent),
        }
    }

    #[must_use]
    pub fn ln(inner: Expr) -> Self {
        Self::Ln(Box::new(inner))
    }

    /// Logarithm of `power` in `base`.
    #[must_use]
    pub fn log(base: Expr, power: Expr) -> Self {
        Self::Log {
            base: Box::new(base),
            power: Box::new(power),
        }
    }

    #[must_use]
    pub fn exp(inner: Expr) -> Self {
        Self::Exp(Box::new(inner))
    }

    #[must_use]
    pub fn sin(inner: Expr) -> Self {
        Self::Sin(Box::new(inner))
    }

    #[must_use]
    pub fn cos(inner: Expr) -> Self {
        Self::Cos(Box::new(inner))
    }

    #[must_use]
    pub fn tan(inner: Expr) -> Self {
        Self::Tan(Box::new(inner))
    }

    #[must_use]
    pub fn factorial(inner: Expr) -> Self {
        Self::Factorial(Box::new(inner))
    }

    #[must_use]
    pub fn round(inner: Expr, mode: RoundMode) -> Self {
        Self::Round {
            inner: Box::new(inner),
            mode,
        }
    }

    #[must_use]
    pub fn frac(inner: Expr) -> Self {
        Self::Frac(Box::new(inner))
    }

    #[must_use]
    pub fn defective_on_integer(bypassed: Expr, value: Number) -> Self {
        Self::DefectiveOnInteger {
            bypassed: Box::new(bypassed),
            value,
        }
    }

    /// A node whose value is the `inverted` variable that makes `target`
    /// equal to `goal`, found by an algorithm built by `factory`.
    ///
    /// The variables of `target` are recorded now; evaluation fails if
    /// `inverted` is not among them.
    #[must_use]
    pub fn goal_seek(
        goal: Expr,
        target: Expr,
        inverted: impl Into<Variable>,
        factory: Arc<dyn AlgorithmFactory>,
    ) -> Self {
        Self::GoalSeek(GoalSeek::new(goal, target, inverted.into(), factory))
    }

    /// `minuend - subtrahend`.
    #[must_use]
    pub fn sub(minuend: Expr, subtrahend: Expr) -> Self {
        Self::add([minuend, Self::negate(subtrahend)])
    }

    /// `dividend / divisor`.
    #[must_use]
    pub fn div(dividend: Expr, divisor: Expr) -> Self {
        Self::mul([dividend, Self::invert(divisor)])
    }

    /// The `degree`-th root of `base`.
    #[must_use]
    pub fn root(base: Expr, degree: Expr) -> Self {
        Self::pow(base, Self::invert(degree))
    }

    /// Polynomial in `variable` with `coefficients` given from the highest
    /// degree down to the constant term. The result is simplified.
    ///
    /// # Errors
    ///
    /// Fails only if simplification fails.
    pub fn polynomial(
        variable: impl Into<Variable>,
        coefficients: impl IntoIterator<Item = Number>,
    ) -> Result<Self, Error> {
        let variable = Self::Variable(variable.into());
        let coefficients: Vec<Number> = coefficients.into_iter().collect();
        let degree = coefficients.len();

        let terms = coefficients.into_iter().enumerate().map(|(index, coefficient)| {
            let coefficient = Self::Constant(coefficient);
            match degree - index - 1 {
                0 => coefficient,
                1 => Self::mul([coefficient, variable.clone()]),
                power => Self::mul([
                    coefficient,
                    Self::pow(variable.clone(), Self::constant(power as u64)),
                ]),
            }
        });
        Self::add(terms).simplify()
    }

    /// Inserts every free variable of this expression into `variables`.
    ///
    /// The inverted variable of a goal-seek is bound by the node itself and is
    /// not free.
    pub fn collect_variables(&self, variables: &mut Variables) {
        match self {
            Self::Variable(variable) => {
                variables.insert(variable.clone());
            }
            Self::Constant(_) => {}
            Self::GoalSeek(goal_seek) => goal_seek.collect_variables(variables),
            _ => self.for_each_child(|child| child.collect_variables(variables)),
        }
    }

    /// Returns the free variables of this expression.
    #[must_use]
    pub fn variables(&self) -> Variables {
        let mut variables = Variables::new();
        self.collect_variables(&mut variables);
        variables
    }

    /// Returns whether `wrt` does not occur free in this expression.
    #[must_use]
    pub fn is_constant(&self, wrt: &Variable) -> bool {
        match self {
            Self::Variable(variable) => variable != wrt,
            Self::Constant(_) => true,
            Self::GoalSeek(goal_seek) => goal_seek.is_constant(wrt),
            _ => {
                let mut constant = true;
                self.for_each_child(|child| constant = constant && child.is_constant(wrt));
                constant
            }
        }
    }

    fn for_each_child(&self, mut f: impl FnMut(&Expr)) {
        match self {
            Self::Variable(_) | Self::Constant(_) => {}
            Self::Add(children) | Self::Mul(children) => children.iter().for_each(f),
            Self::Negate(inner)
            | Self::Invert(inner)
            | Self::Ln(inner)
            | Self::Exp(inner)
            | Self::Sin(inner)
            | Self::Cos(inner)
            | Self::Tan(inner)
            | Self::Factorial(inner)
            | Self::Frac(inner)
            | Self::Round { inner, .. }
            | Self::DefectiveOnInteger {
                bypassed: inner, ..
            } => f(inner),
            Self::Power {
                base: first,
                exponent: second,
            }
            | Self::Log {
                base: first,
                power: second,
            } => {
                f(first);
                f(second);
            }
            Self::GoalSeek(goal_seek) => {
                f(goal_seek.goal());
                f(goal_seek.target());
            }
        }
    }

    /// Rebuilds this node through the smart constructors with every child
    /// replaced by `f(child)`.
    fn try_map_children(
        &self,
        mut f: impl FnMut(&Expr) -> Result<Expr, Error>,
    ) -> Result<Expr, Error> {
        Ok(match self {
            Self::Variable(_) | Self::Constant(_) => self.clone(),
            Self::Add(terms) => Self::add(terms.iter().map(&mut f).collect::<Result<Vec<_>, _>>()?),
            Self::Mul(factors) => {
                Self::mul(factors.iter().map(&mut f).collect::<Result<Vec<_>, _>>()?)
            }
            Self::Negate(inner) => Self::negate(f(inner)?),
            Self::Invert(inner) => Self::invert(f(inner)?),
            Self::Power { base, exponent } => Self::pow(f(base)?, f(exponent)?),
            Self::Ln(inner) => Self::ln(f(inner)?),
            Self::Log { base, power } => Self::log(f(base)?, f(power)?),
            Self::Exp(inner) => Self::exp(f(inner)?),
            Self::Sin(inner) => Self::sin(f(inner)?),
            Self::Cos(inner) => Self::cos(f(inner)?),
            Self::Tan(inner) => Self::tan(f(inner)?),
            Self::Factorial(inner) => Self::factorial(f(inner)?),
            Self::Round { inner, mode } => Self::round(f(inner)?, *mode),
            Self::Frac(inner) => Self::frac(f(inner)?),
            Self::DefectiveOnInteger { bypassed, value } => {
                Self::defective_on_integer(f(bypassed)?, value.clone())
            }
            Self::GoalSeek(goal_seek) => {
                Self::GoalSeek(goal_seek.with_parts(f(goal_seek.goal())?, f(goal_seek.target())?))
            }
        })
    }
}

impl From<Variable> for Expr {
    fn from(variable: Variable) -> Self {
        Self::Variable(variable)
    }
}

impl From<Number> for Expr {
    fn from(value: Number) -> Self {
        Self::Constant(value)
    }
}

impl std::ops::Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        Expr::add([self, rhs])
    }
}

impl std::ops::Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        Expr::sub(self, rhs)
    }
}

impl std::ops::Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::mul([self, rhs])
    }
}

impl std::ops::Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Expr) -> Expr {
        Expr::div(self, rhs)
    }
}

impl std::ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::negate(self)
    }
}

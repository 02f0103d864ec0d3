use std::fmt;

use crate::number::{Number, RoundMode};

use super::Expr;

impl Expr {
    /// Returns whether the expression never needs parentheses when rendered
    /// inside another one.
    #[must_use]
    pub fn is_self_contained(&self) -> bool {
        match self {
            Self::Variable(_) => true,
            Self::Constant(value) => match value {
                Number::Integer(_) | Number::Real(_) => !value.is_negative(),
                Number::Rational(_) => value.is_integral() && !value.is_negative(),
            },
            Self::Add(_) | Self::Mul(_) | Self::Negate(_) | Self::Invert(_) | Self::Power { .. } => {
                false
            }
            Self::Ln(_)
            | Self::Log { .. }
            | Self::Exp(_)
            | Self::Sin(_)
            | Self::Cos(_)
            | Self::Tan(_)
            | Self::Factorial(_)
            | Self::Round { .. }
            | Self::Frac(_)
            | Self::DefectiveOnInteger { .. }
            | Self::GoalSeek(_) => true,
        }
    }
}

/// Renders `expr`, parenthesised unless it is self-contained.
struct Wrapped<'a>(&'a Expr);

impl fmt::Display for Wrapped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_self_contained() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "({})", self.0)
        }
    }
}

/// Renders `expr`, parenthesised only if it is a sum.
struct Term<'a>(&'a Expr);

impl fmt::Display for Term<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::Add(_) => write!(f, "({})", self.0),
            expr => write!(f, "{expr}"),
        }
    }
}

fn mode_name(mode: RoundMode) -> &'static str {
    match mode {
        RoundMode::Ceil => "ceil",
        RoundMode::Floor => "floor",
        RoundMode::Inward => "inward",
        RoundMode::Outward => "outward",
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(variable) => write!(f, "{variable}"),
            Self::Constant(value) => write!(f, "{value}"),
            Self::Add(terms) => {
                for (index, term) in terms.iter().enumerate() {
                    match (index, term) {
                        (0, term) => write!(f, "{term}")?,
                        (_, Self::Negate(inner)) => write!(f, " - {}", Term(inner))?,
                        (_, term) => write!(f, " + {term}")?,
                    }
                }
                Ok(())
            }
            Self::Mul(factors) => {
                for (index, factor) in factors.iter().enumerate() {
                    match (index, factor) {
                        (0, factor) => write!(f, "{}", Term(factor))?,
                        (_, Self::Invert(inner)) => match **inner {
                            Self::Add(_) | Self::Mul(_) => write!(f, " / ({inner})")?,
                            _ => write!(f, " / {inner}")?,
                        },
                        (_, factor) => write!(f, " * {}", Term(factor))?,
                    }
                }
                Ok(())
            }
            Self::Negate(inner) => write!(f, "-{}", Term(inner)),
            Self::Invert(inner) => write!(f, "{}^-1", Wrapped(inner)),
            Self::Power { base, exponent } => {
                write!(f, "{}^{}", Wrapped(base), Wrapped(exponent))
            }
            Self::Ln(inner) => write!(f, "ln({inner})"),
            Self::Log { base, power } => write!(f, "log({base}, {power})"),
            Self::Exp(inner) => write!(f, "exp({inner})"),
            Self::Sin(inner) => write!(f, "sin({inner})"),
            Self::Cos(inner) => write!(f, "cos({inner})"),
            Self::Tan(inner) => write!(f, "tan({inner})"),
            Self::Factorial(inner) => write!(f, "{}!", Wrapped(inner)),
            Self::Round { inner, mode } => write!(f, "round({inner}, {})", mode_name(*mode)),
            Self::Frac(inner) => write!(f, "frac({inner})"),
            Self::DefectiveOnInteger { bypassed, value } => write!(f, "doi({bypassed}, {value})"),
            Self::GoalSeek(goal_seek) => write!(
                f,
                "goal_seek({} : {} == {})",
                goal_seek.inverted(),
                goal_seek.target(),
                goal_seek.goal()
            ),
        }
    }
}

use std::error::Error as StdError;

use thiserror::Error;

use crate::{expr::Variable, number::NumericError};

/// Boxed error returned by goal-seek algorithms and their factories.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Errors that can occur while evaluating or transforming expressions.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no value bound to variable `{variable}`")]
    UndefinedValue { variable: Variable },

    #[error("expression is not derivable")]
    NotDerivableExpression,

    #[error("derivative is undefined on integer values")]
    UndefinedOnInteger,

    #[error("numeric error: {0}")]
    Numeric(#[from] NumericError),

    #[error("inverted variable `{variable}` does not occur in the target expression")]
    InvertedVariableNotInDomain { variable: Variable },

    #[error("expected exactly one free variable, found {count}")]
    NotSingleVariable { count: usize },

    #[error("goal-seek algorithm failed")]
    Algorithm(#[source] BoxError),
}

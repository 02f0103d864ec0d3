use calculus_core::{Number, NumericError};
use thiserror::Error;

use super::config::ConfigError;

/// Errors that can occur during Newton–Raphson solving.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("expected exactly one free variable, found {count}")]
    NotSingleVariable { count: usize },

    #[error("expression error: {0}")]
    Expression(#[from] calculus_core::Error),

    #[error("derivative stayed zero after every correction at x = {x} (iteration {iter})")]
    MaxArgCorrectionsExceeded { x: Number, iter: usize },

    #[error("no root found within {max_iters} iterations")]
    IterationsExhausted { max_iters: usize },
}

impl From<NumericError> for Error {
    fn from(err: NumericError) -> Self {
        Self::Expression(err.into())
    }
}

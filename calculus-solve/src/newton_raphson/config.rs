use thiserror::Error;

/// Configuration for the Newton–Raphson solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    epsilon: f64,
    max_iters: usize,
    max_arg_corrections: usize,
}

/// Errors that can occur when validating a Newton–Raphson solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("epsilon must be finite and positive")]
    Epsilon,

    #[error("max_iters must be at least 1")]
    MaxIters,

    #[error("max_arg_corrections must be at least 1")]
    MaxArgCorrections,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            epsilon: 1e-10,
            max_iters: 100,
            max_arg_corrections: 10,
        }
    }
}

impl Config {
    /// Creates a new config with validated parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `epsilon` is not finite and positive, or if either
    /// limit is zero.
    pub fn new(
        epsilon: f64,
        max_iters: usize,
        max_arg_corrections: usize,
    ) -> Result<Self, ConfigError> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(ConfigError::Epsilon);
        }
        if max_iters == 0 {
            return Err(ConfigError::MaxIters);
        }
        if max_arg_corrections == 0 {
            return Err(ConfigError::MaxArgCorrections);
        }

        Ok(Self {
            epsilon,
            max_iters,
            max_arg_corrections,
        })
    }

    /// Returns the residual tolerance.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns the maximum number of Newton steps.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns how many times a zero derivative may be perturbed away within
    /// one iteration.
    #[must_use]
    pub fn max_arg_corrections(&self) -> usize {
        self.max_arg_corrections
    }
}

/// Returns `10^-digits`, a tolerance of `digits` decimal places.
///
/// Zero digits is treated as one, so the tolerance is never `1`.
#[must_use]
pub fn epsilon(digits: u16) -> f64 {
    10f64.powi(-i32::from(digits.max(1)))
}

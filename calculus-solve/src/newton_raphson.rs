//! Newton–Raphson root finding for single-variable expressions.
//!
//! # Algorithm
//!
//! Starting from a guess `x`, each iteration evaluates the expression `f(x)`
//! and stops once `|f(x)| <= epsilon`. Otherwise it takes the step
//! `x <- x - f(x) / f'(x)`, where `f'` is the symbolic derivative computed
//! once before iterating.
//!
//! # Zero derivatives
//!
//! A zero `f'(x)` would make the step undefined. The solver then shifts `x` by
//! `epsilon * u` with `u` drawn uniformly from `[-0.5, 0.5]` and re-evaluates
//! both `f` and `f'` at the shifted point. At most
//! [`Config::max_arg_corrections`] shifts are tried per iteration before the
//! solve fails with [`Error::MaxArgCorrectionsExceeded`].
//!
//! The random source is always supplied by the caller, either directly
//! ([`solve`], [`find_root`]) or as a seed ([`solve_seeded`]), so a solve is
//! reproducible.
//!
//! # Goal seeking
//!
//! [`NewtonRaphsonFactory`] plugs the solver into goal-seek expressions.

mod config;
mod error;
mod goal_seek;
mod search;
mod solution;

#[cfg(test)]
mod tests;

pub use config::{Config, ConfigError, epsilon};
pub use error::Error;
pub use goal_seek::{NewtonRaphson, NewtonRaphsonFactory, Parameters};
pub use solution::Solution;

use calculus_core::{Expr, Number, Variable};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use search::search;

/// Finds a root of an expression with exactly one free variable.
///
/// # Errors
///
/// - [`Error::NotSingleVariable`] if `expr` does not have exactly one free
///   variable.
/// - [`Error::Expression`] if differentiating or evaluating `expr` fails.
/// - [`Error::MaxArgCorrectionsExceeded`] if the derivative stays zero.
/// - [`Error::IterationsExhausted`] if the solver does not converge.
pub fn solve<R>(expr: &Expr, guess: &Number, config: &Config, rng: &mut R) -> Result<Solution, Error>
where
    R: Rng + ?Sized,
{
    let variables = expr.variables();
    let mut free = variables.iter();
    match (free.next(), free.next()) {
        (Some(variable), None) => search(expr, variable, guess, config, rng),
        _ => Err(Error::NotSingleVariable {
            count: variables.len(),
        }),
    }
}

/// Like [`solve`], with a ChaCha8 generator seeded from `seed`.
///
/// # Errors
///
/// Fails like [`solve`].
pub fn solve_seeded(
    expr: &Expr,
    guess: &Number,
    config: &Config,
    seed: u64,
) -> Result<Solution, Error> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    solve(expr, guess, config, &mut rng)
}

/// Finds a root of `expr` in `variable`.
///
/// # Errors
///
/// Returns [`Error::NotSingleVariable`] if `expr` has free variables other
/// than `variable`, and otherwise fails like [`solve`].
pub fn find_root<R>(
    expr: &Expr,
    variable: &Variable,
    guess: &Number,
    config: &Config,
    rng: &mut R,
) -> Result<Solution, Error>
where
    R: Rng + ?Sized,
{
    let variables = expr.variables();
    if variables.iter().any(|free| free != variable) {
        return Err(Error::NotSingleVariable {
            count: variables.len(),
        });
    }
    search(expr, variable, guess, config, rng)
}

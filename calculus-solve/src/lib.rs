//! Numerical root finding for `calculus-core` expressions.
//!
//! # Solvers
//!
//! - [`newton_raphson`]: derivative-based iteration with randomized recovery
//!   from zero derivatives, also usable as a goal-seek algorithm

pub mod newton_raphson;

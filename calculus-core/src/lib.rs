//! Symbolic-numeric calculus over a multi-precision numeric tower.
//!
//! - [`number`]: exact integers and rationals with a real fallback, and the
//!   arithmetic that moves values between them
//! - [`expr`]: immutable expression trees that can be evaluated,
//!   differentiated, simplified and partially bound
//!
//! Root finding lives in a separate crate; this one only defines the
//! [`GoalSeekAlgorithm`] and [`AlgorithmFactory`] contracts a goal-seek node
//! needs.

mod error;
pub mod expr;
pub mod number;

pub use error::{BoxError, Error};
pub use expr::{AlgorithmFactory, Arguments, Expr, GoalSeek, GoalSeekAlgorithm, Variable, Variables};
pub use number::{Domain, Number, NumericError, RoundMode};

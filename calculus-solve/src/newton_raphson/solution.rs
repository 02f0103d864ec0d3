use calculus_core::Number;

/// The result of a converged Newton–Raphson solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Root estimate.
    pub x: Number,

    /// Expression value at `x`, within the configured epsilon of zero.
    pub residual: Number,

    /// Newton steps taken before converging.
    pub iters: usize,

    /// Total derivative corrections applied along the way.
    pub corrections: usize,
}

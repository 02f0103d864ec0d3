use thiserror::Error;

/// Errors raised by numeric tower operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    #[error("attempted to calculate a division by 0")]
    DivisionByZero,

    #[error("attempted to calculate the logarithm of a non-positive number")]
    LogarithmOfNegative,

    #[error("attempted to calculate an invalid power (e.g. 0^0, x^y where x < 0)")]
    InvalidPowerOperation,

    #[error("attempted to calculate the tangent of a vertical angle")]
    TangentOfVertical,

    #[error("factorial argument must be an integer between 0 and {max}")]
    InvalidFactorialArgument { max: u32 },

    #[error("infinite numbers cannot be rounded")]
    InfiniteCannotBeRounded,

    #[error("value exceeds the precision supported by this operation")]
    PrecisionLimitExceeded,

    #[error("arithmetic on a non-finite value")]
    NonFiniteOperand,

    #[error("not a number")]
    NotANumber,
}

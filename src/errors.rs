//! Error definitions shared by every contract in the crate
use odra::prelude::*;

/// Arithmetic failures raised by [`crate::math::SafeMath`]
#[odra::odra_error]
pub enum MathError {
    /// Overflow error
    Overflow = 1,

    /// Underflow error
    Underflow = 2,

    /// Division by zero
    DivisionByZero = 3,
}

/// Custom errors for the CEP-18 asset token
#[odra::odra_error]
pub enum TokenError {
    /// Insufficient allowance for transfer
    InsufficientAllowance = 100,

    /// Insufficient balance for operation
    InsufficientBalance = 101,

    /// Caller is not the token owner
    Unauthorized = 102,

    /// Transfer fee outside 0..=10000 basis points
    InvalidFee = 103,
}

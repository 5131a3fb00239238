//! Error types for strategies

use odra::prelude::*;

#[odra::odra_error]
pub enum StrategyError {
    /// Caller is neither the vault nor the admin, as required
    Unauthorized = 400,
    /// Exit fee above the allowed maximum
    InvalidFee = 401,
    /// Asset or vault missing from configuration
    InvalidConfiguration = 402,
}

//! Error types for the emission allocator

use odra::prelude::*;

#[odra::odra_error]
pub enum EmissionError {
    /// Caller is not the admin, or not the pool it pulls for
    Unauthorized = 300,
    /// Weight outside (0, 10000]
    InvalidWeight = 301,
    /// Pool is already in the active set
    PoolAlreadyActive = 302,
    /// Pool is not in the active set
    PoolNotActive = 303,
    /// Emission start height is already fixed
    EmissionAlreadyStarted = 304,
    /// Invalid configuration parameter
    InvalidConfiguration = 305,
}

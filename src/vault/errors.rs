//! Error types for reward vaults

use odra::prelude::*;

#[odra::odra_error]
pub enum VaultError {
    /// Caller is not the admin
    Unauthorized = 500,
    /// Zero amount not allowed
    ZeroAmount = 501,
    /// Zero shares requested, or a deposit too small to mint any
    ZeroShares = 502,
    /// Caller holds fewer shares than requested
    InsufficientShares = 503,
    /// Deposits are paused
    ContractPaused = 504,
    /// No strategy configured yet
    StrategyNotSet = 505,
    /// Initial strategy already configured
    StrategyAlreadySet = 506,
    /// Strategy does not belong to this vault or manages another asset
    InvalidStrategy = 507,
    /// No migration candidate proposed
    NoCandidate = 508,
    /// Migration candidate still inside its approval delay
    ApprovalDelayNotElapsed = 509,
    /// Shares outstanding but the pool is worth nothing
    PoolValueZero = 510,
    /// Reentrancy guard
    Locked = 511,
    /// Invalid configuration parameter
    InvalidConfiguration = 512,
    /// Asset and reward token cannot be swept
    ProtectedToken = 513,
}

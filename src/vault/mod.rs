//! Reward vaults
//!
//! Depositors pool a single asset into a [`RewardVault`] and receive shares.
//! The vault forwards the asset to its strategy, pulls its slice of the
//! reward emission from the allocator, and streams that reward to share
//! holders through a reward-per-share accumulator.

pub mod reward_vault;
pub mod share_ledger;
pub mod reward_accumulator;
pub mod migration;
pub mod errors;
pub mod events;

#[cfg(test)]
mod reentrant_strategy;

pub use reward_vault::RewardVault;
pub use share_ledger::ShareLedger;
pub use reward_accumulator::{RewardAccumulator, RewardPosition, RewardSnapshot};
pub use migration::{MigrationController, StrategyCandidate};
pub use errors::VaultError;
pub use events::*;

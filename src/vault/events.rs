//! Events for reward vaults

use odra::prelude::*;
use odra::casper_types::U256;

/// Event emitted when assets are deposited and shares minted
#[odra::event]
pub struct Deposited {
    pub account: Address,
    /// Amount actually received by the vault
    pub amount: U256,
    pub shares: U256,
    pub exchange_rate: U256,
}

/// Event emitted when shares are burned and assets paid out
#[odra::event]
pub struct Withdrawn {
    pub account: Address,
    pub shares: U256,
    pub amount: U256,
}

/// Event emitted when accrued reward is paid
#[odra::event]
pub struct RewardPaid {
    pub account: Address,
    pub amount: U256,
}

/// Event emitted when the strategy returns less than a withdrawal needed
#[odra::event]
pub struct PartialWithdrawal {
    pub account: Address,
    /// Amount owed for the burned shares
    pub owed: U256,
    /// Amount actually paid
    pub paid: U256,
}

/// Event emitted when the first strategy is wired in
#[odra::event]
pub struct StrategyInitialized {
    pub strategy: Address,
}

/// Event emitted when a migration candidate is proposed
#[odra::event]
pub struct StrategyProposed {
    pub strategy: Address,
    pub proposed_at: u64,
    pub ready_at: u64,
}

/// Event emitted when the vault switches strategies
#[odra::event]
pub struct StrategyUpgraded {
    pub old_strategy: Address,
    pub new_strategy: Address,
    /// Amount the old strategy reported returning
    pub reported: U256,
    /// Amount that actually arrived
    pub recovered: U256,
}

/// Event emitted when deposits are paused
#[odra::event]
pub struct DepositsPaused {
    pub paused_by: Address,
}

/// Event emitted when deposits resume
#[odra::event]
pub struct DepositsResumed {
    pub resumed_by: Address,
}

/// Event emitted when foreign tokens are swept out
#[odra::event]
pub struct StuckTokensRecovered {
    pub token: Address,
    pub amount: U256,
    pub recipient: Address,
}

//! Events for strategies

use odra::prelude::*;
use odra::casper_types::U256;

/// Event emitted when the vault hands funds over for deployment
#[odra::event]
pub struct Invested {
    pub vault: Address,
    pub managed_balance: U256,
}

/// Event emitted when funds are sent back to the vault
#[odra::event]
pub struct Divested {
    pub vault: Address,
    pub requested: U256,
    pub returned: U256,
    pub fee: U256,
}

/// Event emitted when the whole position is unwound
#[odra::event]
pub struct Liquidated {
    pub vault: Address,
    pub returned: U256,
    pub fee: U256,
}

/// Event emitted when the exit fee changes
#[odra::event]
pub struct ExitFeeUpdated {
    pub old_fee_bps: u32,
    pub new_fee_bps: u32,
    pub updated_by: Address,
}

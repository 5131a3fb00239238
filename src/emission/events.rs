//! Events for the emission allocator

use odra::prelude::*;
use odra::casper_types::U256;

/// Event emitted when a pool joins the active set
#[odra::event]
pub struct PoolRegistered {
    pub pool: Address,
    pub weight: u32,
    pub total_weight: u32,
}

/// Event emitted when a pool leaves the active set
#[odra::event]
pub struct PoolDeregistered {
    pub pool: Address,
    pub total_weight: u32,
}

/// Event emitted when a pool weight changes
#[odra::event]
pub struct PoolReweighted {
    pub pool: Address,
    pub old_weight: u32,
    pub new_weight: u32,
    pub total_weight: u32,
}

/// Event emitted when accrued emission is paid to a pool
#[odra::event]
pub struct EmissionSettled {
    pub pool: Address,
    pub blocks: u64,
    pub amount: U256,
}

/// Event emitted once, when emission begins
#[odra::event]
pub struct EmissionStarted {
    pub start_height: u64,
    pub emission_per_block: U256,
}

/// Event emitted when the per-block budget changes
#[odra::event]
pub struct EmissionRateUpdated {
    pub old_rate: U256,
    pub new_rate: U256,
    pub updated_by: Address,
}

//! Emission Allocator - splits a per-block reward budget across pools
//!
//! Pools are kept in a dense index (`active_pools`, position -> pool) with a
//! sparse reverse lookup (`active_index`, pool -> position), so removal is a
//! swap-with-last-and-pop. Entries in `pools` are never deleted; a
//! deregistered pool keeps its history with weight and rate at zero.
//!
//! Casper exposes block time rather than block height to contracts, so the
//! allocator counts heights as `block_time / block_interval`.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::errors::EmissionError;
use super::events::*;
use crate::math::{EmissionMath, SafeMath, MAX_WEIGHT};
use crate::token::Cep18TokenContractRef;

/// Registration entry, one per pool that ever joined
#[odra::odra_type]
#[derive(Default)]
pub struct PoolEntry {
    /// Weight, 0 when inactive
    pub weight: u32,
    /// Share of the per-block emission, 1e18-scaled
    pub per_block_rate: U256,
    /// Height up to which emission has been paid
    pub last_settled_height: u64,
}

/// Emission Allocator contract
#[odra::module(
    events = [
        PoolRegistered,
        PoolDeregistered,
        PoolReweighted,
        EmissionSettled,
        EmissionStarted,
        EmissionRateUpdated
    ],
    errors = EmissionError
)]
pub struct EmissionAllocator {
    /// Reward token held as the treasury
    reward_token: Var<Address>,
    /// Admin address
    admin: Var<Address>,
    /// Reward units emitted per block across all pools
    emission_per_block: Var<U256>,
    /// Block interval in milliseconds
    block_interval: Var<u64>,
    /// Height emission started at, unset until `start_emission`
    start_height: Var<u64>,
    /// Registration entries by pool
    pools: Mapping<Address, PoolEntry>,
    /// Dense list of active pools
    active_pools: Mapping<u32, Address>,
    /// Position of each active pool in `active_pools`
    active_index: Mapping<Address, u32>,
    /// Number of active pools
    active_count: Var<u32>,
    /// Sum of active weights
    total_weight: Var<u32>,
    /// Reward units paid out so far
    total_emitted: Var<U256>,
}

#[odra::module]
impl EmissionAllocator {
    /// Initialize the allocator
    ///
    /// # Arguments
    /// * `reward_token` - CEP-18 token paid to pools
    /// * `emission_per_block` - total reward units emitted per block
    /// * `block_interval` - block length in milliseconds
    pub fn init(&mut self, reward_token: Address, emission_per_block: U256, block_interval: u64) {
        if block_interval == 0 {
            self.env().revert(EmissionError::InvalidConfiguration);
        }
        self.reward_token.set(reward_token);
        self.admin.set(self.env().caller());
        self.emission_per_block.set(emission_per_block);
        self.block_interval.set(block_interval);
        self.active_count.set(0);
        self.total_weight.set(0);
        self.total_emitted.set(U256::zero());
    }

    // ========================================
    // Registry Management (Admin)
    // ========================================

    /// Add a pool to the active set
    pub fn register(&mut self, pool: Address, weight: u32) {
        self.only_admin();
        self.validate_weight(weight);
        if self.is_active(pool) {
            self.env().revert(EmissionError::PoolAlreadyActive);
        }

        self.settle_all();

        let mut entry = self.pools.get(&pool).unwrap_or_default();
        entry.weight = weight;
        entry.per_block_rate = U256::zero();
        entry.last_settled_height = self.current_height();
        self.pools.set(&pool, entry);
        self.push_active(pool);

        let total_weight = self.recompute_rates();
        self.env().emit_event(PoolRegistered {
            pool,
            weight,
            total_weight,
        });
    }

    /// Remove a pool from the active set
    pub fn deregister(&mut self, pool: Address) {
        self.only_admin();
        if !self.is_active(pool) {
            self.env().revert(EmissionError::PoolNotActive);
        }

        self.settle_all();

        let mut entry = self.pools.get(&pool).unwrap_or_default();
        entry.weight = 0;
        entry.per_block_rate = U256::zero();
        self.pools.set(&pool, entry);
        self.remove_active(pool);

        let total_weight = self.recompute_rates();
        self.env().emit_event(PoolDeregistered { pool, total_weight });
    }

    /// Change the weight of an active pool
    pub fn reweight(&mut self, pool: Address, new_weight: u32) {
        self.only_admin();
        self.validate_weight(new_weight);
        if !self.is_active(pool) {
            self.env().revert(EmissionError::PoolNotActive);
        }

        // Emission up to now belongs to the old weights
        self.settle_all();

        let mut entry = self.pools.get(&pool).unwrap_or_default();
        let old_weight = entry.weight;
        entry.weight = new_weight;
        self.pools.set(&pool, entry);

        let total_weight = self.recompute_rates();
        self.env().emit_event(PoolReweighted {
            pool,
            old_weight,
            new_weight,
            total_weight,
        });
    }

    /// Fix the start height; emission accrues only from here on
    pub fn start_emission(&mut self) {
        self.only_admin();
        if self.start_height.get().is_some() {
            self.env().revert(EmissionError::EmissionAlreadyStarted);
        }

        let start_height = self.current_height();
        self.start_height.set(start_height);

        self.env().emit_event(EmissionStarted {
            start_height,
            emission_per_block: self.emission_per_block(),
        });
    }

    /// Change the per-block budget, settling every pool at the old budget
    pub fn set_emission_per_block(&mut self, new_rate: U256) {
        self.only_admin();

        self.settle_all();

        let old_rate = self.emission_per_block();
        self.emission_per_block.set(new_rate);

        self.env().emit_event(EmissionRateUpdated {
            old_rate,
            new_rate,
            updated_by: self.env().caller(),
        });
    }

    // ========================================
    // Pool Functions
    // ========================================

    /// Pay `pool` everything accrued since its last settlement.
    ///
    /// Only the pool itself may pull. Inactive pools and a registry that has
    /// not started yield zero without touching state.
    pub fn pull(&mut self, pool: Address) -> U256 {
        if self.env().caller() != pool {
            self.env().revert(EmissionError::Unauthorized);
        }
        self.settle_pool(pool)
    }

    // ========================================
    // View Functions
    // ========================================

    pub fn pool_info(&self, pool: Address) -> Option<PoolEntry> {
        self.pools.get(&pool)
    }

    pub fn is_active(&self, pool: Address) -> bool {
        self.pools.get(&pool).map(|entry| entry.weight > 0).unwrap_or(false)
    }

    /// Emission `pool` would receive if it pulled now, before the treasury cap
    pub fn pending(&self, pool: Address) -> U256 {
        match self.pools.get(&pool) {
            Some(entry) if entry.weight > 0 => self.accrued_for(&entry, self.current_height()),
            _ => U256::zero(),
        }
    }

    pub fn active_pools(&self) -> Vec<Address> {
        let count = self.active_count.get_or_default();
        let mut pools = Vec::new();
        for i in 0..count {
            if let Some(pool) = self.active_pools.get(&i) {
                pools.push(pool);
            }
        }
        pools
    }

    pub fn active_pool_count(&self) -> u32 {
        self.active_count.get_or_default()
    }

    pub fn total_weight(&self) -> u32 {
        self.total_weight.get_or_default()
    }

    pub fn emission_per_block(&self) -> U256 {
        self.emission_per_block.get_or_default()
    }

    pub fn start_height(&self) -> Option<u64> {
        self.start_height.get()
    }

    pub fn current_height(&self) -> u64 {
        let interval = self.block_interval.get_or_revert_with(EmissionError::InvalidConfiguration);
        self.env().get_block_time() / interval
    }

    pub fn treasury_balance(&self) -> U256 {
        let token = Cep18TokenContractRef::new(self.env(), self.reward_token());
        token.balance_of(self.env().self_address())
    }

    pub fn total_emitted(&self) -> U256 {
        self.total_emitted.get_or_default()
    }

    pub fn reward_token(&self) -> Address {
        self.reward_token.get_or_revert_with(EmissionError::InvalidConfiguration)
    }

    pub fn get_admin(&self) -> Address {
        self.admin.get_or_revert_with(EmissionError::Unauthorized)
    }

    // ========================================
    // Internal Functions
    // ========================================

    fn settle_all(&mut self) {
        for pool in self.active_pools() {
            self.settle_pool(pool);
        }
    }

    fn settle_pool(&mut self, pool: Address) -> U256 {
        let mut entry = match self.pools.get(&pool) {
            Some(entry) if entry.weight > 0 => entry,
            _ => return U256::zero(),
        };
        let start_height = match self.start_height.get() {
            Some(height) => height,
            None => return U256::zero(),
        };

        let height = self.current_height();
        let from = entry.last_settled_height.max(start_height);
        let blocks = height.saturating_sub(from);
        let owed = self.accrued_for(&entry, height);
        let paid = SafeMath::min(owed, self.treasury_balance());

        entry.last_settled_height = height;
        self.pools.set(&pool, entry);

        if paid.is_zero() {
            return paid;
        }

        let emitted = SafeMath::add(self.total_emitted(), paid).unwrap_or_revert(&self.env());
        self.total_emitted.set(emitted);

        let mut token = Cep18TokenContractRef::new(self.env(), self.reward_token());
        token.transfer(pool, paid);

        self.env().emit_event(EmissionSettled {
            pool,
            blocks,
            amount: paid,
        });
        paid
    }

    fn accrued_for(&self, entry: &PoolEntry, height: u64) -> U256 {
        let start_height = match self.start_height.get() {
            Some(height) => height,
            None => return U256::zero(),
        };
        let blocks = height.saturating_sub(entry.last_settled_height.max(start_height));
        EmissionMath::pending_emission(blocks, self.emission_per_block(), entry.per_block_rate)
            .unwrap_or_revert(&self.env())
    }

    /// Recompute every active rate from the current weights
    fn recompute_rates(&mut self) -> u32 {
        let pools = self.active_pools();
        let total_weight: u32 = pools
            .iter()
            .filter_map(|pool| self.pools.get(pool))
            .map(|entry| entry.weight)
            .sum();
        self.total_weight.set(total_weight);

        if total_weight == 0 {
            return 0;
        }

        for pool in pools {
            let mut entry = self.pools.get(&pool).unwrap_or_default();
            entry.per_block_rate = EmissionMath::per_block_rate(entry.weight, total_weight)
                .unwrap_or_revert(&self.env());
            self.pools.set(&pool, entry);
        }
        total_weight
    }

    fn push_active(&mut self, pool: Address) {
        let count = self.active_count.get_or_default();
        self.active_pools.set(&count, pool);
        self.active_index.set(&pool, count);
        self.active_count.set(count + 1);
    }

    fn remove_active(&mut self, pool: Address) {
        let count = self.active_count.get_or_default();
        let index = self.active_index
            .get(&pool)
            .unwrap_or_revert_with(&self.env(), EmissionError::PoolNotActive);
        let last = count - 1;

        if index != last {
            let moved = self.active_pools
                .get(&last)
                .unwrap_or_revert_with(&self.env(), EmissionError::PoolNotActive);
            self.active_pools.set(&index, moved);
            self.active_index.set(&moved, index);
        }
        self.active_count.set(last);
    }

    fn validate_weight(&self, weight: u32) {
        if weight == 0 || weight > MAX_WEIGHT {
            self.env().revert(EmissionError::InvalidWeight);
        }
    }

    fn only_admin(&self) {
        let caller = self.env().caller();
        let admin = self.admin.get_or_revert_with(EmissionError::Unauthorized);
        if caller != admin {
            self.env().revert(EmissionError::Unauthorized);
        }
    }
}

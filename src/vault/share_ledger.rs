//! Share Ledger - proportional claims on a vault's pooled asset

use odra::prelude::*;
use odra::casper_types::U256;
use super::errors::VaultError;
use crate::math::{SafeMath, ShareMath};

/// Share balances and supply. Pooled value is never stored here; callers
/// measure it and pass it in.
#[odra::module]
pub struct ShareLedger {
    /// Total shares outstanding
    total_shares: Var<U256>,
    /// Share balance per holder
    balances: Mapping<Address, U256>,
}

#[odra::module]
impl ShareLedger {
    pub fn total_shares(&self) -> U256 {
        self.total_shares.get_or_default()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }
}

impl ShareLedger {
    /// Shares owed for `received` assets, priced against the pool value
    /// measured before the assets arrived
    pub fn shares_for_deposit(&self, received: U256, pooled_before: U256) -> U256 {
        let total_shares = self.total_shares();
        if !total_shares.is_zero() && pooled_before.is_zero() {
            self.env().revert(VaultError::PoolValueZero);
        }

        let shares = ShareMath::shares_for_deposit(received, pooled_before, total_shares)
            .unwrap_or_revert(&self.env());
        if shares.is_zero() {
            self.env().revert(VaultError::ZeroShares);
        }
        shares
    }

    pub fn assets_for_shares(&self, shares: U256, pooled: U256) -> U256 {
        ShareMath::assets_for_shares(shares, pooled, self.total_shares())
            .unwrap_or_revert(&self.env())
    }

    pub fn exchange_rate(&self, pooled: U256) -> U256 {
        ShareMath::exchange_rate(pooled, self.total_shares()).unwrap_or_revert(&self.env())
    }

    pub fn mint(&mut self, to: Address, shares: U256) {
        let total_shares = SafeMath::add(self.total_shares(), shares).unwrap_or_revert(&self.env());
        self.total_shares.set(total_shares);

        let balance = self.balance_of(to);
        self.balances.set(&to, balance + shares);
    }

    pub fn burn(&mut self, from: Address, shares: U256) {
        let balance = self.balance_of(from);
        if balance < shares {
            self.env().revert(VaultError::InsufficientShares);
        }

        self.balances.set(&from, balance - shares);
        let total_shares = self.total_shares();
        self.total_shares.set(total_shares - shares);
    }
}

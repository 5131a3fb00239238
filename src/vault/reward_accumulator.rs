//! Reward Accumulator - reward-per-share bookkeeping for one vault
//!
//! Rewards land on the vault's balance in lumps (whenever emission is
//! pulled). Each settlement spreads whatever arrived since the previous one
//! evenly over the elapsed interval, so the rate is a moving average that is
//! only valid until the next settlement.
//!
//! `accounted` tracks rewards already folded into `reward_per_share_stored`
//! and not yet paid. Anything on the balance above it is fresh.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::math::{RewardMath, SafeMath};

/// Vault-wide accumulator state
#[odra::odra_type]
#[derive(Default)]
pub struct RewardSnapshot {
    /// Reward per share since inception, 1e18-scaled
    pub reward_per_share_stored: U256,
    /// Block time of the last settlement
    pub last_update_time: u64,
    /// Reward units per millisecond over the last settled interval
    pub current_rate: U256,
}

/// Per-account checkpoint
#[odra::odra_type]
#[derive(Default)]
pub struct RewardPosition {
    /// `reward_per_share_stored` at the account's last settlement
    pub checkpoint: U256,
    /// Settled, unpaid reward
    pub accrued: U256,
}

#[odra::module]
pub struct RewardAccumulator {
    snapshot: Var<RewardSnapshot>,
    positions: Mapping<Address, RewardPosition>,
    accounted: Var<U256>,
}

#[odra::module]
impl RewardAccumulator {
    pub fn snapshot(&self) -> RewardSnapshot {
        self.snapshot.get_or_default()
    }

    pub fn position(&self, account: Address) -> RewardPosition {
        self.positions.get(&account).unwrap_or_default()
    }

    pub fn accounted(&self) -> U256 {
        self.accounted.get_or_default()
    }
}

impl RewardAccumulator {
    pub fn start(&mut self) {
        self.snapshot.set(RewardSnapshot {
            last_update_time: self.env().get_block_time(),
            ..Default::default()
        });
        self.accounted.set(U256::zero());
    }

    /// Fold fresh rewards into the accumulator, then checkpoint `account`.
    ///
    /// `account_shares` and `total_shares` are the balances the interval
    /// was earned under, i.e. read before any mint or burn.
    pub fn settle(
        &mut self,
        account: Address,
        account_shares: U256,
        total_shares: U256,
        reward_balance: U256,
    ) {
        let now = self.env().get_block_time();
        let mut snapshot = self.snapshot();
        let elapsed = now.saturating_sub(snapshot.last_update_time);

        if elapsed > 0 {
            if total_shares.is_zero() {
                // Idle: rewards wait on the balance for the next holders
                snapshot.current_rate = U256::zero();
            } else {
                let accounted = self.accounted();
                let fresh = reward_balance.saturating_sub(accounted);
                let rate = RewardMath::interval_rate(fresh, elapsed);
                let delta = RewardMath::reward_per_share_delta(rate, elapsed, total_shares)
                    .unwrap_or_revert(&self.env());

                snapshot.reward_per_share_stored =
                    SafeMath::add(snapshot.reward_per_share_stored, delta).unwrap_or_revert(&self.env());
                snapshot.current_rate = rate;
                self.accounted.set(accounted + rate * U256::from(elapsed));
            }
            snapshot.last_update_time = now;
            self.snapshot.set(snapshot.clone());
        }

        let mut position = self.position(account);
        position.accrued = RewardMath::earned(
            account_shares,
            snapshot.reward_per_share_stored,
            position.checkpoint,
            position.accrued,
        )
        .unwrap_or_revert(&self.env());
        position.checkpoint = snapshot.reward_per_share_stored;
        self.positions.set(&account, position);
    }

    /// Unclaimed reward as of the last settlement
    pub fn earned(&self, account: Address, account_shares: U256) -> U256 {
        let position = self.position(account);
        RewardMath::earned(
            account_shares,
            self.snapshot().reward_per_share_stored,
            position.checkpoint,
            position.accrued,
        )
        .unwrap_or_revert(&self.env())
    }

    /// Release up to `available` of the account's accrued reward for payout.
    /// Whatever cannot be covered stays accrued.
    pub fn take_accrued(&mut self, account: Address, available: U256) -> U256 {
        let mut position = self.position(account);
        let paid = SafeMath::min(position.accrued, available);
        if paid.is_zero() {
            return paid;
        }

        position.accrued = position.accrued - paid;
        self.positions.set(&account, position);
        self.accounted.set(self.accounted().saturating_sub(paid));
        paid
    }
}

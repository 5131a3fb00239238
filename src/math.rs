//! Fixed-point helpers for share, reward and emission accounting
//!
//! Every ratio is scaled by 1e18 and truncated on division. Nothing here
//! rounds up: the last indivisible unit is left behind rather than paid out
//! twice.
use odra::casper_types::U256;
use crate::errors::MathError;

/// 1e18 fixed-point scale
pub const SCALE: u128 = 1_000_000_000_000_000_000;

/// Upper bound (inclusive) for a pool weight
pub const MAX_WEIGHT: u32 = 10_000;

/// Basis point denominator (100% = 10000)
pub const BPS_DENOMINATOR: u32 = 10_000;

/// The 1e18 scale as a U256
pub fn scale() -> U256 {
    U256::from(SCALE)
}

/// Safe math operations for U256
pub struct SafeMath;

impl SafeMath {
    /// Safe addition with overflow check
    pub fn add(a: U256, b: U256) -> Result<U256, MathError> {
        a.checked_add(b).ok_or(MathError::Overflow)
    }

    /// Safe subtraction with underflow check
    pub fn sub(a: U256, b: U256) -> Result<U256, MathError> {
        a.checked_sub(b).ok_or(MathError::Underflow)
    }

    /// Safe multiplication with overflow check
    pub fn mul(a: U256, b: U256) -> Result<U256, MathError> {
        a.checked_mul(b).ok_or(MathError::Overflow)
    }

    /// Safe division with zero check
    pub fn div(a: U256, b: U256) -> Result<U256, MathError> {
        if b.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        Ok(a / b)
    }

    /// `a * b / c`, floored
    pub fn mul_div(a: U256, b: U256, c: U256) -> Result<U256, MathError> {
        Self::div(Self::mul(a, b)?, c)
    }

    /// Portion of `amount` taken at `bps` basis points
    pub fn bps(amount: U256, bps: u32) -> Result<U256, MathError> {
        Self::mul_div(amount, U256::from(bps), U256::from(BPS_DENOMINATOR))
    }

    /// Returns the minimum of two U256 values
    pub fn min(a: U256, b: U256) -> U256 {
        if a < b { a } else { b }
    }
}

/// Share issuance and redemption
pub struct ShareMath;

impl ShareMath {
    /// Shares minted for `received` assets given the pooled value measured
    /// before the transfer.
    ///
    /// An empty vault mints 1:1. Otherwise `received * total_shares / pooled_before`.
    pub fn shares_for_deposit(
        received: U256,
        pooled_before: U256,
        total_shares: U256,
    ) -> Result<U256, MathError> {
        if total_shares.is_zero() {
            return Ok(received);
        }
        SafeMath::mul_div(received, total_shares, pooled_before)
    }

    /// Assets redeemable for `shares`: `pooled * shares / total_shares`
    pub fn assets_for_shares(
        shares: U256,
        pooled: U256,
        total_shares: U256,
    ) -> Result<U256, MathError> {
        if total_shares.is_zero() {
            return Ok(U256::zero());
        }
        SafeMath::mul_div(pooled, shares, total_shares)
    }

    /// Pooled value per share, 1e18-scaled. 1e18 for an empty vault.
    pub fn exchange_rate(pooled: U256, total_shares: U256) -> Result<U256, MathError> {
        if total_shares.is_zero() {
            return Ok(scale());
        }
        SafeMath::mul_div(pooled, scale(), total_shares)
    }
}

/// Reward-per-share accumulator arithmetic
pub struct RewardMath;

impl RewardMath {
    /// Average rate over the interval since the previous settlement
    pub fn interval_rate(fresh_rewards: U256, elapsed: u64) -> U256 {
        if elapsed == 0 {
            return U256::zero();
        }
        fresh_rewards / U256::from(elapsed)
    }

    /// Growth of reward-per-share for `rate` sustained over `elapsed`
    pub fn reward_per_share_delta(
        rate: U256,
        elapsed: u64,
        total_shares: U256,
    ) -> Result<U256, MathError> {
        if total_shares.is_zero() {
            return Ok(U256::zero());
        }
        let distributed = SafeMath::mul(rate, U256::from(elapsed))?;
        SafeMath::mul_div(distributed, scale(), total_shares)
    }

    /// `shares * (reward_per_share - checkpoint) / 1e18 + accrued`
    pub fn earned(
        shares: U256,
        reward_per_share: U256,
        checkpoint: U256,
        accrued: U256,
    ) -> Result<U256, MathError> {
        let delta = SafeMath::sub(reward_per_share, checkpoint)?;
        let fresh = SafeMath::mul_div(shares, delta, scale())?;
        SafeMath::add(fresh, accrued)
    }
}

/// Weighted emission split
pub struct EmissionMath;

impl EmissionMath {
    /// Fraction of the emission owed to a pool, 1e18-scaled
    pub fn per_block_rate(weight: u32, total_weight: u32) -> Result<U256, MathError> {
        SafeMath::mul_div(scale(), U256::from(weight), U256::from(total_weight))
    }

    /// `blocks * emission_per_block * per_block_rate / 1e18`
    pub fn pending_emission(
        blocks: u64,
        emission_per_block: U256,
        per_block_rate: U256,
    ) -> Result<U256, MathError> {
        let emitted = SafeMath::mul(U256::from(blocks), emission_per_block)?;
        SafeMath::mul_div(emitted, per_block_rate, scale())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_deposit_mints_one_to_one() {
        let shares = ShareMath::shares_for_deposit(
            U256::from(1000),
            U256::zero(),
            U256::zero(),
        ).unwrap();
        assert_eq!(shares, U256::from(1000));
        assert_eq!(ShareMath::exchange_rate(U256::zero(), U256::zero()).unwrap(), scale());
    }

    #[test]
    fn test_second_deposit_after_yield() {
        // 1000 shares backed by 1100 after 10% yield
        let shares = ShareMath::shares_for_deposit(
            U256::from(1000),
            U256::from(1100),
            U256::from(1000),
        ).unwrap();
        assert_eq!(shares, U256::from(909));

        let redeemed = ShareMath::assets_for_shares(
            U256::from(909),
            U256::from(2100),
            U256::from(1909),
        ).unwrap();
        assert_eq!(redeemed, U256::from(999));
    }

    #[test]
    fn test_deposit_into_worthless_vault_fails() {
        let result = ShareMath::shares_for_deposit(U256::from(10), U256::zero(), U256::from(5));
        assert!(matches!(result, Err(MathError::DivisionByZero)));
    }

    #[test]
    fn test_exchange_rate_tracks_pool_value() {
        let rate = ShareMath::exchange_rate(U256::from(1100), U256::from(1000)).unwrap();
        assert_eq!(rate, U256::from(1_100_000_000_000_000_000u128));
    }

    #[test]
    fn test_interval_rate_floors() {
        assert_eq!(RewardMath::interval_rate(U256::from(1001), 10), U256::from(100));
        assert_eq!(RewardMath::interval_rate(U256::from(1001), 0), U256::zero());
    }

    #[test]
    fn test_reward_per_share_idle_vault() {
        let delta = RewardMath::reward_per_share_delta(U256::from(5), 100, U256::zero()).unwrap();
        assert_eq!(delta, U256::zero());
    }

    #[test]
    fn test_earned_splits_by_shares() {
        let delta = RewardMath::reward_per_share_delta(U256::from(10), 100, U256::from(4000)).unwrap();
        let first = RewardMath::earned(U256::from(1000), delta, U256::zero(), U256::zero()).unwrap();
        let second = RewardMath::earned(U256::from(3000), delta, U256::zero(), U256::from(7)).unwrap();
        assert_eq!(first, U256::from(250));
        assert_eq!(second, U256::from(757));
    }

    #[test]
    fn test_per_block_rates_partition_scale() {
        let weights = [1u32, 1, 1];
        let total: u32 = weights.iter().sum();
        let sum = weights
            .iter()
            .map(|w| EmissionMath::per_block_rate(*w, total).unwrap())
            .fold(U256::zero(), |acc, r| acc + r);
        assert!(sum <= scale());
        assert!(scale() - sum < U256::from(weights.len() as u64));
    }

    #[test]
    fn test_pending_emission() {
        let half = scale() / 2;
        let pending = EmissionMath::pending_emission(10, U256::from(1_000), half).unwrap();
        assert_eq!(pending, U256::from(5_000));
    }

    #[test]
    fn test_bps() {
        assert_eq!(SafeMath::bps(U256::from(1000), 100).unwrap(), U256::from(10));
        assert_eq!(SafeMath::bps(U256::from(1000), 0).unwrap(), U256::zero());
    }
}

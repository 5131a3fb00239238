//! Holding Strategy - parks the vault's asset and charges an exit fee
//!
//! Yield is whatever lands on the strategy's balance (rewards compounded by a
//! keeper, donations, airdrops). Every unwind keeps `exit_fee_bps` of the
//! amount for the admin, so the vault regularly receives less than it asks for.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::errors::StrategyError;
use super::events::*;
use crate::math::SafeMath;
use crate::token::Cep18TokenContractRef;

/// Highest exit fee an admin may set (10%)
pub const MAX_EXIT_FEE_BPS: u32 = 1_000;

#[odra::module(events = [Invested, Divested, Liquidated, ExitFeeUpdated], errors = StrategyError)]
pub struct HoldingStrategy {
    /// Managed asset
    asset: Var<Address>,
    /// Vault allowed to move funds
    vault: Var<Address>,
    /// Admin address, also receives exit fees
    admin: Var<Address>,
    /// Fee kept on every unwind, in basis points
    exit_fee_bps: Var<u32>,
}

#[odra::module]
impl HoldingStrategy {
    pub fn init(&mut self, asset: Address, vault: Address, exit_fee_bps: u32) {
        if exit_fee_bps > MAX_EXIT_FEE_BPS {
            self.env().revert(StrategyError::InvalidFee);
        }
        self.asset.set(asset);
        self.vault.set(vault);
        self.admin.set(self.env().caller());
        self.exit_fee_bps.set(exit_fee_bps);
    }

    // ========================================
    // Gateway
    // ========================================

    pub fn asset(&self) -> Address {
        self.asset.get_or_revert_with(StrategyError::InvalidConfiguration)
    }

    pub fn vault(&self) -> Address {
        self.vault.get_or_revert_with(StrategyError::InvalidConfiguration)
    }

    pub fn invest(&mut self) {
        self.only_vault();
        let managed_balance = self.total_managed_balance();
        self.env().emit_event(Invested {
            vault: self.vault(),
            managed_balance,
        });
    }

    /// Send up to `amount` back to the vault, minus the exit fee
    pub fn divest(&mut self, amount: U256) -> U256 {
        self.only_vault();

        let requested = SafeMath::min(amount, self.total_managed_balance());
        let (returned, fee) = self.unwind(requested);

        self.env().emit_event(Divested {
            vault: self.vault(),
            requested: amount,
            returned,
            fee,
        });
        returned
    }

    pub fn total_managed_balance(&self) -> U256 {
        let token = Cep18TokenContractRef::new(self.env(), self.asset());
        token.balance_of(self.env().self_address())
    }

    /// Unwind everything back to the vault, minus the exit fee
    pub fn liquidate_all(&mut self) -> U256 {
        self.only_vault();

        let (returned, fee) = self.unwind(self.total_managed_balance());

        self.env().emit_event(Liquidated {
            vault: self.vault(),
            returned,
            fee,
        });
        returned
    }

    // ========================================
    // Admin Functions
    // ========================================

    pub fn exit_fee_bps(&self) -> u32 {
        self.exit_fee_bps.get_or_default()
    }

    pub fn set_exit_fee_bps(&mut self, fee_bps: u32) {
        self.only_admin();
        if fee_bps > MAX_EXIT_FEE_BPS {
            self.env().revert(StrategyError::InvalidFee);
        }

        let old_fee_bps = self.exit_fee_bps();
        self.exit_fee_bps.set(fee_bps);

        self.env().emit_event(ExitFeeUpdated {
            old_fee_bps,
            new_fee_bps: fee_bps,
            updated_by: self.env().caller(),
        });
    }

    fn unwind(&mut self, amount: U256) -> (U256, U256) {
        if amount.is_zero() {
            return (U256::zero(), U256::zero());
        }

        let fee = SafeMath::bps(amount, self.exit_fee_bps()).unwrap_or_revert(&self.env());
        let returned = amount - fee;

        let mut token = Cep18TokenContractRef::new(self.env(), self.asset());
        if !fee.is_zero() {
            let admin = self.admin.get_or_revert_with(StrategyError::InvalidConfiguration);
            token.transfer(admin, fee);
        }
        if !returned.is_zero() {
            token.transfer(self.vault(), returned);
        }
        (returned, fee)
    }

    fn only_vault(&self) {
        if self.env().caller() != self.vault() {
            self.env().revert(StrategyError::Unauthorized);
        }
    }

    fn only_admin(&self) {
        let admin = self.admin.get_or_revert_with(StrategyError::Unauthorized);
        if self.env().caller() != admin {
            self.env().revert(StrategyError::Unauthorized);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odra::host::{Deployer, HostEnv};
    use odra::prelude::Addressable;
    use crate::token::{AssetToken, AssetTokenHostRef, AssetTokenInitArgs};

    fn setup(exit_fee_bps: u32) -> (HostEnv, AssetTokenHostRef, HoldingStrategyHostRef) {
        let env = odra_test::env();
        let asset = AssetToken::deploy(&env, AssetTokenInitArgs {
            name: String::from("Vault Asset"),
            symbol: String::from("VAST"),
            decimals: 18,
            transfer_fee_bps: 0,
        });
        // account 1 stands in for the vault
        let strategy = HoldingStrategy::deploy(&env, HoldingStrategyInitArgs {
            asset: asset.address().clone(),
            vault: env.get_account(1),
            exit_fee_bps,
        });
        (env, asset, strategy)
    }

    #[test]
    fn test_divest_charges_exit_fee() {
        let (env, mut asset, mut strategy) = setup(100);
        let admin = env.get_account(0);
        let vault = env.get_account(1);
        asset.mint(strategy.address().clone(), U256::from(1000));

        env.set_caller(vault);
        let returned = strategy.divest(U256::from(500));

        assert_eq!(returned, U256::from(495));
        assert_eq!(asset.balance_of(vault), U256::from(495));
        assert_eq!(asset.balance_of(admin), U256::from(5));
        assert_eq!(strategy.total_managed_balance(), U256::from(500));
    }

    #[test]
    fn test_divest_caps_at_managed_balance() {
        let (env, mut asset, mut strategy) = setup(0);
        let vault = env.get_account(1);
        asset.mint(strategy.address().clone(), U256::from(300));

        env.set_caller(vault);
        assert_eq!(strategy.divest(U256::from(1000)), U256::from(300));
        assert_eq!(strategy.total_managed_balance(), U256::zero());
    }

    #[test]
    fn test_liquidate_all() {
        let (env, mut asset, mut strategy) = setup(1000);
        let vault = env.get_account(1);
        asset.mint(strategy.address().clone(), U256::from(1000));

        env.set_caller(vault);
        assert_eq!(strategy.liquidate_all(), U256::from(900));
        assert_eq!(strategy.total_managed_balance(), U256::zero());
    }

    #[test]
    fn test_only_vault_moves_funds() {
        let (env, _, mut strategy) = setup(0);
        env.set_caller(env.get_account(2));
        assert_eq!(
            strategy.try_divest(U256::from(1)),
            Err(StrategyError::Unauthorized.into())
        );
        assert_eq!(strategy.try_liquidate_all(), Err(StrategyError::Unauthorized.into()));
    }

    #[test]
    fn test_exit_fee_bounds() {
        let (env, _, mut strategy) = setup(0);
        assert_eq!(
            strategy.try_set_exit_fee_bps(MAX_EXIT_FEE_BPS + 1),
            Err(StrategyError::InvalidFee.into())
        );
        strategy.set_exit_fee_bps(50);
        assert_eq!(strategy.exit_fee_bps(), 50);

        env.set_caller(env.get_account(3));
        assert_eq!(
            strategy.try_set_exit_fee_bps(10),
            Err(StrategyError::Unauthorized.into())
        );
    }
}

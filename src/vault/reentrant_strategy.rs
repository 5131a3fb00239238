//! Strategy that calls back into its vault whenever it is asked for funds.
//! Test-only; exercises the vault's reentrancy lock.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::reward_vault::RewardVaultContractRef;
use crate::token::Cep18TokenContractRef;

#[odra::module]
pub struct ReentrantStrategy {
    asset: Var<Address>,
    vault: Var<Address>,
}

#[odra::module]
impl ReentrantStrategy {
    pub fn init(&mut self, asset: Address, vault: Address) {
        self.asset.set(asset);
        self.vault.set(vault);
    }

    pub fn asset(&self) -> Address {
        self.asset.get().unwrap_or_revert(&self.env())
    }

    pub fn vault(&self) -> Address {
        self.vault.get().unwrap_or_revert(&self.env())
    }

    pub fn invest(&mut self) {}

    pub fn divest(&mut self, _amount: U256) -> U256 {
        self.claim_from_vault();
        U256::zero()
    }

    pub fn total_managed_balance(&self) -> U256 {
        Cep18TokenContractRef::new(self.env(), self.asset()).balance_of(self.env().self_address())
    }

    pub fn liquidate_all(&mut self) -> U256 {
        self.claim_from_vault();
        U256::zero()
    }

    fn claim_from_vault(&mut self) {
        RewardVaultContractRef::new(self.env(), self.vault()).claim_reward();
    }
}

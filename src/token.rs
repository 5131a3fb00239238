//! CEP-18 compatible asset token
//!
//! Used as the pooled asset and as the reward asset. An optional transfer
//! fee models fee-on-transfer assets: the recipient is credited the amount
//! minus the fee, the fee goes to the token owner.
use odra::prelude::*;
use odra::casper_types::U256;
use crate::events::{Transfer, Approval};
use crate::errors::TokenError;
use crate::math::{SafeMath, BPS_DENOMINATOR};

/// Mintable CEP-18 token
#[odra::module(events = [Transfer, Approval], errors = TokenError)]
pub struct AssetToken {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Token decimals
    decimals: Var<u8>,
    /// Total supply of tokens
    total_supply: Var<U256>,
    /// Balance mapping: owner -> balance
    balances: Mapping<Address, U256>,
    /// Allowance mapping: owner -> spender -> amount
    allowances: Mapping<(Address, Address), U256>,
    /// Minter and fee collector
    owner: Var<Address>,
    /// Fee charged on every transfer, in basis points
    transfer_fee_bps: Var<u32>,
}

#[odra::module]
impl AssetToken {
    /// Initialize the token; the caller becomes the owner
    pub fn init(&mut self, name: String, symbol: String, decimals: u8, transfer_fee_bps: u32) {
        if transfer_fee_bps > BPS_DENOMINATOR {
            self.env().revert(TokenError::InvalidFee);
        }
        self.name.set(name);
        self.symbol.set(symbol);
        self.decimals.set(decimals);
        self.total_supply.set(U256::zero());
        self.owner.set(self.env().caller());
        self.transfer_fee_bps.set(transfer_fee_bps);
    }

    /// Get the token name
    pub fn name(&self) -> String {
        self.name.get_or_default()
    }

    /// Get the token symbol
    pub fn symbol(&self) -> String {
        self.symbol.get_or_default()
    }

    /// Get the token decimals
    pub fn decimals(&self) -> u8 {
        self.decimals.get_or_default()
    }

    /// Get the total supply
    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    /// Get the balance of an address
    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    /// Get the allowance for a spender
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    pub fn transfer_fee_bps(&self) -> u32 {
        self.transfer_fee_bps.get_or_default()
    }

    /// Transfer tokens to another address
    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.transfer_internal(caller, to, amount);
        true
    }

    /// Approve a spender to spend tokens
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.approve_internal(caller, spender, amount);
        true
    }

    /// Transfer tokens from one address to another (requires approval)
    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        let current_allowance = self.allowance(from, caller);

        if current_allowance < amount {
            self.env().revert(TokenError::InsufficientAllowance);
        }

        self.approve_internal(from, caller, current_allowance - amount);
        self.transfer_internal(from, to, amount);
        true
    }

    /// Mint new tokens (owner only)
    pub fn mint(&mut self, to: Address, amount: U256) {
        self.only_owner();

        let new_supply = SafeMath::add(self.total_supply(), amount).unwrap_or_revert(&self.env());
        self.total_supply.set(new_supply);

        let current_balance = self.balance_of(to);
        self.balances.set(&to, current_balance + amount);

        self.env().emit_event(Transfer {
            from: self.env().self_address(),
            to,
            value: amount,
        });
    }

    /// Update the transfer fee (owner only)
    pub fn set_transfer_fee_bps(&mut self, fee_bps: u32) {
        self.only_owner();
        if fee_bps > BPS_DENOMINATOR {
            self.env().revert(TokenError::InvalidFee);
        }
        self.transfer_fee_bps.set(fee_bps);
    }

    /// Internal transfer function
    fn transfer_internal(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(TokenError::InsufficientBalance);
        }

        let fee = SafeMath::bps(amount, self.transfer_fee_bps()).unwrap_or_revert(&self.env());
        let credited = amount - fee;

        self.balances.set(&from, from_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.set(&to, to_balance + credited);

        if !fee.is_zero() {
            let collector = self.owner.get_or_revert_with(TokenError::Unauthorized);
            let collector_balance = self.balance_of(collector);
            self.balances.set(&collector, collector_balance + fee);
        }

        self.env().emit_event(Transfer {
            from,
            to,
            value: credited,
        });
    }

    /// Internal approve function
    fn approve_internal(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(owner, spender), amount);

        self.env().emit_event(Approval {
            owner,
            spender,
            value: amount,
        });
    }

    fn only_owner(&self) {
        let owner = self.owner.get_or_revert_with(TokenError::Unauthorized);
        if self.env().caller() != owner {
            self.env().revert(TokenError::Unauthorized);
        }
    }
}

/// External token interface for interacting with CEP-18 tokens
#[odra::external_contract]
pub trait Cep18Token {
    /// Get the balance of an address
    fn balance_of(&self, owner: Address) -> U256;

    /// Transfer tokens
    fn transfer(&mut self, to: Address, amount: U256) -> bool;

    /// Transfer tokens from another address
    fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool;

    /// Approve a spender
    fn approve(&mut self, spender: Address, amount: U256) -> bool;

    /// Get allowance
    fn allowance(&self, owner: Address, spender: Address) -> U256;

    /// Get total supply
    fn total_supply(&self) -> U256;
}

#[cfg(test)]
mod tests {
    use super::*;
    use odra::host::{Deployer, HostEnv};

    fn setup(fee_bps: u32) -> (HostEnv, AssetTokenHostRef) {
        let env = odra_test::env();
        let init_args = AssetTokenInitArgs {
            name: String::from("Vault Asset"),
            symbol: String::from("VAST"),
            decimals: 18,
            transfer_fee_bps: fee_bps,
        };
        let token = AssetToken::deploy(&env, init_args);
        (env, token)
    }

    #[test]
    fn test_init() {
        let (_, token) = setup(0);
        assert_eq!(token.name(), "Vault Asset");
        assert_eq!(token.symbol(), "VAST");
        assert_eq!(token.decimals(), 18);
        assert_eq!(token.total_supply(), U256::zero());
    }

    #[test]
    fn test_transfer() {
        let (env, mut token) = setup(0);
        let user1 = env.get_account(0);
        let user2 = env.get_account(1);

        token.mint(user1, U256::from(1000));
        token.transfer(user2, U256::from(500));

        assert_eq!(token.balance_of(user1), U256::from(500));
        assert_eq!(token.balance_of(user2), U256::from(500));
    }

    #[test]
    fn test_transfer_fee_goes_to_owner() {
        let (env, mut token) = setup(100);
        let owner = env.get_account(0);
        let user1 = env.get_account(1);
        let user2 = env.get_account(2);

        token.mint(user1, U256::from(1000));
        env.set_caller(user1);
        token.transfer(user2, U256::from(1000));

        assert_eq!(token.balance_of(user1), U256::zero());
        assert_eq!(token.balance_of(user2), U256::from(990));
        assert_eq!(token.balance_of(owner), U256::from(10));
        assert_eq!(token.total_supply(), U256::from(1000));
    }

    #[test]
    fn test_only_owner_mints() {
        let (env, mut token) = setup(0);
        let user = env.get_account(1);

        env.set_caller(user);
        assert_eq!(
            token.try_mint(user, U256::from(1)),
            Err(TokenError::Unauthorized.into())
        );
    }

    #[test]
    fn test_transfer_from_requires_allowance() {
        let (env, mut token) = setup(0);
        let holder = env.get_account(1);
        let spender = env.get_account(2);
        token.mint(holder, U256::from(100));

        env.set_caller(spender);
        assert_eq!(
            token.try_transfer_from(holder, spender, U256::from(50)),
            Err(TokenError::InsufficientAllowance.into())
        );

        env.set_caller(holder);
        token.approve(spender, U256::from(50));
        env.set_caller(spender);
        token.transfer_from(holder, spender, U256::from(50));
        assert_eq!(token.balance_of(spender), U256::from(50));
        assert_eq!(token.allowance(holder, spender), U256::zero());
    }
}

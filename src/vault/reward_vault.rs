//! Reward Vault - pooled deposits, strategy routing and reward streaming
//!
//! Every depositor-facing entry point runs `settle` first: the vault pulls
//! its pending emission from the allocator and checkpoints the caller's
//! reward before any share balance moves. Share and reward bookkeeping is
//! committed before any tokens leave the vault.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::errors::VaultError;
use super::events::*;
use super::migration::{MigrationController, StrategyCandidate};
use super::reward_accumulator::{RewardAccumulator, RewardSnapshot};
use super::share_ledger::ShareLedger;
use crate::emission::allocator::EmissionAllocatorContractRef;
use crate::strategy::StrategyGatewayContractRef;
use crate::token::Cep18TokenContractRef;

/// Reward Vault contract
#[odra::module(
    events = [
        Deposited,
        Withdrawn,
        RewardPaid,
        PartialWithdrawal,
        StrategyInitialized,
        StrategyProposed,
        StrategyUpgraded,
        DepositsPaused,
        DepositsResumed,
        StuckTokensRecovered
    ],
    errors = VaultError
)]
pub struct RewardVault {
    /// Share balances and supply
    ledger: SubModule<ShareLedger>,
    /// Reward-per-share accumulator
    rewards: SubModule<RewardAccumulator>,
    /// Pending strategy migration
    migration: SubModule<MigrationController>,
    /// Pooled asset
    asset: Var<Address>,
    /// Reward asset streamed to holders
    reward_token: Var<Address>,
    /// Emission allocator this vault pulls from
    allocator: Var<Address>,
    /// Active strategy
    strategy: Var<Address>,
    /// Admin address
    admin: Var<Address>,
    /// Deposits paused
    paused: Var<bool>,
    /// Reentrancy lock
    locked: Var<bool>,
}

#[odra::module]
impl RewardVault {
    /// Initialize the vault
    ///
    /// # Arguments
    /// * `asset` - CEP-18 token depositors pool
    /// * `reward_token` - CEP-18 token streamed as reward, must differ from `asset`
    /// * `allocator` - emission allocator the vault is registered with
    /// * `approval_delay` - milliseconds a strategy candidate must wait
    pub fn init(
        &mut self,
        asset: Address,
        reward_token: Address,
        allocator: Address,
        approval_delay: u64,
    ) {
        if asset == reward_token {
            self.env().revert(VaultError::InvalidConfiguration);
        }

        self.asset.set(asset);
        self.reward_token.set(reward_token);
        self.allocator.set(allocator);
        self.admin.set(self.env().caller());
        self.paused.set(false);
        self.locked.set(false);

        self.migration.configure(approval_delay);
        self.rewards.start();
    }

    // ========================================
    // Depositor Functions
    // ========================================

    /// Deposit `amount` of the asset and receive shares
    ///
    /// # Returns
    /// The amount of shares minted
    pub fn deposit(&mut self, amount: U256) -> U256 {
        self.lock();
        let caller = self.env().caller();
        let shares = self.deposit_for(caller, amount);
        self.unlock();
        shares
    }

    /// Deposit the caller's whole asset balance
    pub fn deposit_all(&mut self) -> U256 {
        self.lock();
        let caller = self.env().caller();
        let amount = self.asset_token().balance_of(caller);
        let shares = self.deposit_for(caller, amount);
        self.unlock();
        shares
    }

    /// Burn `shares` for their slice of the pool, collecting accrued reward
    ///
    /// The reward paid is the caller's settled, unclaimed reward, capped at
    /// the vault's reward balance. It is not a pro-rata cut of that balance.
    ///
    /// # Returns
    /// The amount of the asset paid out
    pub fn withdraw(&mut self, shares: U256) -> U256 {
        self.lock();
        let caller = self.env().caller();
        let paid = self.withdraw_for(caller, shares);
        self.unlock();
        paid
    }

    /// Burn every share the caller holds
    pub fn withdraw_all(&mut self) -> U256 {
        self.lock();
        let caller = self.env().caller();
        let shares = self.ledger.balance_of(caller);
        let paid = self.withdraw_for(caller, shares);
        self.unlock();
        paid
    }

    /// Pay out the caller's accrued reward. Returns zero when nothing accrued.
    pub fn claim_reward(&mut self) -> U256 {
        self.lock();
        let caller = self.env().caller();
        self.settle(caller);
        let paid = self.pay_reward(caller);
        self.unlock();
        paid
    }

    // ========================================
    // View Functions
    // ========================================

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.ledger.balance_of(owner)
    }

    pub fn total_shares(&self) -> U256 {
        self.ledger.total_shares()
    }

    /// Asset held by the vault plus everything the strategy manages
    pub fn pooled_asset_value(&self) -> U256 {
        let deployed = match self.strategy.get() {
            Some(strategy) => StrategyGatewayContractRef::new(self.env(), strategy).total_managed_balance(),
            None => U256::zero(),
        };
        self.available() + deployed
    }

    /// Asset sitting idle on the vault
    pub fn available(&self) -> U256 {
        self.asset_token().balance_of(self.env().self_address())
    }

    /// Pooled value per share, scaled by 1e18
    pub fn exchange_rate(&self) -> U256 {
        self.ledger.exchange_rate(self.pooled_asset_value())
    }

    /// Unclaimed reward as of the last settlement; an estimate until settled
    pub fn earned(&self, account: Address) -> U256 {
        self.rewards.earned(account, self.ledger.balance_of(account))
    }

    /// Accumulator state: reward per share, last settlement time and current rate
    pub fn reward_snapshot(&self) -> RewardSnapshot {
        self.rewards.snapshot()
    }

    pub fn strategy(&self) -> Option<Address> {
        self.strategy.get()
    }

    pub fn candidate(&self) -> Option<StrategyCandidate> {
        self.migration.candidate()
    }

    pub fn approval_delay(&self) -> u64 {
        self.migration.approval_delay()
    }

    pub fn asset(&self) -> Address {
        self.asset.get_or_revert_with(VaultError::InvalidConfiguration)
    }

    pub fn reward_token(&self) -> Address {
        self.reward_token.get_or_revert_with(VaultError::InvalidConfiguration)
    }

    pub fn allocator(&self) -> Address {
        self.allocator.get_or_revert_with(VaultError::InvalidConfiguration)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.get_or_default()
    }

    pub fn get_admin(&self) -> Address {
        self.admin.get_or_revert_with(VaultError::Unauthorized)
    }

    // ========================================
    // Admin Functions
    // ========================================

    /// Wire in the first strategy. Later switches go through the time lock.
    pub fn set_strategy(&mut self, strategy: Address) {
        self.only_admin();
        if self.strategy.get().is_some() {
            self.env().revert(VaultError::StrategyAlreadySet);
        }
        self.validate_strategy(strategy);

        self.strategy.set(strategy);
        self.env().emit_event(StrategyInitialized { strategy });
    }

    /// Propose a replacement strategy, overwriting any pending candidate
    pub fn propose_strategy(&mut self, strategy: Address) {
        self.only_admin();
        self.validate_strategy(strategy);
        if self.strategy.get() == Some(strategy) {
            self.env().revert(VaultError::InvalidStrategy);
        }

        let candidate = self.migration.propose(strategy);
        self.env().emit_event(StrategyProposed {
            strategy,
            proposed_at: candidate.proposed_at,
            ready_at: candidate.proposed_at.saturating_add(self.approval_delay()),
        });
    }

    /// Switch to the candidate once its delay has elapsed.
    ///
    /// The old strategy is unwound and only what actually arrives is
    /// re-invested into the new one.
    pub fn upgrade_strategy(&mut self) {
        self.only_admin();
        self.lock();

        let new_strategy = self.migration.take_ready();
        let old_strategy = self.active_strategy();
        self.strategy.set(new_strategy);

        let before = self.available();
        let reported = StrategyGatewayContractRef::new(self.env(), old_strategy).liquidate_all();
        let recovered = self.available().saturating_sub(before);

        self.invest(new_strategy);

        self.env().emit_event(StrategyUpgraded {
            old_strategy,
            new_strategy,
            reported,
            recovered,
        });
        self.unlock();
    }

    pub fn pause(&mut self) {
        self.only_admin();
        self.paused.set(true);
        self.env().emit_event(DepositsPaused {
            paused_by: self.env().caller(),
        });
    }

    pub fn unpause(&mut self) {
        self.only_admin();
        self.paused.set(false);
        self.env().emit_event(DepositsResumed {
            resumed_by: self.env().caller(),
        });
    }

    /// Sweep a token sent here by mistake to the admin
    pub fn in_case_tokens_get_stuck(&mut self, token: Address) {
        self.only_admin();
        if token == self.asset() || token == self.reward_token() {
            self.env().revert(VaultError::ProtectedToken);
        }

        let admin = self.get_admin();
        let mut stuck = Cep18TokenContractRef::new(self.env(), token);
        let amount = stuck.balance_of(self.env().self_address());
        if !amount.is_zero() {
            stuck.transfer(admin, amount);
        }

        self.env().emit_event(StuckTokensRecovered {
            token,
            amount,
            recipient: admin,
        });
    }

    // ========================================
    // Internal Functions
    // ========================================

    fn deposit_for(&mut self, account: Address, amount: U256) -> U256 {
        self.ensure_not_paused();
        if amount.is_zero() {
            self.env().revert(VaultError::ZeroAmount);
        }
        let strategy = self.active_strategy();

        self.settle(account);

        let pooled_before = self.pooled_asset_value();
        let before = self.available();
        self.asset_token()
            .transfer_from(account, self.env().self_address(), amount);
        // fee-on-transfer assets deliver less than `amount`
        let received = self.available().saturating_sub(before);

        let shares = self.ledger.shares_for_deposit(received, pooled_before);
        self.ledger.mint(account, shares);

        self.env().emit_event(Deposited {
            account,
            amount: received,
            shares,
            exchange_rate: self.exchange_rate(),
        });

        self.invest(strategy);
        shares
    }

    fn withdraw_for(&mut self, account: Address, shares: U256) -> U256 {
        if shares.is_zero() {
            self.env().revert(VaultError::ZeroShares);
        }
        if shares > self.ledger.balance_of(account) {
            self.env().revert(VaultError::InsufficientShares);
        }

        self.settle(account);

        let owed = self.ledger.assets_for_shares(shares, self.pooled_asset_value());
        // Burn before touching the strategy so the price is fixed on pre-burn supply
        self.ledger.burn(account, shares);

        self.pay_reward(account);

        let mut paid = owed;
        let on_hand = self.available();
        if on_hand < owed {
            let strategy = self.active_strategy();
            StrategyGatewayContractRef::new(self.env(), strategy).divest(owed - on_hand);

            let after = self.available();
            if after < owed {
                paid = after;
                self.env().emit_event(PartialWithdrawal { account, owed, paid });
            }
        }

        if !paid.is_zero() {
            self.asset_token().transfer(account, paid);
        }

        self.env().emit_event(Withdrawn {
            account,
            shares,
            amount: paid,
        });
        paid
    }

    /// Pull pending emission, then checkpoint `account` against the current supply
    fn settle(&mut self, account: Address) {
        let vault = self.env().self_address();
        EmissionAllocatorContractRef::new(self.env(), self.allocator()).pull(vault);

        let reward_balance = self.reward_balance();
        let total_shares = self.ledger.total_shares();
        let account_shares = self.ledger.balance_of(account);
        self.rewards.settle(account, account_shares, total_shares, reward_balance);
    }

    /// Pay the settled reward, capped at what the vault holds
    fn pay_reward(&mut self, account: Address) -> U256 {
        let available = self.reward_balance();
        let paid = self.rewards.take_accrued(account, available);
        if paid.is_zero() {
            return paid;
        }

        let mut reward = Cep18TokenContractRef::new(self.env(), self.reward_token());
        reward.transfer(account, paid);

        self.env().emit_event(RewardPaid {
            account,
            amount: paid,
        });
        paid
    }

    /// Hand every idle unit of the asset to `strategy`
    fn invest(&mut self, strategy: Address) {
        let on_hand = self.available();
        if on_hand.is_zero() {
            return;
        }
        self.asset_token().transfer(strategy, on_hand);
        StrategyGatewayContractRef::new(self.env(), strategy).invest();
    }

    fn validate_strategy(&self, strategy: Address) {
        let gateway = StrategyGatewayContractRef::new(self.env(), strategy);
        if gateway.vault() != self.env().self_address() || gateway.asset() != self.asset() {
            self.env().revert(VaultError::InvalidStrategy);
        }
    }

    fn active_strategy(&self) -> Address {
        self.strategy.get_or_revert_with(VaultError::StrategyNotSet)
    }

    fn reward_balance(&self) -> U256 {
        Cep18TokenContractRef::new(self.env(), self.reward_token())
            .balance_of(self.env().self_address())
    }

    fn asset_token(&self) -> Cep18TokenContractRef {
        Cep18TokenContractRef::new(self.env(), self.asset())
    }

    /// Reentrancy lock
    fn lock(&mut self) {
        if self.locked.get_or_default() {
            self.env().revert(VaultError::Locked);
        }
        self.locked.set(true);
    }

    /// Reentrancy unlock
    fn unlock(&mut self) {
        self.locked.set(false);
    }

    fn ensure_not_paused(&self) {
        if self.paused.get_or_default() {
            self.env().revert(VaultError::ContractPaused);
        }
    }

    fn only_admin(&self) {
        let caller = self.env().caller();
        let admin = self.admin.get_or_revert_with(VaultError::Unauthorized);
        if caller != admin {
            self.env().revert(VaultError::Unauthorized);
        }
    }
}

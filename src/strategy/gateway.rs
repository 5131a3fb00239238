//! Interface every strategy exposes to its vault

use odra::prelude::*;
use odra::casper_types::U256;

/// Strategy gateway as seen by a vault.
///
/// Any call returning an amount may return less than requested; the vault
/// treats the returned figure (and its own measured balance) as the truth.
#[odra::external_contract]
pub trait StrategyGateway {
    /// Asset the strategy manages
    fn asset(&self) -> Address;

    /// Vault the strategy answers to
    fn vault(&self) -> Address;

    /// Deploy whatever the strategy currently holds
    fn invest(&mut self);

    /// Return up to `amount` to the vault; yields the amount actually sent
    fn divest(&mut self, amount: U256) -> U256;

    /// Everything the strategy controls, deployed or idle
    fn total_managed_balance(&self) -> U256;

    /// Unwind the whole position back to the vault; yields the amount sent
    fn liquidate_all(&mut self) -> U256;
}

//! Strategy gateways
//!
//! A vault forwards its pooled asset to exactly one strategy at a time. The
//! vault only ever talks to the [`StrategyGateway`] interface; the
//! [`HoldingStrategy`] is a reference gateway that parks the asset and
//! charges an exit fee.

pub mod gateway;
pub mod holding_strategy;
pub mod errors;
pub mod events;

pub use gateway::{StrategyGateway, StrategyGatewayContractRef};
pub use holding_strategy::HoldingStrategy;
pub use errors::StrategyError;
pub use events::*;

#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]
extern crate alloc;

// Shared primitives
pub mod token;
pub mod errors;
pub mod events;
pub mod math;

// Reward vaults and their strategies
pub mod vault;
pub mod strategy;

// Emission scheduling across vaults
pub mod emission;

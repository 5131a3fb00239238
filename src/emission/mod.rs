//! Weighted emission
//!
//! One allocator streams a fixed per-block budget of the reward token to
//! every registered pool in proportion to its weight. Any change to the
//! registry settles all active pools under the old weights first.

pub mod allocator;
pub mod errors;
pub mod events;


pub use allocator::{EmissionAllocator, PoolEntry};
pub use errors::EmissionError;
pub use events::*;

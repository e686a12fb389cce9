//! Character stats and resource pools.
//!
//! Primary stats are the persisted source of truth. Each stat has three
//! components:
//!
//! ```text
//! total = manual (spent stat points) + auto (job growth) + bonus (job + passives)
//! ```
//!
//! Resource maxima are recomputed from totals; only current values are stored.
mod block;
mod resources;

pub use block::{AllocateError, StatBlock, StatKind};
pub use resources::{ResourceKind, ResourceMeter, ResourcePools};

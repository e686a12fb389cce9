//! Job registry.
//!
//! Jobs form a tree rooted at the Novice job: each non-root job names exactly
//! one predecessor one tier below it. Definitions are immutable once the
//! registry is built; derived records (ancestry, unlockable skills) are
//! memoized per job the first time they are requested.
mod definition;
mod error;
mod registry;

pub use definition::{GateMode, JobDefinition, JobTier, JobUnlockRequirement};
pub use error::AdvanceJobError;
pub use registry::JobRegistry;

//! Experience subsystem: the multiplier stack, sweet-spot combo and the
//! exhaustive level-up loop.
//!
//! ```text
//! Accumulating --(xp >= required)--> LevelUp --(loop)--> Accumulating
//!       \
//!        `--(level >= max_level)--> AtCap   (xp pinned at required - 1)
//! ```
mod combo;
mod error;
mod event;
mod experience;
mod state;

pub use combo::ComboTracker;
pub use error::XpRejection;
pub use event::ProgressionEvent;
pub use experience::{Authority, XpBreakdown, XpGrant, XpSource, compute_award};
pub use state::{LevelUp, ProgressionState};

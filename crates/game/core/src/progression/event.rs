//! Named events for the presentation hook.

use core::fmt;

use crate::common::JobId;

use super::XpSource;

/// Something the presentation layer may render. Emitting never blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProgressionEvent {
    LevelUp { level: u32 },
    JobChanged { from: JobId, to: JobId },
    XpGained { amount: u64, source: XpSource },
}

impl ProgressionEvent {
    /// Wire name: `level-up`, `job-changed` or `xp-gained:<amount>:<tag>`.
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ProgressionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LevelUp { .. } => f.write_str("level-up"),
            Self::JobChanged { .. } => f.write_str("job-changed"),
            Self::XpGained { amount, source } => write!(f, "xp-gained:{amount}:{}", source.tag()),
        }
    }
}

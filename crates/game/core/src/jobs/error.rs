//! Job advancement errors.

use crate::common::JobId;
use crate::error::{ErrorSeverity, GameError};
use crate::world::Milestones;

use super::{GateMode, JobTier};

/// Reasons an `AdvanceJob` request is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AdvanceJobError {
    #[error("unknown job '{0}'")]
    UnknownJob(JobId),

    /// The character's stored job no longer exists in the registry.
    #[error("current job '{0}' is not registered")]
    CurrentJobMissing(JobId),

    #[error("cannot advance from {current:?} to {target:?}: tiers must be consecutive")]
    TierMismatch { current: JobTier, target: JobTier },

    #[error("requires job '{required}', currently '{current}'")]
    WrongPredecessor { required: JobId, current: JobId },

    #[error("requires level {required} (currently {current})")]
    LevelTooLow { required: u32, current: u32 },

    #[error("requires a hardmode world")]
    HardmodeRequired,

    #[error("requires defeating {mode:?} of {missing:?}")]
    MilestonesMissing { missing: Milestones, mode: GateMode },
}

impl GameError for AdvanceJobError {
    fn severity(&self) -> ErrorSeverity {
        use AdvanceJobError::*;
        match self {
            UnknownJob(_) => ErrorSeverity::Validation,
            CurrentJobMissing(_) => ErrorSeverity::Integrity,
            TierMismatch { .. }
            | WrongPredecessor { .. }
            | LevelTooLow { .. }
            | HardmodeRequired
            | MilestonesMissing { .. } => ErrorSeverity::Policy,
        }
    }

    fn error_code(&self) -> &'static str {
        use AdvanceJobError::*;
        match self {
            UnknownJob(_) => "JOB_UNKNOWN",
            CurrentJobMissing(_) => "JOB_CURRENT_MISSING",
            TierMismatch { .. } => "JOB_TIER_MISMATCH",
            WrongPredecessor { .. } => "JOB_WRONG_PREDECESSOR",
            LevelTooLow { .. } => "JOB_LEVEL_TOO_LOW",
            HardmodeRequired => "JOB_HARDMODE_REQUIRED",
            MilestonesMissing { .. } => "JOB_MILESTONES_MISSING",
        }
    }
}

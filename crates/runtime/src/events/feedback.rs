//! Player-facing notifications.

use progression_core::{
    CharacterId, ErrorSeverity, GameError, JobId, ProgressionEvent, SkillId, StatusKind,
};

/// Something a player should be told about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feedback {
    /// Level-up, job change or experience gain.
    Progression(ProgressionEvent),
    SkillLearned { skill: SkillId, rank: u8 },
    SkillsReset { refunded: u64 },
    StatusExpired(StatusKind),
    /// Pending points released and budget top-up granted on a job change.
    PointsReleased {
        job: JobId,
        stat_points: u32,
        skill_points: u64,
    },
    /// An operation was refused. `reason` is the human-readable message.
    Rejected {
        code: &'static str,
        severity: ErrorSeverity,
        reason: String,
    },
}

impl Feedback {
    pub fn rejected(error: &impl GameError) -> Self {
        Self::Rejected {
            code: error.error_code(),
            severity: error.severity(),
            reason: error.to_string(),
        }
    }
}

/// Receiver of player-facing feedback.
///
/// The session calls `notify` synchronously after each operation, so
/// implementations must be cheap.
pub trait FeedbackSink: Send + Sync {
    fn notify(&self, character: CharacterId, feedback: &Feedback);
}

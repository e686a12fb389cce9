//! Built-in feedback sinks.

use std::sync::Mutex;

use tracing::{error, info, warn};

use progression_core::{CharacterId, ErrorSeverity};

use super::{Feedback, FeedbackSink};

/// Writes feedback to the log.
///
/// Rejections are logged at `warn`, or `error` when they point at broken
/// content; everything else at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFeedback;

impl FeedbackSink for TracingFeedback {
    fn notify(&self, character: CharacterId, feedback: &Feedback) {
        match feedback {
            Feedback::Rejected {
                code,
                severity: ErrorSeverity::Integrity,
                reason,
            } => error!(target: "progression::feedback", %character, code, "{reason}"),
            Feedback::Rejected { code, reason, .. } => {
                warn!(target: "progression::feedback", %character, code, "{reason}")
            }
            Feedback::Progression(event) => {
                info!(target: "progression::feedback", %character, detail = ?event, "{event}")
            }
            other => info!(target: "progression::feedback", %character, ?other, "feedback"),
        }
    }
}

/// Keeps every notification; used by tests and replays.
#[derive(Debug, Default)]
pub struct CollectingFeedback {
    entries: Mutex<Vec<(CharacterId, Feedback)>>,
}

impl CollectingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns everything collected so far.
    pub fn take(&self) -> Vec<(CharacterId, Feedback)> {
        self.entries
            .lock()
            .map(|mut entries| std::mem::take(&mut *entries))
            .unwrap_or_default()
    }

    pub fn for_character(&self, character: CharacterId) -> Vec<Feedback> {
        self.entries
            .lock()
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(id, _)| *id == character)
                    .map(|(_, feedback)| feedback.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl FeedbackSink for CollectingFeedback {
    fn notify(&self, character: CharacterId, feedback: &Feedback) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((character, feedback.clone()));
        }
    }
}

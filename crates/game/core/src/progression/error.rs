use crate::error::{ErrorSeverity, GameError};

/// Reasons an experience award is refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum XpRejection {
    /// Only the authoritative participant applies experience; remote requests
    /// are forwarded instead.
    #[error("experience can only be applied by the authoritative side")]
    NotAuthoritative,

    #[error(
        "monster level {monster_level} is more than {max_gap} above character level {character_level}"
    )]
    AntiBoost {
        monster_level: u32,
        character_level: u32,
        max_gap: i32,
    },
}

impl GameError for XpRejection {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Policy
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotAuthoritative => "XP_NOT_AUTHORITATIVE",
            Self::AntiBoost { .. } => "XP_ANTI_BOOST",
        }
    }
}

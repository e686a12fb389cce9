//! Skill learn/use/hotbar rejections.

use crate::common::{JobId, SkillId};
use crate::error::{ErrorSeverity, GameError};
use crate::stats::ResourceKind;
use crate::status::StatusKind;

use super::UseCondition;

/// Reasons a `LearnSkill` request is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LearnError {
    #[error("unknown skill '{0}'")]
    UnknownSkill(SkillId),

    /// The skill names a job the registry does not know.
    #[error("skill '{skill}' requires unregistered job '{job}'")]
    UnknownJob { skill: SkillId, job: JobId },

    #[error("'{skill}' is already at max rank {max_rank}")]
    MaxRank { skill: SkillId, max_rank: u8 },

    #[error("'{skill}' belongs to job '{required}'")]
    JobLocked { skill: SkillId, required: JobId },

    #[error("requires level {required} (currently {current})")]
    LevelTooLow { required: u32, current: u32 },

    #[error("requires '{prerequisite}' rank {required} (currently {current})")]
    PrerequisiteUnmet {
        prerequisite: SkillId,
        required: u8,
        current: u8,
    },

    #[error("not enough skill points: need {needed}, have {available}")]
    InsufficientPoints { needed: u32, available: u32 },
}

impl GameError for LearnError {
    fn severity(&self) -> ErrorSeverity {
        use LearnError::*;
        match self {
            UnknownSkill(_) => ErrorSeverity::Validation,
            UnknownJob { .. } => ErrorSeverity::Integrity,
            MaxRank { .. }
            | JobLocked { .. }
            | LevelTooLow { .. }
            | PrerequisiteUnmet { .. }
            | InsufficientPoints { .. } => ErrorSeverity::Policy,
        }
    }

    fn error_code(&self) -> &'static str {
        use LearnError::*;
        match self {
            UnknownSkill(_) => "LEARN_UNKNOWN_SKILL",
            UnknownJob { .. } => "LEARN_UNKNOWN_JOB",
            MaxRank { .. } => "LEARN_MAX_RANK",
            JobLocked { .. } => "LEARN_JOB_LOCKED",
            LevelTooLow { .. } => "LEARN_LEVEL_TOO_LOW",
            PrerequisiteUnmet { .. } => "LEARN_PREREQUISITE_UNMET",
            InsufficientPoints { .. } => "LEARN_INSUFFICIENT_POINTS",
        }
    }
}

/// Reasons a `UseSkill` request is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UseSkillError {
    #[error("skill '{0}' is not learned")]
    NotLearned(SkillId),

    /// Learned, but the definition disappeared from the registry.
    #[error("learned skill '{0}' is not registered")]
    DefinitionMissing(SkillId),

    #[error("'{0}' is passive")]
    Passive(SkillId),

    #[error("'{skill}' is on cooldown ({remaining_ticks} ticks left)")]
    OnCooldown { skill: SkillId, remaining_ticks: u64 },

    #[error("not enough {resource:?}: need {needed}, have {available}")]
    InsufficientResource {
        resource: ResourceKind,
        needed: u32,
        available: u32,
    },

    #[error("'{skill}' cannot be used now ({condition:?})")]
    ConditionUnmet {
        skill: SkillId,
        condition: UseCondition,
    },

    #[error("'{skill}' would apply {status:?} but every status slot is taken")]
    StatusesFull { skill: SkillId, status: StatusKind },

    #[error("hotbar slot {0} is empty")]
    EmptySlot(usize),

    #[error("hotbar slot {0} does not exist")]
    InvalidSlot(usize),
}

impl GameError for UseSkillError {
    fn severity(&self) -> ErrorSeverity {
        use UseSkillError::*;
        match self {
            NotLearned(_) | EmptySlot(_) | InvalidSlot(_) => ErrorSeverity::Validation,
            DefinitionMissing(_) => ErrorSeverity::Integrity,
            Passive(_)
            | OnCooldown { .. }
            | InsufficientResource { .. }
            | ConditionUnmet { .. }
            | StatusesFull { .. } => ErrorSeverity::Policy,
        }
    }

    fn error_code(&self) -> &'static str {
        use UseSkillError::*;
        match self {
            NotLearned(_) => "USE_NOT_LEARNED",
            DefinitionMissing(_) => "USE_DEFINITION_MISSING",
            Passive(_) => "USE_PASSIVE",
            OnCooldown { .. } => "USE_ON_COOLDOWN",
            InsufficientResource { .. } => "USE_INSUFFICIENT_RESOURCE",
            ConditionUnmet { .. } => "USE_CONDITION_UNMET",
            StatusesFull { .. } => "USE_STATUSES_FULL",
            EmptySlot(_) => "USE_EMPTY_SLOT",
            InvalidSlot(_) => "USE_INVALID_SLOT",
        }
    }
}

/// Reasons a hotbar binding is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HotbarError {
    #[error("hotbar slot {slot} does not exist (max {max})")]
    InvalidSlot { slot: usize, max: usize },

    #[error("skill '{0}' is not learned")]
    NotLearned(SkillId),

    #[error("'{0}' is passive and cannot be bound")]
    Passive(SkillId),
}

impl GameError for HotbarError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidSlot { .. } | Self::NotLearned(_) => ErrorSeverity::Validation,
            Self::Passive(_) => ErrorSeverity::Policy,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSlot { .. } => "HOTBAR_INVALID_SLOT",
            Self::NotLearned(_) => "HOTBAR_NOT_LEARNED",
            Self::Passive(_) => "HOTBAR_PASSIVE",
        }
    }
}

//! Content validation errors raised while building the registries.

use crate::common::{JobId, SkillId};
use crate::error::{ErrorSeverity, GameError};

/// Malformed content. Raised once at startup, never during play.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    // ===== jobs =====
    #[error("job '{0}' is defined twice")]
    DuplicateJob(JobId),

    #[error("novice job '{0}' must not have a predecessor")]
    RootWithPredecessor(JobId),

    #[error("job '{0}' has no predecessor")]
    MissingPredecessor(JobId),

    #[error("job '{job}' names unknown predecessor '{predecessor}'")]
    UnknownPredecessor { job: JobId, predecessor: JobId },

    #[error("predecessor '{predecessor}' of '{job}' is not exactly one tier below")]
    PredecessorTier { job: JobId, predecessor: JobId },

    #[error("no novice job to act as root")]
    NoRootJob,

    // ===== skills =====
    #[error("skill '{0}' is defined twice")]
    DuplicateSkill(SkillId),

    #[error("skill '{0}' must have max_rank >= 1")]
    InvalidMaxRank(SkillId),

    #[error("skill '{0}' lists itself as a prerequisite")]
    SelfPrerequisite(SkillId),

    #[error("skill '{skill}' names unknown prerequisite '{prerequisite}'")]
    UnknownPrerequisite { skill: SkillId, prerequisite: SkillId },

    #[error(
        "skill '{skill}' requires '{prerequisite}' rank {min_rank}, which allows 1..={max_rank}"
    )]
    PrerequisiteRank {
        skill: SkillId,
        prerequisite: SkillId,
        min_rank: u8,
        max_rank: u8,
    },

    #[error("prerequisite cycle through skill '{0}'")]
    PrerequisiteCycle(SkillId),

    // ===== cross references =====
    #[error("skill '{skill}' requires unknown job '{job}'")]
    UnknownSkillJob { skill: SkillId, job: JobId },

    #[error("job '{job}' unlocks unknown skill '{skill}'")]
    UnknownJobSkill { job: JobId, skill: SkillId },

    #[error("job '{job}' unlocks skill '{skill}' of a job outside its lineage")]
    ForeignJobSkill { job: JobId, skill: SkillId },
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Integrity
    }

    fn error_code(&self) -> &'static str {
        use RegistryError::*;
        match self {
            DuplicateJob(_) => "REGISTRY_DUPLICATE_JOB",
            RootWithPredecessor(_) => "REGISTRY_ROOT_WITH_PREDECESSOR",
            MissingPredecessor(_) => "REGISTRY_MISSING_PREDECESSOR",
            UnknownPredecessor { .. } => "REGISTRY_UNKNOWN_PREDECESSOR",
            PredecessorTier { .. } => "REGISTRY_PREDECESSOR_TIER",
            NoRootJob => "REGISTRY_NO_ROOT_JOB",
            DuplicateSkill(_) => "REGISTRY_DUPLICATE_SKILL",
            InvalidMaxRank(_) => "REGISTRY_INVALID_MAX_RANK",
            SelfPrerequisite(_) => "REGISTRY_SELF_PREREQUISITE",
            UnknownPrerequisite { .. } => "REGISTRY_UNKNOWN_PREREQUISITE",
            PrerequisiteRank { .. } => "REGISTRY_PREREQUISITE_RANK",
            PrerequisiteCycle(_) => "REGISTRY_PREREQUISITE_CYCLE",
            UnknownSkillJob { .. } => "REGISTRY_UNKNOWN_SKILL_JOB",
            UnknownJobSkill { .. } => "REGISTRY_UNKNOWN_JOB_SKILL",
            ForeignJobSkill { .. } => "REGISTRY_FOREIGN_JOB_SKILL",
        }
    }
}

//! Unified error types surfaced by the runtime API.
//!
//! Wraps rejections from the progression rules, repositories and content
//! loading so callers can bubble them up with consistent context. Every
//! variant keeps the severity of the error it wraps.
use thiserror::Error;

use progression_core::{
    AdvanceJobError, AllocateError, CharacterId, ErrorSeverity, GameError, HotbarError,
    LearnError, UseSkillError, XpRejection,
};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("character {0} is not part of this session")]
    UnknownCharacter(CharacterId),

    #[error("character {0} already joined this session")]
    DuplicateCharacter(CharacterId),

    #[error("only the authoritative session may {0}")]
    NotAuthoritative(&'static str),

    #[error(transparent)]
    Experience(#[from] XpRejection),

    #[error(transparent)]
    AdvanceJob(#[from] AdvanceJobError),

    #[error(transparent)]
    Learn(#[from] LearnError),

    #[error(transparent)]
    UseSkill(#[from] UseSkillError),

    #[error(transparent)]
    Hotbar(#[from] HotbarError),

    #[error(transparent)]
    Allocate(#[from] AllocateError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("failed to load content: {0}")]
    Content(String),

    #[error("malformed message: {0}")]
    Message(String),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        use RuntimeError::*;
        match self {
            UnknownCharacter(_) | DuplicateCharacter(_) | Message(_) => ErrorSeverity::Validation,
            NotAuthoritative(_) => ErrorSeverity::Policy,
            Experience(e) => e.severity(),
            AdvanceJob(e) => e.severity(),
            Learn(e) => e.severity(),
            UseSkill(e) => e.severity(),
            Hotbar(e) => e.severity(),
            Allocate(e) => e.severity(),
            Repository(e) => e.severity(),
            Content(_) => ErrorSeverity::Integrity,
        }
    }

    fn error_code(&self) -> &'static str {
        use RuntimeError::*;
        match self {
            UnknownCharacter(_) => "RUNTIME_UNKNOWN_CHARACTER",
            DuplicateCharacter(_) => "RUNTIME_DUPLICATE_CHARACTER",
            NotAuthoritative(_) => "RUNTIME_NOT_AUTHORITATIVE",
            Experience(e) => e.error_code(),
            AdvanceJob(e) => e.error_code(),
            Learn(e) => e.error_code(),
            UseSkill(e) => e.error_code(),
            Hotbar(e) => e.error_code(),
            Allocate(e) => e.error_code(),
            Repository(e) => e.error_code(),
            Content(_) => "RUNTIME_CONTENT",
            Message(_) => "RUNTIME_MESSAGE",
        }
    }
}

//! Skill registry and per-character skill manager.
//!
//! Definitions are shared and never copied per character; a character's
//! [`SkillManager`] only stores `(id, rank, cooldown)` and resolves everything
//! else against the registry.
mod definition;
mod effect;
mod error;
mod manager;
mod registry;

pub use definition::{Prerequisite, SkillCategory, SkillDefinition, UseCondition};
pub use effect::{ActivationEffect, ModifierTotals, RankScaled, SkillEffect};
pub use error::{HotbarError, LearnError, UseSkillError};
pub use manager::{
    LearnContext, LearnedSkill, SkillActivation, SkillManager, SkillUpgrade, UseContext,
};
pub use registry::{SkillCostSummary, SkillRegistry};

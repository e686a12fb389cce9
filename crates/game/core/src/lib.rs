//! Deterministic character progression rules shared by every participant.
//!
//! `progression-core` defines the canonical progression logic (experience
//! curve, job tree, skill ranks, monster level assignment) as pure,
//! synchronous APIs. Content is loaded once into a [`Catalog`] and shared by
//! reference; all per-character mutation flows through [`Character`].
pub mod catalog;
pub mod character;
pub mod common;
pub mod config;
pub mod error;
pub mod formula;
pub mod jobs;
pub mod progression;
pub mod rng;
pub mod save;
pub mod skills;
pub mod stats;
pub mod status;
pub mod world;

#[cfg(test)]
mod testkit;

pub use catalog::{Catalog, RegistryError};
pub use character::{
    Character, CooldownSources, ExternalModifiers, JobAdvance, TickReport, XpOutcome,
};
pub use common::{CharacterId, JobId, SkillId, Tick};
pub use config::ProgressionConfig;
pub use error::{ErrorSeverity, GameError};
pub use formula::Multiplier;
pub use jobs::{
    AdvanceJobError, GateMode, JobDefinition, JobRegistry, JobTier, JobUnlockRequirement,
};
pub use progression::{
    Authority, ComboTracker, LevelUp, ProgressionEvent, ProgressionState, XpBreakdown, XpGrant,
    XpRejection, XpSource,
};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use save::{CharacterSave, LoadIssue};
pub use skills::{
    ActivationEffect, HotbarError, LearnError, LearnedSkill, ModifierTotals, Prerequisite,
    RankScaled, SkillActivation, SkillCategory, SkillDefinition, SkillEffect, SkillManager,
    SkillRegistry, SkillUpgrade, UseCondition, UseSkillError,
};
pub use stats::{AllocateError, ResourceKind, ResourceMeter, ResourcePools, StatBlock, StatKind};
pub use status::{ActiveStatus, StatusEffects, StatusKind};
pub use world::{
    BiomeCategory, BiomeLevelProfile, BiomeTable, DepthBand, LevelAssigner, LevelAssignment,
    LevelSource, Milestones, SpawnContext, WorldEvent, WorldLayout, WorldPosition, WorldProgress,
    WorldStage, ZoneFlags,
};

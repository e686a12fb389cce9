//! Skill definitions.

use crate::common::{JobId, SkillId};
use crate::config::ProgressionConfig;
use crate::formula::{Multiplier, scaled_resource_cost};
use crate::stats::ResourceKind;
use crate::status::StatusKind;

use super::SkillEffect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillCategory {
    /// Used explicitly; may carry a cooldown and a resource cost.
    #[default]
    Active,
    /// Always on once learned; contributes modifiers every tick.
    Passive,
    /// Used explicitly; applies a timed status.
    TimedBuff,
}

/// A learned skill that must reach `min_rank` before the dependent skill can be learned.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Prerequisite {
    pub skill: SkillId,
    pub min_rank: u8,
}

impl Prerequisite {
    pub fn new(skill: impl Into<SkillId>, min_rank: u8) -> Self {
        Self {
            skill: skill.into(),
            min_rank,
        }
    }
}

/// Extra condition a skill checks at use time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UseCondition {
    /// Current health must be strictly below this percent of the maximum.
    HealthBelowPercent(u8),
    RequiresStatus(StatusKind),
    ForbidsStatus(StatusKind),
}

/// Immutable skill definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub category: SkillCategory,
    pub required_job: JobId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_level: u32,
    /// Skill points per rank.
    pub point_cost: u32,
    pub max_rank: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown_ms: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resource: ResourceKind,
    /// Resource cost at rank 1.
    #[cfg_attr(feature = "serde", serde(default))]
    pub resource_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prerequisites: Vec<Prerequisite>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<SkillEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub usable_when: Option<UseCondition>,
}

impl SkillDefinition {
    pub fn is_passive(&self) -> bool {
        self.category == SkillCategory::Passive
    }

    /// Points needed to go from rank 0 to `max_rank`.
    pub fn cost_to_max(&self) -> u64 {
        self.point_cost as u64 * self.max_rank as u64
    }

    /// Points spent to reach `rank`.
    pub fn cost_to_rank(&self, rank: u8) -> u64 {
        self.point_cost as u64 * rank.min(self.max_rank) as u64
    }

    pub fn resource_cost_at(&self, rank: u8, growth: Multiplier) -> u32 {
        if self.resource == ResourceKind::None {
            return 0;
        }
        scaled_resource_cost(self.resource_cost, rank, growth)
    }

    /// Base cooldown in ticks before reduction.
    pub fn cooldown_ticks(&self) -> u64 {
        ProgressionConfig::ms_to_ticks(self.cooldown_ms)
    }
}

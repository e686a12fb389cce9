//! Job definitions and unlock requirements.

use strum::{EnumCount, EnumIter, IntoStaticStr};

use crate::common::{JobId, SkillId};
use crate::stats::StatKind;
use crate::world::{Milestones, WorldProgress};

use super::AdvanceJobError;

/// Ordinal rank of job progression. Each tier has its own level cap.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    EnumCount,
    EnumIter,
    IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JobTier {
    #[default]
    Novice,
    Tier1,
    Tier2,
    Tier3,
}

impl JobTier {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> Option<JobTier> {
        match self {
            Self::Novice => Some(Self::Tier1),
            Self::Tier1 => Some(Self::Tier2),
            Self::Tier2 => Some(Self::Tier3),
            Self::Tier3 => None,
        }
    }

    pub const fn previous(self) -> Option<JobTier> {
        match self {
            Self::Novice => None,
            Self::Tier1 => Some(Self::Novice),
            Self::Tier2 => Some(Self::Tier1),
            Self::Tier3 => Some(Self::Tier2),
        }
    }
}

/// How the milestone gate of a requirement is evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GateMode {
    /// Every gate milestone must be defeated.
    #[default]
    All,
    /// At least one gate milestone must be defeated.
    Any,
}

/// Conditions for advancing into a job.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct JobUnlockRequirement {
    pub min_level: u32,
    /// Job the character must currently hold. `None` only for the root job.
    pub predecessor: Option<JobId>,
    pub requires_hardmode: bool,
    /// Milestones checked according to `gate_mode`. Empty means no gate.
    pub gates: Milestones,
    pub gate_mode: GateMode,
}

impl JobUnlockRequirement {
    /// Whether the milestone gate passes for `milestones`.
    pub fn gates_satisfied(&self, milestones: Milestones) -> bool {
        if self.gates.is_empty() {
            return true;
        }
        match self.gate_mode {
            GateMode::All => milestones.contains(self.gates),
            GateMode::Any => milestones.intersects(self.gates),
        }
    }

    /// Checks everything except the tier relationship, in a fixed order so the
    /// first unmet condition is always the one reported.
    pub fn check(
        &self,
        level: u32,
        current_job: &JobId,
        world: &WorldProgress,
    ) -> Result<(), AdvanceJobError> {
        if let Some(required) = &self.predecessor
            && required != current_job
        {
            return Err(AdvanceJobError::WrongPredecessor {
                required: required.clone(),
                current: current_job.clone(),
            });
        }
        if level < self.min_level {
            return Err(AdvanceJobError::LevelTooLow {
                required: self.min_level,
                current: level,
            });
        }
        if self.requires_hardmode && !world.is_hardmode() {
            return Err(AdvanceJobError::HardmodeRequired);
        }
        if !self.gates_satisfied(world.milestones()) {
            return Err(AdvanceJobError::MilestonesMissing {
                missing: self.gates.difference(world.milestones()),
                mode: self.gate_mode,
            });
        }
        Ok(())
    }
}

/// A tiered character archetype.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobDefinition {
    pub id: JobId,
    pub tier: JobTier,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Flat stat deltas granted while this job is held.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stat_bonuses: Vec<(StatKind, i32)>,
    /// Stats that receive auto-growth points on level-up.
    #[cfg_attr(feature = "serde", serde(default))]
    pub growth: Vec<StatKind>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requirement: JobUnlockRequirement,
    /// Skills unlocked by reaching this job, in display order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<SkillId>,
}

impl JobDefinition {
    pub fn stat_bonus(&self, stat: StatKind) -> i32 {
        self.stat_bonuses
            .iter()
            .filter(|(kind, _)| *kind == stat)
            .map(|(_, amount)| amount)
            .sum()
    }
}

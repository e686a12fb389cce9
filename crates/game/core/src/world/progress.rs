//! World progress: defeated milestones, the derived world stage and world level.
//!
//! Written only by the authoritative boss-kill/world-event path and the admin
//! surface; read by level assignment and job unlock checks.

use bitflags::bitflags;
use strum::{EnumCount, EnumIter, IntoStaticStr};

bitflags! {
    /// Milestone bosses defeated in this world.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Milestones: u16 {
        const EYE_BOSS = 1 << 0;
        const EVIL_BOSS = 1 << 1;
        const DUNGEON_BOSS = 1 << 2;
        /// Defeating the underworld wall flips the world into hardmode.
        const UNDERWORLD_WALL = 1 << 3;
        const MECH_BOSS_1 = 1 << 4;
        const MECH_BOSS_2 = 1 << 5;
        const MECH_BOSS_3 = 1 << 6;
        const JUNGLE_BOSS = 1 << 7;
        const TEMPLE_BOSS = 1 << 8;
        const LUNAR_BOSS = 1 << 9;

        const ANY_MECH = Self::MECH_BOSS_1.bits() | Self::MECH_BOSS_2.bits() | Self::MECH_BOSS_3.bits();
    }
}

impl Milestones {
    /// World-level weight of each milestone.
    const WEIGHTS: [(Milestones, u32); 10] = [
        (Milestones::EYE_BOSS, 2),
        (Milestones::EVIL_BOSS, 3),
        (Milestones::DUNGEON_BOSS, 4),
        (Milestones::UNDERWORLD_WALL, 8),
        (Milestones::MECH_BOSS_1, 3),
        (Milestones::MECH_BOSS_2, 3),
        (Milestones::MECH_BOSS_3, 3),
        (Milestones::JUNGLE_BOSS, 5),
        (Milestones::TEMPLE_BOSS, 5),
        (Milestones::LUNAR_BOSS, 10),
    ];

    /// Weighted sum of the defeated milestones.
    pub fn weight(self) -> u32 {
        Self::WEIGHTS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, weight)| weight)
            .sum()
    }
}

/// Four coarse stages of world progression; biome caps are indexed by stage.
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
pub enum WorldStage {
    #[default]
    PreHardmode,
    EarlyHardmode,
    PostMechanical,
    Endgame,
}

impl WorldStage {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_milestones(milestones: Milestones) -> Self {
        if !milestones.contains(Milestones::UNDERWORLD_WALL) {
            Self::PreHardmode
        } else if milestones.contains(Milestones::TEMPLE_BOSS) {
            Self::Endgame
        } else if milestones.intersects(Milestones::ANY_MECH) {
            Self::PostMechanical
        } else {
            Self::EarlyHardmode
        }
    }

    pub const fn is_hardmode(self) -> bool {
        !matches!(self, Self::PreHardmode)
    }
}

/// Global world-progress inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldProgress {
    milestones: Milestones,
    world_level: u32,
    active_event: Option<WorldEvent>,
}

impl WorldProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Progress with the given milestones and a world level derived from them.
    pub fn from_milestones(milestones: Milestones) -> Self {
        let mut progress = Self {
            milestones,
            ..Self::default()
        };
        progress.recalculate_level();
        progress
    }

    pub fn milestones(&self) -> Milestones {
        self.milestones
    }

    pub fn world_level(&self) -> u32 {
        self.world_level
    }

    pub fn stage(&self) -> WorldStage {
        WorldStage::from_milestones(self.milestones)
    }

    pub fn is_hardmode(&self) -> bool {
        self.milestones.contains(Milestones::UNDERWORLD_WALL)
    }

    pub fn active_event(&self) -> Option<WorldEvent> {
        self.active_event
    }

    /// Marks milestones defeated. Milestones are never un-set, so the world
    /// level only moves up. Returns true if anything new was recorded.
    pub fn record_milestone(&mut self, milestone: Milestones) -> bool {
        if self.milestones.contains(milestone) {
            return false;
        }
        self.milestones.insert(milestone);
        self.world_level = self.world_level.max(self.milestones.weight());
        true
    }

    /// Admin override of both inputs.
    pub fn set(&mut self, milestones: Milestones, world_level: u32) {
        self.milestones = milestones;
        self.world_level = world_level;
    }

    /// Re-derives the world level from milestones; idempotent.
    pub fn recalculate_level(&mut self) -> u32 {
        self.world_level = self.milestones.weight();
        self.world_level
    }

    pub fn set_event(&mut self, event: Option<WorldEvent>) {
        self.active_event = event;
    }
}

/// World-wide events whose biome profile overrides positional detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorldEvent {
    BloodMoon,
    GoblinArmy,
    PirateInvasion,
    SolarEclipse,
    PumpkinMoon,
    FrostMoon,
    MartianMadness,
    LunarPillars,
}

//! Progression configuration constants and tunable parameters.
//!
//! Breakpoints of the level-difference curve are fixed by the engine; the
//! multipliers attached to each band, and every other ratio below, are tuning
//! data and can be overridden from `config.toml`.

use strum::EnumCount;

use crate::formula::Multiplier;
use crate::jobs::JobTier;

/// Game configuration for the progression engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ProgressionConfig {
    /// Highest reachable character level.
    pub max_level: u32,
    /// Required-XP curve coefficients.
    pub experience: ExperienceCurve,
    /// Multipliers for each band of `monster_level - character_level`.
    pub level_difference: LevelDifferenceCurve,
    /// Extra multipliers for boss and event kills.
    pub sources: SourceBonuses,
    /// Server-wide XP rate.
    pub global_xp: Multiplier,
    /// Consecutive sweet-spot kill bonus.
    pub combo: ComboConfig,
    /// Bonus/throttle depending on the distance to `max_level`.
    pub cap_proximity: CapProximity,
    /// Kills of monsters more than this many levels above the character award nothing.
    pub anti_boost_gap: i32,
    /// Minimum XP for a monster kill: `min_xp_base + min_xp_per_level * monster_level`.
    pub min_xp_base: u64,
    pub min_xp_per_level: u64,
    /// Per-tier level caps and point multipliers.
    pub tiers: TierTable,
    /// Points granted on every level-up before tier scaling.
    pub points: PointGrants,
    pub cooldown: CooldownConfig,
    pub biome: BiomeScaling,
    pub regen: RegenConfig,
}

impl ProgressionConfig {
    // ===== compile-time constants =====
    /// Fixed rate of the host game loop.
    pub const TICKS_PER_SECOND: u64 = 60;
    pub const HOTBAR_SLOTS: usize = 10;
    pub const MAX_STATUS_EFFECTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_LEVEL: u32 = 200;
    pub const DEFAULT_ANTI_BOOST_GAP: i32 = 20;

    pub fn new() -> Self {
        Self {
            max_level: Self::DEFAULT_MAX_LEVEL,
            experience: ExperienceCurve::default(),
            level_difference: LevelDifferenceCurve::default(),
            sources: SourceBonuses::default(),
            global_xp: Multiplier::ONE,
            combo: ComboConfig::default(),
            cap_proximity: CapProximity::default(),
            anti_boost_gap: Self::DEFAULT_ANTI_BOOST_GAP,
            min_xp_base: 5,
            min_xp_per_level: 2,
            tiers: TierTable::default(),
            points: PointGrants::default(),
            cooldown: CooldownConfig::default(),
            biome: BiomeScaling::default(),
            regen: RegenConfig::default(),
        }
    }

    /// Converts milliseconds into whole ticks (rounded down).
    pub const fn ms_to_ticks(ms: u32) -> u64 {
        (ms as u64) * Self::TICKS_PER_SECOND / 1_000
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// `required(L) = base * L^2 + late_coefficient * (L - late_start)^3` for `L > late_start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ExperienceCurve {
    pub base: u64,
    pub late_start: u32,
    pub late_coefficient: u64,
}

impl Default for ExperienceCurve {
    fn default() -> Self {
        Self {
            base: 10,
            late_start: 100,
            late_coefficient: 2,
        }
    }
}

/// Multipliers applied per band of level difference (`monster - character`).
///
/// Bands: `>= +15` heavy, `+10..=+14` high, `+7..=+9` mild, `+5..=+6` neutral,
/// `+1..=+4` sweet spot, `0..=-2` parity, `-3..=-5` near, `-6..=-7`,
/// `-8..=-10`, then a per-level taper down to `floor`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct LevelDifferenceCurve {
    /// Applied on top of every band.
    pub global_uplift: Multiplier,
    pub heavy_penalty: Multiplier,
    pub high_penalty: Multiplier,
    pub mild_penalty: Multiplier,
    /// Index 0 is `+1`, index 3 is `+4`.
    pub sweet_spot: [Multiplier; 4],
    /// Index 0 is `0`, index 2 is `-2`.
    pub parity: [Multiplier; 3],
    pub near_below: Multiplier,
    pub below_seven: Multiplier,
    pub below_ten: Multiplier,
    /// Removed per level beyond `-10`.
    pub taper_per_level: Multiplier,
    pub floor: Multiplier,
}

impl Default for LevelDifferenceCurve {
    fn default() -> Self {
        Self {
            global_uplift: Multiplier::from_percent(135),
            heavy_penalty: Multiplier::from_percent(15),
            high_penalty: Multiplier::from_percent(40),
            mild_penalty: Multiplier::from_percent(75),
            sweet_spot: [
                Multiplier::from_percent(110),
                Multiplier::from_percent(120),
                Multiplier::from_percent(130),
                Multiplier::from_percent(140),
            ],
            parity: [
                Multiplier::ONE,
                Multiplier::from_bps(9_750),
                Multiplier::from_bps(9_500),
            ],
            near_below: Multiplier::from_percent(85),
            below_seven: Multiplier::from_percent(70),
            below_ten: Multiplier::from_percent(50),
            taper_per_level: Multiplier::from_bps(300),
            floor: Multiplier::from_percent(20),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SourceBonuses {
    pub boss: Multiplier,
    pub event: Multiplier,
}

impl Default for SourceBonuses {
    fn default() -> Self {
        Self {
            boss: Multiplier::from_percent(150),
            event: Multiplier::from_percent(125),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ComboConfig {
    /// Rolling window measured from the previous sweet-spot kill.
    pub window_ticks: u64,
    /// Growth per consecutive sweet-spot kill after the first.
    pub step: Multiplier,
    pub max: Multiplier,
}

impl Default for ComboConfig {
    fn default() -> Self {
        Self {
            window_ticks: 10 * ProgressionConfig::TICKS_PER_SECOND,
            step: Multiplier::from_bps(1_000),
            max: Multiplier::from_percent(150),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CapProximity {
    /// Levels below `max_level` at which the catch-up bonus starts.
    pub far_gap: u32,
    pub far_bonus: Multiplier,
    /// Levels below `max_level` at which XP is throttled.
    pub near_gap: u32,
    pub near_throttle: Multiplier,
}

impl Default for CapProximity {
    fn default() -> Self {
        Self {
            far_gap: 20,
            far_bonus: Multiplier::from_percent(110),
            near_gap: 3,
            near_throttle: Multiplier::from_percent(50),
        }
    }
}

/// Level caps and point multipliers indexed by [`JobTier`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TierTable {
    pub level_caps: [u32; JobTier::COUNT],
    pub stat_point_multiplier: [Multiplier; JobTier::COUNT],
    pub skill_point_multiplier: [Multiplier; JobTier::COUNT],
    /// Cooldown reduction (percent) every job of the tier grants.
    pub cooldown_reduction_percent: [u32; JobTier::COUNT],
}

impl TierTable {
    pub fn level_cap(&self, tier: JobTier) -> u32 {
        self.level_caps[tier.index()]
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            level_caps: [10, 50, 100, 200],
            stat_point_multiplier: [
                Multiplier::ONE,
                Multiplier::ONE,
                Multiplier::from_percent(125),
                Multiplier::from_percent(150),
            ],
            skill_point_multiplier: [
                Multiplier::ONE,
                Multiplier::ONE,
                Multiplier::ONE,
                Multiplier::from_percent(200),
            ],
            cooldown_reduction_percent: [0, 0, 5, 10],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PointGrants {
    pub stat_points_per_level: u32,
    pub skill_points_per_level: u32,
    /// When set, each level also adds `auto_points_per_level` to every growth stat of the job.
    pub auto_growth: bool,
    pub auto_points_per_level: u32,
}

impl Default for PointGrants {
    fn default() -> Self {
        Self {
            stat_points_per_level: 4,
            skill_points_per_level: 1,
            auto_growth: true,
            auto_points_per_level: 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CooldownConfig {
    /// Global ceiling for the summed reduction.
    pub max_reduction_percent: u32,
    /// One percent of reduction per this many points of Intelligence + Dexterity.
    pub stat_points_per_percent: u32,
    /// Rank cost growth: each rank above the first adds this much to the base resource cost.
    pub cost_growth_per_rank: Multiplier,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            max_reduction_percent: 50,
            stat_points_per_percent: 20,
            cost_growth_per_rank: Multiplier::from_percent(10),
        }
    }
}

/// Global tuning for monster level assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BiomeScaling {
    pub cap_scale: Multiplier,
    pub floor_scale: Multiplier,
    /// Width of the uniform sampling window above the floor.
    pub range_width: u32,
}

impl Default for BiomeScaling {
    fn default() -> Self {
        Self {
            cap_scale: Multiplier::ONE,
            floor_scale: Multiplier::ONE,
            range_width: 5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RegenConfig {
    pub interval_ticks: u64,
    /// Percent of the maximum restored every interval.
    pub health_percent: u32,
    pub primary_percent: u32,
    pub secondary_percent: u32,
}

impl Default for RegenConfig {
    fn default() -> Self {
        Self {
            interval_ticks: ProgressionConfig::TICKS_PER_SECOND,
            health_percent: 1,
            primary_percent: 2,
            secondary_percent: 5,
        }
    }
}

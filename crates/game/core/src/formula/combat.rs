//! Combat-facing derived numbers: damage and crit bonuses, pool maxima, costs and cooldowns.
//!
//! Formulas:
//! - damage bonus % = primary / 2 + tier * 5
//! - crit chance %  = luck / 5 + dexterity / 10
//! - Health max     = 100 + VIT * 10 + level * 5
//! - Primary max    = 20 + INT * 5 + level * 2
//! - Secondary max  = 50 + AGI * 3 + level

use crate::jobs::JobTier;
use crate::stats::ResourceKind;

use super::Multiplier;

/// Percent damage bonus from the governing stat total and the job tier.
pub fn damage_bonus_percent(primary_stat_total: i64, tier: JobTier) -> i64 {
    primary_stat_total.max(0) / 2 + (tier.index() as i64) * 5
}

pub fn crit_chance_percent(luck: i64, dexterity: i64) -> i64 {
    (luck.max(0) / 5 + dexterity.max(0) / 10).min(100)
}

/// Base maximum of a resource pool before passive bonuses.
pub fn resource_maximum(kind: ResourceKind, governing_stat: i64, level: u32) -> u32 {
    let stat = governing_stat.max(0);
    let level = level as i64;
    let value = match kind {
        ResourceKind::Health => 100 + stat * 10 + level * 5,
        ResourceKind::Primary => 20 + stat * 5 + level * 2,
        ResourceKind::Secondary => 50 + stat * 3 + level,
        ResourceKind::None => 0,
    };
    value.clamp(0, u32::MAX as i64) as u32
}

/// Resource cost at `rank`: every rank above the first adds `growth` of the base cost.
pub fn scaled_resource_cost(base: u32, rank: u8, growth: Multiplier) -> u32 {
    let extra_ranks = rank.saturating_sub(1) as u32;
    let multiplier = Multiplier::ONE.plus_steps(growth, extra_ranks);
    multiplier.apply(base as u64).min(u32::MAX as u64) as u32
}

/// Cooldown reduction percent contributed by Intelligence + Dexterity.
pub fn stat_cooldown_reduction(intelligence: i64, dexterity: i64, points_per_percent: u32) -> u32 {
    if points_per_percent == 0 {
        return 0;
    }
    let total = (intelligence.max(0) + dexterity.max(0)) as u64;
    (total / points_per_percent as u64).min(u32::MAX as u64) as u32
}

/// Effective cooldown after reduction; never shorter than one tick.
pub fn actual_cooldown_ticks(base_ticks: u64, reduction_percent: u32) -> u64 {
    let reduction = reduction_percent.min(100) as u64;
    (base_ticks.saturating_mul(100 - reduction) / 100).max(1)
}

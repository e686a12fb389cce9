//! Point grants per level-up.

use crate::config::ProgressionConfig;
use crate::jobs::JobTier;

/// Stat points granted for one level-up while in a job of `tier`.
pub fn stat_points_for_level(tier: JobTier, config: &ProgressionConfig) -> u32 {
    let multiplier = config.tiers.stat_point_multiplier[tier.index()];
    multiplier.apply(config.points.stat_points_per_level as u64) as u32
}

/// Skill points granted for one level-up while in a job of `tier`.
pub fn skill_points_for_level(tier: JobTier, config: &ProgressionConfig) -> u32 {
    let multiplier = config.tiers.skill_point_multiplier[tier.index()];
    multiplier.apply(config.points.skill_points_per_level as u64) as u32
}

/// Automatic growth per growth stat for one level-up, zero when disabled.
pub fn auto_points_for_level(config: &ProgressionConfig) -> u32 {
    if config.points.auto_growth {
        config.points.auto_points_per_level
    } else {
        0
    }
}

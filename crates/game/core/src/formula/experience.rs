//! Experience formulas: level requirements, kill floors and the level-difference curve.

use crate::config::{CapProximity, ExperienceCurve, LevelDifferenceCurve, ProgressionConfig};

use super::Multiplier;

/// XP needed to advance from `level` to `level + 1`.
///
/// `base * L^2`, plus a cubic term once `L` passes `late_start`.
pub fn required_xp(level: u32, curve: &ExperienceCurve) -> u64 {
    let level = level.max(1) as u64;
    let mut required = curve.base.saturating_mul(level * level);
    let late_start = curve.late_start as u64;
    if level > late_start {
        let over = level - late_start;
        required = required.saturating_add(curve.late_coefficient.saturating_mul(over * over * over));
    }
    required.max(1)
}

/// Lowest XP a monster kill may award, before and after multipliers.
pub fn min_kill_xp(monster_level: u32, config: &ProgressionConfig) -> u64 {
    config
        .min_xp_base
        .saturating_add(config.min_xp_per_level.saturating_mul(monster_level as u64))
}

/// Multiplier for `diff = monster_level - character_level`, global uplift included.
pub fn level_difference_multiplier(diff: i32, curve: &LevelDifferenceCurve) -> Multiplier {
    let band = match diff {
        15.. => curve.heavy_penalty,
        10..=14 => curve.high_penalty,
        7..=9 => curve.mild_penalty,
        5..=6 => Multiplier::ONE,
        1..=4 => curve.sweet_spot[(diff - 1) as usize],
        -2..=0 => curve.parity[diff.unsigned_abs() as usize],
        -5..=-3 => curve.near_below,
        -7..=-6 => curve.below_seven,
        -10..=-8 => curve.below_ten,
        _ => {
            let beyond = diff.unsigned_abs() - 10;
            curve
                .below_ten
                .minus_steps(curve.taper_per_level, beyond)
                .max(curve.floor)
        }
    };
    band * curve.global_uplift
}

/// Catch-up bonus far below the level cap, throttle just below it, zero at it.
pub fn cap_proximity_multiplier(level: u32, max_level: u32, band: &CapProximity) -> Multiplier {
    if level >= max_level {
        return Multiplier::ZERO;
    }
    let gap = max_level - level;
    if gap >= band.far_gap {
        band.far_bonus
    } else if gap <= band.near_gap {
        band.near_throttle
    } else {
        Multiplier::ONE
    }
}

//! Formula library.
//!
//! Pure functions mapping levels, tiers and stat totals onto derived numbers.
//! Nothing here holds state; every other module depends on these.
mod combat;
mod experience;
mod multiplier;
mod points;

pub use combat::{
    actual_cooldown_ticks, crit_chance_percent, damage_bonus_percent, resource_maximum,
    scaled_resource_cost, stat_cooldown_reduction,
};
pub use experience::{
    cap_proximity_multiplier, level_difference_multiplier, min_kill_xp, required_xp,
};
pub use multiplier::Multiplier;
pub use points::{auto_points_for_level, skill_points_for_level, stat_points_for_level};

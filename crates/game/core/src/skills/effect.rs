//! Skill effect payloads and their single generic evaluator.
//!
//! Every skill's behaviour is data: a list of [`SkillEffect`] variants scaled
//! by rank. Continuous variants are summed into [`ModifierTotals`] (passives
//! every tick, statuses while active); activation variants are resolved into
//! [`ActivationEffect`]s when an active or timed-buff skill is used.

use strum::EnumCount;

use crate::common::Tick;
use crate::stats::{ResourceKind, StatKind};
use crate::status::StatusKind;

/// `base + per_rank * (rank - 1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct RankScaled {
    pub base: i32,
    pub per_rank: i32,
}

impl RankScaled {
    pub const fn new(base: i32, per_rank: i32) -> Self {
        Self { base, per_rank }
    }

    pub const fn flat(base: i32) -> Self {
        Self { base, per_rank: 0 }
    }

    pub fn at(self, rank: u8) -> i32 {
        let extra = rank.saturating_sub(1) as i32;
        self.base.saturating_add(self.per_rank.saturating_mul(extra))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    /// Percent damage.
    DamageBonus(RankScaled),
    /// Percent crit chance.
    CritBonus(RankScaled),
    /// Flat bonus to a pool maximum.
    ResourceBonus {
        resource: ResourceKind,
        amount: RankScaled,
    },
    StatBonus {
        stat: StatKind,
        amount: RankScaled,
    },
    /// Percent cooldown reduction.
    CooldownReduction(RankScaled),
    /// Percent bonus experience.
    ExperienceBonus(RankScaled),
    /// Applies a status carrying its own continuous effects.
    TimedStatus {
        status: StatusKind,
        duration_ms: RankScaled,
        #[cfg_attr(feature = "serde", serde(default))]
        effects: Vec<SkillEffect>,
    },
    AreaEffect {
        radius_tiles: u16,
        damage_percent: RankScaled,
    },
    /// Instantly refills part of a pool.
    Restore {
        resource: ResourceKind,
        amount: RankScaled,
    },
}

impl SkillEffect {
    /// Whether the effect contributes to [`ModifierTotals`].
    pub fn is_continuous(&self) -> bool {
        !matches!(
            self,
            Self::TimedStatus { .. } | Self::AreaEffect { .. } | Self::Restore { .. }
        )
    }
}

/// Summed continuous modifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierTotals {
    pub damage_percent: i64,
    pub crit_percent: i64,
    pub cooldown_reduction_percent: i64,
    pub experience_percent: i64,
    /// Indexed like [`ResourceKind::POOLS`].
    pub resource_max: [i64; 3],
    pub stats: [i32; StatKind::COUNT],
}

impl ModifierTotals {
    /// Adds one effect at `rank`; activation-only variants are ignored.
    pub fn accumulate(&mut self, effect: &SkillEffect, rank: u8) {
        match effect {
            SkillEffect::DamageBonus(value) => self.damage_percent += value.at(rank) as i64,
            SkillEffect::CritBonus(value) => self.crit_percent += value.at(rank) as i64,
            SkillEffect::CooldownReduction(value) => {
                self.cooldown_reduction_percent += value.at(rank) as i64
            }
            SkillEffect::ExperienceBonus(value) => {
                self.experience_percent += value.at(rank) as i64
            }
            SkillEffect::ResourceBonus { resource, amount } => {
                if let Some(index) = resource.pool_index() {
                    self.resource_max[index] += amount.at(rank) as i64;
                }
            }
            SkillEffect::StatBonus { stat, amount } => {
                let slot = &mut self.stats[stat.index()];
                *slot = slot.saturating_add(amount.at(rank));
            }
            SkillEffect::TimedStatus { .. }
            | SkillEffect::AreaEffect { .. }
            | SkillEffect::Restore { .. } => {}
        }
    }

    pub fn merge(&mut self, other: &ModifierTotals) {
        self.damage_percent += other.damage_percent;
        self.crit_percent += other.crit_percent;
        self.cooldown_reduction_percent += other.cooldown_reduction_percent;
        self.experience_percent += other.experience_percent;
        for (mine, theirs) in self.resource_max.iter_mut().zip(other.resource_max) {
            *mine += theirs;
        }
        for (mine, theirs) in self.stats.iter_mut().zip(other.stats) {
            *mine = mine.saturating_add(theirs);
        }
    }
}

/// What a successful skill use did, for the combat and presentation layers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActivationEffect {
    /// Damage and crit bonuses of this activation only.
    Strike { damage_percent: i32, crit_percent: i32 },
    Area {
        radius_tiles: u16,
        damage_percent: i32,
    },
    StatusApplied {
        status: StatusKind,
        expires_at: Tick,
    },
    Restored {
        resource: ResourceKind,
        amount: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_scaling() {
        let value = RankScaled::new(5, 3);
        assert_eq!(value.at(1), 5);
        assert_eq!(value.at(4), 14);
        assert_eq!(value.at(0), 5);
    }

    #[test]
    fn accumulate_ignores_activation_effects() {
        let mut totals = ModifierTotals::default();
        totals.accumulate(&SkillEffect::DamageBonus(RankScaled::new(10, 5)), 3);
        totals.accumulate(
            &SkillEffect::ResourceBonus {
                resource: ResourceKind::Primary,
                amount: RankScaled::flat(25),
            },
            1,
        );
        totals.accumulate(
            &SkillEffect::AreaEffect {
                radius_tiles: 3,
                damage_percent: RankScaled::flat(200),
            },
            1,
        );
        assert_eq!(totals.damage_percent, 20);
        assert_eq!(totals.resource_max, [0, 25, 0]);
        assert_eq!(totals.crit_percent, 0);
    }

    #[test]
    fn merge_sums_fields() {
        let mut a = ModifierTotals::default();
        a.accumulate(
            &SkillEffect::StatBonus {
                stat: StatKind::Luck,
                amount: RankScaled::flat(2),
            },
            1,
        );
        let mut b = a.clone();
        b.accumulate(&SkillEffect::CooldownReduction(RankScaled::flat(7)), 1);
        a.merge(&b);
        assert_eq!(a.stats[StatKind::Luck.index()], 4);
        assert_eq!(a.cooldown_reduction_percent, 7);
    }
}

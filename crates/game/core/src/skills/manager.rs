//! Per-character skill state: learned ranks, cooldowns, hotbar and the passive cache.

use std::collections::BTreeMap;

use crate::common::{SkillId, Tick};
use crate::config::ProgressionConfig;
use crate::formula::{Multiplier, actual_cooldown_ticks};
use crate::jobs::JobRegistry;
use crate::stats::ResourcePools;
use crate::status::{ActiveStatus, StatusEffects};

use super::{
    ActivationEffect, HotbarError, LearnError, ModifierTotals, SkillCategory, SkillDefinition,
    SkillEffect, SkillRegistry, UseCondition, UseSkillError,
};

/// A skill a character has spent at least one point into.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LearnedSkill {
    pub id: SkillId,
    /// `1..=max_rank`.
    pub rank: u8,
    /// Ticks until the skill can be used again.
    pub cooldown_ticks: u64,
}

/// Character facts a learn request is checked against.
#[derive(Clone, Copy, Debug)]
pub struct LearnContext<'a> {
    pub level: u32,
    pub job: &'a str,
    pub available_points: u32,
}

/// Outcome of a successful learn or upgrade.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillUpgrade {
    pub skill: SkillId,
    pub rank: u8,
    pub points_spent: u32,
}

/// Mutable character state a skill activation may touch.
#[derive(Debug)]
pub struct UseContext<'a> {
    pub now: Tick,
    pub pools: &'a mut ResourcePools,
    pub statuses: &'a mut StatusEffects,
    pub cost_growth: Multiplier,
}

/// Outcome of a successful skill use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillActivation {
    pub skill: SkillId,
    pub rank: u8,
    pub cooldown_ticks: u64,
    pub resource_spent: u32,
    pub effects: Vec<ActivationEffect>,
}

/// Summed passive modifiers, recomputed only after the learned set changes.
#[derive(Clone, Debug)]
struct PassiveCache {
    totals: ModifierTotals,
    dirty: bool,
}

impl Default for PassiveCache {
    fn default() -> Self {
        Self {
            totals: ModifierTotals::default(),
            dirty: true,
        }
    }
}

/// Learned skills, cooldown timers and hotbar bindings of one character.
#[derive(Clone, Debug, Default)]
pub struct SkillManager {
    learned: BTreeMap<SkillId, LearnedSkill>,
    hotbar: [Option<SkillId>; ProgressionConfig::HOTBAR_SLOTS],
    passives: PassiveCache,
    /// Aggregate set once per tick by the character and shared by every skill.
    cooldown_reduction_percent: u32,
}

impl SkillManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a manager from saved `(id, rank)` pairs and bindings.
    ///
    /// Callers are expected to have filtered unknown ids; ranks are clamped to
    /// `1..=max_rank` and bindings to learned, non-passive skills.
    pub fn restore(
        ranks: impl IntoIterator<Item = (SkillId, u8)>,
        hotbar: impl IntoIterator<Item = Option<SkillId>>,
        skills: &SkillRegistry,
    ) -> Self {
        let mut manager = Self::new();
        for (id, rank) in ranks {
            let Some(definition) = skills.get(id.as_str()) else {
                continue;
            };
            let rank = rank.clamp(1, definition.max_rank);
            manager.learned.insert(
                id.clone(),
                LearnedSkill {
                    id,
                    rank,
                    cooldown_ticks: 0,
                },
            );
        }
        for (slot, binding) in hotbar
            .into_iter()
            .take(ProgressionConfig::HOTBAR_SLOTS)
            .enumerate()
        {
            if let Some(id) = binding
                && manager.learned.contains_key(&id)
                && skills.get(id.as_str()).is_some_and(|s| !s.is_passive())
            {
                manager.hotbar[slot] = Some(id);
            }
        }
        manager
    }

    pub fn rank(&self, id: &str) -> u8 {
        self.learned.get(id).map_or(0, |skill| skill.rank)
    }

    pub fn get(&self, id: &str) -> Option<&LearnedSkill> {
        self.learned.get(id)
    }

    pub fn learned(&self) -> impl Iterator<Item = &LearnedSkill> + '_ {
        self.learned.values()
    }

    pub fn learned_count(&self) -> usize {
        self.learned.len()
    }

    pub fn hotbar(&self) -> &[Option<SkillId>] {
        &self.hotbar
    }

    pub fn cooldown_reduction_percent(&self) -> u32 {
        self.cooldown_reduction_percent
    }

    pub(crate) fn set_cooldown_reduction_percent(&mut self, percent: u32) {
        self.cooldown_reduction_percent = percent;
    }

    /// Points currently invested across all learned skills.
    pub fn spent_points(&self, skills: &SkillRegistry) -> u64 {
        self.learned
            .values()
            .filter_map(|learned| {
                skills
                    .get(learned.id.as_str())
                    .map(|definition| definition.cost_to_rank(learned.rank))
            })
            .sum()
    }

    // ========================================================================
    // Learning
    // ========================================================================

    /// Checks a learn or upgrade request without mutating anything.
    pub fn can_learn(
        &self,
        id: &str,
        ctx: LearnContext<'_>,
        skills: &SkillRegistry,
        jobs: &JobRegistry,
    ) -> Result<u8, LearnError> {
        let definition = skills
            .get(id)
            .ok_or_else(|| LearnError::UnknownSkill(SkillId::from(id)))?;
        let current = self.rank(id);

        if current >= definition.max_rank {
            return Err(LearnError::MaxRank {
                skill: definition.id.clone(),
                max_rank: definition.max_rank,
            });
        }

        if current == 0 {
            if !jobs.contains(definition.required_job.as_str()) {
                return Err(LearnError::UnknownJob {
                    skill: definition.id.clone(),
                    job: definition.required_job.clone(),
                });
            }
            if !jobs.grants_access(ctx.job, definition.required_job.as_str()) {
                return Err(LearnError::JobLocked {
                    skill: definition.id.clone(),
                    required: definition.required_job.clone(),
                });
            }
            if ctx.level < definition.required_level {
                return Err(LearnError::LevelTooLow {
                    required: definition.required_level,
                    current: ctx.level,
                });
            }
            for prerequisite in &definition.prerequisites {
                let have = self.rank(prerequisite.skill.as_str());
                if have < prerequisite.min_rank {
                    return Err(LearnError::PrerequisiteUnmet {
                        prerequisite: prerequisite.skill.clone(),
                        required: prerequisite.min_rank,
                        current: have,
                    });
                }
            }
        }

        if ctx.available_points < definition.point_cost {
            return Err(LearnError::InsufficientPoints {
                needed: definition.point_cost,
                available: ctx.available_points,
            });
        }

        Ok(current + 1)
    }

    /// Learns a skill at rank 1 or raises it by one rank.
    ///
    /// The caller deducts `points_spent` from its pool; nothing is changed on error.
    pub fn learn(
        &mut self,
        id: &str,
        ctx: LearnContext<'_>,
        skills: &SkillRegistry,
        jobs: &JobRegistry,
    ) -> Result<SkillUpgrade, LearnError> {
        let rank = self.can_learn(id, ctx, skills, jobs)?;
        let definition = skills
            .get(id)
            .ok_or_else(|| LearnError::UnknownSkill(SkillId::from(id)))?;

        self.learned
            .entry(definition.id.clone())
            .and_modify(|learned| learned.rank = rank)
            .or_insert_with(|| LearnedSkill {
                id: definition.id.clone(),
                rank,
                cooldown_ticks: 0,
            });
        self.passives.dirty = true;

        Ok(SkillUpgrade {
            skill: definition.id.clone(),
            rank,
            points_spent: definition.point_cost,
        })
    }

    /// Forgets every skill and binding. Returns the points to refund.
    pub fn reset(&mut self, skills: &SkillRegistry) -> u64 {
        let refund = self.spent_points(skills);
        self.learned.clear();
        self.hotbar = Default::default();
        self.passives.dirty = true;
        refund
    }

    // ========================================================================
    // Using
    // ========================================================================

    /// Uses a learned active or timed-buff skill.
    ///
    /// Rejections are checked in order: not learned, passive, on cooldown,
    /// insufficient resource, usability condition, then room for every status
    /// the skill applies. A rejected use changes nothing.
    pub fn use_skill(
        &mut self,
        id: &str,
        skills: &SkillRegistry,
        ctx: UseContext<'_>,
    ) -> Result<SkillActivation, UseSkillError> {
        let learned = self
            .learned
            .get(id)
            .ok_or_else(|| UseSkillError::NotLearned(SkillId::from(id)))?;
        let definition = skills
            .get(id)
            .ok_or_else(|| UseSkillError::DefinitionMissing(learned.id.clone()))?;
        let rank = learned.rank;

        if definition.category == SkillCategory::Passive {
            return Err(UseSkillError::Passive(definition.id.clone()));
        }
        if learned.cooldown_ticks > 0 {
            return Err(UseSkillError::OnCooldown {
                skill: definition.id.clone(),
                remaining_ticks: learned.cooldown_ticks,
            });
        }

        let cost = definition.resource_cost_at(rank, ctx.cost_growth);
        if !ctx.pools.can_afford(definition.resource, cost) {
            return Err(UseSkillError::InsufficientResource {
                resource: definition.resource,
                needed: cost,
                available: ctx
                    .pools
                    .get(definition.resource)
                    .map_or(0, |meter| meter.current),
            });
        }

        if let Some(condition) = definition.usable_when
            && !condition_holds(condition, &ctx)
        {
            return Err(UseSkillError::ConditionUnmet {
                skill: definition.id.clone(),
                condition,
            });
        }

        if let Some(status) = definition.effects.iter().find_map(|effect| match effect {
            SkillEffect::TimedStatus { status, .. } if !ctx.statuses.can_apply(*status) => {
                Some(*status)
            }
            _ => None,
        }) {
            return Err(UseSkillError::StatusesFull {
                skill: definition.id.clone(),
                status,
            });
        }

        // Validation passed; mutate.
        if let Some(meter) = ctx.pools.get_mut(definition.resource) {
            meter.try_spend(cost);
        }
        let cooldown =
            actual_cooldown_ticks(definition.cooldown_ticks(), self.cooldown_reduction_percent);
        if let Some(learned) = self.learned.get_mut(id) {
            learned.cooldown_ticks = cooldown;
        }
        let effects = activate(definition, rank, ctx);

        Ok(SkillActivation {
            skill: definition.id.clone(),
            rank,
            cooldown_ticks: cooldown,
            resource_spent: cost,
            effects,
        })
    }

    pub fn use_hotbar_slot(
        &mut self,
        slot: usize,
        skills: &SkillRegistry,
        ctx: UseContext<'_>,
    ) -> Result<SkillActivation, UseSkillError> {
        let binding = self
            .hotbar
            .get(slot)
            .ok_or(UseSkillError::InvalidSlot(slot))?
            .clone()
            .ok_or(UseSkillError::EmptySlot(slot))?;
        self.use_skill(binding.as_str(), skills, ctx)
    }

    /// Counts every cooldown down by `elapsed` ticks, stopping at zero.
    pub fn tick_cooldowns(&mut self, elapsed: u64) {
        for learned in self.learned.values_mut() {
            learned.cooldown_ticks = learned.cooldown_ticks.saturating_sub(elapsed);
        }
    }

    // ========================================================================
    // Hotbar
    // ========================================================================

    /// Binds a learned, non-passive skill to `slot`. Returns the previous binding.
    pub fn bind(
        &mut self,
        slot: usize,
        id: &str,
        skills: &SkillRegistry,
    ) -> Result<Option<SkillId>, HotbarError> {
        if slot >= self.hotbar.len() {
            return Err(HotbarError::InvalidSlot {
                slot,
                max: self.hotbar.len() - 1,
            });
        }
        let Some(learned) = self.learned.get(id) else {
            return Err(HotbarError::NotLearned(SkillId::from(id)));
        };
        if skills.get(id).is_none_or(|skill| skill.is_passive()) {
            return Err(HotbarError::Passive(learned.id.clone()));
        }
        Ok(self.hotbar[slot].replace(learned.id.clone()))
    }

    pub fn unbind(&mut self, slot: usize) -> Result<Option<SkillId>, HotbarError> {
        let max = self.hotbar.len() - 1;
        self.hotbar
            .get_mut(slot)
            .map(Option::take)
            .ok_or(HotbarError::InvalidSlot { slot, max })
    }

    // ========================================================================
    // Passive cache
    // ========================================================================

    pub fn passive_cache_dirty(&self) -> bool {
        self.passives.dirty
    }

    /// Summed passive modifiers, recomputed first if the learned set changed.
    pub fn passive_totals(&mut self, skills: &SkillRegistry) -> &ModifierTotals {
        if self.passives.dirty {
            let mut totals = ModifierTotals::default();
            for learned in self.learned.values() {
                let Some(definition) = skills.get(learned.id.as_str()) else {
                    continue;
                };
                if !definition.is_passive() {
                    continue;
                }
                for effect in &definition.effects {
                    totals.accumulate(effect, learned.rank);
                }
            }
            self.passives.totals = totals;
            self.passives.dirty = false;
        }
        &self.passives.totals
    }
}

fn condition_holds(condition: UseCondition, ctx: &UseContext<'_>) -> bool {
    match condition {
        UseCondition::HealthBelowPercent(percent) => ctx.pools.health.percent() < percent as u32,
        UseCondition::RequiresStatus(kind) => ctx.statuses.has(kind, ctx.now),
        UseCondition::ForbidsStatus(kind) => !ctx.statuses.has(kind, ctx.now),
    }
}

/// Resolves the activation payload of a skill at `rank`.
fn activate(definition: &SkillDefinition, rank: u8, ctx: UseContext<'_>) -> Vec<ActivationEffect> {
    let mut effects = Vec::new();
    let mut damage_percent = 0i32;
    let mut crit_percent = 0i32;

    for effect in &definition.effects {
        match effect {
            SkillEffect::DamageBonus(value) => damage_percent += value.at(rank),
            SkillEffect::CritBonus(value) => crit_percent += value.at(rank),
            SkillEffect::TimedStatus {
                status,
                duration_ms,
                effects: payload,
            } => {
                let duration = duration_ms.at(rank).max(0) as u32;
                let expires_at = ctx.now + ProgressionConfig::ms_to_ticks(duration);
                let _ = ctx.statuses.apply(ActiveStatus {
                    kind: *status,
                    expires_at,
                    rank,
                    effects: payload.clone(),
                });
                effects.push(ActivationEffect::StatusApplied {
                    status: *status,
                    expires_at,
                });
            }
            SkillEffect::AreaEffect {
                radius_tiles,
                damage_percent,
            } => effects.push(ActivationEffect::Area {
                radius_tiles: *radius_tiles,
                damage_percent: damage_percent.at(rank),
            }),
            SkillEffect::Restore { resource, amount } => {
                let amount = amount.at(rank).max(0) as u32;
                if let Some(meter) = ctx.pools.get_mut(*resource) {
                    meter.restore(amount);
                    effects.push(ActivationEffect::Restored {
                        resource: *resource,
                        amount,
                    });
                }
            }
            SkillEffect::ResourceBonus { .. }
            | SkillEffect::StatBonus { .. }
            | SkillEffect::CooldownReduction(_)
            | SkillEffect::ExperienceBonus(_) => {}
        }
    }

    if damage_percent != 0 || crit_percent != 0 {
        effects.insert(
            0,
            ActivationEffect::Strike {
                damage_percent,
                crit_percent,
            },
        );
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorSeverity, GameError};
    use crate::status::StatusKind;
    use crate::testkit;

    fn ctx(level: u32, job: &str, points: u32) -> LearnContext<'_> {
        LearnContext {
            level,
            job,
            available_points: points,
        }
    }

    fn learn_to(manager: &mut SkillManager, id: &str, rank: u8) {
        let catalog = testkit::catalog();
        for _ in manager.rank(id)..rank {
            manager
                .learn(id, ctx(50, "knight", 99), catalog.skills(), catalog.jobs())
                .expect("learnable");
        }
    }

    #[test]
    fn prerequisite_rank_gates_learning() {
        let catalog = testkit::catalog();
        let mut manager = SkillManager::new();
        learn_to(&mut manager, "bash", 2);

        let err = manager
            .learn("magnum_break", ctx(20, "swordsman", 5), catalog.skills(), catalog.jobs())
            .unwrap_err();
        assert_eq!(
            err,
            LearnError::PrerequisiteUnmet {
                prerequisite: SkillId::from("bash"),
                required: 3,
                current: 2,
            }
        );

        learn_to(&mut manager, "bash", 3);
        let upgrade = manager
            .learn("magnum_break", ctx(20, "swordsman", 5), catalog.skills(), catalog.jobs())
            .unwrap();
        assert_eq!(upgrade.rank, 1);
        assert_eq!(manager.rank("magnum_break"), 1);
    }

    #[test]
    fn learn_rejects_without_mutation() {
        let catalog = testkit::catalog();
        let mut manager = SkillManager::new();

        let locked = manager.learn("fire_bolt", ctx(20, "swordsman", 5), catalog.skills(), catalog.jobs());
        assert!(matches!(locked, Err(LearnError::JobLocked { .. })));

        let poor = manager.learn("bash", ctx(20, "swordsman", 0), catalog.skills(), catalog.jobs());
        assert!(matches!(poor, Err(LearnError::InsufficientPoints { .. })));

        let young = manager.learn("bash", ctx(1, "swordsman", 5), catalog.skills(), catalog.jobs());
        assert!(matches!(young, Err(LearnError::LevelTooLow { .. })));

        assert_eq!(manager.learned_count(), 0);
        assert!(manager.passive_cache_dirty());
    }

    #[test]
    fn ancestor_job_skills_stay_learnable() {
        let catalog = testkit::catalog();
        let mut manager = SkillManager::new();
        let upgrade = manager
            .learn("first_aid", ctx(60, "knight", 1), catalog.skills(), catalog.jobs())
            .unwrap();
        assert_eq!(upgrade.points_spent, 1);
    }

    #[test]
    fn max_rank_is_enforced() {
        let catalog = testkit::catalog();
        let mut manager = SkillManager::new();
        learn_to(&mut manager, "first_aid", 1);
        let err = manager
            .learn("first_aid", ctx(5, "novice", 3), catalog.skills(), catalog.jobs())
            .unwrap_err();
        assert!(matches!(err, LearnError::MaxRank { max_rank: 1, .. }));
    }

    #[test]
    fn use_sets_cooldown_and_spends_resource() {
        let catalog = testkit::catalog();
        let mut manager = SkillManager::new();
        learn_to(&mut manager, "bash", 1);
        manager.set_cooldown_reduction_percent(50);

        let mut pools = testkit::pools();
        let mut statuses = StatusEffects::new();
        let before = pools.secondary.current;
        let activation = manager
            .use_skill(
                "bash",
                catalog.skills(),
                UseContext {
                    now: Tick(0),
                    pools: &mut pools,
                    statuses: &mut statuses,
                    cost_growth: Multiplier::from_percent(10),
                },
            )
            .unwrap();

        assert_eq!(activation.cooldown_ticks, 30);
        assert_eq!(pools.secondary.current, before - activation.resource_spent);
        assert!(matches!(
            activation.effects[0],
            ActivationEffect::Strike { damage_percent: 30, .. }
        ));

        let again = manager.use_skill(
            "bash",
            catalog.skills(),
            UseContext {
                now: Tick(1),
                pools: &mut pools,
                statuses: &mut statuses,
                cost_growth: Multiplier::from_percent(10),
            },
        );
        assert!(matches!(again, Err(UseSkillError::OnCooldown { remaining_ticks: 30, .. })));

        manager.tick_cooldowns(30);
        assert_eq!(manager.get("bash").unwrap().cooldown_ticks, 0);
    }

    #[test]
    fn use_rejects_passive_and_unaffordable() {
        let catalog = testkit::catalog();
        let mut manager = SkillManager::new();
        learn_to(&mut manager, "sword_mastery", 1);
        learn_to(&mut manager, "bash", 1);

        let mut pools = testkit::pools();
        pools.secondary.current = 0;
        let mut statuses = StatusEffects::new();
        let mut use_now = |manager: &mut SkillManager, id: &str| {
            manager.use_skill(
                id,
                catalog.skills(),
                UseContext {
                    now: Tick(0),
                    pools: &mut pools,
                    statuses: &mut statuses,
                    cost_growth: Multiplier::ZERO,
                },
            )
        };

        assert!(matches!(use_now(&mut manager, "sword_mastery"), Err(UseSkillError::Passive(_))));
        assert!(matches!(
            use_now(&mut manager, "bash"),
            Err(UseSkillError::InsufficientResource { .. })
        ));
        assert!(matches!(use_now(&mut manager, "ghost"), Err(UseSkillError::NotLearned(_))));
        assert_eq!(manager.get("bash").unwrap().cooldown_ticks, 0);
    }

    #[test]
    fn timed_buff_applies_status_and_predicate_blocks_recast() {
        let catalog = testkit::catalog();
        let mut manager = SkillManager::new();
        learn_to(&mut manager, "endure", 1);

        let mut pools = testkit::pools();
        let mut statuses = StatusEffects::new();
        let activation = manager
            .use_skill(
                "endure",
                catalog.skills(),
                UseContext {
                    now: Tick(100),
                    pools: &mut pools,
                    statuses: &mut statuses,
                    cost_growth: Multiplier::ZERO,
                },
            )
            .unwrap();
        assert_eq!(
            activation.effects,
            vec![ActivationEffect::StatusApplied {
                status: StatusKind::IronSkin,
                expires_at: Tick(100 + 600),
            }]
        );
        assert!(statuses.has(StatusKind::IronSkin, Tick(650)));

        manager.tick_cooldowns(u64::MAX);
        let blocked = manager.use_skill(
            "endure",
            catalog.skills(),
            UseContext {
                now: Tick(200),
                pools: &mut pools,
                statuses: &mut statuses,
                cost_growth: Multiplier::ZERO,
            },
        );
        assert!(matches!(blocked, Err(UseSkillError::ConditionUnmet { .. })));
    }

    #[test]
    fn full_status_set_rejects_use_without_spending() {
        let catalog = testkit::catalog();
        let mut manager = SkillManager::new();
        learn_to(&mut manager, "endure", 1);

        let mut pools = testkit::pools();
        let mut statuses = StatusEffects::new();
        for kind in [
            StatusKind::Berserk,
            StatusKind::Haste,
            StatusKind::Focus,
            StatusKind::Regeneration,
            StatusKind::ManaSurge,
            StatusKind::Wisdom,
            StatusKind::Blessing,
            StatusKind::Exhausted,
        ] {
            assert!(statuses.apply(ActiveStatus {
                kind,
                expires_at: Tick(10_000),
                rank: 1,
                effects: Vec::new(),
            }));
        }
        let before = pools;

        let result = manager.use_skill(
            "endure",
            catalog.skills(),
            UseContext {
                now: Tick(0),
                pools: &mut pools,
                statuses: &mut statuses,
                cost_growth: Multiplier::ZERO,
            },
        );
        let err = result.unwrap_err();
        assert_eq!(
            err,
            UseSkillError::StatusesFull {
                skill: SkillId::from("endure"),
                status: StatusKind::IronSkin,
            }
        );
        assert_eq!(err.severity(), ErrorSeverity::Policy);
        assert_eq!(err.error_code(), "USE_STATUSES_FULL");
        assert_eq!(pools, before);
        assert_eq!(manager.get("endure").unwrap().cooldown_ticks, 0);
        assert!(!statuses.has(StatusKind::IronSkin, Tick(0)));
    }

    #[test]
    fn passive_cache_recomputes_only_when_dirty() {
        let catalog = testkit::catalog();
        let mut manager = SkillManager::new();
        assert_eq!(manager.passive_totals(catalog.skills()).damage_percent, 0);
        assert!(!manager.passive_cache_dirty());

        learn_to(&mut manager, "sword_mastery", 2);
        assert!(manager.passive_cache_dirty());
        let totals = manager.passive_totals(catalog.skills()).clone();
        assert_eq!(totals.damage_percent, 8);
        assert_eq!(totals.cooldown_reduction_percent, 2);
        assert!(!manager.passive_cache_dirty());
    }

    #[test]
    fn hotbar_binding_rules() {
        let catalog = testkit::catalog();
        let mut manager = SkillManager::new();
        learn_to(&mut manager, "bash", 1);
        learn_to(&mut manager, "sword_mastery", 1);

        assert_eq!(manager.bind(0, "bash", catalog.skills()), Ok(None));
        assert!(matches!(
            manager.bind(1, "sword_mastery", catalog.skills()),
            Err(HotbarError::Passive(_))
        ));
        assert!(matches!(
            manager.bind(1, "magnum_break", catalog.skills()),
            Err(HotbarError::NotLearned(_))
        ));
        assert!(matches!(
            manager.bind(ProgressionConfig::HOTBAR_SLOTS, "bash", catalog.skills()),
            Err(HotbarError::InvalidSlot { .. })
        ));

        let mut pools = testkit::pools();
        let mut statuses = StatusEffects::new();
        let activation = manager
            .use_hotbar_slot(
                0,
                catalog.skills(),
                UseContext {
                    now: Tick(0),
                    pools: &mut pools,
                    statuses: &mut statuses,
                    cost_growth: Multiplier::ZERO,
                },
            )
            .unwrap();
        assert_eq!(activation.skill.as_str(), "bash");

        assert_eq!(manager.unbind(0), Ok(Some(SkillId::from("bash"))));
        assert_eq!(manager.unbind(0), Ok(None));
    }

    #[test]
    fn reset_refunds_every_rank() {
        let catalog = testkit::catalog();
        let mut manager = SkillManager::new();
        learn_to(&mut manager, "bash", 3);
        learn_to(&mut manager, "magnum_break", 2);
        manager.bind(0, "bash", catalog.skills()).unwrap();

        assert_eq!(manager.spent_points(catalog.skills()), 3 + 2 * 2);
        assert_eq!(manager.reset(catalog.skills()), 7);
        assert_eq!(manager.learned_count(), 0);
        assert!(manager.hotbar().iter().all(Option::is_none));
        assert!(manager.passive_cache_dirty());
    }

    #[test]
    fn restore_clamps_ranks_and_drops_bad_bindings() {
        let catalog = testkit::catalog();
        let manager = SkillManager::restore(
            [(SkillId::from("bash"), 99), (SkillId::from("sword_mastery"), 0)],
            [Some(SkillId::from("sword_mastery")), Some(SkillId::from("bash"))],
            catalog.skills(),
        );
        assert_eq!(manager.rank("bash"), 10);
        assert_eq!(manager.rank("sword_mastery"), 1);
        assert_eq!(manager.hotbar()[0], None);
        assert_eq!(manager.hotbar()[1], Some(SkillId::from("bash")));
    }
}

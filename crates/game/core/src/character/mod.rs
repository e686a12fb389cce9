//! The per-character aggregate.
//!
//! A [`Character`] owns its progression state, stats, pools, skills and
//! statuses, and is only ever mutated by its own update path. Every operation
//! takes the shared [`Catalog`] by reference and validates before mutating, so
//! a rejected call leaves the character untouched.
mod modifiers;

pub use modifiers::{CooldownSources, ExternalModifiers};

use strum::{EnumCount, IntoEnumIterator};

use crate::catalog::Catalog;
use crate::common::{CharacterId, JobId, SkillId, Tick};
use crate::formula::{Multiplier, stat_cooldown_reduction};
use crate::jobs::{AdvanceJobError, JobDefinition};
use crate::progression::{
    Authority, ComboTracker, LevelUp, ProgressionEvent, ProgressionState, XpBreakdown, XpGrant,
    XpRejection, compute_award,
};
use crate::skills::{
    HotbarError, LearnContext, LearnError, ModifierTotals, SkillActivation, SkillManager,
    SkillUpgrade, UseContext, UseSkillError,
};
use crate::stats::{AllocateError, ResourceKind, ResourcePools, StatBlock, StatKind};
use crate::status::{StatusEffects, StatusKind};
use crate::world::WorldProgress;

/// Result of an accepted experience award.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XpOutcome {
    pub breakdown: XpBreakdown,
    /// XP actually added; zero at the level cap.
    pub awarded: u64,
    pub level_ups: Vec<LevelUp>,
    pub events: Vec<ProgressionEvent>,
}

/// Result of an accepted job advance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobAdvance {
    pub from: JobId,
    pub to: JobId,
    pub released_stat_points: u32,
    pub released_skill_points: u32,
    /// Skill points added so every skill of the previous lineage stays affordable.
    pub budget_top_up: u64,
    pub event: ProgressionEvent,
}

/// What one tick pass changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub expired: Vec<StatusKind>,
    pub combo_ended: bool,
    pub cooldown_reduction_percent: u32,
}

#[derive(Clone, Debug)]
pub struct Character {
    id: CharacterId,
    progression: ProgressionState,
    stats: StatBlock,
    pools: ResourcePools,
    skills: SkillManager,
    statuses: StatusEffects,
    combo: ComboTracker,
    external: ExternalModifiers,
    cooldown_sources: CooldownSources,
    last_tick: Tick,
    last_regen: Tick,
}

impl Character {
    /// Level 1 character in the root job with full pools.
    pub fn new(id: CharacterId, catalog: &Catalog) -> Self {
        let progression = ProgressionState::new(catalog.jobs().root().id.clone());
        Self::from_parts(
            id,
            progression,
            StatBlock::new(),
            None,
            SkillManager::new(),
            catalog,
        )
    }

    /// Assembles a character from restored parts and refreshes derived values.
    /// `pools` of `None` starts full.
    pub(crate) fn from_parts(
        id: CharacterId,
        progression: ProgressionState,
        stats: StatBlock,
        pools: Option<ResourcePools>,
        skills: SkillManager,
        catalog: &Catalog,
    ) -> Self {
        let mut character = Self {
            id,
            progression,
            stats,
            pools: pools.unwrap_or_default(),
            skills,
            statuses: StatusEffects::new(),
            combo: ComboTracker::new(),
            external: ExternalModifiers::default(),
            cooldown_sources: CooldownSources::default(),
            last_tick: Tick::ZERO,
            last_regen: Tick::ZERO,
        };
        character.refresh_derived(Tick::ZERO, catalog);
        if pools.is_none() {
            character.pools.refill_all();
        }
        character
    }

    // ===== accessors =====

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn progression(&self) -> &ProgressionState {
        &self.progression
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn job(&self) -> &JobId {
        self.progression.job()
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    pub fn pools(&self) -> &ResourcePools {
        &self.pools
    }

    pub fn skills(&self) -> &SkillManager {
        &self.skills
    }

    pub fn statuses(&self) -> &StatusEffects {
        &self.statuses
    }

    pub fn combo(&self) -> &ComboTracker {
        &self.combo
    }

    pub fn external(&self) -> &ExternalModifiers {
        &self.external
    }

    pub fn cooldown_sources(&self) -> &CooldownSources {
        &self.cooldown_sources
    }

    /// Current job definition, or the root job if the stored id is unknown.
    pub fn current_job<'c>(&self, catalog: &'c Catalog) -> &'c JobDefinition {
        catalog
            .jobs()
            .get(self.progression.job().as_str())
            .unwrap_or_else(|| catalog.jobs().root())
    }

    pub fn set_external_modifiers(&mut self, external: ExternalModifiers) {
        self.external = external;
    }

    // ========================================================================
    // Experience
    // ========================================================================

    /// Character-side XP multiplier: external items times bonus-experience effects.
    pub fn xp_multiplier(&mut self, now: Tick, catalog: &Catalog) -> Multiplier {
        let totals = self.modifier_totals(now, catalog);
        let percent = (100 + totals.experience_percent).clamp(0, u32::MAX as i64 / 100) as u32;
        self.external.xp_multiplier * Multiplier::from_percent(percent)
    }

    /// Applies an experience award and resolves every level-up it pays for.
    ///
    /// Remote participants are refused; they forward the request instead.
    pub fn gain_experience(
        &mut self,
        grant: XpGrant,
        authority: Authority,
        now: Tick,
        catalog: &Catalog,
    ) -> Result<XpOutcome, XpRejection> {
        if authority != Authority::Authoritative {
            return Err(XpRejection::NotAuthoritative);
        }
        let config = catalog.config();
        let multiplier = self.xp_multiplier(now, catalog);
        let breakdown = compute_award(
            &grant,
            self.progression.level(),
            multiplier,
            &mut self.combo,
            now,
            config,
        )?;

        let at_cap = self.progression.is_at_cap(config);
        let job = self.current_job(catalog);
        let level_ups =
            self.progression
                .add_experience(breakdown.amount, job, &mut self.stats, config);
        let awarded = if at_cap { 0 } else { breakdown.amount };

        let mut events = Vec::with_capacity(level_ups.len() + 1);
        if awarded > 0 {
            events.push(ProgressionEvent::XpGained {
                amount: awarded,
                source: grant.source,
            });
        }
        events.extend(
            level_ups
                .iter()
                .map(|up| ProgressionEvent::LevelUp { level: up.level }),
        );

        if !level_ups.is_empty() {
            self.refresh_derived(now, catalog);
            self.pools.refill_all();
        }

        Ok(XpOutcome {
            breakdown,
            awarded,
            level_ups,
            events,
        })
    }

    // ========================================================================
    // Jobs
    // ========================================================================

    /// Whether `target` could be advanced into right now.
    pub fn can_advance_job(
        &self,
        target: &str,
        world: &WorldProgress,
        catalog: &Catalog,
    ) -> Result<(), AdvanceJobError> {
        let jobs = catalog.jobs();
        let next = jobs
            .get(target)
            .ok_or_else(|| AdvanceJobError::UnknownJob(JobId::from(target)))?;
        let current = jobs
            .get(self.progression.job().as_str())
            .ok_or_else(|| AdvanceJobError::CurrentJobMissing(self.progression.job().clone()))?;

        if current.tier.next() != Some(next.tier) {
            return Err(AdvanceJobError::TierMismatch {
                current: current.tier,
                target: next.tier,
            });
        }
        next.requirement
            .check(self.progression.level(), &current.id, world)
    }

    /// Moves into the next-tier job `target`, releasing pending points.
    pub fn advance_job(
        &mut self,
        target: &str,
        world: &WorldProgress,
        now: Tick,
        catalog: &Catalog,
    ) -> Result<JobAdvance, AdvanceJobError> {
        self.can_advance_job(target, world, catalog)?;
        let to = JobId::from(target);
        let from = self.progression.job().clone();

        let (released_stat_points, released_skill_points) = self.progression.release_pending();

        let budget = catalog.lineage_skill_budget(from.as_str());
        let lifetime = self.skills.spent_points(catalog.skills())
            + self.progression.unspent_skill_points();
        let budget_top_up = budget.saturating_sub(lifetime);
        if budget_top_up > 0 {
            self.progression.grant_skill_points(budget_top_up);
        }

        self.progression.set_job(to.clone());
        self.refresh_derived(now, catalog);

        Ok(JobAdvance {
            event: ProgressionEvent::JobChanged {
                from: from.clone(),
                to: to.clone(),
            },
            from,
            to,
            released_stat_points,
            released_skill_points,
            budget_top_up,
        })
    }

    /// Next-tier jobs whose requirements are currently met.
    pub fn available_jobs<'c>(
        &self,
        world: &WorldProgress,
        catalog: &'c Catalog,
    ) -> Vec<&'c JobDefinition> {
        catalog
            .jobs()
            .successors(self.progression.job().as_str())
            .filter(|job| self.can_advance_job(job.id.as_str(), world, catalog).is_ok())
            .collect()
    }

    // ========================================================================
    // Stats and skills
    // ========================================================================

    pub fn allocate_stat(
        &mut self,
        stat: StatKind,
        amount: u32,
        catalog: &Catalog,
    ) -> Result<(), AllocateError> {
        self.progression
            .allocate_stat(&mut self.stats, stat, amount)?;
        self.refresh_derived(self.last_tick, catalog);
        Ok(())
    }

    pub fn learn_skill(&mut self, id: &str, catalog: &Catalog) -> Result<SkillUpgrade, LearnError> {
        let ctx = LearnContext {
            level: self.progression.level(),
            job: self.progression.job().as_str(),
            available_points: self.progression.skill_points(),
        };
        let upgrade = self
            .skills
            .learn(id, ctx, catalog.skills(), catalog.jobs())?;
        self.progression.spend_skill_points(upgrade.points_spent);
        Ok(upgrade)
    }

    /// Forgets every learned skill and refunds the points. Returns the refund.
    pub fn reset_skills(&mut self, catalog: &Catalog) -> u64 {
        let refund = self.skills.reset(catalog.skills());
        self.progression.grant_skill_points(refund);
        self.refresh_derived(self.last_tick, catalog);
        refund
    }

    pub fn use_skill(
        &mut self,
        id: &str,
        now: Tick,
        catalog: &Catalog,
    ) -> Result<SkillActivation, UseSkillError> {
        let ctx = UseContext {
            now,
            pools: &mut self.pools,
            statuses: &mut self.statuses,
            cost_growth: catalog.config().cooldown.cost_growth_per_rank,
        };
        self.skills.use_skill(id, catalog.skills(), ctx)
    }

    pub fn use_hotbar_slot(
        &mut self,
        slot: usize,
        now: Tick,
        catalog: &Catalog,
    ) -> Result<SkillActivation, UseSkillError> {
        let ctx = UseContext {
            now,
            pools: &mut self.pools,
            statuses: &mut self.statuses,
            cost_growth: catalog.config().cooldown.cost_growth_per_rank,
        };
        self.skills.use_hotbar_slot(slot, catalog.skills(), ctx)
    }

    pub fn bind_skill(
        &mut self,
        slot: usize,
        id: &str,
        catalog: &Catalog,
    ) -> Result<Option<SkillId>, HotbarError> {
        self.skills.bind(slot, id, catalog.skills())
    }

    pub fn unbind_skill(&mut self, slot: usize) -> Result<Option<SkillId>, HotbarError> {
        self.skills.unbind(slot)
    }

    // ========================================================================
    // Tick pass
    // ========================================================================

    /// Per-tick pass: cooldowns, status expiry, combo expiry, passive cache,
    /// cooldown-reduction aggregate, pool maxima and regeneration.
    pub fn tick(&mut self, now: Tick, catalog: &Catalog) -> TickReport {
        let elapsed = now.since(self.last_tick);
        self.last_tick = now;

        self.skills.tick_cooldowns(elapsed);
        let expired = self.statuses.remove_expired(now);
        let combo_ended = self.combo.expire(now, &catalog.config().combo);
        self.refresh_derived(now, catalog);
        self.regenerate(now, catalog);

        TickReport {
            expired,
            combo_ended,
            cooldown_reduction_percent: self.skills.cooldown_reduction_percent(),
        }
    }

    fn regenerate(&mut self, now: Tick, catalog: &Catalog) {
        let regen = &catalog.config().regen;
        if regen.interval_ticks == 0 {
            return;
        }
        let intervals = now.since(self.last_regen) / regen.interval_ticks;
        if intervals == 0 {
            return;
        }
        self.last_regen = self.last_regen + intervals * regen.interval_ticks;

        for (kind, percent) in [
            (ResourceKind::Health, regen.health_percent),
            (ResourceKind::Primary, regen.primary_percent),
            (ResourceKind::Secondary, regen.secondary_percent),
        ] {
            if let Some(meter) = self.pools.get_mut(kind) {
                let per_interval = (meter.maximum as u64 * percent as u64 / 100).max(1);
                let amount = per_interval.saturating_mul(intervals).min(u32::MAX as u64) as u32;
                meter.restore(amount);
            }
        }
    }

    /// Passive plus status modifiers active at `now`.
    fn modifier_totals(&mut self, now: Tick, catalog: &Catalog) -> ModifierTotals {
        let mut totals = self.skills.passive_totals(catalog.skills()).clone();
        totals.merge(&self.statuses.totals(now));
        totals
    }

    /// Recomputes stat bonuses, pool maxima and the cooldown-reduction aggregate.
    fn refresh_derived(&mut self, now: Tick, catalog: &Catalog) {
        let config = catalog.config();
        let job = self.current_job(catalog);
        let passive = self.skills.passive_totals(catalog.skills()).clone();
        let status = self.statuses.totals(now);

        let mut bonuses = [0i32; StatKind::COUNT];
        for stat in StatKind::iter() {
            let i = stat.index();
            bonuses[i] = job
                .stat_bonus(stat)
                .saturating_add(passive.stats[i])
                .saturating_add(status.stats[i]);
        }
        self.stats.set_bonuses(bonuses);

        let mut resource_bonus = passive.resource_max;
        for (total, extra) in resource_bonus.iter_mut().zip(status.resource_max) {
            *total += extra;
        }
        self.pools
            .refresh_maximums(&self.stats, self.progression.level(), &resource_bonus);

        let percent = |value: i64| value.clamp(0, u32::MAX as i64) as u32;
        self.cooldown_sources = CooldownSources {
            stats: stat_cooldown_reduction(
                self.stats.total(StatKind::Intelligence),
                self.stats.total(StatKind::Dexterity),
                config.cooldown.stat_points_per_percent,
            ),
            equipment: self.external.equipment_cooldown_percent,
            statuses: percent(status.cooldown_reduction_percent),
            set_bonus: self.external.set_bonus_cooldown_percent,
            job: config.tiers.cooldown_reduction_percent[job.tier.index()]
                .saturating_add(percent(passive.cooldown_reduction_percent)),
        };
        self.skills.set_cooldown_reduction_percent(
            self.cooldown_sources
                .capped(config.cooldown.max_reduction_percent),
        );
    }
}

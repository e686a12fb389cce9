//! Per-character level, experience and point pools.

use crate::common::JobId;
use crate::config::ProgressionConfig;
use crate::formula::{
    auto_points_for_level, required_xp, skill_points_for_level, stat_points_for_level,
};
use crate::jobs::JobDefinition;
use crate::stats::{AllocateError, StatBlock, StatKind};

/// Points granted by one level-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    pub stat_points: u32,
    pub skill_points: u32,
    /// Points went to the pending pools because `level` exceeds the tier cap.
    pub pending: bool,
}

/// Level, accumulated XP, current job and point pools of one character.
///
/// `xp < required_xp(level)` holds after every award.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressionState {
    level: u32,
    xp: u64,
    job: JobId,
    stat_points: u32,
    skill_points: u32,
    /// Earned above the current tier's level cap; released on tier advance.
    pending_stat_points: u32,
    pending_skill_points: u32,
}

impl ProgressionState {
    pub fn new(job: JobId) -> Self {
        Self {
            level: 1,
            xp: 0,
            job,
            stat_points: 0,
            skill_points: 0,
            pending_stat_points: 0,
            pending_skill_points: 0,
        }
    }

    /// Rebuilds stored state, clamping level into `1..=max_level` and XP below
    /// the requirement of that level.
    pub fn restore(
        level: u32,
        xp: u64,
        job: JobId,
        points: [u32; 4],
        config: &ProgressionConfig,
    ) -> Self {
        let level = level.clamp(1, config.max_level.max(1));
        let [stat_points, skill_points, pending_stat_points, pending_skill_points] = points;
        let required = required_xp(level, &config.experience);
        Self {
            level,
            xp: xp.min(required - 1),
            job,
            stat_points,
            skill_points,
            pending_stat_points,
            pending_skill_points,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp(&self) -> u64 {
        self.xp
    }

    pub fn job(&self) -> &JobId {
        &self.job
    }

    pub fn stat_points(&self) -> u32 {
        self.stat_points
    }

    pub fn skill_points(&self) -> u32 {
        self.skill_points
    }

    pub fn pending_stat_points(&self) -> u32 {
        self.pending_stat_points
    }

    pub fn pending_skill_points(&self) -> u32 {
        self.pending_skill_points
    }

    pub fn required_xp(&self, config: &ProgressionConfig) -> u64 {
        required_xp(self.level, &config.experience)
    }

    pub fn is_at_cap(&self, config: &ProgressionConfig) -> bool {
        self.level >= config.max_level
    }

    /// Adds `amount` and resolves every level-up it pays for.
    ///
    /// At `max_level` the award is discarded and XP is pinned one below the
    /// requirement. Level-ups above the tier cap of `job` route their points
    /// to the pending pools; auto-growth is applied before the manual grants.
    pub(crate) fn add_experience(
        &mut self,
        amount: u64,
        job: &JobDefinition,
        stats: &mut StatBlock,
        config: &ProgressionConfig,
    ) -> Vec<LevelUp> {
        let mut level_ups = Vec::new();
        if self.is_at_cap(config) {
            self.pin_at_cap(config);
            return level_ups;
        }

        self.xp = self.xp.saturating_add(amount);
        let tier_cap = config.tiers.level_cap(job.tier);
        let auto = auto_points_for_level(config);

        while !self.is_at_cap(config) {
            let required = self.required_xp(config);
            if self.xp < required {
                break;
            }
            self.xp -= required;
            self.level += 1;

            if auto > 0 {
                for stat in &job.growth {
                    stats.add_auto(*stat, auto);
                }
            }

            let stat_points = stat_points_for_level(job.tier, config);
            let skill_points = skill_points_for_level(job.tier, config);
            let pending = self.level > tier_cap;
            if pending {
                self.pending_stat_points = self.pending_stat_points.saturating_add(stat_points);
                self.pending_skill_points = self.pending_skill_points.saturating_add(skill_points);
            } else {
                self.stat_points = self.stat_points.saturating_add(stat_points);
                self.skill_points = self.skill_points.saturating_add(skill_points);
            }
            level_ups.push(LevelUp {
                level: self.level,
                stat_points,
                skill_points,
                pending,
            });
        }

        if self.is_at_cap(config) {
            self.pin_at_cap(config);
        }
        level_ups
    }

    fn pin_at_cap(&mut self, config: &ProgressionConfig) {
        self.xp = self.required_xp(config) - 1;
    }

    pub(crate) fn allocate_stat(
        &mut self,
        stats: &mut StatBlock,
        stat: StatKind,
        amount: u32,
    ) -> Result<(), AllocateError> {
        if amount == 0 {
            return Err(AllocateError::ZeroAmount);
        }
        if amount > self.stat_points {
            return Err(AllocateError::InsufficientPoints {
                needed: amount,
                available: self.stat_points,
            });
        }
        self.stat_points -= amount;
        stats.add_manual(stat, amount);
        Ok(())
    }

    /// Callers validate affordability first.
    pub(crate) fn spend_skill_points(&mut self, amount: u32) {
        self.skill_points = self.skill_points.saturating_sub(amount);
    }

    pub(crate) fn grant_skill_points(&mut self, amount: u64) {
        let amount = amount.min(u32::MAX as u64) as u32;
        self.skill_points = self.skill_points.saturating_add(amount);
    }

    /// Moves both pending pools into the spendable pools.
    pub(crate) fn release_pending(&mut self) -> (u32, u32) {
        let released = (self.pending_stat_points, self.pending_skill_points);
        self.stat_points = self.stat_points.saturating_add(released.0);
        self.skill_points = self.skill_points.saturating_add(released.1);
        self.pending_stat_points = 0;
        self.pending_skill_points = 0;
        released
    }

    pub(crate) fn set_job(&mut self, job: JobId) {
        self.job = job;
    }

    /// Skill points ever granted and not yet spent (spendable + pending).
    pub fn unspent_skill_points(&self) -> u64 {
        self.skill_points as u64 + self.pending_skill_points as u64
    }
}

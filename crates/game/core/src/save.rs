//! Logical save record of one character.
//!
//! The record is format-agnostic; the runtime picks the encoding. Loading
//! never rejects a record: values are clamped into valid ranges and references
//! to content that no longer exists are dropped and reported.

use strum::EnumCount;

use crate::catalog::Catalog;
use crate::character::Character;
use crate::common::{CharacterId, JobId, SkillId};
use crate::progression::ProgressionState;
use crate::skills::SkillManager;
use crate::stats::{ResourcePools, StatBlock, StatKind};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSave {
    pub id: CharacterId,
    pub level: u32,
    pub xp: u64,
    pub job: JobId,
    pub manual_stats: [u32; StatKind::COUNT],
    pub auto_stats: [u32; StatKind::COUNT],
    pub bonus_stats: [i32; StatKind::COUNT],
    pub stat_points: u32,
    pub skill_points: u32,
    pub pending_stat_points: u32,
    pub pending_skill_points: u32,
    pub learned: Vec<(SkillId, u8)>,
    pub hotbar: Vec<Option<SkillId>>,
    pub pools: ResourcePools,
}

/// A correction applied while loading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadIssue {
    /// Stored job is not registered; the root job was used instead.
    UnknownJob(JobId),
    /// Learned skill is not registered and was dropped.
    UnknownSkill(SkillId),
    /// Hotbar binding was dropped.
    InvalidBinding { slot: usize, skill: SkillId },
    LevelClamped { stored: u32, clamped: u32 },
}

impl LoadIssue {
    /// Missing content points at a broken configuration; clamping does not.
    pub fn is_integrity_fault(&self) -> bool {
        matches!(self, Self::UnknownJob(_) | Self::UnknownSkill(_))
    }
}

impl CharacterSave {
    pub fn capture(character: &Character) -> Self {
        let progression = character.progression();
        let stats = character.stats();
        Self {
            id: character.id(),
            level: progression.level(),
            xp: progression.xp(),
            job: progression.job().clone(),
            manual_stats: stats.manual_parts(),
            auto_stats: stats.auto_parts(),
            bonus_stats: stats.bonus_parts(),
            stat_points: progression.stat_points(),
            skill_points: progression.skill_points(),
            pending_stat_points: progression.pending_stat_points(),
            pending_skill_points: progression.pending_skill_points(),
            learned: character
                .skills()
                .learned()
                .map(|skill| (skill.id.clone(), skill.rank))
                .collect(),
            hotbar: character.skills().hotbar().to_vec(),
            pools: *character.pools(),
        }
    }

    /// Rebuilds a character, returning every correction that was needed.
    pub fn restore(self, catalog: &Catalog) -> (Character, Vec<LoadIssue>) {
        let mut issues = Vec::new();
        let config = catalog.config();

        let job = if catalog.jobs().contains(self.job.as_str()) {
            self.job
        } else {
            issues.push(LoadIssue::UnknownJob(self.job));
            catalog.jobs().root().id.clone()
        };

        let progression = ProgressionState::restore(
            self.level,
            self.xp,
            job,
            [
                self.stat_points,
                self.skill_points,
                self.pending_stat_points,
                self.pending_skill_points,
            ],
            config,
        );
        if progression.level() != self.level {
            issues.push(LoadIssue::LevelClamped {
                stored: self.level,
                clamped: progression.level(),
            });
        }

        let mut learned = Vec::with_capacity(self.learned.len());
        for (id, rank) in self.learned {
            if catalog.skills().contains(id.as_str()) {
                learned.push((id, rank));
            } else {
                issues.push(LoadIssue::UnknownSkill(id));
            }
        }
        let skills = SkillManager::restore(learned, self.hotbar.clone(), catalog.skills());
        for (slot, binding) in self.hotbar.into_iter().enumerate() {
            if let Some(skill) = binding
                && skills.hotbar().get(slot).is_none_or(|kept| kept.as_ref() != Some(&skill))
            {
                issues.push(LoadIssue::InvalidBinding { slot, skill });
            }
        }

        let stats = StatBlock::from_parts(self.manual_stats, self.auto_stats, self.bonus_stats);
        let character = Character::from_parts(
            self.id,
            progression,
            stats,
            Some(self.pools),
            skills,
            catalog,
        );
        (character, issues)
    }
}

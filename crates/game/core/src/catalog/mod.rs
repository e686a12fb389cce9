//! Read-only content bundle shared by every character of a session.
//!
//! Built once at startup and handed out by shared reference; nothing in it is
//! mutated afterwards.
mod error;

pub use error::RegistryError;

use crate::config::ProgressionConfig;
use crate::jobs::JobRegistry;
use crate::skills::SkillRegistry;
use crate::world::{BiomeTable, WorldLayout};

#[derive(Debug)]
pub struct Catalog {
    config: ProgressionConfig,
    jobs: JobRegistry,
    skills: SkillRegistry,
    biomes: BiomeTable,
    layout: WorldLayout,
}

impl Catalog {
    /// Cross-checks the registries against each other.
    ///
    /// # Errors
    ///
    /// - a skill requires a job that is not registered
    /// - a job lists a skill that is not registered, or that belongs to a job
    ///   outside the listing job's lineage
    pub fn new(
        config: ProgressionConfig,
        jobs: JobRegistry,
        skills: SkillRegistry,
        biomes: BiomeTable,
        layout: WorldLayout,
    ) -> Result<Self, RegistryError> {
        for skill in skills.iter() {
            if !jobs.contains(skill.required_job.as_str()) {
                return Err(RegistryError::UnknownSkillJob {
                    skill: skill.id.clone(),
                    job: skill.required_job.clone(),
                });
            }
        }
        for job in jobs.iter() {
            for id in &job.skills {
                let Some(skill) = skills.get(id.as_str()) else {
                    return Err(RegistryError::UnknownJobSkill {
                        job: job.id.clone(),
                        skill: id.clone(),
                    });
                };
                if !jobs.grants_access(job.id.as_str(), skill.required_job.as_str()) {
                    return Err(RegistryError::ForeignJobSkill {
                        job: job.id.clone(),
                        skill: id.clone(),
                    });
                }
            }
        }
        Ok(Self {
            config,
            jobs,
            skills,
            biomes,
            layout,
        })
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    pub fn jobs(&self) -> &JobRegistry {
        &self.jobs
    }

    pub fn skills(&self) -> &SkillRegistry {
        &self.skills
    }

    pub fn biomes(&self) -> &BiomeTable {
        &self.biomes
    }

    pub fn layout(&self) -> &WorldLayout {
        &self.layout
    }

    /// Total cost of every skill unlockable along the lineage of `job`.
    pub fn lineage_skill_budget(&self, job: &str) -> u64 {
        self.jobs
            .unlockable_skills(job)
            .map_or(0, |ids| self.skills.total_cost_to_max(ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit;

    #[test]
    fn lineage_budget_sums_max_costs() {
        let catalog = testkit::catalog();
        // first_aid 1x1
        assert_eq!(catalog.lineage_skill_budget("novice"), 1);
        // + bash 10x1, magnum_break 10x2, endure 5x1, sword_mastery 10x1
        assert_eq!(catalog.lineage_skill_budget("swordsman"), 1 + 10 + 20 + 5 + 10);
        assert_eq!(catalog.lineage_skill_budget("ghost"), 0);
    }

    #[test]
    fn rejects_dangling_references() {
        let config = ProgressionConfig::default();
        let jobs = testkit::jobs();
        let mut defs = testkit::skill_definitions();
        defs[0].required_job = "ghost".into();
        let skills = SkillRegistry::new(defs).unwrap();
        let result = Catalog::new(config, jobs, skills, BiomeTable::default(), WorldLayout::default());
        assert!(matches!(result, Err(RegistryError::UnknownSkillJob { .. })));
    }
}

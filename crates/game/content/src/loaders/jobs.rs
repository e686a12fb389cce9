//! Job tree loader.

use std::path::Path;

use progression_core::{JobDefinition, JobRegistry};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Job tree structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCatalog {
    pub jobs: Vec<JobDefinition>,
}

/// Loader for the job tree from RON files.
pub struct JobLoader;

impl JobLoader {
    /// Load job definitions from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<JobDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<JobDefinition>> {
        let catalog: JobCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse job catalog RON: {}", e))?;

        Ok(catalog.jobs)
    }

    /// Load and validate the job tree.
    pub fn load_registry(path: &Path) -> LoadResult<JobRegistry> {
        let definitions = Self::load(path)?;
        JobRegistry::new(definitions)
            .map_err(|e| anyhow::anyhow!("Invalid job tree in {}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use progression_core::{JobTier, Milestones};

    #[test]
    fn parses_requirements_and_gates() {
        let jobs = JobLoader::parse(
            r#"(
                jobs: [
                    (id: "novice", tier: Novice, name: "Novice"),
                    (
                        id: "swordsman",
                        tier: Tier1,
                        name: "Swordsman",
                        stat_bonuses: [(Strength, 5)],
                        requirement: (
                            min_level: 10,
                            predecessor: Some("novice"),
                            gates: ("EYE_BOSS | EVIL_BOSS"),
                        ),
                        skills: ["bash"],
                    ),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(jobs.len(), 2);
        let swordsman = &jobs[1];
        assert_eq!(swordsman.tier, JobTier::Tier1);
        assert_eq!(swordsman.requirement.min_level, 10);
        assert_eq!(
            swordsman.requirement.gates,
            Milestones::EYE_BOSS | Milestones::EVIL_BOSS
        );
        assert!(jobs[0].requirement.predecessor.is_none());
    }

    #[test]
    fn reports_malformed_ron() {
        let err = JobLoader::parse("(jobs: [(id: 3)])").unwrap_err();
        assert!(err.to_string().contains("job catalog"));
    }
}

//! Skill table loader.

use std::path::Path;

use progression_core::{SkillDefinition, SkillRegistry};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillDefinition>,
}

/// Loader for skill definitions from RON files.
pub struct SkillLoader;

impl SkillLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<SkillDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<SkillDefinition>> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        Ok(catalog.skills)
    }

    /// Load and validate the skill table, prerequisite graph included.
    pub fn load_registry(path: &Path) -> LoadResult<SkillRegistry> {
        let definitions = Self::load(path)?;
        SkillRegistry::new(definitions)
            .map_err(|e| anyhow::anyhow!("Invalid skill table in {}: {}", path.display(), e))
    }
}

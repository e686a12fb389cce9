//! Content factory for building the catalog from data files.

use std::path::{Path, PathBuf};

use progression_core::{Catalog, JobDefinition, ProgressionConfig, SkillDefinition};
use tracing::{debug, info, warn};

use crate::files;
use crate::loaders::{
    BiomeCatalog, BiomeLoader, ConfigLoader, JobLoader, LoadResult, SkillLoader,
};

/// Content factory that loads all progression content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── jobs.ron
/// ├── skills.ron
/// └── biomes.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory for the data set shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load progression tuning from `config.toml`.
    pub fn load_config(&self) -> LoadResult<ProgressionConfig> {
        ConfigLoader::load(&self.path(files::CONFIG))
    }

    /// Load the job tree from `jobs.ron`.
    pub fn load_jobs(&self) -> LoadResult<Vec<JobDefinition>> {
        JobLoader::load(&self.path(files::JOBS))
    }

    /// Load the skill table from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<Vec<SkillDefinition>> {
        SkillLoader::load(&self.path(files::SKILLS))
    }

    /// Load biome profiles and the world layout from `biomes.ron`.
    pub fn load_biomes(&self) -> LoadResult<BiomeCatalog> {
        BiomeLoader::load(&self.path(files::BIOMES))
    }

    /// Load every file and cross-validate them into a [`Catalog`].
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        for name in files::REQUIRED {
            let path = self.path(name);
            if !path.exists() {
                anyhow::bail!("Missing content file {}", path.display());
            }
        }

        let config = self.load_config()?;
        let jobs = JobLoader::load_registry(&self.path(files::JOBS))?;
        let skills = SkillLoader::load_registry(&self.path(files::SKILLS))?;
        let biomes = self.load_biomes()?;

        let missing = biomes.missing_categories();
        if !missing.is_empty() {
            warn!(
                target: "progression::content",
                categories = ?missing,
                "biome categories without a profile use the fallback"
            );
        }
        debug!(
            target: "progression::content",
            jobs = jobs.len(),
            skills = skills.len(),
            "registries validated"
        );

        let (table, layout) = biomes.into_parts();
        let catalog = Catalog::new(config, jobs, skills, table, layout).map_err(|e| {
            anyhow::anyhow!(
                "Inconsistent content in {}: {}",
                self.data_dir.display(),
                e
            )
        })?;

        info!(
            target: "progression::content",
            data_dir = %self.data_dir.display(),
            jobs = catalog.jobs().len(),
            skills = catalog.skills().len(),
            max_level = catalog.config().max_level,
            "content catalog loaded"
        );
        Ok(catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }
}

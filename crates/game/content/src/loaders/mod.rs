//! Content loaders for reading progression data from files.
//!
//! Each loader parses one file into the `progression-core` types directly;
//! [`ContentFactory`] ties them together into a validated catalog.

pub mod biomes;
pub mod config;
pub mod factory;
pub mod jobs;
pub mod skills;

pub use biomes::{BiomeCatalog, BiomeLoader};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use jobs::{JobCatalog, JobLoader};
pub use skills::{SkillCatalog, SkillLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

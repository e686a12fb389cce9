//! Data-driven progression content and its loaders.
//!
//! This crate ships the default content set under `data/` and provides loaders
//! that turn the RON/TOML files into the read-only registries of
//! `progression-core`:
//! - Job tree (RON)
//! - Skill table (RON)
//! - Biome level profiles and world layout (RON)
//! - Progression tuning (TOML)
//!
//! Content is built once into a [`progression_core::Catalog`] and never
//! appears in character state.

pub mod files;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BiomeCatalog, BiomeLoader, ConfigLoader, ContentFactory, JobCatalog, JobLoader, LoadResult,
    SkillCatalog, SkillLoader,
};

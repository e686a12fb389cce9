//! Biome level profile loader.

use std::collections::HashMap;
use std::path::Path;

use progression_core::{BiomeCategory, BiomeLevelProfile, BiomeTable, WorldEvent, WorldLayout};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::loaders::{LoadResult, read_file};

/// Biome data structure for RON files.
///
/// ```ron
/// (
///     layout: (underground_top: 300, cavern_top: 500, underworld_top: 1100),
///     fallback: (base_level: 1, stage_caps: (15, 40, 60, 80), growth_rate: 5000),
///     biomes: {
///         Forest: (base_level: 1, stage_caps: (10, 35, 55, 75), growth_rate: 5000),
///     },
///     events: {},
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiomeCatalog {
    #[serde(default)]
    pub layout: WorldLayout,
    #[serde(default = "fallback_profile")]
    pub fallback: BiomeLevelProfile,
    #[serde(default)]
    pub biomes: HashMap<BiomeCategory, BiomeLevelProfile>,
    #[serde(default)]
    pub events: HashMap<WorldEvent, BiomeLevelProfile>,
}

fn fallback_profile() -> BiomeLevelProfile {
    BiomeLevelProfile::FALLBACK
}

impl BiomeCatalog {
    /// Categories that will resolve to the fallback profile.
    pub fn missing_categories(&self) -> Vec<BiomeCategory> {
        BiomeCategory::iter()
            .filter(|category| !self.biomes.contains_key(category))
            .collect()
    }

    pub fn into_parts(self) -> (BiomeTable, WorldLayout) {
        let table = BiomeTable {
            biomes: self.biomes,
            events: self.events,
            fallback: self.fallback,
        };
        (table, self.layout)
    }
}

/// Loader for biome profiles and the world layout from RON files.
pub struct BiomeLoader;

impl BiomeLoader {
    pub fn load(path: &Path) -> LoadResult<BiomeCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BiomeCatalog> {
        let catalog: BiomeCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse biome RON: {}", e))?;

        let layout = &catalog.layout;
        if !(layout.underground_top < layout.cavern_top
            && layout.cavern_top < layout.underworld_top)
        {
            anyhow::bail!(
                "World layout depths must increase: underground {} / cavern {} / underworld {}",
                layout.underground_top,
                layout.cavern_top,
                layout.underworld_top
            );
        }

        let profiles = catalog
            .biomes
            .iter()
            .map(|(category, profile)| (format!("{category:?}"), profile))
            .chain(
                catalog
                    .events
                    .iter()
                    .map(|(event, profile)| (format!("{event:?}"), profile)),
            );
        for (name, profile) in profiles {
            if profile.stage_caps.windows(2).any(|pair| pair[0] > pair[1]) {
                anyhow::bail!("Stage caps of {} must not decrease", name);
            }
        }

        Ok(catalog)
    }
}

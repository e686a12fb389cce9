//! Biome categories and their level profiles.

use std::collections::HashMap;

use strum::{EnumCount, EnumIter, IntoStaticStr};

use crate::config::BiomeScaling;
use crate::formula::Multiplier;

use super::{WorldEvent, WorldStage};

/// Where a monster lives, as far as level scaling is concerned.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, EnumCount, EnumIter, IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BiomeCategory {
    // ===== depth defaults =====
    #[default]
    Forest,
    Underground,
    Cavern,
    Underworld,

    // ===== biome tags =====
    Desert,
    Snow,
    Jungle,
    Ocean,
    Mushroom,
    Hallow,

    // ===== hazards =====
    Corruption,
    Crimson,
    Meteor,

    // ===== structures =====
    Dungeon,
    Temple,
}

/// Static level data for one biome category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BiomeLevelProfile {
    pub base_level: u32,
    /// Level cap per [`WorldStage`].
    pub stage_caps: [u32; WorldStage::COUNT],
    /// Floor growth per world level.
    pub growth_rate: Multiplier,
    /// Only populated once the world reached hardmode.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hardmode_only: bool,
}

impl BiomeLevelProfile {
    /// Low-tier profile used for categories without data.
    pub const FALLBACK: Self = Self {
        base_level: 1,
        stage_caps: [15, 40, 60, 80],
        growth_rate: Multiplier::from_bps(5_000),
        hardmode_only: false,
    };

    /// Cap for `stage` after global scaling; never below 1.
    pub fn cap(&self, stage: WorldStage, scaling: &BiomeScaling) -> u32 {
        let raw = self.stage_caps[stage.index()] as u64;
        (scaling.cap_scale.apply(raw).min(u32::MAX as u64) as u32).max(1)
    }

    /// `base + world_level * growth`, scaled; never below 1.
    pub fn floor(&self, world_level: u32, scaling: &BiomeScaling) -> u32 {
        let grown = self.base_level as u64 + self.growth_rate.apply(world_level as u64);
        (scaling.floor_scale.apply(grown).min(u32::MAX as u64) as u32).max(1)
    }
}

/// Profiles keyed by biome category and by world event.
///
/// Lookups never fail: a category without a profile resolves to `fallback`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BiomeTable {
    #[cfg_attr(feature = "serde", serde(default))]
    pub biomes: HashMap<BiomeCategory, BiomeLevelProfile>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub events: HashMap<WorldEvent, BiomeLevelProfile>,
    #[cfg_attr(feature = "serde", serde(default = "fallback_profile"))]
    pub fallback: BiomeLevelProfile,
}

#[cfg(feature = "serde")]
fn fallback_profile() -> BiomeLevelProfile {
    BiomeLevelProfile::FALLBACK
}

impl Default for BiomeTable {
    fn default() -> Self {
        Self {
            biomes: HashMap::new(),
            events: HashMap::new(),
            fallback: BiomeLevelProfile::FALLBACK,
        }
    }
}

impl BiomeTable {
    pub fn profile(&self, category: BiomeCategory) -> &BiomeLevelProfile {
        self.biomes.get(&category).unwrap_or(&self.fallback)
    }

    pub fn event_profile(&self, event: WorldEvent) -> &BiomeLevelProfile {
        self.events.get(&event).unwrap_or(&self.fallback)
    }

    pub fn with_biome(mut self, category: BiomeCategory, profile: BiomeLevelProfile) -> Self {
        self.biomes.insert(category, profile);
        self
    }

    pub fn with_event(mut self, event: WorldEvent, profile: BiomeLevelProfile) -> Self {
        self.events.insert(event, profile);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_category_falls_back() {
        let table = BiomeTable::default();
        assert_eq!(*table.profile(BiomeCategory::Temple), BiomeLevelProfile::FALLBACK);
        assert_eq!(*table.event_profile(WorldEvent::BloodMoon), BiomeLevelProfile::FALLBACK);
    }

    #[test]
    fn floor_grows_with_world_level() {
        let scaling = BiomeScaling::default();
        let profile = BiomeLevelProfile {
            base_level: 10,
            stage_caps: [20, 40, 60, 80],
            growth_rate: Multiplier::from_percent(150),
            hardmode_only: false,
        };
        assert_eq!(profile.floor(0, &scaling), 10);
        assert_eq!(profile.floor(10, &scaling), 25);
        assert_eq!(profile.cap(WorldStage::PostMechanical, &scaling), 60);

        let halved = BiomeScaling {
            cap_scale: Multiplier::from_percent(50),
            ..scaling
        };
        assert_eq!(profile.cap(WorldStage::PreHardmode, &halved), 10);
    }

    #[test]
    fn scaled_cap_saturates_instead_of_wrapping() {
        let profile = BiomeLevelProfile {
            base_level: u32::MAX,
            stage_caps: [1 << 31; 4],
            growth_rate: Multiplier::ONE,
            hardmode_only: false,
        };
        let doubled = BiomeScaling {
            cap_scale: Multiplier::from_percent(200),
            floor_scale: Multiplier::from_percent(200),
            ..BiomeScaling::default()
        };
        assert_eq!(profile.cap(WorldStage::PreHardmode, &doubled), u32::MAX);
        assert_eq!(profile.floor(0, &doubled), u32::MAX);
    }
}

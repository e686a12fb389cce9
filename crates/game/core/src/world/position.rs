//! Classification of a world position into a biome category.
//!
//! Priority, highest first:
//!
//! 1. special structures (dungeon, temple)
//! 2. environmental hazard zones (corruption, crimson, meteor)
//! 3. biome-tag zones (hallow, jungle, mushroom, snow, desert, ocean)
//! 4. the default of the position's depth band

use bitflags::bitflags;

use super::BiomeCategory;

bitflags! {
    /// Zones the host reports for a position. Several may overlap.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ZoneFlags: u32 {
        const DUNGEON = 1 << 0;
        const TEMPLE = 1 << 1;

        const CORRUPTION = 1 << 4;
        const CRIMSON = 1 << 5;
        const METEOR = 1 << 6;

        const HALLOW = 1 << 8;
        const JUNGLE = 1 << 9;
        const MUSHROOM = 1 << 10;
        const SNOW = 1 << 11;
        const DESERT = 1 << 12;
        const OCEAN = 1 << 13;
    }
}

impl ZoneFlags {
    const STRUCTURES: [(ZoneFlags, BiomeCategory); 2] = [
        (ZoneFlags::TEMPLE, BiomeCategory::Temple),
        (ZoneFlags::DUNGEON, BiomeCategory::Dungeon),
    ];

    const HAZARDS: [(ZoneFlags, BiomeCategory); 3] = [
        (ZoneFlags::CORRUPTION, BiomeCategory::Corruption),
        (ZoneFlags::CRIMSON, BiomeCategory::Crimson),
        (ZoneFlags::METEOR, BiomeCategory::Meteor),
    ];

    const TAGS: [(ZoneFlags, BiomeCategory); 6] = [
        (ZoneFlags::HALLOW, BiomeCategory::Hallow),
        (ZoneFlags::JUNGLE, BiomeCategory::Jungle),
        (ZoneFlags::MUSHROOM, BiomeCategory::Mushroom),
        (ZoneFlags::SNOW, BiomeCategory::Snow),
        (ZoneFlags::DESERT, BiomeCategory::Desert),
        (ZoneFlags::OCEAN, BiomeCategory::Ocean),
    ];
}

/// Vertical layer of the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DepthBand {
    #[default]
    Surface,
    Underground,
    Cavern,
    Underworld,
}

impl DepthBand {
    pub const fn default_biome(self) -> BiomeCategory {
        match self {
            Self::Surface => BiomeCategory::Forest,
            Self::Underground => BiomeCategory::Underground,
            Self::Cavern => BiomeCategory::Cavern,
            Self::Underworld => BiomeCategory::Underworld,
        }
    }
}

/// Tile rows where each depth band begins; `y` grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct WorldLayout {
    pub underground_top: i32,
    pub cavern_top: i32,
    pub underworld_top: i32,
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self {
            underground_top: 300,
            cavern_top: 500,
            underworld_top: 1_100,
        }
    }
}

impl WorldLayout {
    pub fn depth_band(&self, y: i32) -> DepthBand {
        if y >= self.underworld_top {
            DepthBand::Underworld
        } else if y >= self.cavern_top {
            DepthBand::Cavern
        } else if y >= self.underground_top {
            DepthBand::Underground
        } else {
            DepthBand::Surface
        }
    }
}

/// A tile position with the zones the host detected there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPosition {
    pub x: i32,
    pub y: i32,
    pub zones: ZoneFlags,
}

impl WorldPosition {
    pub fn new(x: i32, y: i32, zones: ZoneFlags) -> Self {
        Self { x, y, zones }
    }
}

/// Picks the highest-priority category for `position`.
pub fn classify(position: &WorldPosition, layout: &WorldLayout) -> BiomeCategory {
    let groups: [&[(ZoneFlags, BiomeCategory)]; 3] =
        [&ZoneFlags::STRUCTURES, &ZoneFlags::HAZARDS, &ZoneFlags::TAGS];
    groups
        .into_iter()
        .flatten()
        .find(|(flag, _)| position.zones.contains(*flag))
        .map(|(_, category)| *category)
        .unwrap_or_else(|| layout.depth_band(position.y).default_biome())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_defaults() {
        let layout = WorldLayout::default();
        let at = |y| classify(&WorldPosition::new(0, y, ZoneFlags::empty()), &layout);
        assert_eq!(at(0), BiomeCategory::Forest);
        assert_eq!(at(300), BiomeCategory::Underground);
        assert_eq!(at(800), BiomeCategory::Cavern);
        assert_eq!(at(1_150), BiomeCategory::Underworld);
    }

    #[test]
    fn structures_beat_hazards_beat_tags() {
        let layout = WorldLayout::default();
        let at = |zones| classify(&WorldPosition::new(0, 600, zones), &layout);
        assert_eq!(
            at(ZoneFlags::DUNGEON | ZoneFlags::CORRUPTION | ZoneFlags::SNOW),
            BiomeCategory::Dungeon
        );
        assert_eq!(at(ZoneFlags::CRIMSON | ZoneFlags::JUNGLE), BiomeCategory::Crimson);
        assert_eq!(at(ZoneFlags::JUNGLE | ZoneFlags::DESERT), BiomeCategory::Jungle);
        assert_eq!(at(ZoneFlags::TEMPLE | ZoneFlags::JUNGLE), BiomeCategory::Temple);
    }
}

//! World-side inputs: progress milestones, biome classification and monster
//! level assignment.
mod assign;
mod biome;
mod position;
mod progress;

pub use assign::{LevelAssigner, LevelAssignment, LevelSource, SpawnContext};
pub use biome::{BiomeCategory, BiomeLevelProfile, BiomeTable};
pub use position::{DepthBand, WorldLayout, WorldPosition, ZoneFlags, classify};
pub use progress::{Milestones, WorldEvent, WorldProgress, WorldStage};

//! Monster level assignment.

use crate::common::Tick;
use crate::config::BiomeScaling;
use crate::rng::{RngOracle, compute_seed};

use super::{
    BiomeCategory, BiomeLevelProfile, BiomeTable, WorldEvent, WorldLayout, WorldPosition,
    WorldProgress, WorldStage, classify,
};

/// A hostile entity being assigned a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnContext {
    /// Host identifier of the entity; mixed into the sampling seed.
    pub entity: u32,
    pub position: WorldPosition,
    pub tick: Tick,
    /// Stage in which this kind of entity first appears. An entity native to an
    /// earlier stage than the world's current one is capped at its native
    /// stage's ceiling.
    pub native_stage: Option<WorldStage>,
}

impl SpawnContext {
    pub fn at(entity: u32, position: WorldPosition, tick: Tick) -> Self {
        Self {
            entity,
            position,
            tick,
            native_stage: None,
        }
    }

    pub fn with_native_stage(mut self, stage: WorldStage) -> Self {
        self.native_stage = Some(stage);
        self
    }
}

/// Which profile decided the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelSource {
    Biome(BiomeCategory),
    Event(WorldEvent),
}

/// Result of a level assignment with the bounds it was sampled in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelAssignment {
    pub source: LevelSource,
    /// Never above `level`; a weak clamp lowers it with the level.
    pub floor: u32,
    pub cap: u32,
    pub level: u32,
    /// Hardmode-only profile in a pre-hardmode world.
    pub locked: bool,
    /// Level was lowered to the entity's native-stage ceiling.
    pub weak_clamped: bool,
}

/// Stateless level assignment over shared biome data.
pub struct LevelAssigner<'a, R: RngOracle + ?Sized> {
    table: &'a BiomeTable,
    layout: &'a WorldLayout,
    scaling: &'a BiomeScaling,
    rng: &'a R,
    world_seed: u64,
}

impl<'a, R: RngOracle + ?Sized> LevelAssigner<'a, R> {
    pub fn new(
        table: &'a BiomeTable,
        layout: &'a WorldLayout,
        scaling: &'a BiomeScaling,
        rng: &'a R,
        world_seed: u64,
    ) -> Self {
        Self {
            table,
            layout,
            scaling,
            rng,
            world_seed,
        }
    }

    /// Assigns a level to `spawn`. Never fails.
    ///
    /// An active world event overrides positional detection. The level is
    /// sampled uniformly in `[floor, floor + range_width]` and clamped to the
    /// cap of the current world stage.
    pub fn assign(&self, spawn: &SpawnContext, world: &WorldProgress) -> LevelAssignment {
        let (source, profile) = match world.active_event() {
            Some(event) => (LevelSource::Event(event), self.table.event_profile(event)),
            None => {
                let category = classify(&spawn.position, self.layout);
                (LevelSource::Biome(category), self.table.profile(category))
            }
        };

        if profile.hardmode_only && !world.is_hardmode() {
            return LevelAssignment {
                source,
                floor: 1,
                cap: 1,
                level: 1,
                locked: true,
                weak_clamped: false,
            };
        }

        let stage = world.stage();
        let cap = profile.cap(stage, self.scaling);
        let floor = profile.floor(world.world_level(), self.scaling).min(cap);
        let upper = floor.saturating_add(self.scaling.range_width).min(cap);
        let seed = compute_seed(self.world_seed, spawn.entity, spawn.tick.0, 0);
        let sampled = self.rng.range(seed, floor, upper);

        let (level, weak_clamped) = match native_ceiling(profile, spawn, stage, self.scaling) {
            Some(ceiling) if sampled > ceiling => (ceiling, true),
            _ => (sampled, false),
        };

        LevelAssignment {
            source,
            floor: floor.min(level),
            cap,
            level,
            locked: false,
            weak_clamped,
        }
    }
}

fn native_ceiling(
    profile: &BiomeLevelProfile,
    spawn: &SpawnContext,
    stage: WorldStage,
    scaling: &BiomeScaling,
) -> Option<u32> {
    let native = spawn.native_stage?;
    (native < stage).then(|| profile.cap(native, scaling))
}

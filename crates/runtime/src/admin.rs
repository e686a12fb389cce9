//! Operator commands over world progress.

use progression_core::{Milestones, WorldEvent, WorldProgress, WorldStage};

/// Admin surface; only the authoritative session accepts these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminCommand {
    /// Overwrites milestones and world level.
    SetWorldProgress {
        milestones: Milestones,
        world_level: u32,
    },
    /// Marks milestones defeated without lowering the world level.
    RecordMilestone(Milestones),
    /// Re-derives the world level from the defeated milestones.
    RecalculateWorldLevel,
    /// Starts (`Some`) or ends (`None`) a world event.
    SetEvent(Option<WorldEvent>),
}

/// World state after an admin command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdminOutcome {
    pub milestones: Milestones,
    pub world_level: u32,
    pub stage: WorldStage,
    pub event: Option<WorldEvent>,
}

impl AdminCommand {
    pub(crate) fn apply(self, world: &mut WorldProgress) -> AdminOutcome {
        match self {
            Self::SetWorldProgress {
                milestones,
                world_level,
            } => world.set(milestones, world_level),
            Self::RecordMilestone(milestones) => {
                world.record_milestone(milestones);
            }
            Self::RecalculateWorldLevel => {
                world.recalculate_level();
            }
            Self::SetEvent(event) => world.set_event(event),
        }
        AdminOutcome::of(world)
    }
}

impl AdminOutcome {
    pub fn of(world: &WorldProgress) -> Self {
        Self {
            milestones: world.milestones(),
            world_level: world.world_level(),
            stage: world.stage(),
            event: world.active_event(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_recalculate() {
        let mut world = WorldProgress::new();
        let outcome = AdminCommand::SetWorldProgress {
            milestones: Milestones::UNDERWORLD_WALL,
            world_level: 42,
        }
        .apply(&mut world);
        assert_eq!(outcome.world_level, 42);
        assert_eq!(outcome.stage, WorldStage::EarlyHardmode);

        let outcome = AdminCommand::RecalculateWorldLevel.apply(&mut world);
        assert_eq!(outcome.world_level, Milestones::UNDERWORLD_WALL.weight());
    }

    #[test]
    fn events_toggle() {
        let mut world = WorldProgress::new();
        let outcome = AdminCommand::SetEvent(Some(WorldEvent::BloodMoon)).apply(&mut world);
        assert_eq!(outcome.event, Some(WorldEvent::BloodMoon));
        let outcome = AdminCommand::SetEvent(None).apply(&mut world);
        assert_eq!(outcome.event, None);
    }
}

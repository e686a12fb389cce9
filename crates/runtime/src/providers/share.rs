//! Party experience sharing.

use std::collections::HashMap;
use std::sync::RwLock;

use progression_core::{CharacterId, WorldPosition};

/// Decides who shares the experience of a kill.
///
/// Every character returned receives its own, independently resolved award;
/// the killer is always included by the session even if omitted here.
pub trait XpShareProvider: Send + Sync {
    fn eligible(&self, killer: CharacterId, radius: u32) -> Vec<CharacterId>;
}

/// No sharing: the killer alone is rewarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct SoloShare;

impl XpShareProvider for SoloShare {
    fn eligible(&self, killer: CharacterId, _radius: u32) -> Vec<CharacterId> {
        vec![killer]
    }
}

#[derive(Debug, Clone, Copy)]
struct Member {
    party: u32,
    position: WorldPosition,
}

/// Party membership and last known positions, updated by the host.
#[derive(Debug, Default)]
pub struct PartyRoster {
    members: RwLock<HashMap<CharacterId, Member>>,
}

impl PartyRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(&self, character: CharacterId, party: u32, position: WorldPosition) {
        if let Ok(mut members) = self.members.write() {
            members.insert(character, Member { party, position });
        }
    }

    pub fn leave(&self, character: CharacterId) {
        if let Ok(mut members) = self.members.write() {
            members.remove(&character);
        }
    }

    pub fn update_position(&self, character: CharacterId, position: WorldPosition) {
        if let Ok(mut members) = self.members.write()
            && let Some(member) = members.get_mut(&character)
        {
            member.position = position;
        }
    }
}

fn within(a: &WorldPosition, b: &WorldPosition, radius: u32) -> bool {
    let dx = (a.x as i64 - b.x as i64).unsigned_abs();
    let dy = (a.y as i64 - b.y as i64).unsigned_abs();
    let radius = radius as u64;
    dx * dx + dy * dy <= radius * radius
}

impl XpShareProvider for PartyRoster {
    fn eligible(&self, killer: CharacterId, radius: u32) -> Vec<CharacterId> {
        let Ok(members) = self.members.read() else {
            return vec![killer];
        };
        let Some(origin) = members.get(&killer).copied() else {
            return vec![killer];
        };

        let mut eligible: Vec<CharacterId> = members
            .iter()
            .filter(|(_, member)| {
                member.party == origin.party && within(&member.position, &origin.position, radius)
            })
            .map(|(id, _)| *id)
            .collect();
        eligible.sort_unstable();
        eligible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use progression_core::ZoneFlags;

    fn at(x: i32, y: i32) -> WorldPosition {
        WorldPosition {
            x,
            y,
            zones: ZoneFlags::empty(),
        }
    }

    #[test]
    fn shares_with_nearby_party_members_only() {
        let roster = PartyRoster::new();
        roster.join(CharacterId(1), 10, at(0, 0));
        roster.join(CharacterId(2), 10, at(30, 40));
        roster.join(CharacterId(3), 10, at(31, 40));
        roster.join(CharacterId(4), 11, at(1, 1));

        assert_eq!(
            roster.eligible(CharacterId(1), 50),
            vec![CharacterId(1), CharacterId(2)]
        );

        roster.update_position(CharacterId(3), at(3, 4));
        assert_eq!(
            roster.eligible(CharacterId(1), 50),
            vec![CharacterId(1), CharacterId(2), CharacterId(3)]
        );

        roster.leave(CharacterId(2));
        assert_eq!(
            roster.eligible(CharacterId(1), 5),
            vec![CharacterId(1), CharacterId(3)]
        );
    }

    #[test]
    fn unknown_killer_is_solo() {
        let roster = PartyRoster::new();
        assert_eq!(roster.eligible(CharacterId(9), 50), vec![CharacterId(9)]);
        assert_eq!(SoloShare.eligible(CharacterId(9), 50), vec![CharacterId(9)]);
    }
}

//! Multi-participant behaviour: forwarding, party sharing, admin authority
//! and monster level assignment.

mod common;

use std::sync::Arc;

use common::{bundled_catalog, character_at, session};
use progression_core::{
    CharacterId, Milestones, SpawnContext, Tick, WorldPosition, WorldProgress, XpRejection,
    ZoneFlags,
};
use progression_runtime::{
    AdminCommand, KillEvent, OutboundMessage, PartyRoster, RuntimeError, SessionRole,
    XpResolution, XpShareProvider,
};

const LEADER: CharacterId = CharacterId(1);
const MEMBER: CharacterId = CharacterId(2);
const STRAGGLER: CharacterId = CharacterId(3);

#[test]
fn remote_session_forwards_experience_to_authority() {
    let catalog = bundled_catalog();
    let (mut remote, _) = session(catalog.clone(), SessionRole::Remote);
    remote.insert(character_at(&catalog, LEADER, "swordsman", 20, 0));

    let report = remote
        .handle_kill(KillEvent::monster(LEADER, 400, 21, Tick(30)))
        .unwrap();
    assert_eq!(report.award(LEADER).unwrap().as_ref().unwrap(), &XpResolution::Forwarded);
    assert_eq!(remote.character(LEADER).unwrap().progression().xp(), 0);

    let outbox = remote.drain_outbox();
    assert_eq!(outbox.len(), 1);
    assert!(remote.outbox().is_empty());

    // Across the wire and back.
    let wire = outbox[0].encode().unwrap();
    let message = OutboundMessage::decode(&wire).unwrap();
    assert_eq!(message.character(), LEADER);

    let (mut host, _) = session(catalog.clone(), SessionRole::Authoritative);
    host.insert(character_at(&catalog, LEADER, "swordsman", 20, 0));
    let resolution = host.receive(message).unwrap();
    let outcome = resolution.outcome().expect("applied on the host");
    assert!(outcome.awarded >= 400);
    assert_eq!(host.character(LEADER).unwrap().progression().xp(), outcome.awarded);
}

#[test]
fn remote_session_refuses_authoritative_operations() {
    let catalog = bundled_catalog();
    let (mut remote, _) = session(catalog.clone(), SessionRole::Remote);
    remote.insert(character_at(&catalog, LEADER, "swordsman", 40, 0));

    let err = remote
        .admin(AdminCommand::RecordMilestone(Milestones::EYE_BOSS))
        .unwrap_err();
    assert!(matches!(err, RuntimeError::NotAuthoritative(_)));

    let report = remote
        .handle_kill(KillEvent::boss(LEADER, 3_000, 40, Milestones::EYE_BOSS, Tick(1)))
        .unwrap();
    assert!(!report.milestone_recorded);
    assert!(remote.world().milestones().is_empty());

    let message = OutboundMessage::ForwardExperience {
        character: LEADER,
        grant: KillEvent::monster(LEADER, 10, 40, Tick(1)).grant(),
        tick: Tick(1),
    };
    assert!(matches!(
        remote.receive(message),
        Err(RuntimeError::NotAuthoritative(_))
    ));
}

#[test]
fn party_members_in_range_share_kills_independently() {
    let catalog = bundled_catalog();
    let roster = Arc::new(PartyRoster::new());
    let here = WorldPosition::new(0, 0, ZoneFlags::empty());
    roster.join(LEADER, 1, here);
    roster.join(MEMBER, 1, WorldPosition::new(30, 0, ZoneFlags::empty()));
    roster.join(STRAGGLER, 1, WorldPosition::new(400, 0, ZoneFlags::empty()));

    let mut session = progression_runtime::Session::builder(catalog.clone())
        .share_provider(roster.clone())
        .share_radius(50)
        .build();
    session.insert(character_at(&catalog, LEADER, "swordsman", 30, 0));
    // Far below the monster: refused by the anti-boost gap.
    session.insert(character_at(&catalog, MEMBER, "novice", 5, 0));
    session.insert(character_at(&catalog, STRAGGLER, "swordsman", 30, 0));

    let report = session
        .handle_kill(KillEvent::monster(LEADER, 300, 32, Tick(10)))
        .unwrap();

    assert!(report.award(LEADER).unwrap().is_ok());
    assert!(matches!(
        report.award(MEMBER),
        Some(Err(RuntimeError::Experience(XpRejection::AntiBoost { .. })))
    ));
    assert!(report.award(STRAGGLER).is_none());
    assert!(session.character(LEADER).unwrap().progression().xp() > 0);
    assert_eq!(session.character(STRAGGLER).unwrap().progression().xp(), 0);

    // Moving into range makes the straggler eligible.
    roster.update_position(STRAGGLER, WorldPosition::new(10, 10, ZoneFlags::empty()));
    let report = session
        .handle_kill(KillEvent::monster(LEADER, 300, 32, Tick(20)))
        .unwrap();
    assert!(report.award(STRAGGLER).unwrap().is_ok());
}

/// Returns a fixed, unordered list with repeats.
struct FixedShare(Vec<CharacterId>);

impl XpShareProvider for FixedShare {
    fn eligible(&self, _killer: CharacterId, _radius: u32) -> Vec<CharacterId> {
        self.0.clone()
    }
}

#[test]
fn repeated_share_entries_resolve_once_per_character() {
    let catalog = bundled_catalog();
    let mut session = progression_runtime::Session::builder(catalog.clone())
        .share_provider(Arc::new(FixedShare(vec![MEMBER, LEADER, MEMBER])))
        .build();
    session.insert(character_at(&catalog, LEADER, "swordsman", 20, 0));
    session.insert(character_at(&catalog, MEMBER, "swordsman", 20, 0));

    let report = session
        .handle_kill(KillEvent::monster(LEADER, 200, 21, Tick(5)))
        .unwrap();

    let ids: Vec<_> = report.awards.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, [LEADER, MEMBER]);
    let leader_xp = session.character(LEADER).unwrap().progression().xp();
    assert!(leader_xp > 0);
    assert_eq!(session.character(MEMBER).unwrap().progression().xp(), leader_xp);
}

#[test]
fn unknown_characters_are_rejected() {
    let catalog = bundled_catalog();
    let (mut session, _) = session(catalog, SessionRole::Authoritative);
    session.join(LEADER).unwrap();

    assert!(matches!(
        session.join(LEADER),
        Err(RuntimeError::DuplicateCharacter(_))
    ));
    assert!(matches!(
        session.handle_kill(KillEvent::monster(MEMBER, 10, 1, Tick(0))),
        Err(RuntimeError::UnknownCharacter(_))
    ));
    assert!(matches!(
        session.learn_skill(MEMBER, "first_aid"),
        Err(RuntimeError::UnknownCharacter(_))
    ));
}

#[test]
fn admin_commands_reshape_world_progress() {
    let catalog = bundled_catalog();
    let (mut session, _) = session(catalog, SessionRole::Authoritative);

    let outcome = session
        .admin(AdminCommand::SetWorldProgress {
            milestones: Milestones::EYE_BOSS | Milestones::UNDERWORLD_WALL,
            world_level: 3,
        })
        .unwrap();
    assert_eq!(outcome.world_level, 3);
    assert!(session.world().is_hardmode());

    let outcome = session.admin(AdminCommand::RecalculateWorldLevel).unwrap();
    assert_eq!(
        outcome.world_level,
        (Milestones::EYE_BOSS | Milestones::UNDERWORLD_WALL).weight()
    );
}

#[test]
fn hardmode_only_biome_is_locked_before_hardmode() {
    let catalog = bundled_catalog();
    let hallow = SpawnContext::at(
        11,
        WorldPosition::new(0, 0, ZoneFlags::HALLOW),
        Tick(100),
    );

    let (session, _) = session(catalog.clone(), SessionRole::Authoritative);
    let locked = session.assign_level(&hallow);
    assert!(locked.locked);
    assert_eq!(locked.level, 1);

    let hardmode = progression_runtime::Session::builder(catalog)
        .world(WorldProgress::from_milestones(Milestones::UNDERWORLD_WALL))
        .world_seed(7)
        .build();
    let assignment = hardmode.assign_level(&hallow);
    assert!(!assignment.locked);
    assert!((assignment.floor..=assignment.cap).contains(&assignment.level));
    assert_eq!(assignment, hardmode.assign_level(&hallow));
}

//! Saving and loading characters through the repositories.

mod common;

use common::{bundled_catalog, level_to, session};
use progression_core::{CharacterId, CharacterSave, LoadIssue, SkillId};
use progression_runtime::{
    FileSaveRepository, InMemorySaveRepo, SaveRepository, SessionRole,
};

const HERO: CharacterId = CharacterId(9);

#[test]
fn character_survives_a_file_round_trip() {
    let catalog = bundled_catalog();
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();

    let (mut first, _) = session(catalog.clone(), SessionRole::Authoritative);
    first.join(HERO).unwrap();
    level_to(&mut first, HERO, 10);
    first.advance_job(HERO, "swordsman").unwrap();
    level_to(&mut first, HERO, 14);
    first.learn_skill(HERO, "bash").unwrap();
    first.bind_skill(HERO, 3, "bash").unwrap();
    first.save_character(HERO, &repo).unwrap();
    assert!(repo.exists(HERO));

    let (mut second, _) = session(catalog, SessionRole::Authoritative);
    let issues = second
        .load_character(HERO, &repo)
        .unwrap()
        .expect("record exists");
    assert!(issues.is_empty(), "{issues:?}");

    let original = CharacterSave::capture(first.character(HERO).unwrap());
    let restored = CharacterSave::capture(second.character(HERO).unwrap());
    assert_eq!(original, restored);
    assert_eq!(restored.job.as_str(), "swordsman");
    assert_eq!(restored.hotbar[3], Some(SkillId::from("bash")));
}

#[test]
fn missing_record_loads_nothing() {
    let catalog = bundled_catalog();
    let repo = InMemorySaveRepo::new();
    let (mut session, _) = session(catalog, SessionRole::Authoritative);

    assert!(session.load_character(HERO, &repo).unwrap().is_none());
    assert!(session.character(HERO).is_none());
}

#[test]
fn stale_content_is_dropped_and_reported() {
    let catalog = bundled_catalog();
    let repo = InMemorySaveRepo::new();
    let (mut session, _) = session(catalog, SessionRole::Authoritative);
    session.join(HERO).unwrap();
    session.save_character(HERO, &repo).unwrap();

    let mut record = repo.load(HERO).unwrap().unwrap();
    record.learned.push((SkillId::from("retired_skill"), 2));
    record.hotbar[0] = Some(SkillId::from("retired_skill"));
    record.level = 10_000;
    repo.save(&record).unwrap();

    let issues = session.load_character(HERO, &repo).unwrap().unwrap();
    assert!(issues.contains(&LoadIssue::UnknownSkill("retired_skill".into())));
    assert!(issues.contains(&LoadIssue::InvalidBinding {
        slot: 0,
        skill: "retired_skill".into(),
    }));
    assert!(issues.iter().any(|issue| matches!(issue, LoadIssue::LevelClamped { stored: 10_000, .. })));

    let hero = session.character(HERO).unwrap();
    assert_eq!(hero.skills().rank("retired_skill"), 0);
    assert_eq!(hero.level(), session.catalog().config().max_level);
}

#[test]
fn save_all_writes_every_character() {
    let catalog = bundled_catalog();
    let repo = InMemorySaveRepo::new();
    let (mut session, _) = session(catalog, SessionRole::Authoritative);
    for id in 1..=3 {
        session.join(CharacterId(id)).unwrap();
    }

    assert_eq!(session.save_all(&repo).unwrap(), 3);
    let ids = repo.list_ids().unwrap();
    assert_eq!(ids, [CharacterId(1), CharacterId(2), CharacterId(3)]);

    repo.delete(CharacterId(2)).unwrap();
    assert!(!repo.exists(CharacterId(2)));
}

//! Shared fixtures for the runtime integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use progression_content::ContentFactory;
use progression_core::{
    Catalog, Character, CharacterId, CharacterSave, JobId, JobRegistry, ProgressionConfig,
    SkillRegistry, XpGrant,
};
use progression_runtime::{CollectingFeedback, Session, SessionRole};

pub fn bundled_catalog() -> Arc<Catalog> {
    Arc::new(
        ContentFactory::bundled()
            .load_catalog()
            .expect("bundled content should load"),
    )
}

/// Bundled content with a tweaked progression config.
pub fn catalog_with(edit: impl FnOnce(&mut ProgressionConfig)) -> Arc<Catalog> {
    let factory = ContentFactory::bundled();
    let mut config = factory.load_config().expect("config");
    edit(&mut config);
    let jobs = JobRegistry::new(factory.load_jobs().expect("jobs")).expect("job registry");
    let skills = SkillRegistry::new(factory.load_skills().expect("skills")).expect("skill registry");
    let (biomes, layout) = factory.load_biomes().expect("biomes").into_parts();
    Arc::new(Catalog::new(config, jobs, skills, biomes, layout).expect("catalog"))
}

/// Disables the global uplift and the far-from-cap bonus so awards are exact.
pub fn flat_catalog() -> Arc<Catalog> {
    catalog_with(|config| {
        config.level_difference.global_uplift = progression_core::Multiplier::ONE;
        config.cap_proximity.far_bonus = progression_core::Multiplier::ONE;
    })
}

pub fn session(catalog: Arc<Catalog>, role: SessionRole) -> (Session, Arc<CollectingFeedback>) {
    let feedback = Arc::new(CollectingFeedback::new());
    let session = Session::builder(catalog)
        .role(role)
        .world_seed(7)
        .feedback(feedback.clone())
        .build();
    (session, feedback)
}

/// A character restored at `level` in `job` with the given unspent points.
pub fn character_at(
    catalog: &Catalog,
    id: CharacterId,
    job: &str,
    level: u32,
    skill_points: u32,
) -> Character {
    let mut save = CharacterSave::capture(&Character::new(id, catalog));
    save.job = JobId::from(job);
    save.level = level;
    save.xp = 0;
    save.skill_points = skill_points;
    let (character, issues) = save.restore(catalog);
    assert!(issues.is_empty(), "{issues:?}");
    character
}

/// Grants quest experience until `id` reaches `target`.
pub fn level_to(session: &mut Session, id: CharacterId, target: u32) {
    loop {
        let character = session.character(id).expect("character in session");
        if character.level() >= target {
            break;
        }
        let progression = character.progression();
        let missing = progression.required_xp(session.catalog().config()) - progression.xp();
        let now = session.now();
        session
            .grant_experience(id, XpGrant::quest(missing), now)
            .expect("quest grant");
    }
}

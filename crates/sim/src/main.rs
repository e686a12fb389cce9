//! Headless progression driver.
//!
//! Plays one scripted session against the content in `PROGRESSION_DATA_DIR`:
//! a character joins, hunts until the first job change, learns skills, waits
//! for a milestone boss and advances again. Records are written to
//! `PROGRESSION_SAVE_DIR` when set, otherwise kept in memory.
//!
//! ```bash
//! RUST_LOG=progression=debug cargo run -p progression-sim
//! ```

use anyhow::{Context, Result};
use progression_core::{
    CharacterId, Milestones, SpawnContext, StatKind, Tick, WorldPosition, XpGrant, ZoneFlags,
};
use progression_runtime::{
    AdminCommand, FileSaveRepository, InMemorySaveRepo, KillEvent, RuntimeConfig,
    SaveRepository, Session,
};

const HERO: CharacterId = CharacterId(1);

/// Ticks between scripted kills; inside the default combo window.
const KILL_INTERVAL: u64 = 120;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RuntimeConfig::from_env();
    tracing::info!("Data directory: {}", config.data_dir.display());
    tracing::info!("Session role: {}", config.role);

    anyhow::ensure!(
        config.role.is_authoritative(),
        "the scripted session resolves experience locally; run it as authoritative"
    );
    let mut session = Session::bootstrap(&config).context("failed to start session")?;
    session.join(HERO)?;

    let mut now = Tick::ZERO;
    let surface = WorldPosition::new(0, 0, ZoneFlags::empty());
    let caverns = WorldPosition::new(0, 600, ZoneFlags::empty());

    hunt_until(&mut session, &mut now, surface, 10)?;
    session.advance_job(HERO, "swordsman")?;

    hunt_until(&mut session, &mut now, caverns, 20)?;
    for _ in 0..3 {
        session.learn_skill(HERO, "bash")?;
    }
    session.learn_skill(HERO, "magnum_break")?;
    session.bind_skill(HERO, 0, "bash")?;
    session.allocate_stat(HERO, StatKind::Strength, 5)?;
    session.use_hotbar_slot(HERO, 0, now)?;

    // Grind to the tier cap with quest rewards, then try the next job.
    while session.character(HERO).map_or(0, |hero| hero.level()) < 52 {
        session.grant_experience(HERO, XpGrant::quest(5_000), now)?;
    }
    if let Err(err) = session.advance_job(HERO, "knight") {
        tracing::info!("Knight locked: {err}");
    }

    session.admin(AdminCommand::RecordMilestone(Milestones::DUNGEON_BOSS))?;
    let advance = session.advance_job(HERO, "knight")?;
    tracing::info!(
        "Advanced to {} ({} stat / {} skill points released)",
        advance.to,
        advance.released_stat_points,
        advance.released_skill_points
    );

    now = now + 10_000;
    session.tick(now);

    let repository: Box<dyn SaveRepository> = match &config.save_dir {
        Some(dir) => Box::new(FileSaveRepository::new(dir)?),
        None => Box::new(InMemorySaveRepo::new()),
    };
    let saved = session.save_all(repository.as_ref())?;
    tracing::info!("Saved {saved} character(s)");

    if let Some(hero) = session.character(HERO) {
        println!(
            "{} reached level {} as {} ({} xp toward the next level)",
            hero.id(),
            hero.level(),
            hero.job(),
            hero.progression().xp()
        );
    }
    Ok(())
}

/// Spawns monsters at `position` and kills them until the hero reaches `level`.
fn hunt_until(
    session: &mut Session,
    now: &mut Tick,
    position: WorldPosition,
    level: u32,
) -> Result<()> {
    let mut entity = 0;
    while session.character(HERO).map_or(0, |hero| hero.level()) < level {
        *now = *now + KILL_INTERVAL;
        entity += 1;
        session.tick(*now);

        let spawn = SpawnContext::at(entity, position, *now);
        let monster_level = session.assign_level(&spawn).level;
        let report = session.handle_kill(KillEvent::monster(HERO, 40, monster_level, *now))?;
        for (id, award) in report.awards {
            if let Err(err) = award {
                tracing::warn!("Award for {id} refused: {err}");
            }
        }
    }
    Ok(())
}

//! Progression session: world globals, the character table and every
//! player-facing operation.
//!
//! A session is synchronous and single-owner; the host game loop drives it by
//! calling [`Session::tick`] once per tick and the operation methods in
//! between. Content is shared read-only through an `Arc<Catalog>`.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use progression_content::ContentFactory;
use progression_core::{
    Catalog, Character, CharacterId, CharacterSave, ExternalModifiers, GameError, JobAdvance,
    JobId, LevelAssigner, LevelAssignment, LoadIssue, Milestones, PcgRng, ProgressionEvent,
    RngOracle, SkillActivation, SkillId, SkillUpgrade, SpawnContext, StatKind, Tick, TickReport,
    WorldProgress, XpGrant, XpOutcome, XpSource,
};

use crate::admin::{AdminCommand, AdminOutcome};
use crate::api::{Result, RuntimeError};
use crate::config::{RuntimeConfig, SessionRole};
use crate::events::{Feedback, FeedbackSink, OutboundMessage, TracingFeedback};
use crate::providers::{SoloShare, XpShareProvider};
use crate::repository::SaveRepository;

/// A monster kill reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KillEvent {
    pub killer: CharacterId,
    pub base_xp: u64,
    pub source: XpSource,
    /// Level assigned at spawn.
    pub monster_level: u32,
    /// Milestone boss flags this kill defeats, if any.
    pub milestone: Option<Milestones>,
    pub tick: Tick,
}

impl KillEvent {
    pub fn monster(killer: CharacterId, base_xp: u64, monster_level: u32, tick: Tick) -> Self {
        Self {
            killer,
            base_xp,
            source: XpSource::Monster,
            monster_level,
            milestone: None,
            tick,
        }
    }

    pub fn boss(
        killer: CharacterId,
        base_xp: u64,
        monster_level: u32,
        milestone: Milestones,
        tick: Tick,
    ) -> Self {
        Self {
            source: XpSource::Boss,
            milestone: Some(milestone),
            ..Self::monster(killer, base_xp, monster_level, tick)
        }
    }

    pub fn grant(&self) -> XpGrant {
        XpGrant::kill(self.source, self.base_xp, self.monster_level)
    }
}

/// How an experience request was handled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum XpResolution {
    Applied(XpOutcome),
    /// Queued for the authoritative participant.
    Forwarded,
}

impl XpResolution {
    pub fn outcome(&self) -> Option<&XpOutcome> {
        match self {
            Self::Applied(outcome) => Some(outcome),
            Self::Forwarded => None,
        }
    }
}

/// Per-recipient results of one kill.
#[derive(Debug)]
pub struct KillReport {
    pub milestone_recorded: bool,
    pub awards: Vec<(CharacterId, Result<XpResolution>)>,
}

impl KillReport {
    pub fn award(&self, character: CharacterId) -> Option<&Result<XpResolution>> {
        self.awards
            .iter()
            .find(|(id, _)| *id == character)
            .map(|(_, award)| award)
    }
}

pub struct Session {
    catalog: Arc<Catalog>,
    role: SessionRole,
    world: WorldProgress,
    world_seed: u64,
    share_radius: u32,
    now: Tick,
    characters: BTreeMap<CharacterId, Character>,
    rng: Box<dyn RngOracle>,
    share: Arc<dyn XpShareProvider>,
    feedback: Arc<dyn FeedbackSink>,
    outbox: Vec<OutboundMessage>,
}

impl Session {
    pub fn builder(catalog: Arc<Catalog>) -> SessionBuilder {
        SessionBuilder::new(catalog)
    }

    /// Loads content from `config.data_dir` and builds a session from `config`.
    pub fn bootstrap(config: &RuntimeConfig) -> Result<Self> {
        let catalog = ContentFactory::new(&config.data_dir)
            .load_catalog()
            .map_err(|e| RuntimeError::Content(format!("{e:#}")))?;
        Ok(Self::builder(Arc::new(catalog))
            .with_config(config)
            .build())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn role(&self) -> SessionRole {
        self.role
    }

    pub fn world(&self) -> &WorldProgress {
        &self.world
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> + '_ {
        self.characters.values()
    }

    /// Messages waiting to be sent to the authoritative participant.
    pub fn outbox(&self) -> &[OutboundMessage] {
        &self.outbox
    }

    pub fn drain_outbox(&mut self) -> Vec<OutboundMessage> {
        std::mem::take(&mut self.outbox)
    }

    // ========================================================================
    // Membership
    // ========================================================================

    /// Creates a fresh character in the root job.
    pub fn join(&mut self, id: CharacterId) -> Result<&Character> {
        if self.characters.contains_key(&id) {
            return Err(RuntimeError::DuplicateCharacter(id));
        }
        let character = Character::new(id, &self.catalog);
        info!(target: "progression::session", character = %id, job = %character.job(), "character joined");
        Ok(self.characters.entry(id).or_insert(character))
    }

    /// Adds an already built character, replacing any previous one.
    pub fn insert(&mut self, character: Character) -> Option<Character> {
        self.characters.insert(character.id(), character)
    }

    pub fn leave(&mut self, id: CharacterId) -> Option<Character> {
        self.characters.remove(&id)
    }

    pub fn set_external_modifiers(
        &mut self,
        id: CharacterId,
        external: ExternalModifiers,
    ) -> Result<()> {
        self.character_mut(id)?.set_external_modifiers(external);
        Ok(())
    }

    // ========================================================================
    // Monsters and experience
    // ========================================================================

    /// Rolls the level of a spawning monster.
    pub fn assign_level(&self, spawn: &SpawnContext) -> LevelAssignment {
        let assigner = LevelAssigner::new(
            self.catalog.biomes(),
            self.catalog.layout(),
            &self.catalog.config().biome,
            self.rng.as_ref(),
            self.world_seed,
        );
        let assignment = assigner.assign(spawn, &self.world);
        debug!(
            target: "progression::session",
            entity = spawn.entity,
            level = assignment.level,
            floor = assignment.floor,
            cap = assignment.cap,
            locked = assignment.locked,
            "monster level assigned"
        );
        assignment
    }

    /// Resolves a kill for the killer and every eligible party member.
    ///
    /// Each recipient's award is computed independently; one recipient being
    /// refused (anti-boost) does not affect the others.
    pub fn handle_kill(&mut self, kill: KillEvent) -> Result<KillReport> {
        if !self.characters.contains_key(&kill.killer) {
            return Err(RuntimeError::UnknownCharacter(kill.killer));
        }

        let milestone_recorded = match kill.milestone {
            Some(milestone) if self.role.is_authoritative() => {
                let recorded = self.world.record_milestone(milestone);
                if recorded {
                    info!(
                        target: "progression::session",
                        ?milestone,
                        world_level = self.world.world_level(),
                        stage = ?self.world.stage(),
                        "milestone defeated"
                    );
                }
                recorded
            }
            Some(_) => {
                debug!(target: "progression::session", "milestone left to the authoritative session");
                false
            }
            None => false,
        };

        // Killer first, then each eligible character once in provider order.
        let mut seen = BTreeSet::new();
        let recipients: Vec<CharacterId> = std::iter::once(kill.killer)
            .chain(self.share.eligible(kill.killer, self.share_radius))
            .filter(|id| self.characters.contains_key(id) && seen.insert(*id))
            .collect();

        let grant = kill.grant();
        let awards = recipients
            .into_iter()
            .map(|id| (id, self.grant_experience(id, grant, kill.tick)))
            .collect();

        Ok(KillReport {
            milestone_recorded,
            awards,
        })
    }

    /// Applies one experience grant, or forwards it when this session is remote.
    pub fn grant_experience(
        &mut self,
        id: CharacterId,
        grant: XpGrant,
        now: Tick,
    ) -> Result<XpResolution> {
        if !self.characters.contains_key(&id) {
            return Err(RuntimeError::UnknownCharacter(id));
        }

        if !self.role.is_authoritative() {
            self.outbox.push(OutboundMessage::ForwardExperience {
                character: id,
                grant,
                tick: now,
            });
            debug!(target: "progression::session", character = %id, base = grant.base, "experience forwarded");
            return Ok(XpResolution::Forwarded);
        }

        let catalog = Arc::clone(&self.catalog);
        let authority = self.role.authority();
        let result = self
            .character_mut(id)?
            .gain_experience(grant, authority, now, &catalog);
        let outcome = self.report(id, result)?;

        for event in &outcome.events {
            if let ProgressionEvent::LevelUp { level } = event {
                info!(target: "progression::session", character = %id, level, "level up");
            }
            self.feedback.notify(id, &Feedback::Progression(event.clone()));
        }
        Ok(XpResolution::Applied(outcome))
    }

    /// Handles a message forwarded by a remote participant.
    pub fn receive(&mut self, message: OutboundMessage) -> Result<XpResolution> {
        if !self.role.is_authoritative() {
            return Err(RuntimeError::NotAuthoritative("resolve forwarded experience"));
        }
        match message {
            OutboundMessage::ForwardExperience {
                character,
                grant,
                tick,
            } => self.grant_experience(character, grant, tick),
        }
    }

    // ========================================================================
    // Jobs
    // ========================================================================

    pub fn available_jobs(&self, id: CharacterId) -> Result<Vec<JobId>> {
        let character = self
            .characters
            .get(&id)
            .ok_or(RuntimeError::UnknownCharacter(id))?;
        Ok(character
            .available_jobs(&self.world, &self.catalog)
            .into_iter()
            .map(|job| job.id.clone())
            .collect())
    }

    pub fn advance_job(&mut self, id: CharacterId, target: &str) -> Result<JobAdvance> {
        let catalog = Arc::clone(&self.catalog);
        let now = self.now;
        let world = self.world;
        let result = self
            .character_mut(id)?
            .advance_job(target, &world, now, &catalog);
        let advance = self.report(id, result)?;

        info!(
            target: "progression::session",
            character = %id,
            from = %advance.from,
            to = %advance.to,
            released_stat_points = advance.released_stat_points,
            released_skill_points = advance.released_skill_points,
            budget_top_up = advance.budget_top_up,
            "job advanced"
        );
        self.feedback
            .notify(id, &Feedback::Progression(advance.event.clone()));
        let skill_points = advance.released_skill_points as u64 + advance.budget_top_up;
        if advance.released_stat_points > 0 || skill_points > 0 {
            self.feedback.notify(
                id,
                &Feedback::PointsReleased {
                    job: advance.to.clone(),
                    stat_points: advance.released_stat_points,
                    skill_points,
                },
            );
        }
        Ok(advance)
    }

    // ========================================================================
    // Stats and skills
    // ========================================================================

    pub fn allocate_stat(&mut self, id: CharacterId, stat: StatKind, amount: u32) -> Result<()> {
        let catalog = Arc::clone(&self.catalog);
        let result = self.character_mut(id)?.allocate_stat(stat, amount, &catalog);
        self.report(id, result)
    }

    pub fn learn_skill(&mut self, id: CharacterId, skill: &str) -> Result<SkillUpgrade> {
        let catalog = Arc::clone(&self.catalog);
        let result = self.character_mut(id)?.learn_skill(skill, &catalog);
        let upgrade = self.report(id, result)?;
        self.feedback.notify(
            id,
            &Feedback::SkillLearned {
                skill: upgrade.skill.clone(),
                rank: upgrade.rank,
            },
        );
        Ok(upgrade)
    }

    pub fn reset_skills(&mut self, id: CharacterId) -> Result<u64> {
        let catalog = Arc::clone(&self.catalog);
        let refunded = self.character_mut(id)?.reset_skills(&catalog);
        info!(target: "progression::session", character = %id, refunded, "skills reset");
        self.feedback.notify(id, &Feedback::SkillsReset { refunded });
        Ok(refunded)
    }

    pub fn use_skill(&mut self, id: CharacterId, skill: &str, now: Tick) -> Result<SkillActivation> {
        let catalog = Arc::clone(&self.catalog);
        let result = self.character_mut(id)?.use_skill(skill, now, &catalog);
        self.report(id, result)
    }

    pub fn use_hotbar_slot(
        &mut self,
        id: CharacterId,
        slot: usize,
        now: Tick,
    ) -> Result<SkillActivation> {
        let catalog = Arc::clone(&self.catalog);
        let result = self.character_mut(id)?.use_hotbar_slot(slot, now, &catalog);
        self.report(id, result)
    }

    pub fn bind_skill(
        &mut self,
        id: CharacterId,
        slot: usize,
        skill: &str,
    ) -> Result<Option<SkillId>> {
        let catalog = Arc::clone(&self.catalog);
        let result = self.character_mut(id)?.bind_skill(slot, skill, &catalog);
        self.report(id, result)
    }

    pub fn unbind_skill(&mut self, id: CharacterId, slot: usize) -> Result<Option<SkillId>> {
        let result = self.character_mut(id)?.unbind_skill(slot);
        self.report(id, result)
    }

    // ========================================================================
    // Tick pass
    // ========================================================================

    /// Runs the per-tick pass for every character.
    pub fn tick(&mut self, now: Tick) -> Vec<(CharacterId, TickReport)> {
        self.now = now;
        let mut reports = Vec::with_capacity(self.characters.len());
        for (id, character) in self.characters.iter_mut() {
            let report = character.tick(now, &self.catalog);
            for status in &report.expired {
                self.feedback.notify(*id, &Feedback::StatusExpired(*status));
            }
            if report.combo_ended {
                debug!(target: "progression::session", character = %id, "combo ended");
            }
            reports.push((*id, report));
        }
        reports
    }

    // ========================================================================
    // Admin
    // ========================================================================

    pub fn admin(&mut self, command: AdminCommand) -> Result<AdminOutcome> {
        if !self.role.is_authoritative() {
            warn!(target: "progression::admin", ?command, "admin command refused on a remote session");
            return Err(RuntimeError::NotAuthoritative("run admin commands"));
        }
        let outcome = command.apply(&mut self.world);
        info!(
            target: "progression::admin",
            ?command,
            world_level = outcome.world_level,
            stage = ?outcome.stage,
            event = ?outcome.event,
            "admin command applied"
        );
        Ok(outcome)
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    pub fn save_character(&self, id: CharacterId, repository: &dyn SaveRepository) -> Result<()> {
        let character = self
            .characters
            .get(&id)
            .ok_or(RuntimeError::UnknownCharacter(id))?;
        repository.save(&CharacterSave::capture(character))?;
        Ok(())
    }

    /// Saves every character; returns how many were written.
    pub fn save_all(&self, repository: &dyn SaveRepository) -> Result<usize> {
        for character in self.characters.values() {
            repository.save(&CharacterSave::capture(character))?;
        }
        Ok(self.characters.len())
    }

    /// Loads a character into the session, replacing any in-memory copy.
    ///
    /// Returns `None` when no record exists. Corrections made while loading
    /// are logged and returned.
    pub fn load_character(
        &mut self,
        id: CharacterId,
        repository: &dyn SaveRepository,
    ) -> Result<Option<Vec<LoadIssue>>> {
        let Some(record) = repository.load(id)? else {
            return Ok(None);
        };
        let (character, issues) = record.restore(&self.catalog);
        for issue in &issues {
            if issue.is_integrity_fault() {
                error!(target: "progression::session", character = %id, ?issue, "save references missing content");
            } else {
                warn!(target: "progression::session", character = %id, ?issue, "save corrected on load");
            }
        }
        info!(
            target: "progression::session",
            character = %id,
            level = character.level(),
            job = %character.job(),
            "character loaded"
        );
        self.characters.insert(id, character);
        Ok(Some(issues))
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn character_mut(&mut self, id: CharacterId) -> Result<&mut Character> {
        self.characters
            .get_mut(&id)
            .ok_or(RuntimeError::UnknownCharacter(id))
    }

    /// Surfaces a rejection to the player before returning it.
    fn report<T, E>(&self, id: CharacterId, result: std::result::Result<T, E>) -> Result<T>
    where
        E: GameError + Into<RuntimeError>,
    {
        result.map_err(|e| {
            self.feedback.notify(id, &Feedback::rejected(&e));
            e.into()
        })
    }
}

/// Builder for [`Session`] with flexible configuration.
pub struct SessionBuilder {
    catalog: Arc<Catalog>,
    role: SessionRole,
    world: WorldProgress,
    world_seed: u64,
    share_radius: u32,
    rng: Box<dyn RngOracle>,
    share: Arc<dyn XpShareProvider>,
    feedback: Arc<dyn FeedbackSink>,
}

impl SessionBuilder {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            role: SessionRole::default(),
            world: WorldProgress::new(),
            world_seed: 0,
            share_radius: RuntimeConfig::DEFAULT_SHARE_RADIUS,
            rng: Box::new(PcgRng),
            share: Arc::new(SoloShare),
            feedback: Arc::new(TracingFeedback),
        }
    }

    /// Takes role, seed and share radius from `config`.
    pub fn with_config(self, config: &RuntimeConfig) -> Self {
        self.role(config.role)
            .world_seed(config.world_seed)
            .share_radius(config.share_radius)
    }

    pub fn role(mut self, role: SessionRole) -> Self {
        self.role = role;
        self
    }

    pub fn world(mut self, world: WorldProgress) -> Self {
        self.world = world;
        self
    }

    pub fn world_seed(mut self, seed: u64) -> Self {
        self.world_seed = seed;
        self
    }

    pub fn share_radius(mut self, radius: u32) -> Self {
        self.share_radius = radius;
        self
    }

    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn share_provider(mut self, provider: Arc<dyn XpShareProvider>) -> Self {
        self.share = provider;
        self
    }

    pub fn feedback(mut self, sink: Arc<dyn FeedbackSink>) -> Self {
        self.feedback = sink;
        self
    }

    pub fn build(self) -> Session {
        info!(
            target: "progression::session",
            role = %self.role,
            seed = self.world_seed,
            share_radius = self.share_radius,
            "session started"
        );
        Session {
            catalog: self.catalog,
            role: self.role,
            world: self.world,
            world_seed: self.world_seed,
            share_radius: self.share_radius,
            now: Tick::ZERO,
            characters: BTreeMap::new(),
            rng: self.rng,
            share: self.share,
            feedback: self.feedback,
            outbox: Vec::new(),
        }
    }
}

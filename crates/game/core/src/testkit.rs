//! Shared fixtures for unit tests.

use std::sync::OnceLock;

use crate::catalog::Catalog;
use crate::common::{JobId, SkillId};
use crate::config::ProgressionConfig;
use crate::jobs::{GateMode, JobDefinition, JobRegistry, JobTier, JobUnlockRequirement};
use crate::skills::{
    Prerequisite, RankScaled, SkillCategory, SkillDefinition, SkillEffect, SkillRegistry,
    UseCondition,
};
use crate::stats::{ResourceKind, ResourcePools, StatBlock, StatKind};
use crate::status::StatusKind;
use crate::world::{BiomeTable, Milestones, WorldLayout};

fn job(
    id: &str,
    tier: JobTier,
    requirement: JobUnlockRequirement,
    skills: &[&str],
    growth: &[StatKind],
) -> JobDefinition {
    JobDefinition {
        id: JobId::from(id),
        tier,
        name: id.to_owned(),
        description: String::new(),
        stat_bonuses: Vec::new(),
        growth: growth.to_vec(),
        requirement,
        skills: skills.iter().map(|s| SkillId::from(*s)).collect(),
    }
}

fn after(predecessor: &str, min_level: u32) -> JobUnlockRequirement {
    JobUnlockRequirement {
        min_level,
        predecessor: Some(JobId::from(predecessor)),
        ..JobUnlockRequirement::default()
    }
}

/// novice -> swordsman -> knight -> lord_knight, novice -> mage.
pub(crate) fn job_definitions() -> Vec<JobDefinition> {
    let mut swordsman = job(
        "swordsman",
        JobTier::Tier1,
        after("novice", 10),
        &["bash", "magnum_break", "endure", "sword_mastery"],
        &[StatKind::Strength, StatKind::Vitality],
    );
    swordsman.stat_bonuses = vec![(StatKind::Strength, 5), (StatKind::Vitality, 3)];

    vec![
        job(
            "novice",
            JobTier::Novice,
            JobUnlockRequirement::default(),
            &["first_aid"],
            &[StatKind::Vitality],
        ),
        swordsman,
        job(
            "mage",
            JobTier::Tier1,
            after("novice", 10),
            &["fire_bolt"],
            &[StatKind::Intelligence],
        ),
        job(
            "knight",
            JobTier::Tier2,
            JobUnlockRequirement {
                gates: Milestones::DUNGEON_BOSS,
                ..after("swordsman", 50)
            },
            &["bowling_bash"],
            &[StatKind::Strength],
        ),
        job(
            "lord_knight",
            JobTier::Tier3,
            JobUnlockRequirement {
                requires_hardmode: true,
                gates: Milestones::ANY_MECH,
                gate_mode: GateMode::Any,
                ..after("knight", 100)
            },
            &[],
            &[StatKind::Strength],
        ),
    ]
}

pub(crate) fn jobs() -> JobRegistry {
    JobRegistry::new(job_definitions()).expect("fixture jobs are valid")
}

fn skill(
    id: &str,
    job: &str,
    category: SkillCategory,
    level: u32,
    cost: u32,
    max_rank: u8,
) -> SkillDefinition {
    SkillDefinition {
        id: SkillId::from(id),
        name: id.to_owned(),
        description: String::new(),
        category,
        required_job: JobId::from(job),
        required_level: level,
        point_cost: cost,
        max_rank,
        cooldown_ms: 0,
        resource: ResourceKind::None,
        resource_cost: 0,
        prerequisites: Vec::new(),
        effects: Vec::new(),
        usable_when: None,
    }
}

pub(crate) fn skill_definitions() -> Vec<SkillDefinition> {
    use SkillCategory::*;

    let mut first_aid = skill("first_aid", "novice", Active, 1, 1, 1);
    first_aid.cooldown_ms = 2_000;
    first_aid.resource = ResourceKind::Primary;
    first_aid.resource_cost = 3;
    first_aid.effects = vec![SkillEffect::Restore {
        resource: ResourceKind::Health,
        amount: RankScaled::flat(15),
    }];

    let mut bash = skill("bash", "swordsman", Active, 10, 1, 10);
    bash.cooldown_ms = 1_000;
    bash.resource = ResourceKind::Secondary;
    bash.resource_cost = 8;
    bash.effects = vec![SkillEffect::DamageBonus(RankScaled::new(30, 10))];

    let mut magnum_break = skill("magnum_break", "swordsman", Active, 15, 2, 10);
    magnum_break.cooldown_ms = 3_000;
    magnum_break.resource = ResourceKind::Secondary;
    magnum_break.resource_cost = 15;
    magnum_break.prerequisites = vec![Prerequisite::new("bash", 3)];
    magnum_break.effects = vec![SkillEffect::AreaEffect {
        radius_tiles: 2,
        damage_percent: RankScaled::new(120, 20),
    }];

    let mut endure = skill("endure", "swordsman", TimedBuff, 10, 1, 5);
    endure.usable_when = Some(UseCondition::ForbidsStatus(StatusKind::IronSkin));
    endure.effects = vec![SkillEffect::TimedStatus {
        status: StatusKind::IronSkin,
        duration_ms: RankScaled::flat(10_000),
        effects: vec![
            SkillEffect::ResourceBonus {
                resource: ResourceKind::Health,
                amount: RankScaled::flat(50),
            },
            SkillEffect::CooldownReduction(RankScaled::flat(5)),
        ],
    }];

    let mut sword_mastery = skill("sword_mastery", "swordsman", Passive, 10, 1, 10);
    sword_mastery.effects = vec![
        SkillEffect::DamageBonus(RankScaled::new(4, 4)),
        SkillEffect::CooldownReduction(RankScaled::new(1, 1)),
    ];

    let mut fire_bolt = skill("fire_bolt", "mage", Active, 10, 1, 10);
    fire_bolt.cooldown_ms = 1_500;
    fire_bolt.resource = ResourceKind::Primary;
    fire_bolt.resource_cost = 12;
    fire_bolt.effects = vec![SkillEffect::DamageBonus(RankScaled::new(50, 15))];

    let mut bowling_bash = skill("bowling_bash", "knight", Active, 50, 3, 10);
    bowling_bash.cooldown_ms = 2_000;
    bowling_bash.resource = ResourceKind::Secondary;
    bowling_bash.resource_cost = 20;
    bowling_bash.prerequisites = vec![Prerequisite::new("bash", 10)];
    bowling_bash.effects = vec![
        SkillEffect::DamageBonus(RankScaled::new(100, 20)),
        SkillEffect::AreaEffect {
            radius_tiles: 1,
            damage_percent: RankScaled::flat(100),
        },
    ];

    vec![
        first_aid,
        bash,
        magnum_break,
        endure,
        sword_mastery,
        fire_bolt,
        bowling_bash,
    ]
}

pub(crate) fn skills() -> SkillRegistry {
    SkillRegistry::new(skill_definitions()).expect("fixture skills are valid")
}

pub(crate) fn catalog_with(config: ProgressionConfig) -> Catalog {
    Catalog::new(
        config,
        jobs(),
        skills(),
        BiomeTable::default(),
        WorldLayout::default(),
    )
    .expect("fixture catalog is valid")
}

/// Default-config catalog, built once per test binary.
pub(crate) fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(|| catalog_with(ProgressionConfig::default()))
}

/// Full pools of a level 10 character with no stats.
pub(crate) fn pools() -> ResourcePools {
    ResourcePools::at_max(&StatBlock::new(), 10, &[0; 3])
}

//! The experience multiplier stack.

use crate::common::Tick;
use crate::config::{ProgressionConfig, SourceBonuses};
use crate::formula::{
    Multiplier, cap_proximity_multiplier, level_difference_multiplier, min_kill_xp,
};

use super::{ComboTracker, XpRejection};

/// Which side of a multi-participant session is calling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Authority {
    #[default]
    Authoritative,
    Remote,
}

/// Origin of an experience award.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum XpSource {
    Monster,
    Boss,
    /// Kill during a world event.
    Event,
    /// Flat reward; skips the level-difference curve, combo and kill floor.
    Quest,
}

impl XpSource {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Monster => "monster",
            Self::Boss => "boss",
            Self::Event => "event",
            Self::Quest => "quest",
        }
    }

    pub const fn is_kill(self) -> bool {
        !matches!(self, Self::Quest)
    }

    pub fn bonus(self, bonuses: &SourceBonuses) -> Multiplier {
        match self {
            Self::Boss => bonuses.boss,
            Self::Event => bonuses.event,
            Self::Monster | Self::Quest => Multiplier::ONE,
        }
    }
}

/// One `GainExperience` request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct XpGrant {
    pub base: u64,
    pub source: XpSource,
    /// Ignored for quests.
    pub monster_level: u32,
}

impl XpGrant {
    pub fn kill(source: XpSource, base: u64, monster_level: u32) -> Self {
        Self {
            base,
            source,
            monster_level,
        }
    }

    pub fn quest(base: u64) -> Self {
        Self {
            base,
            source: XpSource::Quest,
            monster_level: 0,
        }
    }
}

/// Every factor that went into an award, in application order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct XpBreakdown {
    /// Base after the kill floor.
    pub base: u64,
    /// Kill floor; zero for quests.
    pub floor: u64,
    pub character: Multiplier,
    pub source: Multiplier,
    pub global: Multiplier,
    pub level_difference: Multiplier,
    pub combo: Multiplier,
    pub cap_proximity: Multiplier,
    pub amount: u64,
}

impl XpBreakdown {
    pub fn total_multiplier(&self) -> Multiplier {
        self.character
            * self.source
            * self.global
            * self.level_difference
            * self.combo
            * self.cap_proximity
    }
}

/// Computes the final XP of `grant` for a character at `level`.
///
/// Kill awards are floored at `min_xp_base + min_xp_per_level * monster_level`
/// both before and after the stack. The combo tracker only advances when the
/// kill lands in the sweet spot and the award is not rejected.
pub fn compute_award(
    grant: &XpGrant,
    level: u32,
    character: Multiplier,
    combo: &mut ComboTracker,
    now: Tick,
    config: &ProgressionConfig,
) -> Result<XpBreakdown, XpRejection> {
    let kill = grant.source.is_kill();
    let diff = grant.monster_level as i64 - level as i64;

    if kill && diff > config.anti_boost_gap as i64 {
        return Err(XpRejection::AntiBoost {
            monster_level: grant.monster_level,
            character_level: level,
            max_gap: config.anti_boost_gap,
        });
    }

    let floor = if kill {
        min_kill_xp(grant.monster_level, config)
    } else {
        0
    };
    let base = grant.base.max(floor);
    let diff = diff.clamp(i32::MIN as i64, i32::MAX as i64) as i32;

    let (level_difference, combo_multiplier) = if kill {
        let curve = level_difference_multiplier(diff, &config.level_difference);
        let streak = if (1..=4).contains(&diff) {
            combo.register(now, &config.combo)
        } else {
            Multiplier::ONE
        };
        (curve, streak)
    } else {
        (Multiplier::ONE, Multiplier::ONE)
    };

    let mut breakdown = XpBreakdown {
        base,
        floor,
        character,
        source: grant.source.bonus(&config.sources),
        global: config.global_xp,
        level_difference,
        combo: combo_multiplier,
        cap_proximity: cap_proximity_multiplier(level, config.max_level, &config.cap_proximity),
        amount: 0,
    };
    breakdown.amount = breakdown.total_multiplier().apply(base).max(floor);
    Ok(breakdown)
}

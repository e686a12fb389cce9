//! Timed status effects on a character.
//!
//! Statuses store `expires_at: Tick` and carry the modifier payload of the
//! skill that applied them, evaluated at the rank it was cast with. They are
//! removed once `now >= expires_at`.

use arrayvec::ArrayVec;

use crate::common::Tick;
use crate::config::ProgressionConfig;
use crate::skills::{ModifierTotals, SkillEffect};

/// Kinds of timed statuses a skill can apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    // ========================================================================
    // Buffs
    // ========================================================================
    Berserk,
    IronSkin,
    Haste,
    Focus,
    Regeneration,
    ManaSurge,
    /// Bonus experience.
    Wisdom,
    Blessing,

    // ========================================================================
    // Debuffs
    // ========================================================================
    /// Applied by skills with a self-inflicted drawback.
    Exhausted,
}

/// A single active status with its payload.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveStatus {
    pub kind: StatusKind,
    pub expires_at: Tick,
    /// Rank of the skill that applied the status.
    pub rank: u8,
    pub effects: Vec<SkillEffect>,
}

/// Active statuses of one character.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<ActiveStatus, { ProgressionConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, kind: StatusKind, now: Tick) -> bool {
        self.effects
            .iter()
            .any(|status| status.kind == kind && status.expires_at > now)
    }

    /// Whether `apply` would accept a status of `kind`: either it refreshes an
    /// existing entry or a free slot remains.
    pub fn can_apply(&self, kind: StatusKind) -> bool {
        !self.effects.is_full() || self.effects.iter().any(|status| status.kind == kind)
    }

    /// Applies a status. Re-applying refreshes the payload and keeps the later
    /// expiry. Returns `false` when the set is full and nothing changed.
    pub fn apply(&mut self, status: ActiveStatus) -> bool {
        if let Some(existing) = self.effects.iter_mut().find(|s| s.kind == status.kind) {
            existing.expires_at = existing.expires_at.max(status.expires_at);
            existing.rank = status.rank;
            existing.effects = status.effects;
            return true;
        }
        self.effects.try_push(status).is_ok()
    }

    pub fn remove(&mut self, kind: StatusKind) {
        self.effects.retain(|status| status.kind != kind);
    }

    /// Drops expired statuses. Returns the kinds that expired.
    pub fn remove_expired(&mut self, now: Tick) -> Vec<StatusKind> {
        let expired = self
            .effects
            .iter()
            .filter(|status| status.expires_at <= now)
            .map(|status| status.kind)
            .collect();
        self.effects.retain(|status| status.expires_at > now);
        expired
    }

    pub fn active_at(&self, now: Tick) -> impl Iterator<Item = &ActiveStatus> + '_ {
        self.effects
            .iter()
            .filter(move |status| status.expires_at > now)
    }

    /// Summed modifiers of every status active at `now`.
    pub fn totals(&self, now: Tick) -> ModifierTotals {
        let mut totals = ModifierTotals::default();
        for status in self.active_at(now) {
            for effect in &status.effects {
                totals.accumulate(effect, status.rank);
            }
        }
        totals
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::RankScaled;

    fn haste(expires_at: u64) -> ActiveStatus {
        ActiveStatus {
            kind: StatusKind::Haste,
            expires_at: Tick(expires_at),
            rank: 1,
            effects: vec![SkillEffect::CooldownReduction(RankScaled::flat(10))],
        }
    }

    #[test]
    fn reapply_keeps_later_expiry() {
        let mut statuses = StatusEffects::new();
        statuses.apply(haste(100));
        statuses.apply(haste(50));
        assert!(statuses.has(StatusKind::Haste, Tick(99)));
        assert!(!statuses.has(StatusKind::Haste, Tick(100)));
    }

    #[test]
    fn expiry_and_totals() {
        let mut statuses = StatusEffects::new();
        statuses.apply(haste(10));
        assert_eq!(statuses.totals(Tick(5)).cooldown_reduction_percent, 10);
        assert_eq!(statuses.totals(Tick(10)).cooldown_reduction_percent, 0);
        assert_eq!(statuses.remove_expired(Tick(10)), vec![StatusKind::Haste]);
        assert!(statuses.is_empty());
    }

    fn blank(kind: StatusKind) -> ActiveStatus {
        ActiveStatus {
            kind,
            expires_at: Tick(100),
            rank: 1,
            effects: Vec::new(),
        }
    }

    #[test]
    fn full_set_refuses_new_kinds_but_refreshes_existing() {
        let mut statuses = StatusEffects::new();
        let kinds = [
            StatusKind::Berserk,
            StatusKind::IronSkin,
            StatusKind::Haste,
            StatusKind::Focus,
            StatusKind::Regeneration,
            StatusKind::ManaSurge,
            StatusKind::Wisdom,
            StatusKind::Blessing,
        ];
        for kind in kinds {
            assert!(statuses.apply(blank(kind)));
        }

        assert!(!statuses.can_apply(StatusKind::Exhausted));
        assert!(!statuses.apply(blank(StatusKind::Exhausted)));
        assert!(!statuses.has(StatusKind::Exhausted, Tick(0)));

        assert!(statuses.can_apply(StatusKind::Haste));
        assert!(statuses.apply(haste(500)));
        assert!(statuses.has(StatusKind::Haste, Tick(400)));
    }
}

//! Primary stats.

use strum::{EnumCount, EnumIter, IntoStaticStr};

use crate::error::{ErrorSeverity, GameError};

/// The six primary stats.
///
/// - **Strength**: melee damage
/// - **Agility**: secondary pool (stamina)
/// - **Vitality**: health pool
/// - **Intelligence**: primary pool (mana), cooldown reduction
/// - **Dexterity**: ranged damage, crit, cooldown reduction
/// - **Luck**: crit chance
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumCount, EnumIter, IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    Strength,
    Agility,
    Vitality,
    Intelligence,
    Dexterity,
    Luck,
}

impl StatKind {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Manual, automatic and bonus components of every primary stat.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    manual: [u32; StatKind::COUNT],
    auto: [u32; StatKind::COUNT],
    bonus: [i32; StatKind::COUNT],
}

impl StatBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a block from stored components.
    pub fn from_parts(
        manual: [u32; StatKind::COUNT],
        auto: [u32; StatKind::COUNT],
        bonus: [i32; StatKind::COUNT],
    ) -> Self {
        Self {
            manual,
            auto,
            bonus,
        }
    }

    pub fn manual(&self, stat: StatKind) -> u32 {
        self.manual[stat.index()]
    }

    pub fn auto(&self, stat: StatKind) -> u32 {
        self.auto[stat.index()]
    }

    pub fn bonus(&self, stat: StatKind) -> i32 {
        self.bonus[stat.index()]
    }

    /// Sum of all three components (may be negative when bonuses are).
    pub fn total(&self, stat: StatKind) -> i64 {
        let i = stat.index();
        self.manual[i] as i64 + self.auto[i] as i64 + self.bonus[i] as i64
    }

    pub fn manual_parts(&self) -> [u32; StatKind::COUNT] {
        self.manual
    }

    pub fn auto_parts(&self) -> [u32; StatKind::COUNT] {
        self.auto
    }

    pub fn bonus_parts(&self) -> [i32; StatKind::COUNT] {
        self.bonus
    }

    pub(crate) fn add_manual(&mut self, stat: StatKind, amount: u32) {
        let slot = &mut self.manual[stat.index()];
        *slot = slot.saturating_add(amount);
    }

    pub(crate) fn add_auto(&mut self, stat: StatKind, amount: u32) {
        let slot = &mut self.auto[stat.index()];
        *slot = slot.saturating_add(amount);
    }

    /// Replaces every bonus component (job bonuses + passive skills).
    pub(crate) fn set_bonuses(&mut self, bonus: [i32; StatKind::COUNT]) {
        self.bonus = bonus;
    }
}

/// Rejections of a stat point allocation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AllocateError {
    #[error("cannot allocate zero stat points")]
    ZeroAmount,

    #[error("not enough stat points: need {needed}, have {available}")]
    InsufficientPoints { needed: u32, available: u32 },
}

impl GameError for AllocateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ZeroAmount => ErrorSeverity::Validation,
            Self::InsufficientPoints { .. } => ErrorSeverity::Policy,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroAmount => "ALLOCATE_ZERO_AMOUNT",
            Self::InsufficientPoints { .. } => "ALLOCATE_INSUFFICIENT_POINTS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_sums_components() {
        let mut block = StatBlock::new();
        block.add_manual(StatKind::Strength, 5);
        block.add_auto(StatKind::Strength, 3);
        let mut bonus = [0; StatKind::COUNT];
        bonus[StatKind::Strength.index()] = -2;
        block.set_bonuses(bonus);

        assert_eq!(block.total(StatKind::Strength), 6);
        assert_eq!(block.total(StatKind::Luck), 0);
    }
}

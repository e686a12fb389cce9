//! Inputs owned by collaborators outside the core (equipment, set bonuses, items).

use crate::formula::Multiplier;

/// Modifiers pushed in by the host; the core never derives these itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ExternalModifiers {
    /// Buffs and items multiplying experience.
    pub xp_multiplier: Multiplier,
    pub equipment_cooldown_percent: u32,
    pub set_bonus_cooldown_percent: u32,
}

impl Default for ExternalModifiers {
    fn default() -> Self {
        Self {
            xp_multiplier: Multiplier::ONE,
            equipment_cooldown_percent: 0,
            set_bonus_cooldown_percent: 0,
        }
    }
}

/// The five sources of cooldown reduction, before the global cap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CooldownSources {
    pub stats: u32,
    pub equipment: u32,
    pub statuses: u32,
    pub set_bonus: u32,
    /// Job tier bonus plus passive skills.
    pub job: u32,
}

impl CooldownSources {
    pub fn total(&self) -> u32 {
        self.stats
            .saturating_add(self.equipment)
            .saturating_add(self.statuses)
            .saturating_add(self.set_bonus)
            .saturating_add(self.job)
    }

    pub fn capped(&self, max_percent: u32) -> u32 {
        self.total().min(max_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capped_sum() {
        let sources = CooldownSources {
            stats: 10,
            equipment: 15,
            statuses: 20,
            set_bonus: 5,
            job: 10,
        };
        assert_eq!(sources.total(), 60);
        assert_eq!(sources.capped(50), 50);
        assert_eq!(CooldownSources::default().capped(50), 0);
    }
}

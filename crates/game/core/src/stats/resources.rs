//! Resource pools.
//!
//! Maximum values are derived (stats + level + passive bonuses) and refreshed
//! by the character every tick; current values are game state and persisted.

use crate::formula::resource_maximum;

use super::{StatBlock, StatKind};

/// Which pool a skill draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    /// Free to use.
    #[default]
    None,
    /// Mana.
    Primary,
    /// Stamina.
    Secondary,
    Health,
}

impl ResourceKind {
    /// Pool kinds that have a meter, in storage order.
    pub const POOLS: [ResourceKind; 3] = [Self::Health, Self::Primary, Self::Secondary];

    /// Stat governing the pool's maximum.
    pub const fn governing_stat(self) -> Option<StatKind> {
        match self {
            Self::Health => Some(StatKind::Vitality),
            Self::Primary => Some(StatKind::Intelligence),
            Self::Secondary => Some(StatKind::Agility),
            Self::None => None,
        }
    }

    /// Index into [`Self::POOLS`]-ordered arrays.
    pub const fn pool_index(self) -> Option<usize> {
        match self {
            Self::Health => Some(0),
            Self::Primary => Some(1),
            Self::Secondary => Some(2),
            Self::None => None,
        }
    }
}

/// Integer resource meter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    pub fn full(maximum: u32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// Percent of the maximum currently held (0 when the pool is empty-capped).
    pub fn percent(&self) -> u32 {
        if self.maximum == 0 {
            return 0;
        }
        ((self.current as u64) * 100 / self.maximum as u64) as u32
    }

    pub fn set_maximum(&mut self, maximum: u32) {
        self.maximum = maximum;
        self.current = self.current.min(maximum);
    }

    pub fn restore(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.maximum);
    }

    pub fn refill(&mut self) {
        self.current = self.maximum;
    }

    /// Spends `amount` if available. Returns false and leaves the meter untouched otherwise.
    pub fn try_spend(&mut self, amount: u32) -> bool {
        if self.current < amount {
            return false;
        }
        self.current -= amount;
        true
    }
}

/// Health, primary and secondary pools of one character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePools {
    pub health: ResourceMeter,
    pub primary: ResourceMeter,
    pub secondary: ResourceMeter,
}

impl ResourcePools {
    /// Pools at full, sized from stats, level and passive maximum bonuses.
    pub fn at_max(stats: &StatBlock, level: u32, bonuses: &[i64; 3]) -> Self {
        let mut pools = Self::default();
        pools.refresh_maximums(stats, level, bonuses);
        pools.refill_all();
        pools
    }

    pub fn get(&self, kind: ResourceKind) -> Option<&ResourceMeter> {
        match kind {
            ResourceKind::Health => Some(&self.health),
            ResourceKind::Primary => Some(&self.primary),
            ResourceKind::Secondary => Some(&self.secondary),
            ResourceKind::None => None,
        }
    }

    pub fn get_mut(&mut self, kind: ResourceKind) -> Option<&mut ResourceMeter> {
        match kind {
            ResourceKind::Health => Some(&mut self.health),
            ResourceKind::Primary => Some(&mut self.primary),
            ResourceKind::Secondary => Some(&mut self.secondary),
            ResourceKind::None => None,
        }
    }

    /// Recomputes every maximum; current values are clamped, never raised.
    pub fn refresh_maximums(&mut self, stats: &StatBlock, level: u32, bonuses: &[i64; 3]) {
        for kind in ResourceKind::POOLS {
            let (Some(stat), Some(index)) = (kind.governing_stat(), kind.pool_index()) else {
                continue;
            };
            let base = resource_maximum(kind, stats.total(stat), level) as i64;
            let maximum = (base + bonuses[index]).clamp(1, u32::MAX as i64) as u32;
            if let Some(meter) = self.get_mut(kind) {
                meter.set_maximum(maximum);
            }
        }
    }

    /// Whether `amount` of `kind` can be paid. `ResourceKind::None` is always affordable.
    pub fn can_afford(&self, kind: ResourceKind, amount: u32) -> bool {
        self.get(kind).is_none_or(|meter| meter.current >= amount)
    }

    pub fn refill_all(&mut self) {
        self.health.refill();
        self.primary.refill();
        self.secondary.refill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spend_fails_closed() {
        let mut meter = ResourceMeter::full(10);
        assert!(!meter.try_spend(11));
        assert_eq!(meter.current, 10);
        assert!(meter.try_spend(4));
        assert_eq!(meter.current, 6);
    }

    #[test]
    fn shrinking_maximum_clamps_current() {
        let mut meter = ResourceMeter::full(50);
        meter.set_maximum(30);
        assert_eq!(meter.current, 30);
        meter.set_maximum(40);
        assert_eq!(meter.current, 30);
    }

    #[test]
    fn pools_sized_from_stats() {
        let stats = StatBlock::new();
        let pools = ResourcePools::at_max(&stats, 1, &[0, 10, 0]);
        assert_eq!(pools.health.maximum, 105);
        assert_eq!(pools.primary.maximum, 32);
        assert_eq!(pools.secondary.current, pools.secondary.maximum);
        assert!(pools.can_afford(ResourceKind::None, u32::MAX));
    }
}

//! Fixed-point multipliers.
//!
//! Every tunable ratio in the engine (XP curve steps, source bonuses, combo
//! growth, biome scaling) is stored in basis points so that the same inputs
//! always produce the same integer outputs on every participant.

use core::fmt;
use core::ops::Mul;

/// A non-negative multiplier expressed in basis points (`10_000` = ×1.0).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Multiplier(pub u32);

impl Multiplier {
    /// Basis points per whole unit.
    pub const SCALE: u32 = 10_000;

    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(Self::SCALE);

    pub const fn from_bps(bps: u32) -> Self {
        Self(bps)
    }

    /// `from_percent(135)` is ×1.35.
    pub const fn from_percent(percent: u32) -> Self {
        Self(percent * 100)
    }

    pub const fn bps(self) -> u32 {
        self.0
    }

    /// Adds `steps` increments of `step` on top of this multiplier.
    pub fn plus_steps(self, step: Multiplier, steps: u32) -> Self {
        Self(self.0.saturating_add(step.0.saturating_mul(steps)))
    }

    /// Subtracts `steps` increments of `step`, saturating at zero.
    pub fn minus_steps(self, step: Multiplier, steps: u32) -> Self {
        Self(self.0.saturating_sub(step.0.saturating_mul(steps)))
    }

    /// Scales an integer amount, rounding toward zero.
    pub fn apply(self, value: u64) -> u64 {
        let scaled = (value as u128) * (self.0 as u128) / (Self::SCALE as u128);
        scaled.min(u64::MAX as u128) as u64
    }

    /// Scales a signed amount, rounding toward zero.
    pub fn apply_signed(self, value: i64) -> i64 {
        let scaled = (value as i128) * (self.0 as i128) / (Self::SCALE as i128);
        scaled.clamp(i64::MIN as i128, i64::MAX as i128) as i64
    }

    pub fn max(self, other: Self) -> Self {
        if self >= other { self } else { other }
    }

    pub fn min(self, other: Self) -> Self {
        if self <= other { self } else { other }
    }
}

impl Mul for Multiplier {
    type Output = Multiplier;

    fn mul(self, rhs: Multiplier) -> Multiplier {
        let product = (self.0 as u64) * (rhs.0 as u64) / (Self::SCALE as u64);
        Multiplier(product.min(u32::MAX as u64) as u32)
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x{}.{:04}",
            self.0 / Self::SCALE,
            self.0 % Self::SCALE
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_of_multipliers() {
        let a = Multiplier::from_percent(150);
        let b = Multiplier::from_percent(135);
        assert_eq!((a * b).bps(), 20_250);
        assert_eq!(Multiplier::ONE * b, b);
        assert_eq!(Multiplier::ZERO * b, Multiplier::ZERO);
    }

    #[test]
    fn apply_rounds_toward_zero() {
        assert_eq!(Multiplier::from_bps(9_750).apply(100), 97);
        assert_eq!(Multiplier::from_percent(135).apply(1_000), 1_350);
        assert_eq!(Multiplier::from_percent(50).apply_signed(-7), -3);
    }

    #[test]
    fn steps_saturate() {
        let step = Multiplier::from_bps(1_000);
        assert_eq!(Multiplier::ONE.plus_steps(step, 3).bps(), 13_000);
        assert_eq!(Multiplier::ONE.minus_steps(step, 20), Multiplier::ZERO);
    }

    #[test]
    fn display_shows_fraction() {
        assert_eq!(Multiplier::from_bps(9_750).to_string(), "x0.9750");
        assert_eq!(Multiplier::from_percent(135).to_string(), "x1.3500");
    }
}

//! Sweet-spot combo streak.

use crate::common::Tick;
use crate::config::ComboConfig;
use crate::formula::Multiplier;

/// Consecutive sweet-spot kills inside a rolling window.
///
/// Each sweet-spot kill within `window_ticks` of the previous one extends the
/// streak; a kill after the window starts a new streak at one. Kills outside
/// the sweet spot leave the streak alone and get no combo bonus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComboTracker {
    count: u32,
    last_kill: Option<Tick>,
}

impl ComboTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    fn in_window(&self, now: Tick, config: &ComboConfig) -> bool {
        self.last_kill
            .is_some_and(|last| now.since(last) <= config.window_ticks)
    }

    /// Records a sweet-spot kill and returns the multiplier it earns.
    pub fn register(&mut self, now: Tick, config: &ComboConfig) -> Multiplier {
        self.count = if self.in_window(now, config) {
            self.count.saturating_add(1)
        } else {
            1
        };
        self.last_kill = Some(now);
        self.multiplier(config)
    }

    /// Multiplier of the current streak; `ONE` when no streak is running.
    pub fn multiplier(&self, config: &ComboConfig) -> Multiplier {
        let steps = self.count.saturating_sub(1);
        Multiplier::ONE.plus_steps(config.step, steps).min(config.max)
    }

    /// Ends the streak once the window has passed without a sweet-spot kill.
    /// Returns true if a streak was ended.
    pub fn expire(&mut self, now: Tick, config: &ComboConfig) -> bool {
        if self.count == 0 || self.in_window(now, config) {
            return false;
        }
        self.count = 0;
        self.last_kill = None;
        true
    }
}

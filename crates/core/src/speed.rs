//! Speed module - tick rate and timed speed modifiers
//!
//! The snake moves at `current` ticks per second. A timed modifier scales the
//! base speed for a fixed duration and then reverts it. Only one modifier can
//! be active: installing a new one replaces the old one and is always measured
//! from the base speed, so repeated pick-ups never compound.
//!
//! The state has no clock. Callers either feed elapsed time through
//! [`SpeedState::elapse`] or arm their own timer from
//! [`SpeedState::modifier_remaining`] and call [`SpeedState::expire`] when it
//! fires. [`SpeedState::generation`] changes whenever the active modifier does,
//! so a timer armed for an older modifier can be recognised as stale.

use std::time::Duration;

use crate::error::ConfigError;
use crate::types::FALLBACK_TICK_MS;

/// Speed parameters supplied at construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedSettings {
    /// Ticks per second without any modifier
    pub base_speed: f64,
    /// Speed-up multiplier; slow-down uses `1 / change_amount`
    pub change_amount: f64,
    /// Lifetime of a modifier
    pub change_duration: Duration,
}

impl SpeedSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_speed.is_finite() || self.base_speed < 0.0 {
            return Err(ConfigError::InvalidSpeed {
                name: "base_speed",
                value: self.base_speed,
            });
        }
        if !self.change_amount.is_finite() || self.change_amount <= 0.0 {
            return Err(ConfigError::InvalidSpeed {
                name: "change_amount",
                value: self.change_amount,
            });
        }
        Ok(())
    }
}

/// An active timed modifier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedModifier {
    pub multiplier: f64,
    pub remaining: Duration,
}

/// Current tick rate plus at most one timed modifier
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedState {
    base: f64,
    current: f64,
    modifier: Option<SpeedModifier>,
    generation: u64,
}

impl SpeedState {
    pub fn new(base: f64) -> Self {
        Self {
            base,
            current: base,
            modifier: None,
            generation: 0,
        }
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn modifier(&self) -> Option<SpeedModifier> {
        self.modifier
    }

    /// Time left on the active modifier
    pub fn modifier_remaining(&self) -> Option<Duration> {
        self.modifier.map(|m| m.remaining)
    }

    /// Changes every time a modifier is installed, expires or is cancelled
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Time between two ticks at the current speed
    ///
    /// Falls back to one second when the speed is zero or negative, or so
    /// small that the interval does not fit in a `Duration`.
    pub fn tick_interval(&self) -> Duration {
        let fallback = Duration::from_millis(FALLBACK_TICK_MS);
        if self.current <= 0.0 || !self.current.is_finite() {
            return fallback;
        }
        Duration::try_from_secs_f64(1.0 / self.current).unwrap_or(fallback)
    }

    /// Replace any active modifier with `base * multiplier` for `duration`
    pub fn install(&mut self, multiplier: f64, duration: Duration) {
        self.current = (self.base * multiplier).max(0.0);
        self.generation = self.generation.wrapping_add(1);
        if duration.is_zero() {
            self.current = self.base;
            self.modifier = None;
            return;
        }
        self.modifier = Some(SpeedModifier {
            multiplier,
            remaining: duration,
        });
    }

    /// Count `elapsed` against the active modifier
    ///
    /// Returns true if the modifier ran out and the base speed was restored.
    pub fn elapse(&mut self, elapsed: Duration) -> bool {
        let Some(modifier) = self.modifier.as_mut() else {
            return false;
        };
        modifier.remaining = modifier.remaining.saturating_sub(elapsed);
        if modifier.remaining.is_zero() {
            self.expire();
            return true;
        }
        false
    }

    /// Drop the active modifier and restore the base speed
    pub fn expire(&mut self) {
        if self.modifier.take().is_some() {
            self.generation = self.generation.wrapping_add(1);
        }
        self.current = self.base;
    }

    /// Cancel any modifier and run at base speed again
    pub fn restart(&mut self) {
        self.expire();
    }
}

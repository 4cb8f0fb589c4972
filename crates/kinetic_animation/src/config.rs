//! Animation configuration
//!
//! One options bundle consumed by every animation-producing component.
//! Missing fields in a serialized document take their defaults.

use crate::easing::Easing;
use serde::{Deserialize, Serialize};

/// How many cycles a driver plays
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepeatMode {
    /// A single cycle
    Once,
    /// `n` cycles in total
    Count(u32),
    /// Until stopped
    Infinite,
}

/// Options shared by all animation components
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Duration of one cycle in milliseconds
    pub duration_ms: u32,
    pub curve: Easing,
    /// Hold time before the first cycle starts
    pub delay_ms: u32,
    /// Start as soon as the driver is built
    pub auto_play: bool,
    /// Alternate direction between cycles
    pub auto_reverse: bool,
    pub repeat: bool,
    /// `None` (or `Some(0)`) with `repeat = true` repeats indefinitely
    pub repeat_count: Option<u32>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            curve: Easing::EaseInOut,
            delay_ms: 0,
            auto_play: true,
            auto_reverse: false,
            repeat: false,
            repeat_count: None,
        }
    }
}

/// Fields to override in [`AnimationConfig::copy_with`]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConfigOverrides {
    pub duration_ms: Option<u32>,
    pub curve: Option<Easing>,
    pub delay_ms: Option<u32>,
    pub auto_play: Option<bool>,
    pub auto_reverse: Option<bool>,
    pub repeat: Option<bool>,
    pub repeat_count: Option<Option<u32>>,
}

impl AnimationConfig {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            ..Default::default()
        }
    }

    /// Copy of this config with only the provided fields replaced
    pub fn copy_with(&self, overrides: ConfigOverrides) -> Self {
        Self {
            duration_ms: overrides.duration_ms.unwrap_or(self.duration_ms),
            curve: overrides.curve.unwrap_or(self.curve),
            delay_ms: overrides.delay_ms.unwrap_or(self.delay_ms),
            auto_play: overrides.auto_play.unwrap_or(self.auto_play),
            auto_reverse: overrides.auto_reverse.unwrap_or(self.auto_reverse),
            repeat: overrides.repeat.unwrap_or(self.repeat),
            repeat_count: overrides.repeat_count.unwrap_or(self.repeat_count),
        }
    }

    /// Builder: set duration
    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Builder: set curve
    pub fn with_curve(mut self, curve: Easing) -> Self {
        self.curve = curve;
        self
    }

    /// Builder: set start delay
    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Builder: set auto-play
    pub fn with_auto_play(mut self, auto_play: bool) -> Self {
        self.auto_play = auto_play;
        self
    }

    /// Builder: set auto-reverse
    pub fn with_auto_reverse(mut self, auto_reverse: bool) -> Self {
        self.auto_reverse = auto_reverse;
        self
    }

    /// Builder: repeat `count` times, or indefinitely with `None`
    pub fn with_repeat(mut self, count: Option<u32>) -> Self {
        self.repeat = true;
        self.repeat_count = count;
        self
    }

    /// Resolved repeat behaviour
    pub fn repeat_mode(&self) -> RepeatMode {
        if !self.repeat {
            return RepeatMode::Once;
        }
        match self.repeat_count {
            None | Some(0) => RepeatMode::Infinite,
            Some(n) => RepeatMode::Count(n),
        }
    }
}

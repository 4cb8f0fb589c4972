//! Animation controller
//!
//! A tick-driven driver that advances a linear value between 0.0 and 1.0
//! over a fixed duration. The host calls [`AnimationController::tick`] once
//! per frame; listeners receive the new value after every advancing tick.
//!
//! Repeat and auto-reverse follow [`AnimationConfig`]:
//! - without repeat, one pass (two with auto-reverse: forward then back)
//! - `RepeatMode::Count(n)`: `n` passes, alternating when auto-reversing
//! - `RepeatMode::Infinite`: passes continue until [`AnimationController::stop`]

use crate::config::{AnimationConfig, RepeatMode};
use crate::easing::Easing;
use crate::status::{project, AnimationState, DriverStatus};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a controller owned by a chain or scheduler
    pub struct ControllerId;
    /// Handle to a registered value listener
    pub struct ListenerId;
    /// Handle to a registered status listener
    pub struct StatusListenerId;
}

/// Per-tick value callback
pub type ValueListener = Box<dyn FnMut(f32) + Send>;

/// Status change callback
pub type StatusListener = Box<dyn FnMut(AnimationState) + Send>;

/// A time driver advancing a value over a duration
pub struct AnimationController {
    duration_ms: u32,
    reverse_duration_ms: Option<u32>,
    curve: Easing,
    value: f32,
    status: DriverStatus,
    running: bool,
    delay_ms: u32,
    delay_remaining_ms: f32,
    repeat: RepeatMode,
    auto_reverse: bool,
    passes_done: u32,
    listeners: SlotMap<ListenerId, ValueListener>,
    status_listeners: SlotMap<StatusListenerId, StatusListener>,
}

impl AnimationController {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            reverse_duration_ms: None,
            curve: Easing::Linear,
            value: 0.0,
            status: DriverStatus::Dismissed,
            running: false,
            delay_ms: 0,
            delay_remaining_ms: 0.0,
            repeat: RepeatMode::Once,
            auto_reverse: false,
            passes_done: 0,
            listeners: SlotMap::with_key(),
            status_listeners: SlotMap::with_key(),
        }
    }

    /// Build a controller from a config, starting it if `auto_play` is set
    pub fn from_config(config: &AnimationConfig) -> Self {
        let mut controller = Self::new(config.duration_ms)
            .with_curve(config.curve)
            .with_delay(config.delay_ms)
            .with_repeat(config.repeat_mode(), config.auto_reverse);
        if config.auto_play {
            controller.forward();
        }
        controller
    }

    /// Builder: duration used when running in reverse
    pub fn with_reverse_duration(mut self, duration_ms: u32) -> Self {
        self.reverse_duration_ms = Some(duration_ms);
        self
    }

    /// Builder: curve applied by [`AnimationController::curved_value`]
    pub fn with_curve(mut self, curve: Easing) -> Self {
        self.curve = curve;
        self
    }

    /// Builder: hold time before the first pass advances
    pub fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self.delay_remaining_ms = delay_ms as f32;
        self
    }

    /// Builder: repeat behaviour
    pub fn with_repeat(mut self, repeat: RepeatMode, auto_reverse: bool) -> Self {
        self.repeat = repeat;
        self.auto_reverse = auto_reverse;
        self
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn set_duration(&mut self, duration_ms: u32) {
        self.duration_ms = duration_ms;
    }

    pub fn curve(&self) -> Easing {
        self.curve
    }

    /// Linear progress in `[0, 1]`
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Progress with the controller's curve applied
    pub fn curved_value(&self) -> f32 {
        self.curve.apply(self.value)
    }

    /// Raw driver phase
    pub fn status(&self) -> DriverStatus {
        self.status
    }

    /// Public state
    pub fn state(&self) -> AnimationState {
        project(self.status)
    }

    /// Whether ticks currently advance the value
    pub fn is_animating(&self) -> bool {
        self.running
    }

    pub fn is_completed(&self) -> bool {
        self.status == DriverStatus::Completed
    }

    pub fn is_dismissed(&self) -> bool {
        self.status == DriverStatus::Dismissed
    }

    /// Passes per run, `None` when unbounded
    fn total_passes(&self) -> Option<u32> {
        match self.repeat {
            RepeatMode::Once if self.auto_reverse => Some(2),
            RepeatMode::Once => Some(1),
            RepeatMode::Count(n) => Some(n.max(1)),
            RepeatMode::Infinite => None,
        }
    }

    /// Run toward 1.0
    pub fn forward(&mut self) {
        self.passes_done = 0;
        self.start(DriverStatus::Forward);
    }

    /// Run toward 0.0
    pub fn reverse(&mut self) {
        self.passes_done = 0;
        self.start(DriverStatus::Reverse);
    }

    fn start(&mut self, direction: DriverStatus) {
        let at_target = match direction {
            DriverStatus::Reverse => self.value <= 0.0,
            _ => self.value >= 1.0,
        };

        if at_target && self.total_passes() == Some(1) {
            self.running = false;
            let settled = if direction == DriverStatus::Reverse {
                DriverStatus::Dismissed
            } else {
                DriverStatus::Completed
            };
            self.set_status(settled);
            return;
        }

        if at_target {
            self.value = if direction == DriverStatus::Reverse {
                1.0
            } else {
                0.0
            };
        }

        self.running = true;
        self.set_status(direction);
    }

    /// Halt without changing value or status. No value callbacks follow.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stop and rewind to the initial value
    pub fn reset(&mut self) {
        self.running = false;
        self.passes_done = 0;
        self.delay_remaining_ms = self.delay_ms as f32;
        self.value = 0.0;
        self.notify_value();
        self.set_status(DriverStatus::Dismissed);
    }

    /// Jump to a value, stopping the driver
    pub fn set_value(&mut self, value: f32) {
        self.running = false;
        self.value = value.clamp(0.0, 1.0);
        self.notify_value();
        if self.value >= 1.0 {
            self.set_status(DriverStatus::Completed);
        } else if self.value <= 0.0 {
            self.set_status(DriverStatus::Dismissed);
        }
    }

    /// Register a per-tick value listener
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(f32) + Send + 'static,
    {
        self.listeners.insert(Box::new(listener))
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id).is_some()
    }

    /// Register a status change listener
    pub fn add_status_listener<F>(&mut self, listener: F) -> StatusListenerId
    where
        F: FnMut(AnimationState) + Send + 'static,
    {
        self.status_listeners.insert(Box::new(listener))
    }

    pub fn remove_status_listener(&mut self, id: StatusListenerId) -> bool {
        self.status_listeners.remove(id).is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len() + self.status_listeners.len()
    }

    /// Stop and drop every listener
    pub fn dispose(&mut self) {
        self.running = false;
        self.listeners.clear();
        self.status_listeners.clear();
    }

    /// Advance the driver by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.running || dt_ms <= 0.0 {
            return;
        }

        let mut remaining = dt_ms;

        if self.delay_remaining_ms > 0.0 {
            let consumed = remaining.min(self.delay_remaining_ms);
            self.delay_remaining_ms -= consumed;
            remaining -= consumed;
            if remaining <= 0.0 {
                return;
            }
        }

        loop {
            let forward = self.status != DriverStatus::Reverse;
            let duration_ms = if forward {
                self.duration_ms
            } else {
                self.reverse_duration_ms.unwrap_or(self.duration_ms)
            };
            let duration = duration_ms as f32;

            let distance = if forward { 1.0 - self.value } else { self.value };
            let needed = distance * duration;

            if duration > 0.0 && remaining < needed {
                let delta = remaining / duration;
                self.value = if forward {
                    (self.value + delta).min(1.0)
                } else {
                    (self.value - delta).max(0.0)
                };
                break;
            }

            // Pass boundary reached
            remaining -= needed;
            self.value = if forward { 1.0 } else { 0.0 };
            self.passes_done += 1;

            let finished = self
                .total_passes()
                .is_some_and(|total| self.passes_done >= total);
            if finished {
                self.running = false;
                self.notify_value();
                let settled = if forward {
                    DriverStatus::Completed
                } else {
                    DriverStatus::Dismissed
                };
                self.set_status(settled);
                return;
            }

            if self.auto_reverse {
                let next = if forward {
                    DriverStatus::Reverse
                } else {
                    DriverStatus::Forward
                };
                self.set_status(next);
            } else {
                self.value = if forward { 0.0 } else { 1.0 };
            }

            // Zero-length passes advance one boundary per tick
            if duration <= 0.0 || remaining <= 0.0 {
                break;
            }

            self.skip_whole_cycles(&mut remaining);
        }

        self.notify_value();
    }

    /// Consume every full cycle that fits in `remaining` at once, leaving the
    /// final pass of a bounded run to the boundary loop.
    ///
    /// Skipped cycles end where they began, so no status changes are emitted
    /// for them.
    fn skip_whole_cycles(&mut self, remaining: &mut f32) {
        let forward_ms = f64::from(self.duration_ms);
        let reverse_ms = f64::from(self.reverse_duration_ms.unwrap_or(self.duration_ms));
        let (period, passes_per_cycle) = if self.auto_reverse {
            (forward_ms + reverse_ms, 2)
        } else if self.status == DriverStatus::Reverse {
            (reverse_ms, 1)
        } else {
            (forward_ms, 1)
        };
        if period <= 0.0 {
            return;
        }

        let available = f64::from(*remaining);
        let mut cycles = (available / period).floor();
        if let Some(total) = self.total_passes() {
            let left = total.saturating_sub(self.passes_done).saturating_sub(1);
            cycles = cycles.min(f64::from(left / passes_per_cycle));
        }
        if cycles < 1.0 {
            return;
        }

        let skipped = cycles.min(f64::from(u32::MAX)) as u32;
        self.passes_done = self
            .passes_done
            .saturating_add(skipped.saturating_mul(passes_per_cycle));
        *remaining = (available - cycles * period).max(0.0) as f32;
    }

    fn notify_value(&mut self) {
        let value = self.value;
        for (_, listener) in self.listeners.iter_mut() {
            listener(value);
        }
    }

    fn set_status(&mut self, status: DriverStatus) {
        if self.status == status {
            return;
        }
        self.status = status;
        let state = project(status);
        for (_, listener) in self.status_listeners.iter_mut() {
            listener(state);
        }
    }
}

impl std::fmt::Debug for AnimationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationController")
            .field("duration_ms", &self.duration_ms)
            .field("value", &self.value)
            .field("status", &self.status)
            .field("running", &self.running)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

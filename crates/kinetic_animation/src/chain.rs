//! Animation chains
//!
//! An [`AnimationChain`] plays an ordered list of timed steps strictly one
//! after another. Each step waits out its delay, runs its action, then holds
//! for its duration before the next step begins. Typed steps (fade, slide,
//! scale) create an [`AnimationController`] owned by the chain; the action
//! starts it and its listener receives eased values.
//!
//! # Example
//!
//! ```ignore
//! let mut chain = AnimationChain::new();
//! chain
//!     .add_fade(300, Easing::EaseOut, |opacity| set_opacity(opacity))?
//!     .add_delay(200)?
//!     .add_slide(SlideDirection::Left, 1.0, 400, Easing::EaseOutCubic, set_offset)?
//!     .on_complete(|| println!("done"))?;
//! chain.play()?;
//!
//! // Host frame loop
//! chain.tick(16.0);
//! ```

use crate::controller::{AnimationController, ControllerId};
use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::presets::{slide_offset, SlideDirection, Tween};
use slotmap::SlotMap;

/// Callback run when a step starts
pub type StepAction = Box<dyn FnMut() + Send>;

/// Callback run with the index of each finished step
pub type StepCompleteCallback = Box<dyn FnMut(usize) + Send>;

/// Callback run once the last step finishes
pub type CompleteCallback = Box<dyn FnMut() + Send>;

/// Lifecycle of a chain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainState {
    NotStarted,
    Playing,
    /// Halted by `stop()`; only `reset()` leaves this state
    Stopped,
    Completed,
    /// Terminal; builders and `play()` fail
    Disposed,
}

/// One timed step in a chain
pub struct ChainStep {
    duration_ms: u32,
    delay_ms: u32,
    curve: Easing,
    action: Option<StepAction>,
    driver: Option<ControllerId>,
}

impl ChainStep {
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn curve(&self) -> Easing {
        self.curve
    }

    /// Controller created for this step, if it is a typed step
    pub fn driver(&self) -> Option<ControllerId> {
        self.driver
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StepPhase {
    Delay,
    Running,
}

/// An ordered, serially played sequence of timed steps
pub struct AnimationChain {
    steps: Vec<ChainStep>,
    drivers: SlotMap<ControllerId, AnimationController>,
    state: ChainState,
    current_index: usize,
    phase: StepPhase,
    phase_elapsed_ms: f32,
    on_step_complete: Option<StepCompleteCallback>,
    on_complete: Option<CompleteCallback>,
}

impl AnimationChain {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            drivers: SlotMap::with_key(),
            state: ChainState::NotStarted,
            current_index: 0,
            phase: StepPhase::Delay,
            phase_elapsed_ms: 0.0,
            on_step_complete: None,
            on_complete: None,
        }
    }

    fn ensure_live(&self, operation: &'static str) -> Result<()> {
        if self.state == ChainState::Disposed {
            tracing::warn!(operation, "rejected operation on disposed chain");
            return Err(AnimationError::Disposed { operation });
        }
        Ok(())
    }

    fn push_step(
        &mut self,
        duration_ms: u32,
        delay_ms: u32,
        curve: Easing,
        action: Option<StepAction>,
        driver: Option<ControllerId>,
    ) -> &mut Self {
        self.steps.push(ChainStep {
            duration_ms,
            delay_ms,
            curve,
            action,
            driver,
        });
        self
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// Append a step running `action` after `delay_ms`, then holding for `duration_ms`
    ///
    /// Nothing is interpolated for these steps, so `curve` is only recorded
    /// on the step (see [`ChainStep::curve`]). Use the typed builders for
    /// eased values.
    pub fn add_step<F>(
        &mut self,
        duration_ms: u32,
        delay_ms: u32,
        curve: Easing,
        action: F,
    ) -> Result<&mut Self>
    where
        F: FnMut() + Send + 'static,
    {
        self.ensure_live("add a step to")?;
        Ok(self.push_step(duration_ms, delay_ms, curve, Some(Box::new(action)), None))
    }

    /// Append a step driven by its own controller; `on_update` receives eased progress
    fn add_driven<F>(&mut self, duration_ms: u32, curve: Easing, mut on_update: F) -> &mut Self
    where
        F: FnMut(f32) + Send + 'static,
    {
        let mut controller = AnimationController::new(duration_ms).with_curve(curve);
        controller.add_listener(move |value| on_update(curve.apply(value)));
        let id = self.drivers.insert(controller);
        self.push_step(duration_ms, 0, curve, None, Some(id))
    }

    /// Append an opacity step from 0.0 to 1.0
    pub fn add_fade<F>(
        &mut self,
        duration_ms: u32,
        curve: Easing,
        mut on_update: F,
    ) -> Result<&mut Self>
    where
        F: FnMut(f32) + Send + 'static,
    {
        self.ensure_live("add a fade to")?;
        let tween = Tween::new(0.0_f32, 1.0);
        Ok(self.add_driven(duration_ms, curve, move |t| on_update(tween.at(t))))
    }

    /// Append an offset step from `distance` toward `direction` back to the origin
    pub fn add_slide<F>(
        &mut self,
        direction: SlideDirection,
        distance: f32,
        duration_ms: u32,
        curve: Easing,
        mut on_update: F,
    ) -> Result<&mut Self>
    where
        F: FnMut((f32, f32)) + Send + 'static,
    {
        self.ensure_live("add a slide to")?;
        let tween = Tween::new(slide_offset(direction, distance), (0.0, 0.0));
        Ok(self.add_driven(duration_ms, curve, move |t| on_update(tween.at(t))))
    }

    /// Append a scale step from `from` to `to`
    pub fn add_scale<F>(
        &mut self,
        from: f32,
        to: f32,
        duration_ms: u32,
        curve: Easing,
        mut on_update: F,
    ) -> Result<&mut Self>
    where
        F: FnMut(f32) + Send + 'static,
    {
        self.ensure_live("add a scale to")?;
        let tween = Tween::new(from, to);
        Ok(self.add_driven(duration_ms, curve, move |t| on_update(tween.at(t))))
    }

    /// Append a pause
    pub fn add_delay(&mut self, duration_ms: u32) -> Result<&mut Self> {
        self.ensure_live("add a delay to")?;
        Ok(self.push_step(duration_ms, 0, Easing::Linear, None, None))
    }

    /// Set the delay of the most recently appended step
    pub fn with_delay(&mut self, delay_ms: u32) -> Result<&mut Self> {
        self.ensure_live("configure")?;
        if let Some(step) = self.steps.last_mut() {
            step.delay_ms = delay_ms;
        }
        Ok(self)
    }

    /// Called with the index of every finished step
    pub fn on_step_complete<F>(&mut self, callback: F) -> Result<&mut Self>
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.ensure_live("configure")?;
        self.on_step_complete = Some(Box::new(callback));
        Ok(self)
    }

    /// Called once after the last step finishes
    pub fn on_complete<F>(&mut self, callback: F) -> Result<&mut Self>
    where
        F: FnMut() + Send + 'static,
    {
        self.ensure_live("configure")?;
        self.on_complete = Some(Box::new(callback));
        Ok(self)
    }

    // =========================================================================
    // Playback
    // =========================================================================

    /// Start playing from the first step.
    ///
    /// A no-op while playing, after completion, or after `stop()`.
    pub fn play(&mut self) -> Result<()> {
        self.ensure_live("play")?;

        match self.state {
            ChainState::NotStarted => {}
            ChainState::Playing => return Ok(()),
            state => {
                tracing::debug!(?state, "play ignored; reset the chain to replay");
                return Ok(());
            }
        }

        tracing::debug!(steps = self.steps.len(), "chain play");
        self.state = ChainState::Playing;
        self.current_index = 0;
        self.phase = StepPhase::Delay;
        self.phase_elapsed_ms = 0.0;

        // Run any zero-delay first step right away
        self.advance(0.0);
        Ok(())
    }

    /// Advance owned drivers and the schedule by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if self.state == ChainState::Disposed {
            return;
        }

        for (_, driver) in self.drivers.iter_mut() {
            driver.tick(dt_ms);
        }

        if self.state == ChainState::Playing {
            self.advance(dt_ms.max(0.0));
        }
    }

    fn advance(&mut self, dt_ms: f32) {
        let mut remaining = dt_ms;

        while self.state == ChainState::Playing {
            let Some(step) = self.steps.get(self.current_index) else {
                self.finish();
                break;
            };

            let target_ms = match self.phase {
                StepPhase::Delay => step.delay_ms,
                StepPhase::Running => step.duration_ms,
            };
            let left = (target_ms as f32 - self.phase_elapsed_ms).max(0.0);

            if remaining < left {
                self.phase_elapsed_ms += remaining;
                break;
            }
            remaining -= left;
            self.phase_elapsed_ms = 0.0;

            match self.phase {
                StepPhase::Delay => self.start_step(remaining),
                StepPhase::Running => self.complete_step(),
            }
        }
    }

    fn start_step(&mut self, carried_ms: f32) {
        let index = self.current_index;
        let step = &mut self.steps[index];
        tracing::trace!(
            index,
            duration_ms = step.duration_ms,
            delay_ms = step.delay_ms,
            "chain step start"
        );

        if let Some(action) = step.action.as_mut() {
            action();
        }
        if let Some(driver) = step.driver.and_then(|id| self.drivers.get_mut(id)) {
            driver.forward();
            // The driver runs alongside the step for the rest of this frame
            driver.tick(carried_ms);
        }

        self.phase = StepPhase::Running;
    }

    fn complete_step(&mut self) {
        let index = self.current_index;
        tracing::trace!(index, "chain step complete");

        if let Some(callback) = self.on_step_complete.as_mut() {
            callback(index);
        }

        self.current_index += 1;
        self.phase = StepPhase::Delay;
    }

    fn finish(&mut self) {
        tracing::debug!(steps = self.steps.len(), "chain complete");
        self.state = ChainState::Completed;
        self.current_index = self.steps.len();
        if let Some(callback) = self.on_complete.as_mut() {
            callback();
        }
    }

    /// Halt scheduling and every driver created by this chain
    pub fn stop(&mut self) {
        if self.state == ChainState::Disposed {
            return;
        }
        if self.state == ChainState::Playing {
            tracing::debug!(index = self.current_index, "chain stop");
            self.state = ChainState::Stopped;
        }
        for (_, driver) in self.drivers.iter_mut() {
            driver.stop();
        }
    }

    /// Stop, rewind to the first step and rewind every driver
    pub fn reset(&mut self) {
        if self.state == ChainState::Disposed {
            return;
        }
        self.stop();
        tracing::debug!("chain reset");

        self.current_index = 0;
        self.phase = StepPhase::Delay;
        self.phase_elapsed_ms = 0.0;
        for (_, driver) in self.drivers.iter_mut() {
            driver.reset();
        }
        self.state = ChainState::NotStarted;
    }

    /// Release all steps, drivers and callbacks. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        if self.state == ChainState::Disposed {
            return;
        }
        tracing::debug!(drivers = self.drivers.len(), "chain dispose");

        for (_, driver) in self.drivers.iter_mut() {
            driver.dispose();
        }
        self.drivers.clear();
        self.steps.clear();
        self.on_step_complete = None;
        self.on_complete = None;
        self.state = ChainState::Disposed;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn state(&self) -> ChainState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == ChainState::Playing
    }

    pub fn is_completed(&self) -> bool {
        self.state == ChainState::Completed
    }

    pub fn is_disposed(&self) -> bool {
        self.state == ChainState::Disposed
    }

    /// Index of the step being played (equals `len()` once completed)
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    /// Sum of every step's delay and duration
    pub fn total_duration_ms(&self) -> u32 {
        self.steps.iter().fold(0u32, |total, s| {
            total.saturating_add(s.delay_ms).saturating_add(s.duration_ms)
        })
    }

    /// Controller created by a typed step
    pub fn driver(&self, id: ControllerId) -> Option<&AnimationController> {
        self.drivers.get(id)
    }

    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }
}

impl Default for AnimationChain {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AnimationChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationChain")
            .field("steps", &self.steps.len())
            .field("drivers", &self.drivers.len())
            .field("state", &self.state)
            .field("current_index", &self.current_index)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<String>>>;

    fn log() -> Log {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn push(log: &Log, entry: impl Into<String>) {
        log.lock().unwrap().push(entry.into());
    }

    /// Tick until the chain stops playing; returns elapsed milliseconds
    fn run(chain: &mut AnimationChain, frame_ms: f32) -> f32 {
        let mut elapsed = 0.0;
        while chain.is_playing() {
            chain.tick(frame_ms);
            elapsed += frame_ms;
            assert!(elapsed < 60_000.0, "chain never completed");
        }
        elapsed
    }

    #[test]
    fn test_fade_delay_slide_timing() {
        let steps = Arc::new(Mutex::new(Vec::new()));
        let steps_clone = steps.clone();
        let completed_at = Arc::new(Mutex::new(None));
        let completed_clone = completed_at.clone();

        let mut chain = AnimationChain::new();
        chain
            .add_fade(300, Easing::Linear, |_| {})
            .unwrap()
            .add_delay(200)
            .unwrap()
            .add_slide(SlideDirection::Left, 1.0, 400, Easing::Linear, |_| {})
            .unwrap()
            .on_step_complete(move |i| steps_clone.lock().unwrap().push(i))
            .unwrap()
            .on_complete(move || *completed_clone.lock().unwrap() = Some(()))
            .unwrap();

        assert_eq!(chain.total_duration_ms(), 900);
        chain.play().unwrap();

        let elapsed = run(&mut chain, 10.0);
        assert_eq!(elapsed, 900.0);
        assert_eq!(*steps.lock().unwrap(), vec![0, 1, 2]);
        assert!(completed_at.lock().unwrap().is_some());
        assert_eq!(chain.state(), ChainState::Completed);
        assert_eq!(chain.current_index(), 3);
    }

    #[test]
    fn test_completion_within_one_frame_of_total() {
        let mut chain = AnimationChain::new();
        chain
            .add_fade(300, Easing::Linear, |_| {})
            .unwrap()
            .add_delay(200)
            .unwrap()
            .add_scale(0.5, 1.0, 400, Easing::Linear, |_| {})
            .unwrap();
        chain.play().unwrap();

        let elapsed = run(&mut chain, 16.0);
        assert!((900.0..916.0).contains(&elapsed), "elapsed {}", elapsed);
    }

    #[test]
    fn test_delay_runs_before_action() {
        let events = log();
        let action_log = events.clone();

        let mut chain = AnimationChain::new();
        chain
            .add_step(100, 50, Easing::Linear, move || push(&action_log, "action"))
            .unwrap();
        chain.play().unwrap();

        chain.tick(40.0);
        assert!(events.lock().unwrap().is_empty());
        chain.tick(10.0);
        assert_eq!(*events.lock().unwrap(), vec!["action"]);
    }

    #[test]
    fn test_zero_delay_action_fires_on_play() {
        let events = log();
        let action_log = events.clone();

        let mut chain = AnimationChain::new();
        chain
            .add_step(100, 0, Easing::Linear, move || push(&action_log, "first"))
            .unwrap();
        chain.play().unwrap();

        assert_eq!(*events.lock().unwrap(), vec!["first"]);
    }

    #[test]
    fn test_steps_are_strictly_serial() {
        let events = log();
        let a = events.clone();
        let b = events.clone();

        let mut chain = AnimationChain::new();
        chain
            .add_step(100, 0, Easing::Linear, move || push(&a, "a"))
            .unwrap()
            .add_step(100, 20, Easing::Linear, move || push(&b, "b"))
            .unwrap();
        chain.play().unwrap();

        chain.tick(110.0);
        assert_eq!(*events.lock().unwrap(), vec!["a"]);
        chain.tick(10.0);
        assert_eq!(*events.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_fade_driver_reports_values() {
        let values = Arc::new(Mutex::new(Vec::new()));
        let values_clone = values.clone();

        let mut chain = AnimationChain::new();
        chain
            .add_fade(100, Easing::Linear, move |v| values_clone.lock().unwrap().push(v))
            .unwrap();
        chain.play().unwrap();

        chain.tick(50.0);
        chain.tick(50.0);

        let values = values.lock().unwrap();
        assert!((values[0] - 0.5).abs() < 1e-5);
        assert_eq!(*values.last().unwrap(), 1.0);
    }

    #[test]
    fn test_slide_driver_ends_at_origin() {
        let offsets = Arc::new(Mutex::new(Vec::new()));
        let offsets_clone = offsets.clone();

        let mut chain = AnimationChain::new();
        chain
            .add_slide(SlideDirection::Down, 2.0, 100, Easing::Linear, move |o| {
                offsets_clone.lock().unwrap().push(o)
            })
            .unwrap();
        chain.play().unwrap();
        chain.tick(50.0);
        chain.tick(60.0);

        let offsets = offsets.lock().unwrap();
        assert!((offsets[0].1 - 1.0).abs() < 1e-5);
        assert_eq!(*offsets.last().unwrap(), (0.0, 0.0));
    }

    #[test]
    fn test_play_while_playing_is_noop() {
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();

        let mut chain = AnimationChain::new();
        chain
            .add_step(100, 0, Easing::Linear, move || *count_clone.lock().unwrap() += 1)
            .unwrap();
        chain.play().unwrap();
        chain.tick(30.0);
        chain.play().unwrap();

        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(chain.current_index(), 0);
    }

    #[test]
    fn test_stop_prevents_further_steps() {
        let events = log();
        let a = events.clone();
        let b = events.clone();

        let mut chain = AnimationChain::new();
        chain
            .add_fade(100, Easing::Linear, move |_| push(&a, "fade"))
            .unwrap()
            .add_step(100, 0, Easing::Linear, move || push(&b, "second"))
            .unwrap();
        chain.play().unwrap();
        chain.tick(50.0);
        chain.stop();

        let fade_updates = events.lock().unwrap().len();
        chain.tick(500.0);
        chain.play().unwrap();
        chain.tick(500.0);

        assert_eq!(chain.state(), ChainState::Stopped);
        assert_eq!(events.lock().unwrap().len(), fade_updates);
        assert!(!events.lock().unwrap().contains(&"second".to_string()));
    }

    #[test]
    fn test_reset_rewinds_and_allows_replay() {
        let mut chain = AnimationChain::new();
        chain.add_fade(100, Easing::Linear, |_| {}).unwrap();
        let driver_id = chain.steps()[0].driver().unwrap();

        chain.play().unwrap();
        chain.tick(60.0);
        chain.reset();

        assert_eq!(chain.state(), ChainState::NotStarted);
        assert_eq!(chain.current_index(), 0);
        assert_eq!(chain.driver(driver_id).unwrap().value(), 0.0);

        chain.play().unwrap();
        run(&mut chain, 25.0);
        assert!(chain.is_completed());
    }

    #[test]
    fn test_disposed_chain_rejects_play_and_builders() {
        let mut chain = AnimationChain::new();
        chain.add_fade(100, Easing::Linear, |_| {}).unwrap();
        chain.dispose();

        assert!(matches!(chain.play(), Err(AnimationError::Disposed { .. })));
        assert!(chain.add_delay(10).is_err());
        assert!(chain.add_step(10, 0, Easing::Linear, || {}).is_err());
        assert_eq!(chain.driver_count(), 0);
        assert!(chain.is_empty());

        // Second dispose is a no-op
        chain.dispose();
        assert!(chain.is_disposed());
    }

    #[test]
    fn test_empty_chain_completes_on_play() {
        let done = Arc::new(Mutex::new(false));
        let done_clone = done.clone();

        let mut chain = AnimationChain::new();
        chain
            .on_complete(move || *done_clone.lock().unwrap() = true)
            .unwrap();
        chain.play().unwrap();

        assert!(chain.is_completed());
        assert!(*done.lock().unwrap());
    }

    #[test]
    fn test_with_delay_sets_last_step() {
        let mut chain = AnimationChain::new();
        chain
            .add_fade(100, Easing::Linear, |_| {})
            .unwrap()
            .with_delay(40)
            .unwrap();

        assert_eq!(chain.steps()[0].delay_ms(), 40);
        assert_eq!(chain.total_duration_ms(), 140);
    }

    #[test]
    fn test_total_duration_saturates() {
        let mut chain = AnimationChain::new();
        chain.add_delay(u32::MAX).unwrap().add_delay(1).unwrap();
        assert_eq!(chain.total_duration_ms(), u32::MAX);
    }

    #[test]
    fn test_step_curve_is_recorded() {
        let mut chain = AnimationChain::new();
        chain.add_step(100, 0, Easing::Wobble, || {}).unwrap();
        assert_eq!(chain.steps()[0].curve(), Easing::Wobble);
    }

    #[test]
    fn test_completed_chain_ignores_play() {
        let mut chain = AnimationChain::new();
        chain.add_delay(10).unwrap();
        chain.play().unwrap();
        chain.tick(10.0);
        assert!(chain.is_completed());

        chain.play().unwrap();
        assert!(chain.is_completed());
    }
}

//! Staggered animations
//!
//! A single master driver is subdivided into per-item [`Interval`]s whose
//! start times are offset by a fixed stagger delay. Every item gets the same
//! span length, `1 - (n - 1) * ratio`, so consecutive items overlap.
//!
//! When `(n - 1) * ratio >= 1` the shared span is non-positive and each
//! interval collapses to zero width at its start. Such plans are reported
//! by [`StaggerPlan::is_degenerate`] but are not an error.

use crate::config::AnimationConfig;
use crate::controller::AnimationController;
use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::interval::Interval;
use crate::status::AnimationState;
use std::sync::Arc;

/// Immutable set of per-item intervals derived from one master timeline
#[derive(Clone, Debug, PartialEq)]
pub struct StaggerPlan {
    intervals: Vec<Interval>,
    stagger_ratio: f32,
    item_span: f32,
    curve: Easing,
}

impl StaggerPlan {
    /// Compute intervals for `item_count` items.
    ///
    /// `stagger_delay_ms / total_duration_ms` is the offset between
    /// consecutive item starts, as a fraction of the master timeline.
    pub fn compute(
        item_count: usize,
        total_duration_ms: u32,
        stagger_delay_ms: u32,
        curve: Easing,
    ) -> Self {
        let ratio = if total_duration_ms == 0 {
            0.0
        } else {
            stagger_delay_ms as f64 / total_duration_ms as f64
        };
        let span = 1.0 - item_count.saturating_sub(1) as f64 * ratio;

        let intervals = (0..item_count)
            .map(|i| {
                let offset = i as f64 * ratio;
                let start = offset.clamp(0.0, 1.0);
                // A negative span collapses the interval onto its start
                let end = (offset + span).clamp(0.0, 1.0).max(start);
                Interval::new(start as f32, end as f32, curve)
            })
            .collect();

        let plan = Self {
            intervals,
            stagger_ratio: ratio as f32,
            item_span: span as f32,
            curve,
        };

        if plan.is_degenerate() {
            tracing::warn!(
                item_count,
                total_duration_ms,
                stagger_delay_ms,
                "stagger delay leaves no time per item; intervals collapse to steps"
            );
        }

        plan
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Offset between consecutive starts as a fraction of the timeline
    pub fn stagger_ratio(&self) -> f32 {
        self.stagger_ratio
    }

    /// Shared span length before clamping (may be negative)
    pub fn item_span(&self) -> f32 {
        self.item_span
    }

    pub fn curve(&self) -> Easing {
        self.curve
    }

    /// Whether clamping collapsed the intervals
    pub fn is_degenerate(&self) -> bool {
        self.intervals.len() > 1 && self.item_span <= 0.0
    }

    /// Interval for item `index`
    pub fn interval(&self, index: usize) -> Result<&Interval> {
        self.intervals
            .get(index)
            .ok_or(AnimationError::IndexOutOfRange {
                index,
                len: self.intervals.len(),
            })
    }

    /// Eased progress of item `index` at master progress `progress`
    pub fn value(&self, index: usize, progress: f32) -> Result<f32> {
        Ok(self.interval(index)?.remap(progress))
    }

    /// Eased progress of every item, in item order
    pub fn values(&self, progress: f32) -> Vec<f32> {
        self.intervals.iter().map(|i| i.remap(progress)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interval> {
        self.intervals.iter()
    }
}

/// A master driver paired with a stagger plan
///
/// Changing any plan input recomputes the plan and swaps it in whole;
/// clones of the previous `Arc` stay valid.
#[derive(Debug)]
pub struct StaggeredAnimation {
    controller: AnimationController,
    plan: Arc<StaggerPlan>,
    item_count: usize,
    stagger_delay_ms: u32,
    curve: Easing,
}

impl StaggeredAnimation {
    pub fn new(item_count: usize, duration_ms: u32, stagger_delay_ms: u32, curve: Easing) -> Self {
        Self {
            controller: AnimationController::new(duration_ms),
            plan: Arc::new(StaggerPlan::compute(
                item_count,
                duration_ms,
                stagger_delay_ms,
                curve,
            )),
            item_count,
            stagger_delay_ms,
            curve,
        }
    }

    /// Build from a config; the master driver follows its repeat and auto-play settings
    pub fn from_config(item_count: usize, stagger_delay_ms: u32, config: &AnimationConfig) -> Self {
        let controller = AnimationController::from_config(&config.with_curve(Easing::Linear));
        Self {
            plan: Arc::new(StaggerPlan::compute(
                item_count,
                config.duration_ms,
                stagger_delay_ms,
                config.curve,
            )),
            controller,
            item_count,
            stagger_delay_ms,
            curve: config.curve,
        }
    }

    fn recompute(&mut self) {
        self.plan = Arc::new(StaggerPlan::compute(
            self.item_count,
            self.controller.duration_ms(),
            self.stagger_delay_ms,
            self.curve,
        ));
    }

    /// Shared handle to the current plan
    pub fn plan(&self) -> Arc<StaggerPlan> {
        Arc::clone(&self.plan)
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn set_item_count(&mut self, item_count: usize) {
        if self.item_count != item_count {
            self.item_count = item_count;
            self.recompute();
        }
    }

    pub fn set_stagger_delay(&mut self, stagger_delay_ms: u32) {
        if self.stagger_delay_ms != stagger_delay_ms {
            self.stagger_delay_ms = stagger_delay_ms;
            self.recompute();
        }
    }

    pub fn set_curve(&mut self, curve: Easing) {
        if self.curve != curve {
            self.curve = curve;
            self.recompute();
        }
    }

    pub fn set_duration(&mut self, duration_ms: u32) {
        if self.controller.duration_ms() != duration_ms {
            self.controller.set_duration(duration_ms);
            self.recompute();
        }
    }

    pub fn controller(&self) -> &AnimationController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut AnimationController {
        &mut self.controller
    }

    pub fn forward(&mut self) {
        self.controller.forward();
    }

    pub fn reverse(&mut self) {
        self.controller.reverse();
    }

    pub fn stop(&mut self) {
        self.controller.stop();
    }

    pub fn reset(&mut self) {
        self.controller.reset();
    }

    pub fn tick(&mut self, dt_ms: f32) {
        self.controller.tick(dt_ms);
    }

    pub fn state(&self) -> AnimationState {
        self.controller.state()
    }

    pub fn is_animating(&self) -> bool {
        self.controller.is_animating()
    }

    /// Current eased progress of item `index`
    pub fn item_value(&self, index: usize) -> Result<f32> {
        self.plan.value(index, self.controller.value())
    }

    /// Current eased progress of every item
    pub fn item_values(&self) -> Vec<f32> {
        self.plan.values(self.controller.value())
    }
}

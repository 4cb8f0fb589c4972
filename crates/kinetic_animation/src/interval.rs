//! Interval remapping
//!
//! An [`Interval`] selects a sub-range of a master timeline and derives a
//! local, eased progress for it. Staggered items each own one.

use crate::easing::Easing;

/// A `[start, end]` slice of the master timeline with its own curve
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    start: f32,
    end: f32,
    curve: Easing,
}

impl Interval {
    /// Create an interval. Bounds are clamped into `[0, 1]` and ordered.
    pub fn new(start: f32, end: f32, curve: Easing) -> Self {
        let start = start.clamp(0.0, 1.0);
        let end = end.clamp(0.0, 1.0);
        let (start, end) = if start <= end {
            (start, end)
        } else {
            (end, start)
        };
        Self { start, end, curve }
    }

    /// The full timeline with the given curve
    pub fn full(curve: Easing) -> Self {
        Self::new(0.0, 1.0, curve)
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn end(&self) -> f32 {
        self.end
    }

    pub fn curve(&self) -> Easing {
        self.curve
    }

    /// Length of the interval on the master timeline
    pub fn span(&self) -> f32 {
        self.end - self.start
    }

    /// Whether `progress` falls inside `[start, end]`
    pub fn contains(&self, progress: f32) -> bool {
        progress >= self.start && progress <= self.end
    }

    /// Local progress in `[0, 1]` before the curve is applied
    pub fn local_progress(&self, master_progress: f32) -> f32 {
        let span = self.span();
        if span <= 0.0 {
            // Zero-width: a step at `start`
            return if master_progress >= self.start {
                1.0
            } else {
                0.0
            };
        }
        ((master_progress - self.start) / span).clamp(0.0, 1.0)
    }

    /// Eased progress for a master timeline position
    pub fn remap(&self, master_progress: f32) -> f32 {
        self.curve.apply(self.local_progress(master_progress))
    }

    /// Map the eased progress onto `[from, to]`
    pub fn lerp(&self, from: f32, to: f32, master_progress: f32) -> f32 {
        from + (to - from) * self.remap(master_progress)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::full(Easing::Linear)
    }
}

/// Free-function form of [`Interval::remap`]
pub fn remap(master_progress: f32, interval: &Interval) -> f32 {
    interval.remap(master_progress)
}

//! Animation presets for common entry/exit animations
//!
//! Each preset pairs an [`AnimationConfig`] with a [`Tween`] describing the
//! animated property. Rendering layers feed the driver's linear progress to
//! [`PresetAnimation::sample`] and apply the result as opacity, offset,
//! scale, rotation or gradient position.

use crate::config::AnimationConfig;
use crate::easing::Easing;

/// Direction an element slides from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlideDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SlideDirection {
    /// The opposite direction
    pub fn inverse(self) -> Self {
        match self {
            SlideDirection::Left => SlideDirection::Right,
            SlideDirection::Right => SlideDirection::Left,
            SlideDirection::Up => SlideDirection::Down,
            SlideDirection::Down => SlideDirection::Up,
        }
    }
}

/// Offset of `distance` toward `direction`, in element-relative units
pub fn slide_offset(direction: SlideDirection, distance: f32) -> (f32, f32) {
    match direction {
        SlideDirection::Left => (-distance, 0.0),
        SlideDirection::Right => (distance, 0.0),
        SlideDirection::Up => (0.0, -distance),
        SlideDirection::Down => (0.0, distance),
    }
}

/// Values that can be linearly interpolated
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for (f32, f32) {
    fn lerp(self, to: Self, t: f32) -> Self {
        (self.0.lerp(to.0, t), self.1.lerp(to.1, t))
    }
}

/// A begin/end pair
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween<T> {
    pub from: T,
    pub to: T,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T) -> Self {
        Self { from, to }
    }

    /// Value at eased progress `t` (may extrapolate for overshooting curves)
    pub fn at(&self, t: f32) -> T {
        self.from.lerp(self.to, t)
    }
}

/// A configured preset
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PresetAnimation<T> {
    pub config: AnimationConfig,
    pub tween: Tween<T>,
}

impl<T: Lerp> PresetAnimation<T> {
    /// Property value for linear driver progress
    pub fn sample(&self, progress: f32) -> T {
        self.tween.at(self.config.curve.apply(progress.clamp(0.0, 1.0)))
    }
}

fn preset<T: Lerp>(duration_ms: u32, curve: Easing, from: T, to: T) -> PresetAnimation<T> {
    PresetAnimation {
        config: AnimationConfig::new(duration_ms).with_curve(curve),
        tween: Tween::new(from, to),
    }
}

/// Pre-built animation presets for common patterns
pub struct AnimationPreset;

impl AnimationPreset {
    // ========================================================================
    // Fade animations
    // ========================================================================

    /// Opacity from transparent to opaque
    pub fn fade_in(duration_ms: u32) -> PresetAnimation<f32> {
        preset(duration_ms, Easing::EaseOut, 0.0, 1.0)
    }

    /// Opacity from opaque to transparent
    pub fn fade_out(duration_ms: u32) -> PresetAnimation<f32> {
        preset(duration_ms, Easing::EaseIn, 1.0, 0.0)
    }

    // ========================================================================
    // Slide animations
    // ========================================================================

    /// Offset from `distance` toward `direction` back to the origin
    pub fn slide_in(
        direction: SlideDirection,
        distance: f32,
        duration_ms: u32,
    ) -> PresetAnimation<(f32, f32)> {
        preset(
            duration_ms,
            Easing::EaseOutCubic,
            slide_offset(direction, distance),
            (0.0, 0.0),
        )
    }

    /// Offset from the origin to `distance` toward `direction`
    pub fn slide_out(
        direction: SlideDirection,
        distance: f32,
        duration_ms: u32,
    ) -> PresetAnimation<(f32, f32)> {
        preset(
            duration_ms,
            Easing::EaseInCubic,
            (0.0, 0.0),
            slide_offset(direction, distance),
        )
    }

    // ========================================================================
    // Scale, rotation and bounce
    // ========================================================================

    /// Scale from zero to full size
    pub fn scale_in(duration_ms: u32) -> PresetAnimation<f32> {
        preset(duration_ms, Easing::EaseOutCubic, 0.0, 1.0)
    }

    /// Scale in with a slight overshoot
    pub fn pop_in(duration_ms: u32) -> PresetAnimation<f32> {
        preset(duration_ms, Easing::GentleOvershoot, 0.0, 1.0)
    }

    /// Rotation by `turns` full turns
    pub fn rotate(turns: f32, duration_ms: u32) -> PresetAnimation<f32> {
        preset(duration_ms, Easing::Linear, 0.0, turns)
    }

    /// Scale in with damped rebounds
    pub fn bounce_in(duration_ms: u32) -> PresetAnimation<f32> {
        preset(duration_ms, Easing::bounce(1.0, 1.0), 0.0, 1.0)
    }

    // ========================================================================
    // Shimmer
    // ========================================================================

    /// Gradient sweep position across the element, repeating until stopped
    pub fn shimmer(duration_ms: u32) -> PresetAnimation<f32> {
        let mut shimmer = preset(duration_ms, Easing::Linear, -1.0, 2.0);
        shimmer.config = shimmer.config.with_repeat(None);
        shimmer
    }
}

//! Easing functions for animations
//!
//! Every curve maps normalized time `t` in `[0, 1]` to a progress value.
//! Overshooting and elastic curves leave `[0, 1]` between the endpoints but
//! always return exactly `0.0` at `t = 0` and `1.0` at `t = 1`.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Period of the [`Easing::Elastic`] curve
pub const ELASTIC_PERIOD: f32 = 0.3;
/// Period of the [`Easing::RubberBand`] curve
pub const RUBBER_BAND_PERIOD: f32 = 0.4;
/// Tension of [`Easing::GentleOvershoot`]
pub const GENTLE_OVERSHOOT_TENSION: f32 = 1.5;
/// Tension of [`Easing::StrongOvershoot`]
pub const STRONG_OVERSHOOT_TENSION: f32 = 3.0;
/// Tension of [`Easing::Anticipate`]
pub const ANTICIPATE_TENSION: f32 = 2.0;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    CubicBezier(f32, f32, f32, f32),

    /// Quadratic ease in/out
    SmoothBounce,
    /// Exponentially decaying sine with period 0.3
    Elastic,
    /// Cubic overshoot with tension 1.5
    GentleOvershoot,
    /// Cubic overshoot with tension 3.0
    StrongOvershoot,
    /// Dips below zero before rising to one
    Anticipate,
    /// Anticipate for the first half, overshoot for the second
    AnticipateOvershoot,
    SmoothDecelerate,
    SmoothAccelerate,
    /// Oscillates around the linear ramp
    Wobble,
    /// Stretches past the target and settles back
    RubberBand,

    /// Damped ease-out bounce. Build with [`Easing::bounce`].
    Bounce { bounciness: f32, speed: f32 },
    /// Ease-out elastic with custom period and amplitude. Build with [`Easing::elastic_with`].
    ElasticCustom { period: f32, amplitude: f32 },
}

impl Easing {
    /// Bounce curve with configurable rebound depth and playback speed.
    ///
    /// `bounciness = 1.0, speed = 1.0` is the standard ease-out bounce.
    pub fn bounce(bounciness: f32, speed: f32) -> Self {
        Easing::Bounce {
            bounciness: bounciness.max(0.0),
            speed: if speed > 0.0 { speed } else { 1.0 },
        }
    }

    /// Elastic ease-out with configurable period and amplitude
    pub fn elastic_with(period: f32, amplitude: f32) -> Self {
        Easing::ElasticCustom {
            period: if period > 0.0 { period } else { ELASTIC_PERIOD },
            amplitude,
        }
    }

    /// All parameterless named curves, plus the default bounce and elastic factories
    pub fn all_named() -> Vec<Easing> {
        vec![
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::EaseInQuad,
            Easing::EaseOutQuad,
            Easing::EaseInOutQuad,
            Easing::EaseInCubic,
            Easing::EaseOutCubic,
            Easing::EaseInOutCubic,
            Easing::EaseInQuart,
            Easing::EaseOutQuart,
            Easing::EaseInOutQuart,
            Easing::SmoothBounce,
            Easing::Elastic,
            Easing::GentleOvershoot,
            Easing::StrongOvershoot,
            Easing::Anticipate,
            Easing::AnticipateOvershoot,
            Easing::SmoothDecelerate,
            Easing::SmoothAccelerate,
            Easing::Wobble,
            Easing::RubberBand,
            Easing::bounce(1.0, 1.0),
            Easing::elastic_with(ELASTIC_PERIOD, 1.0),
        ]
    }

    /// Whether the curve is monotonically non-decreasing on `[0, 1]`
    pub fn is_monotonic(&self) -> bool {
        !matches!(
            self,
            Easing::Elastic
                | Easing::GentleOvershoot
                | Easing::StrongOvershoot
                | Easing::Anticipate
                | Easing::AnticipateOvershoot
                | Easing::Wobble
                | Easing::RubberBand
                | Easing::Bounce { .. }
                | Easing::ElasticCustom { .. }
                | Easing::CubicBezier(..)
        )
    }

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        // Endpoints are always exact
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInQuart => t * t * t * t,
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),

            Easing::SmoothBounce => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::Elastic => elastic(t),
            Easing::GentleOvershoot => overshoot(t, GENTLE_OVERSHOOT_TENSION),
            Easing::StrongOvershoot => overshoot(t, STRONG_OVERSHOOT_TENSION),
            Easing::Anticipate => anticipate(t, ANTICIPATE_TENSION),
            Easing::AnticipateOvershoot => {
                if t < 0.5 {
                    0.5 * anticipate(t * 2.0, ANTICIPATE_TENSION)
                } else {
                    0.5 * overshoot(t * 2.0 - 1.0, GENTLE_OVERSHOOT_TENSION) + 0.5
                }
            }
            Easing::SmoothDecelerate => 1.0 - (1.0 - t).powi(3),
            Easing::SmoothAccelerate => t * t * t,
            Easing::Wobble => t * (1.0 + 0.3 * (3.0 * 2.0 * PI * t).sin()),
            Easing::RubberBand => elastic_out(t, RUBBER_BAND_PERIOD, 1.0),

            Easing::Bounce { bounciness, speed } => {
                let scaled = (t * speed).min(1.0);
                if scaled >= 1.0 {
                    return 1.0;
                }
                ease_out_bounce(scaled, *bounciness)
            }
            Easing::ElasticCustom { period, amplitude } => elastic_out(t, *period, *amplitude),
        }
    }
}

/// `2^(-10(t-1)) * sin((t - 1 - p/4) * 2π/p) + 1`
fn elastic(t: f32) -> f32 {
    let p = ELASTIC_PERIOD;
    2f32.powf(-10.0 * (t - 1.0)) * ((t - 1.0 - p / 4.0) * 2.0 * PI / p).sin() + 1.0
}

/// Penner ease-out elastic
fn elastic_out(t: f32, period: f32, amplitude: f32) -> f32 {
    let (a, s) = if amplitude < 1.0 {
        (1.0, period / 4.0)
    } else {
        (amplitude, period / (2.0 * PI) * (1.0 / amplitude).asin())
    };
    a * 2f32.powf(-10.0 * t) * ((t - s) * 2.0 * PI / period).sin() + 1.0
}

/// `(t-1)^2 * ((k+1)(t-1) + k) + 1`
fn overshoot(t: f32, tension: f32) -> f32 {
    let t = t - 1.0;
    t * t * ((tension + 1.0) * t + tension) + 1.0
}

/// `t^2 * ((k+1)t - k)`
fn anticipate(t: f32, tension: f32) -> f32 {
    t * t * ((tension + 1.0) * t - tension)
}

/// Four-segment damped bounce with breakpoints at 1/2.75, 2/2.75, 2.5/2.75.
///
/// Rebounds after the first impact are scaled by `bounciness`.
fn ease_out_bounce(t: f32, bounciness: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;

    if t < 1.0 / D {
        return N * t * t;
    }

    let standard = if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    };

    1.0 - bounciness * (1.0 - standard)
}

/// Cubic bezier easing calculation (matches CSS spec / browser implementations).
///
/// Uses Newton-Raphson with binary-search fallback.
/// Computes in f64 internally to avoid f32 precision jitter at 120fps.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let x = t as f64;
    let x1 = x1 as f64;
    let y1 = y1 as f64;
    let x2 = x2 as f64;
    let y2 = y2 as f64;

    let mut p = x;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2) as f32;
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = x;
    for _ in 0..20 {
        let val = bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2) as f32
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³ in Horner form
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_exact() {
        for easing in Easing::all_named() {
            assert_eq!(easing.apply(0.0), 0.0, "{:?} at t=0", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_parametrized_endpoints_are_exact() {
        for easing in [
            Easing::bounce(0.5, 2.0),
            Easing::bounce(2.0, 0.5),
            Easing::elastic_with(0.5, 2.0),
            Easing::elastic_with(0.2, 0.5),
            Easing::CubicBezier(0.42, 0.0, 0.58, 1.0),
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
    }

    #[test]
    fn test_smooth_bounce_matches_quadratic_ease() {
        assert!((Easing::SmoothBounce.apply(0.25) - 0.125).abs() < 1e-6);
        assert!((Easing::SmoothBounce.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((Easing::SmoothBounce.apply(0.75) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_overshoot_exceeds_one() {
        let gentle_peak = (1..100)
            .map(|i| Easing::GentleOvershoot.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        let strong_peak = (1..100)
            .map(|i| Easing::StrongOvershoot.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);

        assert!(gentle_peak > 1.0);
        assert!(strong_peak > gentle_peak);
    }

    #[test]
    fn test_anticipate_dips_below_zero() {
        assert!(Easing::Anticipate.apply(0.3) < 0.0);
        assert!(Easing::AnticipateOvershoot.apply(0.15) < 0.0);
        assert!(Easing::AnticipateOvershoot.apply(0.8) > 1.0);
        assert!((Easing::AnticipateOvershoot.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_accelerate_decelerate() {
        assert!((Easing::SmoothAccelerate.apply(0.5) - 0.125).abs() < 1e-6);
        assert!((Easing::SmoothDecelerate.apply(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_wobble_oscillates_around_linear() {
        // sin(6π·t) is positive just after t = 0 and negative just after t = 1/6
        assert!(Easing::Wobble.apply(0.05) > 0.05);
        assert!(Easing::Wobble.apply(0.25) < 0.25);
    }

    #[test]
    fn test_rubber_band_overshoots_then_settles() {
        let peak = (1..100)
            .map(|i| Easing::RubberBand.apply(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0);
        assert!((Easing::RubberBand.apply(0.99) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_standard_bounce_breakpoints() {
        let bounce = Easing::bounce(1.0, 1.0);
        assert!((bounce.apply(1.0 / 2.75) - 1.0).abs() < 1e-5);
        assert!((bounce.apply(1.5 / 2.75) - 0.75).abs() < 1e-5);
        assert!((bounce.apply(2.25 / 2.75) - 0.9375).abs() < 1e-5);
    }

    #[test]
    fn test_bounciness_scales_rebounds() {
        let soft = Easing::bounce(0.5, 1.0);
        let flat = Easing::bounce(0.0, 1.0);
        assert!((soft.apply(1.5 / 2.75) - 0.875).abs() < 1e-5);
        assert!((flat.apply(1.5 / 2.75) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_bounce_speed_finishes_early() {
        let fast = Easing::bounce(1.0, 2.0);
        assert_eq!(fast.apply(0.5), 1.0);
        assert_eq!(fast.apply(0.75), 1.0);
    }

    #[test]
    fn test_cubic_bezier_linear() {
        let linear = Easing::CubicBezier(0.0, 0.0, 1.0, 1.0);
        assert!((linear.apply(0.3) - 0.3).abs() < 1e-4);
    }

    #[test]
    fn test_monotonic_classification() {
        assert!(Easing::SmoothDecelerate.is_monotonic());
        assert!(Easing::SmoothAccelerate.is_monotonic());
        assert!(!Easing::Elastic.is_monotonic());
    }
}

//! Kinetic Animation
//!
//! Curves, interval remapping, staggered sequences and step chains for
//! tick-driven UI animation.
//!
//! # Features
//!
//! - **Easing**: standard, overshooting, elastic and bounce curves with exact endpoints
//! - **Intervals**: remap a master progress value onto a sub-range of the timeline
//! - **Stagger**: derive overlapping per-item intervals from one driver
//! - **Chains**: play fade/slide/scale/delay steps strictly in order
//! - **Controllers**: duration-based drivers with repeat, auto-reverse and listeners

pub mod chain;
pub mod config;
pub mod controller;
pub mod easing;
pub mod error;
pub mod interval;
pub mod presets;
pub mod runner;
pub mod scheduler;
pub mod stagger;
pub mod status;

pub use chain::{AnimationChain, ChainState, ChainStep};
pub use config::{AnimationConfig, ConfigOverrides, RepeatMode};
pub use controller::{AnimationController, ControllerId, ListenerId, StatusListenerId};
pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use interval::{remap, Interval};
pub use presets::{slide_offset, AnimationPreset, PresetAnimation, SlideDirection, Tween};
pub use runner::play_chain;
pub use scheduler::{AnimationScheduler, ChainId, StaggerId};
pub use stagger::{StaggerPlan, StaggeredAnimation};
pub use status::{project, AnimationState, DriverStatus};

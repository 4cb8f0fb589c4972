//! Animation state projection
//!
//! Drivers track a raw [`DriverStatus`]. Status listeners and callers see the
//! public [`AnimationState`], derived through [`project`].

use serde::{Deserialize, Serialize};

/// Raw phase of a driver
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DriverStatus {
    /// Stopped at the beginning
    #[default]
    Dismissed,
    /// Running from 0.0 toward 1.0
    Forward,
    /// Running from 1.0 toward 0.0
    Reverse,
    /// Stopped at the end
    Completed,
}

/// Public animation state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationState {
    /// Never produced by [`project`]; kept as the state of an unattached animation
    #[default]
    Idle,
    Forward,
    Reverse,
    Completed,
    Dismissed,
}

impl AnimationState {
    /// Whether a driver in this state is advancing
    pub fn is_running(self) -> bool {
        matches!(self, AnimationState::Forward | AnimationState::Reverse)
    }
}

/// Project a raw driver status onto the public state
pub fn project(status: DriverStatus) -> AnimationState {
    match status {
        DriverStatus::Forward => AnimationState::Forward,
        DriverStatus::Reverse => AnimationState::Reverse,
        DriverStatus::Completed => AnimationState::Completed,
        DriverStatus::Dismissed => AnimationState::Dismissed,
    }
}

impl From<DriverStatus> for AnimationState {
    fn from(status: DriverStatus) -> Self {
        project(status)
    }
}

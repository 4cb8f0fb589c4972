//! Animation error types

use thiserror::Error;

/// Errors raised at the point of misuse
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// Operation attempted on a disposed chain
    #[error("cannot {operation} a disposed animation chain")]
    Disposed { operation: &'static str },

    /// Item index outside a stagger plan
    #[error("item index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;

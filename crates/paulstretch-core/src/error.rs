//! Error types for paulstretch-core.

use thiserror::Error;

/// Error type for engine construction and the window contract.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid stretch factor: {0}. Must be finite and at least 1.0")]
    InvalidStretchFactor(f64),

    #[error("Invalid window size: {0} samples. Must be at least 1")]
    InvalidWindow(usize),

    #[error("Window size mismatch: expected {expected} samples, got {actual}")]
    WindowMismatch { expected: usize, actual: usize },
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;

//! Error types.

use thiserror::Error;

/// Error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Write on a closed stream. `accepted` bytes of the call were taken
    /// before the close was observed.
    #[error("Stream closed after accepting {accepted} bytes")]
    Closed { accepted: usize },

    /// Read on a closed stream with no output left.
    #[error("End of stream")]
    EndOfStream,

    /// Empty sample buffer passed to a sample-level read or write.
    #[error("Sample buffer must not be empty")]
    EmptyBuffer,

    /// Engine produced a window of the wrong size.
    #[error("Engine window mismatch: expected {expected} samples, got {actual}")]
    WindowMismatch { expected: usize, actual: usize },

    /// Engine error.
    #[error("Engine error: {0}")]
    Core(#[from] paulstretch_core::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Pipe writer thread panicked.
    #[error("Pipe writer thread panicked")]
    WriterPanicked,
}

impl Error {
    /// End-of-stream on either side.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Error::Closed { .. } | Error::EndOfStream)
    }
}

/// Result type.
pub type Result<T> = std::result::Result<T, Error>;

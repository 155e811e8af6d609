//! # Paulstretch - Streaming Extreme Time-Stretch
//!
//! Stretch mono audio by large factors through a blocking, pipe-like stream.
//!
//! ## Architecture
//!
//! Paulstretch is an umbrella crate that coordinates:
//! - **paulstretch-core** - Engine contract, Paulstretch engine, configuration
//! - **paulstretch-stream** - Blocking byte stream, `std::io` adapters, pipe helper
//!
//! ## Quick Start
//!
//! ```
//! use std::io::Cursor;
//! use paulstretch::prelude::*;
//!
//! let stream = StretchBuilder::new()
//!     .stretch_factor(4.0)
//!     .window_samples(1024)
//!     .build()?;
//!
//! let input: Vec<u8> = vec![0; 1024 * 4 * 4];
//! let mut output = Vec::new();
//! let summary = stretch_pipe(&stream, Cursor::new(input), &mut output)?;
//! assert_eq!(summary.bytes_in, 1024 * 4 * 4);
//! # Ok::<(), paulstretch::Error>(())
//! ```
//!
//! ## Threads
//!
//! A [`StretchStream`] is written from one thread and read from another;
//! either side may [`close`](StretchStream::close) it. Writes block while the
//! engine still holds an unread window, reads block until output is ready.

/// Re-export of paulstretch-core for direct access
pub use paulstretch_core as core;

/// Re-export of paulstretch-stream for direct access
pub use paulstretch_stream as stream;

// Engine
pub use paulstretch_core::{Paulstretch, StretchConfig, StretchEngine, SAMPLE_BYTES};

// Stream
pub use paulstretch_stream::{stretch_pipe, PipeSummary, StreamStats, StretchStream};

mod builder;
mod error;

pub use builder::StretchBuilder;
pub use error::{Error, Result};

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{Error, Result, StretchBuilder};

    // Engine
    pub use crate::core::{
        Paulstretch, StretchConfig, StretchEngine, DEFAULT_SAMPLE_RATE, DEFAULT_STRETCH_FACTOR,
        DEFAULT_WINDOW_SECONDS,
    };

    // Stream
    pub use crate::stream::{stretch_pipe, PipeSummary, StreamStats, StretchStream};
}

//! # Paulstretch Stream
//!
//! Blocking, pipe-like access to a fixed-window time-stretch engine.
//!
//! Engines take and give exactly one window of samples at a time. A
//! [`StretchStream`] turns that into plain byte streams: write any amount of
//! native-endian mono `f32` audio on one thread, read stretched audio of any
//! chunk size on another, close from either.
//!
//! - **Staging**: one window of pending input and one of pending output
//! - **Backpressure**: a single permit keeps the writer at most one window
//!   ahead of the reader
//! - **`std::io`**: `Read`/`Write` for the stream and for `&StretchStream`
//! - **[`stretch_pipe`]**: copy a reader through the stream into a writer
//!
//! ## Example
//!
//! ```rust
//! use std::io::Cursor;
//! use paulstretch_stream::{stretch_pipe, StretchStream};
//!
//! let stream = StretchStream::new(2.0, 512).unwrap();
//! let input: Vec<u8> = vec![0; 512 * 4 * 8];
//! let mut output = Vec::new();
//!
//! let summary = stretch_pipe(&stream, Cursor::new(input), &mut output).unwrap();
//! assert_eq!(summary.bytes_out, output.len() as u64);
//! ```

pub mod error;
pub mod pipe;
pub mod stream;

mod io;
mod stage;

pub use error::{Error, Result};
pub use pipe::{stretch_pipe, PipeSummary};
pub use stream::{StreamStats, StretchStream};

pub use paulstretch_core::{Paulstretch, StretchConfig, StretchEngine, SAMPLE_BYTES};

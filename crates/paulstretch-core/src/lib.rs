//! # Paulstretch Core
//!
//! Extreme time-stretching on fixed-size windows of mono `f32` audio.
//!
//! This crate provides:
//! - **Engine contract**: [`StretchEngine`], one window in, zero or more windows out
//! - **Paulstretch engine**: spectral smearing with randomized phases
//! - **Configuration**: [`StretchConfig`] with validation and sensible defaults
//! - **Window curves**: the Paulstretch window and its overlap compensation
//!
//! Blocking byte-stream access lives in `paulstretch-stream`.
//!
//! ## Example
//!
//! ```rust
//! use paulstretch_core::{Paulstretch, StretchConfig, StretchEngine};
//!
//! let config = StretchConfig::new(4.0, 1024).seed(1);
//! let mut engine = Paulstretch::new(&config).unwrap();
//!
//! let input = vec![0.25f32; 1024];
//! engine.submit(&input).unwrap();
//!
//! while let Some(window) = engine.try_fetch() {
//!     assert_eq!(window.len(), 1024);
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod paulstretch;
pub mod window;

pub use config::{
    StretchConfig, DEFAULT_SAMPLE_RATE, DEFAULT_STRETCH_FACTOR, DEFAULT_WINDOW_SECONDS,
    MIN_STRETCH_FACTOR, RECOMMENDED_MIN_WINDOW,
};
pub use engine::StretchEngine;
pub use error::{Error, Result};
pub use paulstretch::Paulstretch;
pub use window::{overlap_compensation, paulstretch_window};

/// Bytes per sample on the wire (native-endian `f32`).
pub const SAMPLE_BYTES: usize = core::mem::size_of::<f32>();

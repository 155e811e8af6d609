//! Tolerance constants for stretch tests.
//!
//! Byte-exact checks use plain equality; these cover the engine's float
//! output.

/// Floating point rounding errors (for passthrough, exact gain).
pub const FLOAT_EPSILON: f32 = 1e-6;

/// Silence threshold (~-80dB).
/// Values below this are considered silent.
pub const SILENCE_THRESHOLD: f32 = 0.0001;

/// Lowest RMS a stretched tone may fall to relative to its input.
/// Phase randomization spreads energy but should not lose most of it.
pub const MIN_RMS_RATIO: f32 = 0.2;

/// Generous bound for operations that must not block.
pub const LIVENESS_TIMEOUT_SECS: u64 = 10;

//! Stretch session configuration.

use crate::{Error, Result};

/// Smallest accepted stretch factor (no stretching).
pub const MIN_STRETCH_FACTOR: f64 = 1.0;

/// Windows shorter than this still work but smear badly.
pub const RECOMMENDED_MIN_WINDOW: usize = 128;

/// Stretch factor used when none is given.
pub const DEFAULT_STRETCH_FACTOR: f64 = 10.0;

/// Window duration that suits most music.
pub const DEFAULT_WINDOW_SECONDS: f64 = 0.25;

/// Sample rate assumed by [`StretchConfig::default`].
pub const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

/// Parameters fixed for the lifetime of one stretch session.
///
/// ## Window size
///
/// `window_samples` is the unit exchanged with the engine and also sets the
/// FFT resolution (the engine transforms two windows at a time). About a
/// quarter of a second of audio works for most music; longer windows smear
/// the sound into a texture.
///
/// ```
/// use paulstretch_core::StretchConfig;
///
/// let config = StretchConfig::from_duration(8.0, 0.25, 48000.0).seed(7);
/// assert_eq!(config.window_samples, 12000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StretchConfig {
    /// Output duration divided by input duration. Must be at least 1.0.
    pub stretch_factor: f64,

    /// Samples per window exchanged with the engine.
    pub window_samples: usize,

    /// Seed for phase randomization. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for StretchConfig {
    fn default() -> Self {
        Self::from_duration(
            DEFAULT_STRETCH_FACTOR,
            DEFAULT_WINDOW_SECONDS,
            DEFAULT_SAMPLE_RATE,
        )
    }
}

impl StretchConfig {
    pub fn new(stretch_factor: f64, window_samples: usize) -> Self {
        Self {
            stretch_factor,
            window_samples,
            seed: None,
        }
    }

    /// Size the window from a duration in seconds at the given sample rate.
    pub fn from_duration(stretch_factor: f64, window_seconds: f64, sample_rate: f64) -> Self {
        let window_samples = (window_seconds * sample_rate).round().max(1.0) as usize;
        Self::new(stretch_factor, window_samples)
    }

    pub fn stretch_factor(mut self, factor: f64) -> Self {
        self.stretch_factor = factor;
        self
    }

    pub fn window_samples(mut self, samples: usize) -> Self {
        self.window_samples = samples;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Window size in bytes of native-endian `f32` samples.
    pub fn window_bytes(&self) -> usize {
        self.window_samples * crate::SAMPLE_BYTES
    }

    /// Window duration in seconds at the given sample rate.
    pub fn window_seconds(&self, sample_rate: f64) -> f64 {
        self.window_samples as f64 / sample_rate
    }

    pub fn validate(&self) -> Result<()> {
        if !self.stretch_factor.is_finite() || self.stretch_factor < MIN_STRETCH_FACTOR {
            return Err(Error::InvalidStretchFactor(self.stretch_factor));
        }
        if self.window_samples == 0 {
            return Err(Error::InvalidWindow(self.window_samples));
        }
        if self.window_samples < RECOMMENDED_MIN_WINDOW {
            tracing::warn!(
                window_samples = self.window_samples,
                "window shorter than {} samples",
                RECOMMENDED_MIN_WINDOW
            );
        }
        Ok(())
    }
}

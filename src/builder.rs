//! Builder for configuring and constructing a Paulstretch-backed stream.

use crate::core::{
    StretchConfig, DEFAULT_SAMPLE_RATE, DEFAULT_STRETCH_FACTOR, DEFAULT_WINDOW_SECONDS,
};
use crate::{Result, StretchStream};

/// Sizes the window in seconds rather than samples, which is how stretch
/// settings are usually chosen.
///
/// # Example
///
/// ```
/// use paulstretch::prelude::*;
///
/// let stream = StretchBuilder::new()
///     .stretch_factor(8.0)
///     .sample_rate(48000.0)
///     .window_seconds(0.25)
///     .seed(3)
///     .build()?;
///
/// assert_eq!(stream.optimal_buffer_size(), 12000);
/// # Ok::<(), paulstretch::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct StretchBuilder {
    stretch_factor: f64,
    window_seconds: f64,
    sample_rate: f64,
    window_samples: Option<usize>,
    seed: Option<u64>,
}

impl Default for StretchBuilder {
    fn default() -> Self {
        Self {
            stretch_factor: DEFAULT_STRETCH_FACTOR,
            window_seconds: DEFAULT_WINDOW_SECONDS,
            sample_rate: DEFAULT_SAMPLE_RATE,
            window_samples: None,
            seed: None,
        }
    }
}

impl StretchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default: 10.0
    pub fn stretch_factor(mut self, factor: f64) -> Self {
        self.stretch_factor = factor;
        self
    }

    /// Default: 0.25
    pub fn window_seconds(mut self, seconds: f64) -> Self {
        self.window_seconds = seconds;
        self
    }

    /// Default: 44100.0
    pub fn sample_rate(mut self, rate: f64) -> Self {
        self.sample_rate = rate;
        self
    }

    /// Overrides `window_seconds`.
    pub fn window_samples(mut self, samples: usize) -> Self {
        self.window_samples = Some(samples);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Resolve the settings without creating an engine.
    pub fn config(&self) -> StretchConfig {
        let mut config = StretchConfig::from_duration(
            self.stretch_factor,
            self.window_seconds,
            self.sample_rate,
        );
        if let Some(samples) = self.window_samples {
            config.window_samples = samples;
        }
        config.seed = self.seed;
        config
    }

    pub fn build(self) -> Result<StretchStream> {
        Ok(StretchStream::with_config(&self.config())?)
    }
}

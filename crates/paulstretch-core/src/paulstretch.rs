//! Paulstretch engine
//!
//! Extreme time-stretching by spectral smearing. Every analysis frame keeps
//! its magnitude spectrum and gets fresh random phases, and consecutive
//! frames are read `stretch_factor` times closer together on input than they
//! are laid out on output.
//!
//! ## Algorithm Overview
//!
//! With a window of `W` samples the engine runs a `2W`-point FFT:
//!
//! 1. **Analysis**: window `2W` input samples at the read position, forward FFT
//! 2. **Smearing**: keep magnitudes, draw a random phase per bin
//! 3. **Synthesis**: inverse FFT, window again, overlap-add the first half with
//!    the previous frame's second half, compensate the seam dip, clamp
//! 4. **Advance**: emit `W` samples, move the read position by `W / stretch_factor`
//!
//! The input history starts with one window of silence, so the very first
//! submitted window already completes a frame (faded in from silence).
//!
//! ## Buffering
//!
//! All FFT buffers are allocated up front. Input history grows by one window
//! per [`submit`](StretchEngine::submit) and shrinks as frames consume it;
//! under the permit discipline of a stream it never holds more than three
//! windows.

use std::f32::consts::PI;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::config::StretchConfig;
use crate::engine::StretchEngine;
use crate::window::{overlap_compensation, paulstretch_window};
use crate::{Error, Result};

/// Paulstretch engine speaking the fixed-window [`StretchEngine`] contract.
pub struct Paulstretch {
    // Configuration
    window_samples: usize,
    fft_size: usize,
    stretch_factor: f64,
    seed: Option<u64>,

    // Pre-allocated buffers
    window: Vec<f32>,
    compensation: Vec<f32>,
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
    spectrum: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,

    // Streaming state
    history: Vec<f32>,
    position: f64,
    tail: Vec<f32>,
    output: Vec<f32>,

    rng: StdRng,
    frames_emitted: u64,
}

impl Paulstretch {
    /// Create an engine for the given session parameters.
    ///
    /// Fails if the configuration does not validate.
    pub fn new(config: &StretchConfig) -> Result<Self> {
        config.validate()?;

        let window_samples = config.window_samples;
        let fft_size = window_samples * 2;

        let mut planner = FftPlanner::<f32>::new();
        let forward = planner.plan_fft_forward(fft_size);
        let inverse = planner.plan_fft_inverse(fft_size);
        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());

        let mut history = Vec::with_capacity(window_samples * 4);
        history.resize(window_samples, 0.0);

        tracing::debug!(
            stretch_factor = config.stretch_factor,
            window_samples,
            fft_size,
            "created paulstretch engine"
        );

        Ok(Self {
            window_samples,
            fft_size,
            stretch_factor: config.stretch_factor,
            seed: config.seed,
            window: paulstretch_window(fft_size),
            compensation: overlap_compensation(window_samples),
            forward,
            inverse,
            spectrum: vec![Complex::new(0.0, 0.0); fft_size],
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
            history,
            position: 0.0,
            tail: vec![0.0; window_samples],
            output: vec![0.0; window_samples],
            rng: Self::make_rng(config.seed),
            frames_emitted: 0,
        })
    }

    /// Shorthand for [`new`](Self::new) with an unseeded configuration.
    pub fn with_params(stretch_factor: f64, window_samples: usize) -> Result<Self> {
        Self::new(&StretchConfig::new(stretch_factor, window_samples))
    }

    fn make_rng(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// FFT size (two windows).
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Samples held in the input history from the read position onward.
    /// A fresh engine reports one window here: the silent priming window.
    pub fn pending_input(&self) -> usize {
        let consumed = self.position as usize;
        self.history.len().saturating_sub(consumed)
    }

    /// Output windows produced since creation or the last reset.
    pub fn frames_emitted(&self) -> u64 {
        self.frames_emitted
    }

    /// Return to the freshly created state, including the phase generator.
    pub fn reset(&mut self) {
        self.history.clear();
        self.history.resize(self.window_samples, 0.0);
        self.position = 0.0;
        self.tail.fill(0.0);
        self.output.fill(0.0);
        self.spectrum.fill(Complex::new(0.0, 0.0));
        self.rng = Self::make_rng(self.seed);
        self.frames_emitted = 0;
    }

    #[inline]
    fn frame_ready(&self) -> bool {
        self.position as usize + self.fft_size <= self.history.len()
    }

    /// Render one frame into `output` and advance the read position.
    fn render_frame(&mut self) {
        let size = self.fft_size;
        let half = self.window_samples;
        let start = self.position as usize;

        // 1. Windowed analysis frame
        let frame = &self.history[start..start + size];
        for ((bin, &sample), &gain) in self.spectrum.iter_mut().zip(frame).zip(&self.window) {
            *bin = Complex::new(sample * gain, 0.0);
        }
        self.forward
            .process_with_scratch(&mut self.spectrum, &mut self.scratch);

        // 2. Random phases; DC and Nyquist stay real, upper bins mirror the lower ones
        for k in 0..=half {
            let magnitude = self.spectrum[k].norm();
            let phase = self.rng.gen::<f32>() * 2.0 * PI;
            self.spectrum[k] = if k == 0 || k == half {
                Complex::new(magnitude * phase.cos(), 0.0)
            } else {
                Complex::from_polar(magnitude, phase)
            };
        }
        for k in 1..half {
            self.spectrum[size - k] = self.spectrum[k].conj();
        }

        // 3. Synthesis and overlap-add
        self.inverse
            .process_with_scratch(&mut self.spectrum, &mut self.scratch);

        let scale = 1.0 / size as f32;
        for i in 0..half {
            let head = self.spectrum[i].re * scale * self.window[i];
            let mixed = (head + self.tail[i]) * self.compensation[i];
            self.output[i] = mixed.clamp(-1.0, 1.0);
            self.tail[i] = self.spectrum[half + i].re * scale * self.window[half + i];
        }

        // 4. Advance and drop consumed history
        self.position += half as f64 / self.stretch_factor;
        let consumed = self.position as usize;
        if consumed > 0 {
            self.history.drain(..consumed);
            self.position -= consumed as f64;
        }
        self.frames_emitted += 1;
    }
}

impl StretchEngine for Paulstretch {
    fn window_samples(&self) -> usize {
        self.window_samples
    }

    fn submit(&mut self, window: &[f32]) -> Result<()> {
        if window.len() != self.window_samples {
            return Err(Error::WindowMismatch {
                expected: self.window_samples,
                actual: window.len(),
            });
        }
        self.history.extend_from_slice(window);
        Ok(())
    }

    fn try_fetch(&mut self) -> Option<&[f32]> {
        if !self.frame_ready() {
            return None;
        }
        self.render_frame();
        Some(&self.output)
    }

    fn stretch_factor(&self) -> Option<f64> {
        Some(self.stretch_factor)
    }
}

impl std::fmt::Debug for Paulstretch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paulstretch")
            .field("window_samples", &self.window_samples)
            .field("fft_size", &self.fft_size)
            .field("stretch_factor", &self.stretch_factor)
            .field("pending_input", &self.pending_input())
            .field("frames_emitted", &self.frames_emitted)
            .finish()
    }
}

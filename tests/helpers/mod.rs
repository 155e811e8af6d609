//! Test helpers and fixtures for paulstretch integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-6): Exact operations (passthrough engines)
//! - `SILENCE_THRESHOLD` (0.0001): Silence detection (-80dB)
//! - `MIN_RMS_RATIO`: Energy kept by the Paulstretch engine

#![allow(dead_code)]

pub mod tolerances;

use std::collections::VecDeque;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use paulstretch::prelude::*;

/// Default test sample rate
pub const TEST_SAMPLE_RATE: f64 = 44100.0;

/// Smallest recommended window, keeps tests fast
pub const TEST_WINDOW: usize = 128;

/// Generate a test signal: sine wave at given frequency for specified samples.
pub fn generate_sine(frequency: f64, sample_rate: f64, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            (2.0 * std::f64::consts::PI * frequency * t).sin() as f32
        })
        .collect()
}

/// Generate white noise (random samples in -1..1).
pub fn generate_noise(num_samples: usize, seed: u64) -> Vec<f32> {
    // Simple LCG for reproducible "random" noise
    let mut rng = seed;
    (0..num_samples)
        .map(|_| {
            rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((rng >> 33) as f32 / u32::MAX as f32) * 2.0 - 1.0
        })
        .collect()
}

/// Distinct, recognisable samples: 0.0, 1.0, 2.0, ...
pub fn generate_ramp(num_samples: usize) -> Vec<f32> {
    (0..num_samples).map(|i| i as f32).collect()
}

/// Calculate RMS of a signal.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

/// Calculate peak amplitude of a signal.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max)
}

/// Native-endian bytes of a sample buffer.
pub fn to_bytes(samples: &[f32]) -> Vec<u8> {
    bytemuck::cast_slice(samples).to_vec()
}

/// Samples from native-endian bytes. Trailing partial samples are ignored.
pub fn from_bytes(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Run `f` on its own thread and fail the test if it does not finish in
/// time. A deadlocked stream fails here instead of hanging the suite.
pub fn within<T, F>(secs: u64, f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(f());
    });
    rx.recv_timeout(Duration::from_secs(secs))
        .expect("operation did not finish in time (deadlock?)")
}

/// Read until end of stream, `chunk` bytes at a time.
pub fn read_all<E: StretchEngine>(stream: &StretchStream<E>, chunk: usize) -> Vec<u8> {
    let mut out = Vec::new();
    let mut buf = vec![0u8; chunk];
    while let Ok(n) = stream.read(&mut buf) {
        out.extend_from_slice(&buf[..n]);
    }
    out
}

/// Deterministic engine for exercising the stream layer.
///
/// Records every submitted window. Output is the input delayed by `latency`
/// windows, each emitted `repeat` times (zero drops everything).
pub struct ScriptedEngine {
    pub window: usize,
    pub latency: usize,
    pub repeat: usize,
    pub submitted: Vec<Vec<f32>>,
    delay: VecDeque<Vec<f32>>,
    ready: VecDeque<Vec<f32>>,
    current: Vec<f32>,
}

impl ScriptedEngine {
    pub fn new(window: usize, latency: usize, repeat: usize) -> Self {
        Self {
            window,
            latency,
            repeat,
            submitted: Vec::new(),
            delay: VecDeque::new(),
            ready: VecDeque::new(),
            current: Vec::new(),
        }
    }

    /// Output equals input, window for window.
    pub fn identity(window: usize) -> Self {
        Self::new(window, 0, 1)
    }
}

impl StretchEngine for ScriptedEngine {
    fn window_samples(&self) -> usize {
        self.window
    }

    fn submit(&mut self, window: &[f32]) -> paulstretch::core::Result<()> {
        assert_eq!(
            window.len(),
            self.window,
            "stream submitted a partial window"
        );
        self.submitted.push(window.to_vec());
        self.delay.push_back(window.to_vec());
        if self.delay.len() > self.latency {
            if let Some(released) = self.delay.pop_front() {
                for _ in 0..self.repeat {
                    self.ready.push_back(released.clone());
                }
            }
        }
        Ok(())
    }

    fn try_fetch(&mut self) -> Option<&[f32]> {
        self.current = self.ready.pop_front()?;
        Some(&self.current)
    }
}

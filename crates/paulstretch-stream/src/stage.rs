//! Per-direction staging buffers.
//!
//! Each holds exactly one window of samples and tracks a byte offset into
//! it, so arbitrary-size byte chunks can be assembled into (or carved out of)
//! fixed-size engine windows. Storage is `Vec<f32>` so the window handed to
//! or taken from the engine needs no realignment; the byte view goes through
//! `bytemuck`.

/// Accumulates writer bytes until a full input window is available.
pub(crate) struct InputStage {
    samples: Vec<f32>,
    /// Bytes accumulated for the current window.
    fill: usize,
}

impl InputStage {
    pub fn new(window_samples: usize) -> Self {
        Self {
            samples: vec![0.0; window_samples],
            fill: 0,
        }
    }

    /// Capacity in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.samples.len() * paulstretch_core::SAMPLE_BYTES
    }

    #[inline]
    pub fn fill(&self) -> usize {
        self.fill
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fill == 0
    }

    /// Copy as much of `data` as fits; returns the number of bytes taken.
    pub fn stage(&mut self, data: &[u8]) -> usize {
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut self.samples);
        let n = data.len().min(bytes.len() - self.fill);
        bytes[self.fill..self.fill + n].copy_from_slice(&data[..n]);
        self.fill += n;
        n
    }

    /// Hand out the assembled window and start the next one.
    ///
    /// Only meaningful when the stage is full.
    pub fn take_window(&mut self) -> &[f32] {
        debug_assert_eq!(self.fill, self.capacity());
        self.fill = 0;
        &self.samples
    }
}

/// Holds the undelivered remainder of the last fetched output window.
pub(crate) struct OutputStage {
    samples: Vec<f32>,
    /// Bytes already delivered. Equal to capacity when fully drained.
    drain: usize,
}

impl OutputStage {
    pub fn new(window_samples: usize) -> Self {
        let samples = vec![0.0; window_samples];
        let drain = samples.len() * paulstretch_core::SAMPLE_BYTES;
        Self { samples, drain }
    }

    /// Bytes still waiting to be read.
    #[inline]
    pub fn pending(&self) -> usize {
        self.samples.len() * paulstretch_core::SAMPLE_BYTES - self.drain
    }

    /// Copy pending bytes into `dest`; returns the number copied.
    pub fn drain_into(&mut self, dest: &mut [u8]) -> usize {
        let bytes: &[u8] = bytemuck::cast_slice(&self.samples);
        let n = dest.len().min(bytes.len() - self.drain);
        dest[..n].copy_from_slice(&bytes[self.drain..self.drain + n]);
        self.drain += n;
        n
    }

    /// Deliver a freshly fetched window: copy what fits into `dest` and keep
    /// the rest for later reads. `window` must be exactly one window long.
    pub fn deliver(&mut self, window: &[f32], dest: &mut [u8]) -> usize {
        debug_assert_eq!(window.len(), self.samples.len());
        let source: &[u8] = bytemuck::cast_slice(window);
        let n = dest.len().min(source.len());
        dest[..n].copy_from_slice(&source[..n]);

        if n < source.len() {
            self.samples.copy_from_slice(window);
            self.drain = n;
        } else {
            self.drain = source.len();
        }
        n
    }
}

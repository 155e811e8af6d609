//! Blocking byte stream over a fixed-window engine.
//!
//! ## Synchronization
//!
//! ```text
//!  writer ──► input stage ──┐                    ┌──► output stage ──► reader
//!                           ▼                    │
//!                   ┌─── shared (Mutex) ────────────┐
//!                   │ engine · closed · permit      │
//!                   └─────────── Condvar ───────────┘
//! ```
//!
//! The engine accepts one window per permit. The permit starts out issued;
//! every submission consumes it and only a reader that finds no output ready
//! issues a new one. A writer therefore runs at most one window ahead of what
//! the reader has asked for, and a stalled reader always releases a stalled
//! writer. Writer and reader both wait on the same condvar and re-check their
//! condition after every wakeup.
//!
//! The staging buffers have their own locks: the input stage is only touched
//! by the writer and the output stage only by the reader, so these locks are
//! uncontended under the one-writer/one-reader model and merely serialize
//! extra writers or readers.

use parking_lot::{Condvar, Mutex};
use paulstretch_core::{Paulstretch, StretchConfig, StretchEngine, SAMPLE_BYTES};

use crate::stage::{InputStage, OutputStage};
use crate::{Error, Result};

/// Counters describing a stream's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamStats {
    /// Windows handed to the engine.
    pub windows_submitted: u64,
    /// Windows taken from the engine.
    pub windows_fetched: u64,
    /// Whether [`StretchStream::close`] has been called.
    pub closed: bool,
}

struct Shared<E> {
    engine: E,
    closed: bool,
    /// The engine may take another window.
    permit: bool,
    windows_submitted: u64,
    windows_fetched: u64,
}

/// Pipe-like stream of native-endian mono `f32` samples through a
/// time-stretch engine.
///
/// One thread writes input, another reads stretched output, and either (or a
/// third) may close. All operations take `&self`; share the stream by
/// reference, for example with [`std::thread::scope`].
///
/// ## Close semantics
///
/// After [`close`](Self::close) writes fail with [`Error::Closed`] and never
/// block. Reads keep returning output the engine can still produce from what
/// it was given, then fail with [`Error::EndOfStream`]. Input bytes staged
/// short of a full window when the stream closes are discarded; they are
/// never submitted.
///
/// There is no timeout. A blocked read is released only by enough input or a
/// close, and a blocked write only by a read or a close.
///
/// ```
/// use paulstretch_stream::StretchStream;
///
/// let stream = StretchStream::new(4.0, 256).unwrap();
/// let input = vec![0.0f32; 256];
///
/// std::thread::scope(|s| {
///     s.spawn(|| {
///         stream.write_samples(&input).unwrap();
///         stream.close();
///     });
///
///     let mut out = vec![0.0f32; stream.optimal_buffer_size()];
///     let mut total = 0;
///     while let Ok(n) = stream.read_samples(&mut out) {
///         total += n;
///     }
///     assert_eq!(total, 256);
/// });
/// ```
pub struct StretchStream<E: StretchEngine = Paulstretch> {
    window_samples: usize,
    window_bytes: usize,
    stretch_factor: Option<f64>,
    input: Mutex<InputStage>,
    output: Mutex<OutputStage>,
    shared: Mutex<Shared<E>>,
    wakeup: Condvar,
}

impl StretchStream<Paulstretch> {
    /// Create a stream backed by the Paulstretch engine.
    pub fn new(stretch_factor: f64, window_samples: usize) -> Result<Self> {
        Self::with_config(&StretchConfig::new(stretch_factor, window_samples))
    }

    pub fn with_config(config: &StretchConfig) -> Result<Self> {
        Self::with_engine(Paulstretch::new(config)?)
    }
}

impl<E: StretchEngine> StretchStream<E> {
    /// Wrap an existing engine. The stream owns it until dropped or
    /// [`into_engine`](Self::into_engine) is called.
    pub fn with_engine(engine: E) -> Result<Self> {
        let window_samples = engine.window_samples();
        if window_samples == 0 {
            return Err(paulstretch_core::Error::InvalidWindow(0).into());
        }
        let stretch_factor = engine.stretch_factor();

        tracing::debug!(window_samples, ?stretch_factor, "created stretch stream");

        Ok(Self {
            window_samples,
            window_bytes: window_samples * SAMPLE_BYTES,
            stretch_factor,
            input: Mutex::new(InputStage::new(window_samples)),
            output: Mutex::new(OutputStage::new(window_samples)),
            shared: Mutex::new(Shared {
                engine,
                closed: false,
                permit: true,
                windows_submitted: 0,
                windows_fetched: 0,
            }),
            wakeup: Condvar::new(),
        })
    }

    /// Write bytes of native-endian `f32` samples.
    ///
    /// Blocks while the engine holds an unconsumed window. Every complete
    /// window is submitted before returning; a trailing partial window is
    /// staged for the next call. Returns `data.len()` on success.
    ///
    /// Fails with [`Error::Closed`] if the stream is or becomes closed;
    /// `accepted` counts the bytes of this call already submitted.
    pub fn write(&self, data: &[u8]) -> Result<usize> {
        if self.is_closed() {
            return Err(Error::Closed { accepted: 0 });
        }

        let mut input = self.input.lock();
        let mut rest = data;
        let mut accepted = 0;

        while input.fill() + rest.len() >= self.window_bytes {
            let take = self.window_bytes - input.fill();
            let (head, tail) = rest.split_at(take);

            // Window-aligned caller data goes straight to the engine
            let direct = if input.is_empty() {
                bytemuck::try_cast_slice::<u8, f32>(head).ok()
            } else {
                None
            };
            match direct {
                Some(window) => self.submit(window, accepted)?,
                None => {
                    input.stage(head);
                    self.submit(input.take_window(), accepted)?;
                }
            }

            accepted += take;
            rest = tail;
        }

        input.stage(rest);
        Ok(data.len())
    }

    /// Wait for the permit, then hand one window to the engine.
    fn submit(&self, window: &[f32], accepted: usize) -> Result<()> {
        let mut shared = self.shared.lock();
        while !shared.permit && !shared.closed {
            self.wakeup.wait(&mut shared);
        }
        if shared.closed {
            return Err(Error::Closed { accepted });
        }

        shared.permit = false;
        shared.engine.submit(window)?;
        shared.windows_submitted += 1;
        tracing::trace!(window = shared.windows_submitted, "submitted window");
        drop(shared);

        self.wakeup.notify_all();
        Ok(())
    }

    /// Read stretched output as bytes of native-endian `f32` samples.
    ///
    /// Returns leftovers of the current window without blocking. Otherwise
    /// blocks until the engine produces a window, of which as much as fits
    /// is copied into `dest`. An empty `dest` returns `Ok(0)`.
    ///
    /// Fails with [`Error::EndOfStream`] once the stream is closed and the
    /// engine has nothing more to give.
    pub fn read(&self, dest: &mut [u8]) -> Result<usize> {
        let mut output = self.output.lock();
        if output.pending() > 0 {
            return Ok(output.drain_into(dest));
        }
        if dest.is_empty() {
            return Ok(0);
        }

        let mut shared = self.shared.lock();
        loop {
            let fetched = match shared.engine.try_fetch() {
                Some(window) if window.len() != self.window_samples => {
                    return Err(Error::WindowMismatch {
                        expected: self.window_samples,
                        actual: window.len(),
                    });
                }
                Some(window) => Some(output.deliver(window, dest)),
                None => None,
            };

            if let Some(n) = fetched {
                shared.windows_fetched += 1;
                tracing::trace!(window = shared.windows_fetched, "fetched window");
                return Ok(n);
            }

            if shared.closed {
                return Err(Error::EndOfStream);
            }

            if !shared.permit {
                shared.permit = true;
                tracing::trace!("stalled reader issued permit");
                self.wakeup.notify_all();
            }
            self.wakeup.wait(&mut shared);
        }
    }

    /// Close the stream. Idempotent.
    ///
    /// Wakes every blocked reader and writer. A partially staged input
    /// window is dropped.
    pub fn close(&self) {
        let mut shared = self.shared.lock();
        if shared.closed {
            return;
        }
        shared.closed = true;
        shared.permit = false;

        // The writer may be holding the input stage while it waits on us
        let staged_bytes = self.input.try_lock().map(|input| input.fill());
        tracing::debug!(
            windows_submitted = shared.windows_submitted,
            windows_fetched = shared.windows_fetched,
            ?staged_bytes,
            "closed stretch stream"
        );
        drop(shared);

        self.wakeup.notify_all();
    }

    /// Sample-level [`write`](Self::write). Returns samples written.
    ///
    /// [`Error::Closed`] reports `accepted` in samples here.
    pub fn write_samples(&self, samples: &[f32]) -> Result<usize> {
        if samples.is_empty() {
            return Err(Error::EmptyBuffer);
        }
        match self.write(bytemuck::cast_slice(samples)) {
            Ok(n) => Ok(n / SAMPLE_BYTES),
            Err(Error::Closed { accepted }) => Err(Error::Closed {
                accepted: accepted / SAMPLE_BYTES,
            }),
            Err(e) => Err(e),
        }
    }

    /// Sample-level [`read`](Self::read). Returns samples read.
    ///
    /// Do not interleave with byte reads of lengths that are not a multiple
    /// of four; a split sample would be dropped from the count.
    pub fn read_samples(&self, samples: &mut [f32]) -> Result<usize> {
        if samples.is_empty() {
            return Err(Error::EmptyBuffer);
        }
        let n = self.read(bytemuck::cast_slice_mut(samples))?;
        Ok(n / SAMPLE_BYTES)
    }

    /// Buffer size, in samples, that lets writes skip the staging copy.
    pub fn optimal_buffer_size(&self) -> usize {
        self.window_samples
    }

    pub fn window_samples(&self) -> usize {
        self.window_samples
    }

    pub fn window_bytes(&self) -> usize {
        self.window_bytes
    }

    /// Stretch factor reported by the engine, if any.
    pub fn stretch_factor(&self) -> Option<f64> {
        self.stretch_factor
    }

    pub fn is_closed(&self) -> bool {
        self.shared.lock().closed
    }

    pub fn stats(&self) -> StreamStats {
        let shared = self.shared.lock();
        StreamStats {
            windows_submitted: shared.windows_submitted,
            windows_fetched: shared.windows_fetched,
            closed: shared.closed,
        }
    }

    /// Take the engine back, discarding any staged bytes.
    pub fn into_engine(self) -> E {
        self.shared.into_inner().engine
    }
}

impl<E: StretchEngine> std::fmt::Debug for StretchStream<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StretchStream")
            .field("window_samples", &self.window_samples)
            .field("stretch_factor", &self.stretch_factor)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

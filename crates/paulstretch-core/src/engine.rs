//! The fixed-window engine contract.

use crate::Result;

/// A stretching engine that exchanges audio one fixed-size window at a time.
///
/// Engines are created by their own constructors and released on drop. Both
/// directions move exactly [`window_samples`](Self::window_samples) mono
/// `f32` samples per call:
///
/// - [`submit`](Self::submit) accepts one input window.
/// - [`try_fetch`](Self::try_fetch) produces one output window, or `None` when
///   the engine needs more input first. It never blocks.
///
/// Engines are not expected to be safe for concurrent calls; callers that
/// share one across threads serialize access behind a lock, which is what
/// [`StretchStream`](../paulstretch_stream/struct.StretchStream.html) does.
///
/// # Implementing an engine
///
/// ```
/// use paulstretch_core::{Result, StretchEngine};
///
/// /// Emits every submitted window unchanged.
/// struct Passthrough {
///     window: Vec<f32>,
///     pending: bool,
/// }
///
/// impl StretchEngine for Passthrough {
///     fn window_samples(&self) -> usize {
///         self.window.len()
///     }
///
///     fn submit(&mut self, window: &[f32]) -> Result<()> {
///         self.window.copy_from_slice(window);
///         self.pending = true;
///         Ok(())
///     }
///
///     fn try_fetch(&mut self) -> Option<&[f32]> {
///         if !std::mem::take(&mut self.pending) {
///             return None;
///         }
///         Some(&self.window)
///     }
/// }
/// ```
pub trait StretchEngine: Send {
    /// Samples per window, fixed for the engine's lifetime.
    fn window_samples(&self) -> usize;

    /// Accept one window of exactly `window_samples()` samples.
    fn submit(&mut self, window: &[f32]) -> Result<()>;

    /// Produce the next output window if one is ready.
    fn try_fetch(&mut self) -> Option<&[f32]>;

    /// Stretch factor the engine applies, when it has a fixed one.
    fn stretch_factor(&self) -> Option<f64> {
        None
    }
}

impl<E: StretchEngine + ?Sized> StretchEngine for Box<E> {
    fn window_samples(&self) -> usize {
        (**self).window_samples()
    }

    fn submit(&mut self, window: &[f32]) -> Result<()> {
        (**self).submit(window)
    }

    fn try_fetch(&mut self) -> Option<&[f32]> {
        (**self).try_fetch()
    }

    fn stretch_factor(&self) -> Option<f64> {
        (**self).stretch_factor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Fifo {
        window_samples: usize,
        queue: VecDeque<Vec<f32>>,
        current: Vec<f32>,
    }

    impl StretchEngine for Fifo {
        fn window_samples(&self) -> usize {
            self.window_samples
        }

        fn submit(&mut self, window: &[f32]) -> Result<()> {
            self.queue.push_back(window.to_vec());
            Ok(())
        }

        fn try_fetch(&mut self) -> Option<&[f32]> {
            self.current = self.queue.pop_front()?;
            Some(&self.current)
        }
    }

    #[test]
    fn test_boxed_engine_forwards() {
        let mut engine: Box<dyn StretchEngine> = Box::new(Fifo {
            window_samples: 4,
            queue: VecDeque::new(),
            current: Vec::new(),
        });

        assert_eq!(engine.window_samples(), 4);
        assert_eq!(engine.stretch_factor(), None);
        assert!(engine.try_fetch().is_none());

        engine.submit(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(engine.try_fetch(), Some(&[1.0, 2.0, 3.0, 4.0][..]));
        assert!(engine.try_fetch().is_none());
    }
}

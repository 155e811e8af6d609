//! Run a whole input through a stream with a writer thread.

use std::io::{self, Read, Write};
use std::thread;

use paulstretch_core::StretchEngine;

use crate::{Error, Result, StretchStream};

/// Byte counts moved by [`stretch_pipe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipeSummary {
    /// Bytes taken from the input.
    pub bytes_in: u64,
    /// Stretched bytes written to the output.
    pub bytes_out: u64,
}

/// Closes the stream when the writer finishes, errors or panics.
struct CloseOnDrop<'a, E: StretchEngine>(&'a StretchStream<E>);

impl<E: StretchEngine> Drop for CloseOnDrop<'_, E> {
    fn drop(&mut self) {
        self.0.close();
    }
}

/// Copy `input` through `stream` into `output` until the input ends.
///
/// A scoped thread named `paulstretch-writer` feeds the stream and closes it
/// when the input is exhausted; the calling thread drains the stream into
/// `output`. If the output fails the stream is closed so the writer is
/// released. Output errors take precedence over input errors.
///
/// Trailing input shorter than one window is not stretched.
pub fn stretch_pipe<E, R, W>(
    stream: &StretchStream<E>,
    mut input: R,
    mut output: W,
) -> Result<PipeSummary>
where
    E: StretchEngine,
    R: Read + Send,
    W: Write,
{
    thread::scope(|scope| -> Result<PipeSummary> {
        let writer = thread::Builder::new()
            .name("paulstretch-writer".into())
            .spawn_scoped(scope, move || {
                let _close = CloseOnDrop(stream);
                io::copy(&mut input, &mut &*stream)
            })?;

        let read_result = io::copy(&mut &*stream, &mut output);
        if read_result.is_err() {
            stream.close();
        }

        let write_result = writer.join().map_err(|_| Error::WriterPanicked)?;
        let bytes_out = read_result?;
        let bytes_in = write_result?;
        output.flush()?;

        tracing::debug!(bytes_in, bytes_out, "stretch pipe finished");
        Ok(PipeSummary {
            bytes_in,
            bytes_out,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_pipe_counts_bytes() {
        let stream = StretchStream::new(1.0, 128).unwrap();
        let input = vec![0u8; 128 * 4 * 3];
        let mut output = Vec::new();

        let summary = stretch_pipe(&stream, Cursor::new(&input), &mut output).unwrap();
        assert_eq!(summary.bytes_in, input.len() as u64);
        assert_eq!(summary.bytes_out, output.len() as u64);
        assert_eq!(output.len(), 128 * 4 * 3);
        assert!(stream.is_closed());
    }

    #[test]
    fn test_pipe_empty_input() {
        let stream = StretchStream::new(4.0, 256).unwrap();
        let mut output = Vec::new();

        let summary = stretch_pipe(&stream, io::empty(), &mut output).unwrap();
        assert_eq!(summary, PipeSummary::default());
        assert!(output.is_empty());
    }
}

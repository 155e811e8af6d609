//! `std::io` adapters.
//!
//! `Read` and `Write` are implemented for both `StretchStream` and
//! `&StretchStream`, the way `std::fs::File` does it, so a writer thread and
//! a reader thread can each hold a shared reference:
//!
//! ```no_run
//! # fn main() -> std::io::Result<()> {
//! use std::io;
//! use paulstretch_stream::StretchStream;
//!
//! let stream = StretchStream::new(10.0, 11025).map_err(io::Error::from)?;
//! let mut input = std::fs::File::open("in.raw")?;
//! let mut output = std::fs::File::create("out.raw")?;
//!
//! std::thread::scope(|s| {
//!     s.spawn(|| {
//!         let _ = io::copy(&mut input, &mut &stream);
//!         stream.close();
//!     });
//!     io::copy(&mut &stream, &mut output)
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! End of stream on the read side is `Ok(0)`. A write interrupted by a
//! close after accepting some bytes reports them as a short write; a write
//! to a closed stream fails with [`io::ErrorKind::BrokenPipe`].

use std::io::{self, Read, Write};

use paulstretch_core::StretchEngine;

use crate::{Error, StretchStream};

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(e) => e,
            Error::Closed { .. } => io::Error::new(io::ErrorKind::BrokenPipe, err),
            Error::EndOfStream => io::Error::new(io::ErrorKind::UnexpectedEof, err),
            other => io::Error::other(other),
        }
    }
}

impl<E: StretchEngine> Write for &StretchStream<E> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match StretchStream::write(*self, buf) {
            Err(Error::Closed { accepted }) if accepted > 0 => Ok(accepted),
            result => result.map_err(io::Error::from),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<E: StretchEngine> Read for &StretchStream<E> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match StretchStream::read(*self, buf) {
            Err(Error::EndOfStream) => Ok(0),
            result => result.map_err(io::Error::from),
        }
    }
}

impl<E: StretchEngine> Write for StretchStream<E> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Write::write(&mut &*self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<E: StretchEngine> Read for StretchStream<E> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Read::read(&mut &*self, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let closed: io::Error = Error::Closed { accepted: 0 }.into();
        assert_eq!(closed.kind(), io::ErrorKind::BrokenPipe);

        let eof: io::Error = Error::EndOfStream.into();
        assert_eq!(eof.kind(), io::ErrorKind::UnexpectedEof);

        let empty: io::Error = Error::EmptyBuffer.into();
        assert_eq!(empty.kind(), io::ErrorKind::Other);

        let inner = io::Error::new(io::ErrorKind::NotFound, "missing");
        let passthrough: io::Error = Error::Io(inner).into();
        assert_eq!(passthrough.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_closed_stream_io() {
        let mut stream = StretchStream::new(2.0, 128).unwrap();
        stream.close();

        let err = Write::write(&mut stream, &[0u8; 8]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

        let mut buf = [0u8; 8];
        assert_eq!(Read::read(&mut stream, &mut buf).unwrap(), 0);
    }

    #[test]
    fn test_write_all_then_read_to_end() {
        let stream = StretchStream::new(1.0, 128).unwrap();
        let input = vec![0u8; 128 * 4];

        std::thread::scope(|s| {
            s.spawn(|| {
                (&stream).write_all(&input).unwrap();
                stream.close();
            });

            let mut out = Vec::new();
            (&stream).read_to_end(&mut out).unwrap();
            assert_eq!(out.len(), 128 * 4);
        });
    }
}

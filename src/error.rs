//! Centralized error type for the paulstretch umbrella crate.
//!
//! Wraps the engine and stream errors so `?` propagates naturally across
//! crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] paulstretch_core::Error),

    #[error("Stream: {0}")]
    Stream(#[from] paulstretch_stream::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

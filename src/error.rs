//! Error types for label generation, preference storage, and drawing sinks.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A symbol payload could not be turned into a machine-readable code.
///
/// Fatal to the one label being built; a label is never emitted blank.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("payload cannot be encoded as a symbol: {0}")]
    Unencodable(String),
}

/// A configuration value violates a structural invariant.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration field '{field}' must be {requirement}")]
    OutOfRange {
        field: &'static str,
        requirement: &'static str,
    },
}

/// Errors raised by the preference store.
///
/// A missing store is a normal first-run condition and callers fall back to
/// defaults; a present-but-invalid store is `Corrupt` and must surface to the
/// user instead of being patched over field by field.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no stored preferences at {}", .0.display())]
    NotFound(PathBuf),

    #[error("stored preferences are corrupt: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// The drawing destination failed mid-layout.
///
/// Layout aborts on the first sink error; pages already emitted stand.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("could not embed image: {0}")]
    Image(String),

    #[error("drawing destination failed: {0}")]
    Device(String),
}

/// Top-level error for pipeline operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

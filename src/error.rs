//! Error types for chatdigest library.
//!
//! Parsing itself never fails; errors only come from reading input files,
//! user-supplied templates, and JSON serialization.

use std::io;
use thiserror::Error;

/// Result type alias for chatdigest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading, converting or rendering digests.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input file is not valid UTF-8 text.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A custom template is missing a required placeholder or marker.
    #[error("Invalid template: {0}")]
    Template(String),

    /// Error during rendering (HTML, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

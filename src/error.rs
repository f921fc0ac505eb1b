// src/error.rs
//
// Error types for formatting.
//
// - Parse: reading the input failed; nothing was written.
// - Write: the sink rejected a write; output written so far is kept.

use std::io;

use thiserror::Error;

/// Result type alias for formatting operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while formatting
#[derive(Error, Debug)]
pub enum Error {
    /// Reading the input for the parser failed; nothing was written
    #[error("failed to read input: {0}")]
    Parse(#[source] io::Error),

    /// The output sink rejected a write; output written so far is kept
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
}

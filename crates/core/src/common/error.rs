//! Simulator error types.
//!
//! The coherence core itself has no recoverable errors; everything here sits
//! at the program boundary: trace files that cannot be opened or read, an
//! output file that cannot be written, and rejected cache geometries.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the simulator.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("could not open trace file '{path}': {source}")]
    TraceOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error reading trace file '{path}': {source}")]
    TraceRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("could not write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Type alias for Result with SimError.
pub type SimResult<T> = Result<T, SimError>;

//! # Error Types Module
//!
//! Crate-wide error taxonomy for the compression pipeline.
//!
//! ## Categories:
//! - `ToolMissing`: external compressor executable not found (nothing is spawned)
//! - `ToolFailed`: tool exited nonzero; carries its captured stderr text
//! - `Io`: spawn/stream/wait failure while talking to a tool
//! - `FileRead` / `FileWrite`: path absent, a directory, or not decodable/
//!   writable under the active charset
//! - `UnknownCharset`: the configured encoding label resolves to nothing
//! - `Validation`: bad run configuration
//!
//! Every per-file error is caught by the batch driver and reported without
//! aborting the remaining batch; only startup errors end the run.

use std::path::PathBuf;

/// Custom error types for asset compression
#[derive(thiserror::Error, Debug)]
pub enum CompressError {
    #[error("compress tool not exist: {}", .0.display())]
    ToolMissing(PathBuf),

    #[error("tool exited with failure:\n{stderr}")]
    ToolFailed { stderr: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read {}: {reason}", .path.display())]
    FileRead { path: PathBuf, reason: String },

    #[error("cannot write {}: {reason}", .path.display())]
    FileWrite { path: PathBuf, reason: String },

    #[error("unknown charset label: {0}")]
    UnknownCharset(String),

    #[error("configuration error: {0}")]
    Validation(String),
}

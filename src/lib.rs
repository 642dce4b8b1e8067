//! # Asset Compressor Library
//!
//! Batch minification driver for JavaScript and CSS files. The crate is not
//! a minifier itself: it discovers source files, ferries their text through
//! external compressor tools over stdin/stdout, and writes the results back
//! in place, isolating failures per file.
//!
//! ## Module architecture:
//! - `charset`: the single active text encoding for all file and pipe I/O
//! - `transcode`: ASCII-safe unicode escaping for the JS tool boundary
//! - `file_manager`: discovery, suffix classification, charset-aware I/O
//! - `tool`: external tool specs and the deadlock-free invocation pipeline
//! - `compressor`: the batch driver composing the above
//! - `progress`: progress bar and run statistics
//! - `config`: run configuration and validation
//! - `error`: crate error taxonomy
//!
//! ## Usage:
//! ```rust,ignore
//! use asset_compressor::{AssetCompressor, Config};
//!
//! let compressor = AssetCompressor::new(Config::default())?;
//! let stats = compressor.run(&paths).await?;
//! ```

pub mod charset;
pub mod compressor;
pub mod config;
pub mod error;
pub mod file_manager;
pub mod progress;
pub mod tool;
pub mod transcode;

pub use charset::Charset;
pub use compressor::AssetCompressor;
pub use config::Config;
pub use error::CompressError;
pub use file_manager::{FileKind, FileManager};
pub use progress::CompressStats;
pub use tool::ToolSpec;

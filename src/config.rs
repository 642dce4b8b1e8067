//! # Configuration Management Module
//!
//! Run configuration for the compression driver.
//!
//! ## Parameters:
//! - `charset`: encoding label used for all file and pipe I/O (default: "utf-8")
//! - `js_tool`: JS compiler location (default: `closure.jar` in the working dir)
//! - `css_tool`: CSS compressor location (default: `yui.jar` in the working dir)
//! - `dry_run`: invoke tools but never write results back (default: false)
//! - `report_skipped`: log skipped files at info level (default: false)
//!
//! ## Validation:
//! - the charset label must resolve to a known encoding
//! - tool paths must be non-empty
//!
//! Tool existence is deliberately not validated here: a missing tool is a
//! per-file failure at invocation time, not a startup error.

use crate::charset::Charset;
use crate::error::CompressError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for asset compression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Encoding label for all file reads/writes and subprocess framing
    pub charset: String,
    /// JavaScript compiler executable
    pub js_tool: PathBuf,
    /// CSS compressor executable
    pub css_tool: PathBuf,
    /// Invoke tools but don't overwrite any file
    pub dry_run: bool,
    /// Report skipped files at info level instead of debug
    pub report_skipped: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            charset: "utf-8".to_string(),
            js_tool: PathBuf::from("closure.jar"),
            css_tool: PathBuf::from("yui.jar"),
            dry_run: false,
            report_skipped: false,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        Charset::resolve(&self.charset)?;

        if self.js_tool.as_os_str().is_empty() {
            return Err(CompressError::Validation("JS tool path must not be empty".to_string()).into());
        }

        if self.css_tool.as_os_str().is_empty() {
            return Err(CompressError::Validation("CSS tool path must not be empty".to_string()).into());
        }

        Ok(())
    }

    /// Load configuration from file
    pub async fn from_file(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

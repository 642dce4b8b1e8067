//! # Batch Compression Driver
//!
//! Orchestrates a run: discovers source files under the given paths, pipes
//! each one through the matching external tool, and writes the minified
//! result back in place.
//!
//! ## Flow per file:
//! 1. read under the active charset
//! 2. invoke the JS compiler (with unicode escaping) or the CSS compressor
//! 3. overwrite the original only after the invocation fully succeeded
//!
//! Each file is an independent transaction: a failure is reported with its
//! diagnostic and the batch moves on. Nothing aborts the run once it has
//! started; the summary carries the error count. Files are processed
//! sequentially - the only concurrency lives inside a single tool
//! invocation's pipe handling.

use crate::{
    charset::Charset,
    config::Config,
    error::CompressError,
    file_manager::{FileKind, FileManager},
    progress::{CompressStats, ProgressManager},
    tool::ToolSpec,
};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Batch driver composing the walker, the file I/O and the tool pipeline
pub struct AssetCompressor {
    config: Config,
    charset: Charset,
    js_tool: ToolSpec,
    css_tool: ToolSpec,
}

impl AssetCompressor {
    /// Build a driver from a validated configuration.
    ///
    /// The charset is resolved here, before any file I/O, and stays fixed
    /// for the whole run. The two tool specs are constructed once and never
    /// change.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let charset = Charset::resolve(&config.charset)?;
        let js_tool = ToolSpec::javascript(config.js_tool.clone(), charset);
        let css_tool = ToolSpec::stylesheet(config.css_tool.clone(), charset);

        Ok(Self {
            config,
            charset,
            js_tool,
            css_tool,
        })
    }

    /// Compress everything reachable from the given paths.
    pub async fn run(&self, paths: &[PathBuf]) -> Result<CompressStats> {
        info!("use charset: {}", self.charset.name());

        let mut files = Vec::new();
        for path in paths {
            if !path.exists() {
                warn!("path does not exist, skipping: {}", path.display());
                continue;
            }
            if path.is_dir() {
                info!("search in dir: {}", path.display());
            }
            files.extend(FileManager::find_source_files(path));
        }

        info!("found {} files to examine", files.len());

        let progress = ProgressManager::new(files.len() as u64);
        let mut stats = CompressStats::new();

        for (path, kind) in files {
            self.process_entry(&path, kind, &mut stats).await;
            progress.update(&path.file_name().unwrap_or_default().to_string_lossy());
        }

        progress.finish(&stats.format_summary());
        Ok(stats)
    }

    /// Handle one walker entry, isolating any failure to this file.
    async fn process_entry(&self, path: &Path, kind: FileKind, stats: &mut CompressStats) {
        match kind {
            FileKind::Skip => {
                if self.config.report_skipped {
                    info!("skip file: {}", path.display());
                } else {
                    debug!("skip file: {}", path.display());
                }
                stats.add_skipped();
            }
            FileKind::Compile => {
                info!("compile js: {}", path.display());
                match self.minify_file(path, &self.js_tool).await {
                    Ok((original, minified)) => {
                        info!("success compile file {}", path.display());
                        stats.add_compiled(original, minified);
                    }
                    Err(e) => {
                        error!("failed compile file {}: {}", path.display(), e);
                        stats.add_error();
                    }
                }
            }
            FileKind::Compress => {
                info!("compress css: {}", path.display());
                match self.minify_file(path, &self.css_tool).await {
                    Ok((original, minified)) => {
                        info!("success compress file {}", path.display());
                        stats.add_compressed(original, minified);
                    }
                    Err(e) => {
                        error!("failed compress file {}: {}", path.display(), e);
                        stats.add_error();
                    }
                }
            }
        }
    }

    /// Read, invoke, write back. The write only happens after the tool
    /// invocation fully succeeded, so a failure leaves the source untouched.
    async fn minify_file(&self, path: &Path, tool: &ToolSpec) -> Result<(u64, u64), CompressError> {
        let source = FileManager::read_text(path, self.charset).await?;
        let minified = tool.run(&source, self.charset).await?;

        if self.config.dry_run {
            debug!("dry run: not writing {}", path.display());
        } else {
            FileManager::write_text(path, &minified, self.charset).await?;
        }

        Ok((source.len() as u64, minified.len() as u64))
    }
}

//! # Progress Tracking and Statistics Module
//!
//! Progress bar and cumulative run statistics.
//!
//! ## Statistics tracked:
//! - **files_processed**: every file the walker yielded
//! - **files_compiled**: JS files successfully rewritten
//! - **files_compressed**: CSS files successfully rewritten
//! - **files_skipped**: files outside the selection policy
//! - **errors**: per-file failures (missing tool, nonzero exit, I/O)
//! - **total_bytes_saved** / **total_original_size**: for the summary line
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:03] [=======================>----------------] 87/150 (58%) app.js
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages progress reporting for a compression run
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

/// Statistics tracker for compression results
#[derive(Debug, Default)]
pub struct CompressStats {
    pub files_processed: usize,
    pub files_compiled: usize,
    pub files_compressed: usize,
    pub files_skipped: usize,
    pub total_bytes_saved: u64,
    pub total_original_size: u64,
    pub errors: usize,
}

impl CompressStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_compiled(&mut self, original_size: u64, new_size: u64) {
        self.files_processed += 1;
        self.files_compiled += 1;
        self.total_original_size += original_size;
        self.total_bytes_saved += original_size.saturating_sub(new_size);
    }

    pub fn add_compressed(&mut self, original_size: u64, new_size: u64) {
        self.files_processed += 1;
        self.files_compressed += 1;
        self.total_original_size += original_size;
        self.total_bytes_saved += original_size.saturating_sub(new_size);
    }

    pub fn add_skipped(&mut self) {
        self.files_processed += 1;
        self.files_skipped += 1;
    }

    pub fn add_error(&mut self) {
        self.files_processed += 1;
        self.errors += 1;
    }

    pub fn overall_reduction_percent(&self) -> f64 {
        if self.total_original_size > 0 {
            (self.total_bytes_saved as f64 / self.total_original_size as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Processed: {} files | Compiled: {} | Compressed: {} | Skipped: {} | Errors: {} | Saved: {} ({:.2}%)",
            self.files_processed,
            self.files_compiled,
            self.files_compressed,
            self.files_skipped,
            self.errors,
            crate::file_manager::FileManager::format_size(self.total_bytes_saved),
            self.overall_reduction_percent()
        )
    }
}

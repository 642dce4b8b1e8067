//! # Asset Compressor - Main Entry Point
//!
//! ## Execution flow:
//! 1. Parse CLI arguments (paths, charset, tool locations, flags)
//! 2. Configure logging (INFO, or DEBUG with --verbose)
//! 3. Build and validate the Config
//! 4. Run the batch compressor over every given path
//! 5. Print the summary; the exit code is 0 even when individual files
//!    failed - per-file outcomes are reported, the batch always completes
//!
//! ## Usage:
//! ```bash
//! asset-compressor ./static ./themes --charset utf-8 --verbose
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use asset_compressor::{AssetCompressor, Config};

#[derive(Parser)]
#[command(name = "asset-compressor")]
#[command(about = "Minify JS/CSS trees in place via external compressor tools")]
struct Args {
    /// Files or directories to compress recursively
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Charset for all file and tool I/O (a WHATWG encoding label)
    #[arg(long, default_value = "utf-8")]
    charset: String,

    /// JavaScript compiler executable (.jar is run via java -jar)
    #[arg(long, default_value = "closure.jar")]
    js_tool: PathBuf,

    /// CSS compressor executable (.jar is run via java -jar)
    #[arg(long, default_value = "yui.jar")]
    css_tool: PathBuf,

    /// Invoke the tools but don't overwrite any file
    #[arg(long)]
    dry_run: bool,

    /// Report skipped files at info level
    #[arg(long)]
    report_skipped: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config {
        charset: args.charset,
        js_tool: args.js_tool,
        css_tool: args.css_tool,
        dry_run: args.dry_run,
        report_skipped: args.report_skipped,
    };

    info!(
        "work in dir: {}",
        std::env::current_dir()?.display()
    );

    let compressor = AssetCompressor::new(config)?;
    let stats = compressor.run(&args.paths).await?;

    println!("{}", stats.format_summary());

    Ok(())
}

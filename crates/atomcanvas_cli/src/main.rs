//! Command-line entry point for atomcanvas.
//!
//! # Responsibility
//! - Render canvas JSON files to HTML from the shell.
//! - Derive edge keys for scripting and debugging stored memory.

use anyhow::{Context, Result};
use atomcanvas_core::logging::{LOG_DIR_ENV, LOG_LEVEL_ENV};
use atomcanvas_core::{
    core_version, default_log_level, derive_edge_id, init_logging, load_canvas_file,
    render_document, LogConfig,
};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "atomcanvas")]
#[command(about = "Render atom canvases and derive edge identities", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Absolute directory for rolling log files (falls back to ATOMCANVAS_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (falls back to ATOMCANVAS_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a canvas JSON file into an HTML document
    Render {
        /// Canvas file in `{ atoms, rootAtomIds }` form
        input: PathBuf,

        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the edge key for a source -> target connection
    EdgeId {
        source: String,
        target: String,

        #[arg(long)]
        source_handle: Option<String>,

        #[arg(long)]
        target_handle: Option<String>,
    },
    /// Show version
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(config) = resolve_log_config(&cli) {
        init_logging(&config)
            .map_err(anyhow::Error::msg)
            .context("failed to initialize logging")?;
    }

    match cli.command {
        Commands::Render { input, output } => render(input, output),
        Commands::EdgeId {
            source,
            target,
            source_handle,
            target_handle,
        } => {
            let key = derive_edge_id(
                &source,
                &target,
                source_handle.as_deref(),
                target_handle.as_deref(),
            );
            println!("{key}");
            Ok(())
        }
        Commands::Version => {
            println!("atomcanvas v{}", core_version());
            Ok(())
        }
    }
}

fn resolve_log_config(cli: &Cli) -> Option<LogConfig> {
    resolve_log_config_with(
        cli.log_dir.clone(),
        cli.log_level.clone(),
        |name| std::env::var(name).ok(),
    )
}

/// Flag wins over environment; the level finally falls back to the build
/// default. Logging stays off without a directory from either source.
fn resolve_log_config_with(
    flag_dir: Option<PathBuf>,
    flag_level: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<LogConfig> {
    let env_value = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
    let log_dir = flag_dir.or_else(|| env_value(LOG_DIR_ENV).map(|value| value.trim().into()))?;
    let level = flag_level
        .or_else(|| env_value(LOG_LEVEL_ENV))
        .unwrap_or_else(|| default_log_level().to_string());
    Some(LogConfig::new(level, log_dir))
}

fn render(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let canvas = load_canvas_file(&input)
        .with_context(|| format!("failed to load canvas {}", input.display()))?;

    let missing = canvas.missing_references();
    if !missing.is_empty() {
        let ids: Vec<&str> = missing.iter().map(|id| id.as_str()).collect();
        eprintln!(
            "warning: {} dangling reference(s) rendered as empty: {}",
            ids.len(),
            ids.join(", ")
        );
    }

    let document = render_document(&canvas);
    match output {
        Some(path) => {
            std::fs::write(&path, &document)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(
                "event=cli_render module=cli status=ok bytes={} output={}",
                document.len(),
                path.display()
            );
        }
        None => println!("{document}"),
    }
    Ok(())
}

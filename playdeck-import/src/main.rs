//! playdeck-import - batch markdown catalog importer
//!
//! Reads `.md` catalog files (users, tracks, podcasts, playlists), merges
//! them into one deduplicated catalog, and optionally writes a statistics
//! report. Per-file diagnostics also land in the append-only import log.

use anyhow::Result;
use clap::Parser;
use playdeck_common::config::{self, TomlConfig};
use playdeck_common::{stats, Catalog, MergeCounts};
use playdeck_import::{ImportOptions, Importer};
use std::path::PathBuf;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Parser)]
#[command(name = "playdeck-import", about = "Batch-import markdown catalog files")]
struct Args {
    /// Markdown files or directories to import (default: the library dir)
    paths: Vec<PathBuf>,

    /// Drop records with an error for defects lenient mode would default
    #[arg(long)]
    strict: bool,

    /// Config file (default: the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Diagnostics log file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write a statistics report to this path after importing
    #[arg(long)]
    report: Option<PathBuf>,

    /// How many tracks the report's top list shows
    #[arg(long, default_value_t = 10)]
    top: usize,
}

fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Starting playdeck-import");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let toml_config = TomlConfig::load(args.config.as_deref());
    let strict = config::resolve_strict(args.strict.then_some(true), &toml_config);
    let log_file = config::resolve_log_file(args.log_file.as_deref(), &toml_config);
    info!("Strict mode: {}", strict);
    info!("Diagnostics log: {}", log_file.display());

    let files = collect_files(&args.paths, &toml_config);
    if files.is_empty() {
        warn!("no .md files to import");
        return Ok(());
    }
    info!("Importing {} file(s)", files.len());

    let importer = Importer::new(ImportOptions {
        strict,
        log_file: Some(log_file),
    });

    let mut catalog = Catalog::new();
    let mut total = MergeCounts::default();
    for file in &files {
        info!("Reading {}", file.display());
        match importer.load_file(file) {
            Ok(outcome) => {
                for w in &outcome.warnings {
                    warn!("{}: {}", file.display(), w);
                }
                for e in &outcome.errors {
                    warn!("{}: [dropped] {}", file.display(), e);
                }
                total += catalog.absorb(outcome);
            }
            Err(e) => {
                // one unreadable file never poisons the batch
                error!("skipping {}: {}", file.display(), e);
            }
        }
    }

    info!("Import finished");
    info!("New users:     {}", total.users);
    info!("New tracks:    {}", total.tracks);
    info!("New episodes:  {}", total.episodes);
    info!("New playlists: {}", total.playlists);

    if let Some(report) = &args.report {
        stats::write_report(&catalog, report, args.top)?;
        info!("Report written to {}", report.display());
    }

    Ok(())
}

/// Expand the given paths into a sorted list of `.md` files. Directories are
/// scanned recursively; no paths at all means the resolved library dir.
fn collect_files(paths: &[PathBuf], toml_config: &TomlConfig) -> Vec<PathBuf> {
    let roots: Vec<PathBuf> = if paths.is_empty() {
        vec![config::resolve_library(None, toml_config)]
    } else {
        paths.to_vec()
    };

    let mut files = Vec::new();
    for root in roots {
        if root.is_dir() {
            for entry in walkdir::WalkDir::new(&root)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
                    files.push(path.to_path_buf());
                }
            }
        } else {
            files.push(root);
        }
    }
    files.sort();
    files
}

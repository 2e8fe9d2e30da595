//! Diagnostics sink and the append-only import log
//!
//! Warnings mean the entity survived with a safe fallback; errors mean a
//! record was dropped or a value coerced. Both are data returned to the
//! caller, and both are persisted per parse as one timestamped block in the
//! shared log file.

use playdeck_common::time::{now, stamp};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

const LOG_HEADER: &str = "# Markdown import diagnostics\n\n";

/// Ordered warning/error accumulator for one parse
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("import warning: {}", message);
        self.warnings.push(message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("import error: {}", message);
        self.errors.push(message);
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }
}

/// Append-only log store shared across parses
#[derive(Debug, Clone)]
pub struct DiagnosticsLog {
    path: PathBuf,
}

impl DiagnosticsLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one timestamped block for a parse of `source`.
    ///
    /// A parse with zero diagnostics writes nothing at all. Prior blocks are
    /// never overwritten; the file gets a one-line header when first created.
    pub fn append(&self, source: &str, diag: &Diagnostics) -> std::io::Result<()> {
        if diag.is_empty() {
            return Ok(());
        }

        let mut lines = vec![format!("[{}] Source: {}", stamp(now()), source)];
        if !diag.warnings.is_empty() {
            lines.push("WARNINGS:".to_string());
            lines.extend(diag.warnings.iter().map(|w| format!(" - {}", w)));
        }
        if !diag.errors.is_empty() {
            lines.push("ERRORS:".to_string());
            lines.extend(diag.errors.iter().map(|e| format!(" - {}", e)));
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let fresh = !self.path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if fresh {
            file.write_all(LOG_HEADER.as_bytes())?;
        }
        file.write_all(lines.join("\n").as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }
}

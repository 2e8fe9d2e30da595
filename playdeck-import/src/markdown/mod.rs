//! Markdown-like catalog loader
//!
//! Reads the semi-structured text format describing users, media, and
//! playlists, builds in-memory records, and resolves cross-references between
//! them while tolerating malformed input. The pipeline for one document:
//!
//! 1. sectionize the raw text into (section, record list) groups
//! 2. feed each group to its entity loader, in file order
//! 3. run the link resolver over the completed indices
//! 4. flush accumulated diagnostics to the append-only log
//!
//! Every parse starts from fresh state and returns a complete
//! [`ParseOutcome`]; partial catalogs are never exposed. The only fatal
//! failure is an unreadable input file; everything else degrades to a
//! smaller catalog plus diagnostics.

pub mod diagnostics;
pub mod record;
pub mod section;

mod loaders;
mod resolve;

use diagnostics::DiagnosticsLog;
use loaders::ParseState;
use playdeck_common::{Error, Media, ParseOutcome, Result};
use section::{sectionize, Section};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Importer configuration
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Drop records with an error for defects that lenient mode would
    /// default or merely warn about
    pub strict: bool,
    /// Append-only diagnostics log; `None` disables persistence
    pub log_file: Option<PathBuf>,
}

/// The markdown catalog importer.
///
/// Cheap to construct and stateless between calls: each `parse` works on
/// fresh internal state, so one importer can load any number of documents
/// sequentially. It is not meant to be shared across threads mid-parse.
#[derive(Debug)]
pub struct Importer {
    strict: bool,
    log: Option<DiagnosticsLog>,
}

impl Importer {
    pub fn new(options: ImportOptions) -> Self {
        Self {
            strict: options.strict,
            log: options.log_file.map(DiagnosticsLog::new),
        }
    }

    /// Parse one document. `source_id` tags the log block for this parse
    /// (typically the file path).
    pub fn parse(&self, text: &str, source_id: &str) -> ParseOutcome {
        let mut state = ParseState::new(self.strict);

        for (label, records) in sectionize(text) {
            match Section::match_label(&label) {
                Some(section) => state.load_section(section, records),
                None => state
                    .diag
                    .warn(format!("unknown section '{}' ignored", label)),
            }
        }

        resolve::resolve_links(&mut state);

        if let Some(log) = &self.log {
            if let Err(e) = log.append(source_id, &state.diag) {
                // diagnostics persistence must never fail the parse
                warn!("could not write diagnostics log {}: {}", log.path().display(), e);
            }
        }

        let mut outcome = ParseOutcome {
            warnings: state.diag.warnings,
            errors: state.diag.errors,
            users: state.users,
            ..Default::default()
        };
        for media in state.media {
            match media {
                Media::Track(track) => outcome.tracks.push(track),
                Media::Episode(episode) => outcome.episodes.push(episode),
            }
        }
        outcome.playlists = state
            .playlists
            .into_iter()
            .map(|pending| pending.playlist)
            .collect();

        debug!(
            "parsed {}: {} users, {} tracks, {} episodes, {} playlists, {} warnings, {} errors",
            source_id,
            outcome.users.len(),
            outcome.tracks.len(),
            outcome.episodes.len(),
            outcome.playlists.len(),
            outcome.warnings.len(),
            outcome.errors.len()
        );
        outcome
    }

    /// Load and parse one file. A missing or unreadable file is the one
    /// fatal condition; it aborts this file only, not a batch.
    pub fn load_file(&self, path: &Path) -> Result<ParseOutcome> {
        if !path.exists() {
            return Err(Error::NotFound(format!("file not found: {}", path.display())));
        }
        let text = std::fs::read_to_string(path)?;
        Ok(self.parse(&text, &path.display().to_string()))
    }
}

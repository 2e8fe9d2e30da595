//! Entity loaders: validate raw records and populate the parse indices
//!
//! Each section's records go through its own field rules and duplicate
//! policy. Users and media land in indexed collections (first occurrence
//! wins); playlists stay "pending" with their raw item titles until the link
//! resolver runs.
//!
//! The strict toggle controls the *severity* of certain field defects, not
//! always the outcome: a bad track duration drops the record in both modes
//! (error when strict, warning when lenient), while a bad episode number only
//! drops it when strict and defaults to 0 when lenient.

use super::diagnostics::Diagnostics;
use super::record::RawRecord;
use super::section::Section;
use playdeck_common::catalog::normalize;
use playdeck_common::{Episode, Media, Playlist, Track, User, UNKNOWN_OWNER};
use std::collections::HashMap;
use tracing::debug;

/// A playlist between loading and link resolution: the entity plus the raw
/// item titles that still need resolving against the media index.
#[derive(Debug)]
pub(crate) struct PendingPlaylist {
    pub playlist: Playlist,
    pub raw_titles: Vec<String>,
}

/// All mutable state for one parse: indexed collections plus diagnostics.
///
/// Insertion order is significant everywhere; the index maps only provide
/// normalized-key lookup into the vectors.
#[derive(Debug)]
pub(crate) struct ParseState {
    pub strict: bool,
    pub users: Vec<User>,
    pub user_index: HashMap<String, usize>,
    pub media: Vec<Media>,
    pub media_index: HashMap<String, usize>,
    pub playlists: Vec<PendingPlaylist>,
    pub diag: Diagnostics,
}

impl ParseState {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            users: Vec::new(),
            user_index: HashMap::new(),
            media: Vec::new(),
            media_index: HashMap::new(),
            playlists: Vec::new(),
            diag: Diagnostics::new(),
        }
    }

    /// Dispatch one finished section's records to its loader
    pub fn load_section(&mut self, section: Section, records: Vec<RawRecord>) {
        debug!("loading {:?} section with {} records", section, records.len());
        match section {
            Section::Users => self.load_users(records),
            Section::Tracks => self.load_tracks(records),
            Section::Podcasts => self.load_podcasts(records),
            Section::Playlists => self.load_playlists(records),
        }
    }

    fn load_users(&mut self, records: Vec<RawRecord>) {
        for record in records {
            let name = record.scalar("nome");
            if name.is_empty() {
                self.diag.error("user record without a name; record dropped");
                continue;
            }
            if self.user_index.contains_key(&normalize(&name)) {
                self.diag.warn(format!(
                    "duplicate user '{}'; keeping the first occurrence",
                    name
                ));
                continue;
            }

            let playlist_names = record.name_list(&["playlists", "playlist"]);
            let (unique, duplicates) = dedupe_by(&playlist_names, |t| normalize(t));
            if !duplicates.is_empty() {
                // record still loads with the deduplicated set
                self.diag.error(format!(
                    "user '{}' lists duplicate playlists {:?}; keeping one occurrence of each",
                    name, duplicates
                ));
            }

            self.user_index.insert(normalize(&name), self.users.len());
            self.users.push(User::with_playlists(name, unique));
        }
    }

    fn load_tracks(&mut self, records: Vec<RawRecord>) {
        for record in records {
            let title = record.scalar("titulo");
            if title.is_empty() {
                self.diag.error("track record without a title; record dropped");
                continue;
            }
            if self.media_index.contains_key(&normalize(&title)) {
                self.diag.warn(format!(
                    "duplicate media title '{}'; keeping the first",
                    title
                ));
                continue;
            }

            let duration = match self.check_duration(&record, &title, "track") {
                Some(d) => d,
                None => continue,
            };

            let track = Track::new(
                title.clone(),
                record.scalar("artista"),
                record.scalar("genero"),
                duration,
            );
            self.media_index.insert(normalize(&title), self.media.len());
            self.media.push(Media::Track(track));
        }
    }

    fn load_podcasts(&mut self, records: Vec<RawRecord>) {
        for record in records {
            let title = record.scalar("titulo");
            if title.is_empty() {
                self.diag
                    .error("podcast record without a title; record dropped");
                continue;
            }
            if self.media_index.contains_key(&normalize(&title)) {
                self.diag.warn(format!(
                    "duplicate media title '{}'; keeping the first",
                    title
                ));
                continue;
            }

            let ep_raw = record.scalar("episodio");
            let number = match parse_int(&ep_raw) {
                Some(n) => n,
                None if self.strict => {
                    self.diag.error(format!(
                        "invalid episode number '{}' in '{}'; record dropped",
                        ep_raw, title
                    ));
                    continue;
                }
                None => {
                    self.diag.warn(format!(
                        "invalid episode number '{}' in '{}'; using 0",
                        ep_raw, title
                    ));
                    0
                }
            };

            let duration = match self.check_duration(&record, &title, "podcast") {
                Some(d) => d,
                None => continue,
            };

            let episode = Episode::new(
                title.clone(),
                record.scalar("temporada"),
                number,
                record.scalar("host"),
                duration,
            );
            self.media_index.insert(normalize(&title), self.media.len());
            self.media.push(Media::Episode(episode));
        }
    }

    fn load_playlists(&mut self, records: Vec<RawRecord>) {
        for record in records {
            let name = record.scalar("nome");
            if name.is_empty() {
                self.diag
                    .error("playlist record without a name; record dropped");
                continue;
            }

            let owner_raw = {
                let dono = record.scalar("dono");
                if dono.is_empty() {
                    record.scalar("usuario")
                } else {
                    dono
                }
            };
            let owner = if owner_raw.is_empty() {
                // the resolver warns about ownerless playlists
                UNKNOWN_OWNER.to_string()
            } else if self.user_index.contains_key(&normalize(&owner_raw)) {
                owner_raw
            } else {
                self.diag.error(format!(
                    "playlist '{}' names unknown owner '{}'; marking owner as unknown",
                    name, owner_raw
                ));
                UNKNOWN_OWNER.to_string()
            };

            let items = record.name_list(&["itens"]);
            let (unique, duplicates) = dedupe_by(&items, |t| t.trim().to_string());
            if !duplicates.is_empty() {
                self.diag.warn(format!(
                    "playlist '{}' has repeated items {:?}; keeping one occurrence of each",
                    name, duplicates
                ));
            }

            // Items are only checked here when some media has already been
            // loaded; with an empty media index the titles pass through
            // unvalidated and the link resolver owns the check.
            let raw_titles = if self.media_index.is_empty() {
                unique
            } else {
                let mut kept = Vec::new();
                for title in unique {
                    if self.media_index.contains_key(&normalize(&title)) {
                        kept.push(title);
                    } else {
                        self.diag.error(format!(
                            "playlist '{}' item '{}' not in catalog; removed",
                            name, title
                        ));
                    }
                }
                kept
            };

            self.playlists.push(PendingPlaylist {
                playlist: Playlist::new(name, owner),
                raw_titles,
            });
        }
    }

    /// Validate the `duracao` field: must parse as a positive integer.
    ///
    /// The record is dropped either way on failure; strict mode logs it as an
    /// error, lenient mode as a warning. The asymmetry with episode numbers
    /// (which default under lenient mode) is intentional.
    fn check_duration(&mut self, record: &RawRecord, title: &str, kind: &str) -> Option<u32> {
        let raw = record.scalar("duracao");
        match parse_int(&raw).filter(|&d| d > 0) {
            Some(d) => Some(d),
            None => {
                let message = format!(
                    "invalid duration '{}' for {} '{}'; record dropped",
                    raw, kind, title
                );
                if self.strict {
                    self.diag.error(message);
                } else {
                    self.diag.warn(message);
                }
                None
            }
        }
    }
}

/// Negative or over-`u32::MAX` input fails the parse outright, so it takes
/// the same invalid-value path as non-numeric text.
fn parse_int(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

/// Split a name list into (first occurrences in order, duplicates in order of
/// appearance), comparing by `key`.
fn dedupe_by<F>(names: &[String], key: F) -> (Vec<String>, Vec<String>)
where
    F: Fn(&str) -> String,
{
    let mut seen = std::collections::HashSet::new();
    let mut unique = Vec::new();
    let mut duplicates = Vec::new();
    for name in names {
        if seen.insert(key(name)) {
            unique.push(name.clone());
        } else {
            duplicates.push(name.clone());
        }
    }
    (unique, duplicates)
}

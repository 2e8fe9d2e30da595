//! The running catalog and import merging
//!
//! A `Catalog` is the long-lived collection the application works against.
//! Each markdown import produces a [`ParseOutcome`] snapshot; `absorb` merges
//! one into the catalog, deduplicating by normalized name/title so repeated
//! imports of overlapping files stay idempotent.

use crate::media::{Episode, Track};
use crate::playlist::Playlist;
use crate::user::User;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// The one normalization used for all dedup keys: trim + lowercase
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Everything one parse produced: four ordered collections plus that call's
/// diagnostics. Warnings are recoverable; errors mean a record was dropped or
/// a value coerced.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub users: Vec<User>,
    pub tracks: Vec<Track>,
    pub episodes: Vec<Episode>,
    pub playlists: Vec<Playlist>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// How many entities a merge actually added
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeCounts {
    pub users: usize,
    pub tracks: usize,
    pub episodes: usize,
    pub playlists: usize,
}

impl std::ops::AddAssign for MergeCounts {
    fn add_assign(&mut self, other: Self) {
        self.users += other.users;
        self.tracks += other.tracks;
        self.episodes += other.episodes;
        self.playlists += other.playlists;
    }
}

/// The full media-streaming catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub users: Vec<User>,
    pub tracks: Vec<Track>,
    pub episodes: Vec<Episode>,
    pub playlists: Vec<Playlist>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one parse outcome into the catalog.
    ///
    /// Existing catalog entries always win: users dedupe by normalized name,
    /// tracks and episodes by normalized title, playlists by the
    /// (normalized name, normalized owner) pair.
    pub fn absorb(&mut self, outcome: ParseOutcome) -> MergeCounts {
        let mut counts = MergeCounts::default();

        let mut user_keys: HashSet<String> =
            self.users.iter().map(|u| normalize(&u.name)).collect();
        for user in outcome.users {
            if user_keys.insert(normalize(&user.name)) {
                self.users.push(user);
                counts.users += 1;
            }
        }

        let mut track_keys: HashSet<String> =
            self.tracks.iter().map(|t| normalize(&t.title)).collect();
        for track in outcome.tracks {
            if track_keys.insert(normalize(&track.title)) {
                self.tracks.push(track);
                counts.tracks += 1;
            }
        }

        let mut episode_keys: HashSet<String> =
            self.episodes.iter().map(|e| normalize(&e.title)).collect();
        for episode in outcome.episodes {
            if episode_keys.insert(normalize(&episode.title)) {
                self.episodes.push(episode);
                counts.episodes += 1;
            }
        }

        let mut playlist_keys: HashSet<(String, String)> = self
            .playlists
            .iter()
            .map(|p| (normalize(&p.name), normalize(&p.owner)))
            .collect();
        for playlist in outcome.playlists {
            let key = (normalize(&playlist.name), normalize(&playlist.owner));
            if playlist_keys.insert(key) {
                self.playlists.push(playlist);
                counts.playlists += 1;
            }
        }

        debug!(
            "absorbed import: +{} users, +{} tracks, +{} episodes, +{} playlists",
            counts.users, counts.tracks, counts.episodes, counts.playlists
        );
        counts
    }

    /// Create a new user, rejecting duplicates by normalized name
    pub fn add_user(&mut self, name: &str) -> Result<&User> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput("user name must not be empty".into()));
        }
        let key = normalize(trimmed);
        if self.users.iter().any(|u| normalize(&u.name) == key) {
            return Err(Error::InvalidInput(format!(
                "user '{}' already exists",
                trimmed
            )));
        }
        self.users.push(User::new(trimmed.to_string()));
        Ok(self.users.last().expect("just pushed"))
    }

    /// Look up a user by normalized name
    pub fn find_user(&self, name: &str) -> Option<&User> {
        let key = normalize(name);
        self.users.iter().find(|u| normalize(&u.name) == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome_with(names: &[&str], titles: &[&str]) -> ParseOutcome {
        ParseOutcome {
            users: names.iter().map(|n| User::new(n.to_string())).collect(),
            tracks: titles
                .iter()
                .map(|t| Track::new(t.to_string(), "X".into(), "Pop".into(), 60))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_absorb_counts_new_entities() {
        let mut catalog = Catalog::new();
        let counts = catalog.absorb(outcome_with(&["Ana", "Bruno"], &["Song A"]));
        assert_eq!(counts.users, 2);
        assert_eq!(counts.tracks, 1);
    }

    #[test]
    fn test_absorb_dedupes_against_existing() {
        let mut catalog = Catalog::new();
        catalog.absorb(outcome_with(&["Ana"], &["Song A"]));
        let counts = catalog.absorb(outcome_with(&[" ANA "], &["song a", "Song B"]));
        assert_eq!(counts.users, 0);
        assert_eq!(counts.tracks, 1);
        assert_eq!(catalog.users.len(), 1);
        assert_eq!(catalog.tracks.len(), 2);
    }

    #[test]
    fn test_absorb_playlist_key_is_name_plus_owner() {
        let mut catalog = Catalog::new();
        let mut outcome = ParseOutcome::default();
        outcome.playlists.push(Playlist::new("Mix".into(), "Ana".into()));
        outcome.playlists.push(Playlist::new("Mix".into(), "Bruno".into()));
        outcome.playlists.push(Playlist::new(" MIX ".into(), "ana".into()));
        let counts = catalog.absorb(outcome);
        assert_eq!(counts.playlists, 2);
    }

    #[test]
    fn test_add_user_rejects_duplicates() {
        let mut catalog = Catalog::new();
        catalog.add_user("Ana").unwrap();
        assert!(catalog.add_user(" ana ").is_err());
        assert!(catalog.add_user("  ").is_err());
        assert!(catalog.find_user("ANA").is_some());
    }
}

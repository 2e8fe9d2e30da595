//! User accounts
//!
//! A user owns playlists by *name* only. Storing names instead of references
//! keeps the User/Playlist relation acyclic; anything that needs the playlist
//! itself looks it up in the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A catalog user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    /// Names of playlists this user owns (never object references)
    pub playlists: Vec<String>,
    /// Titles of media this user has played, in playback order
    pub history: Vec<String>,
}

impl User {
    pub fn new(name: String) -> Self {
        Self {
            name,
            playlists: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn with_playlists(name: String, playlists: Vec<String>) -> Self {
        Self {
            name,
            playlists,
            history: Vec::new(),
        }
    }

    /// Record a played title in the listening history
    pub fn record_play(&mut self, title: &str) {
        self.history.push(title.to_string());
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} playlists, {} plays)",
            self.name,
            self.playlists.len(),
            self.history.len()
        )
    }
}

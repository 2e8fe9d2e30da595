//! Playlists
//!
//! A playlist stores its owner as a plain name string, mirroring the
//! User-side convention: relations between users and playlists are always
//! identifiers plus a catalog lookup, never owning pointers in both
//! directions.

use crate::catalog::normalize;
use crate::media::Media;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Owner recorded for playlists whose source did not name a known user
pub const UNKNOWN_OWNER: &str = "unknown";

/// An ordered list of resolved media entries owned by one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub name: String,
    /// Owner's user name, or [`UNKNOWN_OWNER`]
    pub owner: String,
    /// Resolved media entries; populated once by the link resolver
    pub items: Vec<Media>,
    pub play_count: u32,
}

impl Playlist {
    pub fn new(name: String, owner: String) -> Self {
        Self {
            name,
            owner,
            items: Vec::new(),
            play_count: 0,
        }
    }

    /// Replace the item list with the resolved media entries.
    ///
    /// This is the only mutator for `items` and only the link resolver (or a
    /// catalog merge carrying already-resolved items) calls it.
    pub fn set_resolved_items(&mut self, items: Vec<Media>) {
        self.items = items;
    }

    /// Remove the first item whose title matches (trimmed, exact case)
    pub fn remove_item(&mut self, title: &str) -> bool {
        let wanted = title.trim();
        match self.items.iter().position(|m| m.title().trim() == wanted) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Total duration of all items in seconds
    pub fn total_duration(&self) -> u32 {
        self.items.iter().map(Media::duration_secs).sum()
    }

    /// Play every item, bumping the playlist counter once
    pub fn play(&mut self) {
        self.play_count += 1;
        for item in &mut self.items {
            item.play();
        }
    }

    /// Whether two playlists are the same list: equal name and owner
    /// (case/space-insensitive) and the same set of item titles, order
    /// ignored.
    pub fn same_as(&self, other: &Playlist) -> bool {
        if normalize(&self.name) != normalize(&other.name) {
            return false;
        }
        if normalize(&self.owner) != normalize(&other.owner) {
            return false;
        }
        if self.items.len() != other.items.len() {
            return false;
        }
        let mut mine: Vec<String> = self.items.iter().map(|m| normalize(m.title())).collect();
        let mut theirs: Vec<String> = other.items.iter().map(|m| normalize(m.title())).collect();
        mine.sort();
        theirs.sort();
        mine == theirs
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Playlist '{}' (owner: {})", self.name, self.owner)?;
        writeln!(
            f,
            "  {} items, {} plays",
            self.items.len(),
            self.play_count
        )?;
        for item in &self.items {
            writeln!(f, "  - {}", item)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{Episode, Track};

    fn track(title: &str) -> Media {
        Media::Track(Track::new(title.into(), "X".into(), "Pop".into(), 100))
    }

    #[test]
    fn test_set_resolved_items_replaces_list() {
        let mut pl = Playlist::new("Mix".into(), "Ana".into());
        pl.set_resolved_items(vec![track("A"), track("B")]);
        assert_eq!(pl.items.len(), 2);
        pl.set_resolved_items(vec![track("C")]);
        assert_eq!(pl.items.len(), 1);
        assert_eq!(pl.items[0].title(), "C");
    }

    #[test]
    fn test_remove_item_first_match_only() {
        let mut pl = Playlist::new("Mix".into(), "Ana".into());
        pl.set_resolved_items(vec![track("A"), track("B"), track("A")]);
        assert!(pl.remove_item("A"));
        assert_eq!(pl.items.len(), 2);
        assert!(!pl.remove_item("Z"));
    }

    #[test]
    fn test_play_bumps_playlist_and_items() {
        let mut pl = Playlist::new("Mix".into(), "Ana".into());
        pl.set_resolved_items(vec![track("A")]);
        pl.play();
        pl.play();
        assert_eq!(pl.play_count, 2);
        assert_eq!(pl.items[0].play_count(), 2);
    }

    #[test]
    fn test_total_duration() {
        let mut pl = Playlist::new("Mix".into(), "Ana".into());
        let ep = Media::Episode(Episode::new("E".into(), "S1".into(), 1, "H".into(), 50));
        pl.set_resolved_items(vec![track("A"), ep]);
        assert_eq!(pl.total_duration(), 150);
    }

    #[test]
    fn test_same_as_ignores_item_order() {
        let mut a = Playlist::new("Mix".into(), "Ana".into());
        a.set_resolved_items(vec![track("A"), track("B")]);
        let mut b = Playlist::new(" mix ".into(), "ANA".into());
        b.set_resolved_items(vec![track("B"), track("A")]);
        assert!(a.same_as(&b));

        let mut c = Playlist::new("Mix".into(), "Bruno".into());
        c.set_resolved_items(vec![track("A"), track("B")]);
        assert!(!a.same_as(&c));
    }
}

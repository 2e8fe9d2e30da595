//! Media entities: tracks and podcast episodes
//!
//! Tracks and episodes share a single title namespace across the catalog, so
//! equality for dedup purposes is by normalized title regardless of kind.

use crate::catalog::normalize;
use crate::time::format_duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// A music track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub genre: String,
    /// Duration in seconds, always positive (validated at load time)
    pub duration_secs: u32,
    pub play_count: u32,
    /// Ratings on a 0..=5 scale
    pub ratings: Vec<u8>,
}

impl Track {
    pub fn new(title: String, artist: String, genre: String, duration_secs: u32) -> Self {
        Self {
            title,
            artist,
            genre,
            duration_secs,
            play_count: 0,
            ratings: Vec::new(),
        }
    }

    /// Register one playback
    pub fn play(&mut self) {
        self.play_count += 1;
    }

    /// Record a rating. Scores outside 0..=5 are rejected.
    pub fn rate(&mut self, score: u8) -> bool {
        if score > 5 {
            warn!("rating {} out of range for '{}'", score, self.title);
            return false;
        }
        self.ratings.push(score);
        true
    }

    /// Mean of all recorded ratings, 0.0 when unrated
    pub fn average_rating(&self) -> f64 {
        if self.ratings.is_empty() {
            return 0.0;
        }
        self.ratings.iter().map(|&r| r as f64).sum::<f64>() / self.ratings.len() as f64
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' by {} [{}] ({}) - {} plays",
            self.title,
            self.artist,
            format_duration(self.duration_secs),
            self.genre,
            self.play_count
        )
    }
}

/// A podcast episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub title: String,
    pub season: String,
    /// Episode number within the season; 0 when the source did not say
    pub number: u32,
    pub host: String,
    /// Duration in seconds, always positive (validated at load time)
    pub duration_secs: u32,
    pub play_count: u32,
}

impl Episode {
    pub fn new(title: String, season: String, number: u32, host: String, duration_secs: u32) -> Self {
        Self {
            title,
            season,
            number,
            host,
            duration_secs,
            play_count: 0,
        }
    }

    /// Register one playback
    pub fn play(&mut self) {
        self.play_count += 1;
    }
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' ({} ep. {}) hosted by {} [{}] - {} plays",
            self.title,
            self.season,
            self.number,
            self.host,
            format_duration(self.duration_secs),
            self.play_count
        )
    }
}

/// Either kind of media file the catalog knows about
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Media {
    Track(Track),
    Episode(Episode),
}

impl Media {
    pub fn title(&self) -> &str {
        match self {
            Media::Track(t) => &t.title,
            Media::Episode(e) => &e.title,
        }
    }

    pub fn duration_secs(&self) -> u32 {
        match self {
            Media::Track(t) => t.duration_secs,
            Media::Episode(e) => e.duration_secs,
        }
    }

    pub fn play_count(&self) -> u32 {
        match self {
            Media::Track(t) => t.play_count,
            Media::Episode(e) => e.play_count,
        }
    }

    pub fn play(&mut self) {
        match self {
            Media::Track(t) => t.play(),
            Media::Episode(e) => e.play(),
        }
    }
}

impl PartialEq for Media {
    /// Titles form one shared namespace, so two media entries are the same
    /// entry exactly when their normalized titles match.
    fn eq(&self, other: &Self) -> bool {
        normalize(self.title()) == normalize(other.title())
    }
}

impl Eq for Media {}

impl fmt::Display for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Media::Track(t) => t.fmt(f),
            Media::Episode(e) => e.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_accepts_valid_scores() {
        let mut track = Track::new("Song".into(), "Band".into(), "Rock".into(), 180);
        assert!(track.rate(0));
        assert!(track.rate(5));
        assert_eq!(track.ratings, vec![0, 5]);
    }

    #[test]
    fn test_rate_rejects_out_of_range() {
        let mut track = Track::new("Song".into(), "Band".into(), "Rock".into(), 180);
        assert!(!track.rate(6));
        assert!(track.ratings.is_empty());
    }

    #[test]
    fn test_average_rating() {
        let mut track = Track::new("Song".into(), "Band".into(), "Rock".into(), 180);
        assert_eq!(track.average_rating(), 0.0);
        track.rate(3);
        track.rate(5);
        assert_eq!(track.average_rating(), 4.0);
    }

    #[test]
    fn test_media_equality_ignores_case_and_space() {
        let a = Media::Track(Track::new("Song A".into(), "X".into(), "Pop".into(), 60));
        let b = Media::Episode(Episode::new(
            "  song a ".into(),
            "S1".into(),
            1,
            "Host".into(),
            60,
        ));
        assert_eq!(a, b);
    }

    #[test]
    fn test_play_increments_count() {
        let mut media = Media::Track(Track::new("Song".into(), "X".into(), "Pop".into(), 60));
        media.play();
        media.play();
        assert_eq!(media.play_count(), 2);
    }
}

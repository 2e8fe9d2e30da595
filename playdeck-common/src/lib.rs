//! # Playdeck Common Library
//!
//! Shared code for the Playdeck crates:
//! - Domain entities (users, tracks, episodes, playlists)
//! - The running catalog and import merging
//! - Statistics and the text report writer
//! - Configuration loading
//! - Error and time utilities

pub mod catalog;
pub mod config;
pub mod error;
pub mod media;
pub mod playlist;
pub mod stats;
pub mod time;
pub mod user;

pub use catalog::{Catalog, MergeCounts, ParseOutcome};
pub use error::{Error, Result};
pub use media::{Episode, Media, Track};
pub use playlist::{Playlist, UNKNOWN_OWNER};
pub use user::User;

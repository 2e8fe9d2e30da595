//! Catalog statistics and the text report writer
//!
//! Pure read-only aggregation over the catalog collections; nothing here
//! mutates entity state.

use crate::catalog::Catalog;
use crate::media::Track;
use crate::playlist::Playlist;
use crate::time::{now, stamp};
use crate::user::User;
use crate::Result;
use std::fs;
use std::path::Path;

/// The `n` most-played tracks, descending by play count (ties keep catalog
/// order, which `sort_by_key` preserves since the sort is stable)
pub fn top_tracks(tracks: &[Track], n: usize) -> Vec<&Track> {
    let mut ordered: Vec<&Track> = tracks.iter().collect();
    ordered.sort_by_key(|t| std::cmp::Reverse(t.play_count));
    ordered.truncate(n);
    ordered
}

/// Playlist with the highest play count, `None` when there are none
pub fn most_popular_playlist(playlists: &[Playlist]) -> Option<&Playlist> {
    playlists.iter().max_by_key(|p| p.play_count)
}

/// User with the longest listening history, `None` when there are none
pub fn most_active_user(users: &[User]) -> Option<&User> {
    users.iter().max_by_key(|u| u.history.len())
}

/// `(title, mean rating)` per track, catalog order preserved
pub fn average_ratings(tracks: &[Track]) -> Vec<(String, f64)> {
    tracks
        .iter()
        .map(|t| (t.title.trim().to_string(), t.average_rating()))
        .collect()
}

/// Total plays recorded across all user histories
pub fn total_plays(users: &[User]) -> usize {
    users.iter().map(|u| u.history.len()).sum()
}

/// Write the statistics report as plain text.
///
/// The report is a snapshot and overwrites any previous one; only the
/// diagnostics log is append-only. Parent directories are created as needed.
pub fn write_report(catalog: &Catalog, path: &Path, top_n: usize) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("=== Catalog Report ===".to_string());
    lines.push(format!("Generated: {}", stamp(now())));
    lines.push(String::new());

    lines.push("-- Summary --".to_string());
    lines.push(format!("Users:     {}", catalog.users.len()));
    lines.push(format!("Tracks:    {}", catalog.tracks.len()));
    lines.push(format!("Episodes:  {}", catalog.episodes.len()));
    lines.push(format!("Playlists: {}", catalog.playlists.len()));
    lines.push(format!("Total plays (user histories): {}", total_plays(&catalog.users)));
    lines.push(String::new());

    lines.push(format!("-- Top {} tracks by plays --", top_n));
    let top = top_tracks(&catalog.tracks, top_n);
    if top.is_empty() {
        lines.push("No tracks in catalog.".to_string());
    } else {
        for (i, t) in top.iter().enumerate() {
            lines.push(format!(
                "{:02}. '{}' by {} | plays: {}",
                i + 1,
                t.title,
                t.artist,
                t.play_count
            ));
        }
    }
    lines.push(String::new());

    lines.push("-- Most popular playlist --".to_string());
    match most_popular_playlist(&catalog.playlists) {
        Some(p) => lines.push(format!(
            "'{}' (owner: {}) | {} items | plays: {}",
            p.name,
            p.owner,
            p.items.len(),
            p.play_count
        )),
        None => lines.push("No playlists in catalog.".to_string()),
    }
    lines.push(String::new());

    lines.push("-- Most active user --".to_string());
    match most_active_user(&catalog.users) {
        Some(u) => lines.push(format!("{} | {} plays in history", u.name, u.history.len())),
        None => lines.push("No users in catalog.".to_string()),
    }
    lines.push(String::new());

    lines.push("-- Average track ratings --".to_string());
    if catalog.tracks.is_empty() {
        lines.push("No rated tracks.".to_string());
    } else {
        for (title, mean) in average_ratings(&catalog.tracks) {
            lines.push(format!("'{}': {:.2}", title, mean));
        }
    }
    lines.push(String::new());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, lines.join("\n"))?;
    Ok(())
}

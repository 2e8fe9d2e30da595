//! Link resolver: the second pass over fully-loaded indices
//!
//! The format gives no forward-reference guarantee, so cross-references can
//! only be trusted as "not found" after every section of the document has
//! loaded. This pass rewrites raw playlist item titles into resolved media,
//! validates ownership for diagnostics, and propagates playlist names back
//! onto their owning users.

use super::loaders::ParseState;
use playdeck_common::catalog::normalize;
use playdeck_common::UNKNOWN_OWNER;
use std::collections::HashSet;

pub(crate) fn resolve_links(state: &mut ParseState) {
    let ParseState {
        users,
        user_index,
        media,
        media_index,
        playlists,
        diag,
        ..
    } = state;

    // Pass 1: resolve each playlist's raw titles and check its owner.
    // Owner problems never block item resolution.
    for pending in playlists.iter_mut() {
        let name = &pending.playlist.name;
        let owner = pending.playlist.owner.trim();

        if owner.is_empty() || owner == UNKNOWN_OWNER {
            diag.warn(format!("playlist '{}' has no known owner", name));
        } else if !user_index.contains_key(&normalize(owner)) {
            diag.warn(format!(
                "playlist '{}' references unknown user '{}'",
                name, owner
            ));
        }

        let mut resolved = Vec::new();
        let mut missing = Vec::new();
        for title in &pending.raw_titles {
            match media_index.get(&normalize(title)) {
                Some(&idx) => resolved.push(media[idx].clone()),
                None => missing.push(title.clone()),
            }
        }
        if !missing.is_empty() {
            diag.warn(format!(
                "playlist '{}' contains unknown items {:?}; ignored",
                name, missing
            ));
        }
        pending.playlist.set_resolved_items(resolved);
        pending.raw_titles.clear();
    }

    // Pass 2: propagate playlist names onto their owning users.
    for pending in playlists.iter() {
        let name = pending.playlist.name.trim();
        if name.is_empty() {
            continue;
        }
        let owner = pending.playlist.owner.trim();
        if owner.is_empty() || owner == UNKNOWN_OWNER {
            continue;
        }
        if let Some(&idx) = user_index.get(&normalize(owner)) {
            users[idx].playlists.push(name.to_string());
        }
    }

    // Reconciliation: names seeded from the user's own record and names
    // discovered above merge into one deduplicated, insertion-order-stable
    // list of non-empty strings.
    for user in users.iter_mut() {
        let mut seen = HashSet::new();
        let mut merged = Vec::new();
        for name in &user.playlists {
            let key = name.trim().to_string();
            if !key.is_empty() && seen.insert(key.clone()) {
                merged.push(key);
            }
        }
        user.playlists = merged;
    }
}

//! Queue resolution
//!
//! The queue is never stored on its own: it is derived from the catalog,
//! the search text, the active view and the favorites set, and recomputed
//! whenever any of them changes.

use pokoro_core::{Track, TrackId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which list the user is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    /// Whole catalog, narrowed by the search text
    #[default]
    Home,

    /// Favorited tracks only (search text ignored)
    Favorites,
}

/// Derive the ordered queue
///
/// Pure function of its inputs. Ordering always follows the catalog.
pub fn resolve_queue(
    catalog: &[Track],
    search_text: &str,
    view: ActiveView,
    favorite_ids: &HashSet<TrackId>,
) -> Vec<Track> {
    match view {
        ActiveView::Favorites => {
            if favorite_ids.is_empty() {
                return Vec::new();
            }
            catalog
                .iter()
                .filter(|t| favorite_ids.contains(&t.id))
                .cloned()
                .collect()
        }
        ActiveView::Home => {
            let needle = search_text.trim().to_lowercase();
            if needle.is_empty() {
                return catalog.to_vec();
            }
            catalog
                .iter()
                .filter(|t| t.matches(&needle))
                .cloned()
                .collect()
        }
    }
}

/// Position of a track in the queue, `None` if absent
pub fn index_of(queue: &[Track], id: &TrackId) -> Option<usize> {
    queue.iter().position(|t| &t.id == id)
}

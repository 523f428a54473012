//! Catalog loading
//!
//! Fetches raw records from a [`TrackCatalog`] and normalizes them.

use pokoro_core::{Track, TrackCatalog};
use tracing::{info, warn};

/// Fetch and normalize the full track list
///
/// A failed fetch yields an empty catalog and a logged warning.
pub async fn load_catalog(source: &dyn TrackCatalog) -> Vec<Track> {
    match source.list_tracks().await {
        Ok(records) => {
            let tracks: Vec<Track> = records.into_iter().map(Track::from).collect();
            let missing_audio = tracks.iter().filter(|t| t.audio_url.is_empty()).count();
            if missing_audio > 0 {
                warn!(count = missing_audio, "Catalog tracks without an audio URL");
            }
            info!(count = tracks.len(), "Loaded track catalog");
            tracks
        }
        Err(e) => {
            warn!(error = %e, "Failed to fetch track catalog");
            Vec::new()
        }
    }
}

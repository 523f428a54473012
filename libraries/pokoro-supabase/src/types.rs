//! Request and response types for the Supabase REST API.

use pokoro_core::{RawTrackId, TrackId, UserId};
use serde::{Deserialize, Serialize};

/// Connection settings for a Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL (e.g., "https://abcd.supabase.co")
    pub url: String,
    /// Public anon key, sent as `apikey` and bearer token
    pub anon_key: String,
}

impl SupabaseConfig {
    /// Create a config for a project.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
        }
    }
}

/// Row returned by `favorites?select=track_id`.
#[derive(Debug, Deserialize)]
pub(crate) struct FavoriteRow {
    pub track_id: RawTrackId,
}

impl FavoriteRow {
    pub(crate) fn into_track_id(self) -> TrackId {
        TrackId::from(self.track_id)
    }
}

/// Body for inserting a favorite.
#[derive(Debug, Serialize)]
pub(crate) struct NewFavorite<'a> {
    pub user_id: &'a UserId,
    pub track_id: &'a TrackId,
}

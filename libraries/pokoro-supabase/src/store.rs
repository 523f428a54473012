//! Collaborator trait implementations backed by [`SupabaseClient`].

use crate::client::SupabaseClient;
use async_trait::async_trait;
use pokoro_core::{FavoritesStore, PokoroError, RawTrack, TrackCatalog, TrackId, UserId};

#[async_trait]
impl TrackCatalog for SupabaseClient {
    async fn list_tracks(&self) -> pokoro_core::Result<Vec<RawTrack>> {
        self.fetch_tracks()
            .await
            .map_err(|e| e.into_core(PokoroError::Catalog))
    }
}

#[async_trait]
impl FavoritesStore for SupabaseClient {
    async fn list_favorites(&self, user: &UserId) -> pokoro_core::Result<Vec<TrackId>> {
        self.fetch_favorites(user)
            .await
            .map_err(|e| e.into_core(PokoroError::Favorites))
    }

    async fn add_favorite(&self, user: &UserId, track: &TrackId) -> pokoro_core::Result<()> {
        self.insert_favorite(user, track)
            .await
            .map_err(|e| e.into_core(PokoroError::Favorites))
    }

    async fn remove_favorite(&self, user: &UserId, track: &TrackId) -> pokoro_core::Result<()> {
        self.delete_favorite(user, track)
            .await
            .map_err(|e| e.into_core(PokoroError::Favorites))
    }
}

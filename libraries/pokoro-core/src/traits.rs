/// Collaborator traits for Pokoro
///
/// Everything the player talks to over the network or the local device is
/// expressed here so the playback and session crates stay I/O free.
use crate::error::Result;
use crate::types::{RawTrack, TrackId, UserId};
use async_trait::async_trait;

/// Read-only source of the full track list
#[async_trait]
pub trait TrackCatalog: Send + Sync {
    /// Fetch every track record
    ///
    /// # Errors
    /// Returns an error if the catalog cannot be reached or parsed
    async fn list_tracks(&self) -> Result<Vec<RawTrack>>;
}

/// Persistent set of (user, track) favorite pairs
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// List favorited track ids for a user
    async fn list_favorites(&self, user: &UserId) -> Result<Vec<TrackId>>;

    /// Mark a track as favorite
    async fn add_favorite(&self, user: &UserId, track: &TrackId) -> Result<()>;

    /// Remove a favorite mark
    async fn remove_favorite(&self, user: &UserId, track: &TrackId) -> Result<()>;
}

/// Identity exposed by the host platform (chat Mini App shell)
pub trait HostIdentity {
    /// Platform user id, if the app runs inside the host with a known user
    fn platform_user_id(&self) -> Option<String>;
}

/// Local persistence for the generated guest identifier
pub trait GuestIdStore {
    /// Load a previously saved guest id
    ///
    /// # Errors
    /// Returns an error if the storage exists but cannot be read
    fn load(&self) -> Result<Option<String>>;

    /// Save the guest id for future sessions
    fn save(&self, guest_id: &str) -> Result<()>;
}

/// Host identity for running outside the host platform
impl HostIdentity for Option<String> {
    fn platform_user_id(&self) -> Option<String> {
        self.clone()
    }
}

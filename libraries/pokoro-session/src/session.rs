//! Player session - composition root
//!
//! One instance per app session. Owns identity, the catalog snapshot, the
//! favorites cache, search text, active view and the transport controller,
//! and keeps the transport's queue in step with all of them.

use crate::catalog::load_catalog;
use crate::favorites::{FavoriteRequest, FavoritesCache};
use crate::identity::SessionIdentity;
use pokoro_core::{FavoritesStore, GuestIdStore, HostIdentity, Track, TrackCatalog, TrackId, UserId};
use pokoro_playback::{
    resolve_queue, ActiveView, AudioDevice, PlaybackConfig, RepeatMode, TransportController,
};
use serde::Serialize;
use tracing::{debug, warn};

/// Premium subscription state
///
/// Payments are not offered; the session always reports `NotAvailable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PremiumStatus {
    /// No premium offering in this client
    NotAvailable,
}

/// Snapshot shown on the profile screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSummary {
    /// Resolved identity, `None` before identification
    pub user_id: Option<UserId>,
    /// Number of favorited tracks
    pub favorites_count: usize,
    /// Shuffle flag
    pub shuffle: bool,
    /// Repeat mode
    pub repeat: RepeatMode,
    /// Always `NotAvailable`
    pub premium: PremiumStatus,
}

impl ProfileSummary {
    /// "on"/"off" label for shuffle
    pub fn shuffle_label(&self) -> &'static str {
        if self.shuffle {
            "on"
        } else {
            "off"
        }
    }

    /// Label for the repeat mode
    pub fn repeat_label(&self) -> &'static str {
        self.repeat.as_str()
    }
}

/// Everything one listening session needs
pub struct PlayerSession<D: AudioDevice> {
    identity: Option<SessionIdentity>,
    catalog: Vec<Track>,
    favorites: FavoritesCache,
    search_text: String,
    view: ActiveView,
    transport: TransportController<D>,
}

impl<D: AudioDevice> PlayerSession<D> {
    /// Create a session around an audio device
    pub fn new(device: D, config: PlaybackConfig) -> Self {
        Self::with_transport(TransportController::new(device, config))
    }

    /// Create a session around a prepared transport controller
    pub fn with_transport(transport: TransportController<D>) -> Self {
        Self {
            identity: None,
            catalog: Vec::new(),
            favorites: FavoritesCache::new(),
            search_text: String::new(),
            view: ActiveView::default(),
            transport,
        }
    }

    // ===== Identity =====

    /// Resolve the user identity once; later calls return the existing one
    pub fn identify(&mut self, host: &dyn HostIdentity, guests: &dyn GuestIdStore) -> &UserId {
        let identity = self
            .identity
            .get_or_insert_with(|| SessionIdentity::resolve(host, guests));
        self.favorites.set_user(identity.user_id().clone());
        identity.user_id()
    }

    /// Adopt an identity resolved elsewhere
    pub fn set_identity(&mut self, identity: SessionIdentity) {
        if self.identity.is_some() {
            warn!("Identity already resolved for this session");
            return;
        }
        self.favorites.set_user(identity.user_id().clone());
        self.identity = Some(identity);
    }

    /// Resolved user id, if any
    pub fn user_id(&self) -> Option<&UserId> {
        self.identity.as_ref().map(SessionIdentity::user_id)
    }

    // ===== Catalog =====

    /// Replace the catalog from the track source
    ///
    /// After the first load with nothing current, the first track is
    /// selected for display without playing.
    pub async fn refresh_catalog(&mut self, source: &dyn TrackCatalog) {
        let tracks = load_catalog(source).await;
        self.set_catalog(tracks);
    }

    /// Replace the catalog with already normalized tracks
    pub fn set_catalog(&mut self, tracks: Vec<Track>) {
        self.catalog = tracks;
        self.transport.set_catalog(self.catalog.clone());
        self.requeue();

        if self.transport.session().current_track_id.is_none() {
            if let Some(first) = self.catalog.first().map(|t| t.id.clone()) {
                if let Err(e) = self.transport.select_track(&first) {
                    warn!(track_id = %first, error = %e, "Initial selection failed");
                }
            }
        }
    }

    /// Full catalog snapshot
    pub fn catalog(&self) -> &[Track] {
        &self.catalog
    }

    // ===== Queue inputs =====

    /// Change the search filter
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.requeue();
    }

    /// Current search filter
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Switch between all tracks and favorites only
    pub fn set_view(&mut self, view: ActiveView) {
        self.view = view;
        self.requeue();
    }

    /// Active view
    pub fn view(&self) -> ActiveView {
        self.view
    }

    /// Current queue
    pub fn queue(&self) -> &[Track] {
        self.transport.queue()
    }

    fn requeue(&mut self) {
        let queue = resolve_queue(&self.catalog, &self.search_text, self.view, self.favorites.ids());
        debug!(len = queue.len(), view = ?self.view, "Queue resolved");
        self.transport.set_queue(queue);
    }

    // ===== Favorites =====

    /// Load the user's favorites
    pub async fn load_favorites(&mut self, store: &dyn FavoritesStore) {
        self.favorites.load(store).await;
        self.requeue();
    }

    /// Whether a track is favorited
    pub fn is_favorite(&self, id: &TrackId) -> bool {
        self.favorites.contains(id)
    }

    /// Favorites cache
    pub fn favorites(&self) -> &FavoritesCache {
        &self.favorites
    }

    /// Toggle a favorite and wait for the store
    pub async fn toggle_favorite(&mut self, store: &dyn FavoritesStore, id: &TrackId) {
        let mut next = self.begin_favorite_toggle(id);
        while let Some(request) = next {
            let outcome = request.send(store).await;
            next = self.finish_favorite_toggle(request, outcome);
        }
    }

    /// Flip a favorite locally; the caller sends the returned request
    pub fn begin_favorite_toggle(&mut self, id: &TrackId) -> Option<FavoriteRequest> {
        let request = self.favorites.begin_toggle(id);
        self.requeue();
        request
    }

    /// Settle a favorite request sent by the caller
    ///
    /// Returns a queued follow-up request for the same track, if any.
    pub fn finish_favorite_toggle(
        &mut self,
        request: FavoriteRequest,
        outcome: pokoro_core::Result<()>,
    ) -> Option<FavoriteRequest> {
        let next = self.favorites.finish_toggle(request, outcome);
        self.requeue();
        next
    }

    // ===== Transport =====

    /// Transport controller
    pub fn transport(&self) -> &TransportController<D> {
        &self.transport
    }

    /// Transport controller, mutably
    pub fn transport_mut(&mut self) -> &mut TransportController<D> {
        &mut self.transport
    }

    /// Profile screen snapshot
    pub fn profile(&self) -> ProfileSummary {
        let playback = self.transport.session();
        ProfileSummary {
            user_id: self.user_id().cloned(),
            favorites_count: self.favorites.len(),
            shuffle: playback.shuffle_enabled,
            repeat: playback.repeat_mode,
            premium: PremiumStatus::NotAvailable,
        }
    }

    /// Stop playback for teardown
    pub fn shutdown(&mut self) {
        self.transport.shutdown();
    }
}

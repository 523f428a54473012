//! Favorites cache
//!
//! In-memory set of favorited track ids for the session user, kept in step
//! with the [`FavoritesStore`] through optimistic updates.
//!
//! Toggles are serialized per track id: a toggle requested while another
//! toggle of the same id is in flight is queued and issued once the first
//! round-trip settles. Two queued toggles cancel out.

use crate::optimistic::{self, Pending, Reversible};
use pokoro_core::{FavoritesStore, TrackId, UserId};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Change to the favorites set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteMutation {
    /// Mark as favorite
    Add(TrackId),
    /// Unmark
    Remove(TrackId),
}

impl FavoriteMutation {
    /// Track the mutation is about
    pub fn track_id(&self) -> &TrackId {
        match self {
            FavoriteMutation::Add(id) | FavoriteMutation::Remove(id) => id,
        }
    }
}

impl Reversible for FavoriteMutation {
    type Target = HashSet<TrackId>;

    fn apply_to(&self, target: &mut HashSet<TrackId>) {
        match self {
            FavoriteMutation::Add(id) => {
                target.insert(id.clone());
            }
            FavoriteMutation::Remove(id) => {
                target.remove(id);
            }
        }
    }

    fn inverse(&self) -> Self {
        match self {
            FavoriteMutation::Add(id) => FavoriteMutation::Remove(id.clone()),
            FavoriteMutation::Remove(id) => FavoriteMutation::Add(id.clone()),
        }
    }
}

/// Store call for a toggle that has already been applied locally
#[derive(Debug)]
pub struct FavoriteRequest {
    user: UserId,
    pending: Pending<FavoriteMutation>,
}

impl FavoriteRequest {
    /// Mutation being confirmed
    pub fn mutation(&self) -> &FavoriteMutation {
        self.pending.mutation()
    }

    /// Issue the insert/delete against the store
    pub async fn send(&self, store: &dyn FavoritesStore) -> pokoro_core::Result<()> {
        match self.pending.mutation() {
            FavoriteMutation::Add(id) => store.add_favorite(&self.user, id).await,
            FavoriteMutation::Remove(id) => store.remove_favorite(&self.user, id).await,
        }
    }
}

/// Favorited track ids for one user
#[derive(Debug, Default)]
pub struct FavoritesCache {
    user: Option<UserId>,
    ids: HashSet<TrackId>,
    in_flight: HashSet<TrackId>,
    queued: HashSet<TrackId>,
}

impl FavoritesCache {
    /// Empty cache with no user yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the session user
    ///
    /// The identity is fixed for the session; later calls are ignored.
    pub fn set_user(&mut self, user: UserId) {
        match &self.user {
            None => self.user = Some(user),
            Some(existing) if existing == &user => {}
            Some(existing) => {
                warn!(current = %existing, ignored = %user, "User identity already set for this session");
            }
        }
    }

    /// Session user, if resolved
    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    /// Replace the set with the store's contents
    ///
    /// A failed fetch leaves an empty set. No-op without a user.
    pub async fn load(&mut self, store: &dyn FavoritesStore) {
        let Some(user) = self.user.clone() else {
            debug!("Identity not resolved, skipping favorites fetch");
            return;
        };

        match store.list_favorites(&user).await {
            Ok(ids) => {
                self.ids = ids.into_iter().collect();
                info!(user = %user, count = self.ids.len(), "Loaded favorites");
            }
            Err(e) => {
                warn!(user = %user, error = %e, "Failed to fetch favorites");
                self.ids.clear();
            }
        }
    }

    /// Whether a track is favorited
    pub fn contains(&self, id: &TrackId) -> bool {
        self.ids.contains(id)
    }

    /// Favorited ids
    pub fn ids(&self) -> &HashSet<TrackId> {
        &self.ids
    }

    /// Number of favorites
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no track is favorited
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether a store call for this track is outstanding
    pub fn is_in_flight(&self, id: &TrackId) -> bool {
        self.in_flight.contains(id)
    }

    /// Flip membership locally and hand back the store call to make
    ///
    /// Returns `None` when there is no user, or when the toggle was queued
    /// behind an in-flight one for the same track.
    pub fn begin_toggle(&mut self, id: &TrackId) -> Option<FavoriteRequest> {
        let Some(user) = self.user.clone() else {
            debug!(track_id = %id, "Identity not resolved, ignoring favorite toggle");
            return None;
        };

        if self.in_flight.contains(id) {
            // Queue behind the outstanding call; a second queued toggle cancels the first
            if !self.queued.remove(id) {
                self.queued.insert(id.clone());
            }
            debug!(track_id = %id, queued = self.queued.contains(id), "Favorite toggle queued");
            return None;
        }

        let mutation = if self.ids.contains(id) {
            FavoriteMutation::Remove(id.clone())
        } else {
            FavoriteMutation::Add(id.clone())
        };

        self.in_flight.insert(id.clone());
        let pending = optimistic::begin(&mut self.ids, mutation);
        Some(FavoriteRequest { user, pending })
    }

    /// Settle a store call, rolling back on failure
    ///
    /// Returns the queued follow-up request for the same track, if any.
    pub fn finish_toggle(
        &mut self,
        request: FavoriteRequest,
        outcome: pokoro_core::Result<()>,
    ) -> Option<FavoriteRequest> {
        let id = request.mutation().track_id().clone();

        if let Err(e) = &outcome {
            warn!(track_id = %id, mutation = ?request.mutation(), error = %e, "Favorite update failed, rolling back");
        }
        request.pending.settle(&mut self.ids, &outcome);
        self.in_flight.remove(&id);

        if self.queued.remove(&id) {
            return self.begin_toggle(&id);
        }
        None
    }

    /// Toggle a favorite and wait for the store, including queued follow-ups
    pub async fn toggle(&mut self, store: &dyn FavoritesStore, id: &TrackId) {
        let mut next = self.begin_toggle(id);
        while let Some(request) = next {
            let outcome = request.send(store).await;
            next = self.finish_toggle(request, outcome);
        }
    }
}

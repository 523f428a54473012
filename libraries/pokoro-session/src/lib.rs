//! Pokoro - Session
//!
//! User-facing state around the playback core:
//! - Favorites cache with optimistic updates and rollback
//! - Session identity (host user or persisted guest)
//! - Catalog loading and normalization
//! - [`PlayerSession`], the per-session composition root
//!
//! # Example
//!
//! ```rust
//! use pokoro_core::{Track, TrackId};
//! use pokoro_playback::{ActiveView, AudioDevice, PlaybackConfig, RequestToken};
//! use pokoro_session::PlayerSession;
//!
//! struct NullDevice;
//!
//! impl AudioDevice for NullDevice {
//!     fn load(&mut self, _url: &str, _token: RequestToken) {}
//!     fn play(&mut self, _token: RequestToken) {}
//!     fn pause(&mut self) {}
//!     fn set_position(&mut self, _seconds: f64) {}
//!     fn is_paused(&self) -> bool { true }
//! }
//!
//! let mut session = PlayerSession::new(NullDevice, PlaybackConfig::default());
//! session.set_catalog(vec![Track {
//!     id: TrackId::from("1"),
//!     title: "Song".to_string(),
//!     artist: "Artist".to_string(),
//!     audio_url: "https://cdn.example.com/1.mp3".to_string(),
//!     cover_url: None,
//! }]);
//!
//! // First track is selected but not playing
//! assert_eq!(session.transport().current_track().map(|t| t.title.as_str()), Some("Song"));
//! assert!(!session.transport().is_playing());
//!
//! session.set_view(ActiveView::Favorites);
//! assert!(session.queue().is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
pub mod favorites;
mod identity;
pub mod optimistic;
mod session;

pub use catalog::load_catalog;
pub use favorites::{FavoriteMutation, FavoriteRequest, FavoritesCache};
pub use identity::{FileGuestStore, IdentitySource, SessionIdentity};
pub use optimistic::{Pending, Reversible};
pub use session::{PlayerSession, PremiumStatus, ProfileSummary};

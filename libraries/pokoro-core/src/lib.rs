//! Pokoro Core
//!
//! Platform-agnostic types, collaborator traits, and error handling shared by
//! every Pokoro crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `RawTrack`, `TrackId`, `UserId`
//! - **Collaborator Traits**: `TrackCatalog`, `FavoritesStore`, `HostIdentity`, `GuestIdStore`
//! - **Error Handling**: Unified `PokoroError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use pokoro_core::types::{RawTrack, RawTrackId, Track};
//!
//! let raw = RawTrack {
//!     id: RawTrackId::Number(7),
//!     title: None,
//!     artist: Some("Nadia".to_string()),
//!     audio_url: Some("https://cdn.example.com/7.mp3".to_string()),
//!     cover_url: None,
//! };
//!
//! let track = Track::from(raw);
//! assert_eq!(track.id.as_str(), "7");
//! assert_eq!(track.title, "Unknown title");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{PokoroError, Result};
pub use traits::{FavoritesStore, GuestIdStore, HostIdentity, TrackCatalog};
pub use types::{RawTrack, RawTrackId, Track, TrackId, UserId};

//! Pokoro Supabase Backend
//!
//! REST client for the Supabase project holding the track catalog and the
//! per-user favorites.
//!
//! # Features
//!
//! - **Catalog**: `GET /rest/v1/tracks?select=*`
//! - **Favorites**: list, insert and delete rows of `favorites` keyed by
//!   `(user_id, track_id)`
//! - Implements [`pokoro_core::TrackCatalog`] and [`pokoro_core::FavoritesStore`]
//!
//! # Example
//!
//! ```ignore
//! use pokoro_core::{FavoritesStore, TrackCatalog, UserId};
//! use pokoro_supabase::{SupabaseClient, SupabaseConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SupabaseClient::new(SupabaseConfig::new("https://abcd.supabase.co", "anon-key"))?;
//!
//!     let tracks = client.list_tracks().await?;
//!     let favorites = client.list_favorites(&UserId::guest("abc")).await?;
//!     println!("{} tracks, {} favorites", tracks.len(), favorites.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod store;
mod types;

pub use client::SupabaseClient;
pub use error::{Result, SupabaseError};
pub use types::SupabaseConfig;

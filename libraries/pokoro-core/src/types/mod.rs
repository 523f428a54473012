//! Domain types for Pokoro

mod ids;
mod track;

pub use ids::{TrackId, UserId};
pub use track::{RawTrack, RawTrackId, Track, UNKNOWN_ARTIST, UNKNOWN_TITLE};

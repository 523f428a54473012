//! Error types for playback management

use pokoro_core::TrackId;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Track id is not part of the loaded catalog
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Track has no media URL to hand to the device
    #[error("Track {0} has no audio URL")]
    MissingAudioUrl(TrackId),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

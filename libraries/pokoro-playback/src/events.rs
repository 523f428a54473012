//! Playback Events
//!
//! Event-based communication for UI synchronization. Events are queued by
//! the transport controller and drained by the UI layer:
//! - State changes (loading/playing/paused/idle)
//! - Track changes
//! - Position and duration updates
//! - Shuffle/repeat changes
//! - Non-fatal warnings (playback blocked, unknown track)

use crate::types::{PlaybackState, RepeatMode};
use pokoro_core::TrackId;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport state changed
    StateChanged {
        /// The new state
        state: PlaybackState,
    },

    /// Current track changed
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Position update, in seconds
    PositionUpdate {
        /// Current playback position
        position_secs: f64,
        /// Total track duration (0 while unknown)
        duration_secs: f64,
    },

    /// Queue ran out with repeat off
    QueueFinished {
        /// Track that stays displayed
        track_id: Option<TrackId>,
    },

    /// Shuffle toggled
    ShuffleChanged {
        /// New shuffle flag
        enabled: bool,
    },

    /// Repeat mode changed
    RepeatChanged {
        /// New mode
        mode: RepeatMode,
    },

    /// Something failed but playback can continue
    Warning {
        /// Human-readable message
        message: String,
    },
}

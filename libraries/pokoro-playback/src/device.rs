//! Platform-agnostic audio output device
//!
//! Abstracts the media element (or native player) that actually produces
//! sound. The device is driven by commands and reports back through
//! [`DeviceEvent`]s that the host feeds into
//! [`TransportController::handle_device_event`](crate::TransportController::handle_device_event).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one load/play attempt
///
/// Tokens increase monotonically. The device tags every event with the
/// token of the source it belongs to, so completions for a superseded
/// source can be told apart from live ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Wrap a raw token value
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw token value
    pub fn value(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Audio output device
///
/// Commands are fire-and-forget. Outcomes arrive later as events.
pub trait AudioDevice {
    /// Swap in a new media source
    ///
    /// The device reports [`DeviceEventKind::Loaded`] once the source is
    /// attached and ready to accept a play request.
    fn load(&mut self, url: &str, token: RequestToken);

    /// Request playback of the loaded source
    ///
    /// Reports [`DeviceEventKind::PlayResolved`] or
    /// [`DeviceEventKind::PlayRejected`] (e.g. blocked by autoplay policy).
    fn play(&mut self, token: RequestToken);

    /// Pause playback. Assumed never to fail.
    fn pause(&mut self);

    /// Move the playback position
    fn set_position(&mut self, seconds: f64);

    /// Whether the device is currently paused
    fn is_paused(&self) -> bool;
}

/// Event reported by the device for the source loaded with `token`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceEvent {
    pub token: RequestToken,
    pub kind: DeviceEventKind,
}

impl DeviceEvent {
    /// Create an event for a source
    pub fn new(token: RequestToken, kind: DeviceEventKind) -> Self {
        Self { token, kind }
    }
}

/// Kinds of device events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeviceEventKind {
    /// Source attached, ready for play
    Loaded,

    /// A play request succeeded
    PlayResolved,

    /// A play request was refused
    PlayRejected {
        /// Reason reported by the device
        reason: String,
    },

    /// Playback started
    Playing,

    /// Playback paused
    Paused,

    /// Position report
    TimeUpdate {
        /// Position in seconds
        seconds: f64,
    },

    /// Duration became known
    DurationKnown {
        /// Duration in seconds
        seconds: f64,
    },

    /// Playback reached the end of the source
    Ended,
}

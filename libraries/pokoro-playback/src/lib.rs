//! Pokoro - Playback Management
//!
//! Platform-agnostic queue and transport logic for the Pokoro player.
//!
//! This crate provides:
//! - Queue resolution (catalog + search + view + favorites)
//! - Next/previous policy (repeat off/all/one, shuffle)
//! - Transport control (load, play/pause, seek, device events)
//! - Event queue for UI synchronization
//!
//! # Architecture
//!
//! `pokoro-playback` performs no I/O of its own:
//! - The audio output is abstracted by [`AudioDevice`]
//! - Device outcomes are fed back through [`TransportController::handle_device_event`]
//! - Stale outcomes are told apart by [`RequestToken`]
//!
//! # Example
//!
//! ```rust
//! use pokoro_core::{Track, TrackId};
//! use pokoro_playback::{
//!     resolve_queue, ActiveView, AudioDevice, DeviceEvent, DeviceEventKind, PlaybackConfig,
//!     PlaybackState, RequestToken, TransportController,
//! };
//! use std::collections::HashSet;
//!
//! #[derive(Default)]
//! struct SilentDevice {
//!     paused: bool,
//! }
//!
//! impl AudioDevice for SilentDevice {
//!     fn load(&mut self, _url: &str, _token: RequestToken) { self.paused = true; }
//!     fn play(&mut self, _token: RequestToken) { self.paused = false; }
//!     fn pause(&mut self) { self.paused = true; }
//!     fn set_position(&mut self, _seconds: f64) {}
//!     fn is_paused(&self) -> bool { self.paused }
//! }
//!
//! let catalog = vec![Track {
//!     id: TrackId::from("1"),
//!     title: "Song".to_string(),
//!     artist: "Artist".to_string(),
//!     audio_url: "https://cdn.example.com/1.mp3".to_string(),
//!     cover_url: None,
//! }];
//!
//! let mut transport = TransportController::new(SilentDevice::default(), PlaybackConfig::default());
//! transport.set_catalog(catalog.clone());
//! transport.set_queue(resolve_queue(&catalog, "", ActiveView::Home, &HashSet::new()));
//!
//! transport.play_track(&TrackId::from("1")).unwrap();
//! let token = transport.live_token().unwrap();
//! transport.handle_device_event(DeviceEvent::new(token, DeviceEventKind::Loaded));
//! transport.handle_device_event(DeviceEvent::new(token, DeviceEventKind::PlayResolved));
//! assert_eq!(transport.state(), PlaybackState::Playing);
//! ```

mod device;
mod error;
mod events;
pub mod policy;
pub mod queue;
mod time;
mod transport;
pub mod types;

// Public exports
pub use device::{AudioDevice, DeviceEvent, DeviceEventKind, RequestToken};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use policy::{decide_next, decide_previous, Decision};
pub use queue::{index_of, resolve_queue, ActiveView};
pub use time::format_time;
pub use transport::TransportController;
pub use types::{PlaybackConfig, PlaybackSession, PlaybackState, RepeatMode};

//! Transport controller - core orchestration
//!
//! Owns the playback session and the audio device, turns user actions into
//! device commands and device events into session updates.

use crate::{
    device::{AudioDevice, DeviceEvent, DeviceEventKind, RequestToken},
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    policy::{decide_next, decide_previous, Decision},
    queue::index_of,
    types::{PlaybackConfig, PlaybackSession, PlaybackState, RepeatMode},
};
use pokoro_core::{Track, TrackId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

/// Source currently handed to the device
#[derive(Debug, Clone)]
struct LiveSource {
    token: RequestToken,
    track_id: TrackId,
    /// Device reported the source attached
    loaded: bool,
    /// Play should be requested as soon as the source is attached
    play_on_load: bool,
}

/// Central transport control
///
/// State machine:
/// ```text
/// Idle ──play_track──▶ Loading ──PlayResolved──▶ Playing ⇄ Paused
///                        ▲   └──PlayRejected──▶ Paused
///                        └──── Ended (next) ◀── Playing
///                                   └─ queue exhausted ─▶ Idle
/// ```
///
/// The device is owned exclusively by the controller. Every load mints a new
/// [`RequestToken`]; device events carrying any other token are discarded.
pub struct TransportController<D: AudioDevice> {
    device: D,
    state: PlaybackState,
    session: PlaybackSession,

    // Track lists
    catalog: Vec<Track>,
    queue: Vec<Track>,

    source: Option<LiveSource>,
    last_token: RequestToken,
    rng: StdRng,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<D: AudioDevice> TransportController<D> {
    /// Create a new controller around a device
    pub fn new(device: D, config: PlaybackConfig) -> Self {
        Self::with_rng(device, config, StdRng::from_entropy())
    }

    /// Create a controller with a given random source for shuffle
    pub fn with_rng(device: D, config: PlaybackConfig, rng: StdRng) -> Self {
        Self {
            device,
            state: PlaybackState::Idle,
            session: PlaybackSession {
                current_track_id: None,
                is_playing: false,
                position_seconds: 0.0,
                duration_seconds: 0.0,
                shuffle_enabled: config.shuffle,
                repeat_mode: config.repeat,
            },
            catalog: Vec::new(),
            queue: Vec::new(),
            source: None,
            last_token: RequestToken::new(0),
            rng,
            pending_events: Vec::new(),
        }
    }

    // ===== Track lists =====

    /// Replace the catalog used to look up media URLs
    pub fn set_catalog(&mut self, tracks: Vec<Track>) {
        self.catalog = tracks;
    }

    /// Install the resolved queue used for next/previous
    pub fn set_queue(&mut self, queue: Vec<Track>) {
        self.queue = queue;
    }

    /// Current queue
    pub fn queue(&self) -> &[Track] {
        &self.queue
    }

    /// Index of the current track in the queue (`None` if absent)
    pub fn current_index(&self) -> Option<usize> {
        self.session
            .current_track_id
            .as_ref()
            .and_then(|id| index_of(&self.queue, id))
    }

    // ===== Playback Control =====

    /// Load a track and start playing it once the device has attached it
    ///
    /// Entered on every call, including repeat-one restarts. A catalog track
    /// without a media URL still becomes current but stays paused, with a
    /// warning event. Only ids missing from the catalog are an error.
    pub fn play_track(&mut self, id: &TrackId) -> Result<()> {
        let url = match self.lookup(id) {
            Some(track) if !track.audio_url.is_empty() => track.audio_url.clone(),
            Some(_) => {
                self.park_unplayable(id.clone());
                return Ok(());
            }
            None => {
                warn!(track_id = %id, "Track not in catalog");
                return Err(PlaybackError::TrackNotFound(id.clone()));
            }
        };

        let token = self.last_token.next();
        self.last_token = token;

        self.change_track(id.clone());
        self.source = Some(LiveSource {
            token,
            track_id: id.clone(),
            loaded: false,
            play_on_load: true,
        });
        self.set_state(PlaybackState::Loading);

        debug!(track_id = %id, token = %token, "Loading track");
        self.device.load(&url, token);
        Ok(())
    }

    /// Make a track current without loading it
    ///
    /// Used for the initial selection after the catalog arrives. The device
    /// is not touched; the next play/pause toggle loads the track.
    pub fn select_track(&mut self, id: &TrackId) -> Result<()> {
        if self.lookup(id).is_none() {
            return Err(PlaybackError::TrackNotFound(id.clone()));
        }
        self.change_track(id.clone());
        Ok(())
    }

    /// Play if paused, pause if playing
    pub fn toggle_play_pause(&mut self) {
        let Some(current) = self.session.current_track_id.clone() else {
            debug!("No current track, ignoring play/pause");
            return;
        };

        let live = self
            .source
            .as_ref()
            .filter(|s| s.track_id == current)
            .map(|s| (s.token, s.loaded));

        match live {
            None => self.play_or_warn(&current),
            Some((_, false)) => {
                // Source still attaching: flip the pending play request
                let play_on_load = match self.source.as_mut() {
                    Some(source) => {
                        source.play_on_load = !source.play_on_load;
                        source.play_on_load
                    }
                    None => return,
                };
                if play_on_load {
                    self.set_state(PlaybackState::Loading);
                } else {
                    self.session.is_playing = false;
                    self.set_state(PlaybackState::Paused);
                }
            }
            Some((token, true)) => {
                if self.device.is_paused() {
                    debug!(token = %token, "Requesting play");
                    self.device.play(token);
                } else {
                    self.device.pause();
                    self.session.is_playing = false;
                    self.set_state(PlaybackState::Paused);
                }
            }
        }
    }

    /// Skip to next track per the playback policy
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        let decision = decide_next(
            &self.queue,
            self.session.current_track_id.as_ref(),
            self.session.repeat_mode,
            self.session.shuffle_enabled,
            &mut self.rng,
        );
        self.apply_decision(decision);
    }

    /// Go to previous track per the playback policy
    pub fn previous(&mut self) {
        let decision = decide_previous(
            &self.queue,
            self.session.current_track_id.as_ref(),
            self.session.repeat_mode,
            self.session.shuffle_enabled,
            &mut self.rng,
        );
        self.apply_decision(decision);
    }

    fn apply_decision(&mut self, decision: Decision) {
        match decision {
            Decision::NoOp => debug!("Queue is empty, ignoring navigation"),
            Decision::Play(id) => self.play_or_warn(&id),
            Decision::Stop => self.stop_at_end(),
        }
    }

    /// Queue exhausted: stop but keep the current track displayed
    fn stop_at_end(&mut self) {
        info!(track_id = ?self.session.current_track_id, "Reached end of queue");

        let loaded = self.source.as_ref().is_some_and(|s| s.loaded);
        if loaded && !self.device.is_paused() {
            self.device.pause();
        }
        if let Some(source) = self.source.as_mut() {
            source.play_on_load = false;
        }

        self.session.is_playing = false;
        self.set_state(PlaybackState::Idle);
        self.pending_events.push(PlaybackEvent::QueueFinished {
            track_id: self.session.current_track_id.clone(),
        });
    }

    /// Stop driving the device at the end of the app session
    pub fn shutdown(&mut self) {
        let loaded = self.source.as_ref().is_some_and(|s| s.loaded);
        if loaded && !self.device.is_paused() {
            self.device.pause();
        }
        self.source = None;
        self.session.is_playing = false;
        self.set_state(PlaybackState::Idle);
        debug!("Transport shut down");
    }

    // ===== Seek =====

    /// Seek to a fraction of the current track
    ///
    /// No-op while the duration is unknown or no source is attached.
    pub fn seek_to(&mut self, fraction: f64) {
        let duration = self.session.duration_seconds;
        let loaded = self.source.as_ref().is_some_and(|s| s.loaded);
        if duration <= 0.0 || !loaded || fraction.is_nan() {
            debug!(fraction, duration, loaded, "Ignoring seek");
            return;
        }

        let target = (fraction * duration).clamp(0.0, duration);
        self.device.set_position(target);
        self.session.position_seconds = target;
        self.emit_position_update();
    }

    // ===== Shuffle / Repeat =====

    /// Set shuffle flag
    pub fn set_shuffle(&mut self, enabled: bool) {
        if self.session.shuffle_enabled != enabled {
            self.session.shuffle_enabled = enabled;
            self.pending_events
                .push(PlaybackEvent::ShuffleChanged { enabled });
        }
    }

    /// Flip shuffle flag
    pub fn toggle_shuffle(&mut self) {
        self.set_shuffle(!self.session.shuffle_enabled);
    }

    /// Set repeat mode
    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        if self.session.repeat_mode != mode {
            self.session.repeat_mode = mode;
            self.pending_events.push(PlaybackEvent::RepeatChanged { mode });
        }
    }

    /// Advance repeat mode off → all → one → off
    pub fn cycle_repeat_mode(&mut self) -> RepeatMode {
        let mode = self.session.repeat_mode.cycle();
        self.set_repeat_mode(mode);
        mode
    }

    // ===== Device events =====

    /// Apply an event reported by the device
    ///
    /// Events are applied in arrival order. Events for a superseded source
    /// are dropped.
    pub fn handle_device_event(&mut self, event: DeviceEvent) {
        let live = self.source.as_ref().map(|s| s.token);
        if live != Some(event.token) {
            debug!(token = %event.token, live = ?live, kind = ?event.kind, "Discarding stale device event");
            return;
        }

        match event.kind {
            DeviceEventKind::Loaded => {
                let play_on_load = match self.source.as_mut() {
                    Some(source) => {
                        source.loaded = true;
                        source.play_on_load
                    }
                    None => return,
                };
                if play_on_load {
                    debug!(token = %event.token, "Source attached, requesting play");
                    self.device.play(event.token);
                }
            }
            DeviceEventKind::PlayResolved => {
                self.clear_play_on_load();
                self.session.is_playing = true;
                self.set_state(PlaybackState::Playing);
            }
            DeviceEventKind::PlayRejected { reason } => {
                self.clear_play_on_load();
                self.session.is_playing = false;
                self.set_state(PlaybackState::Paused);
                self.warn(format!("Playback blocked: {}", reason));
            }
            DeviceEventKind::Playing => {
                self.session.is_playing = true;
                self.set_state(PlaybackState::Playing);
            }
            DeviceEventKind::Paused => {
                self.session.is_playing = false;
                if self.state == PlaybackState::Playing {
                    self.set_state(PlaybackState::Paused);
                }
            }
            DeviceEventKind::TimeUpdate { seconds } => {
                if seconds.is_finite() {
                    self.session.position_seconds = seconds.max(0.0);
                    self.emit_position_update();
                }
            }
            DeviceEventKind::DurationKnown { seconds } => {
                self.session.duration_seconds = if seconds.is_finite() && seconds > 0.0 {
                    seconds
                } else {
                    0.0
                };
                self.emit_position_update();
            }
            DeviceEventKind::Ended => {
                debug!(track_id = ?self.session.current_track_id, "Track ended");
                self.session.is_playing = false;
                self.set_state(PlaybackState::Paused);
                self.next();
            }
        }
    }

    // ===== State Queries =====

    /// Current transport state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Snapshot of the playback session
    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    /// Current track metadata, if it is still in the catalog or queue
    pub fn current_track(&self) -> Option<&Track> {
        self.session
            .current_track_id
            .as_ref()
            .and_then(|id| self.lookup(id))
    }

    /// Whether audio is playing
    pub fn is_playing(&self) -> bool {
        self.session.is_playing
    }

    /// Token of the source currently handed to the device
    pub fn live_token(&self) -> Option<RequestToken> {
        self.source.as_ref().map(|s| s.token)
    }

    // ===== Events =====

    /// Drain all pending events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn lookup(&self, id: &TrackId) -> Option<&Track> {
        self.catalog
            .iter()
            .chain(self.queue.iter())
            .find(|t| &t.id == id)
    }

    fn play_or_warn(&mut self, id: &TrackId) {
        if let Err(e) = self.play_track(id) {
            self.pending_events.push(PlaybackEvent::Warning {
                message: e.to_string(),
            });
        }
    }

    /// Current track has no playable source: drop the live one and pause
    fn park_unplayable(&mut self, id: TrackId) {
        let loaded = self.source.as_ref().is_some_and(|s| s.loaded);
        if loaded && !self.device.is_paused() {
            self.device.pause();
        }
        self.source = None;

        self.change_track(id.clone());
        self.session.is_playing = false;
        self.set_state(PlaybackState::Paused);

        let error = PlaybackError::MissingAudioUrl(id.clone());
        warn!(track_id = %id, "Track has no audio URL");
        self.pending_events.push(PlaybackEvent::Warning {
            message: error.to_string(),
        });
    }

    fn change_track(&mut self, id: TrackId) {
        let previous = self.session.current_track_id.replace(id.clone());
        self.session.position_seconds = 0.0;
        self.session.duration_seconds = 0.0;

        if previous.as_ref() != Some(&id) {
            self.pending_events.push(PlaybackEvent::TrackChanged {
                track_id: id,
                previous_track_id: previous,
            });
        }
    }

    fn clear_play_on_load(&mut self) {
        if let Some(source) = self.source.as_mut() {
            source.play_on_load = false;
        }
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.pending_events
                .push(PlaybackEvent::StateChanged { state });
        }
    }

    fn warn(&mut self, message: String) {
        warn!(track_id = ?self.session.current_track_id, "{}", message);
        self.pending_events.push(PlaybackEvent::Warning { message });
    }

    fn emit_position_update(&mut self) {
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            position_secs: self.session.position_seconds,
            duration_secs: self.session.duration_seconds,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Command {
        Load(String, RequestToken),
        Play(RequestToken),
        Pause,
        SetPosition(f64),
    }

    /// Records commands; paused unless told otherwise
    #[derive(Clone, Default)]
    struct RecordingDevice {
        log: Rc<RefCell<Vec<Command>>>,
        paused: Rc<RefCell<bool>>,
    }

    impl AudioDevice for RecordingDevice {
        fn load(&mut self, url: &str, token: RequestToken) {
            *self.paused.borrow_mut() = true;
            self.log.borrow_mut().push(Command::Load(url.to_string(), token));
        }

        fn play(&mut self, token: RequestToken) {
            *self.paused.borrow_mut() = false;
            self.log.borrow_mut().push(Command::Play(token));
        }

        fn pause(&mut self) {
            *self.paused.borrow_mut() = true;
            self.log.borrow_mut().push(Command::Pause);
        }

        fn set_position(&mut self, seconds: f64) {
            self.log.borrow_mut().push(Command::SetPosition(seconds));
        }

        fn is_paused(&self) -> bool {
            *self.paused.borrow()
        }
    }

    fn create_test_track(id: &str) -> Track {
        Track {
            id: TrackId::from(id),
            title: format!("Song {}", id),
            artist: "Test Artist".to_string(),
            audio_url: format!("https://cdn.example.com/{}.mp3", id),
            cover_url: None,
        }
    }

    fn controller(ids: &[&str]) -> (TransportController<RecordingDevice>, RecordingDevice) {
        let device = RecordingDevice::default();
        let mut controller = TransportController::with_rng(
            device.clone(),
            PlaybackConfig::default(),
            StdRng::seed_from_u64(1),
        );
        let tracks: Vec<Track> = ids.iter().map(|id| create_test_track(id)).collect();
        controller.set_catalog(tracks.clone());
        controller.set_queue(tracks);
        (controller, device)
    }

    fn start(controller: &mut TransportController<RecordingDevice>, id: &str) -> RequestToken {
        controller.play_track(&TrackId::from(id)).unwrap();
        let token = controller.live_token().unwrap();
        controller.handle_device_event(DeviceEvent::new(token, DeviceEventKind::Loaded));
        controller.handle_device_event(DeviceEvent::new(token, DeviceEventKind::PlayResolved));
        token
    }

    #[test]
    fn play_track_loads_then_plays_after_attach() {
        let (mut controller, device) = controller(&["a", "b"]);

        controller.play_track(&TrackId::from("a")).unwrap();
        assert_eq!(controller.state(), PlaybackState::Loading);
        let token = controller.live_token().unwrap();

        // Play is not requested until the source is attached
        assert_eq!(
            *device.log.borrow(),
            vec![Command::Load("https://cdn.example.com/a.mp3".to_string(), token)]
        );

        controller.handle_device_event(DeviceEvent::new(token, DeviceEventKind::Loaded));
        assert_eq!(device.log.borrow().last(), Some(&Command::Play(token)));

        controller.handle_device_event(DeviceEvent::new(token, DeviceEventKind::PlayResolved));
        assert!(controller.is_playing());
        assert_eq!(controller.state(), PlaybackState::Playing);
    }

    #[test]
    fn rejected_play_leaves_paused_with_warning() {
        let (mut controller, _device) = controller(&["a"]);
        controller.play_track(&TrackId::from("a")).unwrap();
        let token = controller.live_token().unwrap();
        controller.handle_device_event(DeviceEvent::new(token, DeviceEventKind::Loaded));
        controller.drain_events();

        controller.handle_device_event(DeviceEvent::new(
            token,
            DeviceEventKind::PlayRejected {
                reason: "autoplay blocked".to_string(),
            },
        ));

        assert!(!controller.is_playing());
        assert_eq!(controller.state(), PlaybackState::Paused);
        let events = controller.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, PlaybackEvent::Warning { message } if message.contains("autoplay"))));
    }

    #[test]
    fn stale_play_outcome_is_ignored() {
        let (mut controller, _device) = controller(&["a", "b"]);
        controller.play_track(&TrackId::from("a")).unwrap();
        let old = controller.live_token().unwrap();
        controller.play_track(&TrackId::from("b")).unwrap();

        controller.handle_device_event(DeviceEvent::new(old, DeviceEventKind::PlayResolved));
        assert!(!controller.is_playing());
        assert_eq!(controller.state(), PlaybackState::Loading);
        assert_eq!(
            controller.session().current_track_id,
            Some(TrackId::from("b"))
        );
    }

    #[test]
    fn stale_time_update_is_discarded() {
        let (mut controller, _device) = controller(&["a", "b"]);
        let old = start(&mut controller, "a");
        start(&mut controller, "b");

        controller.handle_device_event(DeviceEvent::new(
            old,
            DeviceEventKind::TimeUpdate { seconds: 42.0 },
        ));
        assert_eq!(controller.session().position_seconds, 0.0);
    }

    #[test]
    fn toggle_pauses_synchronously() {
        let (mut controller, device) = controller(&["a"]);
        start(&mut controller, "a");

        controller.toggle_play_pause();
        assert!(!controller.is_playing());
        assert_eq!(controller.state(), PlaybackState::Paused);
        assert_eq!(device.log.borrow().last(), Some(&Command::Pause));
    }

    #[test]
    fn toggle_resumes_paused_source() {
        let (mut controller, device) = controller(&["a"]);
        let token = start(&mut controller, "a");
        controller.toggle_play_pause();

        controller.toggle_play_pause();
        assert_eq!(device.log.borrow().last(), Some(&Command::Play(token)));
        controller.handle_device_event(DeviceEvent::new(token, DeviceEventKind::PlayResolved));
        assert!(controller.is_playing());
    }

    #[test]
    fn toggle_on_selected_but_unloaded_track_loads_it() {
        let (mut controller, device) = controller(&["a"]);
        controller.select_track(&TrackId::from("a")).unwrap();
        assert!(device.log.borrow().is_empty());

        controller.toggle_play_pause();
        assert_eq!(controller.state(), PlaybackState::Loading);
        assert!(matches!(device.log.borrow()[0], Command::Load(_, _)));
    }

    #[test]
    fn toggle_while_loading_cancels_pending_play() {
        let (mut controller, device) = controller(&["a"]);
        controller.play_track(&TrackId::from("a")).unwrap();
        let token = controller.live_token().unwrap();

        controller.toggle_play_pause();
        assert_eq!(controller.state(), PlaybackState::Paused);

        controller.handle_device_event(DeviceEvent::new(token, DeviceEventKind::Loaded));
        assert!(!device.log.borrow().contains(&Command::Play(token)));
    }

    #[test]
    fn toggle_without_current_track_is_noop() {
        let (mut controller, device) = controller(&["a"]);
        controller.toggle_play_pause();
        assert!(device.log.borrow().is_empty());
        assert_eq!(controller.state(), PlaybackState::Idle);
    }

    #[test]
    fn seek_sets_position_optimistically() {
        let (mut controller, device) = controller(&["a"]);
        let token = start(&mut controller, "a");
        controller.handle_device_event(DeviceEvent::new(
            token,
            DeviceEventKind::DurationKnown { seconds: 200.0 },
        ));

        controller.seek_to(0.5);
        assert_eq!(device.log.borrow().last(), Some(&Command::SetPosition(100.0)));
        assert_eq!(controller.session().position_seconds, 100.0);
    }

    #[test]
    fn seek_clamps_fraction() {
        let (mut controller, device) = controller(&["a"]);
        let token = start(&mut controller, "a");
        controller.handle_device_event(DeviceEvent::new(
            token,
            DeviceEventKind::DurationKnown { seconds: 120.0 },
        ));

        controller.seek_to(1.7);
        assert_eq!(device.log.borrow().last(), Some(&Command::SetPosition(120.0)));
        controller.seek_to(-0.2);
        assert_eq!(device.log.borrow().last(), Some(&Command::SetPosition(0.0)));
    }

    #[test]
    fn seek_without_duration_is_noop() {
        let (mut controller, device) = controller(&["a"]);
        start(&mut controller, "a");
        let before = device.log.borrow().len();

        controller.seek_to(0.5);
        assert_eq!(device.log.borrow().len(), before);
        assert_eq!(controller.session().position_seconds, 0.0);
    }

    #[test]
    fn ended_advances_to_next() {
        let (mut controller, _device) = controller(&["a", "b"]);
        let token = start(&mut controller, "a");

        controller.handle_device_event(DeviceEvent::new(token, DeviceEventKind::Ended));
        assert_eq!(
            controller.session().current_track_id,
            Some(TrackId::from("b"))
        );
        assert_eq!(controller.state(), PlaybackState::Loading);
    }

    #[test]
    fn ended_on_last_track_goes_idle_keeping_track() {
        let (mut controller, _device) = controller(&["a", "b"]);
        let token = start(&mut controller, "b");

        controller.handle_device_event(DeviceEvent::new(token, DeviceEventKind::Ended));
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(!controller.is_playing());
        assert_eq!(
            controller.session().current_track_id,
            Some(TrackId::from("b"))
        );
    }

    #[test]
    fn repeat_one_restart_reenters_loading_with_new_token() {
        let (mut controller, _device) = controller(&["a", "b"]);
        controller.set_repeat_mode(RepeatMode::One);
        let token = start(&mut controller, "a");

        controller.handle_device_event(DeviceEvent::new(token, DeviceEventKind::Ended));
        assert_eq!(controller.state(), PlaybackState::Loading);
        assert_ne!(controller.live_token(), Some(token));
        assert_eq!(
            controller.session().current_track_id,
            Some(TrackId::from("a"))
        );
    }

    #[test]
    fn next_on_empty_queue_changes_nothing() {
        let (mut controller, device) = controller(&["a"]);
        let token = start(&mut controller, "a");
        controller.set_queue(Vec::new());
        controller.drain_events();

        controller.next();
        controller.previous();
        assert_eq!(controller.live_token(), Some(token));
        assert!(controller.is_playing());
        assert!(!controller.has_pending_events());
        assert_eq!(device.log.borrow().last(), Some(&Command::Play(token)));
    }

    #[test]
    fn unknown_track_is_rejected() {
        let (mut controller, _device) = controller(&["a"]);
        let result = controller.play_track(&TrackId::from("zzz"));
        assert!(matches!(result, Err(PlaybackError::TrackNotFound(_))));
        assert_eq!(controller.state(), PlaybackState::Idle);
    }

    #[test]
    fn track_without_url_becomes_current_but_paused() {
        let (mut controller, device) = controller(&[]);
        let mut track = create_test_track("silent");
        track.audio_url.clear();
        controller.set_catalog(vec![track]);

        assert!(controller.play_track(&TrackId::from("silent")).is_ok());
        assert_eq!(
            controller.session().current_track_id,
            Some(TrackId::from("silent"))
        );
        assert_eq!(controller.state(), PlaybackState::Paused);
        assert!(!controller.is_playing());
        assert!(controller.live_token().is_none());
        assert!(device.log.borrow().is_empty());
        assert!(controller
            .drain_events()
            .iter()
            .any(|e| matches!(e, PlaybackEvent::Warning { message } if message.contains("no audio URL"))));
    }

    #[test]
    fn shuffle_and_repeat_setters_emit_once() {
        let (mut controller, device) = controller(&["a"]);
        controller.set_shuffle(true);
        controller.set_shuffle(true);
        assert_eq!(controller.cycle_repeat_mode(), RepeatMode::All);

        let events = controller.drain_events();
        assert_eq!(
            events,
            vec![
                PlaybackEvent::ShuffleChanged { enabled: true },
                PlaybackEvent::RepeatChanged {
                    mode: RepeatMode::All
                },
            ]
        );
        assert!(device.log.borrow().is_empty());
    }

    #[test]
    fn shutdown_pauses_device() {
        let (mut controller, device) = controller(&["a"]);
        start(&mut controller, "a");

        controller.shutdown();
        assert_eq!(device.log.borrow().last(), Some(&Command::Pause));
        assert_eq!(controller.live_token(), None);
        assert_eq!(controller.state(), PlaybackState::Idle);
    }
}

/// Audio device for a terminal session
///
/// The CLI browses and curates; it never renders audio. Commands are only
/// logged and the device always reports itself paused.
use pokoro_playback::{AudioDevice, RequestToken};
use tracing::debug;

#[derive(Debug, Default)]
pub struct HeadlessDevice;

impl AudioDevice for HeadlessDevice {
    fn load(&mut self, url: &str, token: RequestToken) {
        debug!(url = %url, token = %token, "Headless device ignoring load");
    }

    fn play(&mut self, token: RequestToken) {
        debug!(token = %token, "Headless device ignoring play");
    }

    fn pause(&mut self) {}

    fn set_position(&mut self, _seconds: f64) {}

    fn is_paused(&self) -> bool {
        true
    }
}

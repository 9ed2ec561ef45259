//! Input tracking backend implementations.
//!
//! Each backend provides a different way to obtain recorded events.

use guirecord_common::error::RecorderResult;
use guirecord_event_model::RecordedEvent;

use crate::InputBackend;

#[cfg(target_os = "linux")]
mod live;
#[cfg(target_os = "linux")]
mod keymap;

#[cfg(target_os = "linux")]
pub use self::live::EvdevBackend;

/// Replays a fixed list of events, then reports itself exhausted.
pub struct StubBackend {
    events: Vec<RecordedEvent>,
    index: usize,
}

impl StubBackend {
    /// Create a stub backend with pre-loaded events.
    pub fn new(events: Vec<RecordedEvent>) -> Self {
        Self { events, index: 0 }
    }

    /// Create an empty stub that never produces events.
    pub fn empty() -> Self {
        Self {
            events: vec![],
            index: 0,
        }
    }
}

impl InputBackend for StubBackend {
    fn poll(&mut self) -> RecorderResult<Option<RecordedEvent>> {
        if self.index < self.events.len() {
            let event = self.events[self.index].clone();
            self.index += 1;
            Ok(Some(event))
        } else {
            Ok(None)
        }
    }

    fn name(&self) -> &str {
        "stub"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn is_exhausted(&self) -> bool {
        self.index >= self.events.len()
    }
}

/// Detect the best available live backend for the current system.
#[cfg(target_os = "linux")]
pub fn detect_best_backend(
    screen_width: u32,
    screen_height: u32,
) -> RecorderResult<Box<dyn InputBackend>> {
    let backend = EvdevBackend::open(screen_width, screen_height)?;
    if !backend.is_available() {
        return Err(guirecord_common::error::RecorderError::unsupported(
            "Input devices disconnected before recording started",
        ));
    }
    tracing::info!(devices = backend.device_count(), "Using evdev backend");
    Ok(Box::new(backend))
}

/// Detect the best available live backend for the current system.
#[cfg(not(target_os = "linux"))]
pub fn detect_best_backend(
    _screen_width: u32,
    _screen_height: u32,
) -> RecorderResult<Box<dyn InputBackend>> {
    Err(guirecord_common::error::RecorderError::unsupported(
        "Live input capture is only implemented for Linux; use `translate` with an event log",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use guirecord_event_model::ButtonState;

    #[test]
    fn test_stub_replays_then_exhausts() {
        let mut backend = StubBackend::new(vec![
            RecordedEvent::key(0, 0x61, ButtonState::Down),
            RecordedEvent::key(5, 0x61, ButtonState::Up),
        ]);
        assert!(!backend.is_exhausted());
        assert!(backend.poll().unwrap().is_some());
        assert!(backend.poll().unwrap().is_some());
        assert!(backend.poll().unwrap().is_none());
        assert!(backend.is_exhausted());
    }

    #[test]
    fn test_empty_stub_is_exhausted() {
        let backend = StubBackend::empty();
        assert!(backend.is_exhausted());
        assert_eq!(backend.name(), "stub");
    }
}

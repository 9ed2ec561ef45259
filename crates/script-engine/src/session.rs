//! Recording session: routes each event to the right translator.
//!
//! A session starts in [`SessionState::Recording`] and moves to
//! [`SessionState::Stopped`] when the exit key arrives or the caller
//! finishes it. Once stopped, further events produce no output.

use guirecord_common::config::{RecorderConfig, KEY_BUFFER_CAPACITY};
use guirecord_common::error::{RecorderError, RecorderResult};
use guirecord_event_model::{ButtonState, EventKind, KeySym, RecordedEvent};

use crate::delay::DelayEncoder;
use crate::key::{KeyBuffer, KeyOutcome, KeyPolicy, KeyTranslator};
use crate::keys::{KeyResolver, KeyTable};
use crate::pointer::{PointerInput, PointerTranslator};
use crate::sink::ScriptSink;

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Recording,
    Stopped,
}

/// An event split by the translator that handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventClass {
    Key { key: KeySym, state: ButtonState },
    Pointer(PointerInput),
}

/// Route an event to the key path or the pointer path.
pub fn classify(event: &RecordedEvent) -> EventClass {
    match event.kind {
        EventKind::Key { key, state } => EventClass::Key { key, state },
        EventKind::MouseMove { x, y } => EventClass::Pointer(PointerInput::Move { x, y }),
        EventKind::MouseButton { button, state } => {
            EventClass::Pointer(PointerInput::Button { button, state })
        }
    }
}

/// State for one recording, from first event to exit key.
pub struct Session {
    resolver: Box<dyn KeyResolver>,
    keys: KeyTranslator,
    pointer: PointerTranslator,
    delays: DelayEncoder,
    last_event: Option<RecordedEvent>,
    state: SessionState,
    finished: bool,
    events_seen: u64,
}

impl Session {
    /// Build a session using the built-in key table.
    pub fn new(config: &RecorderConfig) -> RecorderResult<Self> {
        Self::with_resolver(config, Box::new(KeyTable::new()))
    }

    /// Build a session around a custom key resolver.
    ///
    /// Fails if the configuration is invalid or the exit key cannot be
    /// resolved.
    pub fn with_resolver(
        config: &RecorderConfig,
        resolver: Box<dyn KeyResolver>,
    ) -> RecorderResult<Self> {
        config.validate()?;
        let exit_key = resolver.exit_key_symbol(&config.exit_key).ok_or_else(|| {
            RecorderError::config(format!("Invalid exit key defined: '{}'", config.exit_key))
        })?;

        let keys = KeyTranslator::new(KeyPolicy {
            exit_key,
            flush_threshold: config.key_buffer_threshold,
            gap_flush_ms: config.key_gap_flush_ms,
            capacity: KEY_BUFFER_CAPACITY,
        });

        tracing::debug!(
            exit_key,
            granularity = config.granularity,
            exclude_delays = config.exclude_delays,
            "Session configured"
        );

        Ok(Self {
            resolver,
            keys,
            pointer: PointerTranslator::new(config.granularity),
            delays: DelayEncoder::new(config.exclude_delays, config.min_delay_ms),
            last_event: None,
            state: SessionState::Recording,
            finished: false,
            events_seen: 0,
        })
    }

    /// Translate one event, writing any statements to `sink`.
    pub fn dispatch(&mut self, event: &RecordedEvent, sink: &mut impl ScriptSink) -> SessionState {
        if self.state == SessionState::Stopped {
            return self.state;
        }
        self.events_seen += 1;

        match classify(event) {
            EventClass::Key { key, state } => {
                let outcome = self.keys.translate(
                    key,
                    state,
                    event.delay_ms,
                    &*self.resolver,
                    &self.delays,
                    sink,
                );
                if outcome == KeyOutcome::Exit {
                    tracing::info!(events = self.events_seen, "Exit key pressed");
                    self.finish(sink);
                    return self.state;
                }
            }
            EventClass::Pointer(input) => {
                self.keys.flush(sink);
                self.delays.encode(event.delay_ms, sink);
                self.pointer.translate(input, event.delay_ms, self.last_event.as_ref(), sink);
            }
        }

        self.last_event = Some(event.clone());
        self.state
    }

    /// Flush pending keys and stop. Safe to call more than once; only the
    /// first call can produce output.
    pub fn finish(&mut self, sink: &mut impl ScriptSink) {
        if !self.finished {
            self.keys.finish(sink);
            self.finished = true;
        }
        self.state = SessionState::Stopped;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_stopped(&self) -> bool {
        self.state == SessionState::Stopped
    }

    /// Most recent event dispatched while recording.
    pub fn last_event(&self) -> Option<&RecordedEvent> {
        self.last_event.as_ref()
    }

    pub fn key_buffer(&self) -> &KeyBuffer {
        self.keys.buffer()
    }

    pub fn events_seen(&self) -> u64 {
        self.events_seen
    }
}

//! guirecord input tracker
//!
//! Connects an input backend to the script engine: events are polled from
//! the backend, translated by a [`Session`], and the resulting statements
//! are appended to the script file. Backends:
//!
//! - **Evdev:** direct device access on Linux (requires `input` group)
//! - **Stub:** replays a fixed event list, used for event logs and tests
//!
//! Raw events can also be kept in an append-only JSONL log.

pub mod backends;
pub mod writer;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use guirecord_common::error::{RecorderError, RecorderResult};
use guirecord_event_model::RecordedEvent;
use guirecord_script_engine::{ScriptWriter, Session, SessionState, Statement};

/// Pause between polls when the backend has nothing to hand out.
const POLL_INTERVAL: tokio::time::Duration = tokio::time::Duration::from_millis(1);

/// Trait for input tracking backends.
pub trait InputBackend: Send {
    /// Poll for the next input event. Returns `None` if no event is available.
    fn poll(&mut self) -> RecorderResult<Option<RecordedEvent>>;

    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Check if the backend is available on this system.
    fn is_available(&self) -> bool;

    /// True once the backend will never produce another event.
    fn is_exhausted(&self) -> bool {
        false
    }
}

/// Why a recording ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The configured exit key was pressed.
    ExitKey,
    /// The stop flag was set from outside.
    StopRequested,
    /// The backend ran out of events.
    InputExhausted,
}

/// Outcome of a finished recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordingSummary {
    pub events: u64,
    pub statements: u64,
    pub reason: StopReason,
}

/// Drives a session from a backend into a script file.
pub struct Recorder {
    backend: Box<dyn InputBackend>,
    session: Session,
    script: ScriptWriter,
    event_log: Option<writer::EventLogWriter>,
    stop_flag: Arc<AtomicBool>,
    pending: Vec<Statement>,
    events_seen: u64,
}

impl Recorder {
    /// Create a recorder around an already-opened script.
    pub fn new(backend: Box<dyn InputBackend>, session: Session, script: ScriptWriter) -> Self {
        Self {
            backend,
            session,
            script,
            event_log: None,
            stop_flag: Arc::new(AtomicBool::new(false)),
            pending: Vec::new(),
            events_seen: 0,
        }
    }

    /// Also keep a JSONL copy of every event.
    pub fn with_event_log(mut self, log: writer::EventLogWriter) -> Self {
        self.event_log = Some(log);
        self
    }

    /// Run until the exit key, a stop request, or the end of input.
    pub async fn run(&mut self) -> RecorderResult<RecordingSummary> {
        if !self.backend.is_available() {
            return Err(RecorderError::input_tracking(format!(
                "Input backend '{}' is not available",
                self.backend.name()
            )));
        }
        tracing::info!(backend = %self.backend.name(), "Recording started");

        let reason = loop {
            if self.stop_flag.load(Ordering::Relaxed) {
                break StopReason::StopRequested;
            }
            match self.backend.poll() {
                Ok(Some(event)) => {
                    if self.process(&event)? == SessionState::Stopped {
                        break StopReason::ExitKey;
                    }
                }
                Ok(None) if self.backend.is_exhausted() => break StopReason::InputExhausted,
                Ok(None) => {
                    // No event available, yield briefly
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Input tracking error");
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
            }
        };

        self.finish()?;
        let summary = RecordingSummary {
            events: self.events_seen,
            statements: self.script.statements_written(),
            reason,
        };
        tracing::info!(
            events = summary.events,
            statements = summary.statements,
            reason = ?summary.reason,
            "Recording stopped"
        );
        Ok(summary)
    }

    /// Translate one event and write whatever it produced.
    pub fn process(&mut self, event: &RecordedEvent) -> RecorderResult<SessionState> {
        if self.session.is_stopped() {
            return Ok(SessionState::Stopped);
        }
        self.events_seen += 1;
        if let Some(log) = self.event_log.as_mut() {
            log.write_event(event)?;
        }
        let state = self.session.dispatch(event, &mut self.pending);
        self.drain()?;
        Ok(state)
    }

    /// Flush pending keys and close the script. Safe to call twice.
    pub fn finish(&mut self) -> RecorderResult<()> {
        self.session.finish(&mut self.pending);
        self.drain()?;
        self.script.finish()?;
        if let Some(log) = self.event_log.as_mut() {
            log.flush()?;
        }
        Ok(())
    }

    /// Set the stop flag.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Get the stop flag for external coordination.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Number of events processed so far.
    pub fn events_seen(&self) -> u64 {
        self.events_seen
    }

    fn drain(&mut self) -> RecorderResult<()> {
        let result = self.script.write_all(&self.pending);
        self.pending.clear();
        result
    }
}

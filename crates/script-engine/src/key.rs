//! Key translation: buffering typed keys into `SendKeys` runs.
//!
//! Keys are collected in a bounded buffer and written as one statement
//! when the buffer grows past the flush threshold, when the user pauses
//! long enough between keys, or when pointer activity interrupts typing.
//! Modifiers open a bracketed group on press and close it on release, so
//! Shift+a becomes `+(a)`.

use guirecord_event_model::{ButtonState, KeySym};

use crate::delay::DelayEncoder;
use crate::keys::KeyResolver;
use crate::sink::ScriptSink;
use crate::statement::Statement;

/// What the session should do after a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    /// The exit key was seen.
    Exit,
}

/// Bounded key text accumulator with modifier group tracking.
///
/// A flush that happens while modifier groups are open closes them in the
/// emitted text and re-opens them at the start of the next run, so every
/// `SendKeys` statement is balanced on its own.
#[derive(Debug, Clone)]
pub struct KeyBuffer {
    /// Re-opened groups carried over from the previous flush.
    prefix: String,
    /// Key text appended since the last flush.
    text: String,
    /// Labels of the currently open groups, innermost last.
    open: Vec<String>,
    capacity: usize,
}

impl KeyBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            prefix: String::new(),
            text: String::with_capacity(capacity),
            open: Vec::new(),
            capacity,
        }
    }

    /// True when nothing has been typed since the last flush.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length of the run as it would be emitted, minus the closing brackets.
    pub fn len(&self) -> usize {
        self.prefix.len() + self.text.len()
    }

    /// Length of the run as it would be emitted.
    pub fn emitted_len(&self) -> usize {
        self.len() + self.open.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of modifier groups currently open.
    pub fn open_groups(&self) -> usize {
        self.open.len()
    }

    /// Whether `extra` more bytes (plus `extra_groups` closers) still fit.
    pub fn fits(&self, extra: usize, extra_groups: usize) -> bool {
        self.emitted_len() + extra + extra_groups <= self.capacity
    }

    /// Append literal key text.
    pub fn push_keys(&mut self, keys: &str) {
        self.text.push_str(keys);
    }

    /// Open a modifier group.
    pub fn open_group(&mut self, label: &str) {
        self.text.push_str(label);
        self.text.push('(');
        self.open.push(label.to_string());
    }

    /// Close the innermost modifier group. A release with nothing open is
    /// ignored; a carried group released before anything else was typed
    /// is dropped from the prefix.
    pub fn close_group(&mut self) -> bool {
        let Some(label) = self.open.pop() else {
            return false;
        };
        if self.text.is_empty() && !self.prefix.is_empty() {
            let keep = self.prefix.len().saturating_sub(label.len() + 1);
            self.prefix.truncate(keep);
        } else {
            self.text.push(')');
        }
        true
    }

    /// Take the pending run, leaving open groups carried into the next one.
    /// Returns `None` when nothing was typed since the last flush.
    pub fn take(&mut self) -> Option<String> {
        if self.text.is_empty() {
            return None;
        }
        let mut run = String::with_capacity(self.emitted_len());
        run.push_str(&self.prefix);
        run.push_str(&self.text);
        run.extend(std::iter::repeat(')').take(self.open.len()));

        self.text.clear();
        self.prefix = self.open.iter().map(|label| format!("{label}(")).collect();
        Some(run)
    }

    /// Take the pending run and forget every open group.
    pub fn take_final(&mut self) -> Option<String> {
        let run = self.take();
        self.open.clear();
        self.prefix.clear();
        run
    }
}

/// Escape a single-character key for a single-quoted script literal.
pub fn escape_key(name: &str) -> String {
    match name {
        "'" => "\\'".to_string(),
        "\\" => "\\\\".to_string(),
        other => other.to_string(),
    }
}

/// Script fragment for a released non-modifier key.
pub fn key_fragment(name: &str) -> String {
    if name.chars().count() > 1 {
        format!("{{{name}}}")
    } else {
        escape_key(name)
    }
}

/// Tunables for the key translator.
#[derive(Debug, Clone, Copy)]
pub struct KeyPolicy {
    pub exit_key: KeySym,
    pub flush_threshold: usize,
    pub gap_flush_ms: u64,
    pub capacity: usize,
}

/// Stateful key-event translator.
pub struct KeyTranslator {
    buffer: KeyBuffer,
    policy: KeyPolicy,
}

impl KeyTranslator {
    pub fn new(policy: KeyPolicy) -> Self {
        Self {
            buffer: KeyBuffer::new(policy.capacity),
            policy,
        }
    }

    pub fn buffer(&self) -> &KeyBuffer {
        &self.buffer
    }

    /// Translate one key transition.
    pub fn translate(
        &mut self,
        key: KeySym,
        state: ButtonState,
        gap_ms: u64,
        resolver: &dyn KeyResolver,
        delays: &DelayEncoder,
        sink: &mut impl ScriptSink,
    ) -> KeyOutcome {
        if gap_ms > self.policy.gap_flush_ms {
            self.flush(sink);
            delays.encode(gap_ms, sink);
        }

        if key == self.policy.exit_key {
            self.flush(sink);
            return KeyOutcome::Exit;
        }

        let Some(name) = resolver.key_name(key) else {
            tracing::warn!(key, %state, "Unhandled key");
            sink.emit(Statement::UnhandledKey { key, state });
            return KeyOutcome::Continue;
        };

        if let Some(label) = resolver.modifier_label(key) {
            match state {
                ButtonState::Down => {
                    if self.make_room(label.len() + 1, 1, sink) {
                        self.buffer.open_group(label);
                    }
                }
                ButtonState::Up => {
                    if !self.buffer.close_group() {
                        tracing::debug!(key, "Modifier released without an open group");
                    }
                }
            }
        } else if state == ButtonState::Up {
            let fragment = key_fragment(&name);
            if self.make_room(fragment.len(), 0, sink) {
                self.buffer.push_keys(&fragment);
            }
        }

        if self.buffer.len() >= self.policy.flush_threshold {
            self.flush(sink);
        }
        KeyOutcome::Continue
    }

    /// Emit the pending run as one `SendKeys` statement. No-op when empty.
    pub fn flush(&mut self, sink: &mut impl ScriptSink) {
        if let Some(run) = self.buffer.take() {
            tracing::debug!(len = run.len(), "Flushing key buffer");
            sink.emit(Statement::SendKeys(run));
        }
    }

    /// Final flush at end of session; closes every open modifier group.
    pub fn finish(&mut self, sink: &mut impl ScriptSink) {
        if let Some(run) = self.buffer.take_final() {
            sink.emit(Statement::SendKeys(run));
        }
    }

    /// Flush early when a fragment would push the buffer past capacity.
    /// Returns false if the fragment cannot fit even in an empty run.
    fn make_room(&mut self, extra: usize, extra_groups: usize, sink: &mut impl ScriptSink) -> bool {
        if self.buffer.fits(extra, extra_groups) {
            return true;
        }
        self.flush(sink);
        if self.buffer.fits(extra, extra_groups) {
            return true;
        }
        tracing::warn!(
            extra,
            open_groups = self.buffer.open_groups(),
            "Key buffer full, dropping key"
        );
        false
    }
}

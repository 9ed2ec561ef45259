//! Input event types for the guirecord event stream.

use std::fmt;

use serde::{Deserialize, Serialize};

/// X11 keysym value identifying a key.
pub type KeySym = u32;

/// Pointer button index as reported by the input layer (1 = left,
/// 2 = middle, 3 = right).
pub type ButtonIndex = u32;

/// A single recorded input event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedEvent {
    /// Milliseconds elapsed since the previous event.
    #[serde(rename = "delay")]
    pub delay_ms: u64,

    /// The event payload.
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Discriminated union of event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Keyboard key transition.
    Key {
        /// Keysym of the key.
        key: KeySym,
        /// Press or release.
        state: ButtonState,
    },

    /// Pointer moved to an absolute position.
    MouseMove { x: i32, y: i32 },

    /// Pointer button transition.
    MouseButton {
        /// Button index.
        button: ButtonIndex,
        /// Press or release.
        state: ButtonState,
    },
}

/// Button/key state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonState {
    Down,
    Up,
}

impl fmt::Display for ButtonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonState::Down => f.write_str("down"),
            ButtonState::Up => f.write_str("up"),
        }
    }
}

impl RecordedEvent {
    /// Create a key event.
    pub fn key(delay_ms: u64, key: KeySym, state: ButtonState) -> Self {
        Self {
            delay_ms,
            kind: EventKind::Key { key, state },
        }
    }

    /// Create a pointer motion event.
    pub fn mouse_move(delay_ms: u64, x: i32, y: i32) -> Self {
        Self {
            delay_ms,
            kind: EventKind::MouseMove { x, y },
        }
    }

    /// Create a pointer button event.
    pub fn mouse_button(delay_ms: u64, button: ButtonIndex, state: ButtonState) -> Self {
        Self {
            delay_ms,
            kind: EventKind::MouseButton { button, state },
        }
    }

    /// Whether this is a keyboard event.
    pub fn is_key(&self) -> bool {
        matches!(self.kind, EventKind::Key { .. })
    }

    /// Whether this is a pointer motion event.
    pub fn is_mouse_move(&self) -> bool {
        matches!(self.kind, EventKind::MouseMove { .. })
    }
}

/// Parse events from JSONL content (one JSON object per line).
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_events(jsonl: &str) -> Result<Vec<RecordedEvent>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Serialize events to JSONL format.
pub fn serialize_events(events: &[RecordedEvent]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for event in events {
        output.push_str(&serde_json::to_string(event)?);
        output.push('\n');
    }
    Ok(output)
}

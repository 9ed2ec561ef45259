//! Script statements and their textual rendering.

use std::fmt;

use guirecord_common::clock::GapClock;
use guirecord_common::config::ScriptFormat;
use guirecord_event_model::{ButtonIndex, ButtonState, KeySym};

/// Pointer buttons the script language can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// Map an input-layer button index; anything outside 1..=3 is unmapped.
    pub fn from_index(index: ButtonIndex) -> Option<Self> {
        match index {
            1 => Some(Self::Left),
            2 => Some(Self::Middle),
            3 => Some(Self::Right),
            _ => None,
        }
    }

    /// Constant name used in scripts.
    pub fn script_name(self) -> &'static str {
        match self {
            Self::Left => "M_LEFT",
            Self::Middle => "M_MIDDLE",
            Self::Right => "M_RIGHT",
        }
    }
}

/// One line of generated script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// A run of typed keys, already escaped.
    SendKeys(String),

    /// Wait for the given number of milliseconds.
    Pause { ms: u64 },

    /// Move the pointer to an absolute position.
    MoveMouseAbs { x: i32, y: i32 },

    PressButton(MouseButton),

    ReleaseButton(MouseButton),

    /// A key the resolver could not name.
    UnhandledKey { key: KeySym, state: ButtonState },

    /// A button index with no script name.
    UnhandledButton {
        button: ButtonIndex,
        state: ButtonState,
    },
}

impl Statement {
    /// Render the statement as a single line (without newline).
    pub fn render(&self, format: ScriptFormat) -> String {
        match (format, self) {
            (ScriptFormat::Guitest, Statement::Pause { ms }) => format!(
                "select(undef, undef, undef, {});",
                GapClock::ms_to_secs_string(*ms)
            ),
            (ScriptFormat::Guitest, Statement::PressButton(button)) => {
                format!("PressMouseButton({});", button.script_name())
            }
            (ScriptFormat::Guitest, Statement::ReleaseButton(button)) => {
                format!("ReleaseMouseButton({});", button.script_name())
            }
            (ScriptFormat::Guitest, Statement::UnhandledButton { button, state }) => {
                format!("# [Unhandled Mouse Button {button}/{state}]")
            }
            (_, statement) => statement.to_string(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::SendKeys(keys) => write!(f, "SendKeys('{keys}');"),
            Statement::Pause { ms } => write!(f, "Pause({});", GapClock::ms_to_secs_string(*ms)),
            Statement::MoveMouseAbs { x, y } => write!(f, "MoveMouseAbs({x}, {y});"),
            Statement::PressButton(button) => write!(f, "PressButton({});", button.script_name()),
            Statement::ReleaseButton(button) => {
                write!(f, "ReleaseButton({});", button.script_name())
            }
            Statement::UnhandledKey { key, state } => write!(f, "# [Unhandled Key {key}/{state}]"),
            Statement::UnhandledButton { button, state } => {
                write!(f, "# [Unhandled Button {button}/{state}]")
            }
        }
    }
}

/// Lines written before the first statement.
pub fn prelude(format: ScriptFormat, started_at: &str) -> Vec<String> {
    let version = env!("CARGO_PKG_VERSION");
    let mut lines = Vec::new();
    if format == ScriptFormat::Guitest {
        lines.push("#!/usr/bin/perl".to_string());
        lines.push(String::new());
        lines.push("use X11::GUITest qw/:ALL/;".to_string());
        lines.push(String::new());
    }
    lines.push(format!("# Begin (Recorder Version {version})."));
    lines.push(format!("# Recorded {started_at}"));
    lines
}

/// Lines written after the last statement.
pub fn trailer(_format: ScriptFormat) -> Vec<String> {
    vec![String::new(), "# End.".to_string()]
}

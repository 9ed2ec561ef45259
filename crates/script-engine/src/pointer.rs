//! Pointer translation: button transitions and filtered motion.

use guirecord_common::config::MAX_GRANULARITY;
use guirecord_event_model::{ButtonIndex, ButtonState, RecordedEvent};

use crate::sink::ScriptSink;
use crate::statement::{MouseButton, Statement};

/// Minimum gap (ms) a move must have after another move to be kept.
///
/// Integer division on purpose: granularity 10 keeps everything, 1 drops
/// moves closer together than 9ms, and neighbouring settings share
/// thresholds (6 through 9 all map to 0).
pub fn granularity_threshold(granularity: u32) -> u64 {
    (MAX_GRANULARITY / granularity.clamp(1, MAX_GRANULARITY)) as u64 - 1
}

/// A pointer event, as routed to the pointer path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerInput {
    Move { x: i32, y: i32 },
    Button {
        button: ButtonIndex,
        state: ButtonState,
    },
}

/// Translates pointer events into move and button statements.
#[derive(Debug, Clone, Copy)]
pub struct PointerTranslator {
    threshold_ms: u64,
}

impl PointerTranslator {
    pub fn new(granularity: u32) -> Self {
        Self {
            threshold_ms: granularity_threshold(granularity),
        }
    }

    pub fn threshold_ms(&self) -> u64 {
        self.threshold_ms
    }

    /// A move is too granular only when it directly follows another move
    /// and arrives sooner than the threshold.
    pub fn is_too_granular(&self, gap_ms: u64, last: Option<&RecordedEvent>) -> bool {
        match last {
            Some(previous) if previous.is_mouse_move() => gap_ms < self.threshold_ms,
            _ => false,
        }
    }

    /// Emit whatever statement `input` calls for.
    pub fn translate(
        &self,
        input: PointerInput,
        gap_ms: u64,
        last: Option<&RecordedEvent>,
        sink: &mut impl ScriptSink,
    ) {
        match input {
            PointerInput::Move { x, y } => self.translate_move(x, y, gap_ms, last, sink),
            PointerInput::Button { button, state } => self.translate_button(button, state, sink),
        }
    }

    /// Emit the statement for a pointer move, unless it is filtered out.
    pub fn translate_move(
        &self,
        x: i32,
        y: i32,
        gap_ms: u64,
        last: Option<&RecordedEvent>,
        sink: &mut impl ScriptSink,
    ) {
        if self.is_too_granular(gap_ms, last) {
            tracing::debug!(x, y, gap_ms, "Suppressed fine-grained move");
            return;
        }
        sink.emit(Statement::MoveMouseAbs { x, y });
    }

    /// Emit the statement for a button transition.
    pub fn translate_button(
        &self,
        button: ButtonIndex,
        state: ButtonState,
        sink: &mut impl ScriptSink,
    ) {
        match (MouseButton::from_index(button), state) {
            (Some(mapped), ButtonState::Down) => sink.emit(Statement::PressButton(mapped)),
            (Some(mapped), ButtonState::Up) => sink.emit(Statement::ReleaseButton(mapped)),
            (None, state) => {
                tracing::warn!(button, %state, "Unhandled mouse button");
                sink.emit(Statement::UnhandledButton { button, state });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_steps() {
        let expected = [(1, 9), (2, 4), (3, 2), (4, 1), (5, 1), (6, 0), (9, 0), (10, 0)];
        for (granularity, threshold) in expected {
            assert_eq!(granularity_threshold(granularity), threshold, "{granularity}");
        }
    }

    #[test]
    fn test_first_move_after_other_event_is_kept() {
        let pointer = PointerTranslator::new(1);
        let click = RecordedEvent::mouse_button(0, 1, ButtonState::Up);
        assert!(!pointer.is_too_granular(0, Some(&click)));
        assert!(!pointer.is_too_granular(0, None));
    }

    #[test]
    fn test_rapid_move_after_move_is_suppressed() {
        let pointer = PointerTranslator::new(1);
        let previous = RecordedEvent::mouse_move(3, 1, 1);
        let mut out = Vec::new();
        pointer.translate_move(2, 2, 8, Some(&previous), &mut out);
        assert!(out.is_empty());
        pointer.translate_move(2, 2, 9, Some(&previous), &mut out);
        assert_eq!(out, vec![Statement::MoveMouseAbs { x: 2, y: 2 }]);
    }

    #[test]
    fn test_translate_routes_moves_and_buttons() {
        let pointer = PointerTranslator::new(1);
        let previous = RecordedEvent::mouse_move(0, 1, 1);
        let mut out = Vec::new();
        pointer.translate(PointerInput::Move { x: 4, y: 4 }, 2, Some(&previous), &mut out);
        pointer.translate(
            PointerInput::Button {
                button: 1,
                state: ButtonState::Down,
            },
            2,
            Some(&previous),
            &mut out,
        );
        assert_eq!(out, vec![Statement::PressButton(MouseButton::Left)]);
    }

    #[test]
    fn test_buttons() {
        let pointer = PointerTranslator::new(10);
        let mut out = Vec::new();
        pointer.translate_button(3, ButtonState::Down, &mut out);
        pointer.translate_button(3, ButtonState::Up, &mut out);
        pointer.translate_button(5, ButtonState::Down, &mut out);
        assert_eq!(
            out,
            vec![
                Statement::PressButton(MouseButton::Right),
                Statement::ReleaseButton(MouseButton::Right),
                Statement::UnhandledButton {
                    button: 5,
                    state: ButtonState::Down
                },
            ]
        );
    }
}

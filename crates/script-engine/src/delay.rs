//! Pause statements for user delays.

use crate::sink::ScriptSink;
use crate::statement::Statement;

/// Turns inter-event gaps into `Pause` statements.
#[derive(Debug, Clone, Copy)]
pub struct DelayEncoder {
    enabled: bool,
    min_delay_ms: u64,
}

impl DelayEncoder {
    pub fn new(exclude_delays: bool, min_delay_ms: u64) -> Self {
        Self {
            enabled: !exclude_delays,
            min_delay_ms,
        }
    }

    /// Emit a pause for `gap_ms` if delays are included and the gap is
    /// longer than the minimum.
    pub fn encode(&self, gap_ms: u64, sink: &mut impl ScriptSink) {
        if self.enabled && gap_ms > self.min_delay_ms {
            sink.emit(Statement::Pause { ms: gap_ms });
        }
    }
}

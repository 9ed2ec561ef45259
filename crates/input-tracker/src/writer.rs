//! Append-only event log writer.
//!
//! Keeps a JSONL copy of the raw events so a recording can be translated
//! again later with different settings.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use guirecord_common::error::{RecorderError, RecorderResult};
use guirecord_event_model::RecordedEvent;

/// Writes events to a JSONL file in append-only mode.
pub struct EventLogWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    events_written: u64,
}

impl EventLogWriter {
    /// Create a new event log, writing a comment header as the first line.
    pub fn new(path: PathBuf, started_at: &str) -> RecorderResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        let mut writer = BufWriter::new(file);

        writeln!(writer, "# guirecord event log, started {started_at}").map_err(|e| {
            RecorderError::input_tracking(format!("Failed to write event log header: {e}"))
        })?;

        Ok(Self {
            writer,
            path,
            events_written: 0,
        })
    }

    /// Write a single event as a JSONL line.
    pub fn write_event(&mut self, event: &RecordedEvent) -> RecorderResult<()> {
        let json = serde_json::to_string(event)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| RecorderError::input_tracking(format!("Failed to write event: {e}")))?;
        self.events_written += 1;

        // Flush every 1000 events for crash safety
        if self.events_written % 1000 == 0 {
            self.flush()?;
        }

        Ok(())
    }

    /// Flush buffered writes to disk.
    pub fn flush(&mut self) -> RecorderResult<()> {
        self.writer
            .flush()
            .map_err(|e| RecorderError::input_tracking(format!("Failed to flush events: {e}")))?;
        Ok(())
    }

    /// Number of events written.
    pub fn events_written(&self) -> u64 {
        self.events_written
    }

    /// Path to the output file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Drop for EventLogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guirecord_event_model::{parse_events, ButtonState};

    #[test]
    fn test_event_log_can_be_parsed_back() {
        let dir = std::env::temp_dir().join("guirecord_test_event_log");
        let _ = std::fs::remove_dir_all(&dir);

        let path = dir.join("events.jsonl");
        let events = vec![
            RecordedEvent::mouse_move(0, 960, 540),
            RecordedEvent::mouse_button(120, 1, ButtonState::Down),
            RecordedEvent::key(300, 0x61, ButtonState::Up),
        ];

        {
            let mut writer = EventLogWriter::new(path.clone(), "2026-01-01T00:00:00Z").unwrap();
            for event in &events {
                writer.write_event(event).unwrap();
            }
            assert_eq!(writer.events_written(), 3);
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# guirecord event log"));
        assert_eq!(parse_events(&content).unwrap(), events);

        std::fs::remove_dir_all(&dir).ok();
    }
}

//! Append-only script writer.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use guirecord_common::config::ScriptFormat;
use guirecord_common::error::{RecorderError, RecorderResult};

use crate::statement::{prelude, trailer, Statement};

/// Writes rendered statements to a script file, one per line.
pub struct ScriptWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    format: ScriptFormat,
    statements_written: u64,
    finished: bool,
}

impl ScriptWriter {
    /// Create the script file (truncating any existing one) and write the
    /// prelude.
    pub fn create(
        path: impl AsRef<Path>,
        format: ScriptFormat,
        started_at: &str,
    ) -> RecorderResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| {
                RecorderError::script(format!(
                    "Unable to open script file '{}': {e}",
                    path.display()
                ))
            })?;

        let mut writer = Self {
            writer: BufWriter::new(file),
            path,
            format,
            statements_written: 0,
            finished: false,
        };
        for line in prelude(format, started_at) {
            writer.write_line(&line)?;
        }
        Ok(writer)
    }

    /// Write a single statement.
    pub fn write_statement(&mut self, statement: &Statement) -> RecorderResult<()> {
        let line = statement.render(self.format);
        self.write_line(&line)?;
        self.statements_written += 1;

        // Flush every 64 statements so an interrupted recording keeps most of its script
        if self.statements_written % 64 == 0 {
            self.flush()?;
        }

        Ok(())
    }

    /// Write every statement in order.
    pub fn write_all<'a>(
        &mut self,
        statements: impl IntoIterator<Item = &'a Statement>,
    ) -> RecorderResult<()> {
        for statement in statements {
            self.write_statement(statement)?;
        }
        Ok(())
    }

    /// Write the trailer and flush. Later calls do nothing.
    pub fn finish(&mut self) -> RecorderResult<()> {
        if self.finished {
            return Ok(());
        }
        for line in trailer(self.format) {
            self.write_line(&line)?;
        }
        self.finished = true;
        self.flush()
    }

    /// Flush buffered writes to disk.
    pub fn flush(&mut self) -> RecorderResult<()> {
        self.writer
            .flush()
            .map_err(|e| RecorderError::script(format!("Failed to flush script: {e}")))?;
        Ok(())
    }

    /// Number of statements written.
    pub fn statements_written(&self) -> u64 {
        self.statements_written
    }

    /// Path to the script file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&mut self, line: &str) -> RecorderResult<()> {
        writeln!(self.writer, "{line}")
            .map_err(|e| RecorderError::script(format!("Failed to write script: {e}")))
    }
}

impl Drop for ScriptWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::MouseButton;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_generic_script_file() {
        let dir = temp_dir("guirecord_test_writer_generic");
        let path = dir.join("nested").join("session.txt");

        {
            let mut writer =
                ScriptWriter::create(&path, ScriptFormat::Generic, "2026-01-01T00:00:00Z")
                    .unwrap();
            writer
                .write_all(&[
                    Statement::SendKeys("hi".into()),
                    Statement::Pause { ms: 120 },
                    Statement::PressButton(MouseButton::Left),
                ])
                .unwrap();
            writer.finish().unwrap();
            writer.finish().unwrap();
            assert_eq!(writer.statements_written(), 3);
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert!(lines[0].starts_with("# Begin (Recorder Version"));
        assert!(lines[1].starts_with("# Recorded "));
        assert_eq!(lines[2], "SendKeys('hi');");
        assert_eq!(lines[3], "Pause(0.120);");
        assert_eq!(lines[4], "PressButton(M_LEFT);");
        assert_eq!(lines.iter().filter(|l| **l == "# End.").count(), 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_guitest_script_file() {
        let dir = temp_dir("guirecord_test_writer_guitest");
        let path = dir.join("session.pl");

        {
            let mut writer =
                ScriptWriter::create(&path, ScriptFormat::Guitest, "2026-01-01T00:00:00Z")
                    .unwrap();
            writer
                .write_statement(&Statement::ReleaseButton(MouseButton::Right))
                .unwrap();
            writer.finish().unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("#!/usr/bin/perl\n"));
        assert!(content.contains("use X11::GUITest qw/:ALL/;\n"));
        assert!(content.contains("ReleaseMouseButton(M_RIGHT);\n"));
        assert!(content.trim_end().ends_with("# End."));

        std::fs::remove_dir_all(&dir).ok();
    }
}

//! Append-only event log for one batch run.

use chrono::{DateTime, Local};
use std::io::{self, Write};

/// A single timestamped log line.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
}

impl LogEntry {
    /// `YYYY-MM-DD HH:MM:SS message`
    pub fn to_line(&self) -> String {
        format!("{} {}", self.timestamp.format("%Y-%m-%d %H:%M:%S"), self.message)
    }
}

/// Batch diagnostics, kept alongside `tracing` output so it can be
/// offered as a downloadable file.
#[derive(Debug, Clone, Default)]
pub struct BatchLog {
    entries: Vec<LogEntry>,
}

impl BatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Line breaks in `message` become spaces so every
    /// entry stays on one line of the log file.
    pub fn push(&mut self, message: impl Into<String>) {
        let message: String = message.into();
        let message = message
            .split(['\r', '\n'])
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        self.entries.push(LogEntry {
            timestamp: Local::now(),
            message,
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write one line per entry as UTF-8 text.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(writer, "{}", entry.to_line())?;
        }
        writer.flush()
    }
}

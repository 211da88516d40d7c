//! Structured log channel.
//!
//! The core reports progress (detected dialects, column lists, conversion
//! outcomes) as structured entries on a broadcast channel. A presentation
//! layer subscribes and renders them however it likes; entries are also
//! echoed to stdout for CLI use.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Log level for caller display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Error,
            message: message.into(),
        }
    }
}

/// Global log channel.
pub static LOG_CHANNEL: Lazy<LogChannel> = Lazy::new(LogChannel::new);

/// Broadcasts log entries to all subscribed callers.
pub struct LogChannel {
    sender: broadcast::Sender<LogEntry>,
}

impl LogChannel {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Send an entry to all subscribers and echo it to stdout.
    pub fn log(&self, entry: LogEntry) {
        let prefix = match entry.level {
            LogLevel::Info => "   ",
            LogLevel::Success => " ✓ ",
            LogLevel::Warning => " ! ",
            LogLevel::Error => " ✗ ",
        };
        println!("{}{}", prefix, entry.message);

        // No receivers is fine; the CLI runs without any.
        let _ = self.sender.send(entry);
    }

    /// Get a receiver for streaming entries to a caller.
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.sender.subscribe()
    }
}

impl Default for LogChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenient logging functions
pub fn log_info(msg: impl Into<String>) {
    LOG_CHANNEL.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOG_CHANNEL.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOG_CHANNEL.log(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOG_CHANNEL.log(LogEntry::error(msg));
}

//! Notification sink consumed by the presentation layer.
//!
//! Engines post short user-facing messages; the presentation layer drains
//! them and decides how long to show each one.

use crate::logutil::escape_log;

/// Fire-and-forget message sink.
pub trait Notifier {
    fn post(&mut self, message: &str);
}

/// Buffers posted messages until drained and mirrors them to the log.
#[derive(Debug, Default, Clone)]
pub struct NotificationLog {
    entries: Vec<String>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.entries
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|m| m.contains(needle))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Take all pending messages, oldest first.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.entries)
    }
}

impl Notifier for NotificationLog {
    fn post(&mut self, message: &str) {
        log::info!(target: "notify", "{}", escape_log(message));
        self.entries.push(message.to_string());
    }
}

//! Append-only chat transcript for the current run.

use std::fmt;

use chrono::{DateTime, Local, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
    System,
}

impl Sender {
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Assistant => "Assistant",
            Sender::System => "System",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single transcript line. Timestamps carry minute precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub timestamp: DateTime<Local>,
    pub sender: Sender,
    pub message: String,
}

impl ChatEntry {
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }

    pub fn render(&self) -> String {
        match self.sender {
            Sender::System => format!("[{}] {}", self.time_label(), self.message),
            sender => format!("[{}] {}: {}", self.time_label(), sender, self.message),
        }
    }
}

/// Ordered transcript. Entries are never edited or removed.
#[derive(Debug, Default, Clone)]
pub struct SessionLog {
    entries: Vec<ChatEntry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message stamped with the current local time.
    pub fn append(&mut self, sender: Sender, message: impl Into<String>) -> &ChatEntry {
        self.append_at(sender, message, Local::now())
    }

    pub fn append_at(
        &mut self,
        sender: Sender,
        message: impl Into<String>,
        timestamp: DateTime<Local>,
    ) -> &ChatEntry {
        let entry = ChatEntry {
            timestamp: truncate_to_minute(timestamp),
            sender,
            message: message.into(),
        };
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The full transcript, one blank line between entries.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(ChatEntry::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn truncate_to_minute(ts: DateTime<Local>) -> DateTime<Local> {
    ts.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}

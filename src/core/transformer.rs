//! Transformer trait: the rendering strategy for log entries

use super::{error::Result, log_entry::LogEntry, value::Value};
use std::fmt;

/// What a transformer hands to a sink.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// A rendered line, newline terminated.
    Text(String),
    /// The untouched record, for structured consumers.
    Entry(LogEntry),
}

impl Output {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Output::Text(text) => Some(text),
            Output::Entry(_) => None,
        }
    }

    pub fn as_entry(&self) -> Option<&LogEntry> {
        match self {
            Output::Entry(entry) => Some(entry),
            Output::Text(_) => None,
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Text(text) => f.write_str(text),
            Output::Entry(entry) => write!(f, "{:?}", entry),
        }
    }
}

pub trait Transformer: Send + Sync {
    /// Render a complete entry.
    fn format(&self, entry: LogEntry) -> Result<Output>;

    /// Pre-render a non-string payload before it becomes an entry's message.
    fn format_complex_value(&self, value: Value) -> Value;

    fn name(&self) -> &str;
}

//! Log entry structure

use super::mask::{self, Mask};
use super::value::Value;
use serde::{Deserialize, Serialize};

/// One log record, built per emitted value and consumed by a transformer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub group: Option<String>,
    /// Severity bits; a single [`Mask`] for anything the logger emits.
    pub level_numeric: u32,
    /// Resolved level name or a custom label; `None` hides the level column.
    pub level_text: Option<String>,
    #[serde(default)]
    pub message: Value,
    pub timestamp: String,
}

impl LogEntry {
    pub fn new(mask: Mask, message: impl Into<Value>, timestamp: impl Into<String>) -> Self {
        Self {
            group: None,
            level_numeric: mask.bits(),
            level_text: Some(mask.name().to_string()),
            message: message.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Entry with arbitrary severity bits, as read back from a log line.
    pub fn with_bits(bits: u32, message: impl Into<Value>, timestamp: impl Into<String>) -> Self {
        Self {
            group: None,
            level_numeric: bits,
            level_text: Some(mask::resolve_name(bits).to_string()),
            message: message.into(),
            timestamp: timestamp.into(),
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_level_text(mut self, level_text: Option<String>) -> Self {
        self.level_text = level_text;
        self
    }

    /// Entries carrying the ERROR bit go to the error sink.
    #[inline]
    pub fn is_error(&self) -> bool {
        mask::matches(self.level_numeric, Mask::Error.bits())
    }
}

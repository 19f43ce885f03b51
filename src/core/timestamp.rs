//! Timestamp formatting utilities
//!
//! Entries carry their timestamp pre-formatted; this module turns the
//! current time into that string according to the logger's time format.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Pattern used by [`TimestampFormat::Local`]: `2025-01-08T10:30:45.123+0100`
pub const LOCAL_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use ansi_logger::core::TimestampFormat;
/// use chrono::{Local, TimeZone, Utc};
///
/// let time = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// let local = time.with_timezone(&Local).format("%Y-%m-%d").to_string();
/// assert_eq!(TimestampFormat::Custom("%Y-%m-%d".into()).format(&time), local);
/// assert_eq!(TimestampFormat::Custom("T".into()).format(&time), "T");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Local time with milliseconds and numeric offset (default).
    #[default]
    Local,

    /// Custom strftime pattern, rendered in local time.
    ///
    /// A pattern without specifiers renders verbatim, which is handy for
    /// fixed timestamps in tests.
    Custom(String),
}

impl TimestampFormat {
    /// Validated custom pattern.
    pub fn custom(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::config(
                "TimestampFormat",
                format!("invalid strftime pattern '{}'", pattern),
            ));
        }
        Ok(TimestampFormat::Custom(pattern))
    }

    /// Format the current time.
    pub fn now(&self) -> String {
        self.format(&Utc::now())
    }

    /// Format `datetime` according to this format.
    ///
    /// Never panics: an unusable custom pattern falls back to [`LOCAL_PATTERN`].
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Local => datetime
                .with_timezone(&Local)
                .format(LOCAL_PATTERN)
                .to_string(),
            TimestampFormat::Custom(pattern) => {
                let local = datetime.with_timezone(&Local);
                let mut out = String::new();
                match write!(out, "{}", local.format(pattern)) {
                    Ok(()) => out,
                    Err(_) => local.format(LOCAL_PATTERN).to_string(),
                }
            }
        }
    }
}

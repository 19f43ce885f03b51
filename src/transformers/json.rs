//! JSON line transformer
//!
//! Writes each entry as a single-line JSON object (JSONL), compatible with
//! log aggregation tools and with the `ansi-logger` line driver.

use crate::core::{LogEntry, Output, Result, Transformer, Value};
use serde::Serialize;

/// Field order of the emitted object is fixed.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonRecord<'a> {
    group: Option<&'a str>,
    level_numeric: u32,
    level_text: Option<&'a str>,
    message: serde_json::Value,
    timestamp: &'a str,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTransformer;

impl JsonTransformer {
    pub fn new() -> Self {
        JsonTransformer
    }

    /// Strings stay as they are; anything else is replaced by its compact
    /// JSON text. Fails on cyclic values.
    fn message_field(message: &Value) -> Result<serde_json::Value> {
        if message.is_nullish() {
            return Ok(serde_json::Value::Null);
        }
        match message.as_str() {
            Some(s) => Ok(serde_json::Value::String(s.into_owned())),
            None => {
                let json = message.to_json()?;
                Ok(serde_json::Value::String(serde_json::to_string(&json)?))
            }
        }
    }

    pub fn format_line(&self, entry: &LogEntry) -> Result<String> {
        let record = JsonRecord {
            group: entry.group.as_deref(),
            level_numeric: entry.level_numeric,
            level_text: entry.level_text.as_deref(),
            message: Self::message_field(&entry.message)?,
            timestamp: &entry.timestamp,
        };
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');
        Ok(line)
    }
}

impl Transformer for JsonTransformer {
    fn format(&self, entry: LogEntry) -> Result<Output> {
        self.format_line(&entry).map(Output::Text)
    }

    fn format_complex_value(&self, value: Value) -> Value {
        value
    }

    fn name(&self) -> &str {
        "json"
    }
}

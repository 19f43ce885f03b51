//! Pass-through transformer for structured consumers

use crate::core::{LogEntry, Output, Result, Transformer, Value};

/// Hands the raw record to the sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTransformer;

impl Transformer for IdentityTransformer {
    fn format(&self, entry: LogEntry) -> Result<Output> {
        Ok(Output::Entry(entry))
    }

    fn format_complex_value(&self, value: Value) -> Value {
        value
    }

    fn name(&self) -> &str {
        "identity"
    }
}

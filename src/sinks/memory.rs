//! In-memory capture sink

use crate::core::{Output, Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

/// Records every output it receives. Clones share the same buffer, so a
/// test can keep one handle and give the other to the logger.
///
/// # Example
///
/// ```
/// use ansi_logger::sinks::MemorySink;
/// use ansi_logger::transformers::TextTransformer;
/// use ansi_logger::{Logger, TimestampFormat};
///
/// let normal = MemorySink::new();
/// let logger = Logger::builder()
///     .transformer(TextTransformer::new().with_colors(false).assume_terminal(false))
///     .time_format(TimestampFormat::Custom("T".into()))
///     .normal_sink(normal.clone())
///     .build();
///
/// logger.info("ready")?;
/// assert_eq!(normal.lines(), ["[T] [INFO]    ready\n"]);
/// # Ok::<(), ansi_logger::LoggerError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    outputs: Arc<Mutex<Vec<Output>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outputs(&self) -> Vec<Output> {
        self.outputs.lock().clone()
    }

    /// Text outputs only; structured entries are skipped.
    pub fn lines(&self) -> Vec<String> {
        self.outputs
            .lock()
            .iter()
            .filter_map(|output| output.as_text().map(str::to_string))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.outputs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.lock().is_empty()
    }

    pub fn clear(&self) {
        self.outputs.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write(&mut self, output: &Output) -> Result<()> {
        self.outputs.lock().push(output.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

//! Main logger implementation

use super::{
    error::Result,
    log_entry::LogEntry,
    mask::{Level, Mask},
    metrics::LoggerMetrics,
    sink::Sink,
    timestamp::TimestampFormat,
    transformer::Transformer,
    value::Value,
};
use crate::sinks::NullSink;
use crate::transformers::TextTransformer;
use parking_lot::{Mutex, RwLock};

/// Indent applied to each stack line of an error emitted at ERROR.
const STACK_INDENT: &str = "    ";

/// Read-mostly settings consulted on every emit.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggerConfig {
    pub group: Option<String>,
    pub level: Level,
    pub time_format: TimestampFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            group: None,
            level: Level::INFO,
            time_format: TimestampFormat::default(),
        }
    }
}

struct Sinks {
    normal: Box<dyn Sink>,
    error: Box<dyn Sink>,
}

pub struct Logger {
    config: RwLock<LoggerConfig>,
    transformer: RwLock<Box<dyn Transformer>>,
    sinks: Mutex<Sinks>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Text logger at INFO that discards its output; see [`Logger::builder`].
    #[must_use]
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    #[inline]
    pub fn level(&self) -> Level {
        self.config.read().level
    }

    pub fn group(&self) -> Option<String> {
        self.config.read().group.clone()
    }

    pub fn time_format(&self) -> TimestampFormat {
        self.config.read().time_format.clone()
    }

    pub fn transformer_name(&self) -> String {
        self.transformer.read().name().to_string()
    }

    /// Whether an entry of `mask` passes the configured level.
    #[inline]
    pub fn is_enabled(&self, mask: Mask) -> bool {
        self.config.read().level.matches(mask.bits())
    }

    /// Get logger metrics
    ///
    /// # Example
    ///
    /// ```
    /// use ansi_logger::{Level, Logger};
    ///
    /// let logger = Logger::builder().level(Level::WARN).build();
    /// logger.info("skipped")?;
    /// logger.warn("kept")?;
    ///
    /// assert_eq!(logger.metrics().filtered_count(), 1);
    /// assert_eq!(logger.metrics().emitted_count(), 1);
    /// # Ok::<(), ansi_logger::LoggerError>(())
    /// ```
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Emit one value at `mask`.
    ///
    /// Strings are used verbatim; other values go through the transformer's
    /// complex-value hook first. At ERROR, error values are rendered as
    /// their message followed by the indented stack.
    pub fn emit(&self, mask: Mask, value: impl Into<Value>) -> Result<()> {
        if !self.is_enabled(mask) {
            self.metrics.record_filtered();
            return Ok(());
        }

        let value = value.into();
        let message = match value.as_error_parts() {
            Some((message, stack)) if mask == Mask::Error => {
                Value::String(format_error(&message, stack.as_deref()))
            }
            _ => match value.into_text() {
                Ok(text) => Value::String(text),
                Err(value) => self.transformer.read().format_complex_value(value),
            },
        };

        let entry = {
            let config = self.config.read();
            LogEntry {
                group: config.group.clone(),
                level_numeric: mask.bits(),
                level_text: Some(mask.name().to_string()),
                message,
                timestamp: config.time_format.now(),
            }
        };
        self.dispatch(entry)
    }

    /// Emit every value as its own entry, stopping at the first failure.
    pub fn emit_all<I, V>(&self, mask: Mask, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        for value in values {
            self.emit(mask, value)?;
        }
        Ok(())
    }

    /// Filter and route an already built entry, e.g. one read back from a
    /// JSON log line. The entry's own bits decide both.
    pub fn write_entry(&self, entry: LogEntry) -> Result<()> {
        if !self.config.read().level.matches(entry.level_numeric) {
            self.metrics.record_filtered();
            return Ok(());
        }
        self.dispatch(entry)
    }

    fn dispatch(&self, entry: LogEntry) -> Result<()> {
        let is_error = entry.is_error();
        let result = self.transformer.read().format(entry).and_then(|output| {
            let mut sinks = self.sinks.lock();
            if is_error {
                sinks.error.write(&output)
            } else {
                sinks.normal.write(&output)
            }
        });

        match result {
            Ok(()) => self.metrics.record_emitted(),
            Err(_) => self.metrics.record_failed(),
        }
        result
    }

    #[inline]
    pub fn error(&self, value: impl Into<Value>) -> Result<()> {
        self.emit(Mask::Error, value)
    }

    #[inline]
    pub fn warn(&self, value: impl Into<Value>) -> Result<()> {
        self.emit(Mask::Warn, value)
    }

    #[inline]
    pub fn success(&self, value: impl Into<Value>) -> Result<()> {
        self.emit(Mask::Success, value)
    }

    #[inline]
    pub fn log(&self, value: impl Into<Value>) -> Result<()> {
        self.emit(Mask::Log, value)
    }

    #[inline]
    pub fn info(&self, value: impl Into<Value>) -> Result<()> {
        self.emit(Mask::Info, value)
    }

    #[inline]
    pub fn debug(&self, value: impl Into<Value>) -> Result<()> {
        self.emit(Mask::Debug, value)
    }

    #[inline]
    pub fn verbose(&self, value: impl Into<Value>) -> Result<()> {
        self.emit(Mask::Verbose, value)
    }

    /// Headline message, emitted at INFO.
    #[inline]
    pub fn title(&self, value: impl Into<Value>) -> Result<()> {
        self.emit(Mask::Info, value)
    }

    /// Emit `name(arg, arg)` at DEBUG with every argument rendered by the
    /// transformer's complex-value hook.
    pub fn format_function_call<I, V>(&self, name: &str, args: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        if !self.is_enabled(Mask::Debug) {
            self.metrics.record_filtered();
            return Ok(());
        }

        let rendered: Vec<String> = {
            let transformer = self.transformer.read();
            args.into_iter()
                .map(|arg| inline_text(transformer.format_complex_value(arg.into())))
                .collect()
        };
        self.debug(format!("{}({})", name, rendered.join(", ")))
    }

    /// Apply a partial reconfiguration.
    ///
    /// An out-of-range level is rejected: the previous level stays in place
    /// and a warning is emitted through this logger. Everything else in
    /// `options` is still applied.
    pub fn set_options(&self, options: LoggerOptions) {
        let LoggerOptions {
            group,
            level,
            time_format,
            transformer,
            normal_sink,
            error_sink,
        } = options;

        if let Some(transformer) = transformer {
            *self.transformer.write() = transformer;
        }

        if normal_sink.is_some() || error_sink.is_some() {
            let mut sinks = self.sinks.lock();
            if let Some(sink) = normal_sink {
                sinks.normal = sink;
            }
            if let Some(sink) = error_sink {
                sinks.error = sink;
            }
        }

        let rejected = {
            let mut config = self.config.write();
            if let Some(group) = group {
                config.group = group;
            }
            if let Some(time_format) = time_format {
                config.time_format = time_format;
            }
            match level {
                Some(value) => match Level::try_from(value) {
                    Ok(level) => {
                        config.level = level;
                        None
                    }
                    Err(_) => Some(value),
                },
                None => None,
            }
        };

        if let Some(value) = rejected {
            let warning = format!("Invalid log level is trying to be set: {}, aborting...", value);
            if let Err(e) = self.warn(warning) {
                eprintln!("[LOGGER ERROR] Failed to report invalid log level {}: {}", value, e);
            }
        }
    }

    /// Shorthand for [`set_options`](Self::set_options) with only a level.
    pub fn set_level(&self, level: i64) {
        self.set_options(LoggerOptions::new().level(level));
    }

    pub fn flush(&self) -> Result<()> {
        let mut sinks = self.sinks.lock();
        sinks.normal.flush()?;
        sinks.error.flush()?;
        Ok(())
    }
}

/// `message`, then every stack line on its own indented line.
fn format_error(message: &str, stack: Option<&str>) -> String {
    let mut out = message.to_string();
    if let Some(stack) = stack {
        for line in stack.lines() {
            out.push('\n');
            out.push_str(STACK_INDENT);
            out.push_str(line);
        }
    }
    out
}

/// Text for a value inside a one-line call signature.
fn inline_text(value: Value) -> String {
    match value.into_text() {
        Ok(text) => text,
        Err(other) => match other.to_json() {
            Ok(json) => json.to_string(),
            Err(_) => other.type_name(),
        },
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            if !e.is_broken_pipe() {
                eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
            }
        }
    }
}

/// Partial reconfiguration for [`Logger::set_options`]; unset fields keep
/// their current value.
///
/// # Example
///
/// ```
/// use ansi_logger::{Level, Logger, LoggerOptions};
///
/// let logger = Logger::new();
/// logger.set_options(LoggerOptions::new().group("db").level(Level::DEBUG.bits().into()));
/// assert_eq!(logger.level(), Level::DEBUG);
///
/// logger.set_level(200);
/// assert_eq!(logger.level(), Level::DEBUG);
/// ```
#[derive(Default)]
pub struct LoggerOptions {
    group: Option<Option<String>>,
    level: Option<i64>,
    time_format: Option<TimestampFormat>,
    transformer: Option<Box<dyn Transformer>>,
    normal_sink: Option<Box<dyn Sink>>,
    error_sink: Option<Box<dyn Sink>>,
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(Some(group.into()));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clear_group(mut self) -> Self {
        self.group = Some(None);
        self
    }

    /// Raw level bits; validated when applied.
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: i64) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, format: TimestampFormat) -> Self {
        self.time_format = Some(format);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn transformer<T: Transformer + 'static>(mut self, transformer: T) -> Self {
        self.transformer = Some(Box::new(transformer));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn normal_sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.normal_sink = Some(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn error_sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.error_sink = Some(Box::new(sink));
        self
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use ansi_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .group("worker")
///     .level(Level::DEBUG)
///     .transformer(JsonTransformer::new())
///     .normal_sink(StreamSink::stdout())
///     .error_sink(StreamSink::stderr())
///     .build();
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    transformer: Box<dyn Transformer>,
    normal_sink: Box<dyn Sink>,
    error_sink: Box<dyn Sink>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            transformer: Box::new(TextTransformer::new()),
            normal_sink: Box::new(NullSink),
            error_sink: Box::new(NullSink),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.config.group = Some(group.into());
        self
    }

    /// Set the level filter; any union of masks is accepted.
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: impl Into<Level>) -> Self {
        self.config.level = level.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, format: TimestampFormat) -> Self {
        self.config.time_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn transformer<T: Transformer + 'static>(mut self, transformer: T) -> Self {
        self.transformer = Box::new(transformer);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_transformer(mut self, transformer: Box<dyn Transformer>) -> Self {
        self.transformer = transformer;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn normal_sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.normal_sink = Box::new(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn error_sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.error_sink = Box::new(sink);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger {
            config: RwLock::new(self.config),
            transformer: RwLock::new(self.transformer),
            sinks: Mutex::new(Sinks {
                normal: self.normal_sink,
                error: self.error_sink,
            }),
            metrics: LoggerMetrics::new(),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

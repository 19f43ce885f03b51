//! Line driver: newline-delimited JSON records in, formatted entries out
//!
//! Each input line is decoded into a [`LogEntry`], optionally after
//! renaming fields with a [`FieldMapper`], then filtered and routed by a
//! [`Logger`]. Blank lines and records whose level cannot be resolved are
//! skipped; anything else that cannot be decoded stops the run.

use crate::core::{resolve_name, LogEntry, Logger, LoggerError, Mask, Result, Value};
use serde_json::Map;
use std::io::BufRead;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Renames fields of a decoded record, given as `new=old` pairs.
///
/// # Example
///
/// ```
/// use ansi_logger::driver::FieldMapper;
///
/// let mapper: FieldMapper = "levelText=level,message=msg".parse()?;
/// assert_eq!(mapper.pairs().len(), 2);
/// # Ok::<(), ansi_logger::LoggerError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldMapper {
    pairs: Vec<(String, String)>,
}

impl FieldMapper {
    pub fn parse(spec: &str) -> Result<Self> {
        let mut pairs = Vec::new();
        for pair in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (new_key, old_key) = pair
                .split_once('=')
                .map(|(new, old)| (new.trim(), old.trim()))
                .filter(|(new, old)| !new.is_empty() && !old.is_empty())
                .ok_or_else(|| {
                    LoggerError::config("FieldMapper", format!("expected new=old, got '{}'", pair))
                })?;
            pairs.push((new_key.to_string(), old_key.to_string()));
        }
        Ok(Self { pairs })
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Apply every pair in order. The old key is removed even when absent,
    /// in which case the new key is removed as well.
    pub fn apply(&self, record: &mut Map<String, serde_json::Value>) {
        for (new_key, old_key) in &self.pairs {
            let value = record.remove(old_key);
            match value {
                Some(value) => {
                    record.insert(new_key.clone(), value);
                }
                None => {
                    record.remove(new_key);
                }
            }
        }
    }
}

impl FromStr for FieldMapper {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Decode one input line.
///
/// Returns `Ok(None)` for blank lines and for records whose level is
/// neither a number nor a known level name.
pub fn parse_record(line: &str, mapper: Option<&FieldMapper>) -> Result<Option<LogEntry>> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let decoded: serde_json::Value = serde_json::from_str(line)?;
    let serde_json::Value::Object(mut record) = decoded else {
        return Err(LoggerError::malformed(format!(
            "expected a JSON object, got: {}",
            line.trim()
        )));
    };

    if let Some(mapper) = mapper {
        mapper.apply(&mut record);
    }

    let level_text = match record.get("levelText") {
        Some(serde_json::Value::String(text)) => Some(text.clone()),
        _ => None,
    };

    let bits = match record.get("levelNumeric") {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| LoggerError::malformed(format!("invalid levelNumeric: {}", n)))?,
        None | Some(serde_json::Value::Null) => {
            match level_text.as_deref().map(Mask::from_str) {
                Some(Ok(mask)) => mask.bits(),
                _ => return Ok(None),
            }
        }
        Some(other) => {
            return Err(LoggerError::malformed(format!(
                "invalid levelNumeric: {}",
                other
            )))
        }
    };

    let group = match record.remove("group") {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(group)) => Some(group),
        Some(other) => Some(other.to_string()),
    };

    let timestamp = match record.remove("timestamp") {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(ts)) => ts,
        Some(other) => other.to_string(),
    };

    let message = record.remove("message").map_or(Value::Undefined, Value::from);

    Ok(Some(LogEntry {
        group,
        level_numeric: bits,
        level_text: Some(level_text.unwrap_or_else(|| resolve_name(bits).to_string())),
        message,
        timestamp,
    }))
}

/// Startup timer: fires `on_timeout` unless [`Watchdog::feed`] is called
/// before `timeout` elapses.
pub struct Watchdog {
    fed: Arc<AtomicBool>,
}

impl Watchdog {
    pub fn spawn<F>(timeout: Duration, on_timeout: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let fed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fed);
        let spawned = thread::Builder::new()
            .name("ansi-logger-watchdog".into())
            .spawn(move || {
                thread::sleep(timeout);
                if !flag.load(Ordering::Acquire) {
                    on_timeout();
                }
            });
        if let Err(e) = spawned {
            eprintln!("[LOGGER ERROR] Failed to start watchdog: {}", e);
        }
        Self { fed }
    }

    #[inline]
    pub fn feed(&self) {
        self.fed.store(true, Ordering::Release);
    }

    pub fn is_fed(&self) -> bool {
        self.fed.load(Ordering::Acquire)
    }
}

/// Reads records line by line and hands them to a logger.
pub struct Driver<'a> {
    logger: &'a Logger,
    mapper: Option<FieldMapper>,
    watchdog: Option<Watchdog>,
}

impl<'a> Driver<'a> {
    pub fn new(logger: &'a Logger) -> Self {
        Self {
            logger,
            mapper: None,
            watchdog: None,
        }
    }

    #[must_use]
    pub fn with_mapper(mut self, mapper: FieldMapper) -> Self {
        self.mapper = Some(mapper);
        self
    }

    /// Fed on the first non-blank line.
    #[must_use]
    pub fn with_watchdog(mut self, watchdog: Watchdog) -> Self {
        self.watchdog = Some(watchdog);
        self
    }

    /// Process every line in order, stopping at the first error. Returns the
    /// number of records handed to the logger.
    pub fn run<R: BufRead>(&self, reader: R) -> Result<usize> {
        let mut records = 0;
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                LoggerError::io_operation("reading input", format!("line {}", index + 1), e)
            })?;

            if line.trim().is_empty() {
                continue;
            }
            if let Some(watchdog) = &self.watchdog {
                watchdog.feed();
            }

            if let Some(entry) = parse_record(&line, self.mapper.as_ref())? {
                self.logger.write_entry(entry)?;
                records += 1;
            }
        }
        self.logger.flush()?;
        Ok(records)
    }
}

/// [`Driver::run`] without mapper or watchdog.
pub fn run<R: BufRead>(reader: R, logger: &Logger) -> Result<usize> {
    Driver::new(logger).run(reader)
}

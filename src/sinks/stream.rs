//! Sink writing to any `io::Write` (stdout, stderr, files)

use crate::core::{LoggerError, Output, Result, Sink};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Stderr, Stdout, Write};
use std::path::Path;

/// Writes text output verbatim and structured entries as one JSON line.
pub struct StreamSink<W: Write + Send> {
    writer: W,
    name: &'static str,
}

impl<W: Write + Send> StreamSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            name: "stream",
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl StreamSink<Stdout> {
    pub fn stdout() -> Self {
        Self {
            writer: io::stdout(),
            name: "stdout",
        }
    }
}

impl StreamSink<Stderr> {
    pub fn stderr() -> Self {
        Self {
            writer: io::stderr(),
            name: "stderr",
        }
    }
}

impl StreamSink<BufWriter<File>> {
    /// Append to a file, creating it when missing.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ansi_logger::sinks::StreamSink;
    ///
    /// let sink = StreamSink::file("/var/log/app.log")?;
    /// # Ok::<(), ansi_logger::LoggerError>(())
    /// ```
    pub fn file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation("opening log file", path.display().to_string(), e)
            })?;
        Ok(Self {
            writer: BufWriter::new(file),
            name: "file",
        })
    }
}

impl<W: Write + Send> Sink for StreamSink<W> {
    fn write(&mut self, output: &Output) -> Result<()> {
        match output {
            Output::Text(text) => self.writer.write_all(text.as_bytes())?,
            Output::Entry(entry) => {
                // encode fully first so a failed entry leaves no partial line
                let mut line = serde_json::to_vec(entry)?;
                line.push(b'\n');
                self.writer.write_all(&line)?;
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        self.name
    }
}

//! Closure-backed and discarding sinks

use crate::core::{Output, Result, Sink};

/// Adapts a closure into a [`Sink`].
///
/// # Example
///
/// ```
/// use ansi_logger::sinks::FnSink;
/// use ansi_logger::Output;
///
/// let sink = FnSink::new(|output: &Output| {
///     print!("{}", output);
///     Ok(())
/// });
/// ```
pub struct FnSink<F>
where
    F: FnMut(&Output) -> Result<()> + Send,
{
    func: F,
}

impl<F> FnSink<F>
where
    F: FnMut(&Output) -> Result<()> + Send,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Sink for FnSink<F>
where
    F: FnMut(&Output) -> Result<()> + Send,
{
    fn write(&mut self, output: &Output) -> Result<()> {
        (self.func)(output)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "fn"
    }
}

/// Drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl Sink for NullSink {
    fn write(&mut self, _output: &Output) -> Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoggerError;

    #[test]
    fn test_fn_sink_forwards_and_fails() {
        let mut seen = Vec::new();
        {
            let mut sink = FnSink::new(|output: &Output| {
                seen.push(output.to_string());
                Ok(())
            });
            sink.write(&Output::Text("x".into())).unwrap();
        }
        assert_eq!(seen, ["x"]);

        let mut failing = FnSink::new(|_: &Output| Err(LoggerError::writer("closed")));
        assert!(matches!(
            failing.write(&Output::Text("x".into())),
            Err(LoggerError::WriterError(_))
        ));
    }

    #[test]
    fn test_null_sink() {
        let mut sink = NullSink;
        assert!(sink.write(&Output::Text("gone".into())).is_ok());
        assert_eq!(sink.name(), "null");
    }
}

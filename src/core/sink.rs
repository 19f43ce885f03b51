//! Sink trait for output destinations

use super::{error::Result, transformer::Output};

pub trait Sink: Send {
    fn write(&mut self, output: &Output) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

//! Output destinations

pub mod func;
pub mod memory;
pub mod stream;

pub use func::{FnSink, NullSink};
pub use memory::MemorySink;
pub use stream::StreamSink;

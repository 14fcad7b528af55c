//! The core Mustache engine: processor, provider interface, output sinks,
//! and driver entry points.

pub mod delimiters;
pub mod driver;
pub mod processor;
pub mod provider;
pub mod sink;
pub mod trace;

pub use delimiters::Delimiters;
pub use driver::{render_to_string, render_to_writer, render_with_callback, render_with_sink};
pub use provider::Provider;
pub use sink::{BufferSink, CallbackSink, Sink, WriterSink};

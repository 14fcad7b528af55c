//! Driver entry points: sink construction, provider start/stop lifecycle,
//! processor invocation, result translation.

use std::io::Write;

use crate::error::Error;
use crate::mustache::delimiters::Delimiters;
use crate::mustache::processor;
use crate::mustache::provider::Provider;
use crate::mustache::sink::{BufferSink, CallbackSink, Sink, WriterSink};
use crate::mustache::trace::RenderTrace;
use crate::options::RenderOptions;

/// Render `template` against `provider` through an arbitrary [`Sink`].
///
/// Calls `provider.start()` before the processor runs and `provider.stop()`
/// unconditionally afterward, regardless of outcome — including when
/// `start()` itself fails — so a provider can rely on both lifecycle hooks
/// firing exactly once per render.
pub fn render_with_sink(
    template: &str,
    provider: &mut dyn Provider,
    sink: &mut dyn Sink,
    options: &RenderOptions,
) -> Result<(), Error> {
    let trace = RenderTrace::new(options.trace);
    trace.session_start(template.len());
    let outcome = provider.start().and_then(|()| {
        let mut delims = Delimiters::default();
        let mut active_partials = Vec::new();
        processor::render(
            template,
            provider,
            sink,
            &mut delims,
            options,
            &trace,
            0,
            &mut active_partials,
        )
    });
    provider.stop(&outcome);
    trace.session_end(&outcome);
    outcome
}

/// Render to an owned `String`.
pub fn render_to_string(
    template: &str,
    provider: &mut dyn Provider,
    options: &RenderOptions,
) -> Result<String, Error> {
    let mut sink = BufferSink::new();
    render_with_sink(template, provider, &mut sink, options)?;
    sink.into_string()
}

/// Render to any `std::io::Write` — a file handle, a socket, stdout, or
/// anything else that implements the trait.
pub fn render_to_writer<W: Write>(
    template: &str,
    provider: &mut dyn Provider,
    writer: W,
    options: &RenderOptions,
) -> Result<(), Error> {
    let mut sink = WriterSink::new(writer);
    render_with_sink(template, provider, &mut sink, options)
}

/// Render via a caller-supplied byte-sink callback. A caller wanting to
/// bypass the built-in escaping emitter entirely should override
/// `Provider::emit` instead — that capability already models exactly that
/// behavior.
pub fn render_with_callback<F: FnMut(&[u8]) -> Result<(), Error>>(
    template: &str,
    provider: &mut dyn Provider,
    callback: F,
    options: &RenderOptions,
) -> Result<(), Error> {
    let mut sink = CallbackSink::new(callback);
    render_with_sink(template, provider, &mut sink, options)
}

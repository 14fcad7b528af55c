//! # mustache_core
//!
//! A Mustache template rendering engine built around a pluggable
//! value-provider interface: the processor owns tokenizing, section-stack
//! bookkeeping, and tag dispatch, while a host-supplied [`Provider`]
//! resolves names, drives section iteration, and optionally takes over
//! escaping or partial resolution.

mod error;
mod mustache;
mod options;
pub mod providers;

pub use error::Error;
pub use mustache::{
    render_to_string, render_to_writer, render_with_callback, render_with_sink, BufferSink,
    CallbackSink, Delimiters, Provider, Sink, WriterSink,
};
pub use options::RenderOptions;

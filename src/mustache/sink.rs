//! Output sink abstraction: direct writers and a growable buffer, plus the
//! default HTML escaper.

use crate::error::Error;
use std::io::Write;

/// A destination for rendered bytes.
///
/// A small abstraction with one effective operation: emit a byte span.
/// `escape` is already resolved by the time `write_raw` is reached for
/// literal/escape-exempt spans; callers needing HTML escape go through
/// [`write_escaped`] instead.
pub trait Sink {
    fn write_raw(&mut self, bytes: &[u8]) -> Result<(), Error>;
}

/// A direct sink wrapping any `std::io::Write` — covers the file-handle,
/// file-descriptor and stdout/stdin destinations, which Rust unifies
/// behind one trait instead of three entry-point families.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        WriterSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for WriterSink<W> {
    fn write_raw(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.writer.write_all(bytes).map_err(Error::from)
    }
}

/// A buffered, growable sink. Used for `render_to_string`, and internally
/// as the generic partial-fallback mechanism: when a provider implements
/// neither `partial` nor `get` for a name, the engine renders that name's
/// *value* through a private `BufferSink` and treats the resulting bytes
/// as the partial template.
#[derive(Debug, Default)]
pub struct BufferSink {
    buf: Vec<u8>,
}

impl BufferSink {
    pub fn new() -> Self {
        BufferSink { buf: Vec::new() }
    }

    /// Consume the sink, yielding its contents as a `String`.
    ///
    /// Mustache templates and the values fed through this sink are all
    /// UTF-8 in this crate's data model, so a non-UTF-8 buffer indicates a
    /// provider returned raw bytes that don't round-trip as text; reported
    /// as a system error since it isn't a Mustache-defined outcome.
    pub fn into_string(self) -> Result<String, Error> {
        String::from_utf8(self.buf).map_err(|e| {
            Error::System(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }
}

impl Sink for BufferSink {
    fn write_raw(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.buf.extend_from_slice(bytes);
        Ok(())
    }
}

/// A sink that forwards every write to a caller-supplied callback.
pub struct CallbackSink<F: FnMut(&[u8]) -> Result<(), Error>> {
    callback: F,
}

impl<F: FnMut(&[u8]) -> Result<(), Error>> CallbackSink<F> {
    pub fn new(callback: F) -> Self {
        CallbackSink { callback }
    }
}

impl<F: FnMut(&[u8]) -> Result<(), Error>> Sink for CallbackSink<F> {
    fn write_raw(&mut self, bytes: &[u8]) -> Result<(), Error> {
        (self.callback)(bytes)
    }
}

/// The five HTML-sensitive bytes and their entity replacements, in scan
/// order.
const ESCAPE_TABLE: [(u8, &str); 5] = [
    (b'&', "&amp;"),
    (b'<', "&lt;"),
    (b'>', "&gt;"),
    (b'"', "&quot;"),
    (b'\'', "&#39;"),
];

/// Find the next byte offset in `bytes` that needs HTML-escaping, using
/// `memchr`'s multi-needle scan (capped at 3 needles per call) to batch the
/// five-character lookup into two passes instead of a per-byte loop — the
/// same idiom fast HTML-escaping crates use.
fn next_escape_boundary(bytes: &[u8]) -> Option<usize> {
    let first_three = memchr::memchr3(b'&', b'<', b'>', bytes);
    let last_two = memchr::memchr2(b'"', b'\'', bytes);
    match (first_three, last_two) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

fn escape_of(byte: u8) -> Option<&'static str> {
    ESCAPE_TABLE
        .iter()
        .find(|(b, _)| *b == byte)
        .map(|(_, entity)| *entity)
}

/// Write `bytes` to `sink`, HTML-escaping the five sensitive characters when
/// `escape` is true; a raw copy otherwise. This is the engine's default
/// emitter, used whenever a provider doesn't supply its own `emit`.
pub fn write_escaped(sink: &mut dyn Sink, bytes: &[u8], escape: bool) -> Result<(), Error> {
    if !escape {
        return sink.write_raw(bytes);
    }
    let mut pos = 0;
    while pos < bytes.len() {
        match next_escape_boundary(&bytes[pos..]) {
            None => {
                sink.write_raw(&bytes[pos..])?;
                break;
            }
            Some(rel) => {
                if rel > 0 {
                    sink.write_raw(&bytes[pos..pos + rel])?;
                }
                let byte = bytes[pos + rel];
                sink.write_raw(escape_of(byte).unwrap_or_default().as_bytes())?;
                pos += rel + 1;
            }
        }
    }
    Ok(())
}

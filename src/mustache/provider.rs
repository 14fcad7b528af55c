//! The value-provider capability bundle.

use crate::error::Error;
use crate::mustache::sink::Sink;

/// The host-supplied interface the processor consults to resolve names and
/// drive section iteration.
///
/// `enter`/`next`/`leave` are the only capabilities every implementor must
/// provide — a provider backing a template with no sections never has them
/// called. `get`/`put`/`emit`/`partial`/`start`/`stop` are optional; their
/// default implementations encode a fallback chain so a minimal
/// implementation only needs to supply `get`:
///
/// - `put` defaults to `Err(Error::InvalidItf)`, signaling "not implemented,
///   fall back to `get`" to the processor.
/// - `get` defaults the same way; if both are unimplemented for a name, the
///   processor's delivery returns `Error::InvalidItf`.
/// - `emit` defaults to `Ok(false)` ("didn't handle it, use the built-in
///   escaping emitter"), since it's a pure enhancement over the default
///   emitter rather than part of a required/fallback chain.
/// - `partial` defaults to `Err(Error::InvalidItf)`, triggering the
///   `get`-then-buffered-render fallback chain in the processor.
pub trait Provider {
    /// Called once at invocation entry, before the first tag is scanned.
    fn start(&mut self) -> Result<(), Error> {
        Ok(())
    }

    /// Called once at invocation exit, with the processor's outcome.
    /// Invoked unconditionally on every exit path.
    fn stop(&mut self, _outcome: &Result<(), Error>) {}

    /// Resolve `name` and push it as the new current scope for a section.
    /// `Ok(true)`: entered, the section body runs (at least once, pending
    /// `next`). `Ok(false)`: falsy/missing/empty, the body is skipped.
    fn enter(&mut self, name: &str) -> Result<bool, Error>;

    /// Advance iteration of the current section. `Ok(true)`: another item
    /// exists, the body runs again. `Ok(false)`: iteration is done.
    fn next(&mut self) -> Result<bool, Error>;

    /// Pop the current section's scope.
    fn leave(&mut self);

    /// Resolve `name` to an owned string for interpolation or as a partial
    /// fallback. `Err(Error::ItemNotFound)` for a genuinely missing name;
    /// the default `Err(Error::InvalidItf)` signals "not implemented."
    fn get(&mut self, _name: &str) -> Result<String, Error> {
        Err(Error::InvalidItf)
    }

    /// Write the resolved value for `name` directly to `sink`, honoring
    /// `escape`. An alternative to `get` that lets the provider avoid an
    /// intermediate allocation.
    fn put(&mut self, _name: &str, _escape: bool, _sink: &mut dyn Sink) -> Result<(), Error> {
        Err(Error::InvalidItf)
    }

    /// Write `bytes` to `sink`, with the provider performing its own
    /// escaping decision instead of the built-in emitter. Returns `Ok(true)`
    /// if handled, `Ok(false)` to fall back to the default emitter.
    fn emit(&mut self, _bytes: &[u8], _escape: bool, _sink: &mut dyn Sink) -> Result<bool, Error> {
        Ok(false)
    }

    /// Resolve `name` to a partial template's source text.
    /// `Err(Error::PartialNotFound)` for a genuinely missing partial; the
    /// default `Err(Error::InvalidItf)` triggers the `get`-then-buffered-
    /// render fallback chain.
    fn partial(&mut self, _name: &str) -> Result<String, Error> {
        Err(Error::InvalidItf)
    }
}

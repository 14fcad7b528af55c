//! The recursive-descent tag scanner, section-stack state machine, and
//! dispatcher. Translated statement-by-statement from the reference
//! `mustach.c` `process()` function into idiomatic Rust control flow.

use smallvec::SmallVec;

use crate::error::Error;
use crate::mustache::delimiters::Delimiters;
use crate::mustache::provider::Provider;
use crate::mustache::sink::{write_escaped, BufferSink, Sink};
use crate::mustache::trace::RenderTrace;
use crate::options::RenderOptions;

/// One entry of the section stack. Borrows its name from the template
/// being scanned: purely stack-resident, no heap ownership for frames.
struct Frame<'t> {
    name: &'t str,
    again: usize,
    enabled_on_entry: bool,
    entered: bool,
    inverted: bool,
}

/// Render `template` against `provider`, writing output to `sink`.
///
/// `partial_depth` counts levels of partial inclusion so far (0 at the
/// top-level call); it, together with the section-stack depth, is bounded
/// by [`Error::DEPTH_MAX`] to guard against runaway recursion. `active_partials`
/// names every partial currently being rendered by an enclosing call on this
/// same stack; a name already present there means direct or indirect
/// self-inclusion, reported as `Error::TooDeep` without waiting for the
/// depth ceiling to be hit.
pub fn render(
    template: &str,
    provider: &mut dyn Provider,
    sink: &mut dyn Sink,
    delims: &mut Delimiters,
    options: &RenderOptions,
    trace: &RenderTrace,
    partial_depth: usize,
    active_partials: &mut Vec<String>,
) -> Result<(), Error> {
    let mut enabled = true;
    let mut cursor = 0usize;
    let mut stack: SmallVec<[Frame<'_>; 32]> = SmallVec::new();

    loop {
        let rest = &template[cursor..];
        let open_rel = match rest.find(delims.open.as_str()) {
            Some(p) => p,
            None => {
                if enabled && !rest.is_empty() {
                    emit(provider, sink, rest.as_bytes(), false, options)?;
                    trace.literal(rest);
                }
                return if stack.is_empty() {
                    Ok(())
                } else {
                    Err(Error::UnexpectedEnd)
                };
            }
        };

        let open_at = cursor + open_rel;
        if enabled && open_at > cursor {
            let literal = &template[cursor..open_at];
            emit(provider, sink, literal.as_bytes(), false, options)?;
            trace.literal(literal);
        }

        let after_open = open_at + delims.open.len();
        let close_rel = template[after_open..]
            .find(delims.close.as_str())
            .ok_or(Error::UnexpectedEnd)?;
        let close_at = after_open + close_rel;
        let mut tag_body = &template[after_open..close_at];
        let mut next_cursor = close_at + delims.close.len();

        let sigil = tag_body.as_bytes().first().copied();
        match sigil {
            Some(b'!') => {
                trace.tag('!', tag_body.trim());
            }
            Some(b'=') => {
                let (new_open, new_close) = parse_delimiter_change(tag_body)?;
                trace.tag('=', &format!("{new_open} {new_close}"));
                delims.open = new_open;
                delims.close = new_close;
            }
            Some(b'{') => {
                if delims.close_is_all_braces() {
                    if template.as_bytes().get(next_cursor) != Some(&b'}') {
                        return Err(Error::BadUnescapeTag);
                    }
                    next_cursor += 1;
                } else {
                    if !tag_body.ends_with('}') {
                        return Err(Error::BadUnescapeTag);
                    }
                    tag_body = &tag_body[..tag_body.len() - 1];
                }
                let name = extract_name(&tag_body[1..], options)?;
                trace.tag('{', name);
                if enabled {
                    deliver(provider, name, false, sink, options)?;
                }
            }
            Some(b'&') => {
                let name = extract_name(&tag_body[1..], options)?;
                trace.tag('&', name);
                if enabled {
                    deliver(provider, name, false, sink, options)?;
                }
            }
            Some(c @ b'#') | Some(c @ b'^') => {
                let inverted = c == b'^';
                let name = extract_name(&tag_body[1..], options)?;
                if stack.len() >= Error::DEPTH_MAX {
                    return Err(Error::TooDeep);
                }
                let entered = if enabled { provider.enter(name)? } else { false };
                let region_ok = if inverted { !entered } else { entered };
                trace.section_enter(name, inverted, entered);
                stack.push(Frame {
                    name,
                    again: next_cursor,
                    enabled_on_entry: enabled,
                    entered,
                    inverted,
                });
                enabled = enabled && region_ok;
            }
            Some(b'/') => {
                let name = extract_name(&tag_body[1..], options)?;
                let frame = stack.pop().ok_or(Error::Closing)?;
                if frame.name != name {
                    return Err(Error::Closing);
                }
                let again = if enabled && frame.entered {
                    provider.next()?
                } else {
                    false
                };
                trace.section_next(name, again);
                if again {
                    cursor = frame.again;
                    stack.push(frame);
                    continue;
                }
                enabled = frame.enabled_on_entry;
                if enabled && frame.entered {
                    provider.leave();
                }
            }
            Some(b'>') => {
                let name = extract_name(&tag_body[1..], options)?;
                trace.tag('>', name);
                if enabled {
                    if partial_depth >= Error::DEPTH_MAX {
                        return Err(Error::TooDeep);
                    }
                    if active_partials.iter().any(|n| n == name) {
                        return Err(Error::TooDeep);
                    }
                    let resolved = resolve_partial(provider, name, options, trace)?;
                    let mut nested_delims = delims.clone();
                    active_partials.push(name.to_string());
                    let result = render(
                        &resolved,
                        provider,
                        sink,
                        &mut nested_delims,
                        options,
                        trace,
                        partial_depth + 1,
                        active_partials,
                    );
                    active_partials.pop();
                    result?;
                }
            }
            _ => {
                // Default: escaped interpolation, and any unclassified
                // sigil (including `:`, which is not given special
                // treatment even when enable_colon_extension is set).
                let name = extract_name(tag_body, options)?;
                trace.tag('$', name);
                if enabled {
                    deliver(provider, name, options.escape_html, sink, options)?;
                }
            }
        }

        cursor = next_cursor;
    }
}

/// Trim ASCII whitespace and enforce the name-length/empty-tag invariants
/// shared by every sigil-bearing tag.
fn extract_name<'t>(raw: &'t str, options: &RenderOptions) -> Result<&'t str, Error> {
    let trimmed = raw.trim_matches(|c: char| c.is_ascii_whitespace());
    if trimmed.is_empty() && !options.allow_empty_tag {
        return Err(Error::EmptyTag);
    }
    if trimmed.len() > Error::NAME_LENGTH_MAX {
        return Err(Error::TagTooLong);
    }
    Ok(trimmed)
}

/// Parse a `=NEWOPEN NEWCLOSE=` body (already stripped of the surrounding
/// tag delimiters, still carrying its own leading/trailing `=`).
fn parse_delimiter_change(raw: &str) -> Result<(String, String), Error> {
    if raw.len() < 2 || !raw.starts_with('=') || !raw.ends_with('=') {
        return Err(Error::BadSeparators);
    }
    let inner = raw[1..raw.len() - 1].trim_matches(|c: char| c.is_ascii_whitespace());
    let mut parts = inner.split_whitespace();
    let open = parts.next().ok_or(Error::BadSeparators)?;
    let close = parts.next().ok_or(Error::BadSeparators)?;
    if parts.next().is_some() {
        return Err(Error::BadSeparators);
    }
    Ok((open.to_string(), close.to_string()))
}

/// Deliver a resolved value for `name` to `sink`: try `put`, then fall back
/// to `get` + the default emitter. Mirrors `mustach.c`'s static `put()`.
fn deliver(
    provider: &mut dyn Provider,
    name: &str,
    escape: bool,
    sink: &mut dyn Sink,
    options: &RenderOptions,
) -> Result<(), Error> {
    match provider.put(name, escape, sink) {
        Ok(()) => return Ok(()),
        Err(Error::InvalidItf) => {}
        Err(Error::ItemNotFound) if options.emit_errors_as_placeholders => return Ok(()),
        Err(e) => return Err(e),
    }
    let value = match provider.get(name) {
        Ok(v) => v,
        Err(Error::ItemNotFound) if options.emit_errors_as_placeholders => return Ok(()),
        Err(e) => return Err(e),
    };
    emit(provider, sink, value.as_bytes(), escape, options)
}

/// Emit `bytes` to `sink`: try the provider's own `emit`, then fall back to
/// the default (HTML-escaping when `escape`) emitter. Mirrors `mustach.c`'s
/// static `emit()`, used uniformly for literal spans (`escape=false`) and
/// interpolated values.
fn emit(
    provider: &mut dyn Provider,
    sink: &mut dyn Sink,
    bytes: &[u8],
    escape: bool,
    _options: &RenderOptions,
) -> Result<(), Error> {
    if provider.emit(bytes, escape, sink)? {
        return Ok(());
    }
    write_escaped(sink, bytes, escape)
}

/// Resolve a partial's source text: try `partial`, then `get`, then the
/// generic buffered-sink divert.
fn resolve_partial(
    provider: &mut dyn Provider,
    name: &str,
    options: &RenderOptions,
    trace: &RenderTrace,
) -> Result<String, Error> {
    match provider.partial(name) {
        Ok(text) => {
            trace.partial(name, "partial()");
            return Ok(text);
        }
        Err(Error::InvalidItf) => {}
        Err(Error::PartialNotFound) if options.emit_errors_as_placeholders => {
            return Ok(String::new());
        }
        Err(e) => return Err(e),
    }
    match provider.get(name) {
        Ok(text) => {
            trace.partial(name, "get() fallback");
            return Ok(text);
        }
        Err(Error::InvalidItf) => {}
        Err(Error::ItemNotFound) if options.emit_errors_as_placeholders => {
            return Ok(String::new());
        }
        Err(e) => return Err(e),
    }
    let mut buffer = BufferSink::new();
    deliver(provider, name, false, &mut buffer, options)?;
    trace.partial(name, "buffered-sink divert");
    buffer.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mustache::sink::BufferSink;
    use std::collections::HashMap;

    /// A minimal, non-section-capable provider: every capability but
    /// enter/next/leave is left at its `InvalidItf` default except `get`,
    /// which resolves against a flat map. Used to exercise the processor's
    /// fallback chains directly, independent of `JsonProvider`.
    struct MapProvider(HashMap<&'static str, &'static str>);

    impl Provider for MapProvider {
        fn enter(&mut self, _name: &str) -> Result<bool, Error> {
            Ok(false)
        }
        fn next(&mut self) -> Result<bool, Error> {
            Ok(false)
        }
        fn leave(&mut self) {}
        fn get(&mut self, name: &str) -> Result<String, Error> {
            self.0
                .get(name)
                .map(|v| v.to_string())
                .ok_or(Error::ItemNotFound)
        }
    }

    fn render_str(template: &str, provider: &mut dyn Provider) -> Result<String, Error> {
        let mut sink = BufferSink::new();
        let mut delims = Delimiters::default();
        let options = RenderOptions::default();
        let trace = RenderTrace::new(false);
        let mut active_partials = Vec::new();
        render(
            template,
            provider,
            &mut sink,
            &mut delims,
            &options,
            &trace,
            0,
            &mut active_partials,
        )?;
        sink.into_string()
    }

    #[test]
    fn literal_only_template_passes_through() {
        let mut provider = MapProvider(HashMap::new());
        assert_eq!(
            render_str("just plain text", &mut provider).unwrap(),
            "just plain text"
        );
    }

    #[test]
    fn comment_tag_is_ignored() {
        let mut provider = MapProvider(HashMap::new());
        assert_eq!(
            render_str("a{{! a comment }}b", &mut provider).unwrap(),
            "ab"
        );
    }

    #[test]
    fn missing_put_falls_back_to_get() {
        let mut provider = MapProvider(HashMap::from([("name", "World")]));
        assert_eq!(
            render_str("Hi {{name}}", &mut provider).unwrap(),
            "Hi World"
        );
    }

    #[test]
    fn neither_put_nor_get_is_invalid_itf() {
        struct Bare;
        impl Provider for Bare {
            fn enter(&mut self, _: &str) -> Result<bool, Error> {
                Ok(false)
            }
            fn next(&mut self) -> Result<bool, Error> {
                Ok(false)
            }
            fn leave(&mut self) {}
        }
        let mut provider = Bare;
        let err = render_str("{{x}}", &mut provider).unwrap_err();
        assert_eq!(err.code(), Error::InvalidItf.code());
    }

    #[test]
    fn custom_delimiters_are_honored() {
        let mut provider = MapProvider(HashMap::from([("x", "Z")]));
        assert_eq!(
            render_str("{{=<% %>=}}<% x %>", &mut provider).unwrap(),
            "Z"
        );
    }

    /// A provider whose `partial` always resolves a name to a template that
    /// includes that same name again, so `{{>self}}` recurses onto itself.
    struct SelfIncludingProvider;

    impl Provider for SelfIncludingProvider {
        fn enter(&mut self, _: &str) -> Result<bool, Error> {
            Ok(false)
        }
        fn next(&mut self) -> Result<bool, Error> {
            Ok(false)
        }
        fn leave(&mut self) {}
        fn partial(&mut self, name: &str) -> Result<String, Error> {
            Ok(format!("before{{{{>{name}}}}}after"))
        }
    }

    #[test]
    fn self_including_partial_is_caught_immediately_as_too_deep() {
        let mut provider = SelfIncludingProvider;
        let err = render_str("{{>self}}", &mut provider).unwrap_err();
        assert_eq!(err.code(), Error::TooDeep.code());
    }
}

//! Render-time flags, expressed as a plain struct of bools rather than
//! introducing a separate `bitflags` dependency.

/// Options threaded through a render call.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Whether an empty tag name (`{{ }}`) after trimming is accepted.
    /// Default: `true` — empty names after trimming are allowed.
    pub allow_empty_tag: bool,
    /// Whether `:` is recognized as a distinct sigil. Currently inert —
    /// `:`-prefixed tags resolve their literal name either way — kept for
    /// forward API compatibility.
    pub enable_colon_extension: bool,
    /// When an interpolated name resolves to `Error::ItemNotFound`, emit an
    /// empty string instead of aborting the render. Structural errors
    /// (depth, closing mismatch, delimiter syntax, `InvalidItf`) are never
    /// downgraded by this flag — only a provider-reported missing item is.
    pub emit_errors_as_placeholders: bool,
    /// Whether default (non-`&`, non-triple-brace) interpolation HTML-escapes
    /// its output. Default: `true`.
    pub escape_html: bool,
    /// Whether to print `DEBUG: ...` tag-dispatch diagnostics to stderr as
    /// the template is walked. Default: `false`.
    pub trace: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            allow_empty_tag: true,
            enable_colon_extension: false,
            emit_errors_as_placeholders: false,
            escape_html: true,
            trace: false,
        }
    }
}

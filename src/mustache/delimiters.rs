//! Invocation-scoped open/close delimiter pair.

/// The current open/close delimiter pair for a processor invocation.
///
/// Owned by value so that the recursive call made to render a partial gets
/// its own clone: a `{{= ... =}}` change made inside the partial mutates
/// only that clone and never leaks back to the caller's delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub open: String,
    pub close: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Delimiters {
            open: "{{".to_string(),
            close: "}}".to_string(),
        }
    }
}

impl Delimiters {
    /// True when the close delimiter consists entirely of `}` bytes (the
    /// default `}}` case, and the only shape under which the third `}` of a
    /// triple-brace tag is looked for *after* the matched close delimiter
    /// rather than as the last byte of the captured tag body).
    pub fn close_is_all_braces(&self) -> bool {
        !self.close.is_empty() && self.close.bytes().all(|b| b == b'}')
    }
}

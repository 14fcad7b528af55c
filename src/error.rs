//! The closed error taxonomy shared by the processor, providers and driver.

use std::fmt;

/// Every failure the engine can report, mirroring the fixed outcome table
/// a Mustache driver maps to diagnostics.
#[derive(Debug)]
pub enum Error {
    /// Underlying I/O failure. Carries the originating `io::Error` in place
    /// of a separate errno side-channel.
    System(std::io::Error),
    /// Unterminated tag or unclosed section at end of template.
    UnexpectedEnd,
    /// Empty tag name while `RenderOptions::allow_empty_tag` is false.
    EmptyTag,
    /// Tag name longer than the name-length ceiling.
    TagTooLong,
    /// Malformed `{{= ... =}}` delimiter-change tag.
    BadSeparators,
    /// Section stack depth, or partial recursion depth, exceeded.
    TooDeep,
    /// `{{/name}}` didn't match the innermost open section.
    Closing,
    /// Malformed triple-brace unescape tag.
    BadUnescapeTag,
    /// Provider lacks a required capability for the operation.
    InvalidItf,
    /// Provider resolved a name to nothing.
    ItemNotFound,
    /// Provider resolved a partial name to nothing.
    PartialNotFound,
}

impl Error {
    /// The name-length ceiling enforced when extracting a trimmed tag name.
    pub const NAME_LENGTH_MAX: usize = 1024;
    /// The section-stack and partial-recursion depth ceiling.
    pub const DEPTH_MAX: usize = 256;

    /// Numeric outcome code for a driver to report, one per variant.
    pub fn code(&self) -> i32 {
        match self {
            Error::System(_) => -1,
            Error::UnexpectedEnd => -2,
            Error::EmptyTag => -3,
            Error::TagTooLong => -4,
            Error::BadSeparators => -5,
            Error::TooDeep => -6,
            Error::Closing => -7,
            Error::BadUnescapeTag => -8,
            Error::InvalidItf => -9,
            Error::ItemNotFound => -10,
            Error::PartialNotFound => -11,
        }
    }

    /// Fixed English message, indexed conceptually by `abs(code())`, for a
    /// driver to print on failure.
    pub fn message(&self) -> &'static str {
        match self {
            Error::System(_) => "system error",
            Error::UnexpectedEnd => "unexpected end of template",
            Error::EmptyTag => "empty tag",
            Error::TagTooLong => "tag name too long",
            Error::BadSeparators => "bad delimiter separators",
            Error::TooDeep => "too deep",
            Error::Closing => "closing tag mismatch",
            Error::BadUnescapeTag => "bad unescape tag",
            Error::InvalidItf => "provider does not implement the required capability",
            Error::ItemNotFound => "item not found",
            Error::PartialNotFound => "partial not found",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::System(e) => write!(f, "system error: {e}"),
            other => f.write_str(other.message()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::System(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::System(e)
    }
}

//! The error type for the format-token engine.
//!
//! Configuration mistakes (an invalid locale tag, an unknown time zone, a
//! format string with no recognized tokens) surface as hard errors at call
//! time. Data-quality problems never reach this type; they degrade to
//! best-effort values with a logged warning.

use core::fmt;
use std::borrow::Cow;

/// `ErrorKind` discriminates the categories of [`DateFmtError`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A general-purpose error.
    #[default]
    Generic,
    /// An out-of-range or otherwise invalid configuration value.
    Range,
    /// A malformed input string that must be well-formed (locale tags,
    /// format strings).
    Syntax,
    /// An internal assertion failed.
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Range => "RangeError",
            Self::Syntax => "SyntaxError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// The error returned by the formatting, parsing, and option-resolution
/// entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFmtError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}

impl DateFmtError {
    #[inline]
    #[must_use]
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Creates a general error with the provided message.
    #[inline]
    #[must_use]
    pub fn general(msg: &'static str) -> Self {
        Self::new(ErrorKind::Generic).with_message(msg)
    }

    /// Creates a range error.
    #[inline]
    #[must_use]
    pub const fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Creates a syntax error.
    #[inline]
    #[must_use]
    pub const fn syntax() -> Self {
        Self::new(ErrorKind::Syntax)
    }

    /// Creates an internal assertion error.
    #[inline]
    #[must_use]
    #[allow(dead_code)]
    pub(crate) const fn assert() -> Self {
        Self::new(ErrorKind::Assert)
    }

    /// Attaches a message to the error.
    #[inline]
    #[must_use]
    pub fn with_message(mut self, msg: impl Into<Cow<'static, str>>) -> Self {
        self.msg = msg.into();
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for DateFmtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.msg.is_empty() {
            write!(f, ": {}", self.msg)?;
        }
        Ok(())
    }
}

impl std::error::Error for DateFmtError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let err = DateFmtError::range().with_message("time zone is not recognized.");
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(err.to_string(), "RangeError: time zone is not recognized.");
    }

    #[test]
    fn messageless_display() {
        assert_eq!(DateFmtError::syntax().to_string(), "SyntaxError");
    }
}

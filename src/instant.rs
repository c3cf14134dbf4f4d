//! The `Instant` epoch-millisecond value.

use core::fmt;

use crate::civil::CivilDateTime;

/// An exact point on the time line, measured in milliseconds since the Unix
/// epoch.
///
/// `Instant` carries an explicit invalid sentinel, mirroring the
/// "invalid date" value of the UI layer this engine serves: [`crate::parse`]
/// returns [`Instant::INVALID`] for empty or entirely unparseable input
/// rather than failing, and [`crate::format`] rejects the sentinel up
/// front. Use [`Instant::is_valid`] before trusting a parsed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(i64);

impl Instant {
    /// The invalid-instant sentinel.
    pub const INVALID: Self = Self(i64::MIN);

    /// Creates an `Instant` from milliseconds since the Unix epoch.
    #[inline]
    #[must_use]
    pub const fn from_epoch_milliseconds(ms: i64) -> Self {
        Self(ms)
    }

    /// Creates an `Instant` from UTC civil fields.
    #[must_use]
    pub fn from_utc(datetime: &CivilDateTime) -> Self {
        Self(datetime.as_epoch_ms())
    }

    /// Returns the milliseconds since the Unix epoch.
    #[inline]
    #[must_use]
    pub const fn epoch_milliseconds(&self) -> i64 {
        self.0
    }

    /// Returns whether this instant holds a real point in time.
    #[inline]
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 != i64::MIN
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            self.0.fmt(f)
        } else {
            f.write_str("invalid")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_not_valid() {
        assert!(!Instant::INVALID.is_valid());
        assert!(Instant::from_epoch_milliseconds(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(Instant::from_epoch_milliseconds(1500).to_string(), "1500");
        assert_eq!(Instant::INVALID.to_string(), "invalid");
    }
}

//! The `datefmt_rs` crate is a locale-aware date/time formatting,
//! parsing, and calendar-difference engine built on a compact format
//! token language.
//!
//! ```rust
//! use datefmt_rs::{Instant, ParseFormatOptions};
//!
//! let options = ParseFormatOptions {
//!     locales: vec!["en-US".to_owned()],
//!     formats: vec!["EEE, MMM d, y".to_owned()],
//!     time_zone: Some("America/New_York".to_owned()),
//!     ..Default::default()
//! };
//!
//! // 2021-01-15T00:00:00Z, which is still January 14 in New York.
//! let instant = Instant::from_epoch_milliseconds(1_610_668_800_000);
//! assert_eq!(datefmt_rs::format(instant, &options).unwrap(), "Thu, Jan 14, 2021");
//!
//! let parsed = datefmt_rs::parse("Thu, Jan 14, 2021", &options).unwrap();
//! assert_eq!(datefmt_rs::format(parsed, &options).unwrap(), "Thu, Jan 14, 2021");
//! ```
//!
//! Format strings mix field tokens (`y`, `MMM`, `HH`, ...) with literal
//! text; a handful of style tokens (`ud`, `et`, `r`, ...) stand for whole
//! locale-preset patterns. The same format drives both directions:
//! [`format`] renders an [`Instant`] through a locale and a time zone,
//! and [`parse`] inverts it, verifying each candidate by formatting it
//! back. [`diff_dates`] measures the span between two instants in a
//! calendar-aware unit.
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::too_many_lines,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap
)]

pub mod error;
pub mod options;
pub mod part;
pub mod provider;
pub mod token;

pub(crate) mod sys;

mod civil;
mod diff;
mod formatter;
mod instant;
mod locale;
mod parser;
mod tokenizer;
mod tzdb;

#[doc(hidden)]
pub(crate) mod utils;

#[doc(inline)]
pub use error::{DateFmtError, ErrorKind};

pub use civil::{CivilDate, CivilDateTime, CivilTime};
pub use diff::{diff_dates, diff_dates_with, DateDiff};
pub use formatter::FormattedDateTime;
pub use instant::Instant;
pub use locale::CompiledLocale;
pub use options::{
    DateStyle, FieldStyle, Granularity, HourCycle, ParseFormatOptions, TimeStyle,
};
pub use part::{DatePart, DatePartCollection};
pub use provider::{FormatPart, LocalePrimitive, TimeZoneProvider};
pub use token::FieldKind;
pub use tzdb::CompiledTz;

use options::ResolvedParseFormatOptions;
use writeable::Writeable;

/// The crate-wide result type.
pub type DateFmtResult<T> = Result<T, DateFmtError>;

// Milliseconds constants
pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;
pub const MS_PER_WEEK: i64 = 7 * MS_PER_DAY;
/// A fixed 365-day year, used by the fast paths of the difference
/// engine.
pub const MS_PER_YEAR: i64 = 365 * MS_PER_DAY;

/// Formats an instant to a string with the resolved locale, format, and
/// time zone of `options`.
pub fn format(instant: Instant, options: &ParseFormatOptions) -> DateFmtResult<String> {
    Ok(format_to_parts(instant, options)?
        .write_to_string()
        .into_owned())
}

/// Formats an instant to its ordered `(type, value)` parts.
pub fn format_to_parts(
    instant: Instant,
    options: &ParseFormatOptions,
) -> DateFmtResult<FormattedDateTime> {
    let zones = CompiledTz;
    let resolved = ResolvedParseFormatOptions::resolve(options, &zones)?;
    let primitive = CompiledLocale::new(resolved.locale);
    formatter::format_resolved(&resolved, &primitive, &zones, instant)
}

/// Parses a formatted date/time string back to an instant, trying each
/// configured format until one round-trips.
pub fn parse(value: &str, options: &ParseFormatOptions) -> DateFmtResult<Instant> {
    let zones = CompiledTz;
    let resolved = ResolvedParseFormatOptions::resolve(options, &zones)?;
    let primitive = CompiledLocale::new(resolved.locale);
    parser::parse_resolved(&resolved, &primitive, &zones, value)
}

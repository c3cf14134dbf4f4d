//! The `LocalePrimitive` and `TimeZoneProvider` traits.
//!
//! These are the engine's two external collaborators: a locale-aware
//! rendering primitive and a time-zone data source. The compiled-data
//! implementations live in [`crate::locale`] and [`crate::tzdb`]; tests
//! substitute their own to pin down engine behavior, in particular the
//! formatter's handling of a primitive that silently resolves different
//! options than were requested.

use crate::civil::CivilDateTime;
use crate::options::{DateStyle, FieldStyle, HourCycle, TimeStyle};
use crate::token::FieldKind;
use crate::DateFmtResult;

/// One rendered field: a `(type, value)` pair of the locale primitive's
/// output, and the unit of [`crate::FormattedDateTime`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatPart {
    pub kind: FieldKind,
    pub value: String,
}

/// The field-options object handed to the locale primitive for one
/// formatting call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRequest {
    /// The requested fields with their styles, in rendering order.
    pub fields: Vec<(FieldKind, FieldStyle)>,
    pub hour_cycle: HourCycle,
    /// Fractional-second digit count, 1 through 3.
    pub fractional_digits: u8,
}

impl FieldRequest {
    /// Returns the requested style for a field, if the field was requested.
    #[must_use]
    pub fn style_of(&self, kind: FieldKind) -> Option<FieldStyle> {
        self.fields
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, style)| *style)
    }
}

/// The locale-aware formatting primitive.
///
/// Given a field-options object and an instant's civil fields, the
/// primitive renders an ordered list of parts. `resolved_options` reports
/// what was actually honored, which may silently differ from the request;
/// the formatter detects the difference and applies compatibility
/// corrections.
pub trait LocalePrimitive {
    /// Renders the requested fields of `civil` to parts.
    fn format_to_parts(&self, request: &FieldRequest, civil: &CivilDateTime) -> Vec<FormatPart>;

    /// Echoes the request as the primitive will actually honor it.
    fn resolved_options(&self, request: &FieldRequest) -> FieldRequest;

    /// The month names this locale generates at a given named style.
    /// Used by the parser's month-name fallback.
    fn month_names(&self, style: FieldStyle) -> &'static [&'static str; 12];

    /// The day-period names (AM, PM) at a given style.
    fn day_period_names(&self, style: FieldStyle) -> &'static [&'static str; 2];

    /// The era index of a date: `0` before the common era, `1` within it.
    fn era_index(&self, civil: &CivilDateTime) -> usize;

    /// The era names at a given style, indexed like [`Self::era_index`].
    fn era_names(&self, style: FieldStyle) -> &'static [&'static str; 2];

    /// The field pattern behind a whole-date preset.
    fn date_pattern(&self, style: DateStyle) -> &'static str;

    /// The field pattern behind a whole-time preset.
    fn time_pattern(&self, style: TimeStyle) -> &'static str;

    /// The glue pattern combining date and time patterns; `{1}` is the
    /// date, `{0}` the time.
    fn glue_pattern(&self) -> &'static str;

    /// The hour cycle this locale prefers when the caller expresses no
    /// preference.
    fn default_hour_cycle(&self) -> HourCycle;
}

/// A time-zone data source: identifier validation, offset lookup, and
/// display names.
pub trait TimeZoneProvider {
    /// Returns whether the identifier names a zone this provider knows.
    fn is_known(&self, identifier: &str) -> bool;

    /// Returns the zone's UTC offset in milliseconds at an instant.
    fn offset_ms(&self, identifier: &str, epoch_ms: i64) -> DateFmtResult<i64>;

    /// Returns the zone's display name at an instant (`Short` yields an
    /// abbreviation such as `EST`, `Long` the full name).
    fn display_name(
        &self,
        identifier: &str,
        epoch_ms: i64,
        style: FieldStyle,
    ) -> DateFmtResult<String>;
}

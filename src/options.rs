//! Caller-facing options for the formatting and parsing entry points.
//!
//! `ParseFormatOptions` is the raw, stringly configuration surface the UI
//! layer hands in. `ResolvedParseFormatOptions` is the validated internal
//! form. Validation follows a documented leniency policy: configuration
//! errors (an invalid locale tag, an unknown time zone) are hard failures,
//! while out-of-range enumerated values are replaced by the resolved
//! default with a logged warning.

use core::fmt;
use core::str::FromStr;

use icu_locale::Locale;

use crate::error::DateFmtError;
use crate::locale::data::{self, LocaleData};
use crate::provider::TimeZoneProvider;
use crate::token::FieldKind;
use crate::DateFmtResult;

// ==== Field styles ====

/// The rendering style of a single date/time field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FieldStyle {
    /// Minimum-width digits.
    #[default]
    Numeric,
    /// Zero-padded two-digit rendering.
    TwoDigit,
    /// The narrowest named rendering, often a single character.
    Narrow,
    /// An abbreviated named rendering.
    Short,
    /// The full named rendering.
    Long,
}

impl FieldStyle {
    /// Returns whether this style renders digits rather than names.
    #[inline]
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Numeric | Self::TwoDigit)
    }
}

/// A parsing error for [`FieldStyle`].
#[derive(Debug, Clone, Copy)]
pub struct ParseFieldStyleError;

impl fmt::Display for ParseFieldStyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid FieldStyle")
    }
}

impl FromStr for FieldStyle {
    type Err = ParseFieldStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "numeric" => Ok(Self::Numeric),
            "2-digit" => Ok(Self::TwoDigit),
            "narrow" => Ok(Self::Narrow),
            "short" => Ok(Self::Short),
            "long" => Ok(Self::Long),
            _ => Err(ParseFieldStyleError),
        }
    }
}

impl fmt::Display for FieldStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => "numeric",
            Self::TwoDigit => "2-digit",
            Self::Narrow => "narrow",
            Self::Short => "short",
            Self::Long => "long",
        }
        .fmt(f)
    }
}

// ==== Hour cycles ====

/// The hour cycle used when rendering an hour field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourCycle {
    /// Hours 0-11.
    H11,
    /// Hours 1-12.
    H12,
    /// Hours 0-23.
    H23,
    /// Hours 1-24.
    H24,
}

impl HourCycle {
    /// Returns whether this cycle renders a 12-hour clock.
    #[inline]
    #[must_use]
    pub fn is_twelve_hour(self) -> bool {
        matches!(self, Self::H11 | Self::H12)
    }
}

/// A parsing error for [`HourCycle`].
#[derive(Debug, Clone, Copy)]
pub struct ParseHourCycleError;

impl fmt::Display for ParseHourCycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid HourCycle")
    }
}

impl FromStr for HourCycle {
    type Err = ParseHourCycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h11" => Ok(Self::H11),
            "h12" => Ok(Self::H12),
            "h23" => Ok(Self::H23),
            "h24" => Ok(Self::H24),
            _ => Err(ParseHourCycleError),
        }
    }
}

impl fmt::Display for HourCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::H11 => "h11",
            Self::H12 => "h12",
            Self::H23 => "h23",
            Self::H24 => "h24",
        }
        .fmt(f)
    }
}

// ==== Whole-date/time styles ====

/// A whole-date preset style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    Full,
    Long,
    Medium,
    Short,
}

/// A whole-time preset style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStyle {
    Full,
    Long,
    Medium,
    Short,
}

// ==== Difference granularity ====

/// The unit at which two instants are compared by [`crate::diff_dates`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Era,
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    /// A caller-supplied comparison; see [`crate::diff_dates_with`].
    Custom,
}

/// A parsing error for [`Granularity`].
#[derive(Debug, Clone, Copy)]
pub struct ParseGranularityError;

impl fmt::Display for ParseGranularityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid Granularity")
    }
}

impl FromStr for Granularity {
    type Err = ParseGranularityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "era" | "eras" => Ok(Self::Era),
            "year" | "years" => Ok(Self::Year),
            "quarter" | "quarters" => Ok(Self::Quarter),
            "month" | "months" => Ok(Self::Month),
            "week" | "weeks" => Ok(Self::Week),
            "day" | "days" => Ok(Self::Day),
            "hour" | "hours" => Ok(Self::Hour),
            "minute" | "minutes" => Ok(Self::Minute),
            "second" | "seconds" => Ok(Self::Second),
            "millisecond" | "milliseconds" => Ok(Self::Millisecond),
            "custom" => Ok(Self::Custom),
            _ => Err(ParseGranularityError),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Era => "era",
            Self::Year => "year",
            Self::Quarter => "quarter",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Millisecond => "millisecond",
            Self::Custom => "custom",
        }
        .fmt(f)
    }
}

// ==== ParseFormatOptions ====

/// Per-call configuration for [`crate::format`] and [`crate::parse`].
///
/// Every field is optional. Omitted fields resolve to host defaults (the
/// system time zone under the `sys` feature) or locale defaults. The
/// per-field override strings accept the same enumerated values the locale
/// primitive accepts (`"numeric"`, `"2-digit"`, `"narrow"`, `"short"`,
/// `"long"`).
#[derive(Debug, Default, Clone)]
pub struct ParseFormatOptions {
    /// Ordered locale preference list, as BCP-47 tags.
    pub locales: Vec<String>,
    /// Candidate format strings. The first is used for output; all are
    /// tried, in order, when parsing.
    pub formats: Vec<String>,
    /// An IANA time zone identifier.
    pub time_zone: Option<String>,
    pub era: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
    pub hour: Option<String>,
    pub minute: Option<String>,
    pub second: Option<String>,
    pub fractional_second_digits: Option<u8>,
    pub time_zone_name: Option<String>,
    pub day_period: Option<String>,
    pub weekday: Option<String>,
    pub hour12: Option<bool>,
    pub hour_cycle: Option<String>,
    pub calendar: Option<String>,
    pub numbering_system: Option<String>,
}

/// Internal options object that represents the resolved per-call
/// configuration.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedParseFormatOptions {
    pub(crate) locale: &'static LocaleData,
    pub(crate) formats: Vec<String>,
    pub(crate) time_zone: String,
    pub(crate) hour_cycle: Option<HourCycle>,
    pub(crate) fractional_second_digits: Option<u8>,
    pub(crate) overrides: Vec<(FieldKind, FieldStyle)>,
}

impl ResolvedParseFormatOptions {
    pub(crate) fn resolve(
        options: &ParseFormatOptions,
        zones: &dyn TimeZoneProvider,
    ) -> DateFmtResult<Self> {
        let locale = resolve_locale(&options.locales)?;
        let time_zone = resolve_time_zone(options.time_zone.as_deref(), zones)?;

        let hour_cycle = resolve_hour_cycle(options);
        let fractional_second_digits = match options.fractional_second_digits {
            Some(digits @ 1..=3) => Some(digits),
            Some(digits) => {
                log::warn!(
                    "fractionalSecondDigits {digits} is out of range; using the resolved default"
                );
                None
            }
            None => None,
        };

        if let Some(calendar) = options.calendar.as_deref() {
            if !matches!(calendar, "gregory" | "iso8601") {
                log::warn!("calendar {calendar:?} is not supported; using the resolved default");
            }
        }
        if let Some(numbering) = options.numbering_system.as_deref() {
            if numbering != "latn" {
                log::warn!(
                    "numberingSystem {numbering:?} is not supported; using the resolved default"
                );
            }
        }

        let overrides = resolve_overrides(options);

        let formats = if options.formats.is_empty() {
            vec![locale.default_pattern.to_owned()]
        } else {
            options.formats.clone()
        };

        Ok(Self {
            locale,
            formats,
            time_zone,
            hour_cycle,
            fractional_second_digits,
            overrides,
        })
    }
}

fn resolve_locale(locales: &[String]) -> DateFmtResult<&'static LocaleData> {
    for tag in locales {
        // A syntactically invalid tag is a configuration error; a valid
        // tag without compiled data falls through to the next preference.
        let parsed = Locale::try_from_str(tag).map_err(|_| {
            DateFmtError::range().with_message(format!("{tag:?} is not a valid locale tag"))
        })?;
        if let Some(data) = data::lookup(&parsed.to_string()) {
            return Ok(data);
        }
        log::warn!("no compiled locale data for {tag:?}; trying the next preference");
    }
    if !locales.is_empty() {
        log::warn!(
            "no requested locale has compiled data; falling back to {}",
            data::DEFAULT.tag
        );
    }
    Ok(data::DEFAULT)
}

fn resolve_time_zone(
    requested: Option<&str>,
    zones: &dyn TimeZoneProvider,
) -> DateFmtResult<String> {
    if let Some(id) = requested {
        if !zones.is_known(id) {
            return Err(
                DateFmtError::range().with_message(format!("{id:?} is not a known time zone"))
            );
        }
        return Ok(id.to_owned());
    }
    let host = crate::sys::host_time_zone();
    if let Some(host) = host {
        if zones.is_known(&host) {
            return Ok(host);
        }
        log::warn!("host time zone {host:?} has no compiled data; falling back to UTC");
    }
    Ok("UTC".to_owned())
}

fn resolve_hour_cycle(options: &ParseFormatOptions) -> Option<HourCycle> {
    // hour12 wins over hourCycle when both are present.
    if let Some(hour12) = options.hour12 {
        return Some(if hour12 { HourCycle::H12 } else { HourCycle::H23 });
    }
    let raw = options.hour_cycle.as_deref()?;
    match raw.parse::<HourCycle>() {
        Ok(cycle) => Some(cycle),
        Err(_) => {
            log::warn!("hourCycle {raw:?} is not valid; using the resolved default");
            None
        }
    }
}

/// The per-field override table: `(kind, raw value, legal styles)`.
fn resolve_overrides(options: &ParseFormatOptions) -> Vec<(FieldKind, FieldStyle)> {
    const NUMERIC: &[FieldStyle] = &[FieldStyle::Numeric, FieldStyle::TwoDigit];
    const NAMED: &[FieldStyle] = &[FieldStyle::Narrow, FieldStyle::Short, FieldStyle::Long];
    const MONTH: &[FieldStyle] = &[
        FieldStyle::Numeric,
        FieldStyle::TwoDigit,
        FieldStyle::Narrow,
        FieldStyle::Short,
        FieldStyle::Long,
    ];

    let table: [(FieldKind, Option<&str>, &[FieldStyle]); 10] = [
        (FieldKind::Era, options.era.as_deref(), NAMED),
        (FieldKind::Year, options.year.as_deref(), NUMERIC),
        (FieldKind::Month, options.month.as_deref(), MONTH),
        (FieldKind::Day, options.day.as_deref(), NUMERIC),
        (FieldKind::Hour, options.hour.as_deref(), NUMERIC),
        (FieldKind::Minute, options.minute.as_deref(), NUMERIC),
        (FieldKind::Second, options.second.as_deref(), NUMERIC),
        (FieldKind::Weekday, options.weekday.as_deref(), NAMED),
        (FieldKind::DayPeriod, options.day_period.as_deref(), NAMED),
        (
            FieldKind::TimeZoneName,
            options.time_zone_name.as_deref(),
            NAMED,
        ),
    ];

    let mut overrides = Vec::new();
    for (kind, raw, legal) in table {
        let Some(raw) = raw else { continue };
        match raw.parse::<FieldStyle>() {
            Ok(style) if legal.contains(&style) => overrides.push((kind, style)),
            Ok(style) => {
                log::warn!("{style} is not a legal style for {kind:?}; using the resolved default");
            }
            Err(_) => {
                log::warn!("{raw:?} is not a valid field style; using the resolved default");
            }
        }
    }
    overrides
}

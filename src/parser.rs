//! The parser.
//!
//! Parsing inverts the formatter: the format's parts tell the parser
//! which spans of the input belong to which field. Spans are located
//! positionally with a cursor and bounded by character-class transitions
//! (alphanumeric/other and digit/other), so a value whose separators or
//! name widths drift from the format still splits sensibly. Extracted
//! fields are applied to a civil date/time in a fixed priority order,
//! the result is converted through the time zone, and the candidate is
//! verified by formatting it back. A candidate that does not round-trip
//! falls through to the next configured format; if none round-trips the
//! last candidate is returned as a best-effort result.

use crate::civil::CivilDateTime;
use crate::formatter::{self, apply_overrides, expand_presets};
use crate::instant::Instant;
use crate::options::{FieldStyle, HourCycle, ResolvedParseFormatOptions};
use crate::part::DatePart;
use crate::provider::{LocalePrimitive, TimeZoneProvider};
use crate::sys;
use crate::token::FieldKind;
use crate::tokenizer::tokenize;
use crate::DateFmtResult;
use writeable::Writeable;

/// The order in which extracted fields are applied. Coarser fields go
/// first so that a finer field never reads stale context.
const PRIORITY: [FieldKind; 7] = [
    FieldKind::Year,
    FieldKind::Month,
    FieldKind::Day,
    FieldKind::Hour,
    FieldKind::Minute,
    FieldKind::Second,
    FieldKind::Millisecond,
];

/// One field substring pulled out of the input.
struct Extracted {
    kind: FieldKind,
    style: FieldStyle,
    hour_cycle: Option<HourCycle>,
    text: String,
}

/// Parses `value` against each configured format in turn, returning the
/// first candidate that formats back to the input. Empty input yields
/// the invalid-instant sentinel rather than an error.
pub(crate) fn parse_resolved(
    resolved: &ResolvedParseFormatOptions,
    primitive: &dyn LocalePrimitive,
    zones: &dyn TimeZoneProvider,
    value: &str,
) -> DateFmtResult<Instant> {
    if value.trim().is_empty() {
        log::warn!("cannot parse an empty value");
        return Ok(Instant::INVALID);
    }

    let mut best = Instant::INVALID;
    for (attempt, format) in resolved.formats.iter().enumerate() {
        let candidate = parse_one(resolved, primitive, zones, value, format)?;
        let rendered = formatter::format_one(resolved, primitive, zones, candidate, format)?;
        if rendered.write_to_string() == value {
            return Ok(candidate);
        }
        log::debug!("format candidate {attempt} did not round-trip; trying the next one");
        best = candidate;
    }
    log::warn!("no format candidate round-tripped; returning a best-effort result");
    Ok(best)
}

fn parse_one(
    resolved: &ResolvedParseFormatOptions,
    primitive: &dyn LocalePrimitive,
    zones: &dyn TimeZoneProvider,
    value: &str,
    format: &str,
) -> DateFmtResult<Instant> {
    let tokenized = tokenize(format)?;
    let mut parts = expand_presets(tokenized.parts, primitive)?;
    apply_overrides(&mut parts, resolved);
    let zone = if tokenized.forces_utc {
        "UTC"
    } else {
        resolved.time_zone.as_str()
    };

    let extracted = locate_spans(&mut parts, value);
    let mut civil = default_civil(zones, zone)?;
    apply_fields(&mut civil, &extracted, primitive);

    // The civil fields are wall-clock time in the zone. Convert with a
    // second offset lookup in case the first guess straddles a
    // daylight-saving transition.
    let wall = civil.as_epoch_ms();
    let first = zones.offset_ms(zone, wall)?;
    let mut epoch = wall - first;
    let second = zones.offset_ms(zone, epoch)?;
    if second != first {
        epoch = wall - second;
    }
    Ok(Instant::from_epoch_milliseconds(epoch))
}

/// Today at midnight, wall-clock in the zone. Fields the format never
/// mentions keep these defaults.
fn default_civil(
    zones: &dyn TimeZoneProvider,
    zone: &str,
) -> DateFmtResult<CivilDateTime> {
    let now = sys::epoch_ms_now();
    let offset = zones.offset_ms(zone, now)?;
    let mut civil = CivilDateTime::from_epoch_ms(now + offset);
    civil.time = Default::default();
    Ok(civil)
}

/// Walks the format parts in index order, carving the input into field
/// spans. The part collection is resized as actual spans diverge from
/// the format's own widths so later parts stay positioned.
fn locate_spans(parts: &mut crate::part::DatePartCollection, value: &str) -> Vec<Extracted> {
    let bounds = ClassBoundaries::scan(value);
    let mut extracted = Vec::new();
    let mut cursor = 0usize;

    for i in 0..parts.len() {
        if cursor >= value.len() {
            break;
        }
        let part = match parts.get(i) {
            Some(part) => part.clone(),
            None => break,
        };
        if let Some(text) = &part.literal {
            if value[cursor..].starts_with(text.as_str()) {
                cursor += text.len();
            } else {
                // Separator drift. Resync at the next alphanumeric run
                // and hope the field spans still line up.
                log::warn!("literal {text:?} not found at offset {cursor}");
                cursor += value[cursor..]
                    .char_indices()
                    .find(|(_, ch)| ch.is_alphanumeric())
                    .map_or(value.len() - cursor, |(i, _)| i);
            }
            continue;
        }

        let end = span_end(&bounds, value, cursor, &part);
        let text = &value[cursor..end];
        extracted.push(Extracted {
            kind: part.kind,
            style: part.style,
            hour_cycle: part.hour_cycle,
            text: text.to_owned(),
        });
        if end - cursor != part.length {
            parts.resize(i, end - cursor);
        }
        cursor = end;
    }
    extracted
}

/// The end of the field span starting at `start`: the nearer of the next
/// character-class boundary and the field's expected fixed width.
fn span_end(bounds: &ClassBoundaries, value: &str, start: usize, part: &DatePart) -> usize {
    let boundary = if part.style.is_numeric() || part.kind == FieldKind::Millisecond {
        bounds.next_digit(start)
    } else {
        bounds.next_alnum(start)
    };
    let width = if part.kind == FieldKind::Millisecond {
        Some(part.length)
    } else {
        match part.style {
            FieldStyle::TwoDigit => Some(2),
            FieldStyle::Numeric => Some(if part.kind == FieldKind::Year { 4 } else { 2 }),
            _ => None,
        }
    };
    let mut end = match width {
        Some(w) => boundary.min(start + w).min(value.len()),
        None => boundary,
    };
    while end > start && !value.is_char_boundary(end) {
        end -= 1;
    }
    end
}

fn apply_fields(civil: &mut CivilDateTime, extracted: &[Extracted], primitive: &dyn LocalePrimitive) {
    for kind in PRIORITY {
        let Some(entry) = extracted.iter().find(|e| e.kind == kind) else {
            continue;
        };
        let digits: String = entry.text.chars().filter(char::is_ascii_digit).collect();
        let value = match kind {
            FieldKind::Month => match digits.parse::<i64>() {
                Ok(number) => number - 1,
                Err(_) => match month_from_name(primitive, entry.style, &entry.text) {
                    Some(index) => index,
                    None => {
                        log::warn!("unrecognized month {:?}", entry.text);
                        continue;
                    }
                },
            },
            FieldKind::Year => {
                let Ok(mut year) = digits.parse::<i64>() else {
                    log::warn!("unrecognized year {:?}", entry.text);
                    continue;
                };
                if entry.style == FieldStyle::TwoDigit && year < 100 {
                    year += 2000;
                }
                year
            }
            FieldKind::Millisecond => {
                let Ok(number) = digits.parse::<i64>() else {
                    log::warn!("unrecognized fractional seconds {:?}", entry.text);
                    continue;
                };
                // Scale a truncated fraction back to milliseconds.
                number * 10i64.pow(3u32.saturating_sub(digits.len() as u32))
            }
            _ => match digits.parse::<i64>() {
                Ok(number) => number,
                Err(_) => {
                    log::warn!("unrecognized {kind:?} {:?}", entry.text);
                    continue;
                }
            },
        };
        if !kind.apply_to(civil, value) {
            log::warn!("{kind:?} value {value} is out of range; ignoring it");
        }
    }

    apply_day_period(civil, extracted, primitive);
    apply_era(civil, extracted, primitive);
}

/// Folds a 12-hour clock reading into 24-hour time when the format
/// carried a day-period field on a twelve-hour cycle.
fn apply_day_period(
    civil: &mut CivilDateTime,
    extracted: &[Extracted],
    primitive: &dyn LocalePrimitive,
) {
    let Some(period) = extracted.iter().find(|e| e.kind == FieldKind::DayPeriod) else {
        return;
    };
    let twelve_hour = extracted
        .iter()
        .find(|e| e.kind == FieldKind::Hour)
        .and_then(|e| e.hour_cycle)
        .is_some_and(|cycle| cycle.is_twelve_hour());
    if !twelve_hour {
        return;
    }
    let names = primitive.day_period_names(period.style);
    if period.text.eq_ignore_ascii_case(names[1]) {
        civil.time.hour = civil.time.hour % 12 + 12;
    } else if period.text.eq_ignore_ascii_case(names[0]) {
        civil.time.hour %= 12;
    } else {
        log::warn!("unrecognized day period {:?}", period.text);
    }
}

fn apply_era(civil: &mut CivilDateTime, extracted: &[Extracted], primitive: &dyn LocalePrimitive) {
    let Some(era) = extracted.iter().find(|e| e.kind == FieldKind::Era) else {
        return;
    };
    let names = primitive.era_names(era.style);
    if era.text.eq_ignore_ascii_case(names[0]) {
        civil.date.year = 1 - civil.date.year;
    } else if !era.text.eq_ignore_ascii_case(names[1]) {
        log::warn!("unrecognized era {:?}", era.text);
    }
}

fn month_from_name(
    primitive: &dyn LocalePrimitive,
    style: FieldStyle,
    text: &str,
) -> Option<i64> {
    for style in [style, FieldStyle::Short, FieldStyle::Long] {
        let names = primitive.month_names(style);
        if let Some(index) = names.iter().position(|name| {
            name.eq_ignore_ascii_case(text)
                || (text.len() >= 3 && name.to_lowercase().starts_with(&text.to_lowercase()))
        }) {
            return Some(index as i64);
        }
    }
    None
}

/// Byte offsets where the input switches character class, recorded once
/// per parse. Alphanumeric boundaries bound named fields, digit
/// boundaries bound numeric fields.
struct ClassBoundaries {
    alnum: Vec<usize>,
    digit: Vec<usize>,
    len: usize,
}

impl ClassBoundaries {
    fn scan(value: &str) -> Self {
        let mut alnum = Vec::new();
        let mut digit = Vec::new();
        let mut prev: Option<(bool, bool)> = None;
        for (i, ch) in value.char_indices() {
            let classes = (ch.is_alphanumeric(), ch.is_ascii_digit());
            if let Some(previous) = prev {
                if previous.0 != classes.0 {
                    alnum.push(i);
                }
                if previous.1 != classes.1 {
                    digit.push(i);
                }
            }
            prev = Some(classes);
        }
        Self {
            alnum,
            digit,
            len: value.len(),
        }
    }

    fn next_alnum(&self, from: usize) -> usize {
        Self::after(&self.alnum, from, self.len)
    }

    fn next_digit(&self, from: usize) -> usize {
        Self::after(&self.digit, from, self.len)
    }

    fn after(list: &[usize], from: usize, len: usize) -> usize {
        list.iter().copied().find(|&b| b > from).unwrap_or(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParseFormatOptions;
    use crate::utils;
    use crate::{MS_PER_HOUR, MS_PER_MINUTE};

    fn options(locale: &str, formats: &[&str], zone: &str) -> ParseFormatOptions {
        ParseFormatOptions {
            locales: vec![locale.to_owned()],
            formats: formats.iter().map(|f| (*f).to_owned()).collect(),
            time_zone: Some(zone.to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn parses_a_calendar_date_in_a_zone() {
        let instant = crate::parse(
            "2022-01-15",
            &options("en-US", &["yyyy-MM-dd"], "America/New_York"),
        )
        .unwrap();
        // Midnight in New York is 05:00 UTC in January.
        assert_eq!(instant.epoch_milliseconds(), 1_642_222_800_000);
    }

    #[test]
    fn parses_month_names() {
        let instant = crate::parse(
            "Jan 14, 2021",
            &options("en-US", &["MMM d, y"], "America/New_York"),
        )
        .unwrap();
        assert_eq!(instant.epoch_milliseconds(), 1_610_600_400_000);
    }

    #[test]
    fn two_digit_years_pivot_to_the_current_century() {
        let instant = crate::parse("01/15/22", &options("en-US", &["MM/dd/yy"], "UTC")).unwrap();
        assert_eq!(instant.epoch_milliseconds(), 1_642_204_800_000);
    }

    #[test]
    fn later_candidates_are_tried_after_a_round_trip_miss() {
        let instant = crate::parse(
            "2022-01-15",
            &options("en-US", &["MM/dd/yyyy", "yyyy-MM-dd"], "UTC"),
        )
        .unwrap();
        assert_eq!(instant.epoch_milliseconds(), 1_642_204_800_000);
    }

    #[test]
    fn twelve_hour_times_fold_through_the_day_period() {
        let evening = crate::parse(
            "1/15/2021 7:05 PM",
            &options("en-US", &["M/d/y h:mm a"], "UTC"),
        )
        .unwrap();
        assert_eq!(
            evening.epoch_milliseconds(),
            1_610_668_800_000 + 19 * MS_PER_HOUR + 5 * MS_PER_MINUTE
        );

        let after_midnight = crate::parse(
            "1/15/2021 12:30 AM",
            &options("en-US", &["M/d/y h:mm a"], "UTC"),
        )
        .unwrap();
        assert_eq!(
            after_midnight.epoch_milliseconds(),
            1_610_668_800_000 + 30 * MS_PER_MINUTE
        );
    }

    #[test]
    fn daylight_saving_wall_times_convert_through_the_second_pass() {
        let instant = crate::parse(
            "2021-07-04 12:00",
            &options("en-US", &["yyyy-MM-dd HH:mm"], "America/New_York"),
        )
        .unwrap();
        // Noon EDT is 16:00 UTC.
        assert_eq!(
            instant.epoch_milliseconds(),
            utils::epoch_ms_for_ymd(2021, 6, 4) + 16 * MS_PER_HOUR
        );
    }

    #[test]
    fn iso_values_parse_as_utc() {
        let instant = crate::parse(
            "2021-01-15T00:00:00.000Z",
            &options("en-US", &["iso"], "Asia/Tokyo"),
        )
        .unwrap();
        assert_eq!(instant.epoch_milliseconds(), 1_610_668_800_000);
    }

    #[test]
    fn japanese_values_round_trip() {
        let opts = options("ja-JP", &["y年MM月dd日 (EEE)"], "Asia/Tokyo");
        let instant = crate::parse("2021年01月15日 (金)", &opts).unwrap();
        let rendered = crate::format(instant, &opts).unwrap();
        assert_eq!(rendered, "2021年01月15日 (金)");
    }

    #[test]
    fn formatting_output_parses_back() {
        let reference = Instant::from_epoch_milliseconds(
            1_610_668_800_000 + 19 * MS_PER_HOUR + 5 * MS_PER_MINUTE,
        );
        for format in ["EEE, MMM d, y HH:mm", "yyyy-MM-dd HH:mm", "M/d/y h:mm a"] {
            let opts = options("en-US", &[format], "America/New_York");
            let rendered = crate::format(reference, &opts).unwrap();
            let parsed = crate::parse(&rendered, &opts).unwrap();
            assert_eq!(
                parsed.epoch_milliseconds(),
                reference.epoch_milliseconds(),
                "format {format} did not round-trip {rendered}"
            );
        }
    }

    #[test]
    fn empty_input_yields_the_invalid_sentinel() {
        let instant = crate::parse("   ", &options("en-US", &["y"], "UTC")).unwrap();
        assert!(!instant.is_valid());
    }

    #[test]
    fn unparseable_input_is_best_effort_rather_than_an_error() {
        assert!(crate::parse("abcd", &options("en-US", &["yyyy"], "UTC")).is_ok());
    }

    #[test]
    fn era_fields_flip_the_year_sign() {
        let opts = options("en-US", &["y G"], "UTC");
        let instant = crate::parse("45 BC", &opts).unwrap();
        assert_eq!(
            utils::epoch_ms_to_year(instant.epoch_milliseconds()),
            -44
        );
    }

    #[test]
    fn spans_follow_class_boundaries_not_format_widths() {
        // Single-digit fields in the value against 2-digit-capable
        // numeric tokens.
        let instant = crate::parse("3/5/2021", &options("en-US", &["M/d/yyyy"], "UTC")).unwrap();
        assert_eq!(
            instant.epoch_milliseconds(),
            utils::epoch_ms_for_ymd(2021, 2, 5)
        );
    }
}

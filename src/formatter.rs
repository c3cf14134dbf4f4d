//! The formatter.
//!
//! Walks a tokenized format in index order and asks the locale primitive
//! to render each field individually. The per-field invocation trades
//! throughput for control: it lets the formatter compare the primitive's
//! resolved options against the request and patch over the known
//! mismatches (a 2-digit request resolved to numeric and vice versa, and
//! the h24 quirk that renders midnight as "24").

use writeable::{LengthHint, Writeable};

use crate::civil::CivilDateTime;
use crate::error::DateFmtError;
use crate::instant::Instant;
use crate::options::{FieldStyle, HourCycle, ResolvedParseFormatOptions};
use crate::part::DatePart;
use crate::part::DatePartCollection;
use crate::provider::{FieldRequest, FormatPart, LocalePrimitive, TimeZoneProvider};
use crate::token::FieldKind;
use crate::tokenizer::tokenize;
use crate::DateFmtResult;

/// A fully rendered date/time: the ordered `(type, value)` parts of one
/// formatting call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedDateTime {
    parts: Vec<FormatPart>,
}

impl FormattedDateTime {
    /// The rendered parts, in output order.
    #[must_use]
    pub fn parts(&self) -> &[FormatPart] {
        &self.parts
    }
}

impl Writeable for FormattedDateTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        for part in &self.parts {
            sink.write_str(&part.value)?;
        }
        Ok(())
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::exact(self.parts.iter().map(|p| p.value.len()).sum())
    }
}

writeable::impl_display_with_writeable!(FormattedDateTime);

/// Formats an instant with the first (output) format of the resolved
/// options. Fails fast on the invalid-instant sentinel.
pub(crate) fn format_resolved(
    resolved: &ResolvedParseFormatOptions,
    primitive: &dyn LocalePrimitive,
    zones: &dyn TimeZoneProvider,
    instant: Instant,
) -> DateFmtResult<FormattedDateTime> {
    if !instant.is_valid() {
        return Err(DateFmtError::range().with_message("cannot format an invalid date"));
    }
    let format = resolved
        .formats
        .first()
        .ok_or_else(|| DateFmtError::range().with_message("no format string was resolved"))?;
    format_one(resolved, primitive, zones, instant, format)
}

/// Formats an instant with one specific format string.
pub(crate) fn format_one(
    resolved: &ResolvedParseFormatOptions,
    primitive: &dyn LocalePrimitive,
    zones: &dyn TimeZoneProvider,
    instant: Instant,
    format: &str,
) -> DateFmtResult<FormattedDateTime> {
    let tokenized = tokenize(format)?;
    let mut parts = expand_presets(tokenized.parts, primitive)?;
    apply_overrides(&mut parts, resolved);

    let zone = if tokenized.forces_utc {
        "UTC"
    } else {
        resolved.time_zone.as_str()
    };
    let epoch = instant.epoch_milliseconds();
    let offset = zones.offset_ms(zone, epoch)?;
    let civil = CivilDateTime::from_epoch_ms(epoch + offset);

    let mut out = Vec::with_capacity(parts.len());
    for part in &parts {
        if let Some(text) = &part.literal {
            out.push(FormatPart {
                kind: FieldKind::Literal,
                value: text.clone(),
            });
        } else if part.kind == FieldKind::TimeZoneName {
            out.push(FormatPart {
                kind: part.kind,
                value: zones.display_name(zone, epoch, part.style)?,
            });
        } else {
            out.push(FormatPart {
                kind: part.kind,
                value: render_field(part, resolved, primitive, &civil),
            });
        }
    }
    Ok(FormattedDateTime { parts: out })
}

/// Replaces a whole-date/time preset part with the tokenized field pattern
/// it stands for. Field-token collections pass through unchanged.
pub(crate) fn expand_presets(
    parts: DatePartCollection,
    primitive: &dyn LocalePrimitive,
) -> DateFmtResult<DatePartCollection> {
    let Some(preset) = parts.iter().find(|p| p.is_preset()).cloned() else {
        return Ok(parts);
    };
    let pattern = match (preset.date_style, preset.time_style) {
        (Some(date), Some(time)) => primitive
            .glue_pattern()
            .replace("{1}", primitive.date_pattern(date))
            .replace("{0}", primitive.time_pattern(time)),
        (Some(date), None) => primitive.date_pattern(date).to_owned(),
        (None, Some(time)) => primitive.time_pattern(time).to_owned(),
        (None, None) => {
            return Err(DateFmtError::assert().with_message("preset part carries no style"))
        }
    };
    Ok(tokenize(&pattern)?.parts)
}

/// Applies the per-field style overrides of the resolved options onto the
/// matching parts. Overrides restyle fields the format already has; they
/// never add fields.
pub(crate) fn apply_overrides(
    parts: &mut DatePartCollection,
    resolved: &ResolvedParseFormatOptions,
) {
    if resolved.overrides.is_empty() {
        return;
    }
    let restyled: Vec<DatePart> = parts
        .iter()
        .map(|part| {
            let mut part = part.clone();
            if let Some(&(_, style)) = resolved
                .overrides
                .iter()
                .find(|(kind, _)| *kind == part.kind)
            {
                part.style = style;
            }
            part
        })
        .collect();
    *parts = restyled.into_iter().collect();
}

fn render_field(
    part: &DatePart,
    resolved: &ResolvedParseFormatOptions,
    primitive: &dyn LocalePrimitive,
    civil: &CivilDateTime,
) -> String {
    // Derive the dependent fields the primitive needs to render the
    // requested one consistently: a lone minute synthesizes its hour, a
    // lone second its minute and hour.
    let mut fields = vec![(part.kind, part.style)];
    match part.kind {
        FieldKind::Minute => fields.push((FieldKind::Hour, FieldStyle::TwoDigit)),
        FieldKind::Second => {
            fields.push((FieldKind::Minute, FieldStyle::TwoDigit));
            fields.push((FieldKind::Hour, FieldStyle::TwoDigit));
        }
        _ => {}
    }
    let request = FieldRequest {
        fields,
        hour_cycle: part
            .hour_cycle
            .or(resolved.hour_cycle)
            .unwrap_or_else(|| primitive.default_hour_cycle()),
        fractional_digits: resolved
            .fractional_second_digits
            .unwrap_or_else(|| part.length.clamp(1, 3) as u8),
    };
    let resolved_request = primitive.resolved_options(&request);
    let rendered = primitive.format_to_parts(&request, civil);
    let Some(value) = rendered
        .into_iter()
        .find(|p| p.kind == part.kind)
        .map(|p| p.value)
    else {
        log::warn!("locale primitive rendered no {:?} part", part.kind);
        return String::new();
    };
    correct_rendered(part, &request, &resolved_request, value)
}

/// The compatibility-fix table: when the primitive's resolved options
/// differ from the request, patch the rendered substring instead of
/// trusting either side blindly.
fn correct_rendered(
    part: &DatePart,
    request: &FieldRequest,
    resolved_request: &FieldRequest,
    mut value: String,
) -> String {
    // The h24 quirk: an h23 request the primitive resolved to h24
    // renders midnight as "24" where "0"/"00" was asked for.
    if part.kind == FieldKind::Hour
        && value == "24"
        && request.hour_cycle == HourCycle::H23
        && resolved_request.hour_cycle == HourCycle::H24
    {
        return match part.style {
            FieldStyle::TwoDigit => "00".to_owned(),
            _ => "0".to_owned(),
        };
    }

    let resolved_style = resolved_request
        .style_of(part.kind)
        .unwrap_or_else(|| infer_style_from_rendered(part.kind, &value));
    match (part.style, resolved_style) {
        (FieldStyle::TwoDigit, FieldStyle::Numeric)
            if value.len() == 1 && value.bytes().all(|b| b.is_ascii_digit()) =>
        {
            value.insert(0, '0');
        }
        (FieldStyle::Numeric, FieldStyle::TwoDigit)
            if value.len() == 2 && value.starts_with('0') =>
        {
            value.remove(0);
        }
        _ => {}
    }
    value
}

/// Best-effort style inference from a rendered substring, used when the
/// primitive does not echo a field back in its resolved options. The
/// result is a guess, never authoritative: it feeds the compatibility
/// fixes above and nothing else.
pub(crate) fn infer_style_from_rendered(kind: FieldKind, rendered: &str) -> FieldStyle {
    let numeric = !rendered.is_empty() && rendered.bytes().all(|b| b.is_ascii_digit());
    match kind {
        FieldKind::Year
        | FieldKind::Day
        | FieldKind::Hour
        | FieldKind::Minute
        | FieldKind::Second
        | FieldKind::Millisecond => {
            if rendered.len() == 2 && rendered.starts_with('0') {
                FieldStyle::TwoDigit
            } else {
                FieldStyle::Numeric
            }
        }
        FieldKind::Month | FieldKind::Weekday | FieldKind::Era | FieldKind::DayPeriod => {
            if numeric {
                if rendered.len() == 2 && rendered.starts_with('0') {
                    FieldStyle::TwoDigit
                } else {
                    FieldStyle::Numeric
                }
            } else {
                match rendered.chars().count() {
                    0 | 1 => FieldStyle::Narrow,
                    2..=3 => FieldStyle::Short,
                    _ => FieldStyle::Long,
                }
            }
        }
        _ => FieldStyle::Numeric,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::data;
    use crate::locale::CompiledLocale;
    use crate::options::{DateStyle, ParseFormatOptions, TimeStyle};
    use crate::token::TOKEN_TABLE;
    use crate::tzdb::CompiledTz;

    /// 2021-01-15T00:00:00.000Z
    const REFERENCE: Instant = Instant::from_epoch_milliseconds(1_610_668_800_000);

    fn options(locale: &str, format: &str, zone: &str) -> ParseFormatOptions {
        ParseFormatOptions {
            locales: vec![locale.to_owned()],
            formats: vec![format.to_owned()],
            time_zone: Some(zone.to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn formats_a_us_date_across_a_zone_boundary() {
        let rendered = crate::format(
            REFERENCE,
            &options("en-US", "EEE, MMM d, y", "America/New_York"),
        )
        .unwrap();
        assert_eq!(rendered, "Thu, Jan 14, 2021");
    }

    #[test]
    fn formats_a_japanese_date() {
        let rendered = crate::format(
            REFERENCE,
            &options("ja-JP", "y年MM月dd日 (EEE)", "Asia/Tokyo"),
        )
        .unwrap();
        assert_eq!(rendered, "2021年01月15日 (金)");
    }

    #[test]
    fn formatting_is_idempotent() {
        let opts = options("en-US", "EEE, MMM d, y HH:mm:ss.fff", "America/New_York");
        let first = crate::format(REFERENCE, &opts).unwrap();
        let second = crate::format(REFERENCE, &opts).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn iso_renders_in_utc_regardless_of_zone() {
        let rendered = crate::format(REFERENCE, &options("en-US", "iso", "Asia/Tokyo")).unwrap();
        assert_eq!(rendered, "2021-01-15T00:00:00.000Z");
    }

    #[test]
    fn invalid_instants_fail_fast() {
        let err = crate::format(Instant::INVALID, &options("en-US", "y", "UTC")).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Range);
    }

    #[test]
    fn every_token_formats_to_something() {
        for entry in TOKEN_TABLE {
            let rendered =
                crate::format(REFERENCE, &options("en-US", entry.token, "UTC")).unwrap();
            assert!(!rendered.is_empty(), "token {} rendered nothing", entry.token);
        }
    }

    #[test]
    fn presets_expand_to_locale_patterns() {
        let rendered = crate::format(REFERENCE, &options("en-US", "ed", "UTC")).unwrap();
        assert_eq!(rendered, "Jan 15, 2021");
        let rendered = crate::format(REFERENCE, &options("en-US", "ud", "UTC")).unwrap();
        assert_eq!(rendered, "Friday, January 15, 2021");
        let rendered = crate::format(REFERENCE, &options("de-DE", "ed", "UTC")).unwrap();
        assert_eq!(rendered, "15.01.2021");
    }

    #[test]
    fn zone_names_render_from_the_zone_provider() {
        let rendered =
            crate::format(REFERENCE, &options("en-US", "k", "America/New_York")).unwrap();
        assert_eq!(rendered, "EST");
        let rendered =
            crate::format(REFERENCE, &options("en-US", "kk", "America/New_York")).unwrap();
        assert_eq!(rendered, "Eastern Standard Time");
    }

    #[test]
    fn the_h24_quirk_is_corrected() {
        // Midnight in Tokyo; the ja primitive resolves h23 to h24 and
        // renders "24", which the formatter folds back to "00".
        let midnight_tokyo = Instant::from_epoch_milliseconds(
            1_610_668_800_000 - 9 * crate::MS_PER_HOUR,
        );
        let rendered = crate::format(
            midnight_tokyo,
            &options("ja-JP", "HH:mm", "Asia/Tokyo"),
        )
        .unwrap();
        assert_eq!(rendered, "00:00");
    }

    #[test]
    fn overrides_restyle_matching_fields() {
        let mut opts = options("en-US", "M/d/y", "UTC");
        opts.month = Some("2-digit".to_owned());
        opts.day = Some("2-digit".to_owned());
        assert_eq!(crate::format(REFERENCE, &opts).unwrap(), "01/15/2021");
    }

    #[test]
    fn format_to_parts_exposes_part_types() {
        let parts = crate::format_to_parts(REFERENCE, &options("en-US", "MMM d", "UTC")).unwrap();
        let kinds: Vec<_> = parts.parts().iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![FieldKind::Month, FieldKind::Literal, FieldKind::Day]
        );
        assert_eq!(parts.to_string(), "Jan 15");
    }

    // A primitive that deliberately resolves different styles than were
    // requested, to pin down the compatibility-fix table.
    struct Stubborn;

    impl LocalePrimitive for Stubborn {
        fn format_to_parts(
            &self,
            request: &FieldRequest,
            civil: &CivilDateTime,
        ) -> Vec<FormatPart> {
            let resolved = self.resolved_options(request);
            CompiledLocale::new(&data::EN_US).format_to_parts(&resolved, civil)
        }

        fn resolved_options(&self, request: &FieldRequest) -> FieldRequest {
            // Days always render numeric, months always 2-digit, no
            // matter what was asked.
            FieldRequest {
                fields: request
                    .fields
                    .iter()
                    .map(|&(kind, style)| match kind {
                        FieldKind::Day => (kind, FieldStyle::Numeric),
                        FieldKind::Month => (kind, FieldStyle::TwoDigit),
                        _ => (kind, style),
                    })
                    .collect(),
                hour_cycle: request.hour_cycle,
                fractional_digits: request.fractional_digits,
            }
        }

        fn month_names(&self, style: FieldStyle) -> &'static [&'static str; 12] {
            CompiledLocale::new(&data::EN_US).month_names(style)
        }

        fn day_period_names(&self, _style: FieldStyle) -> &'static [&'static str; 2] {
            &["AM", "PM"]
        }

        fn era_index(&self, civil: &CivilDateTime) -> usize {
            usize::from(civil.date.year > 0)
        }

        fn era_names(&self, _style: FieldStyle) -> &'static [&'static str; 2] {
            &["BC", "AD"]
        }

        fn date_pattern(&self, _style: DateStyle) -> &'static str {
            "M/d/y"
        }

        fn time_pattern(&self, _style: TimeStyle) -> &'static str {
            "HH:mm"
        }

        fn glue_pattern(&self) -> &'static str {
            "{1}, {0}"
        }

        fn default_hour_cycle(&self) -> HourCycle {
            HourCycle::H23
        }
    }

    #[test]
    fn resolved_mismatches_are_patched() {
        let resolved = crate::options::ResolvedParseFormatOptions::resolve(
            &options("en-US", "dd/MM", "UTC"),
            &CompiledTz,
        )
        .unwrap();
        // March 5 makes both fixes visible.
        let instant = Instant::from_epoch_milliseconds(
            crate::utils::epoch_ms_for_ymd(2021, 2, 5),
        );
        let rendered =
            format_resolved(&resolved, &Stubborn, &CompiledTz, instant).unwrap();
        // Day rendered "5" but "dd" asked for 2-digit: padded. Month
        // rendered "03" but "MM" asked for 2-digit too: left alone.
        assert_eq!(rendered.to_string(), "05/03");

        let resolved = crate::options::ResolvedParseFormatOptions::resolve(
            &options("en-US", "d/M", "UTC"),
            &CompiledTz,
        )
        .unwrap();
        // Month rendered "03" but "M" asked for numeric: zero stripped.
        let rendered =
            format_resolved(&resolved, &Stubborn, &CompiledTz, instant).unwrap();
        assert_eq!(rendered.to_string(), "5/3");
    }

    #[test]
    fn style_inference_is_a_reasonable_guess() {
        assert_eq!(
            infer_style_from_rendered(FieldKind::Day, "05"),
            FieldStyle::TwoDigit
        );
        assert_eq!(
            infer_style_from_rendered(FieldKind::Day, "5"),
            FieldStyle::Numeric
        );
        assert_eq!(
            infer_style_from_rendered(FieldKind::Month, "Jan"),
            FieldStyle::Short
        );
        assert_eq!(
            infer_style_from_rendered(FieldKind::Month, "January"),
            FieldStyle::Long
        );
        assert_eq!(
            infer_style_from_rendered(FieldKind::Weekday, "F"),
            FieldStyle::Narrow
        );
    }
}

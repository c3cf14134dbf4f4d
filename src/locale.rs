//! The compiled-data locale primitive.
//!
//! [`CompiledLocale`] implements [`LocalePrimitive`] over the baked tables
//! in [`data`]. It deliberately reproduces two behaviors of the primitive
//! it stands in for: a narrow style silently resolves to short when the
//! locale carries no narrow names, and locales flagged `prefers_h24`
//! substitute the h24 cycle for h23 requests and render midnight as "24".
//! The formatter detects both through `resolved_options` and corrects the
//! output.

pub(crate) mod data;

use crate::civil::CivilDateTime;
use crate::options::{DateStyle, FieldStyle, HourCycle, TimeStyle};
use crate::provider::{FieldRequest, FormatPart, LocalePrimitive};
use crate::token::FieldKind;

use data::LocaleData;

/// A [`LocalePrimitive`] backed by compiled locale data.
#[derive(Debug, Clone, Copy)]
pub struct CompiledLocale {
    data: &'static LocaleData,
}

impl CompiledLocale {
    pub(crate) fn new(data: &'static LocaleData) -> Self {
        Self { data }
    }

    fn resolve_style(&self, kind: FieldKind, style: FieldStyle) -> FieldStyle {
        if kind == FieldKind::Month
            && style == FieldStyle::Narrow
            && self.data.months_narrow.is_none()
        {
            return FieldStyle::Short;
        }
        style
    }

    fn resolve_hour_cycle(&self, requested: HourCycle) -> HourCycle {
        if requested == HourCycle::H23 && self.data.prefers_h24 {
            return HourCycle::H24;
        }
        requested
    }

    fn render(
        &self,
        kind: FieldKind,
        style: FieldStyle,
        request: &FieldRequest,
        civil: &CivilDateTime,
    ) -> Option<String> {
        let rendered = match kind {
            FieldKind::Year => {
                let year = civil.date.year;
                let display = if year <= 0 { 1 - year } else { year };
                match style {
                    FieldStyle::TwoDigit => format!("{:02}", display % 100),
                    _ => display.to_string(),
                }
            }
            FieldKind::Month => {
                let month = usize::from(civil.date.month.min(11));
                match style {
                    FieldStyle::Numeric => (month + 1).to_string(),
                    FieldStyle::TwoDigit => format!("{:02}", month + 1),
                    FieldStyle::Narrow => self
                        .data
                        .months_narrow
                        .unwrap_or(self.data.months_short)[month]
                        .to_owned(),
                    FieldStyle::Short => self.data.months_short[month].to_owned(),
                    FieldStyle::Long => self.data.months_long[month].to_owned(),
                }
            }
            FieldKind::Day => pad(style, u16::from(civil.date.day)),
            FieldKind::Hour => {
                let hour = u16::from(civil.time.hour);
                let cycle = self.resolve_hour_cycle(request.hour_cycle);
                let display = match cycle {
                    HourCycle::H23 => hour,
                    HourCycle::H24 => {
                        if hour == 0 {
                            24
                        } else {
                            hour
                        }
                    }
                    HourCycle::H11 => hour % 12,
                    HourCycle::H12 => {
                        if hour % 12 == 0 {
                            12
                        } else {
                            hour % 12
                        }
                    }
                };
                pad(style, display)
            }
            FieldKind::Minute => pad(style, u16::from(civil.time.minute)),
            FieldKind::Second => pad(style, u16::from(civil.time.second)),
            FieldKind::Millisecond => {
                let digits = usize::from(request.fractional_digits.clamp(1, 3));
                let scaled = u32::from(civil.time.millisecond) / 10u32.pow(3 - digits as u32);
                format!("{scaled:0>digits$}")
            }
            FieldKind::Weekday => {
                let day = usize::from(civil.week_day());
                match style {
                    FieldStyle::Long => self.data.weekdays_long[day].to_owned(),
                    FieldStyle::Narrow => self.data.weekdays_narrow[day].to_owned(),
                    _ => self.data.weekdays_short[day].to_owned(),
                }
            }
            FieldKind::Era => {
                let era = self.era_index(civil);
                match style {
                    FieldStyle::Long => self.data.eras_long[era].to_owned(),
                    FieldStyle::Narrow => self.data.eras_narrow[era].to_owned(),
                    _ => self.data.eras_short[era].to_owned(),
                }
            }
            FieldKind::DayPeriod => {
                let period = usize::from(civil.time.hour >= 12);
                self.data.day_periods[period].to_owned()
            }
            // Zone names, literals, and presets are not the primitive's
            // concern.
            _ => return None,
        };
        Some(rendered)
    }
}

impl LocalePrimitive for CompiledLocale {
    fn format_to_parts(&self, request: &FieldRequest, civil: &CivilDateTime) -> Vec<FormatPart> {
        request
            .fields
            .iter()
            .filter_map(|&(kind, style)| {
                let style = self.resolve_style(kind, style);
                self.render(kind, style, request, civil)
                    .map(|value| FormatPart { kind, value })
            })
            .collect()
    }

    fn resolved_options(&self, request: &FieldRequest) -> FieldRequest {
        FieldRequest {
            fields: request
                .fields
                .iter()
                .map(|&(kind, style)| (kind, self.resolve_style(kind, style)))
                .collect(),
            hour_cycle: self.resolve_hour_cycle(request.hour_cycle),
            fractional_digits: request.fractional_digits.clamp(1, 3),
        }
    }

    fn month_names(&self, style: FieldStyle) -> &'static [&'static str; 12] {
        match style {
            FieldStyle::Long => &self.data.months_long,
            FieldStyle::Narrow => self
                .data
                .months_narrow
                .as_ref()
                .unwrap_or(&self.data.months_short),
            _ => &self.data.months_short,
        }
    }

    fn day_period_names(&self, _style: FieldStyle) -> &'static [&'static str; 2] {
        &self.data.day_periods
    }

    fn era_index(&self, civil: &CivilDateTime) -> usize {
        usize::from(civil.date.year > 0)
    }

    fn era_names(&self, style: FieldStyle) -> &'static [&'static str; 2] {
        match style {
            FieldStyle::Long => &self.data.eras_long,
            FieldStyle::Narrow => &self.data.eras_narrow,
            _ => &self.data.eras_short,
        }
    }

    fn date_pattern(&self, style: DateStyle) -> &'static str {
        self.data.date_patterns[match style {
            DateStyle::Full => 0,
            DateStyle::Long => 1,
            DateStyle::Medium => 2,
            DateStyle::Short => 3,
        }]
    }

    fn time_pattern(&self, style: TimeStyle) -> &'static str {
        self.data.time_patterns[match style {
            TimeStyle::Full => 0,
            TimeStyle::Long => 1,
            TimeStyle::Medium => 2,
            TimeStyle::Short => 3,
        }]
    }

    fn glue_pattern(&self) -> &'static str {
        self.data.glue_pattern
    }

    fn default_hour_cycle(&self) -> HourCycle {
        self.data.hour_cycle
    }
}

fn pad(style: FieldStyle, value: u16) -> String {
    match style {
        FieldStyle::TwoDigit => format!("{value:02}"),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn civil() -> CivilDateTime {
        // 2021-01-15T19:05:08.450
        CivilDateTime::from_epoch_ms(
            1_610_668_800_000
                + 19 * crate::MS_PER_HOUR
                + 5 * crate::MS_PER_MINUTE
                + 8 * crate::MS_PER_SECOND
                + 450,
        )
    }

    fn request(kind: FieldKind, style: FieldStyle) -> FieldRequest {
        FieldRequest {
            fields: vec![(kind, style)],
            hour_cycle: HourCycle::H23,
            fractional_digits: 3,
        }
    }

    #[test]
    fn renders_english_names() {
        let locale = CompiledLocale::new(&data::EN_US);
        let req = request(FieldKind::Month, FieldStyle::Short);
        let parts = locale.format_to_parts(&req, &civil());
        assert_eq!(parts[0].value, "Jan");
        let req = request(FieldKind::Weekday, FieldStyle::Long);
        assert_eq!(locale.format_to_parts(&req, &civil())[0].value, "Friday");
    }

    #[test]
    fn narrow_month_resolves_to_short_without_narrow_data() {
        let locale = CompiledLocale::new(&data::JA_JP);
        let req = request(FieldKind::Month, FieldStyle::Narrow);
        let resolved = locale.resolved_options(&req);
        assert_eq!(resolved.fields[0].1, FieldStyle::Short);
        assert_eq!(locale.format_to_parts(&req, &civil())[0].value, "1月");
    }

    #[test]
    fn h24_quirk_renders_midnight_as_24() {
        let locale = CompiledLocale::new(&data::JA_JP);
        let req = request(FieldKind::Hour, FieldStyle::TwoDigit);
        let midnight = CivilDateTime::from_epoch_ms(1_610_668_800_000);
        assert_eq!(locale.resolved_options(&req).hour_cycle, HourCycle::H24);
        assert_eq!(locale.format_to_parts(&req, &midnight)[0].value, "24");
    }

    #[test]
    fn twelve_hour_rendering() {
        let locale = CompiledLocale::new(&data::EN_US);
        let req = FieldRequest {
            fields: vec![(FieldKind::Hour, FieldStyle::Numeric)],
            hour_cycle: HourCycle::H12,
            fractional_digits: 3,
        };
        assert_eq!(locale.format_to_parts(&req, &civil())[0].value, "7");
        let req = FieldRequest {
            fields: vec![(FieldKind::DayPeriod, FieldStyle::Short)],
            hour_cycle: HourCycle::H12,
            fractional_digits: 3,
        };
        assert_eq!(locale.format_to_parts(&req, &civil())[0].value, "PM");
    }

    #[test]
    fn fractional_digits_truncate() {
        let locale = CompiledLocale::new(&data::EN_US);
        let mut req = request(FieldKind::Millisecond, FieldStyle::Numeric);
        assert_eq!(locale.format_to_parts(&req, &civil())[0].value, "450");
        req.fractional_digits = 1;
        assert_eq!(locale.format_to_parts(&req, &civil())[0].value, "4");
    }

    #[test]
    fn era_classification() {
        let locale = CompiledLocale::new(&data::EN_US);
        assert_eq!(locale.era_index(&civil()), 1);
        let bc = CivilDateTime {
            date: crate::civil::CivilDate {
                year: -5,
                month: 0,
                day: 1,
            },
            ..CivilDateTime::default()
        };
        assert_eq!(locale.era_index(&bc), 0);
        let req = request(FieldKind::Era, FieldStyle::Short);
        assert_eq!(locale.format_to_parts(&req, &bc)[0].value, "BC");
    }
}

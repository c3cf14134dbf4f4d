//! The compiled time-zone provider.
//!
//! A baked table of zone records: standard offset, daylight offset, and
//! the rule set governing the transition dates. Rules cover the current
//! regimes only (post-2007 for the United States, post-1996 for the
//! European Union); instants before those regimes reuse the current rules,
//! which is accurate enough for the UI-input dates this engine serves.

use crate::error::DateFmtError;
use crate::options::FieldStyle;
use crate::provider::TimeZoneProvider;
use crate::{utils, DateFmtResult, MS_PER_DAY, MS_PER_HOUR};

/// The daylight-saving rule set a zone follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DstRule {
    /// No daylight saving.
    None,
    /// Second Sunday of March 02:00 local to first Sunday of November
    /// 02:00 local.
    UnitedStates,
    /// Last Sunday of March 01:00 UTC to last Sunday of October 01:00 UTC.
    EuropeanUnion,
    /// First Sunday of October 02:00 local to first Sunday of April 03:00
    /// local (southern-hemisphere summer spans the new year).
    AustraliaSoutheast,
}

#[derive(Debug, Clone, Copy)]
struct ZoneRecord {
    id: &'static str,
    std_offset_ms: i64,
    dst_offset_ms: i64,
    rule: DstRule,
    std_abbr: &'static str,
    dst_abbr: &'static str,
    std_name: &'static str,
    dst_name: &'static str,
}

const HOUR: i64 = MS_PER_HOUR;

static ZONES: [ZoneRecord; 9] = [
    ZoneRecord {
        id: "UTC",
        std_offset_ms: 0,
        dst_offset_ms: 0,
        rule: DstRule::None,
        std_abbr: "UTC",
        dst_abbr: "UTC",
        std_name: "Coordinated Universal Time",
        dst_name: "Coordinated Universal Time",
    },
    ZoneRecord {
        id: "America/New_York",
        std_offset_ms: -5 * HOUR,
        dst_offset_ms: -4 * HOUR,
        rule: DstRule::UnitedStates,
        std_abbr: "EST",
        dst_abbr: "EDT",
        std_name: "Eastern Standard Time",
        dst_name: "Eastern Daylight Time",
    },
    ZoneRecord {
        id: "America/Chicago",
        std_offset_ms: -6 * HOUR,
        dst_offset_ms: -5 * HOUR,
        rule: DstRule::UnitedStates,
        std_abbr: "CST",
        dst_abbr: "CDT",
        std_name: "Central Standard Time",
        dst_name: "Central Daylight Time",
    },
    ZoneRecord {
        id: "America/Los_Angeles",
        std_offset_ms: -8 * HOUR,
        dst_offset_ms: -7 * HOUR,
        rule: DstRule::UnitedStates,
        std_abbr: "PST",
        dst_abbr: "PDT",
        std_name: "Pacific Standard Time",
        dst_name: "Pacific Daylight Time",
    },
    ZoneRecord {
        id: "Europe/London",
        std_offset_ms: 0,
        dst_offset_ms: HOUR,
        rule: DstRule::EuropeanUnion,
        std_abbr: "GMT",
        dst_abbr: "BST",
        std_name: "Greenwich Mean Time",
        dst_name: "British Summer Time",
    },
    ZoneRecord {
        id: "Europe/Berlin",
        std_offset_ms: HOUR,
        dst_offset_ms: 2 * HOUR,
        rule: DstRule::EuropeanUnion,
        std_abbr: "CET",
        dst_abbr: "CEST",
        std_name: "Central European Standard Time",
        dst_name: "Central European Summer Time",
    },
    ZoneRecord {
        id: "Europe/Paris",
        std_offset_ms: HOUR,
        dst_offset_ms: 2 * HOUR,
        rule: DstRule::EuropeanUnion,
        std_abbr: "CET",
        dst_abbr: "CEST",
        std_name: "Central European Standard Time",
        dst_name: "Central European Summer Time",
    },
    ZoneRecord {
        id: "Asia/Tokyo",
        std_offset_ms: 9 * HOUR,
        dst_offset_ms: 9 * HOUR,
        rule: DstRule::None,
        std_abbr: "JST",
        dst_abbr: "JST",
        std_name: "Japan Standard Time",
        dst_name: "Japan Standard Time",
    },
    ZoneRecord {
        id: "Australia/Sydney",
        std_offset_ms: 10 * HOUR,
        dst_offset_ms: 11 * HOUR,
        rule: DstRule::AustraliaSoutheast,
        std_abbr: "AEST",
        dst_abbr: "AEDT",
        std_name: "Australian Eastern Standard Time",
        dst_name: "Australian Eastern Daylight Time",
    },
];

/// A [`TimeZoneProvider`] backed by the compiled zone table.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompiledTz;

impl CompiledTz {
    fn record(&self, identifier: &str) -> DateFmtResult<&'static ZoneRecord> {
        ZONES.iter().find(|z| z.id == identifier).ok_or_else(|| {
            DateFmtError::range().with_message(format!("{identifier:?} is not a known time zone"))
        })
    }
}

impl TimeZoneProvider for CompiledTz {
    fn is_known(&self, identifier: &str) -> bool {
        ZONES.iter().any(|z| z.id == identifier)
    }

    fn offset_ms(&self, identifier: &str, epoch_ms: i64) -> DateFmtResult<i64> {
        let zone = self.record(identifier)?;
        Ok(if in_daylight_time(zone, epoch_ms) {
            zone.dst_offset_ms
        } else {
            zone.std_offset_ms
        })
    }

    fn display_name(
        &self,
        identifier: &str,
        epoch_ms: i64,
        style: FieldStyle,
    ) -> DateFmtResult<String> {
        let zone = self.record(identifier)?;
        let daylight = in_daylight_time(zone, epoch_ms);
        let name = match (style, daylight) {
            (FieldStyle::Long, false) => zone.std_name,
            (FieldStyle::Long, true) => zone.dst_name,
            (_, false) => zone.std_abbr,
            (_, true) => zone.dst_abbr,
        };
        Ok(name.to_owned())
    }
}

fn in_daylight_time(zone: &ZoneRecord, epoch_ms: i64) -> bool {
    match zone.rule {
        DstRule::None => false,
        DstRule::UnitedStates => {
            let year = utils::epoch_ms_to_year(epoch_ms + zone.std_offset_ms);
            // Transitions happen at 02:00 local time, standard time going
            // in and daylight time coming out.
            let start = nth_weekday(year, 2, 0, 2) + 2 * HOUR - zone.std_offset_ms;
            let end = nth_weekday(year, 10, 0, 1) + 2 * HOUR - zone.dst_offset_ms;
            (start..end).contains(&epoch_ms)
        }
        DstRule::EuropeanUnion => {
            let year = utils::epoch_ms_to_year(epoch_ms + zone.std_offset_ms);
            // EU transitions are simultaneous across zones, at 01:00 UTC.
            let start = last_weekday(year, 2, 0) + HOUR;
            let end = last_weekday(year, 9, 0) + HOUR;
            (start..end).contains(&epoch_ms)
        }
        DstRule::AustraliaSoutheast => {
            let year = utils::epoch_ms_to_year(epoch_ms + zone.std_offset_ms);
            // Daylight time runs across the new year: from the first
            // Sunday of October to the first Sunday of April.
            let summer_start = nth_weekday(year, 9, 0, 1) + 2 * HOUR - zone.std_offset_ms;
            let summer_end = nth_weekday(year, 3, 0, 1) + 3 * HOUR - zone.dst_offset_ms;
            epoch_ms >= summer_start || epoch_ms < summer_end
        }
    }
}

/// Returns the UTC midnight of the `n`th (one-based) `weekday` of a month.
/// `month` is zero-based; `weekday` 0 is Sunday.
fn nth_weekday(year: i32, month: u8, weekday: u8, n: u8) -> i64 {
    let first = utils::epoch_ms_for_month_start(year, month);
    let first_weekday = utils::epoch_ms_to_week_day(first);
    let offset = i64::from((7 + weekday - first_weekday) % 7) + 7 * (i64::from(n) - 1);
    first + offset * MS_PER_DAY
}

/// Returns the UTC midnight of the last `weekday` of a month.
fn last_weekday(year: i32, month: u8, weekday: u8) -> i64 {
    let days = utils::days_in_month(year, month);
    let last = utils::epoch_ms_for_ymd(year, month, i64::from(days));
    let last_weekday = utils::epoch_ms_to_week_day(last);
    last - i64::from((7 + last_weekday - weekday) % 7) * MS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    const JAN_15_2021: i64 = 1_610_668_800_000;

    #[test]
    fn unknown_zone_is_an_error() {
        assert!(CompiledTz.offset_ms("Mars/Olympus_Mons", 0).is_err());
        assert!(!CompiledTz.is_known("Mars/Olympus_Mons"));
        assert!(CompiledTz.is_known("Asia/Tokyo"));
    }

    #[test]
    fn fixed_offsets() {
        assert_eq!(CompiledTz.offset_ms("UTC", JAN_15_2021).unwrap(), 0);
        assert_eq!(
            CompiledTz.offset_ms("Asia/Tokyo", JAN_15_2021).unwrap(),
            9 * HOUR
        );
    }

    #[test]
    fn us_winter_and_summer_offsets() {
        // January 15, 2021: standard time.
        assert_eq!(
            CompiledTz
                .offset_ms("America/New_York", JAN_15_2021)
                .unwrap(),
            -5 * HOUR
        );
        // July 15, 2021: daylight time.
        let summer = utils::epoch_ms_for_ymd(2021, 6, 15);
        assert_eq!(
            CompiledTz.offset_ms("America/New_York", summer).unwrap(),
            -4 * HOUR
        );
    }

    #[test]
    fn us_transition_boundaries_2021() {
        // 2021: DST began March 14 at 07:00 UTC, ended November 7 at
        // 06:00 UTC.
        let begin = utils::epoch_ms_for_ymd(2021, 2, 14) + 7 * HOUR;
        let end = utils::epoch_ms_for_ymd(2021, 10, 7) + 6 * HOUR;
        let zone = "America/New_York";
        assert_eq!(CompiledTz.offset_ms(zone, begin - 1).unwrap(), -5 * HOUR);
        assert_eq!(CompiledTz.offset_ms(zone, begin).unwrap(), -4 * HOUR);
        assert_eq!(CompiledTz.offset_ms(zone, end - 1).unwrap(), -4 * HOUR);
        assert_eq!(CompiledTz.offset_ms(zone, end).unwrap(), -5 * HOUR);
    }

    #[test]
    fn eu_transition_boundaries_2021() {
        // 2021: EU summer time began March 28 at 01:00 UTC, ended
        // October 31 at 01:00 UTC.
        let begin = utils::epoch_ms_for_ymd(2021, 2, 28) + HOUR;
        let end = utils::epoch_ms_for_ymd(2021, 9, 31) + HOUR;
        let zone = "Europe/Berlin";
        assert_eq!(CompiledTz.offset_ms(zone, begin - 1).unwrap(), HOUR);
        assert_eq!(CompiledTz.offset_ms(zone, begin).unwrap(), 2 * HOUR);
        assert_eq!(CompiledTz.offset_ms(zone, end - 1).unwrap(), 2 * HOUR);
        assert_eq!(CompiledTz.offset_ms(zone, end).unwrap(), HOUR);
    }

    #[test]
    fn southern_hemisphere_summer_spans_new_year() {
        let zone = "Australia/Sydney";
        // January is summer in Sydney.
        assert_eq!(CompiledTz.offset_ms(zone, JAN_15_2021).unwrap(), 11 * HOUR);
        // July is winter.
        let july = utils::epoch_ms_for_ymd(2021, 6, 15);
        assert_eq!(CompiledTz.offset_ms(zone, july).unwrap(), 10 * HOUR);
    }

    #[test]
    fn display_names_follow_daylight_state() {
        let summer = utils::epoch_ms_for_ymd(2021, 6, 15);
        assert_eq!(
            CompiledTz
                .display_name("America/New_York", JAN_15_2021, FieldStyle::Short)
                .unwrap(),
            "EST"
        );
        assert_eq!(
            CompiledTz
                .display_name("America/New_York", summer, FieldStyle::Long)
                .unwrap(),
            "Eastern Daylight Time"
        );
    }
}

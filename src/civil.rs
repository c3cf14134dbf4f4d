//! Civil (wall-clock) field slots.
//!
//! A `CivilDate` holds the year, month, and day slots; a `CivilTime` the
//! hour, minute, second, and millisecond slots. Months are zero-based
//! internally, matching the engine's parsed representation. A
//! `CivilDateTime` has no attached zone; callers apply a zone offset when
//! converting to or from epoch milliseconds.

use crate::utils;

/// The year, month, and day slots. `month` is zero-based.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CivilDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

/// The hour, minute, second, and millisecond slots.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CivilTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
}

/// The record of the `CivilDate` and `CivilTime` slots.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CivilDateTime {
    pub date: CivilDate,
    pub time: CivilTime,
}

impl CivilDateTime {
    /// Extracts the civil fields of an epoch millisecond value, interpreted
    /// as UTC. Apply a zone offset to `ms` beforehand to obtain wall-clock
    /// fields for a zone.
    #[must_use]
    pub fn from_epoch_ms(ms: i64) -> Self {
        let time_ms = utils::ms_of_day(ms);
        Self {
            date: CivilDate {
                year: utils::epoch_ms_to_year(ms),
                month: utils::epoch_ms_to_month(ms),
                day: utils::epoch_ms_to_date(ms),
            },
            time: CivilTime {
                hour: (time_ms / crate::MS_PER_HOUR) as u8,
                minute: ((time_ms / crate::MS_PER_MINUTE) % 60) as u8,
                second: ((time_ms / crate::MS_PER_SECOND) % 60) as u8,
                millisecond: (time_ms % crate::MS_PER_SECOND) as u16,
            },
        }
    }

    /// Returns the epoch millisecond of these fields interpreted as UTC.
    /// Out-of-range days roll over into the following month.
    #[must_use]
    pub fn as_epoch_ms(&self) -> i64 {
        let day_ms =
            utils::epoch_ms_for_ymd(self.date.year, self.date.month.min(11), i64::from(self.date.day));
        day_ms
            + i64::from(self.time.hour) * crate::MS_PER_HOUR
            + i64::from(self.time.minute) * crate::MS_PER_MINUTE
            + i64::from(self.time.second) * crate::MS_PER_SECOND
            + i64::from(self.time.millisecond)
    }

    /// Returns the day of the week of the date slots; `0` is Sunday.
    #[must_use]
    pub fn week_day(&self) -> u8 {
        utils::epoch_ms_to_week_day(utils::epoch_ms_for_ymd(
            self.date.year,
            self.date.month.min(11),
            i64::from(self.date.day),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_round_trip() {
        // 2021-01-15T19:30:05.250Z
        let ms = 1_610_668_800_000 + 19 * crate::MS_PER_HOUR + 30 * crate::MS_PER_MINUTE + 5_250;
        let civil = CivilDateTime::from_epoch_ms(ms);
        assert_eq!(civil.date.year, 2021);
        assert_eq!(civil.date.month, 0);
        assert_eq!(civil.date.day, 15);
        assert_eq!(civil.time.hour, 19);
        assert_eq!(civil.time.minute, 30);
        assert_eq!(civil.time.second, 5);
        assert_eq!(civil.time.millisecond, 250);
        assert_eq!(civil.as_epoch_ms(), ms);
    }

    #[test]
    fn week_day_is_zone_relative() {
        // 2021-01-15 local fields regardless of the epoch they came from.
        let civil = CivilDateTime::from_epoch_ms(1_610_668_800_000);
        assert_eq!(civil.week_day(), 5);
    }

    #[test]
    fn pre_epoch_fields() {
        let civil = CivilDateTime::from_epoch_ms(-1);
        assert_eq!(civil.date.year, 1969);
        assert_eq!(civil.date.month, 11);
        assert_eq!(civil.date.day, 31);
        assert_eq!(civil.time.millisecond, 999);
    }
}

//! Utility date and time equations over epoch milliseconds.

use crate::MS_PER_DAY;

/// Cumulative day counts at the start of each month for a non-leap year.
const MONTH_STARTS: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Day counts per month for a non-leap year.
const MONTH_LENGTHS: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub(crate) const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub(crate) const fn days_in_year(year: i32) -> i64 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Returns the day count of a month. `month` is zero-based.
pub(crate) fn days_in_month(year: i32, month: u8) -> u8 {
    debug_assert!(month < 12);
    if month == 1 && is_leap_year(year) {
        29
    } else {
        MONTH_LENGTHS[usize::from(month)]
    }
}

/// Returns the day-of-year index (zero-based) at which a month starts.
/// `month` is zero-based.
pub(crate) fn month_start_day(year: i32, month: u8) -> i64 {
    debug_assert!(month < 12);
    let leap_day = i64::from(month >= 2 && is_leap_year(year));
    MONTH_STARTS[usize::from(month)] + leap_day
}

/// Returns the epoch day number for January 1 of `year`.
pub(crate) fn epoch_days_for_year(year: i32) -> i64 {
    let y = i64::from(year);
    365 * (y - 1970) + (y - 1969).div_euclid(4) - (y - 1901).div_euclid(100)
        + (y - 1601).div_euclid(400)
}

/// Returns the epoch day number holding `ms`.
pub(crate) fn epoch_ms_to_day(ms: i64) -> i64 {
    ms.div_euclid(MS_PER_DAY)
}

/// Returns the millisecond offset of `ms` within its day.
pub(crate) fn ms_of_day(ms: i64) -> i64 {
    ms.rem_euclid(MS_PER_DAY)
}

/// Returns the proleptic-Gregorian year holding `ms`.
pub(crate) fn epoch_ms_to_year(ms: i64) -> i32 {
    let day = epoch_ms_to_day(ms);
    // Estimate, then refine in both directions. The estimate can be off
    // near year boundaries and for negative epochs.
    let mut year = (day / 365) as i32 + 1970;
    while epoch_days_for_year(year) > day {
        year -= 1;
    }
    while epoch_days_for_year(year + 1) <= day {
        year += 1;
    }
    year
}

/// Returns the zero-based day-of-year of `ms`.
pub(crate) fn epoch_ms_to_day_of_year(ms: i64) -> i64 {
    epoch_ms_to_day(ms) - epoch_days_for_year(epoch_ms_to_year(ms))
}

/// Returns the zero-based month holding `ms`.
pub(crate) fn epoch_ms_to_month(ms: i64) -> u8 {
    let year = epoch_ms_to_year(ms);
    let day = epoch_ms_to_day_of_year(ms);
    let mut month = 11u8;
    while month > 0 && month_start_day(year, month) > day {
        month -= 1;
    }
    month
}

/// Returns the one-based day-of-month of `ms`.
pub(crate) fn epoch_ms_to_date(ms: i64) -> u8 {
    let year = epoch_ms_to_year(ms);
    let day = epoch_ms_to_day_of_year(ms);
    let month = epoch_ms_to_month(ms);
    (day - month_start_day(year, month) + 1) as u8
}

/// Returns the epoch millisecond at which `year-month-day` begins (UTC).
/// `month` is zero-based; `day` is one-based and may exceed the month
/// length, in which case it rolls over.
pub(crate) fn epoch_ms_for_ymd(year: i32, month: u8, day: i64) -> i64 {
    (epoch_days_for_year(year) + month_start_day(year, month) + day - 1) * MS_PER_DAY
}

/// Returns the epoch millisecond at which a calendar month begins (UTC).
pub(crate) fn epoch_ms_for_month_start(year: i32, month: u8) -> i64 {
    epoch_ms_for_ymd(year, month, 1)
}

/// Returns the day of the week of `ms`; `0` is Sunday.
pub(crate) fn epoch_ms_to_week_day(ms: i64) -> u8 {
    // 1970-01-01 was a Thursday.
    (epoch_ms_to_day(ms) + 4).rem_euclid(7) as u8
}

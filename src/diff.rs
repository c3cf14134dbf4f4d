//! The calendar difference engine.
//!
//! Units up to a week have fixed lengths and divide the raw millisecond
//! distance. Calendar units do not: a month is 28 to 31 days and a year
//! 365 or 366, so the engine enumerates the actual months or years the
//! interval traverses and sums each one's fractional contribution,
//! normalized by its real length. Era is a binary distance by design:
//! zero within one era, infinite across eras.

use crate::instant::Instant;
use crate::options::Granularity;
use crate::{utils, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND, MS_PER_WEEK, MS_PER_YEAR};

/// The result of a difference computation: an amount of `unit`s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateDiff {
    pub amount: f64,
    pub unit: Granularity,
}

/// Computes the unsigned distance between two instants at the requested
/// granularity. Order-independent; never fails. An invalid instant on
/// either side yields a NaN amount, and [`Granularity::Custom`] (which
/// needs a caller-supplied comparison, see [`diff_dates_with`]) does too.
#[must_use]
pub fn diff_dates(a: Instant, b: Instant, granularity: Granularity) -> DateDiff {
    if !a.is_valid() || !b.is_valid() {
        log::warn!("diff_dates received an invalid instant");
        return DateDiff {
            amount: f64::NAN,
            unit: granularity,
        };
    }
    let lo = a.epoch_milliseconds().min(b.epoch_milliseconds());
    let hi = a.epoch_milliseconds().max(b.epoch_milliseconds());
    let span = (hi - lo) as f64;

    let amount = match granularity {
        Granularity::Millisecond => span,
        Granularity::Second => span / MS_PER_SECOND as f64,
        Granularity::Minute => span / MS_PER_MINUTE as f64,
        Granularity::Hour => span / MS_PER_HOUR as f64,
        Granularity::Day => span / MS_PER_DAY as f64,
        Granularity::Week => span / MS_PER_WEEK as f64,
        Granularity::Month => month_amount(lo, hi),
        Granularity::Quarter => month_amount(lo, hi) / 3.0,
        Granularity::Year => year_amount(lo, hi),
        Granularity::Era => era_amount(lo, hi),
        Granularity::Custom => {
            log::warn!("diff_dates cannot compute a custom granularity; use diff_dates_with");
            f64::NAN
        }
    };
    DateDiff {
        amount,
        unit: granularity,
    }
}

/// Computes a difference with a caller-supplied comparison.
#[must_use]
pub fn diff_dates_with<F>(a: Instant, b: Instant, compare: F) -> DateDiff
where
    F: FnOnce(Instant, Instant) -> DateDiff,
{
    compare(a, b)
}

/// Sums, for every calendar month the interval touches, the fraction of
/// that month the interval covers. Enumeration is done in UTC, the
/// zone-independent reading of an instant. A half-covered 28-day February
/// contributes exactly 0.5, where a fixed 30-day approximation would not.
fn month_amount(lo: i64, hi: i64) -> f64 {
    let mut year = utils::epoch_ms_to_year(lo);
    let mut month = utils::epoch_ms_to_month(lo);
    let mut total = 0.0;
    loop {
        let start = utils::epoch_ms_for_month_start(year, month);
        if start > hi {
            break;
        }
        let (next_year, next_month) = if month == 11 {
            (year + 1, 0)
        } else {
            (year, month + 1)
        };
        let next = utils::epoch_ms_for_month_start(next_year, next_month);
        let overlap = next.min(hi) - start.max(lo);
        if overlap > 0 {
            let month_ms = i64::from(utils::days_in_month(year, month)) * MS_PER_DAY;
            total += overlap as f64 / month_ms as f64;
        }
        year = next_year;
        month = next_month;
    }
    total
}

/// Years divide evenly only when the interval spans no leap year; in that
/// case the fixed 365-day constant is exact. Otherwise each calendar year
/// contributes the covered fraction of its real length.
fn year_amount(lo: i64, hi: i64) -> f64 {
    let first = utils::epoch_ms_to_year(lo);
    let last = utils::epoch_ms_to_year(hi);
    if !(first..=last).any(utils::is_leap_year) {
        return (hi - lo) as f64 / MS_PER_YEAR as f64;
    }
    let mut total = 0.0;
    for year in first..=last {
        let start = utils::epoch_ms_for_month_start(year, 0);
        let next = utils::epoch_ms_for_month_start(year + 1, 0);
        let overlap = next.min(hi) - start.max(lo);
        if overlap > 0 {
            let year_ms = utils::days_in_year(year) * MS_PER_DAY;
            total += overlap as f64 / year_ms as f64;
        }
    }
    total
}

/// Binary by design: two instants are either in the same era or infinitely
/// far apart. Era classification matches the compiled locale primitive's
/// (the proleptic-Gregorian year sign).
fn era_amount(lo: i64, hi: i64) -> f64 {
    let era_of = |ms: i64| usize::from(utils::epoch_ms_to_year(ms) > 0);
    if era_of(lo) == era_of(hi) {
        0.0
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(year: i32, month: u8, day: i64) -> Instant {
        Instant::from_epoch_milliseconds(utils::epoch_ms_for_ymd(year, month, day))
    }

    #[test]
    fn whole_months() {
        let diff = diff_dates(instant(2021, 0, 1), instant(2021, 6, 1), Granularity::Month);
        assert_eq!(diff.amount, 6.0);
        assert_eq!(diff.unit, Granularity::Month);
    }

    #[test]
    fn half_of_a_short_february() {
        let diff = diff_dates(instant(2021, 1, 1), instant(2021, 1, 15), Granularity::Month);
        assert_eq!(diff.amount, 0.5);
    }

    #[test]
    fn sub_day_remainders_contribute() {
        // Half of January 1: 12 hours out of a 31-day month.
        let a = instant(2021, 0, 1);
        let b = Instant::from_epoch_milliseconds(
            a.epoch_milliseconds() + 12 * crate::MS_PER_HOUR,
        );
        let diff = diff_dates(a, b, Granularity::Month);
        assert!((diff.amount - 0.5 / 31.0).abs() < 1e-12);
    }

    #[test]
    fn months_are_order_independent() {
        let a = instant(2020, 10, 3);
        let b = instant(2022, 2, 9);
        assert_eq!(
            diff_dates(a, b, Granularity::Month).amount,
            diff_dates(b, a, Granularity::Month).amount
        );
    }

    #[test]
    fn quarters_are_months_over_three() {
        let diff = diff_dates(instant(2021, 0, 1), instant(2021, 6, 1), Granularity::Quarter);
        assert_eq!(diff.amount, 2.0);
    }

    #[test]
    fn years_across_a_leap_year() {
        let diff = diff_dates(instant(2020, 0, 1), instant(2022, 0, 1), Granularity::Year);
        assert_eq!(diff.amount, 2.0);
    }

    #[test]
    fn years_without_a_leap_year_use_the_fixed_constant() {
        let diff = diff_dates(instant(2021, 0, 1), instant(2022, 0, 1), Granularity::Year);
        assert_eq!(diff.amount, 1.0);
        let diff = diff_dates(instant(2021, 0, 1), instant(2021, 6, 2), Granularity::Year);
        assert_eq!(
            diff.amount,
            182.0 * MS_PER_DAY as f64 / MS_PER_YEAR as f64
        );
    }

    #[test]
    fn seconds_across_a_plain_year() {
        let diff = diff_dates(instant(2021, 6, 15), instant(2022, 6, 15), Granularity::Second);
        assert_eq!(diff.amount, (MS_PER_YEAR / MS_PER_SECOND) as f64);
        assert_eq!(diff.unit, Granularity::Second);
    }

    #[test]
    fn weeks_and_days() {
        let diff = diff_dates(instant(2021, 0, 1), instant(2021, 0, 15), Granularity::Week);
        assert_eq!(diff.amount, 2.0);
        let diff = diff_dates(instant(2021, 0, 1), instant(2021, 0, 15), Granularity::Day);
        assert_eq!(diff.amount, 14.0);
    }

    #[test]
    fn era_is_binary() {
        assert_eq!(
            diff_dates(instant(2020, 0, 1), instant(2021, 0, 1), Granularity::Era).amount,
            0.0
        );
        let bc = instant(-5, 0, 1);
        assert_eq!(
            diff_dates(bc, instant(2021, 0, 1), Granularity::Era).amount,
            f64::INFINITY
        );
    }

    #[test]
    fn invalid_instants_yield_nan() {
        let diff = diff_dates(Instant::INVALID, instant(2021, 0, 1), Granularity::Day);
        assert!(diff.amount.is_nan());
    }

    #[test]
    fn custom_granularity_delegates() {
        let diff = diff_dates_with(instant(2021, 0, 1), instant(2021, 0, 2), |a, b| DateDiff {
            amount: (b.epoch_milliseconds() - a.epoch_milliseconds()) as f64,
            unit: Granularity::Custom,
        });
        assert_eq!(diff.amount, MS_PER_DAY as f64);
        assert_eq!(diff.unit, Granularity::Custom);
    }
}

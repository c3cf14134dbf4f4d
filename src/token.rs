//! The format mini-language token table.
//!
//! A token is a short substring representing one date/time field at a
//! particular style (`yyyy`, `MMM`, `HH`), a composite (`iso`), or a
//! whole-date/time preset (`ud`, `lt`, `r`). The table is a process-wide
//! constant; matching prefers the longest token at a position, so entries
//! are ordered longest-first within each prefix family.

use crate::civil::CivilDateTime;
use crate::options::{DateStyle, FieldStyle, HourCycle, TimeStyle};

/// The closed set of field tags a [`crate::part::DatePart`] can carry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Literal text carried through unchanged.
    #[default]
    Literal,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    Weekday,
    Era,
    DayPeriod,
    TimeZoneName,
    /// A whole-date preset consumed entirely by the locale primitive.
    StyleDate,
    /// A whole-time preset consumed entirely by the locale primitive.
    StyleTime,
}

impl FieldKind {
    /// Applies a parsed field value to the matching civil slot. Values
    /// outside the slot's legal range are rejected; the caller keeps the
    /// slot's default and records a warning.
    ///
    /// `Month` values are zero-based. Non-settable kinds (weekday, era,
    /// day period, zone name, literals, presets) return `false`.
    pub(crate) fn apply_to(self, civil: &mut CivilDateTime, value: i64) -> bool {
        match self {
            Self::Year => {
                if !(-271_821..=275_760).contains(&value) {
                    return false;
                }
                civil.date.year = value as i32;
            }
            Self::Month => {
                if !(0..=11).contains(&value) {
                    return false;
                }
                civil.date.month = value as u8;
            }
            Self::Day => {
                if !(1..=31).contains(&value) {
                    return false;
                }
                civil.date.day = value as u8;
            }
            Self::Hour => {
                if !(0..=24).contains(&value) {
                    return false;
                }
                // A trailing-midnight "24" is hour zero of the next day;
                // the engine folds it back to zero within the same day.
                civil.time.hour = (value % 24) as u8;
            }
            Self::Minute => {
                if !(0..=59).contains(&value) {
                    return false;
                }
                civil.time.minute = value as u8;
            }
            Self::Second => {
                if !(0..=59).contains(&value) {
                    return false;
                }
                civil.time.second = value as u8;
            }
            Self::Millisecond => {
                if !(0..=999).contains(&value) {
                    return false;
                }
                civil.time.millisecond = value as u16;
            }
            _ => return false,
        }
        true
    }
}

/// The formatting instruction a token stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenInstruction {
    /// Format a single field.
    Field {
        kind: FieldKind,
        style: FieldStyle,
        hour_cycle: Option<HourCycle>,
    },
    /// The fixed composite expansion; see [`ISO_EXPANSION`].
    Iso,
    /// A whole-date/time preset rendered by the locale primitive.
    Preset {
        date: Option<DateStyle>,
        time: Option<TimeStyle>,
    },
}

/// One `(token, instruction)` pair of the table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TokenEntry {
    pub(crate) token: &'static str,
    pub(crate) instruction: TokenInstruction,
}

const fn field(token: &'static str, kind: FieldKind, style: FieldStyle) -> TokenEntry {
    TokenEntry {
        token,
        instruction: TokenInstruction::Field {
            kind,
            style,
            hour_cycle: None,
        },
    }
}

const fn hour(token: &'static str, style: FieldStyle, cycle: HourCycle) -> TokenEntry {
    TokenEntry {
        token,
        instruction: TokenInstruction::Field {
            kind: FieldKind::Hour,
            style,
            hour_cycle: Some(cycle),
        },
    }
}

const fn preset(
    token: &'static str,
    date: Option<DateStyle>,
    time: Option<TimeStyle>,
) -> TokenEntry {
    TokenEntry {
        token,
        instruction: TokenInstruction::Preset { date, time },
    }
}

/// The token the `iso` composite expands to before tokenization. The
/// trailing `Z` is honest: an `iso` format always renders in UTC.
pub(crate) const ISO_TOKEN: &str = "iso";
pub(crate) const ISO_EXPANSION: &str = "yyyy-MM-ddTHH:mm:ss.fffZ";

/// The token table. Ordered so that every token precedes the tokens that
/// are textual prefixes of it (`yyyy` before `yy` before `y`), which the
/// tokenizer relies on to resolve ties at a match position.
pub(crate) const TOKEN_TABLE: &[TokenEntry] = &[
    field("MMMMM", FieldKind::Month, FieldStyle::Narrow),
    field("MMMM", FieldKind::Month, FieldStyle::Long),
    field("MMM", FieldKind::Month, FieldStyle::Short),
    field("MM", FieldKind::Month, FieldStyle::TwoDigit),
    field("M", FieldKind::Month, FieldStyle::Numeric),
    field("EEEEE", FieldKind::Weekday, FieldStyle::Narrow),
    field("EEEE", FieldKind::Weekday, FieldStyle::Long),
    field("EEE", FieldKind::Weekday, FieldStyle::Short),
    field("EE", FieldKind::Weekday, FieldStyle::Short),
    field("E", FieldKind::Weekday, FieldStyle::Short),
    field("yyyy", FieldKind::Year, FieldStyle::Numeric),
    field("yy", FieldKind::Year, FieldStyle::TwoDigit),
    field("y", FieldKind::Year, FieldStyle::Numeric),
    field("dd", FieldKind::Day, FieldStyle::TwoDigit),
    field("d", FieldKind::Day, FieldStyle::Numeric),
    hour("HH", FieldStyle::TwoDigit, HourCycle::H23),
    hour("H", FieldStyle::Numeric, HourCycle::H23),
    hour("hh", FieldStyle::TwoDigit, HourCycle::H12),
    hour("h", FieldStyle::Numeric, HourCycle::H12),
    field("mm", FieldKind::Minute, FieldStyle::TwoDigit),
    field("m", FieldKind::Minute, FieldStyle::Numeric),
    TokenEntry {
        token: ISO_TOKEN,
        instruction: TokenInstruction::Iso,
    },
    field("ss", FieldKind::Second, FieldStyle::TwoDigit),
    field("s", FieldKind::Second, FieldStyle::Numeric),
    field("fff", FieldKind::Millisecond, FieldStyle::Numeric),
    field("ff", FieldKind::Millisecond, FieldStyle::Numeric),
    field("f", FieldKind::Millisecond, FieldStyle::Numeric),
    field("GGG", FieldKind::Era, FieldStyle::Long),
    field("GG", FieldKind::Era, FieldStyle::Short),
    field("G", FieldKind::Era, FieldStyle::Short),
    field("kk", FieldKind::TimeZoneName, FieldStyle::Long),
    field("k", FieldKind::TimeZoneName, FieldStyle::Short),
    field("aaa", FieldKind::DayPeriod, FieldStyle::Long),
    field("aa", FieldKind::DayPeriod, FieldStyle::Short),
    field("a", FieldKind::DayPeriod, FieldStyle::Short),
    preset("ud", Some(DateStyle::Full), None),
    preset("ut", None, Some(TimeStyle::Full)),
    preset("u", Some(DateStyle::Full), Some(TimeStyle::Full)),
    preset("ld", Some(DateStyle::Long), None),
    preset("lt", None, Some(TimeStyle::Long)),
    preset("l", Some(DateStyle::Long), Some(TimeStyle::Long)),
    preset("ed", Some(DateStyle::Medium), None),
    preset("et", None, Some(TimeStyle::Medium)),
    preset("eu", Some(DateStyle::Medium), Some(TimeStyle::Medium)),
    preset("rd", Some(DateStyle::Short), None),
    preset("rt", None, Some(TimeStyle::Short)),
    preset("r", Some(DateStyle::Short), Some(TimeStyle::Short)),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_tokens_follow_their_extensions() {
        // `y` must not shadow `yyyy`; the table guarantees this ordering
        // for every prefix pair.
        for (i, earlier) in TOKEN_TABLE.iter().enumerate() {
            for later in &TOKEN_TABLE[i + 1..] {
                assert!(
                    !later.token.starts_with(earlier.token)
                        || later.token.len() <= earlier.token.len(),
                    "{} would shadow {}",
                    earlier.token,
                    later.token
                );
            }
        }
    }

    #[test]
    fn apply_to_rejects_out_of_range_values() {
        let mut civil = CivilDateTime::default();
        assert!(!FieldKind::Month.apply_to(&mut civil, 12));
        assert!(!FieldKind::Day.apply_to(&mut civil, 0));
        assert!(!FieldKind::Minute.apply_to(&mut civil, 60));
        assert!(FieldKind::Month.apply_to(&mut civil, 11));
        assert_eq!(civil.date.month, 11);
    }

    #[test]
    fn hour_twenty_four_folds_to_zero() {
        let mut civil = CivilDateTime::default();
        assert!(FieldKind::Hour.apply_to(&mut civil, 24));
        assert_eq!(civil.time.hour, 0);
    }

    #[test]
    fn non_settable_kinds_are_rejected() {
        let mut civil = CivilDateTime::default();
        assert!(!FieldKind::Weekday.apply_to(&mut civil, 3));
        assert!(!FieldKind::Literal.apply_to(&mut civil, 1));
    }
}

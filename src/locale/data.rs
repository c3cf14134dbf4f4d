//! Compiled locale data.
//!
//! A small baked table covering the locales the engine ships with. Names
//! and preset patterns follow CLDR; preset patterns are written in the
//! engine's own format mini-language so they run through the ordinary
//! tokenizer.

use tinystr::{tinystr, TinyAsciiStr};

use crate::options::HourCycle;

/// The baked data for one locale.
#[derive(Debug)]
pub(crate) struct LocaleData {
    pub(crate) tag: TinyAsciiStr<8>,
    pub(crate) language: TinyAsciiStr<3>,
    pub(crate) months_long: [&'static str; 12],
    pub(crate) months_short: [&'static str; 12],
    /// `None` when the locale has no distinct narrow month names; the
    /// primitive then resolves narrow requests to short.
    pub(crate) months_narrow: Option<[&'static str; 12]>,
    pub(crate) weekdays_long: [&'static str; 7],
    pub(crate) weekdays_short: [&'static str; 7],
    pub(crate) weekdays_narrow: [&'static str; 7],
    /// AM and PM equivalents.
    pub(crate) day_periods: [&'static str; 2],
    /// Era names, index 0 before the common era.
    pub(crate) eras_long: [&'static str; 2],
    pub(crate) eras_short: [&'static str; 2],
    pub(crate) eras_narrow: [&'static str; 2],
    /// Whole-date preset patterns: full, long, medium, short.
    pub(crate) date_patterns: [&'static str; 4],
    /// Whole-time preset patterns: full, long, medium, short.
    pub(crate) time_patterns: [&'static str; 4],
    /// Combines a date and a time pattern; `{1}` is the date, `{0}` the
    /// time.
    pub(crate) glue_pattern: &'static str,
    /// The format used when the caller supplies none.
    pub(crate) default_pattern: &'static str,
    pub(crate) hour_cycle: HourCycle,
    /// Set for locales whose primitive is known to substitute the h24
    /// cycle when h23 was requested.
    pub(crate) prefers_h24: bool,
}

const EN_MONTHS_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
const EN_MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const EN_MONTHS_NARROW: [&str; 12] = ["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"];
const EN_WEEKDAYS_LONG: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
const EN_WEEKDAYS_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const EN_WEEKDAYS_NARROW: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];
const EN_ERAS_LONG: [&str; 2] = ["Before Christ", "Anno Domini"];
const EN_ERAS_SHORT: [&str; 2] = ["BC", "AD"];
const EN_ERAS_NARROW: [&str; 2] = ["B", "A"];

pub(crate) static EN_US: LocaleData = LocaleData {
    tag: tinystr!(8, "en-US"),
    language: tinystr!(3, "en"),
    months_long: EN_MONTHS_LONG,
    months_short: EN_MONTHS_SHORT,
    months_narrow: Some(EN_MONTHS_NARROW),
    weekdays_long: EN_WEEKDAYS_LONG,
    weekdays_short: EN_WEEKDAYS_SHORT,
    weekdays_narrow: EN_WEEKDAYS_NARROW,
    day_periods: ["AM", "PM"],
    eras_long: EN_ERAS_LONG,
    eras_short: EN_ERAS_SHORT,
    eras_narrow: EN_ERAS_NARROW,
    date_patterns: ["EEEE, MMMM d, y", "MMMM d, y", "MMM d, y", "M/d/yy"],
    time_patterns: ["h:mm:ss a kk", "h:mm:ss a k", "h:mm:ss a", "h:mm a"],
    glue_pattern: "{1}, {0}",
    default_pattern: "M/d/y",
    hour_cycle: HourCycle::H12,
    prefers_h24: false,
};

pub(crate) static EN_GB: LocaleData = LocaleData {
    tag: tinystr!(8, "en-GB"),
    language: tinystr!(3, "en"),
    months_long: EN_MONTHS_LONG,
    months_short: EN_MONTHS_SHORT,
    months_narrow: Some(EN_MONTHS_NARROW),
    weekdays_long: EN_WEEKDAYS_LONG,
    weekdays_short: EN_WEEKDAYS_SHORT,
    weekdays_narrow: EN_WEEKDAYS_NARROW,
    day_periods: ["am", "pm"],
    eras_long: EN_ERAS_LONG,
    eras_short: EN_ERAS_SHORT,
    eras_narrow: EN_ERAS_NARROW,
    date_patterns: ["EEEE d MMMM y", "d MMMM y", "d MMM y", "dd/MM/yy"],
    time_patterns: ["HH:mm:ss kk", "HH:mm:ss k", "HH:mm:ss", "HH:mm"],
    glue_pattern: "{1}, {0}",
    default_pattern: "dd/MM/y",
    hour_cycle: HourCycle::H23,
    prefers_h24: false,
};

pub(crate) static DE_DE: LocaleData = LocaleData {
    tag: tinystr!(8, "de-DE"),
    language: tinystr!(3, "de"),
    months_long: [
        "Januar",
        "Februar",
        "März",
        "April",
        "Mai",
        "Juni",
        "Juli",
        "August",
        "September",
        "Oktober",
        "November",
        "Dezember",
    ],
    months_short: [
        "Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.",
        "Dez.",
    ],
    months_narrow: Some(["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"]),
    weekdays_long: [
        "Sonntag",
        "Montag",
        "Dienstag",
        "Mittwoch",
        "Donnerstag",
        "Freitag",
        "Samstag",
    ],
    weekdays_short: ["So.", "Mo.", "Di.", "Mi.", "Do.", "Fr.", "Sa."],
    weekdays_narrow: ["S", "M", "D", "M", "D", "F", "S"],
    day_periods: ["AM", "PM"],
    eras_long: ["v. Chr.", "n. Chr."],
    eras_short: ["v. Chr.", "n. Chr."],
    eras_narrow: ["v. Chr.", "n. Chr."],
    date_patterns: ["EEEE, d. MMMM y", "d. MMMM y", "dd.MM.y", "dd.MM.yy"],
    time_patterns: ["HH:mm:ss kk", "HH:mm:ss k", "HH:mm:ss", "HH:mm"],
    glue_pattern: "{1}, {0}",
    default_pattern: "d.M.y",
    hour_cycle: HourCycle::H23,
    prefers_h24: false,
};

pub(crate) static FR_FR: LocaleData = LocaleData {
    tag: tinystr!(8, "fr-FR"),
    language: tinystr!(3, "fr"),
    months_long: [
        "janvier",
        "février",
        "mars",
        "avril",
        "mai",
        "juin",
        "juillet",
        "août",
        "septembre",
        "octobre",
        "novembre",
        "décembre",
    ],
    months_short: [
        "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
        "déc.",
    ],
    months_narrow: Some(["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"]),
    weekdays_long: [
        "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
    ],
    weekdays_short: ["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."],
    weekdays_narrow: ["D", "L", "M", "M", "J", "V", "S"],
    day_periods: ["AM", "PM"],
    eras_long: ["avant Jésus-Christ", "après Jésus-Christ"],
    eras_short: ["av. J.-C.", "ap. J.-C."],
    eras_narrow: ["av. J.-C.", "ap. J.-C."],
    date_patterns: ["EEEE d MMMM y", "d MMMM y", "d MMM y", "dd/MM/y"],
    time_patterns: ["HH:mm:ss kk", "HH:mm:ss k", "HH:mm:ss", "HH:mm"],
    glue_pattern: "{1}, {0}",
    default_pattern: "dd/MM/y",
    hour_cycle: HourCycle::H23,
    prefers_h24: false,
};

pub(crate) static JA_JP: LocaleData = LocaleData {
    tag: tinystr!(8, "ja-JP"),
    language: tinystr!(3, "ja"),
    months_long: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
    months_short: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
    months_narrow: None,
    weekdays_long: [
        "日曜日",
        "月曜日",
        "火曜日",
        "水曜日",
        "木曜日",
        "金曜日",
        "土曜日",
    ],
    weekdays_short: ["日", "月", "火", "水", "木", "金", "土"],
    weekdays_narrow: ["日", "月", "火", "水", "木", "金", "土"],
    day_periods: ["午前", "午後"],
    eras_long: ["紀元前", "西暦"],
    eras_short: ["紀元前", "西暦"],
    eras_narrow: ["BC", "AD"],
    date_patterns: ["y年M月d日EEEE", "y年M月d日", "y/MM/dd", "y/MM/dd"],
    time_patterns: ["H時mm分ss秒", "H:mm:ss", "H:mm:ss", "H:mm"],
    glue_pattern: "{1} {0}",
    default_pattern: "y/MM/dd",
    hour_cycle: HourCycle::H23,
    prefers_h24: true,
};

/// All compiled locales, in fallback preference order.
static DATA: [&LocaleData; 5] = [&EN_US, &EN_GB, &DE_DE, &FR_FR, &JA_JP];

/// The locale used when no requested locale has compiled data.
pub(crate) static DEFAULT: &LocaleData = &EN_US;

/// Looks a canonical BCP-47 tag up in the compiled table: first by exact
/// tag, then by bare language.
pub(crate) fn lookup(tag: &str) -> Option<&'static LocaleData> {
    if let Some(data) = DATA.iter().find(|d| d.tag.as_str() == tag).copied() {
        return Some(data);
    }
    let language = tag.split('-').next().unwrap_or(tag);
    DATA.iter()
        .find(|d| d.language.as_str() == language)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_tag_lookup() {
        assert_eq!(lookup("en-GB").unwrap().tag.as_str(), "en-GB");
        assert_eq!(lookup("ja-JP").unwrap().tag.as_str(), "ja-JP");
    }

    #[test]
    fn language_fallback_lookup() {
        assert_eq!(lookup("en").unwrap().tag.as_str(), "en-US");
        assert_eq!(lookup("fr-CA").unwrap().tag.as_str(), "fr-FR");
        assert!(lookup("xh-ZA").is_none());
    }
}

//! The format tokenizer.
//!
//! Splits a format string such as `"EEE, MMM d, y"` into an ordered
//! [`DatePartCollection`]. The scan repeatedly takes the earliest-starting
//! token of the table (ties go to the longest, by table order), blanks the
//! matched span with NUL filler so it cannot match again, and finishes by
//! coalescing the remaining unmatched runs into literal parts. Every
//! iteration blanks at least one byte, so termination is guaranteed.

use crate::error::DateFmtError;
use crate::part::{DatePart, DatePartCollection};
use crate::token::{FieldKind, TokenInstruction, ISO_EXPANSION, ISO_TOKEN, TOKEN_TABLE};
use crate::DateFmtResult;

/// A tokenized format string.
#[derive(Debug, Clone)]
pub(crate) struct TokenizedFormat {
    pub(crate) parts: DatePartCollection,
    /// Set when the format used the `iso` composite, which always renders
    /// in UTC.
    pub(crate) forces_utc: bool,
}

/// Tokenizes a format string into an ordered part collection spanning the
/// entire string with no gaps.
///
/// Errors are configuration errors: an empty format, a format with no
/// recognized tokens, or a whole-date/time preset mixed with other tokens.
pub(crate) fn tokenize(format: &str) -> DateFmtResult<TokenizedFormat> {
    if format.is_empty() {
        return Err(DateFmtError::range().with_message("format string is empty"));
    }

    // The `iso` composite is a plain textual expansion; everything after
    // this point sees only field tokens and literals.
    let forces_utc = format.contains(ISO_TOKEN);
    let expanded;
    let format = if forces_utc {
        expanded = format.replace(ISO_TOKEN, ISO_EXPANSION);
        expanded.as_str()
    } else {
        format
    };

    let mut buf = format.as_bytes().to_vec();
    let mut parts = DatePartCollection::new();

    loop {
        let mut matched: Option<(usize, &'static str, TokenInstruction)> = None;
        for entry in TOKEN_TABLE {
            let token = entry.token.as_bytes();
            let found = buf
                .windows(token.len())
                .position(|window| window == token);
            if let Some(at) = found {
                // Strictly-less keeps the tie at a position with the
                // earlier (longer) table entry.
                if matched.is_none_or(|(best, _, _)| at < best) {
                    matched = Some((at, entry.token, entry.instruction));
                }
            }
        }
        let Some((at, token, instruction)) = matched else {
            break;
        };
        match instruction {
            TokenInstruction::Field {
                kind,
                style,
                hour_cycle,
            } => {
                parts.add(DatePart::field(kind, style, at, token.len(), hour_cycle));
            }
            TokenInstruction::Preset { date, time } => {
                parts.add(DatePart::preset(date, time, at, token.len()));
            }
            // Already expanded above; the table entry only documents it.
            TokenInstruction::Iso => {}
        }
        for byte in &mut buf[at..at + token.len()] {
            *byte = 0;
        }
    }

    if parts.is_empty() {
        return Err(
            DateFmtError::range().with_message("format string contains no recognized tokens")
        );
    }

    // Coalesce contiguous unmatched runs into literal parts. Filler only
    // ever replaces ASCII token bytes, so runs stay on char boundaries.
    let mut run_start = None;
    for (i, &byte) in buf.iter().chain(core::iter::once(&0u8)).enumerate() {
        match (byte, run_start) {
            (0, Some(start)) => {
                let text = String::from_utf8_lossy(&buf[start..i]).into_owned();
                parts.add(DatePart::literal(text, start));
                run_start = None;
            }
            (0, None) => {}
            (_, None) => run_start = Some(i),
            (_, Some(_)) => {}
        }
    }

    validate_presets(&parts)?;
    parts.warn_on_gaps();

    Ok(TokenizedFormat { parts, forces_utc })
}

/// A whole-date/time preset consumes the entire format: combining it with
/// field tokens or a second preset is a configuration error, reported
/// rather than silently merged.
fn validate_presets(parts: &DatePartCollection) -> DateFmtResult<()> {
    let presets = parts.iter().filter(|p| p.is_preset()).count();
    if presets == 0 {
        return Ok(());
    }
    let others = parts
        .iter()
        .filter(|p| !p.is_preset() && !p.is_literal())
        .count();
    if presets > 1 || others > 0 {
        return Err(DateFmtError::range()
            .with_message("style tokens cannot be combined with other format tokens"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::FieldStyle;

    fn kinds_and_spans(format: &str) -> Vec<(FieldKind, usize, usize)> {
        tokenize(format)
            .unwrap()
            .parts
            .iter()
            .map(|p| (p.kind, p.index, p.length))
            .collect()
    }

    #[test]
    fn tokenizes_a_us_style_format() {
        assert_eq!(
            kinds_and_spans("EEE, MMM d, y"),
            vec![
                (FieldKind::Weekday, 0, 3),
                (FieldKind::Literal, 3, 2),
                (FieldKind::Month, 5, 3),
                (FieldKind::Literal, 8, 1),
                (FieldKind::Day, 9, 1),
                (FieldKind::Literal, 10, 2),
                (FieldKind::Year, 12, 1),
            ]
        );
    }

    #[test]
    fn longest_token_wins_over_its_prefix() {
        let tokenized = tokenize("yyyy").unwrap();
        let year = tokenized.parts.find(FieldKind::Year).unwrap();
        assert_eq!((year.index, year.length), (0, 4));
        assert_eq!(tokenized.parts.len(), 1);
        assert_eq!(year.style, FieldStyle::Numeric);
    }

    #[test]
    fn multibyte_literals_are_preserved() {
        let tokenized = tokenize("y年MM月dd日 (EEE)").unwrap();
        let literals: Vec<_> = tokenized
            .parts
            .iter()
            .filter_map(|p| p.literal.as_deref())
            .collect();
        assert_eq!(literals, vec!["年", "月", "日 (", ")"]);
        tokenized.parts.warn_on_gaps();
        // The whole string is covered without gaps.
        let total: usize = tokenized.parts.iter().map(|p| p.length).sum();
        assert_eq!(total, "y年MM月dd日 (EEE)".len());
    }

    #[test]
    fn iso_expands_to_the_fixed_sequence() {
        let tokenized = tokenize("iso").unwrap();
        assert!(tokenized.forces_utc);
        let kinds: Vec<_> = tokenized
            .parts
            .iter()
            .filter(|p| !p.is_literal())
            .map(|p| p.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                FieldKind::Year,
                FieldKind::Month,
                FieldKind::Day,
                FieldKind::Hour,
                FieldKind::Minute,
                FieldKind::Second,
                FieldKind::Millisecond,
            ]
        );
        let total: usize = tokenized.parts.iter().map(|p| p.length).sum();
        assert_eq!(total, ISO_EXPANSION.len());
    }

    #[test]
    fn presets_cannot_be_mixed() {
        assert!(tokenize("ud HH:mm").is_err());
        assert!(tokenize("ud ut").is_err());
        assert!(tokenize("ud").is_ok());
        assert!(tokenize("r").is_ok());
    }

    #[test]
    fn unrecognized_formats_error() {
        assert!(tokenize("").is_err());
        assert!(tokenize("....").is_err());
    }
}

//! `DatePart` records and their ordered collection.
//!
//! A `DatePart` is the atomic unit of a tokenized format: either "format
//! one field" or "literal text", with its position and span within the
//! original string. During parsing the spans are remapped onto the value
//! string being parsed.

use crate::options::{DateStyle, FieldStyle, HourCycle, TimeStyle};
use crate::token::FieldKind;

/// One field or literal run of a format.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DatePart {
    pub kind: FieldKind,
    pub style: FieldStyle,
    /// Byte position within the format string (or, during parsing, within
    /// the value string).
    pub index: usize,
    /// Byte span length.
    pub length: usize,
    /// Populated only when `kind` is [`FieldKind::Literal`].
    pub literal: Option<String>,
    /// The hour cycle an hour token selects (`H` vs `h`).
    pub hour_cycle: Option<HourCycle>,
    /// Populated only for [`FieldKind::StyleDate`] parts.
    pub date_style: Option<DateStyle>,
    /// Populated only for [`FieldKind::StyleTime`] parts.
    pub time_style: Option<TimeStyle>,
}

impl DatePart {
    /// Creates a field part.
    #[must_use]
    pub fn field(
        kind: FieldKind,
        style: FieldStyle,
        index: usize,
        length: usize,
        hour_cycle: Option<HourCycle>,
    ) -> Self {
        Self {
            kind,
            style,
            index,
            length,
            hour_cycle,
            ..Self::default()
        }
    }

    /// Creates a literal part from a run of unmatched text.
    #[must_use]
    pub fn literal(text: impl Into<String>, index: usize) -> Self {
        let text = text.into();
        Self {
            kind: FieldKind::Literal,
            index,
            length: text.len(),
            literal: Some(text),
            ..Self::default()
        }
    }

    /// Creates a whole-date/time preset part.
    #[must_use]
    pub fn preset(
        date_style: Option<DateStyle>,
        time_style: Option<TimeStyle>,
        index: usize,
        length: usize,
    ) -> Self {
        Self {
            kind: if date_style.is_some() {
                FieldKind::StyleDate
            } else {
                FieldKind::StyleTime
            },
            index,
            length,
            date_style,
            time_style,
            ..Self::default()
        }
    }

    /// Returns whether this part carries literal text.
    #[inline]
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.kind == FieldKind::Literal
    }

    /// Returns whether this part is a whole-date/time preset.
    #[inline]
    #[must_use]
    pub fn is_preset(&self) -> bool {
        matches!(self.kind, FieldKind::StyleDate | FieldKind::StyleTime)
    }

    /// Returns the byte position one past this part's span.
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.index + self.length
    }
}

/// An ordered collection of [`DatePart`] records, sorted by `index` and
/// unique by `(index, kind)`.
///
/// Structural mutation (`insert`, `remove`, `resize`) triggers a reindex
/// pass that shifts follower positions; a non-fatal warning is logged when
/// the contiguity invariant was already violated before the pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DatePartCollection {
    parts: Vec<DatePart>,
}

impl DatePartCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, DatePart> {
        self.parts.iter()
    }

    #[must_use]
    pub fn get(&self, i: usize) -> Option<&DatePart> {
        self.parts.get(i)
    }

    /// Returns the first part of the given kind.
    #[must_use]
    pub fn find(&self, kind: FieldKind) -> Option<&DatePart> {
        self.parts.iter().find(|p| p.kind == kind)
    }

    /// Returns whether any part has the given kind.
    #[must_use]
    pub fn contains_kind(&self, kind: FieldKind) -> bool {
        self.find(kind).is_some()
    }

    /// Adds a part at its recorded position, keeping the collection sorted.
    /// Follower positions are untouched; this is the primitive the
    /// tokenizer builds with. A part duplicating an existing `(index,
    /// kind)` pair is dropped with a warning.
    pub fn add(&mut self, part: DatePart) {
        if self
            .parts
            .iter()
            .any(|p| p.index == part.index && p.kind == part.kind)
        {
            log::warn!(
                "dropping duplicate {:?} part at index {}",
                part.kind,
                part.index
            );
            return;
        }
        let at = self
            .parts
            .partition_point(|p| (p.index, p.kind as u8) <= (part.index, part.kind as u8));
        self.parts.insert(at, part);
    }

    /// Inserts a part and shifts every follower right by its length.
    pub fn insert(&mut self, part: DatePart) {
        self.warn_on_gaps();
        for p in &mut self.parts {
            if p.index >= part.index {
                p.index += part.length;
            }
        }
        self.add(part);
    }

    /// Removes the part at `(index, kind)` and shifts every follower left
    /// by its length.
    pub fn remove(&mut self, index: usize, kind: FieldKind) -> Option<DatePart> {
        let at = self
            .parts
            .iter()
            .position(|p| p.index == index && p.kind == kind)?;
        self.warn_on_gaps();
        let removed = self.parts.remove(at);
        for p in &mut self.parts[at..] {
            p.index -= removed.length;
        }
        Some(removed)
    }

    /// Changes the length of the part at position `i`, shifting every
    /// follower by the difference.
    pub fn resize(&mut self, i: usize, new_length: usize) {
        let Some(part) = self.parts.get_mut(i) else {
            return;
        };
        let old = part.length;
        part.length = new_length;
        if new_length >= old {
            let delta = new_length - old;
            for p in &mut self.parts[i + 1..] {
                p.index += delta;
            }
        } else {
            let delta = old - new_length;
            for p in &mut self.parts[i + 1..] {
                p.index -= delta;
            }
        }
    }

    /// Logs a non-fatal warning if any adjacent pair is non-contiguous.
    pub(crate) fn warn_on_gaps(&self) {
        for pair in self.parts.windows(2) {
            if pair[1].index != pair[0].end() {
                log::warn!(
                    "date parts are not contiguous: {:?} ends at {} but {:?} starts at {}",
                    pair[0].kind,
                    pair[0].end(),
                    pair[1].kind,
                    pair[1].index
                );
            }
        }
    }
}

impl<'a> IntoIterator for &'a DatePartCollection {
    type Item = &'a DatePart;
    type IntoIter = core::slice::Iter<'a, DatePart>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<DatePart> for DatePartCollection {
    fn from_iter<T: IntoIterator<Item = DatePart>>(iter: T) -> Self {
        let mut collection = Self::new();
        for part in iter {
            collection.add(part);
        }
        collection
    }
}

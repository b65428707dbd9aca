/*!
Small types shared across the crate and exposed through the public API.
*/

use std::ops::Range;

/// A byte span in a subject string. Similar to [`std::ops::Range`], but
/// implements Copy.
#[derive(Copy, Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub from: usize,
    pub to: usize,
}

impl Span {
    pub fn empty(&self) -> bool {
        self.from == self.to
    }

    pub fn valid(&self) -> bool {
        self.from <= self.to
    }
}

impl From<Range<usize>> for Span {
    fn from(value: Range<usize>) -> Self {
        Self {
            from: value.start,
            to: value.end,
        }
    }
}

impl From<Span> for Range<usize> {
    fn from(val: Span) -> Self {
        val.from..val.to
    }
}

/// The capture positions of a successful match.
///
/// Group `k` is bracketed by save slots `2k` and `2k+1`. Capture vectors
/// start out zero-filled, so a group the match never entered reads as the
/// empty span `(0, 0)`; callers that need to tell "unmatched" from "matched
/// empty at 0" can compare against the overall match.
#[derive(Debug, Clone)]
pub struct Captures<'s> {
    subject: &'s str,
    slots: Box<[usize]>,
}

impl<'s> Captures<'s> {
    pub fn new(subject: &'s str, slots: Box<[usize]>) -> Self {
        Self { subject, slots }
    }

    /// The text of capture group `k`, or None when the group index is out
    /// of range or its recorded span does not lie in the subject.
    pub fn get(&self, group_index: usize) -> Option<&'s str> {
        let span = self.span(group_index)?;
        if !span.valid() {
            return None;
        }
        self.subject.get(span.from..span.to)
    }

    /// The recorded span of capture group `k`.
    pub fn span(&self, group_index: usize) -> Option<Span> {
        let from = *self.slots.get(2 * group_index)?;
        let to = *self.slots.get(2 * group_index + 1)?;
        Some(Span { from, to })
    }

    /// Number of capture groups.
    pub fn group_len(&self) -> usize {
        self.slots.len() / 2
    }

    /// The raw save slots, two per group.
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_slices_the_subject() {
        let caps = Captures::new("aaabbb", Box::new([0, 3, 3, 6]));
        assert_eq!(caps.group_len(), 2);
        assert_eq!(caps.get(0), Some("aaa"));
        assert_eq!(caps.get(1), Some("bbb"));
        assert_eq!(caps.get(2), None);
        assert_eq!(caps.span(0), Some(Span { from: 0, to: 3 }));
    }

    #[test]
    fn invalid_span_is_none() {
        let caps = Captures::new("ab", Box::new([2, 1]));
        assert_eq!(caps.get(0), None);
    }
}

//! Word boundary queries over plain text.

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

/// The word-bound segment enclosing `offset`.
///
/// Segments follow UAX #29 word bounds, so whitespace and punctuation runs
/// are segments of their own. An offset at the end of the text yields the
/// last segment; empty text yields `0..0`.
pub fn word_segment_at(text: &str, offset: usize) -> Range<usize> {
    let mut last = 0..0;
    for (start, word) in text.split_word_bound_indices() {
        let segment = start..start + word.len();
        if segment.contains(&offset) {
            return segment;
        }
        last = segment;
    }
    last
}

/// The end of the next word after `offset`, skipping whitespace segments.
///
/// Stepping from inside a word lands on that word's end; stepping from a
/// word's end skips any whitespace and lands on the end of the following
/// word or punctuation run. When only whitespace remains the step lands on
/// the text end. `None` once `offset` is already at the end.
pub fn next_word_end(text: &str, offset: usize) -> Option<usize> {
    if offset >= text.len() {
        return None;
    }
    for (start, word) in text.split_word_bound_indices() {
        let end = start + word.len();
        if end > offset && !word.trim().is_empty() {
            return Some(end);
        }
    }
    Some(text.len())
}

/// The start of the previous word before `offset`, skipping whitespace.
/// Mirror of [`next_word_end`]; lands on offset zero when only whitespace
/// precedes, and `None` once `offset` is already zero.
pub fn prev_word_start(text: &str, offset: usize) -> Option<usize> {
    if offset == 0 {
        return None;
    }
    let mut found = None;
    for (start, word) in text.split_word_bound_indices() {
        if start >= offset {
            break;
        }
        if !word.trim().is_empty() {
            found = Some(start);
        }
    }
    Some(found.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_at_encloses_words_and_gaps() {
        let text = "How are you?";
        assert_eq!(word_segment_at(text, 5), 4..7);
        assert_eq!(word_segment_at(text, 4), 4..7);
        assert_eq!(word_segment_at(text, 7), 7..8);
        assert_eq!(word_segment_at(text, 12), 11..12);
    }

    #[test]
    fn forward_steps_skip_whitespace() {
        let text = "How are you?";
        assert_eq!(next_word_end(text, 5), Some(7));
        assert_eq!(next_word_end(text, 7), Some(11));
        assert_eq!(next_word_end(text, 11), Some(12));
        assert_eq!(next_word_end(text, 12), None);
    }

    #[test]
    fn forward_step_through_trailing_whitespace_reaches_end() {
        assert_eq!(next_word_end("How are   ", 7), Some(10));
    }

    #[test]
    fn backward_steps_skip_whitespace() {
        let text = "How are you?";
        assert_eq!(prev_word_start(text, 12), Some(11));
        assert_eq!(prev_word_start(text, 11), Some(8));
        assert_eq!(prev_word_start(text, 8), Some(4));
        assert_eq!(prev_word_start(text, 4), Some(0));
        assert_eq!(prev_word_start(text, 0), None);
    }
}

//! Base direction detection.

use marquee_traits::TextDirection;
use unicode_bidi::{BidiClass, bidi_class};

/// Paragraph base direction from the first strong character (UAX #9 P2/P3).
/// Text with no strong character is left-to-right.
pub fn first_strong_direction(text: &str) -> TextDirection {
    for ch in text.chars() {
        match bidi_class(ch) {
            BidiClass::L => return TextDirection::Ltr,
            BidiClass::R | BidiClass::AL => return TextDirection::Rtl,
            _ => {}
        }
    }
    TextDirection::Ltr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin_is_ltr() {
        assert_eq!(first_strong_direction("hello"), TextDirection::Ltr);
    }

    #[test]
    fn hebrew_is_rtl() {
        assert_eq!(first_strong_direction("שלום"), TextDirection::Rtl);
    }

    #[test]
    fn leading_neutrals_are_skipped() {
        assert_eq!(first_strong_direction("123 שלום"), TextDirection::Rtl);
        assert_eq!(first_strong_direction("?!"), TextDirection::Ltr);
    }
}

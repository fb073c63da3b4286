//! Plain text measurement for Marquee
//!
//! A monospace-advance implementation of the
//! [`TextLayout`](marquee_traits::TextLayout) collaborator: text is laid out
//! on a character grid with `\n`-separated visual lines, word boundaries come
//! from Unicode segmentation and the base direction from the first strong
//! character. Suitable for tests and for hosts whose content really is plain
//! monospaced text; anything doing real shaping should implement the trait
//! over its own engine instead.

mod boundaries;
mod direction;
mod measure;

pub use boundaries::{next_word_end, prev_word_start, word_segment_at};
pub use direction::first_strong_direction;
pub use measure::PlainTextLayout;

//! The external text layout collaborator.

use std::ops::Range;

use kurbo::{Point, Rect};

use crate::events::BoundaryKind;
use crate::selection::TextDirection;

/// Layout queries a text unit delegates to its host's shaping/layout engine.
///
/// Every query that depends on a completed layout pass returns `Option`:
/// `None` means "no information yet" and must never be conflated with an
/// empty selection or a zero-size geometry. The region defers geometry it
/// could not compute and retries when the host signals the next layout tick.
///
/// Offsets are byte offsets into the layout's text and are always returned
/// on character boundaries. Points and rects are global coordinates.
pub trait TextLayout {
    /// Whether a layout pass has completed for the current text.
    fn is_ready(&self) -> bool;

    /// The unit's on-screen bounds, also used for hit testing and screen
    /// ordering. Available even while `is_ready` is false.
    fn bounds(&self) -> Rect;

    /// The laid-out text. The layout borrows it; the selection core never
    /// stores text of its own.
    fn text(&self) -> &str;

    fn text_len(&self) -> usize {
        self.text().len()
    }

    fn base_direction(&self) -> TextDirection {
        TextDirection::Ltr
    }

    /// The caret offset nearest to a global point, clamped into the text.
    fn offset_for_point(&self, point: Point) -> Option<usize>;

    /// The boundary span enclosing `offset`: the word segment or visual line
    /// it falls in. An offset at the very end of the text yields the last
    /// span.
    fn boundary_at(&self, offset: usize, kind: BoundaryKind) -> Option<Range<usize>>;

    /// The next boundary strictly after `offset`, or `None` when `offset`
    /// is already at the end of the text.
    ///
    /// For `Word`, this is the end of the next non-whitespace segment; with
    /// no further segment in this text it is the text end itself, so a word
    /// step always reaches the seam before overflowing to a neighbor.
    fn next_boundary(&self, offset: usize, kind: BoundaryKind) -> Option<usize>;

    /// The previous boundary strictly before `offset`, or `None` at offset
    /// zero. Mirror of [`next_boundary`](TextLayout::next_boundary).
    fn prev_boundary(&self, offset: usize, kind: BoundaryKind) -> Option<usize>;

    /// Bounds of the visual line containing `offset`.
    fn line_bounds_at(&self, offset: usize) -> Option<Rect>;

    /// The caret's global position at `offset` (bottom of the caret).
    fn visual_position_for(&self, offset: usize) -> Option<Point>;

    /// Index of the visual line containing `offset`.
    fn line_index_at(&self, offset: usize) -> Option<usize>;

    /// Number of visual lines in the layout.
    fn line_count(&self) -> usize;
}

//! Granularity and boundary stepping over the layout seam.
//!
//! Pure helpers used by the text leaf when handling extension events. A
//! step either lands inside the unit (`Some(offset)`) or overflows
//! (`None`), in which case the unit parks its moving edge on the seam and
//! the event continues to the neighbor in screen order. Overflow happens
//! only once the edge is already at the extremity: a boundary that
//! coincides with the seam belongs to the earlier unit, so nothing is ever
//! counted twice across it.

use kurbo::Point;
use marquee_traits::{
    BoundaryKind, Direction, Granularity, SelectionEdge, SelectionRange, TextLayout,
    VerticalMotion,
};

/// Offset at which an extension enters a unit from a neighbor.
pub(crate) fn entry_offset(forward: bool, len: usize) -> usize {
    if forward { 0 } else { len }
}

/// Offset of the seam an extension leaves a unit across.
pub(crate) fn seam_offset(forward: bool, len: usize) -> usize {
    if forward { len } else { 0 }
}

pub(crate) fn boundary_kind(granularity: Granularity) -> Option<BoundaryKind> {
    match granularity {
        Granularity::Character => Some(BoundaryKind::Character),
        Granularity::Word => Some(BoundaryKind::Word),
        Granularity::Line => Some(BoundaryKind::Line),
        Granularity::Document => None,
    }
}

/// One granularity step of the moving edge within a unit.
pub(crate) fn step(
    layout: &dyn TextLayout,
    extent: usize,
    granularity: Granularity,
    direction: Direction,
) -> Option<usize> {
    let kind = boundary_kind(granularity)?;
    match direction {
        Direction::Forward => layout.next_boundary(extent, kind),
        Direction::Backward => layout.prev_boundary(extent, kind),
    }
}

/// One line of vertical travel within a unit, keeping the caret as close as
/// the layout allows to the carried horizontal position.
///
/// `LineUp`/`LineDown` overflow at the unit's first/last line; the landing
/// forms `FirstLine`/`LastLine` always resolve.
pub(crate) fn vertical_step(
    layout: &dyn TextLayout,
    extent: usize,
    motion: VerticalMotion,
    target_x: f64,
) -> Option<usize> {
    let row = layout.line_index_at(extent)?;
    let line = layout.line_bounds_at(extent)?;
    let probe_y = match motion {
        VerticalMotion::LineDown => {
            if row + 1 >= layout.line_count() {
                return None;
            }
            line.y1 + 0.5
        }
        VerticalMotion::LineUp => {
            if row == 0 {
                return None;
            }
            line.y0 - 0.5
        }
        VerticalMotion::FirstLine => layout.bounds().y0 + 0.5,
        VerticalMotion::LastLine => layout.bounds().y1 - 0.5,
    };
    layout.offset_for_point(Point::new(target_x, probe_y))
}

/// Snap an edge hit to the enclosing boundary of the given kind, expanding
/// outward relative to the stationary edge (long-press word drags).
pub(crate) fn snap_edge(
    layout: &dyn TextLayout,
    offset: usize,
    other: usize,
    edge: SelectionEdge,
    kind: BoundaryKind,
) -> usize {
    let Some(span) = layout.boundary_at(offset, kind) else {
        return offset;
    };
    let outward_end = match edge {
        SelectionEdge::End => offset >= other,
        SelectionEdge::Start => offset > other,
    };
    if outward_end { span.end } else { span.start }
}

/// Where an extension resumes inside a unit: its current range, or a
/// collapsed entry at the seam it is being entered across.
pub(crate) fn resume_range(
    range: Option<SelectionRange>,
    forward: bool,
    len: usize,
) -> SelectionRange {
    range.unwrap_or_else(|| SelectionRange::collapsed(entry_offset(forward, len)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_text::PlainTextLayout;

    #[test]
    fn word_steps_stop_at_the_seam_before_overflowing() {
        let layout = PlainTextLayout::new("How are you?", Point::new(0.0, 0.0));
        assert_eq!(step(&layout, 7, Granularity::Word, Direction::Forward), Some(11));
        assert_eq!(step(&layout, 11, Granularity::Word, Direction::Forward), Some(12));
        assert_eq!(step(&layout, 12, Granularity::Word, Direction::Forward), None);
    }

    #[test]
    fn vertical_step_tracks_the_carried_column() {
        let layout = PlainTextLayout::new("short\na longer line", Point::new(0.0, 0.0));
        // From column 4 of line 0, a step down lands at column 4 of line 1.
        let down = vertical_step(&layout, 4, VerticalMotion::LineDown, 32.0);
        assert_eq!(down, Some(10));
        // Line 1 is the last line: further travel overflows.
        assert_eq!(vertical_step(&layout, 10, VerticalMotion::LineDown, 32.0), None);
        // The landing form always resolves.
        assert_eq!(
            vertical_step(&layout, 0, VerticalMotion::LastLine, 0.0),
            Some(6)
        );
    }
}

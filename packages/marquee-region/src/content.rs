//! Screen-order content aggregation.
//!
//! Merged plain text visits units in visual order: top-to-bottom by row,
//! left-to-right within a row, regardless of registration order or of any
//! unit's own text direction. Intra-unit order stays logical (the unit's
//! own text slice); only inter-unit sequencing is positional. Aggregation
//! is a pure read: no unit range is ever touched here.

use std::cmp::Ordering;

use kurbo::Rect;
use marquee_traits::SelectedContent;

use crate::region::SelectionRegion;

/// Whether two unit bounds sit on the same visual row: their vertical
/// overlap covers at least half of the shorter of the two.
pub(crate) fn same_row(a: Rect, b: Rect) -> bool {
    let overlap = a.y1.min(b.y1) - a.y0.max(b.y0);
    overlap > 0.5 * a.height().min(b.height())
}

/// Screen-order comparison of two unit bounds.
pub(crate) fn screen_cmp(a: Rect, b: Rect) -> Ordering {
    if same_row(a, b) {
        a.x0.partial_cmp(&b.x0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.y0.partial_cmp(&b.y0).unwrap_or(Ordering::Equal))
    } else {
        a.y0.partial_cmp(&b.y0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.x0.partial_cmp(&b.x0).unwrap_or(Ordering::Equal))
    }
}

/// Merge the selected text of the given units, already in screen order.
///
/// Units with no selected content are skipped without a separator; units on
/// different rows are joined with a newline, same-row units concatenated
/// directly.
pub(crate) fn merge_content(region: &SelectionRegion, units: &[usize]) -> Option<SelectedContent> {
    let mut text = String::new();
    let mut prev_bounds: Option<Rect> = None;
    for &id in units {
        let Some(leaf) = region.leaf(id) else { continue };
        let Some(content) = leaf.selected_content() else {
            continue;
        };
        let bounds = leaf.bounds();
        if let Some(prev) = prev_bounds
            && !same_row(prev, bounds)
        {
            text.push('\n');
        }
        text.push_str(&content.plain_text);
        prev_bounds = Some(bounds);
    }
    if text.is_empty() {
        None
    } else {
        Some(SelectedContent::new(text))
    }
}

//! The per-unit selection contract.

use kurbo::{Point, Rect};

use crate::error::SelectionError;
use crate::events::{DispatchResult, SelectionEvent};
use crate::geometry::SelectionGeometry;
use crate::selection::{SelectedContent, SelectionRange, TextDirection};

/// A leaf participant in the selection tree.
///
/// Implemented by the built-in text and embedded leaves and by any custom
/// host widget that wants to take part in region-wide selection. On
/// receiving an event a unit updates at most its own local range; all
/// cross-unit coordination happens in the registrar tree above it.
pub trait Selectable {
    /// On-screen bounds in global coordinates, used for hit testing and
    /// screen ordering.
    fn bounds(&self) -> Rect;

    /// Length of the unit's text in bytes. Units that render no text but
    /// still occupy space report a single placeholder position.
    fn text_len(&self) -> usize;

    /// The current local range, if any edge has been placed in this unit.
    fn range(&self) -> Option<SelectionRange>;

    /// Whether the unit's layout collaborator can answer geometry queries.
    fn layout_ready(&self) -> bool;

    /// Apply one event. Every range mutation is validated before any state
    /// changes: an out-of-range offset is rejected with
    /// [`SelectionError::OffsetOutOfRange`] and the unit left untouched.
    fn handle_event(&mut self, event: &SelectionEvent) -> Result<DispatchResult, SelectionError>;

    /// Restore a previously-captured range verbatim. Backs interaction
    /// cancellation, which must leave the unit exactly as it was before the
    /// interaction began. Validated like any other mutation.
    fn restore_range(&mut self, range: Option<SelectionRange>) -> Result<(), SelectionError>;

    /// The unit's local selection geometry. Returns `None` while the layout
    /// collaborator has no information yet.
    fn geometry(&self) -> Option<SelectionGeometry>;

    /// The unit's locally selected text, or `None` when nothing is selected
    /// or the unit renders no text.
    fn selected_content(&self) -> Option<SelectedContent>;

    fn text_direction(&self) -> TextDirection {
        TextDirection::Ltr
    }

    /// Whether the selected span covers the given global point. Backs the
    /// host's tap-within-selection policy.
    fn has_selection_at(&self, point: Point) -> bool {
        let _ = point;
        false
    }

    /// Global caret position of the moving edge, if one is placed here.
    /// Seeds the horizontal intent of vertical extension.
    fn extent_position(&self) -> Option<Point> {
        None
    }

    /// Global line-centered caret position at a local offset, or `None`
    /// while layout is pending. The region rebroadcasts the stationary
    /// edge through this when the other edge drags across units, so every
    /// unit can clamp both edges locally.
    fn position_at(&self, offset: usize) -> Option<Point> {
        let _ = offset;
        None
    }
}

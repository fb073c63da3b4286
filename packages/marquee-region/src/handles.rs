//! Merged geometry and handle drags.
//!
//! The merged shape takes its start point from the first unit in screen
//! order holding a non-empty range and its end point from the last, each
//! expressed through that unit's own direction. A grabbed handle always
//! drags the global moving edge: grabbing the handle that currently plays
//! the anchor role first swaps the roles in every unit, so dragging one
//! edge past the other stays continuous and never reports an inverted
//! shape.

use kurbo::Point;
use marquee_traits::{
    DispatchResult, SelectionEdge, SelectionError, SelectionEvent, SelectionGeometry,
    SelectionStatus,
};

use crate::region::SelectionRegion;
use crate::session::InteractionKind;

/// The merged selection shape over `units` (already in screen order), or
/// `None` while any participating unit's layout is still pending.
pub(crate) fn compute_geometry(
    region: &SelectionRegion,
    units: &[usize],
) -> Option<SelectionGeometry> {
    let mut with_range = Vec::new();
    let mut uncollapsed = Vec::new();
    for &id in units {
        let Some(leaf) = region.leaf(id) else { continue };
        let Some(range) = leaf.range() else { continue };
        if !leaf.layout_ready() {
            return None;
        }
        with_range.push(id);
        if !range.is_collapsed() {
            uncollapsed.push(id);
        }
    }
    if with_range.is_empty() {
        return Some(SelectionGeometry::empty());
    }
    if uncollapsed.is_empty() {
        // A bare caret: report the moving edge's unit.
        let id = region
            .session()
            .extent_owner
            .filter(|id| with_range.contains(id))
            .unwrap_or(with_range[0]);
        return region.leaf(id).and_then(|leaf| leaf.geometry());
    }
    let first = region.leaf(uncollapsed[0])?.geometry()?;
    let last = region.leaf(*uncollapsed.last()?)?.geometry()?;
    Some(SelectionGeometry {
        status: SelectionStatus::Uncollapsed,
        start: first.start,
        end: last.end,
        has_content: true,
    })
}

/// One drag update shared by pointer selection and handle drags: move the
/// global extent, republish the gesture position while a handle is live,
/// and pulse once per word boundary the moving edge crosses.
pub(crate) fn drag_move(
    region: &mut SelectionRegion,
    point: Point,
) -> Result<DispatchResult, SelectionError> {
    let result = region.dispatch(SelectionEvent::SetEdge {
        edge: SelectionEdge::End,
        point,
        granularity: None,
    })?;
    if region.session().interaction.is_handle_drag() {
        region.notify_drag_position(point);
    }
    let word = region.extent_word();
    let crossed = {
        let session = region.session();
        session.last_word.is_some() && word.is_some() && session.last_word != word
    };
    region.session_mut().last_word = word;
    if crossed {
        region.platform().haptic_pulse();
    }
    Ok(result)
}

impl SelectionRegion {
    /// Grab a selection handle. Subsequent [`drag_handle_to`] calls move
    /// that handle; the stationary one becomes the anchor.
    ///
    /// [`drag_handle_to`]: SelectionRegion::drag_handle_to
    pub fn begin_handle_drag(&mut self, edge: SelectionEdge) {
        let snapshot = self.capture_session();
        let kind = match edge {
            SelectionEdge::Start => InteractionKind::DragStartHandle,
            SelectionEdge::End => InteractionKind::DragEndHandle,
        };
        self.session_mut().begin(kind, snapshot);
        let grabbed_is_anchor = match edge {
            SelectionEdge::Start => self.selection_runs_forward(),
            SelectionEdge::End => !self.selection_runs_forward(),
        };
        if grabbed_is_anchor {
            self.swap_range_roles();
        }
    }

    /// Move the grabbed handle to a global position.
    pub fn drag_handle_to(&mut self, point: Point) -> Result<DispatchResult, SelectionError> {
        drag_move(self, point)
    }

    /// Release the grabbed handle, keeping the selection.
    pub fn end_handle_drag(&mut self) {
        let was_drag = self.session().interaction.is_handle_drag();
        self.session_mut().commit();
        if was_drag {
            self.notify_drag_ended();
        }
    }

    /// Whether the global selection runs forward: the anchor edge precedes
    /// the moving edge in screen order.
    fn selection_runs_forward(&self) -> bool {
        let session = self.session();
        let (Some(base), Some(extent)) = (session.base_owner, session.extent_owner) else {
            return true;
        };
        if base == extent {
            return self
                .leaf(base)
                .and_then(|leaf| leaf.range())
                .is_none_or(|range| range.base <= range.extent);
        }
        let order = self.screen_ordered_units();
        let position = |id| order.iter().position(|&unit| unit == id);
        match (position(base), position(extent)) {
            (Some(b), Some(e)) => b <= e,
            _ => true,
        }
    }

    /// Make the moving edge the anchor and vice versa, in every unit and in
    /// the session bookkeeping. The merged shape is positional and does not
    /// change.
    fn swap_range_roles(&mut self) {
        for id in self.paint_ordered_units() {
            if let Some(leaf) = self.leaf_mut(id)
                && let Some(range) = leaf.range()
            {
                let _ = leaf.restore_range(Some(marquee_traits::SelectionRange::new(
                    range.extent,
                    range.base,
                )));
            }
        }
        let session = self.session_mut();
        std::mem::swap(&mut session.base_owner, &mut session.extent_owner);
    }
}

use kurbo::Point;
use marquee_traits::{
    BoundaryKind, SelectionEdge, SelectionError, SelectionEvent,
};

use crate::handles;
use crate::region::SelectionRegion;
use crate::session::InteractionKind;

/// A fresh primary interaction: reset to idle, then anchor a collapsed
/// selection at the point. Handle grabs go through
/// [`SelectionRegion::begin_handle_drag`] instead and keep the selection.
pub(crate) fn pointer_down(
    region: &mut SelectionRegion,
    point: Point,
) -> Result<(), SelectionError> {
    let snapshot = region.capture_session();
    region
        .session_mut()
        .begin(InteractionKind::PointerSelect, snapshot);
    region.dispatch(SelectionEvent::Clear)?;
    region.dispatch(SelectionEvent::SetEdge {
        edge: SelectionEdge::Start,
        point,
        granularity: None,
    })?;
    region.dispatch(SelectionEvent::SetEdge {
        edge: SelectionEdge::End,
        point,
        granularity: None,
    })?;
    Ok(())
}

pub(crate) fn pointer_move(
    region: &mut SelectionRegion,
    point: Point,
) -> Result<(), SelectionError> {
    if region.session().interaction == InteractionKind::None {
        return Ok(());
    }
    handles::drag_move(region, point).map(|_| ())
}

pub(crate) fn pointer_up(region: &mut SelectionRegion) {
    region.session_mut().commit();
}

/// A word select (double tap or long press): a fresh interaction selecting
/// the word boundary under the point.
pub(crate) fn select_word(
    region: &mut SelectionRegion,
    point: Point,
) -> Result<(), SelectionError> {
    let snapshot = region.capture_session();
    region
        .session_mut()
        .begin(InteractionKind::PointerSelect, snapshot);
    region.dispatch(SelectionEvent::Clear)?;
    region.dispatch(SelectionEvent::SelectBoundary {
        point,
        kind: BoundaryKind::Word,
    })?;
    region.session_mut().commit();
    Ok(())
}

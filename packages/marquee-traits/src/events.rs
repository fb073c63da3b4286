//! The typed selection event protocol.
//!
//! An interaction reaches the region tree as one [`SelectionEvent`]. Events
//! are dispatched to selectable units, each of which updates at most its own
//! local range and answers with a [`DispatchResult`]: either the event is
//! fully consumed (`End`) or it continues to the next unit in screen order
//! (`Next`), carrying whatever residual state the continuation needs.

use kurbo::Point;

/// Which end of a selection an edge update moves.
///
/// `Start` is the interaction's anchor side, `End` the moving side. A unit
/// stores these as the `base` and `extent` of its local range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionEdge {
    Start,
    End,
}

/// Logical stepping direction for granular extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn is_forward(self) -> bool {
        matches!(self, Direction::Forward)
    }
}

/// Stepping unit for keyboard-driven extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Granularity {
    Character,
    Word,
    Line,
    Document,
}

/// Boundary kinds a text layout can be queried for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryKind {
    Character,
    Word,
    Line,
}

/// Vertical travel for a directional (line-wise) extension.
///
/// `LineUp`/`LineDown` step one visual line within the unit that owns the
/// moving edge. `FirstLine`/`LastLine` are the continuation forms a
/// neighboring unit receives after an overflow: place the edge on that
/// unit's first (respectively last) visual line, at the carried horizontal
/// position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalMotion {
    LineUp,
    LineDown,
    FirstLine,
    LastLine,
}

impl VerticalMotion {
    /// Whether the travel heads down the document.
    pub fn is_downward(self) -> bool {
        matches!(self, VerticalMotion::LineDown | VerticalMotion::FirstLine)
    }

    /// The continuation form carried to the neighboring unit.
    pub fn continuation(self) -> VerticalMotion {
        if self.is_downward() {
            VerticalMotion::FirstLine
        } else {
            VerticalMotion::LastLine
        }
    }
}

/// A selection command, dispatched through the registrar tree.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectionEvent {
    /// Move one edge of the selection to a global position.
    ///
    /// Broadcast to every unit in scope: each unit clamps the point into its
    /// own space (before its bounds: offset 0; past them: its length; inside:
    /// a layout hit test), so units lying between the two edges adopt their
    /// full range from purely local computation. With `granularity` set, the
    /// unit under the point snaps the moved edge outward to that boundary
    /// (long-press word drags).
    SetEdge {
        edge: SelectionEdge,
        point: Point,
        granularity: Option<Granularity>,
    },
    /// Select the word or line boundary enclosing a global position.
    SelectBoundary { point: Point, kind: BoundaryKind },
    /// Extend the moving edge by one granularity step.
    Extend {
        granularity: Granularity,
        direction: Direction,
    },
    /// Extend the moving edge by one visual line, preserving the caret's
    /// horizontal position across unit boundaries via `target_x`.
    ExtendVertically {
        motion: VerticalMotion,
        target_x: Option<f64>,
    },
    /// Select every unit in scope in full.
    SelectAll,
    /// Reset every range. Idempotent: clearing an empty selection emits no
    /// change notification.
    Clear,
}

/// A unit's answer to a dispatched event.
#[derive(Clone, Debug, PartialEq)]
pub enum DispatchResult {
    /// The event was fully consumed by this unit or subtree.
    End,
    /// The event continues to the next unit in scope, in screen order. The
    /// payload is the residual event to deliver there (remaining travel,
    /// carried horizontal intent).
    Next(SelectionEvent),
}

impl DispatchResult {
    pub fn is_end(&self) -> bool {
        matches!(self, DispatchResult::End)
    }
}

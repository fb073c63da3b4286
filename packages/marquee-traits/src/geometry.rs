//! Geometry values consumed by handle overlays and toolbars.
//!
//! These are pure values: the region recomputes them after every dispatch
//! pass and hands them to observers. Consumers place drag handles from a
//! [`SelectionPoint`] without knowing anything about layout internals.

use kurbo::Point;

/// Coarse shape of the current selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionStatus {
    /// No edge has been placed anywhere.
    #[default]
    None,
    /// Edges exist but enclose no content.
    Collapsed,
    /// At least one unit holds a non-empty range.
    Uncollapsed,
}

/// Which side of its position a handle is drawn on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleSide {
    Left,
    Right,
}

/// One endpoint of the merged selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionPoint {
    /// The caret's bottom edge at this endpoint, in global coordinates.
    pub position: Point,
    /// Height of the line the endpoint sits on, for handle sizing.
    pub line_height: f64,
    /// Logical side the handle attaches to, derived from the owning unit's
    /// text direction.
    pub handle: HandleSide,
}

/// The merged selection shape for a region.
///
/// Exactly one of these exists per region at any time; it is a pure function
/// of the current per-unit ranges.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SelectionGeometry {
    pub status: SelectionStatus,
    /// Endpoint of the first unit in screen order with a non-empty range.
    pub start: Option<SelectionPoint>,
    /// Endpoint of the last such unit.
    pub end: Option<SelectionPoint>,
    /// Whether any unit encloses content.
    pub has_content: bool,
}

impl SelectionGeometry {
    /// The geometry of a region with no selection at all.
    pub fn empty() -> Self {
        Self::default()
    }
}

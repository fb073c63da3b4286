//! Shared traits and types for Marquee
//!
//! This crate defines the selection coordination protocol that the
//! [marquee-region](https://docs.rs/marquee-region) tree crate dispatches over:
//! the typed selection events, the per-unit [`Selectable`] contract, the
//! geometry values consumed by handle overlays, and the collaborator seams
//! (text layout, platform services, observers) that hosts plug concrete
//! implementations into.
//!
//! Nothing in this crate performs layout, gesture recognition or rendering;
//! those stay on the host side of the traits defined here.

mod error;
mod events;
mod geometry;
mod layout;
mod selection;
mod shell;
mod unit;

pub use error::SelectionError;
pub use events::{
    BoundaryKind, Direction, DispatchResult, Granularity, SelectionEdge, SelectionEvent,
    VerticalMotion,
};
pub use geometry::{HandleSide, SelectionGeometry, SelectionPoint, SelectionStatus};
pub use layout::TextLayout;
pub use selection::{SelectedContent, SelectionRange, TextDirection};
pub use shell::{DummyPlatformProvider, PlatformProvider, SelectionObserver};
pub use unit::Selectable;

// Geometry vocabulary is kurbo throughout; re-exported so dependents don't
// need to pin the same version themselves.
pub use kurbo::{Point, Rect};

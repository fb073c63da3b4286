//! The selection region tree for Marquee
//!
//! This crate turns independently-rendered content units into one
//! continuously-selectable region: a single drag, word select or keyboard
//! command spans all of them and produces one merged geometry (for handle
//! overlays) and one screen-ordered plain text (for clipboard and
//! listeners).
//!
//! The primary entry point is [`SelectionRegion`]: a slab-backed tree of
//! registrars and leaf units, driven synchronously by typed
//! [`SelectionEvent`]s. Layout, gesture classification, rendering and
//! platform services stay external; hosts connect them through the traits
//! in [marquee-traits](https://docs.rs/marquee-traits).

mod config;
mod content;
mod events;
mod handles;
mod node;
mod region;
mod resolver;
mod session;

pub use config::RegionConfig;
pub use events::{KeyAction, action_for_key};
pub use node::{EmbeddedUnit, NodeFlags, TextUnit, UnitData, UnitNode};
pub use region::SelectionRegion;
pub use session::{InteractionKind, SelectionSession};

// The protocol surface, re-exported for convenience.
pub use marquee_traits::{
    BoundaryKind, Direction, DispatchResult, DummyPlatformProvider, Granularity, HandleSide,
    PlatformProvider, Point, Rect, SelectedContent, Selectable, SelectionEdge, SelectionError,
    SelectionEvent, SelectionGeometry, SelectionObserver, SelectionPoint, SelectionRange,
    SelectionStatus, TextDirection, TextLayout, VerticalMotion,
};

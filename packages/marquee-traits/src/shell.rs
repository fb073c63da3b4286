//! Platform services and observer seams.

use kurbo::Point;

use crate::geometry::SelectionGeometry;
use crate::selection::SelectedContent;

/// Platform capabilities the selection core consumes.
///
/// The core only ever *signals* through this trait; producing actual
/// clipboard writes or tactile feedback is the embedder's concern. Context
/// menus stay entirely outside: menu policy reads the region's queries and
/// drives its own widget.
pub trait PlatformProvider {
    /// Receive the merged plain text of a copy command.
    fn write_clipboard(&self, text: &str) {
        let _ = text;
    }

    /// One discrete feedback signal, emitted per word boundary crossed
    /// during a handle drag and on a successful word select.
    fn haptic_pulse(&self) {}
}

/// Provider that ignores every signal. Used when the embedder supplies none.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyPlatformProvider;

impl PlatformProvider for DummyPlatformProvider {}

/// Consumer of merged selection results.
///
/// Observers are notified at the end of each dispatch pass, batched: a
/// single interaction yields at most one call per method per event.
pub trait SelectionObserver {
    /// The merged content changed. `None` means the selection is now empty.
    fn selection_changed(&self, content: Option<&SelectedContent>) {
        let _ = content;
    }

    /// The merged geometry changed.
    fn geometry_changed(&self, geometry: &SelectionGeometry) {
        let _ = geometry;
    }

    /// A handle drag is live and the gesture moved; magnifier overlays track
    /// this position.
    fn drag_position_changed(&self, position: Point) {
        let _ = position;
    }

    /// The live handle drag was released or cancelled.
    fn drag_ended(&self) {}
}

//! Per-region interaction state.

use std::ops::Range;

use marquee_traits::SelectionRange;

/// What kind of interaction currently drives the selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionKind {
    #[default]
    None,
    /// Pointer drag extending from a fresh anchor.
    PointerSelect,
    /// The start handle is grabbed.
    DragStartHandle,
    /// The end handle is grabbed.
    DragEndHandle,
    /// Keyboard-driven extension.
    KeyboardExtend,
}

impl InteractionKind {
    pub fn is_handle_drag(self) -> bool {
        matches!(
            self,
            InteractionKind::DragStartHandle | InteractionKind::DragEndHandle
        )
    }
}

/// Everything an interaction can touch, captured at its start. Cancelling
/// restores this verbatim, so an aborted drag commits nothing.
pub(crate) struct SessionSnapshot {
    pub ranges: Vec<(usize, Option<SelectionRange>)>,
    pub base_owner: Option<usize>,
    pub extent_owner: Option<usize>,
    pub caret_x: Option<f64>,
}

/// Mutable state of the active interaction, scoped to one region.
#[derive(Default)]
pub struct SelectionSession {
    pub interaction: InteractionKind,
    /// Unit currently holding the anchor edge.
    pub base_owner: Option<usize>,
    /// Unit currently holding the moving edge.
    pub extent_owner: Option<usize>,
    /// Horizontal caret intent carried across vertical extension steps.
    pub caret_x: Option<f64>,
    /// Word span under the moving edge at the last drag update, for the
    /// one-pulse-per-word feedback signal.
    pub(crate) last_word: Option<(usize, Range<usize>)>,
    pub(crate) snapshot: Option<SessionSnapshot>,
}

impl SelectionSession {
    pub(crate) fn begin(&mut self, kind: InteractionKind, snapshot: SessionSnapshot) {
        self.interaction = kind;
        self.snapshot = Some(snapshot);
        self.last_word = None;
    }

    /// End the interaction, keeping its result.
    pub fn commit(&mut self) {
        self.interaction = InteractionKind::None;
        self.snapshot = None;
        self.last_word = None;
    }

    /// End the interaction, yielding the state to restore.
    pub(crate) fn cancel(&mut self) -> Option<SessionSnapshot> {
        self.interaction = InteractionKind::None;
        self.last_word = None;
        self.snapshot.take()
    }

    /// Forget a unit that left the tree mid-session.
    pub(crate) fn forget_unit(&mut self, id: usize) {
        if self.base_owner == Some(id) {
            self.base_owner = None;
        }
        if self.extent_owner == Some(id) {
            self.extent_owner = None;
        }
        if self
            .last_word
            .as_ref()
            .is_some_and(|(word_unit, _)| *word_unit == id)
        {
            self.last_word = None;
        }
        if let Some(snapshot) = &mut self.snapshot {
            snapshot.ranges.retain(|(unit, _)| *unit != id);
            if snapshot.base_owner == Some(id) {
                snapshot.base_owner = None;
            }
            if snapshot.extent_owner == Some(id) {
                snapshot.extent_owner = None;
            }
        }
    }
}

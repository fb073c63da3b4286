use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use keyboard_types::KeyboardEvent;
use kurbo::{Point, Rect};
use marquee_traits::{
    DispatchResult, PlatformProvider, SelectedContent, Selectable, SelectionEdge,
    SelectionError, SelectionEvent, SelectionGeometry, SelectionObserver, SelectionRange,
    TextLayout,
};
use slab::Slab;
use smallvec::SmallVec;

use crate::config::RegionConfig;
use crate::content;
use crate::events::{keyboard, pointer};
use crate::handles;
use crate::node::{EmbeddedUnit, NodeFlags, TextUnit, UnitData, UnitNode};
use crate::session::{SelectionSession, SessionSnapshot};

/// Units in traversal order. Small regions are the common case.
pub(crate) type UnitList = SmallVec<[usize; 8]>;

static REGION_ID: AtomicUsize = AtomicUsize::new(0);

/// Tree mutations requested while a dispatch pass is running, applied once
/// it returns.
enum PendingOp {
    Attach { parent: usize, child: usize },
    Remove(usize),
}

/// A selectable region: the per-region context that composes units into a
/// tree, routes selection events to them, and merges their local results
/// into one geometry and one screen-ordered plain text.
///
/// Units live in a slab arena and are addressed by stable ids. The root of
/// the tree is a registrar created with the region; nested registrars
/// compose subtrees and can be disabled, which hides their whole subtree
/// from dispatch, content and geometry without touching siblings.
///
/// All dispatch is synchronous, single-threaded tree traversal. Observers
/// are notified in one batched publish step at the end of each pass: at
/// most one content and one geometry notification per dispatched event.
pub struct SelectionRegion {
    id: usize,
    nodes: Slab<UnitNode>,
    root_id: usize,
    session: SelectionSession,
    platform: Arc<dyn PlatformProvider>,
    observers: Vec<Arc<dyn SelectionObserver>>,
    last_content: Option<SelectedContent>,
    last_geometry: Option<SelectionGeometry>,
    in_dispatch: bool,
    pending: Vec<PendingOp>,
}

impl SelectionRegion {
    pub fn new(config: RegionConfig) -> Self {
        let mut nodes = Slab::new();
        let entry = nodes.vacant_entry();
        let root_id = entry.key();
        entry.insert(UnitNode::new(root_id, None, UnitData::Registrar));
        Self {
            id: REGION_ID.fetch_add(1, Ordering::SeqCst),
            nodes,
            root_id,
            session: SelectionSession::default(),
            platform: config
                .platform
                .unwrap_or_else(|| Arc::new(marquee_traits::DummyPlatformProvider)),
            observers: Vec::new(),
            last_content: None,
            // A fresh region's shape is known empty, not unknown: clearing
            // an already-empty selection must notify nobody.
            last_geometry: Some(SelectionGeometry::empty()),
            in_dispatch: false,
            pending: Vec::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Id of the region's root registrar.
    pub fn root_id(&self) -> usize {
        self.root_id
    }

    pub fn add_observer(&mut self, observer: Arc<dyn SelectionObserver>) {
        self.observers.push(observer);
    }

    pub fn node(&self, id: usize) -> Option<&UnitNode> {
        self.nodes.get(id)
    }

    // -- registration ------------------------------------------------------

    /// Register a nested registrar under `parent`.
    pub fn register_registrar(&mut self, parent: usize) -> Result<usize, SelectionError> {
        self.insert(parent, UnitData::Registrar)
    }

    /// Register a text unit under `parent`, backed by the given layout.
    pub fn register_text_unit(
        &mut self,
        parent: usize,
        layout: Arc<dyn TextLayout>,
    ) -> Result<usize, SelectionError> {
        self.insert(parent, UnitData::Text(TextUnit::new(layout)))
    }

    /// Register a non-text unit occupying `bounds`.
    pub fn register_embedded_unit(
        &mut self,
        parent: usize,
        bounds: Rect,
    ) -> Result<usize, SelectionError> {
        self.insert(parent, UnitData::Embedded(EmbeddedUnit::new(bounds)))
    }

    /// Register a host-implemented unit.
    pub fn register_custom_unit(
        &mut self,
        parent: usize,
        unit: Box<dyn Selectable>,
    ) -> Result<usize, SelectionError> {
        self.insert(parent, UnitData::Custom(unit))
    }

    fn insert(&mut self, parent: usize, data: UnitData) -> Result<usize, SelectionError> {
        let parent_node = self
            .nodes
            .get(parent)
            .ok_or(SelectionError::UnknownUnit(parent))?;
        if !parent_node.is_registrar() {
            return Err(SelectionError::NotARegistrar(parent));
        }
        let entry = self.nodes.vacant_entry();
        let id = entry.key();
        entry.insert(UnitNode::new(id, Some(parent), data));
        if self.in_dispatch {
            // No reentrant tree mutation: the node exists but joins the
            // tree only once the current pass returns.
            self.pending.push(PendingOp::Attach { parent, child: id });
        } else {
            self.nodes[parent].children.push(id);
        }
        Ok(id)
    }

    /// Remove a unit (and, for registrars, its whole subtree). The next
    /// recomputation excludes it cleanly even mid-selection. The root
    /// registrar cannot be removed.
    pub fn unregister_unit(&mut self, id: usize) -> Result<(), SelectionError> {
        if id == self.root_id || !self.nodes.contains(id) {
            return Err(SelectionError::UnknownUnit(id));
        }
        if self.in_dispatch {
            self.pending.push(PendingOp::Remove(id));
        } else {
            self.remove_now(id);
            self.publish();
        }
        Ok(())
    }

    fn remove_now(&mut self, id: usize) {
        if let Some(parent) = self.nodes.get(id).and_then(|node| node.parent)
            && let Some(parent_node) = self.nodes.get_mut(parent)
        {
            parent_node.children.retain(|&child| child != id);
        }
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if self.nodes.contains(next) {
                let node = self.nodes.remove(next);
                stack.extend(node.children);
                self.session.forget_unit(next);
            }
        }
    }

    /// Enable or disable a registrar. A disabled registrar stays in the
    /// tree but behaves as if it and its subtree did not exist.
    pub fn set_registrar_enabled(
        &mut self,
        id: usize,
        enabled: bool,
    ) -> Result<(), SelectionError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or(SelectionError::UnknownUnit(id))?;
        if !node.is_registrar() {
            return Err(SelectionError::NotARegistrar(id));
        }
        node.flags.set(NodeFlags::ENABLED, enabled);
        if !self.in_dispatch {
            self.publish();
        }
        Ok(())
    }

    /// Swap in a re-measured layout for a text unit, e.g. after a reflow.
    pub fn update_text_layout(
        &mut self,
        id: usize,
        layout: Arc<dyn TextLayout>,
    ) -> Result<(), SelectionError> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or(SelectionError::UnknownUnit(id))?;
        let Some(unit) = node.text_unit_mut() else {
            return Err(SelectionError::UnknownUnit(id));
        };
        unit.set_layout(layout);
        if !self.in_dispatch {
            self.publish();
        }
        Ok(())
    }

    /// Set a unit's range directly. Offsets are validated against the
    /// unit's length before any mutation.
    pub fn set_unit_range(
        &mut self,
        id: usize,
        range: Option<SelectionRange>,
    ) -> Result<(), SelectionError> {
        let leaf = self
            .leaf_mut(id)
            .ok_or(SelectionError::UnknownUnit(id))?;
        leaf.restore_range(range)?;
        if range.is_some() {
            self.session.base_owner = Some(id);
            self.session.extent_owner = Some(id);
        } else {
            self.session.forget_unit(id);
        }
        if !self.in_dispatch {
            self.publish();
        }
        Ok(())
    }

    fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(region = self.id, count = self.pending.len(), "flushing deferred tree mutations");
        for op in std::mem::take(&mut self.pending) {
            match op {
                PendingOp::Attach { parent, child } => {
                    if !self.nodes.contains(child) {
                        continue;
                    }
                    if self.nodes.contains(parent) {
                        self.nodes[parent].children.push(child);
                    } else {
                        // Parent vanished before the child ever joined.
                        self.nodes.remove(child);
                    }
                }
                PendingOp::Remove(id) => {
                    if self.nodes.contains(id) && id != self.root_id {
                        self.remove_now(id);
                    }
                }
            }
        }
    }

    // -- traversal ---------------------------------------------------------

    /// Leaf units in paint order (registration order, depth first), with
    /// disabled subtrees skipped. Later units are visually topmost.
    pub(crate) fn paint_ordered_units(&self) -> UnitList {
        let mut out = UnitList::new();
        self.collect_units(self.root_id, &mut out);
        out
    }

    fn collect_units(&self, id: usize, out: &mut UnitList) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if node.is_registrar() {
            if !node.is_enabled() {
                return;
            }
            for &child in &node.children {
                self.collect_units(child, out);
            }
        } else {
            out.push(id);
        }
    }

    /// Leaf units sorted into screen order: rows top to bottom, left to
    /// right within a row.
    pub(crate) fn screen_ordered_units(&self) -> UnitList {
        let mut units = self.paint_ordered_units();
        units.sort_by(|&a, &b| content::screen_cmp(self.leaf_bounds(a), self.leaf_bounds(b)));
        units
    }

    fn leaf_bounds(&self, id: usize) -> Rect {
        self.leaf(id).map(|leaf| leaf.bounds()).unwrap_or(Rect::ZERO)
    }

    pub(crate) fn leaf(&self, id: usize) -> Option<&dyn Selectable> {
        self.nodes.get(id)?.leaf()
    }

    pub(crate) fn leaf_mut(&mut self, id: usize) -> Option<&mut dyn Selectable> {
        self.nodes.get_mut(id)?.leaf_mut()
    }

    /// The topmost unit whose bounds contain the point.
    fn hit_unit(&self, point: Point) -> Option<usize> {
        self.paint_ordered_units()
            .into_iter()
            .rev()
            .find(|&id| self.leaf_bounds(id).contains(point))
    }

    // -- dispatch ----------------------------------------------------------

    /// Route one selection event through the tree.
    ///
    /// Dispatch passes are atomic: a new event may not begin while one is in
    /// flight, and tree mutations requested mid-pass are applied only once
    /// it returns. A pass ends with one batched observer publish.
    pub fn dispatch(&mut self, event: SelectionEvent) -> Result<DispatchResult, SelectionError> {
        if self.in_dispatch {
            return Err(SelectionError::ReentrantDispatch);
        }
        self.in_dispatch = true;
        let result = self.dispatch_inner(&event);
        self.in_dispatch = false;
        self.flush_pending();
        if result.is_ok() {
            self.publish();
        }
        result
    }

    fn dispatch_inner(
        &mut self,
        event: &SelectionEvent,
    ) -> Result<DispatchResult, SelectionError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(region = self.id, ?event, "dispatch");
        match event {
            SelectionEvent::SetEdge { edge, point, .. } => {
                let Some(hit) = self.hit_unit(*point) else {
                    // No unit under the point: consumed, nothing changes.
                    return Ok(DispatchResult::End);
                };
                self.session.caret_x = None;
                let units = self.screen_ordered_units();
                // Rebroadcast the stationary edge first, so units the
                // moving edge drags across clamp both edges locally.
                let opposite = match edge {
                    SelectionEdge::Start => SelectionEdge::End,
                    SelectionEdge::End => SelectionEdge::Start,
                };
                if let Some(anchor) = self.stationary_edge_point(opposite) {
                    let anchor_event = SelectionEvent::SetEdge {
                        edge: opposite,
                        point: anchor,
                        granularity: None,
                    };
                    for &id in &units {
                        if let Some(leaf) = self.leaf_mut(id) {
                            leaf.handle_event(&anchor_event)?;
                        }
                    }
                }
                for &id in &units {
                    if let Some(leaf) = self.leaf_mut(id) {
                        leaf.handle_event(event)?;
                    }
                }
                match edge {
                    SelectionEdge::Start => self.session.base_owner = Some(hit),
                    SelectionEdge::End => self.session.extent_owner = Some(hit),
                }
                Ok(DispatchResult::End)
            }
            SelectionEvent::SelectBoundary { point, .. } => {
                let Some(hit) = self.hit_unit(*point) else {
                    return Ok(DispatchResult::End);
                };
                self.session.caret_x = None;
                let units = self.paint_ordered_units();
                for &id in &units {
                    let unit_event = if id == hit {
                        event.clone()
                    } else {
                        SelectionEvent::Clear
                    };
                    if let Some(leaf) = self.leaf_mut(id) {
                        leaf.handle_event(&unit_event)?;
                    }
                }
                self.session.base_owner = Some(hit);
                self.session.extent_owner = Some(hit);
                self.platform.haptic_pulse();
                Ok(DispatchResult::End)
            }
            SelectionEvent::Extend { direction, .. } => {
                self.session.caret_x = None;
                self.extend_from_owner(event.clone(), direction.is_forward())
            }
            SelectionEvent::ExtendVertically { motion, target_x } => {
                let Some(owner) = self.session.extent_owner.or(self.session.base_owner) else {
                    return Ok(DispatchResult::End);
                };
                let seeded_x = (*target_x).or(self.session.caret_x).or_else(|| {
                    self.leaf(owner)
                        .and_then(|leaf| leaf.extent_position())
                        .map(|position| position.x)
                });
                self.session.caret_x = seeded_x;
                let seeded = SelectionEvent::ExtendVertically {
                    motion: *motion,
                    target_x: seeded_x,
                };
                self.extend_from_owner(seeded, motion.is_downward())
            }
            SelectionEvent::SelectAll => {
                let units = self.screen_ordered_units();
                for &id in &units {
                    if let Some(leaf) = self.leaf_mut(id) {
                        leaf.handle_event(event)?;
                    }
                }
                self.session.base_owner = units.first().copied();
                self.session.extent_owner = units.last().copied();
                self.session.caret_x = None;
                Ok(DispatchResult::End)
            }
            SelectionEvent::Clear => {
                let units = self.paint_ordered_units();
                for &id in &units {
                    if let Some(leaf) = self.leaf_mut(id) {
                        leaf.handle_event(event)?;
                    }
                }
                self.session.base_owner = None;
                self.session.extent_owner = None;
                self.session.caret_x = None;
                Ok(DispatchResult::End)
            }
        }
    }

    /// Run an extension from the moving edge's unit, following `Next`
    /// results through neighbors in screen order until the event is
    /// consumed or the document edge clamps it.
    fn extend_from_owner(
        &mut self,
        event: SelectionEvent,
        forward: bool,
    ) -> Result<DispatchResult, SelectionError> {
        let Some(mut owner) = self.session.extent_owner.or(self.session.base_owner) else {
            return Ok(DispatchResult::End);
        };
        let units = self.screen_ordered_units();
        let mut unit_event = event;
        loop {
            let result = match self.leaf_mut(owner) {
                Some(leaf) => leaf.handle_event(&unit_event)?,
                None => break,
            };
            match result {
                DispatchResult::End => break,
                DispatchResult::Next(residual) => match neighbor(&units, owner, forward) {
                    Some(next) => {
                        owner = next;
                        unit_event = residual;
                    }
                    None => break,
                },
            }
        }
        self.session.extent_owner = Some(owner);
        Ok(DispatchResult::End)
    }

    // -- publish -----------------------------------------------------------

    /// Recompute the merged geometry and content and notify observers of
    /// whatever changed. Runs once per dispatch pass.
    pub(crate) fn publish(&mut self) {
        let units = self.screen_ordered_units();
        let geometry = handles::compute_geometry(self, &units);
        let content = content::merge_content(self, &units).map(|mut merged| {
            merged.geometry = geometry;
            merged
        });
        if geometry != self.last_geometry {
            if let Some(current) = &geometry {
                for observer in &self.observers {
                    observer.geometry_changed(current);
                }
            }
            self.last_geometry = geometry;
        }
        if content != self.last_content {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                region = self.id,
                has_content = content.is_some(),
                "selection content changed"
            );
            for observer in &self.observers {
                observer.selection_changed(content.as_ref());
            }
            self.last_content = content;
        }
    }

    /// Host signal that a layout pass completed; deferred geometry is
    /// recomputed now rather than ever being guessed.
    pub fn layout_changed(&mut self) {
        if !self.in_dispatch {
            self.publish();
        }
    }

    // -- queries -----------------------------------------------------------

    /// The merged selection shape, or `None` while any participating
    /// unit's layout is still pending (distinct from an empty selection,
    /// which is `Some` with [`SelectionStatus::None`]).
    ///
    /// [`SelectionStatus::None`]: marquee_traits::SelectionStatus::None
    pub fn geometry(&self) -> Option<SelectionGeometry> {
        let units = self.screen_ordered_units();
        handles::compute_geometry(self, &units)
    }

    /// The merged plain text in screen order, or `None` when nothing is
    /// selected.
    pub fn selected_content(&self) -> Option<SelectedContent> {
        let units = self.screen_ordered_units();
        let geometry = handles::compute_geometry(self, &units);
        content::merge_content(self, &units).map(|mut merged| {
            merged.geometry = geometry;
            merged
        })
    }

    /// Whether the selected span covers the given point. Backs the host's
    /// tap-within-selection menu policy.
    pub fn has_selection_at(&self, point: Point) -> bool {
        self.hit_unit(point)
            .and_then(|id| self.leaf(id))
            .is_some_and(|leaf| leaf.has_selection_at(point))
    }

    /// Whether a copy command would produce content.
    pub fn can_copy(&self) -> bool {
        let units = self.screen_ordered_units();
        content::merge_content(self, &units).is_some()
    }

    /// Whether every unit in scope is already fully selected.
    pub fn is_all_selected(&self) -> bool {
        let units = self.paint_ordered_units();
        let mut any = false;
        for &id in &units {
            let Some(leaf) = self.leaf(id) else { continue };
            let len = leaf.text_len();
            if len == 0 {
                continue;
            }
            match leaf.range() {
                Some(range) if range.normalized() == (0..len) => any = true,
                _ => return false,
            }
        }
        any
    }

    /// The selected text and geometry of one registrar's subtree: its
    /// content is the screen-ordered concatenation of its descendants, its
    /// geometry the merge of their non-empty geometries.
    pub fn subtree_content(&self, id: usize) -> Result<Option<SelectedContent>, SelectionError> {
        let units = self.subtree_units(id)?;
        Ok(content::merge_content(self, &units))
    }

    pub fn subtree_geometry(
        &self,
        id: usize,
    ) -> Result<Option<SelectionGeometry>, SelectionError> {
        let units = self.subtree_units(id)?;
        Ok(handles::compute_geometry(self, &units))
    }

    fn subtree_units(&self, id: usize) -> Result<UnitList, SelectionError> {
        if !self.nodes.contains(id) {
            return Err(SelectionError::UnknownUnit(id));
        }
        let mut units = UnitList::new();
        self.collect_units(id, &mut units);
        units.sort_by(|&a, &b| content::screen_cmp(self.leaf_bounds(a), self.leaf_bounds(b)));
        Ok(units)
    }

    // -- programmatic entry points ----------------------------------------

    pub fn select_all(&mut self) -> Result<(), SelectionError> {
        self.dispatch(SelectionEvent::SelectAll).map(|_| ())
    }

    pub fn clear(&mut self) -> Result<(), SelectionError> {
        self.dispatch(SelectionEvent::Clear).map(|_| ())
    }

    /// Write the merged plain text to the platform clipboard. Returns
    /// whether there was anything to copy.
    pub fn copy_selection(&self) -> bool {
        match self.selected_content() {
            Some(content) => {
                self.platform.write_clipboard(&content.plain_text);
                true
            }
            None => false,
        }
    }

    // -- input plumbing ----------------------------------------------------

    /// A fresh primary pointer interaction (not a handle grab): clears the
    /// previous selection and anchors a new collapsed one at the point.
    pub fn pointer_down(&mut self, point: Point) -> Result<(), SelectionError> {
        pointer::pointer_down(self, point)
    }

    /// A drag update of the active pointer interaction.
    pub fn pointer_move(&mut self, point: Point) -> Result<(), SelectionError> {
        pointer::pointer_move(self, point)
    }

    /// The pointer lifted: the interaction commits.
    pub fn pointer_up(&mut self) {
        pointer::pointer_up(self);
    }

    /// The pointer gesture was cancelled: restore the state from before the
    /// interaction began.
    pub fn pointer_cancel(&mut self) {
        self.cancel_interaction();
    }

    /// A word select (double tap or long press) at the point.
    pub fn select_word_at(&mut self, point: Point) -> Result<(), SelectionError> {
        pointer::select_word(self, point)
    }

    /// Apply a classified key event. Returns whether it was consumed.
    pub fn handle_key_event(&mut self, event: &KeyboardEvent) -> Result<bool, SelectionError> {
        keyboard::handle_key_event(self, event)
    }

    /// Abort the in-flight interaction, restoring every unit range and the
    /// session bookkeeping captured when it began.
    pub fn cancel_interaction(&mut self) {
        let was_drag = self.session.interaction.is_handle_drag();
        if let Some(snapshot) = self.session.cancel() {
            #[cfg(feature = "tracing")]
            tracing::debug!(region = self.id, "interaction cancelled, restoring snapshot");
            for (id, range) in snapshot.ranges {
                if let Some(leaf) = self.leaf_mut(id) {
                    let _ = leaf.restore_range(range);
                }
            }
            self.session.base_owner = snapshot.base_owner;
            self.session.extent_owner = snapshot.extent_owner;
            self.session.caret_x = snapshot.caret_x;
            self.publish();
        }
        if was_drag {
            self.notify_drag_ended();
        }
    }

    // -- session plumbing --------------------------------------------------

    pub(crate) fn session(&self) -> &SelectionSession {
        &self.session
    }

    pub(crate) fn session_mut(&mut self) -> &mut SelectionSession {
        &mut self.session
    }

    pub(crate) fn platform(&self) -> &dyn PlatformProvider {
        &*self.platform
    }

    pub(crate) fn capture_session(&self) -> SessionSnapshot {
        let ranges = self
            .paint_ordered_units()
            .iter()
            .filter_map(|&id| self.leaf(id).map(|leaf| (id, leaf.range())))
            .collect();
        SessionSnapshot {
            ranges,
            base_owner: self.session.base_owner,
            extent_owner: self.session.extent_owner,
            caret_x: self.session.caret_x,
        }
    }

    /// Global position of a stationary edge, derived from its owner's
    /// current local offset.
    fn stationary_edge_point(&self, edge: SelectionEdge) -> Option<Point> {
        let (owner, offset) = match edge {
            SelectionEdge::Start => {
                let id = self.session.base_owner?;
                (id, self.leaf(id)?.range()?.base)
            }
            SelectionEdge::End => {
                let id = self.session.extent_owner?;
                (id, self.leaf(id)?.range()?.extent)
            }
        };
        self.leaf(owner)?.position_at(offset)
    }

    /// The word span under the moving edge, for drag feedback tracking.
    pub(crate) fn extent_word(&self) -> Option<(usize, std::ops::Range<usize>)> {
        let id = self.session.extent_owner?;
        let unit = self.nodes.get(id)?.text_unit()?;
        let range = unit.range()?;
        let span = unit
            .layout()
            .boundary_at(range.extent, marquee_traits::BoundaryKind::Word)?;
        Some((id, span))
    }

    pub(crate) fn notify_drag_position(&self, position: Point) {
        for observer in &self.observers {
            observer.drag_position_changed(position);
        }
    }

    pub(crate) fn notify_drag_ended(&self) {
        for observer in &self.observers {
            observer.drag_ended();
        }
    }
}

fn neighbor(order: &[usize], id: usize, forward: bool) -> Option<usize> {
    let index = order.iter().position(|&unit| unit == id)?;
    if forward {
        order.get(index + 1).copied()
    } else {
        index.checked_sub(1).map(|previous| order[previous])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_text::PlainTextLayout;

    fn text_layout(text: &str, y: f64) -> Arc<dyn TextLayout> {
        Arc::new(PlainTextLayout::new(text, Point::new(0.0, y)))
    }

    #[test]
    fn registration_during_dispatch_is_deferred() {
        let mut region = SelectionRegion::new(RegionConfig::default());
        let root = region.root_id();
        region.in_dispatch = true;

        let unit = region
            .register_text_unit(root, text_layout("deferred", 0.0))
            .expect("registration mid-dispatch still yields an id");
        assert!(
            !region.nodes[root].children.contains(&unit),
            "unit must not join the tree while a pass is running"
        );
        assert!(region.paint_ordered_units().is_empty());

        region.in_dispatch = false;
        region.flush_pending();
        assert!(region.nodes[root].children.contains(&unit));
        assert_eq!(region.paint_ordered_units().as_slice(), &[unit]);
    }

    #[test]
    fn removal_during_dispatch_is_deferred() {
        let mut region = SelectionRegion::new(RegionConfig::default());
        let root = region.root_id();
        let unit = region
            .register_text_unit(root, text_layout("here", 0.0))
            .unwrap();

        region.in_dispatch = true;
        region.unregister_unit(unit).unwrap();
        assert!(
            region.nodes.contains(unit),
            "unit stays addressable until the pass returns"
        );

        region.in_dispatch = false;
        region.flush_pending();
        assert!(!region.nodes.contains(unit));
        assert!(region.paint_ordered_units().is_empty());
    }

    #[test]
    fn reentrant_dispatch_is_rejected() {
        let mut region = SelectionRegion::new(RegionConfig::default());
        region.in_dispatch = true;
        let result = region.dispatch(SelectionEvent::Clear);
        assert!(matches!(result, Err(SelectionError::ReentrantDispatch)));
    }

    #[test]
    fn root_registrar_cannot_be_removed() {
        let mut region = SelectionRegion::new(RegionConfig::default());
        let root = region.root_id();
        assert!(region.unregister_unit(root).is_err());
        assert!(region.nodes.contains(root));
    }
}

use bitflags::bitflags;
use marquee_traits::Selectable;

use super::{EmbeddedUnit, TextUnit};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct NodeFlags: u8 {
        /// Cleared on a disabled registrar: the node stays in the tree but
        /// its whole subtree is invisible to dispatch, content and geometry.
        const ENABLED = 1 << 0;
    }
}

/// Heterogeneous data that depends on the unit's kind.
pub enum UnitData {
    /// A composite: owns and routes to child units, and is itself a unit
    /// from its parent's perspective.
    Registrar,
    /// A text leaf backed by an external layout collaborator.
    Text(TextUnit),
    /// A non-text leaf: occupies space, contributes no text.
    Embedded(EmbeddedUnit),
    /// A host-provided leaf implementing the unit contract directly.
    Custom(Box<dyn Selectable>),
}

impl std::fmt::Debug for UnitData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitData::Registrar => f.write_str("Registrar"),
            UnitData::Text(_) => f.write_str("Text"),
            UnitData::Embedded(_) => f.write_str("Embedded"),
            UnitData::Custom(_) => f.write_str("Custom"),
        }
    }
}

/// A slab-arena node of the selection tree.
///
/// Nodes are addressed by their stable arena id, never by reference, so
/// registration and deregistration during a dispatch pass are safe deferred
/// index operations.
#[derive(Debug)]
pub struct UnitNode {
    pub id: usize,
    pub parent: Option<usize>,
    /// Child ids in registration order, which is also paint order: later
    /// children are visually topmost for hit-test tie-breaking.
    pub children: Vec<usize>,
    pub flags: NodeFlags,
    pub data: UnitData,
}

impl UnitNode {
    pub(crate) fn new(id: usize, parent: Option<usize>, data: UnitData) -> Self {
        Self {
            id,
            parent,
            children: Vec::new(),
            flags: NodeFlags::ENABLED,
            data,
        }
    }

    pub fn is_registrar(&self) -> bool {
        matches!(self.data, UnitData::Registrar)
    }

    pub fn is_enabled(&self) -> bool {
        self.flags.contains(NodeFlags::ENABLED)
    }

    /// The node's leaf contract, if it is a leaf.
    pub fn leaf(&self) -> Option<&dyn Selectable> {
        match &self.data {
            UnitData::Registrar => None,
            UnitData::Text(unit) => Some(unit),
            UnitData::Embedded(unit) => Some(unit),
            UnitData::Custom(unit) => Some(unit.as_ref()),
        }
    }

    pub fn leaf_mut(&mut self) -> Option<&mut dyn Selectable> {
        match &mut self.data {
            UnitData::Registrar => None,
            UnitData::Text(unit) => Some(unit),
            UnitData::Embedded(unit) => Some(unit),
            UnitData::Custom(unit) => Some(unit.as_mut()),
        }
    }

    pub fn text_unit(&self) -> Option<&TextUnit> {
        match &self.data {
            UnitData::Text(unit) => Some(unit),
            _ => None,
        }
    }

    pub fn text_unit_mut(&mut self) -> Option<&mut TextUnit> {
        match &mut self.data {
            UnitData::Text(unit) => Some(unit),
            _ => None,
        }
    }
}

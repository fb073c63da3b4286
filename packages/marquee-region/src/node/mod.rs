#![allow(clippy::module_inception)]

mod embedded;
mod node;
mod text;

pub use embedded::EmbeddedUnit;
pub use node::{NodeFlags, UnitData, UnitNode};
pub use text::TextUnit;

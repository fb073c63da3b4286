//! Error handling for selection dispatch.

/// Contract violations surfaced by the selection protocol.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    /// An offset outside `[0, len]` was passed into a unit. The unit rejects
    /// before any state mutation; partial updates never happen.
    #[error("offset {offset} out of range for unit of length {len}")]
    OffsetOutOfRange { offset: usize, len: usize },

    /// An operation addressed a unit id that is not in the tree.
    #[error("unknown unit id {0}")]
    UnknownUnit(usize),

    /// A dispatch began while a previous dispatch pass was still running.
    /// Observers must not re-dispatch synchronously.
    #[error("selection dispatch is not reentrant")]
    ReentrantDispatch,

    /// Enable/disable or child registration addressed a leaf unit.
    #[error("unit {0} is not a registrar")]
    NotARegistrar(usize),
}

use thiserror::Error;

/// Result type alias for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;

/// Error variants for structural tree edits and document queries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// The node is not attached to the tree (deleted or never inserted).
    #[error("node is not attached to the tree")]
    Detached,

    /// The node is already attached and cannot be inserted again.
    #[error("node is already attached to the tree")]
    AlreadyAttached,

    /// The anchor node is not a child of the given parent.
    #[error("anchor node is not a child of the given parent")]
    NotAChild,

    /// The document index is stale; the file must be synchronized first.
    #[error("document is out of sync with the tree")]
    Desynced,
}

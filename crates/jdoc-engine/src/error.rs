use jdoc_syntax::TreeError;
use thiserror::Error;

/// Result type alias for documentation operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Error variants for documentation generation and tree mutation.
///
/// The taxonomy matters to callers: [`FileNotValid`] is detected before any
/// mutation and aborts the whole operation for that file, while
/// [`ElementNotFound`] is raised during structural lookups that fail soft
/// (the reformat bounds) after the comment itself was already committed.
///
/// [`FileNotValid`]: EngineError::FileNotValid
/// [`ElementNotFound`]: EngineError::ElementNotFound
#[derive(Debug, Error)]
pub enum EngineError {
    /// The owning file is missing, stale, or read-only.
    #[error("cannot generate javadocs for '{path}': {reason}")]
    FileNotValid {
        /// Path of the rejected file.
        path: String,
        /// Human-readable cause, surfaced to the user as-is.
        reason: String,
    },

    /// An expected node could not be located in the tree.
    #[error("cannot find {what}")]
    ElementNotFound {
        /// Description of the missing node.
        what: String,
    },

    /// A structural edit failed inside the write transaction. The
    /// transaction's partial changes have been rolled back.
    #[error("write action failed: {source}")]
    Write {
        /// Underlying tree failure.
        #[from]
        source: TreeError,
    },
}

impl EngineError {
    pub(crate) fn file_not_valid(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FileNotValid {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(what: impl Into<String>) -> Self {
        Self::ElementNotFound { what: what.into() }
    }
}

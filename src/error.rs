//! Error types for the variant editor.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using EditorError.
pub type Result<T> = std::result::Result<T, EditorError>;

/// Main error type for resource pack editing operations.
#[derive(Error, Debug)]
pub enum EditorError {
    /// The chosen directory has no `pack.mcmeta` marker.
    #[error("Not a resource pack: {0}")]
    NotAResourcePack(PathBuf),

    /// A blockstate file could not be parsed as JSON.
    #[error("Malformed blockstate {path}: {source}")]
    MalformedBlockstate {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The texture source does not exist or is not a PNG.
    #[error("Invalid image path: {0}")]
    InvalidImagePath(PathBuf),

    /// A weight or rotation input could not be parsed as an integer.
    #[error("Field '{field}' is not a number: {value:?}")]
    NonNumericField { field: &'static str, value: String },

    /// Failed to serialize JSON data.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No blockstate file exists for the block.
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    /// The blockstate parsed but does not have the expected shape.
    #[error("Invalid blockstate for {block}: {reason}")]
    InvalidBlockstate { block: String, reason: String },

    /// The variant index does not exist in `variants[""]`.
    #[error("Variant index {index} out of range for {block} ({len} variants)")]
    VariantIndexOutOfRange {
        block: String,
        index: usize,
        len: usize,
    },

    /// Every variant index of the block is already taken.
    #[error("No variant index left for {0}")]
    VariantIndexExhausted(String),

    /// A `pack.mcmeta` already exists where a new pack was requested.
    #[error("Resource pack already exists: {0}")]
    PackAlreadyExists(PathBuf),

    /// The requested pack format label is not known.
    #[error("Unknown pack format: {0}")]
    UnknownPackFormat(String),

    /// A session operation needs an open pack.
    #[error("No resource pack is open")]
    NoPackOpen,

    /// A session operation needs a selected block.
    #[error("No block is selected")]
    NoBlockSelected,
}

impl EditorError {
    /// Whether this error comes from user input and should be shown inline
    /// (e.g. a highlighted field) rather than aborting the action loudly.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EditorError::NotAResourcePack(_)
                | EditorError::MalformedBlockstate { .. }
                | EditorError::InvalidImagePath(_)
                | EditorError::NonNumericField { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_kinds() {
        assert!(EditorError::NotAResourcePack(PathBuf::from("x")).is_recoverable());
        assert!(EditorError::InvalidImagePath(PathBuf::from("x.jpg")).is_recoverable());
        assert!(EditorError::NonNumericField {
            field: "weight",
            value: "abc".to_string()
        }
        .is_recoverable());
        assert!(!EditorError::NoPackOpen.is_recoverable());
        assert!(!EditorError::BlockNotFound("stone".to_string()).is_recoverable());
    }

    #[test]
    fn test_non_numeric_message() {
        let err = EditorError::NonNumericField {
            field: "x",
            value: "ninety".to_string(),
        };
        assert_eq!(err.to_string(), "Field 'x' is not a number: \"ninety\"");
    }
}

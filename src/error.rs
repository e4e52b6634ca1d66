//! Error types for catalog snapshot ingestion.
//!
//! The resolution core itself never fails; these errors describe problems
//! with the data handed over by the tag reader.

use thiserror::Error;

/// Errors raised while reading a catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The snapshot document as a whole cannot be used.
    #[error("invalid catalog snapshot: {reason}\n  Suggestion: {suggestion}")]
    InvalidSnapshot {
        /// Why the snapshot is invalid
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// One item in the snapshot could not be read; the rest are unaffected.
    #[error("unreadable catalog item '{item}': {reason}\n  Suggestion: {suggestion}")]
    UnreadableItem {
        /// Item identifier (source path or array position)
        item: String,
        /// Why the item could not be read
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },
}

impl CatalogError {
    /// Creates an `InvalidSnapshot` error for a document that is not valid JSON.
    #[must_use]
    pub fn malformed_json(parse_error: &str) -> Self {
        Self::InvalidSnapshot {
            reason: parse_error.to_string(),
            suggestion: "Check that the file is the JSON output of the tag reader".to_string(),
        }
    }

    /// Creates an `InvalidSnapshot` error for a document whose top level is not an array.
    #[must_use]
    pub fn not_an_array(found: &str) -> Self {
        Self::InvalidSnapshot {
            reason: format!("expected a JSON array of items, found {found}"),
            suggestion: "Wrap the items in [ ... ]".to_string(),
        }
    }

    /// Creates an `UnreadableItem` error for an element with the wrong shape.
    #[must_use]
    pub fn bad_item(item: &str, reason: &str) -> Self {
        Self::UnreadableItem {
            item: item.to_string(),
            reason: reason.to_string(),
            suggestion: "Each item needs a \"source\" string and an \"attributes\" object"
                .to_string(),
        }
    }
}

use thiserror::Error;

use crate::registry::{DuplicateId, LoadState, SourcePosition};

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("Invalid collection '{id}' at {position}: {reason}")]
    InvalidEntry {
        id: String,
        position: SourcePosition,
        reason: String,
    },

    #[error("Duplicate collection ids:\n{}", format_duplicates(.duplicates))]
    DuplicateId { duplicates: Vec<DuplicateId> },

    #[error("Collection not found: '{id}' (tried: {})", .candidates.join(", "))]
    NotFound { id: String, candidates: Vec<String> },

    #[error("Invalid locale: '{0}'")]
    InvalidLocale(String),

    #[error("Failed to parse collection source {origin}: {message}")]
    Source { origin: String, message: String },

    #[error("Registry loader is already {0}; start a new loader to reload")]
    LoaderFinished(LoadState),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CollectionError {
    /// True for lookup misses, which callers may treat as an ordinary result.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CollectionError::NotFound { .. })
    }
}

fn format_duplicates(duplicates: &[DuplicateId]) -> String {
    duplicates
        .iter()
        .map(|dup| format!("  {dup}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T> = std::result::Result<T, CollectionError>;

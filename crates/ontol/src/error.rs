//! Error types for the generator crate.

use thiserror::Error;

/// Errors raised while transforming a validated ontology.
#[derive(Debug, Error)]
pub enum OntolError {
    /// A figure referenced a definition missing from its owning ontology.
    #[error("figure references unknown definition '{0}'")]
    UnknownFigureMember(String),

    /// Structured document could not be encoded.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

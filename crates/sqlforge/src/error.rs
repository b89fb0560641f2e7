//! Error types for sqlforge

use thiserror::Error;

/// Result type alias for sqlforge operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Error types for SQL generation and statement execution seams
#[derive(Debug, Error)]
pub enum SqlError {
    /// A SQL feature has no translation under the active dialect.
    ///
    /// Retrying with the same dialect will fail again; switch dialects or
    /// avoid the feature.
    #[error("{feature} is not supported by the {dialect} dialect")]
    Unsupported {
        feature: String,
        dialect: &'static str,
    },

    /// More than one dialect implementation was discovered during resolution.
    #[error(
        "multiple dialect implementations found: {}; \
         register exactly one, or resolve a dialect explicitly",
        candidates.join(", ")
    )]
    AmbiguousDialect { candidates: Vec<String> },

    /// An executed insert produced no generated-keys row.
    #[error("statement produced no generated key")]
    GeneratedKeyAbsent,

    /// Key extraction was requested but no primary-key column was supplied.
    #[error("table must have a primary key")]
    NoPrimaryKey,

    /// The generated-keys row decoded to a null value.
    #[error("generated key is null")]
    NullGeneratedKey,

    /// Structurally invalid expression tree.
    ///
    /// This is a programming defect in the caller's tree construction, not a
    /// data error, and is never suppressed.
    #[error("malformed expression tree: {0}")]
    MalformedTree(String),

    /// A value did not match the codec's expected wire representation.
    #[error("codec expected {expected}, got {got}")]
    Codec {
        expected: &'static str,
        got: &'static str,
    },

    /// Error propagated from the execution layer.
    #[error("execution error: {0}")]
    Execution(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SqlError {
    /// Create an unsupported-feature error for the given dialect.
    pub fn unsupported(feature: impl Into<String>, dialect: &'static str) -> Self {
        Self::Unsupported {
            feature: feature.into(),
            dialect,
        }
    }

    /// Create a malformed-tree error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedTree(message.into())
    }

    /// Create an execution error from any error type.
    pub fn execution(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Execution(err.into())
    }

    /// Check if this is an unsupported-feature error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Check if this is an ambiguous-dialect resolution error
    pub fn is_ambiguous_dialect(&self) -> bool {
        matches!(self, Self::AmbiguousDialect { .. })
    }

    /// Check if this is a malformed-tree error
    pub fn is_malformed_tree(&self) -> bool {
        matches!(self, Self::MalformedTree(_))
    }
}

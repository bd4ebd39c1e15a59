//! Error types for the Traveller domain layer.
//!
//! This module defines a small hierarchy of error types:
//!
//! - [`StorageError`] - Database/repository errors
//! - [`DomainError`] - Relay identification and pagination errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Domain Errors
// =============================================================================

/// Relay identification and pagination errors.
///
/// Most of these never reach a client: [`crate::relay::NodeRegistry::node`]
/// collapses them into a null result and the lenient pagination policy
/// ignores bad cursors. They exist so callers that want a strict policy can
/// layer it on top.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Global ID is not base64, not UTF-8, or not `<TypeTag>:<id>`.
    #[error("Invalid global ID: {0}")]
    InvalidGlobalId(String),

    /// Global ID decoded, but no lookup is registered for its type tag.
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    /// Lookup ran but found nothing.
    #[error("Node not found: {type_tag} {id}")]
    NodeNotFound {
        /// Type tag carried by the global ID.
        type_tag: String,
        /// Local identifier carried by the global ID.
        id: i64,
    },

    /// Pagination arguments rejected by the strict policy.
    #[error("Invalid pagination arguments: {0}")]
    InvalidPagination(String),

    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Database and repository errors.
///
/// These errors originate from storage operations like queries
/// and row conversion.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to establish database connection.
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    /// SQL query execution failed.
    #[error("Query execution error: {0}")]
    QueryError(String),

    /// Transaction could not be opened or committed.
    #[error("Transaction error: {0}")]
    TransactionError(String),

    /// Database migration failed.
    #[error("Migration error: {0}")]
    MigrationError(String),

    /// Row data could not be converted into a domain model.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    // Test critique: la conversion Storage -> Domain fonctionne avec `?`
    #[test]
    fn test_error_conversion_chain() {
        fn lookup() -> DomainResult<()> {
            Err(StorageError::QueryError("db failed".into()))?;
            Ok(())
        }

        let err = lookup().unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
        // Le message original est préservé
        assert!(err.to_string().contains("db failed"));
    }

    // Test critique: NodeNotFound contient le tag et l'id pour le debug
    #[test]
    fn test_node_not_found_includes_identity() {
        let err = DomainError::NodeNotFound {
            type_tag: "World".into(),
            id: 42,
        };
        let msg = err.to_string();
        assert!(msg.contains("World") && msg.contains("42"));
    }
}

//! Storage error types.
//!
//! Schema-level violations get their own variant so callers can translate
//! them into client errors while every other failure stays a server error.

use std::fmt;

use corral_core::FieldViolation;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The requested document was not found.
    #[error("Document not found: {collection}/{id}")]
    NotFound {
        /// The collection that was searched.
        collection: String,
        /// The id that was not found.
        id: String,
    },

    /// The document violates a schema-level constraint.
    #[error("Schema validation failed: {}", format_violations(.violations))]
    Schema {
        /// The individual field violations.
        violations: Vec<FieldViolation>,
    },

    /// Failed to reach the storage backend.
    #[error("Connection error: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// An internal storage error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl StorageError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Creates a new `Schema` error.
    #[must_use]
    pub fn schema(violations: Vec<FieldViolation>) -> Self {
        Self::Schema { violations }
    }

    /// Creates a new `Connection` error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is a schema validation error.
    #[must_use]
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Schema { .. } => ErrorCategory::Validation,
            Self::Connection { .. } => ErrorCategory::Infrastructure,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Categories of storage errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Document not found.
    NotFound,
    /// Schema validation error.
    Validation,
    /// Infrastructure/connection error.
    Infrastructure,
    /// Internal error.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::Validation => write!(f, "validation"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::not_found("posts", "123");
        assert_eq!(err.to_string(), "Document not found: posts/123");

        let err = StorageError::schema(vec![
            FieldViolation::new("lat", "must be between -90 and 90"),
            FieldViolation::new("name", "is required"),
        ]);
        assert_eq!(
            err.to_string(),
            "Schema validation failed: lat: must be between -90 and 90; name: is required"
        );
    }

    #[test]
    fn test_error_predicates() {
        assert!(StorageError::not_found("posts", "123").is_not_found());
        assert!(!StorageError::not_found("posts", "123").is_schema());
        assert!(StorageError::schema(Vec::new()).is_schema());
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            StorageError::not_found("posts", "123").category(),
            ErrorCategory::NotFound
        );
        assert_eq!(
            StorageError::schema(Vec::new()).category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            StorageError::connection("refused").category(),
            ErrorCategory::Infrastructure
        );
        assert_eq!(
            StorageError::internal("boom").category(),
            ErrorCategory::Internal
        );
    }
}

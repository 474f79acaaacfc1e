//! Repository error types
//!
//! Structured errors for store operations. The message carried by each
//! error is the exact text clients see in the response `detail`.
//!
//! # Example
//!
//! ```rust
//! use user_service::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
//!
//! let error = RepositoryError::not_found(RepositoryOperation::Delete, 42);
//! assert!(matches!(error.kind, RepositoryErrorKind::NotFound));
//! assert_eq!(error.entity_id.as_deref(), Some("42"));
//! ```

use std::fmt;

/// Message reported when no record has the requested id
pub const USER_NOT_FOUND: &str = "User not found";

/// Message reported when a record already uses the email
pub const EMAIL_TAKEN: &str = "Email already exists";

const ENTITY_TYPE: &str = "User";

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Finding a single record by id
    FindById,
    /// Creating a new record
    Create,
    /// Deleting records by id
    Delete,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FindById => write!(f, "find_by_id"),
            Self::Create => write!(f, "create"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// Record was not found
    NotFound,
    /// A unique attribute is already in use
    AlreadyExists,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::AlreadyExists => write!(f, "already_exists"),
        }
    }
}

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Client-facing error message
    pub message: String,
    /// The type of entity involved
    pub entity_type: Option<String>,
    /// The id (or unique key) of the entity involved
    pub entity_id: Option<String>,
}

impl RepositoryError {
    /// Create a new repository error
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Attach the entity type and id involved
    pub fn with_entity(mut self, entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    /// No user record has the given id
    pub fn not_found(operation: RepositoryOperation, id: i64) -> Self {
        Self::new(operation, RepositoryErrorKind::NotFound, USER_NOT_FOUND)
            .with_entity(ENTITY_TYPE, id.to_string())
    }

    /// Another user record already uses the given email
    pub fn email_taken(email: &str) -> Self {
        Self::new(
            RepositoryOperation::Create,
            RepositoryErrorKind::AlreadyExists,
            EMAIL_TAKEN,
        )
        .with_entity(ENTITY_TYPE, email)
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(entity_type), Some(entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names() {
        let names: Vec<String> = [
            RepositoryOperation::FindById,
            RepositoryOperation::Create,
            RepositoryOperation::Delete,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(names, vec!["find_by_id", "create", "delete"]);
    }

    #[test]
    fn test_not_found_display() {
        let err = RepositoryError::not_found(RepositoryOperation::Delete, 999);
        assert_eq!(
            err.to_string(),
            "Repository not_found error during delete: User not found [User: 999]"
        );
    }

    #[test]
    fn test_email_taken() {
        let err = RepositoryError::email_taken("a@x.com");
        assert_eq!(err.kind, RepositoryErrorKind::AlreadyExists);
        assert_eq!(err.operation, RepositoryOperation::Create);
        assert_eq!(err.message, "Email already exists");
        assert_eq!(err.entity_id.as_deref(), Some("a@x.com"));
    }
}

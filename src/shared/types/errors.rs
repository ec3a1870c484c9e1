use thiserror::Error;

/// Error taxonomy shared by repositories, services and the HTTP boundary.
///
/// Every variant carries a human readable message; the HTTP layer maps the
/// variant (not the message) to a status code exactly once.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} with {field}={value} not found")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether the caller can fix the request (as opposed to a server fault).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Database(_))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_entity() {
        let err = DomainError::not_found("Student", "id", 42);
        assert_eq!(err.to_string(), "Student with id=42 not found");
        assert!(err.is_client_error());
    }

    #[test]
    fn database_errors_are_server_faults() {
        let err = DomainError::Database("disk I/O error".into());
        assert!(!err.is_client_error());
    }
}

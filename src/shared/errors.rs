use thiserror::Error;

/// Errors surfaced by the booking core and its ports.
///
/// `InvalidTimeSlot`, `InvalidArgument` and `BusinessRule` are client
/// errors: the request itself is wrong and retrying it cannot help.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Absent slot field, or a slot whose end does not follow its start.
    #[error("{0}")]
    InvalidTimeSlot(String),

    /// Malformed input that is not a time slot (policy bounds, arguments).
    #[error("{0}")]
    InvalidArgument(String),

    /// Opening hours or overlap violation.
    #[error("{0}")]
    BusinessRule(String),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidTimeSlot(_)
                | DomainError::InvalidArgument(_)
                | DomainError::BusinessRule(_)
        )
    }

    /// Short label used for rejection metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::InvalidTimeSlot(_) => "invalid_time_slot",
            DomainError::InvalidArgument(_) => "invalid_argument",
            DomainError::BusinessRule(_) => "business_rule",
            DomainError::NotFound { .. } => "not_found",
            DomainError::Storage(_) => "storage",
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Failures raised by storage adapters before they reach the domain.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Corrupt record {id}: {reason}")]
    Corrupt { id: i64, reason: String },
}

impl From<InfraError> for DomainError {
    fn from(err: InfraError) -> Self {
        DomainError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_classified() {
        assert!(DomainError::InvalidTimeSlot("x".into()).is_client_error());
        assert!(DomainError::InvalidArgument("x".into()).is_client_error());
        assert!(DomainError::BusinessRule("x".into()).is_client_error());
        assert!(!DomainError::Storage("x".into()).is_client_error());
        assert!(!DomainError::NotFound {
            entity: "Booking",
            field: "id",
            value: "1".into()
        }
        .is_client_error());
    }

    #[test]
    fn messages_pass_through_unchanged() {
        let err = DomainError::BusinessRule("Booking cannot start before opening time".into());
        assert_eq!(err.to_string(), "Booking cannot start before opening time");
    }

    #[test]
    fn infra_errors_become_storage_errors() {
        let infra = InfraError::Database(sea_orm::DbErr::Custom("disk full".into()));
        let domain: DomainError = infra.into();
        assert_eq!(domain.kind(), "storage");
        assert!(domain.to_string().contains("disk full"));
    }
}

//! Store error types
//!
//! Errors raised inside the storage layer. They are translated to
//! [`PortError`] at the port boundary so the domain never sees them.

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found
    #[error("Entity not found: {entity} with id '{id}'")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Referenced entity does not exist
    #[error("Foreign key violation on {field}: {message}")]
    ForeignKeyViolation { message: String, field: String },

    /// Commit or rollback could not complete
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}

impl StoreError {
    /// Creates a not found error for a specific entity type and identifier
    ///
    /// # Example
    ///
    /// ```rust
    /// use infra_db::StoreError;
    ///
    /// let error = StoreError::not_found("Policy", "POL-123");
    /// assert!(error.to_string().contains("Policy"));
    /// ```
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        StoreError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Creates a duplicate entry error
    pub fn duplicate(entity: &str, id: impl std::fmt::Display) -> Self {
        StoreError::DuplicateEntry(format!("{} with id '{}' already exists", entity, id))
    }

    /// Creates a foreign key error for a missing referenced entity
    pub fn missing_reference(field: &str, entity: &str, id: impl std::fmt::Display) -> Self {
        StoreError::ForeignKeyViolation {
            message: format!("{} '{}' does not exist", entity, id),
            field: field.to_string(),
        }
    }

    /// Checks if this error indicates a record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Checks if this error is a constraint violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StoreError::DuplicateEntry(_) | StoreError::ForeignKeyViolation { .. }
        )
    }
}

impl From<StoreError> for PortError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { entity, id } => PortError::NotFound {
                entity_type: entity,
                id,
            },
            StoreError::DuplicateEntry(msg) => PortError::conflict(msg),
            StoreError::ForeignKeyViolation { message, field } => {
                PortError::validation_field(message, field)
            }
            StoreError::TransactionFailed(msg) => PortError::internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_port_not_found() {
        let port: PortError = StoreError::not_found("Invoice", "INV-1").into();
        assert!(port.is_not_found());
    }

    #[test]
    fn test_constraint_violations() {
        assert!(StoreError::duplicate("Invoice", "INV-1").is_constraint_violation());
        assert!(StoreError::missing_reference("policy_id", "Policy", "POL-1").is_constraint_violation());
        assert!(!StoreError::not_found("Policy", "POL-1").is_constraint_violation());
    }

    #[test]
    fn test_foreign_key_maps_to_validation_field() {
        let port: PortError = StoreError::missing_reference("contact_id", "Contact", "CNT-1").into();
        assert!(matches!(
            port,
            PortError::Validation { field: Some(ref f), .. } if f == "contact_id"
        ));
    }
}

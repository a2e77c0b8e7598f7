//! Policy domain errors
//!
//! This module defines all error types that can occur within the
//! policy domain.

use thiserror::Error;

/// Errors that can occur in the policy domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// Billing schedule label is not recognized
    #[error("Invalid billing schedule: {0}")]
    InvalidSchedule(String),

    /// Status label is not recognized, or not valid for the operation
    #[error("Invalid policy status: {0}")]
    InvalidStatus(String),

    /// Cancellation reason label is not recognized
    #[error("Invalid cancellation reason: {0}")]
    InvalidReason(String),

    /// Required field is missing
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl PolicyError {
    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PolicyError::Validation(message.into())
    }
}

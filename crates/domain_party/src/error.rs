//! Party domain errors

use thiserror::Error;

/// Errors that can occur in the party domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartyError {
    /// Role label is not one of the recognized roles
    #[error("Unknown contact role: {0}")]
    UnknownRole(String),

    /// Invalid contact data provided
    #[error("Invalid contact data: {0}")]
    InvalidData(String),
}

impl PartyError {
    /// Creates an InvalidData error with a message
    pub fn invalid(message: impl Into<String>) -> Self {
        PartyError::InvalidData(message.into())
    }
}

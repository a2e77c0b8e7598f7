//! Core error types used across the system

use thiserror::Error;
use crate::money::MoneyError;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),
}

impl CoreError {
    pub fn date_out_of_range(message: impl Into<String>) -> Self {
        CoreError::DateOutOfRange(message.into())
    }
}

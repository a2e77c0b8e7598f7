//! Billing domain errors

use thiserror::Error;

use core_kernel::{ContactId, CoreError, MoneyError, PolicyId, PortError};
use domain_policy::PolicyError;

/// Errors that can occur in the billing domain
///
/// Every variant is recoverable: the operation that produced it has left
/// the policy, its invoices and its payments exactly as they were.
#[derive(Debug, Error)]
pub enum BillingError {
    /// Billing schedule is not one of Annual, Two-Pay, Quarterly, Monthly
    #[error("Invalid billing schedule: {0}")]
    InvalidSchedule(String),

    /// Cancellation status is not Canceled or Expired
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// Cancellation reason is not Fraud, Non-Payment or Underwriting
    #[error("Invalid reason: {0}")]
    InvalidReason(String),

    /// Only an agent may pay while the policy is pending cancellation
    #[error("Contact {contact_id} is not authorized to pay policy {policy_id} while it is pending cancellation; an agent is required")]
    PaymentNotAuthorized {
        policy_id: PolicyId,
        contact_id: ContactId,
    },

    /// The payer could not be determined
    #[error("Cannot resolve payer: {0}")]
    ContactResolution(String),

    /// Payment amount is zero or negative
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Invoice term configuration would violate date ordering
    #[error("Invalid invoice terms: {0}")]
    InvalidTerms(String),

    /// Policy not found in the store
    #[error("Policy not found: {0}")]
    PolicyNotFound(String),

    /// Money arithmetic failed
    #[error("Calculation error: {0}")]
    Money(#[from] MoneyError),

    /// Date arithmetic failed
    #[error("Date calculation error: {0}")]
    Calendar(#[from] CoreError),

    /// Policy record rejected the change
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    /// The backing store failed
    #[error("Store error: {0}")]
    Store(#[from] PortError),
}

impl BillingError {
    /// Returns true if the operation was refused on business grounds, as
    /// opposed to failing in arithmetic or storage
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            BillingError::InvalidSchedule(_)
                | BillingError::InvalidStatus(_)
                | BillingError::InvalidReason(_)
                | BillingError::PaymentNotAuthorized { .. }
                | BillingError::ContactResolution(_)
                | BillingError::InvalidAmount(_)
        )
    }
}

//! Payment records
//!
//! Payments are credited to the policy account as a whole, never to a
//! particular invoice. Once stored they are never modified.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{ContactId, Money, PaymentId, PolicyId};

use crate::error::BillingError;

/// A payment received against a policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    id: PaymentId,
    /// Policy credited
    policy_id: PolicyId,
    /// Contact who paid
    contact_id: ContactId,
    /// Amount received
    amount_paid: Money,
    /// Date the payment was made
    transaction_date: NaiveDate,
}

impl Payment {
    /// Records a payment
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if `amount_paid` is zero or negative
    pub fn new(
        policy_id: PolicyId,
        contact_id: ContactId,
        amount_paid: Money,
        transaction_date: NaiveDate,
    ) -> Result<Self, BillingError> {
        if !amount_paid.is_positive() {
            return Err(BillingError::InvalidAmount(format!(
                "payment must be positive, got {}",
                amount_paid
            )));
        }

        Ok(Self {
            id: PaymentId::new_v7(),
            policy_id,
            contact_id,
            amount_paid,
            transaction_date,
        })
    }

    pub fn id(&self) -> PaymentId {
        self.id
    }

    pub fn policy_id(&self) -> PolicyId {
        self.policy_id
    }

    pub fn contact_id(&self) -> ContactId {
        self.contact_id
    }

    pub fn amount_paid(&self) -> Money {
        self.amount_paid
    }

    pub fn transaction_date(&self) -> NaiveDate {
        self.transaction_date
    }
}

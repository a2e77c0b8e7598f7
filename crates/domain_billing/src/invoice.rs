//! Installment invoices
//!
//! An invoice bills one installment of a policy's annual premium. Its three
//! dates are fixed at creation from the bill date and the [`InvoiceTerms`];
//! afterwards the only change an invoice ever sees is being soft-deleted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{add_days, add_months, InvoiceId, Money, PolicyId};

use crate::error::BillingError;
use crate::terms::InvoiceTerms;

/// A single billed installment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier
    id: InvoiceId,
    /// Policy being billed
    policy_id: PolicyId,
    /// Date the installment is billed
    bill_date: NaiveDate,
    /// Date payment is due
    due_date: NaiveDate,
    /// Date after which unpaid balance warrants cancellation
    cancel_date: NaiveDate,
    /// Installment amount
    amount_due: Money,
    /// Superseded by a schedule change or cancellation
    deleted: bool,
}

impl Invoice {
    /// Creates an invoice billed on `bill_date`
    ///
    /// # Arguments
    ///
    /// * `policy_id` - Policy being billed
    /// * `bill_date` - Date the installment is billed
    /// * `amount_due` - Installment amount
    /// * `terms` - Offsets used to derive the due and cancel dates
    ///
    /// # Errors
    ///
    /// Returns `Calendar` if a derived date falls outside the supported range
    pub fn new(
        policy_id: PolicyId,
        bill_date: NaiveDate,
        amount_due: Money,
        terms: &InvoiceTerms,
    ) -> Result<Self, BillingError> {
        let due_date = add_months(bill_date, terms.due_months)?;
        let cancel_date = add_days(due_date, terms.grace_days)?;

        Ok(Self {
            id: InvoiceId::new_v7(),
            policy_id,
            bill_date,
            due_date,
            cancel_date,
            amount_due,
            deleted: false,
        })
    }

    pub fn id(&self) -> InvoiceId {
        self.id
    }

    pub fn policy_id(&self) -> PolicyId {
        self.policy_id
    }

    pub fn bill_date(&self) -> NaiveDate {
        self.bill_date
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn cancel_date(&self) -> NaiveDate {
        self.cancel_date
    }

    pub fn amount_due(&self) -> Money {
        self.amount_due
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Returns true if the invoice still counts toward the balance
    pub fn is_active(&self) -> bool {
        !self.deleted
    }

    /// Marks the invoice as superseded; it is kept for history
    pub fn soft_delete(&mut self) {
        self.deleted = true;
    }

    /// Returns true if `date` lies strictly between the due and cancel dates
    pub fn is_in_grace_period(&self, date: NaiveDate) -> bool {
        self.due_date < date && date < self.cancel_date
    }

    /// Returns true if the cancel date has been reached
    pub fn is_past_cancel_date(&self, date: NaiveDate) -> bool {
        self.cancel_date <= date
    }

    /// Returns true if a payment on `date` counts as on time for this invoice
    pub fn is_on_time(&self, date: NaiveDate) -> bool {
        self.bill_date <= date && date <= self.due_date
    }
}

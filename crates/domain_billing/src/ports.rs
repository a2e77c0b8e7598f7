//! Billing Domain Ports
//!
//! This module defines the storage port the billing engine needs. Policies,
//! contacts, invoices and payments all live behind it so the engine can run
//! against the in-memory adapter in `infra_db` or any other store.
//!
//! # Units of work
//!
//! Writes (`create_*`, `update_*`) are staged. Reads made through the same
//! store see staged writes. `commit` makes every staged write durable at
//! once; `rollback` discards them all. The engine commits exactly once per
//! successful mutating operation and rolls back on any failure.
//!
//! ```rust,ignore
//! store.update_invoice(&superseded)?;
//! store.create_invoice(&replacement)?;
//! store.commit()?;
//! ```

use chrono::NaiveDate;

use core_kernel::{ContactId, DomainPort, InvoiceId, PolicyId, PortError};
use domain_party::Contact;
use domain_policy::Policy;

use crate::invoice::Invoice;
use crate::payment::Payment;

/// Query parameters for listing invoices
#[derive(Debug, Clone, Default)]
pub struct InvoiceQuery {
    /// Filter by policy
    pub policy_id: Option<PolicyId>,
    /// Include soft-deleted invoices
    pub include_deleted: bool,
    /// Only invoices billed on or before this date
    pub billed_on_or_before: Option<NaiveDate>,
    /// Only invoices whose cancel date is on or before this date
    pub cancel_on_or_before: Option<NaiveDate>,
}

impl InvoiceQuery {
    /// Creates a query for the active invoices of a policy
    pub fn for_policy(policy_id: PolicyId) -> Self {
        Self {
            policy_id: Some(policy_id),
            ..Default::default()
        }
    }

    /// Includes soft-deleted invoices in the results
    pub fn with_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    /// Restricts to invoices billed on or before `date`
    pub fn billed_on_or_before(mut self, date: NaiveDate) -> Self {
        self.billed_on_or_before = Some(date);
        self
    }

    /// Restricts to invoices whose cancel date is on or before `date`
    pub fn cancel_on_or_before(mut self, date: NaiveDate) -> Self {
        self.cancel_on_or_before = Some(date);
        self
    }

    /// Returns true if `invoice` satisfies every filter
    pub fn matches(&self, invoice: &Invoice) -> bool {
        self.policy_id.map_or(true, |id| invoice.policy_id() == id)
            && (self.include_deleted || invoice.is_active())
            && self.billed_on_or_before.map_or(true, |d| invoice.bill_date() <= d)
            && self.cancel_on_or_before.map_or(true, |d| invoice.is_past_cancel_date(d))
    }
}

/// Query parameters for listing payments
#[derive(Debug, Clone, Default)]
pub struct PaymentQuery {
    /// Filter by policy
    pub policy_id: Option<PolicyId>,
    /// Only payments made on or before this date
    pub on_or_before: Option<NaiveDate>,
}

impl PaymentQuery {
    /// Creates a query for every payment on a policy
    pub fn for_policy(policy_id: PolicyId) -> Self {
        Self {
            policy_id: Some(policy_id),
            ..Default::default()
        }
    }

    /// Restricts to payments made on or before `date`
    pub fn on_or_before(mut self, date: NaiveDate) -> Self {
        self.on_or_before = Some(date);
        self
    }

    /// Returns true if `payment` satisfies every filter
    pub fn matches(&self, payment: &Payment) -> bool {
        self.policy_id.map_or(true, |id| payment.policy_id() == id)
            && self.on_or_before.map_or(true, |d| payment.transaction_date() <= d)
    }
}

/// The storage port for the billing engine
///
/// All methods return `Result<T, PortError>` so adapters report failures
/// the same way regardless of what backs them.
pub trait BillingStore: DomainPort {
    /// Retrieves a policy by ID
    ///
    /// # Returns
    ///
    /// The policy if found, or `PortError::NotFound`
    fn get_policy(&self, id: PolicyId) -> Result<Policy, PortError>;

    /// Stages an update to an existing policy
    fn update_policy(&mut self, policy: &Policy) -> Result<(), PortError>;

    /// Retrieves a contact by ID
    ///
    /// # Returns
    ///
    /// The contact if found, or `PortError::NotFound`
    fn get_contact(&self, id: ContactId) -> Result<Contact, PortError>;

    /// Lists invoices matching the query, ordered by bill date
    fn list_invoices(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>, PortError>;

    /// Stages a new invoice
    ///
    /// Returns `PortError::Conflict` if an invoice with the same ID exists
    fn create_invoice(&mut self, invoice: &Invoice) -> Result<InvoiceId, PortError>;

    /// Stages an update to an existing invoice
    fn update_invoice(&mut self, invoice: &Invoice) -> Result<(), PortError>;

    /// Lists payments matching the query, ordered by transaction date
    fn list_payments(&self, query: &PaymentQuery) -> Result<Vec<Payment>, PortError>;

    /// Stages a new payment
    fn create_payment(&mut self, payment: &Payment) -> Result<(), PortError>;

    /// Makes every staged write durable
    fn commit(&mut self) -> Result<(), PortError>;

    /// Discards every staged write
    fn rollback(&mut self) -> Result<(), PortError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{Currency, Money};
    use rust_decimal_macros::dec;

    use crate::terms::InvoiceTerms;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_invoice_query_filters() {
        let policy_id = PolicyId::new();
        let mut invoice = Invoice::new(
            policy_id,
            date(2015, 4, 1),
            Money::new(dec!(300), Currency::USD),
            &InvoiceTerms::default(),
        )
        .unwrap();

        assert!(InvoiceQuery::for_policy(policy_id).matches(&invoice));
        assert!(!InvoiceQuery::for_policy(PolicyId::new()).matches(&invoice));
        assert!(!InvoiceQuery::for_policy(policy_id)
            .billed_on_or_before(date(2015, 3, 31))
            .matches(&invoice));
        assert!(InvoiceQuery::for_policy(policy_id)
            .cancel_on_or_before(date(2015, 5, 15))
            .matches(&invoice));

        invoice.soft_delete();
        assert!(!InvoiceQuery::for_policy(policy_id).matches(&invoice));
        assert!(InvoiceQuery::for_policy(policy_id).with_deleted().matches(&invoice));
    }

    #[test]
    fn test_payment_query_cutoff() {
        let policy_id = PolicyId::new();
        let payment = Payment::new(
            policy_id,
            ContactId::new(),
            Money::new(dec!(400), Currency::USD),
            date(2015, 2, 1),
        )
        .unwrap();

        assert!(PaymentQuery::for_policy(policy_id)
            .on_or_before(date(2015, 2, 1))
            .matches(&payment));
        assert!(!PaymentQuery::for_policy(policy_id)
            .on_or_before(date(2015, 1, 31))
            .matches(&payment));
    }
}

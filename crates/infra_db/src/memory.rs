//! In-memory billing store
//!
//! [`InMemoryStore`] keeps committed tables plus an optional staged copy.
//! The first write after a commit or rollback opens the staged copy; reads
//! always go to the staged copy when there is one, so a unit of work sees
//! its own writes. `commit` swaps the staged copy in, `rollback` drops it.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut store = InMemoryStore::new();
//! store.insert_contact(agent)?;
//! store.insert_policy(policy)?;
//! store.commit()?;
//!
//! let accounting = PolicyAccounting::new(&mut store, policy_id)?;
//! ```

use std::collections::HashMap;

use core_kernel::{ContactId, DomainPort, InvoiceId, PolicyId, PortError};
use domain_billing::{BillingStore, Invoice, InvoiceQuery, Payment, PaymentQuery};
use domain_party::Contact;
use domain_policy::Policy;

use crate::error::StoreError;

#[derive(Debug, Clone, Default)]
struct Tables {
    policies: HashMap<PolicyId, Policy>,
    contacts: HashMap<ContactId, Contact>,
    invoices: HashMap<InvoiceId, Invoice>,
    payments: Vec<Payment>,
}

/// Unit-of-work store held entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    committed: Tables,
    staged: Option<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are uncommitted writes
    pub fn has_staged_writes(&self) -> bool {
        self.staged.is_some()
    }

    /// Stages a new contact
    pub fn insert_contact(&mut self, contact: Contact) -> Result<ContactId, StoreError> {
        let id = contact.id;
        let tables = self.staging();
        if tables.contacts.contains_key(&id) {
            return Err(StoreError::duplicate("Contact", id));
        }
        tables.contacts.insert(id, contact);
        Ok(id)
    }

    /// Stages a new policy
    ///
    /// # Errors
    ///
    /// Returns `ForeignKeyViolation` if the named insured or agent is not a
    /// known contact
    pub fn insert_policy(&mut self, policy: Policy) -> Result<PolicyId, StoreError> {
        let id = policy.id();
        let tables = self.staging();
        if tables.policies.contains_key(&id) {
            return Err(StoreError::duplicate("Policy", id));
        }
        for (field, contact_id) in [("named_insured", policy.named_insured()), ("agent", policy.agent())] {
            if let Some(contact_id) = contact_id {
                if !tables.contacts.contains_key(&contact_id) {
                    return Err(StoreError::missing_reference(field, "Contact", contact_id));
                }
            }
        }
        tables.policies.insert(id, policy);
        Ok(id)
    }

    fn view(&self) -> &Tables {
        self.staged.as_ref().unwrap_or(&self.committed)
    }

    fn staging(&mut self) -> &mut Tables {
        let committed = &self.committed;
        self.staged.get_or_insert_with(|| committed.clone())
    }

    fn require_policy(tables: &Tables, policy_id: PolicyId) -> Result<(), StoreError> {
        if tables.policies.contains_key(&policy_id) {
            Ok(())
        } else {
            Err(StoreError::missing_reference("policy_id", "Policy", policy_id))
        }
    }
}

impl DomainPort for InMemoryStore {}

impl BillingStore for InMemoryStore {
    fn get_policy(&self, id: PolicyId) -> Result<Policy, PortError> {
        self.view()
            .policies
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Policy", id).into())
    }

    fn update_policy(&mut self, policy: &Policy) -> Result<(), PortError> {
        let tables = self.staging();
        let slot = tables
            .policies
            .get_mut(&policy.id())
            .ok_or_else(|| StoreError::not_found("Policy", policy.id()))?;
        *slot = policy.clone();
        Ok(())
    }

    fn get_contact(&self, id: ContactId) -> Result<Contact, PortError> {
        self.view()
            .contacts
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Contact", id).into())
    }

    fn list_invoices(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>, PortError> {
        let mut invoices: Vec<_> = self
            .view()
            .invoices
            .values()
            .filter(|invoice| query.matches(invoice))
            .cloned()
            .collect();
        invoices.sort_by_key(|invoice| (invoice.bill_date(), invoice.id()));
        Ok(invoices)
    }

    fn create_invoice(&mut self, invoice: &Invoice) -> Result<InvoiceId, PortError> {
        let tables = self.staging();
        Self::require_policy(tables, invoice.policy_id())?;
        if tables.invoices.contains_key(&invoice.id()) {
            return Err(StoreError::duplicate("Invoice", invoice.id()).into());
        }
        tables.invoices.insert(invoice.id(), invoice.clone());
        Ok(invoice.id())
    }

    fn update_invoice(&mut self, invoice: &Invoice) -> Result<(), PortError> {
        let tables = self.staging();
        let slot = tables
            .invoices
            .get_mut(&invoice.id())
            .ok_or_else(|| StoreError::not_found("Invoice", invoice.id()))?;
        *slot = invoice.clone();
        Ok(())
    }

    fn list_payments(&self, query: &PaymentQuery) -> Result<Vec<Payment>, PortError> {
        let mut payments: Vec<_> = self
            .view()
            .payments
            .iter()
            .filter(|payment| query.matches(payment))
            .cloned()
            .collect();
        payments.sort_by_key(Payment::transaction_date);
        Ok(payments)
    }

    fn create_payment(&mut self, payment: &Payment) -> Result<(), PortError> {
        let tables = self.staging();
        Self::require_policy(tables, payment.policy_id())?;
        if !tables.contacts.contains_key(&payment.contact_id()) {
            return Err(
                StoreError::missing_reference("contact_id", "Contact", payment.contact_id()).into(),
            );
        }
        tables.payments.push(payment.clone());
        Ok(())
    }

    fn commit(&mut self) -> Result<(), PortError> {
        if let Some(staged) = self.staged.take() {
            self.committed = staged;
            tracing::debug!(
                policies = self.committed.policies.len(),
                invoices = self.committed.invoices.len(),
                payments = self.committed.payments.len(),
                "Store committed"
            );
        }
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), PortError> {
        if self.staged.take().is_some() {
            tracing::debug!("Store rolled back");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::{Currency, Money};
    use domain_policy::{BillingSchedule, PolicyBuilder};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store_with_policy() -> (InMemoryStore, Policy, Contact) {
        let mut store = InMemoryStore::new();
        let insured = Contact::named_insured("Anna White").unwrap();
        let policy = PolicyBuilder::new()
            .name("Policy Two")
            .effective_date(date(2015, 2, 1))
            .annual_premium(Money::new(dec!(1600), Currency::USD))
            .billing_schedule(BillingSchedule::Quarterly)
            .named_insured(insured.id)
            .build()
            .unwrap();
        store.insert_contact(insured.clone()).unwrap();
        store.insert_policy(policy.clone()).unwrap();
        store.commit().unwrap();
        (store, policy, insured)
    }

    fn invoice(policy: &Policy, bill_date: NaiveDate) -> Invoice {
        Invoice::new(
            policy.id(),
            bill_date,
            Money::new(dec!(400), Currency::USD),
            &Default::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_reads_see_staged_writes() {
        let (mut store, policy, _) = store_with_policy();
        store.create_invoice(&invoice(&policy, date(2015, 2, 1))).unwrap();

        assert!(store.has_staged_writes());
        assert_eq!(store.list_invoices(&InvoiceQuery::for_policy(policy.id())).unwrap().len(), 1);
    }

    #[test]
    fn test_rollback_discards_staged_writes() {
        let (mut store, policy, _) = store_with_policy();
        store.create_invoice(&invoice(&policy, date(2015, 2, 1))).unwrap();
        store.rollback().unwrap();

        assert!(!store.has_staged_writes());
        assert!(store.list_invoices(&InvoiceQuery::for_policy(policy.id())).unwrap().is_empty());
    }

    #[test]
    fn test_commit_publishes_writes() {
        let (mut store, policy, _) = store_with_policy();
        let mut first = invoice(&policy, date(2015, 5, 1));
        store.create_invoice(&first).unwrap();
        store.create_invoice(&invoice(&policy, date(2015, 2, 1))).unwrap();
        store.commit().unwrap();

        first.soft_delete();
        store.update_invoice(&first).unwrap();
        store.commit().unwrap();

        let active = store.list_invoices(&InvoiceQuery::for_policy(policy.id())).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].bill_date(), date(2015, 2, 1));

        let all = store
            .list_invoices(&InvoiceQuery::for_policy(policy.id()).with_deleted())
            .unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].bill_date() < all[1].bill_date());
    }

    #[test]
    fn test_invoice_for_unknown_policy_rejected() {
        let (mut store, policy, _) = store_with_policy();
        let orphan = Invoice::new(
            PolicyId::new(),
            date(2015, 1, 1),
            policy.annual_premium(),
            &Default::default(),
        )
        .unwrap();

        let result = store.create_invoice(&orphan);
        assert!(matches!(result, Err(PortError::Validation { .. })));
    }

    #[test]
    fn test_duplicate_invoice_conflicts() {
        let (mut store, policy, _) = store_with_policy();
        let invoice = invoice(&policy, date(2015, 2, 1));
        store.create_invoice(&invoice).unwrap();

        assert!(matches!(store.create_invoice(&invoice), Err(PortError::Conflict { .. })));
    }

    #[test]
    fn test_payment_requires_known_contact() {
        let (mut store, policy, insured) = store_with_policy();
        let amount = Money::new(dec!(400), Currency::USD);

        let stranger = Payment::new(policy.id(), ContactId::new(), amount, date(2015, 2, 1)).unwrap();
        assert!(store.create_payment(&stranger).is_err());

        let payment = Payment::new(policy.id(), insured.id, amount, date(2015, 2, 1)).unwrap();
        store.create_payment(&payment).unwrap();
        store.commit().unwrap();

        let payments = store.list_payments(&PaymentQuery::for_policy(policy.id())).unwrap();
        assert_eq!(payments, vec![payment]);
    }

    #[test]
    fn test_policy_requires_known_contacts() {
        let mut store = InMemoryStore::new();
        let policy = PolicyBuilder::new()
            .name("Orphan")
            .effective_date(date(2015, 1, 1))
            .annual_premium(Money::new(dec!(100), Currency::USD))
            .agent(ContactId::new())
            .build()
            .unwrap();

        let result = store.insert_policy(policy);
        assert!(matches!(result, Err(StoreError::ForeignKeyViolation { .. })));
    }

    #[test]
    fn test_get_unknown_policy() {
        let store = InMemoryStore::new();
        let result = store.get_policy(PolicyId::new());
        assert!(matches!(result, Err(ref e) if e.is_not_found()));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use core_kernel::{Currency, Money};
    use domain_policy::PolicyBuilder;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn listed_invoices_are_ordered_by_bill_date(offsets in prop::collection::vec(0u64..720, 1..20)) {
            let mut store = InMemoryStore::new();
            let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
            let policy = PolicyBuilder::new()
                .name("Ordering")
                .effective_date(start)
                .annual_premium(Money::from_minor(10_000, Currency::USD))
                .build()
                .unwrap();
            let policy_id = store.insert_policy(policy).unwrap();

            for offset in &offsets {
                let invoice = Invoice::new(
                    policy_id,
                    start + Days::new(*offset),
                    Money::from_minor(100, Currency::USD),
                    &Default::default(),
                )
                .unwrap();
                store.create_invoice(&invoice).unwrap();
            }
            store.commit().unwrap();

            let invoices = store.list_invoices(&InvoiceQuery::for_policy(policy_id)).unwrap();
            prop_assert_eq!(invoices.len(), offsets.len());
            for pair in invoices.windows(2) {
                prop_assert!(pair[0].bill_date() <= pair[1].bill_date());
            }
        }
    }
}

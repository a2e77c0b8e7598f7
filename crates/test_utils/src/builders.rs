//! Test Data Builders
//!
//! [`ScenarioBuilder`] seeds an [`InMemoryStore`] with one policy, its
//! named insured and its agent, using the standard scenario values for
//! anything a test leaves unset.

use chrono::NaiveDate;
use core_kernel::{FixedClock, Money, PolicyId};
use domain_billing::{BillingStore, Invoice, InvoiceQuery, InvoiceTerms, Payment, PaymentQuery, PolicyAccounting};
use domain_party::Contact;
use domain_policy::{BillingSchedule, Policy, PolicyBuilder};
use infra_db::InMemoryStore;

use crate::fixtures::{DateFixtures, MoneyFixtures};

/// Builder for a single-policy test scenario
pub struct ScenarioBuilder {
    name: String,
    effective_date: NaiveDate,
    premium: Money,
    schedule: Option<BillingSchedule>,
    terms: InvoiceTerms,
    named_insured: bool,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioBuilder {
    /// Creates a builder for a quarterly 1200 USD policy effective 2015-01-01
    pub fn new() -> Self {
        Self {
            name: "Scenario Policy".to_string(),
            effective_date: DateFixtures::effective_date(),
            premium: MoneyFixtures::annual_premium(),
            schedule: Some(BillingSchedule::Quarterly),
            terms: InvoiceTerms::default(),
            named_insured: true,
        }
    }

    /// Sets the policy name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the effective date
    pub fn effective_date(mut self, date: NaiveDate) -> Self {
        self.effective_date = date;
        self
    }

    /// Sets the annual premium
    pub fn premium(mut self, premium: Money) -> Self {
        self.premium = premium;
        self
    }

    /// Sets the billing schedule
    pub fn schedule(mut self, schedule: BillingSchedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    /// Leaves the policy without a billing schedule
    pub fn without_schedule(mut self) -> Self {
        self.schedule = None;
        self
    }

    /// Leaves the policy without a named insured
    pub fn without_named_insured(mut self) -> Self {
        self.named_insured = false;
        self
    }

    /// Sets the invoice terms used by the scenario's engines
    pub fn terms(mut self, terms: InvoiceTerms) -> Self {
        self.terms = terms;
        self
    }

    /// Seeds and commits the store
    pub fn build(self) -> Scenario {
        let agent = Contact::agent("Bob Smith").expect("valid agent");
        let insured = Contact::named_insured("John Doe").expect("valid insured");

        let mut builder = PolicyBuilder::new()
            .name(self.name)
            .effective_date(self.effective_date)
            .annual_premium(self.premium)
            .agent(agent.id);
        if let Some(schedule) = self.schedule {
            builder = builder.billing_schedule(schedule);
        }
        if self.named_insured {
            builder = builder.named_insured(insured.id);
        }
        let policy = builder.build().expect("valid scenario policy");

        let mut store = InMemoryStore::new();
        store.insert_contact(agent.clone()).expect("agent inserted");
        store.insert_contact(insured.clone()).expect("insured inserted");
        let policy_id = store.insert_policy(policy).expect("policy inserted");
        store.commit().expect("scenario committed");

        Scenario {
            store,
            policy_id,
            agent,
            insured,
            terms: self.terms,
        }
    }
}

/// A seeded store plus the records a test needs to refer to
pub struct Scenario {
    pub store: InMemoryStore,
    pub policy_id: PolicyId,
    pub agent: Contact,
    pub insured: Contact,
    pub terms: InvoiceTerms,
}

impl Scenario {
    /// Opens an engine whose clock reads `today`
    pub fn accounting(&mut self, today: NaiveDate) -> PolicyAccounting<'_, InMemoryStore> {
        PolicyAccounting::open(
            &mut self.store,
            self.policy_id,
            self.terms,
            Box::new(FixedClock::new(today)),
        )
        .expect("scenario policy opens")
    }

    /// Returns the committed policy record
    pub fn policy(&self) -> Policy {
        self.store.get_policy(self.policy_id).expect("scenario policy exists")
    }

    /// Returns every invoice of the policy, deleted ones included
    pub fn all_invoices(&self) -> Vec<Invoice> {
        self.store
            .list_invoices(&InvoiceQuery::for_policy(self.policy_id).with_deleted())
            .expect("invoices listed")
    }

    /// Returns every payment on the policy
    pub fn payments(&self) -> Vec<Payment> {
        self.store
            .list_payments(&PaymentQuery::for_policy(self.policy_id))
            .expect("payments listed")
    }
}

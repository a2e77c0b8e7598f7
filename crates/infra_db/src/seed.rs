//! Demo data
//!
//! Loads the three sample policies used by the report binary and by the
//! scenario tests, billing each of them through the accounting engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use core_kernel::{ContactId, Currency, Money, PolicyId, PortError, SystemClock};
use domain_billing::{BillingError, BillingStore, InvoiceTerms, PolicyAccounting};
use domain_party::{Contact, PartyError};
use domain_policy::{BillingSchedule, PolicyBuilder, PolicyError};

use crate::error::StoreError;
use crate::memory::InMemoryStore;

/// Errors that can occur while loading demo data
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Invalid contact: {0}")]
    Party(#[from] PartyError),

    #[error("Invalid policy: {0}")]
    Policy(#[from] PolicyError),

    #[error("Billing failed: {0}")]
    Billing(#[from] BillingError),

    #[error("Store rejected demo data: {0}")]
    Store(#[from] StoreError),

    #[error("Commit failed: {0}")]
    Commit(#[from] PortError),

    #[error("Invalid demo date: {0}")]
    Date(String),
}

/// Identifiers of the records created by [`load_demo_data`]
#[derive(Debug, Clone, Copy)]
pub struct DemoData {
    pub john_doe_agent: ContactId,
    pub john_doe_insured: ContactId,
    pub bob_smith: ContactId,
    pub anna_white: ContactId,
    pub joe_lee: ContactId,
    pub ryan_bucket: ContactId,
    pub policy_one: PolicyId,
    pub policy_two: PolicyId,
    pub policy_three: PolicyId,
}

impl DemoData {
    /// Returns the policy ids in creation order
    pub fn policies(&self) -> [PolicyId; 3] {
        [self.policy_one, self.policy_two, self.policy_three]
    }
}

fn date(y: i32, m: u32, d: u32) -> Result<NaiveDate, SeedError> {
    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| SeedError::Date(format!("{}-{}-{}", y, m, d)))
}

/// Loads the demo contacts, policies, invoices and payment
///
/// Policy One is billed annually, Policy Two quarterly and Policy Three
/// monthly. Anna White has paid 400 toward Policy Two on 2015-02-01.
pub fn load_demo_data(
    store: &mut InMemoryStore,
    currency: Currency,
    terms: InvoiceTerms,
) -> Result<DemoData, SeedError> {
    let john_doe_agent = store.insert_contact(Contact::agent("John Doe")?)?;
    let john_doe_insured = store.insert_contact(Contact::named_insured("John Doe")?)?;
    let bob_smith = store.insert_contact(Contact::agent("Bob Smith")?)?;
    let anna_white = store.insert_contact(Contact::named_insured("Anna White")?)?;
    let joe_lee = store.insert_contact(Contact::agent("Joe Lee")?)?;
    let ryan_bucket = store.insert_contact(Contact::named_insured("Ryan Bucket")?)?;

    let policies: [(&str, NaiveDate, Decimal, BillingSchedule, ContactId, ContactId); 3] = [
        ("Policy One", date(2015, 1, 1)?, dec!(365), BillingSchedule::Annual, john_doe_insured, bob_smith),
        ("Policy Two", date(2015, 2, 1)?, dec!(1600), BillingSchedule::Quarterly, anna_white, joe_lee),
        ("Policy Three", date(2015, 1, 1)?, dec!(1200), BillingSchedule::Monthly, ryan_bucket, john_doe_agent),
    ];

    let mut ids = Vec::with_capacity(policies.len());
    for (name, effective_date, premium, schedule, insured, agent) in policies {
        let policy = PolicyBuilder::new()
            .name(name)
            .effective_date(effective_date)
            .annual_premium(Money::new(premium, currency))
            .billing_schedule(schedule)
            .named_insured(insured)
            .agent(agent)
            .build()?;
        ids.push(store.insert_policy(policy)?);
    }
    store.commit()?;

    for policy_id in &ids {
        PolicyAccounting::open(&mut *store, *policy_id, terms, Box::new(SystemClock))?;
    }

    let data = DemoData {
        john_doe_agent,
        john_doe_insured,
        bob_smith,
        anna_white,
        joe_lee,
        ryan_bucket,
        policy_one: ids[0],
        policy_two: ids[1],
        policy_three: ids[2],
    };

    let mut accounting =
        PolicyAccounting::open(&mut *store, data.policy_two, terms, Box::new(SystemClock))?;
    accounting.make_payment(
        Some(anna_white),
        Some(date(2015, 2, 1)?),
        Money::new(dec!(400), currency),
    )?;

    tracing::info!(
        contacts = 6,
        policies = ids.len(),
        currency = %currency,
        "Demo data loaded"
    );

    Ok(data)
}

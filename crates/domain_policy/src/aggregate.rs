//! Policy record
//!
//! The Policy is the unit the billing engine is bound to. Its status
//! fields only change through [`Policy::cancel`]; its schedule only through
//! [`Policy::set_billing_schedule`].
//!
//! # Invariants
//!
//! - The annual premium is strictly positive
//! - `cancel_date` is set exactly when the status is terminal

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{ContactId, Money, PolicyId};

use crate::error::PolicyError;
use crate::schedule::BillingSchedule;
use crate::status::{CancellationReason, PolicyStatus};

/// An insurance policy as seen by billing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Unique policy identifier
    id: PolicyId,
    /// Human-readable policy name
    name: String,
    /// Start of the premium term
    effective_date: NaiveDate,
    /// Premium for one annual term
    annual_premium: Money,
    /// Installment cadence; `None` until one has been chosen
    billing_schedule: Option<BillingSchedule>,
    /// Contact who normally pays
    named_insured: Option<ContactId>,
    /// Servicing agent
    agent: Option<ContactId>,
    /// Lifecycle status
    status: PolicyStatus,
    /// Reason recorded on cancellation or expiry
    status_code: Option<CancellationReason>,
    /// Free-form description recorded on cancellation or expiry
    status_desc: Option<String>,
    /// Date the policy was cancelled or expired
    cancel_date: Option<NaiveDate>,
}

impl Policy {
    /// Returns the policy ID
    pub fn id(&self) -> PolicyId {
        self.id
    }

    /// Returns the policy name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the effective date
    pub fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }

    /// Returns the annual premium
    pub fn annual_premium(&self) -> Money {
        self.annual_premium
    }

    /// Returns the billing schedule, if one has been chosen
    pub fn billing_schedule(&self) -> Option<BillingSchedule> {
        self.billing_schedule
    }

    /// Returns the named insured contact
    pub fn named_insured(&self) -> Option<ContactId> {
        self.named_insured
    }

    /// Returns the agent contact
    pub fn agent(&self) -> Option<ContactId> {
        self.agent
    }

    /// Returns the current status
    pub fn status(&self) -> PolicyStatus {
        self.status
    }

    /// Returns the recorded cancellation reason
    pub fn status_code(&self) -> Option<CancellationReason> {
        self.status_code
    }

    /// Returns the recorded status description
    pub fn status_desc(&self) -> Option<&str> {
        self.status_desc.as_deref()
    }

    /// Returns the cancellation or expiry date
    pub fn cancel_date(&self) -> Option<NaiveDate> {
        self.cancel_date
    }

    /// Checks if the policy is in force
    pub fn is_active(&self) -> bool {
        self.status == PolicyStatus::Active
    }

    /// Replaces the billing schedule
    pub fn set_billing_schedule(&mut self, schedule: BillingSchedule) {
        self.billing_schedule = Some(schedule);
    }

    /// Cancels or expires the policy
    ///
    /// A `None` description leaves any previously recorded description in
    /// place, so expiring a policy that was cancelled with a note keeps the
    /// note.
    ///
    /// # Arguments
    ///
    /// * `status` - `Canceled` or `Expired`
    /// * `reason` - Why the policy is ending
    /// * `description` - Optional free-form note
    /// * `date` - Effective date of the cancellation
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatus` if `status` is `Active`; the policy is left
    /// untouched.
    pub fn cancel(
        &mut self,
        status: PolicyStatus,
        reason: CancellationReason,
        description: Option<String>,
        date: NaiveDate,
    ) -> Result<(), PolicyError> {
        if !status.is_terminal() {
            return Err(PolicyError::InvalidStatus(status.to_string()));
        }

        self.status = status;
        self.status_code = Some(reason);
        self.cancel_date = Some(date);

        if let Some(description) = description {
            self.status_desc = Some(description);
        }

        tracing::debug!(
            policy_id = %self.id,
            status = %status,
            reason = %reason,
            cancel_date = %date,
            "Policy status updated"
        );

        Ok(())
    }
}

/// Builder for creating new policies
///
/// # Example
///
/// ```rust,ignore
/// let policy = PolicyBuilder::new()
///     .name("Policy One")
///     .effective_date(date(2015, 1, 1))
///     .annual_premium(Money::new(dec!(365), Currency::USD))
///     .billing_schedule(BillingSchedule::Annual)
///     .named_insured(john_doe_insured.id)
///     .agent(bob_smith.id)
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct PolicyBuilder {
    id: Option<PolicyId>,
    name: Option<String>,
    effective_date: Option<NaiveDate>,
    annual_premium: Option<Money>,
    billing_schedule: Option<BillingSchedule>,
    named_insured: Option<ContactId>,
    agent: Option<ContactId>,
}

impl PolicyBuilder {
    /// Creates a new policy builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a known identifier instead of generating one
    pub fn id(mut self, id: PolicyId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the policy name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the effective date
    pub fn effective_date(mut self, date: NaiveDate) -> Self {
        self.effective_date = Some(date);
        self
    }

    /// Sets the annual premium
    pub fn annual_premium(mut self, premium: Money) -> Self {
        self.annual_premium = Some(premium);
        self
    }

    /// Sets the billing schedule
    pub fn billing_schedule(mut self, schedule: BillingSchedule) -> Self {
        self.billing_schedule = Some(schedule);
        self
    }

    /// Sets the named insured
    pub fn named_insured(mut self, contact_id: ContactId) -> Self {
        self.named_insured = Some(contact_id);
        self
    }

    /// Sets the agent
    pub fn agent(mut self, contact_id: ContactId) -> Self {
        self.agent = Some(contact_id);
        self
    }

    /// Builds the policy in `Active` status
    ///
    /// # Errors
    ///
    /// Returns error if a required field is missing or the premium is not
    /// strictly positive
    pub fn build(self) -> Result<Policy, PolicyError> {
        let name = self.name
            .ok_or(PolicyError::MissingRequiredField("name".to_string()))?;
        let effective_date = self.effective_date
            .ok_or(PolicyError::MissingRequiredField("effective_date".to_string()))?;
        let annual_premium = self.annual_premium
            .ok_or(PolicyError::MissingRequiredField("annual_premium".to_string()))?;

        if !annual_premium.is_positive() {
            return Err(PolicyError::validation(format!(
                "annual premium must be positive, got {}",
                annual_premium
            )));
        }

        Ok(Policy {
            id: self.id.unwrap_or_else(PolicyId::new_v7),
            name,
            effective_date,
            annual_premium,
            billing_schedule: self.billing_schedule,
            named_insured: self.named_insured,
            agent: self.agent,
            status: PolicyStatus::Active,
            status_code: None,
            status_desc: None,
            cancel_date: None,
        })
    }
}

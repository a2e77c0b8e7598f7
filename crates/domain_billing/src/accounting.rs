//! Policy accounting engine
//!
//! A [`PolicyAccounting`] is bound to one policy for its lifetime. Opening
//! it materializes the policy's installment invoices if none were ever
//! generated; every other operation is invoked explicitly afterwards.
//!
//! Operations that take an optional date cursor evaluate as of the engine's
//! [`Clock`] when it is omitted. Each mutating operation runs as a single
//! unit of work against the [`BillingStore`]: it either commits every write
//! or rolls all of them back and returns the error.
//!
//! Concurrent engines on the same policy are not isolated from each other;
//! the store carries no version or lock on the policy record.

use chrono::NaiveDate;

use core_kernel::{Clock, ContactId, Money, MoneyError, PolicyId, SystemClock};
use domain_policy::{BillingSchedule, CancellationReason, Policy, PolicyStatus};

use crate::error::BillingError;
use crate::installments::generate_installments;
use crate::invoice::Invoice;
use crate::payment::Payment;
use crate::ports::{BillingStore, InvoiceQuery, PaymentQuery};
use crate::terms::InvoiceTerms;

/// Outcome of [`PolicyAccounting::change_billing_schedule`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleChange {
    /// The requested schedule is already in effect
    Unchanged,
    /// The old invoices were superseded by a fresh set
    Changed {
        /// Number of invoices soft-deleted
        superseded: usize,
        /// The newly generated invoices
        invoices: Vec<Invoice>,
    },
}

/// Billing engine for a single policy
pub struct PolicyAccounting<'s, S: BillingStore + ?Sized> {
    store: &'s mut S,
    policy: Policy,
    terms: InvoiceTerms,
    clock: Box<dyn Clock>,
}

impl<'s, S: BillingStore + ?Sized> PolicyAccounting<'s, S> {
    /// Opens the engine with default invoice terms and the system clock
    pub fn new(store: &'s mut S, policy_id: PolicyId) -> Result<Self, BillingError> {
        Self::open(store, policy_id, InvoiceTerms::default(), Box::new(SystemClock))
    }

    /// Opens the engine for `policy_id`
    ///
    /// If the policy has never had any invoices, they are generated and
    /// committed here. A policy without a usable billing schedule is still
    /// opened; the failed generation is logged and it simply has no
    /// invoices.
    ///
    /// # Errors
    ///
    /// Returns `PolicyNotFound` if the store has no such policy, or
    /// `InvalidTerms` if `terms` would break date ordering
    pub fn open(
        store: &'s mut S,
        policy_id: PolicyId,
        terms: InvoiceTerms,
        clock: Box<dyn Clock>,
    ) -> Result<Self, BillingError> {
        terms.validate()?;

        let policy = store.get_policy(policy_id).map_err(|e| {
            if e.is_not_found() {
                BillingError::PolicyNotFound(policy_id.to_string())
            } else {
                BillingError::Store(e)
            }
        })?;

        let mut accounting = Self {
            store,
            policy,
            terms,
            clock,
        };

        let history = accounting
            .store
            .list_invoices(&InvoiceQuery::for_policy(policy_id).with_deleted())?;

        if history.is_empty() {
            match accounting.make_invoices() {
                Ok(_) | Err(BillingError::InvalidSchedule(_)) => {}
                Err(e) => return Err(e),
            }
        }

        Ok(accounting)
    }

    /// Returns the policy as last committed by this engine
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Lists the policy's non-deleted invoices in bill-date order
    pub fn active_invoices(&self) -> Result<Vec<Invoice>, BillingError> {
        Ok(self
            .store
            .list_invoices(&InvoiceQuery::for_policy(self.policy.id()))?)
    }

    /// Generates and commits invoices for the current billing schedule
    ///
    /// # Errors
    ///
    /// Returns `InvalidSchedule` if the policy has no billing schedule; no
    /// invoices are written
    pub fn make_invoices(&mut self) -> Result<Vec<Invoice>, BillingError> {
        let invoices =
            generate_installments(&self.policy, &self.terms).map_err(|e| self.refuse(e))?;

        in_unit_of_work(&mut *self.store, |store| {
            for invoice in &invoices {
                store.create_invoice(invoice)?;
            }
            Ok(())
        })?;

        tracing::info!(
            policy_id = %self.policy.id(),
            count = invoices.len(),
            "Invoices created"
        );

        Ok(invoices)
    }

    /// Returns the account balance as of `date_cursor`
    ///
    /// The balance is everything billed on or before the date minus
    /// everything paid on or before it. It is negative when the account is
    /// overpaid.
    pub fn return_account_balance(
        &self,
        date_cursor: Option<NaiveDate>,
    ) -> Result<Money, BillingError> {
        self.balance_as_of(self.resolve_date(date_cursor))
    }

    /// Records a payment against the policy
    ///
    /// The payer defaults to the policy's named insured. While the policy is
    /// pending cancellation for non-payment only an agent may pay.
    ///
    /// # Errors
    ///
    /// * `ContactResolution` - no payer given and no named insured on file,
    ///   or the payer is not a known contact
    /// * `PaymentNotAuthorized` - pending cancellation and payer is not an agent
    /// * `InvalidAmount` - amount is zero or negative
    /// * `Money` - amount is not in the policy's currency
    pub fn make_payment(
        &mut self,
        contact_id: Option<ContactId>,
        date_cursor: Option<NaiveDate>,
        amount: Money,
    ) -> Result<Payment, BillingError> {
        let date = self.resolve_date(date_cursor);
        let policy_id = self.policy.id();

        let contact_id = match contact_id.or_else(|| self.policy.named_insured()) {
            Some(id) => id,
            None => {
                return Err(self.refuse(BillingError::ContactResolution(format!(
                    "policy {} has no named insured",
                    policy_id
                ))))
            }
        };

        let currency = self.policy.annual_premium().currency();
        if amount.currency() != currency {
            return Err(BillingError::Money(MoneyError::CurrencyMismatch(
                currency.to_string(),
                amount.currency().to_string(),
            )));
        }

        let payment =
            Payment::new(policy_id, contact_id, amount, date).map_err(|e| self.refuse(e))?;

        let contact = self.store.get_contact(contact_id).map_err(|e| {
            if e.is_not_found() {
                self.refuse(BillingError::ContactResolution(format!(
                    "contact {} not found",
                    contact_id
                )))
            } else {
                BillingError::Store(e)
            }
        })?;

        if !contact.is_agent() && self.evaluate_cancellation_pending_due_to_non_pay(Some(date))? {
            return Err(self.refuse(BillingError::PaymentNotAuthorized {
                policy_id,
                contact_id,
            }));
        }

        in_unit_of_work(&mut *self.store, |store| Ok(store.create_payment(&payment)?))?;

        tracing::info!(
            policy_id = %policy_id,
            payment_id = %payment.id(),
            contact_id = %contact_id,
            amount = %amount,
            transaction_date = %date,
            "Payment recorded"
        );

        Ok(payment)
    }

    /// Returns true if the policy is pending cancellation for non-payment
    ///
    /// That is the case when some active invoice received no payment between
    /// its bill and due dates and `date_cursor` falls strictly inside its
    /// grace period. Any payment in the window counts, whatever its amount.
    pub fn evaluate_cancellation_pending_due_to_non_pay(
        &self,
        date_cursor: Option<NaiveDate>,
    ) -> Result<bool, BillingError> {
        let date = self.resolve_date(date_cursor);
        let policy_id = self.policy.id();
        let payments = self.store.list_payments(&PaymentQuery::for_policy(policy_id))?;

        for invoice in self.active_invoices()? {
            if !invoice.is_in_grace_period(date) {
                continue;
            }

            let paid_on_time = payments
                .iter()
                .any(|payment| invoice.is_on_time(payment.transaction_date()));

            if !paid_on_time {
                tracing::debug!(
                    policy_id = %policy_id,
                    invoice_id = %invoice.id(),
                    date = %date,
                    "Invoice unpaid within grace period"
                );
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Returns true if the policy should be cancelled for non-payment
    ///
    /// Checks every active invoice whose cancel date is on or before
    /// `date_cursor`; the policy should cancel if the balance was still
    /// positive on any of those cancel dates.
    pub fn evaluate_cancel(&self, date_cursor: Option<NaiveDate>) -> Result<bool, BillingError> {
        let date = self.resolve_date(date_cursor);
        let invoices = self.store.list_invoices(
            &InvoiceQuery::for_policy(self.policy.id()).cancel_on_or_before(date),
        )?;

        for invoice in invoices {
            let balance = self.balance_as_of(invoice.cancel_date())?;
            if balance.is_positive() {
                tracing::debug!(
                    policy_id = %self.policy.id(),
                    invoice_id = %invoice.id(),
                    balance = %balance,
                    "Balance outstanding past cancel date"
                );
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Cancels or expires the policy and soft-deletes its invoices
    ///
    /// `description` replaces the recorded status description only when
    /// given.
    ///
    /// # Arguments
    ///
    /// * `status` - `"Canceled"` or `"Expired"`
    /// * `status_code` - `"Fraud"`, `"Non-Payment"` or `"Underwriting"`
    /// * `description` - Optional free-form note
    /// * `date_cursor` - Cancellation date, today if omitted
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatus` or `InvalidReason` for unrecognized input;
    /// nothing is changed in that case
    pub fn cancel_policy(
        &mut self,
        status: &str,
        status_code: &str,
        description: Option<&str>,
        date_cursor: Option<NaiveDate>,
    ) -> Result<(), BillingError> {
        let status = match status.parse::<PolicyStatus>() {
            Ok(parsed) if parsed.is_terminal() => parsed,
            _ => return Err(self.refuse(BillingError::InvalidStatus(status.to_string()))),
        };
        let reason = status_code
            .parse::<CancellationReason>()
            .map_err(|_| self.refuse(BillingError::InvalidReason(status_code.to_string())))?;

        let date = self.resolve_date(date_cursor);

        if self.evaluate_cancel(Some(date))? {
            tracing::warn!(
                policy_id = %self.policy.id(),
                "Policy has one or more invoices unpaid past their cancel date and should be cancelled"
            );
        }

        let mut policy = self.policy.clone();
        policy.cancel(status, reason, description.map(str::to_string), date)?;

        let superseded = in_unit_of_work(&mut *self.store, |store| {
            store.update_policy(&policy)?;
            supersede_invoices(store, policy.id())
        })?;

        self.policy = policy;

        tracing::info!(
            policy_id = %self.policy.id(),
            status = %status,
            reason = %reason,
            cancel_date = %date,
            invoices_deleted = superseded,
            "Policy cancelled"
        );

        Ok(())
    }

    /// Soft-deletes every active invoice of the policy
    ///
    /// Returns the number of invoices marked deleted.
    pub fn delete_invoices(&mut self) -> Result<usize, BillingError> {
        let policy_id = self.policy.id();
        let count = in_unit_of_work(&mut *self.store, |store| supersede_invoices(store, policy_id))?;

        tracing::info!(policy_id = %policy_id, count, "Invoices deleted");

        Ok(count)
    }

    /// Switches the policy to `new_schedule` and re-bills it
    ///
    /// The current invoices are soft-deleted and a fresh set is generated
    /// from the same effective date. Requesting the schedule already in
    /// effect changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSchedule` if `new_schedule` is not one of `Annual`,
    /// `Two-Pay`, `Quarterly` or `Monthly`; nothing is changed in that case
    pub fn change_billing_schedule(
        &mut self,
        new_schedule: &str,
    ) -> Result<ScheduleChange, BillingError> {
        if self
            .policy
            .billing_schedule()
            .map_or(false, |current| current.label() == new_schedule)
        {
            tracing::debug!(
                policy_id = %self.policy.id(),
                schedule = new_schedule,
                "Billing schedule unchanged"
            );
            return Ok(ScheduleChange::Unchanged);
        }

        let schedule = new_schedule
            .parse::<BillingSchedule>()
            .map_err(|_| self.refuse(BillingError::InvalidSchedule(new_schedule.to_string())))?;

        let mut policy = self.policy.clone();
        policy.set_billing_schedule(schedule);
        let invoices = generate_installments(&policy, &self.terms)?;

        let superseded = in_unit_of_work(&mut *self.store, |store| {
            let superseded = supersede_invoices(store, policy.id())?;
            store.update_policy(&policy)?;
            for invoice in &invoices {
                store.create_invoice(invoice)?;
            }
            Ok(superseded)
        })?;

        let previous = self.policy.billing_schedule();
        self.policy = policy;

        tracing::info!(
            policy_id = %self.policy.id(),
            from = ?previous,
            to = %schedule,
            superseded,
            created = invoices.len(),
            "Billing schedule changed"
        );

        Ok(ScheduleChange::Changed {
            superseded,
            invoices,
        })
    }

    fn resolve_date(&self, date_cursor: Option<NaiveDate>) -> NaiveDate {
        date_cursor.unwrap_or_else(|| self.clock.today())
    }

    fn balance_as_of(&self, date: NaiveDate) -> Result<Money, BillingError> {
        let policy_id = self.policy.id();
        let currency = self.policy.annual_premium().currency();

        let invoices = self
            .store
            .list_invoices(&InvoiceQuery::for_policy(policy_id).billed_on_or_before(date))?;
        let payments = self
            .store
            .list_payments(&PaymentQuery::for_policy(policy_id).on_or_before(date))?;

        let billed = Money::sum(currency, invoices.iter().map(Invoice::amount_due))?;
        let paid = Money::sum(currency, payments.iter().map(Payment::amount_paid))?;

        Ok(billed.checked_sub(&paid)?)
    }

    fn refuse(&self, error: BillingError) -> BillingError {
        tracing::warn!(policy_id = %self.policy.id(), error = %error, "Operation refused");
        error
    }
}

/// Runs `work` against the store, committing on success and rolling back
/// on failure
fn in_unit_of_work<S, T, F>(store: &mut S, work: F) -> Result<T, BillingError>
where
    S: BillingStore + ?Sized,
    F: FnOnce(&mut S) -> Result<T, BillingError>,
{
    let result = work(store).and_then(|value| {
        store.commit()?;
        Ok(value)
    });

    if result.is_err() {
        if let Err(e) = store.rollback() {
            tracing::error!(error = %e, "Rollback failed");
        }
    }

    result
}

/// Soft-deletes the policy's active invoices, returning how many changed
fn supersede_invoices<S>(store: &mut S, policy_id: PolicyId) -> Result<usize, BillingError>
where
    S: BillingStore + ?Sized,
{
    let invoices = store.list_invoices(&InvoiceQuery::for_policy(policy_id))?;
    for mut invoice in invoices.iter().cloned() {
        invoice.soft_delete();
        store.update_invoice(&invoice)?;
    }
    Ok(invoices.len())
}

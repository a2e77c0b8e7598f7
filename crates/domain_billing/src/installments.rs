//! Installment generation
//!
//! Splits a policy's annual premium into one invoice per installment of its
//! billing schedule, billed at even calendar-month intervals from the
//! effective date.

use core_kernel::add_months;
use domain_policy::Policy;

use crate::error::BillingError;
use crate::invoice::Invoice;
use crate::terms::InvoiceTerms;

/// Generates the invoices for one annual term of `policy`
///
/// Installment `i` is billed `i * (12 / n)` months after the effective date,
/// where `n` is the schedule's installment count. Each installment is the
/// even share of the premium truncated to cents; the last one carries the
/// remainder so the invoices always sum to the annual premium.
///
/// # Errors
///
/// Returns `InvalidSchedule` if the policy has no billing schedule. Nothing
/// is produced in that case.
pub fn generate_installments(
    policy: &Policy,
    terms: &InvoiceTerms,
) -> Result<Vec<Invoice>, BillingError> {
    let schedule = policy.billing_schedule().ok_or_else(|| {
        BillingError::InvalidSchedule(format!("policy {} has no billing schedule", policy.id()))
    })?;

    let count = schedule.installment_count();
    let step = schedule.months_between_installments();
    let amounts = policy.annual_premium().split_installments(count)?;

    let invoices = amounts
        .into_iter()
        .enumerate()
        .map(|(i, amount)| {
            let bill_date = add_months(policy.effective_date(), step * i as u32)?;
            Invoice::new(policy.id(), bill_date, amount, terms)
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        policy_id = %policy.id(),
        schedule = %schedule,
        installments = invoices.len(),
        "Generated installment invoices"
    );

    Ok(invoices)
}

//! Billing report
//!
//! One line per policy with its balance and non-payment flags as of the
//! report date.

use chrono::NaiveDate;
use serde::Serialize;

use core_kernel::{FixedClock, Money, PolicyId};
use domain_billing::{BillingError, BillingStore, InvoiceTerms, PolicyAccounting};
use domain_policy::{BillingSchedule, PolicyStatus};

/// Billing state of a single policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyLine {
    pub policy_id: PolicyId,
    pub name: String,
    pub billing_schedule: Option<BillingSchedule>,
    pub status: PolicyStatus,
    pub active_invoices: usize,
    pub balance: Money,
    pub pending_cancellation: bool,
    pub should_cancel: bool,
}

/// Billing state of a set of policies as of one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillingReport {
    pub as_of: NaiveDate,
    pub policies: Vec<PolicyLine>,
}

impl BillingReport {
    /// Evaluates every policy in `policy_ids` as of `as_of`
    pub fn build<S>(
        store: &mut S,
        policy_ids: &[PolicyId],
        as_of: NaiveDate,
        terms: InvoiceTerms,
    ) -> Result<Self, BillingError>
    where
        S: BillingStore + ?Sized,
    {
        let mut policies = Vec::with_capacity(policy_ids.len());

        for policy_id in policy_ids {
            let accounting =
                PolicyAccounting::open(&mut *store, *policy_id, terms, Box::new(FixedClock::new(as_of)))?;
            let policy = accounting.policy();

            policies.push(PolicyLine {
                policy_id: policy.id(),
                name: policy.name().to_string(),
                billing_schedule: policy.billing_schedule(),
                status: policy.status(),
                active_invoices: accounting.active_invoices()?.len(),
                balance: accounting.return_account_balance(None)?,
                pending_cancellation: accounting.evaluate_cancellation_pending_due_to_non_pay(None)?,
                should_cancel: accounting.evaluate_cancel(None)?,
            });
        }

        tracing::debug!(as_of = %as_of, policies = policies.len(), "Report built");

        Ok(Self { as_of, policies })
    }

    /// Renders the report as aligned text lines
    pub fn render_text(&self) -> String {
        let mut lines = vec![format!("Billing report as of {}", self.as_of)];
        lines.extend(self.policies.iter().map(|line| {
            let schedule = line
                .billing_schedule
                .map_or("-", |schedule| schedule.label());
            format!(
                "{:<14} {:<10} {:<9} invoices={:<3} balance={:>12} pending_cancellation={:<5} should_cancel={}",
                line.name,
                schedule,
                line.status,
                line.active_invoices,
                line.balance.to_string(),
                line.pending_cancellation,
                line.should_cancel,
            )
        }));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Renders the report as pretty-printed JSON
    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use infra_db::{load_demo_data, InMemoryStore};
    use rust_decimal_macros::dec;

    fn demo_report(as_of: NaiveDate) -> BillingReport {
        let mut store = InMemoryStore::new();
        let demo = load_demo_data(&mut store, Currency::USD, InvoiceTerms::default()).unwrap();
        BillingReport::build(&mut store, &demo.policies(), as_of, InvoiceTerms::default()).unwrap()
    }

    #[test]
    fn test_demo_report_lines() {
        let report = demo_report(NaiveDate::from_ymd_opt(2015, 2, 1).unwrap());

        let names: Vec<_> = report.policies.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Policy One", "Policy Two", "Policy Three"]);

        let two = &report.policies[1];
        assert_eq!(two.active_invoices, 4);
        assert!(two.balance.is_zero());
        assert!(!two.should_cancel);

        let three = &report.policies[2];
        assert_eq!(three.balance, Money::new(dec!(200), Currency::USD));
    }

    #[test]
    fn test_flags_in_grace_period() {
        let report = demo_report(NaiveDate::from_ymd_opt(2015, 2, 10).unwrap());

        assert!(report.policies[0].pending_cancellation);
        assert!(!report.policies[1].pending_cancellation);
    }

    #[test]
    fn test_render_formats() {
        let report = demo_report(NaiveDate::from_ymd_opt(2015, 3, 1).unwrap());

        let text = report.render_text();
        assert!(text.starts_with("Billing report as of 2015-03-01\n"));
        assert_eq!(text.lines().count(), 1 + report.policies.len());
        assert!(text.ends_with('\n'));
        assert!(text.contains("Policy Two"));
        assert!(text.contains("Quarterly"));

        let json: serde_json::Value = serde_json::from_str(&report.render_json().unwrap()).unwrap();
        assert_eq!(json["as_of"], "2015-03-01");
        assert_eq!(json["policies"][1]["billing_schedule"], "Quarterly");
        assert_eq!(json["policies"][0]["should_cancel"], true);
    }
}

//! Comprehensive tests for domain_billing

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ContactId, Currency, Money, PolicyId};
use domain_billing::{
    generate_installments, BillingError, Invoice, InvoiceQuery, InvoiceTerms, Payment,
    PaymentQuery,
};
use domain_policy::{BillingSchedule, Policy, PolicyBuilder};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn policy(effective: NaiveDate, premium: Decimal, schedule: BillingSchedule) -> Policy {
    PolicyBuilder::new()
        .name("Policy Under Test")
        .effective_date(effective)
        .annual_premium(Money::new(premium, Currency::USD))
        .billing_schedule(schedule)
        .build()
        .unwrap()
}

// ============================================================================
// Installment Tests
// ============================================================================

mod installment_tests {
    use super::*;

    #[test]
    fn test_annual_single_invoice_for_full_premium() {
        let policy = policy(date(2015, 1, 1), dec!(365), BillingSchedule::Annual);
        let invoices = generate_installments(&policy, &InvoiceTerms::default()).unwrap();

        assert_eq!(invoices.len(), 1);
        assert_eq!(invoices[0].amount_due().amount(), dec!(365));
        assert_eq!(invoices[0].bill_date(), date(2015, 1, 1));
        assert_eq!(invoices[0].due_date(), date(2015, 2, 1));
        assert_eq!(invoices[0].cancel_date(), date(2015, 2, 15));
    }

    #[test]
    fn test_quarterly_from_mid_month() {
        let policy = policy(date(2015, 2, 1), dec!(1600), BillingSchedule::Quarterly);
        let invoices = generate_installments(&policy, &InvoiceTerms::default()).unwrap();

        let bill_dates: Vec<_> = invoices.iter().map(Invoice::bill_date).collect();
        assert_eq!(
            bill_dates,
            vec![date(2015, 2, 1), date(2015, 5, 1), date(2015, 8, 1), date(2015, 11, 1)]
        );
        assert!(invoices.iter().all(|i| i.amount_due().amount() == dec!(400)));
    }

    #[test]
    fn test_month_end_effective_date_clamps() {
        let policy = policy(date(2015, 1, 31), dec!(1200), BillingSchedule::Monthly);
        let invoices = generate_installments(&policy, &InvoiceTerms::default()).unwrap();

        assert_eq!(invoices[1].bill_date(), date(2015, 2, 28));
        assert_eq!(invoices[2].bill_date(), date(2015, 3, 31));
        assert_eq!(invoices[0].due_date(), date(2015, 2, 28));
    }

    #[test]
    fn test_custom_terms() {
        let policy = policy(date(2015, 1, 1), dec!(1200), BillingSchedule::TwoPay);
        let terms = InvoiceTerms {
            due_months: 2,
            grace_days: 30,
        };
        let invoices = generate_installments(&policy, &terms).unwrap();

        assert_eq!(invoices[0].due_date(), date(2015, 3, 1));
        assert_eq!(invoices[0].cancel_date(), date(2015, 3, 31));
    }

    #[test]
    fn test_invoices_belong_to_policy() {
        let policy = policy(date(2015, 1, 1), dec!(1200), BillingSchedule::Monthly);
        let invoices = generate_installments(&policy, &InvoiceTerms::default()).unwrap();

        assert!(invoices.iter().all(|i| i.policy_id() == policy.id()));
        assert!(invoices.iter().all(Invoice::is_active));
    }
}

// ============================================================================
// Query Tests
// ============================================================================

mod query_tests {
    use super::*;

    #[test]
    fn test_default_invoice_query_matches_active_only() {
        let mut invoice = Invoice::new(
            PolicyId::new(),
            date(2015, 1, 1),
            Money::new(dec!(100), Currency::USD),
            &InvoiceTerms::default(),
        )
        .unwrap();

        assert!(InvoiceQuery::default().matches(&invoice));
        invoice.soft_delete();
        assert!(!InvoiceQuery::default().matches(&invoice));
    }

    #[test]
    fn test_payment_query_bound_is_inclusive() {
        let policy_id = PolicyId::new();
        let payment = Payment::new(
            policy_id,
            ContactId::new(),
            Money::new(dec!(50), Currency::USD),
            date(2015, 3, 1),
        )
        .unwrap();

        assert!(PaymentQuery::for_policy(policy_id).on_or_before(date(2015, 3, 1)).matches(&payment));
        assert!(!PaymentQuery::for_policy(policy_id).on_or_before(date(2015, 2, 28)).matches(&payment));
        assert!(!PaymentQuery::for_policy(PolicyId::new()).matches(&payment));
    }
}

// ============================================================================
// Error Tests
// ============================================================================

mod error_tests {
    use super::*;
    use core_kernel::{MoneyError, PortError};

    #[test]
    fn test_error_display() {
        assert_eq!(
            BillingError::InvalidSchedule("Weekly".to_string()).to_string(),
            "Invalid billing schedule: Weekly"
        );
        assert_eq!(
            BillingError::InvalidReason("Late".to_string()).to_string(),
            "Invalid reason: Late"
        );
    }

    #[test]
    fn test_conversions() {
        let from_money: BillingError =
            MoneyError::CurrencyMismatch("USD".to_string(), "EUR".to_string()).into();
        assert!(matches!(from_money, BillingError::Money(_)));
        assert!(!from_money.is_refusal());

        let from_port: BillingError = PortError::not_found("Invoice", "42").into();
        assert!(matches!(from_port, BillingError::Store(_)));
    }

    #[test]
    fn test_terms_validation() {
        let terms = InvoiceTerms {
            due_months: 0,
            grace_days: 14,
        };
        assert!(matches!(terms.validate(), Err(BillingError::InvalidTerms(_))));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn any_schedule() -> impl Strategy<Value = BillingSchedule> {
        prop::sample::select(BillingSchedule::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn installments_cover_premium(
            cents in 100i64..100_000_000i64,
            schedule in any_schedule(),
        ) {
            let premium = Decimal::new(cents, 2);
            let policy = policy(date(2015, 1, 1), premium, schedule);
            let invoices = generate_installments(&policy, &InvoiceTerms::default()).unwrap();

            prop_assert_eq!(invoices.len() as u32, schedule.installment_count());

            let total = Money::sum(Currency::USD, invoices.iter().map(Invoice::amount_due)).unwrap();
            prop_assert_eq!(total.amount(), premium);
        }

        #[test]
        fn invoice_dates_are_ordered(
            day in 0u32..3650,
            schedule in any_schedule(),
        ) {
            let effective = date(2010, 1, 1) + chrono::Days::new(u64::from(day));
            let policy = policy(effective, dec!(1200), schedule);
            let invoices = generate_installments(&policy, &InvoiceTerms::default()).unwrap();

            for pair in invoices.windows(2) {
                prop_assert!(pair[0].bill_date() < pair[1].bill_date());
            }
            for invoice in &invoices {
                prop_assert!(invoice.bill_date() < invoice.due_date());
                prop_assert!(invoice.due_date() < invoice.cancel_date());
            }
        }
    }
}

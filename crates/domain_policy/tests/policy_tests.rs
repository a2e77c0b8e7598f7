//! Tests for the policy record and its schedule/status vocabularies

use chrono::NaiveDate;
use core_kernel::{ContactId, Currency, Money, PolicyId};
use domain_policy::{
    BillingSchedule, CancellationReason, PolicyBuilder, PolicyError, PolicyStatus,
};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod builder_tests {
    use super::*;

    #[test]
    fn test_builder_keeps_all_fields() {
        let id = PolicyId::new();
        let insured = ContactId::new();
        let agent = ContactId::new();

        let policy = PolicyBuilder::new()
            .id(id)
            .name("Policy Two")
            .effective_date(date(2015, 2, 1))
            .annual_premium(Money::new(dec!(1600), Currency::USD))
            .billing_schedule(BillingSchedule::Quarterly)
            .named_insured(insured)
            .agent(agent)
            .build()
            .unwrap();

        assert_eq!(policy.id(), id);
        assert_eq!(policy.name(), "Policy Two");
        assert_eq!(policy.effective_date(), date(2015, 2, 1));
        assert_eq!(policy.annual_premium().amount(), dec!(1600));
        assert_eq!(policy.billing_schedule(), Some(BillingSchedule::Quarterly));
        assert_eq!(policy.named_insured(), Some(insured));
        assert_eq!(policy.agent(), Some(agent));
        assert_eq!(policy.status(), PolicyStatus::Active);
        assert_eq!(policy.status_code(), None);
        assert_eq!(policy.status_desc(), None);
    }

    #[test]
    fn test_builder_requires_name() {
        let result = PolicyBuilder::new()
            .effective_date(date(2015, 1, 1))
            .annual_premium(Money::new(dec!(365), Currency::USD))
            .build();
        assert_eq!(result, Err(PolicyError::MissingRequiredField("name".to_string())));
    }

    #[test]
    fn test_negative_premium_rejected() {
        let result = PolicyBuilder::new()
            .name("Bad Premium")
            .effective_date(date(2015, 1, 1))
            .annual_premium(Money::new(dec!(-1), Currency::USD))
            .build();
        assert!(matches!(result, Err(PolicyError::Validation(_))));
    }
}

mod schedule_change_tests {
    use super::*;

    #[test]
    fn test_set_billing_schedule() {
        let mut policy = PolicyBuilder::new()
            .name("Policy Three")
            .effective_date(date(2015, 1, 1))
            .annual_premium(Money::new(dec!(1200), Currency::USD))
            .billing_schedule(BillingSchedule::Monthly)
            .build()
            .unwrap();

        policy.set_billing_schedule(BillingSchedule::TwoPay);
        assert_eq!(policy.billing_schedule(), Some(BillingSchedule::TwoPay));
    }
}

mod serialization_tests {
    use super::*;

    #[test]
    fn test_policy_json_roundtrip() {
        let mut policy = PolicyBuilder::new()
            .name("Policy One")
            .effective_date(date(2015, 1, 1))
            .annual_premium(Money::new(dec!(365), Currency::USD))
            .billing_schedule(BillingSchedule::Annual)
            .build()
            .unwrap();
        policy
            .cancel(
                PolicyStatus::Canceled,
                CancellationReason::NonPayment,
                Some("no payment received".to_string()),
                date(2015, 2, 16),
            )
            .unwrap();

        let json = serde_json::to_value(&policy).unwrap();
        assert_eq!(json["billing_schedule"], "Annual");
        assert_eq!(json["status_code"], "Non-Payment");

        let back: domain_policy::Policy = serde_json::from_value(json).unwrap();
        assert_eq!(back, policy);
    }
}

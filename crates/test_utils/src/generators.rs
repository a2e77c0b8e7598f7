//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Days, NaiveDate};
use core_kernel::{Currency, Money};
use domain_policy::BillingSchedule;
use proptest::prelude::*;

/// Strategy for the recognized billing schedules
pub fn schedule_strategy() -> impl Strategy<Value = BillingSchedule> {
    prop::sample::select(BillingSchedule::ALL.to_vec())
}

/// Strategy for strings that are not billing schedule labels
pub fn unknown_schedule_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z -]{0,12}".prop_filter("must not be a schedule label", |s| {
        BillingSchedule::ALL.iter().all(|schedule| schedule.label() != s)
    })
}

/// Strategy for annual premiums in USD, from 1.00 to 1,000,000.00
pub fn premium_strategy() -> impl Strategy<Value = Money> {
    (100i64..100_000_000i64).prop_map(|minor| Money::from_minor(minor, Currency::USD))
}

/// Strategy for effective dates across a decade, month ends included
pub fn effective_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..3653).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2010, 1, 1).expect("valid base date") + Days::new(offset)
    })
}

/// Strategy for payment amounts in USD, from 0.01 to 10,000.00
pub fn payment_strategy() -> impl Strategy<Value = Money> {
    (1i64..1_000_000i64).prop_map(|minor| Money::from_minor(minor, Currency::USD))
}

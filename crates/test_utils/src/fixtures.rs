//! Pre-built Test Fixtures
//!
//! Ready-to-use values shared by the scenario tests. Dates default to the
//! 2015 term used throughout the demo data.

use chrono::NaiveDate;
use core_kernel::{Currency, Money};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builds a date, panicking on an impossible one
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid fixture date {}-{}-{}", year, month, day))
}

/// Builds a USD amount
pub fn usd(amount: Decimal) -> Money {
    Money::new(amount, Currency::USD)
}

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The quarterly scenario premium
    pub fn annual_premium() -> Money {
        usd(dec!(1200))
    }

    /// One quarter of the annual premium
    pub fn quarterly_installment() -> Money {
        usd(dec!(300))
    }

    /// Creates a zero amount
    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// Creates a EUR amount for currency mismatch tests
    pub fn eur_100() -> Money {
        Money::new(dec!(100.00), Currency::EUR)
    }
}

/// Fixture for billing calendar dates
pub struct DateFixtures;

impl DateFixtures {
    /// Effective date of the standard scenario policy
    pub fn effective_date() -> NaiveDate {
        date(2015, 1, 1)
    }

    /// First due date under default terms
    pub fn first_due_date() -> NaiveDate {
        date(2015, 2, 1)
    }

    /// First day of the first invoice's grace period
    pub fn first_grace_day() -> NaiveDate {
        date(2015, 2, 2)
    }

    /// First invoice's cancel date under default terms
    pub fn first_cancel_date() -> NaiveDate {
        date(2015, 2, 15)
    }
}

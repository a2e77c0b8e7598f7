//! Tests for core_kernel error types

use chrono::NaiveDate;
use core_kernel::error::CoreError;
use core_kernel::money::MoneyError;
use core_kernel::add_months;

#[test]
fn test_core_error_date_out_of_range() {
    let error = CoreError::date_out_of_range("+262143-12-31 + 1 months");

    match error {
        CoreError::DateOutOfRange(msg) => assert!(msg.contains("months")),
        _ => panic!("Expected DateOutOfRange error"),
    }
}

#[test]
fn test_add_months_past_max_date() {
    let result = add_months(NaiveDate::MAX, 1);

    let error = result.unwrap_err();
    assert!(error.to_string().starts_with("Date out of range"));
}

#[test]
fn test_core_error_from_money_error() {
    let money_error = MoneyError::CurrencyMismatch("USD".to_string(), "EUR".to_string());
    let core_error: CoreError = money_error.into();

    assert!(matches!(core_error, CoreError::Money(_)));
    assert!(core_error.to_string().contains("USD"));
}

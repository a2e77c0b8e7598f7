//! Custom Test Assertions
//!
//! Assertion helpers for money and invoices that give more meaningful
//! failure messages than standard assertions.

use core_kernel::Money;
use domain_billing::{BillingError, Invoice};
use rust_decimal::Decimal;

/// Asserts that a Money value has the expected amount
pub fn assert_money_eq(actual: &Money, expected: Decimal) {
    assert_eq!(
        actual.amount(),
        expected,
        "Money amount mismatch: actual={}, expected={} {}",
        actual,
        actual.currency().symbol(),
        expected
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(money.is_zero(), "Expected zero money, got {}", money);
}

/// Asserts that every invoice is soft-deleted
pub fn assert_all_deleted(invoices: &[Invoice]) {
    let active: Vec<_> = invoices.iter().filter(|i| i.is_active()).map(Invoice::bill_date).collect();
    assert!(active.is_empty(), "Expected all invoices deleted, still active: {:?}", active);
}

/// Asserts that no invoice is soft-deleted
pub fn assert_none_deleted(invoices: &[Invoice]) {
    let deleted: Vec<_> = invoices.iter().filter(|i| i.is_deleted()).map(Invoice::bill_date).collect();
    assert!(deleted.is_empty(), "Expected no deleted invoices, found: {:?}", deleted);
}

/// Asserts that the invoices sum to `expected`
pub fn assert_invoices_total(invoices: &[Invoice], expected: &Money) {
    let total = Money::sum(expected.currency(), invoices.iter().map(Invoice::amount_due))
        .expect("invoices share a currency");
    assert_eq!(
        &total, expected,
        "Invoice total mismatch: actual={}, expected={}",
        total, expected
    );
}

/// Asserts that an operation was refused on business grounds
pub fn assert_refused<T: std::fmt::Debug>(result: Result<T, BillingError>) -> BillingError {
    match result {
        Ok(value) => panic!("Expected refusal, got Ok({:?})", value),
        Err(error) => {
            assert!(error.is_refusal(), "Expected a refusal, got {:?}", error);
            error
        }
    }
}

//! Billing Domain - Policy Accounting
//!
//! This crate turns a policy's annual premium into installment invoices,
//! records payments against the policy account, and decides when unpaid
//! installments put the policy into pending cancellation or warrant
//! cancelling it.
//!
//! # Invoice Dates
//!
//! ```text
//! bill_date ──(due_months)──▶ due_date ──(grace_days)──▶ cancel_date
//!     │                           │                           │
//!     └── on-time window ─────────┘                           │
//!                                 └── pending cancellation ───┘
//! ```
//!
//! # Storage
//!
//! The engine never touches persistence directly. It talks to a
//! [`BillingStore`] port; every mutating operation stages its writes and
//! commits them as one unit before returning.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::PolicyAccounting;
//!
//! let mut accounting = PolicyAccounting::new(&mut store, policy_id)?;
//! let balance = accounting.return_account_balance(Some(date(2015, 4, 1)))?;
//!
//! if accounting.evaluate_cancel(None)? {
//!     accounting.cancel_policy("Canceled", "Non-Payment", None, None)?;
//! }
//! ```

pub mod accounting;
pub mod installments;
pub mod invoice;
pub mod payment;
pub mod ports;
pub mod terms;
pub mod error;

pub use accounting::{PolicyAccounting, ScheduleChange};
pub use installments::generate_installments;
pub use invoice::Invoice;
pub use payment::Payment;
pub use ports::{BillingStore, InvoiceQuery, PaymentQuery};
pub use terms::InvoiceTerms;
pub use error::BillingError;

//! Policy Domain
//!
//! The policy record the billing engine works against: its premium, the
//! billing schedule that divides that premium into installments, and the
//! status fields written when a policy is cancelled or expired.
//!
//! # Policy Lifecycle
//!
//! ```text
//! Active -> Canceled   (Fraud | Non-Payment | Underwriting)
//!        -> Expired
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_policy::{PolicyBuilder, BillingSchedule};
//!
//! let policy = PolicyBuilder::new()
//!     .name("Policy Two")
//!     .effective_date(date(2015, 2, 1))
//!     .annual_premium(Money::new(dec!(1600), Currency::USD))
//!     .billing_schedule(BillingSchedule::Quarterly)
//!     .build()?;
//! ```

pub mod aggregate;
pub mod schedule;
pub mod status;
pub mod error;

pub use aggregate::{Policy, PolicyBuilder};
pub use schedule::BillingSchedule;
pub use status::{PolicyStatus, CancellationReason};
pub use error::PolicyError;

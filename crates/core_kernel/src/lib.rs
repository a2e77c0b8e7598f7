//! Core Kernel - Foundational types for the policy accounting system
//!
//! This crate provides the building blocks shared by every domain crate:
//! - Money types with precise decimal arithmetic and installment splitting
//! - Calendar arithmetic and an injectable clock for "today"
//! - Strongly-typed identifiers
//! - The error type returned by store adapters

pub mod money;
pub mod calendar;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Money, Currency, MoneyError};
pub use calendar::{add_months, add_days, Clock, SystemClock, FixedClock};
pub use identifiers::{PolicyId, InvoiceId, PaymentId, ContactId};
pub use ports::{PortError, DomainPort};
pub use error::CoreError;

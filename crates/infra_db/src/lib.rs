//! Infrastructure Storage Layer
//!
//! This crate provides the storage adapter behind the billing engine's
//! [`BillingStore`](domain_billing::BillingStore) port, plus the demo data
//! used by the report binary and the scenario tests.
//!
//! # Units of work
//!
//! Writes are staged and become visible to other readers only on commit.
//! Reads through the same store see staged writes, so the engine can check
//! its own work before committing.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{InMemoryStore, seed::load_demo_data};
//!
//! let mut store = InMemoryStore::new();
//! let demo = load_demo_data(&mut store, Currency::USD, InvoiceTerms::default())?;
//! let accounting = PolicyAccounting::new(&mut store, demo.policy_two)?;
//! ```

pub mod error;
pub mod memory;
pub mod seed;

pub use error::StoreError;
pub use memory::InMemoryStore;
pub use seed::{load_demo_data, DemoData, SeedError};

//! Command-line interface for policy accounting
//!
//! Loads configuration, seeds the in-memory store with the demo policies
//! and reports on their billing state as of a date.

pub mod config;
pub mod report;

pub use config::{AppConfig, OutputFormat};
pub use report::{BillingReport, PolicyLine};

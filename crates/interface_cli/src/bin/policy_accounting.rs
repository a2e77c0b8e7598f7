//! Policy Accounting - Billing Report Binary
//!
//! Seeds an in-memory store with the demo policies and prints their billing
//! state as of a report date.
//!
//! # Usage
//!
//! ```bash
//! # Report as of today
//! cargo run --bin policy-accounting
//!
//! # Report as of a fixed date, as JSON
//! BILLING_REPORT_DATE=2015-04-01 BILLING_OUTPUT=json cargo run --bin policy-accounting
//! ```
//!
//! # Environment Variables
//!
//! * `BILLING_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `BILLING_CURRENCY` - Currency of the demo data (default: USD)
//! * `BILLING_REPORT_DATE` - ISO date to evaluate as of (default: today)
//! * `BILLING_OUTPUT` - `text` or `json` (default: text)
//! * `BILLING_TERMS__DUE_MONTHS` - Months from bill date to due date (default: 1)
//! * `BILLING_TERMS__GRACE_DAYS` - Days from due date to cancel date (default: 14)
//!
//! `RUST_LOG` takes precedence over `BILLING_LOG_LEVEL` when set.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::{Clock, SystemClock};
use infra_db::{load_demo_data, InMemoryStore};
use interface_cli::{AppConfig, BillingReport, OutputFormat};

fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("invalid BILLING_* configuration")?;

    init_tracing(&config.log_level);

    let as_of = config.report_date.unwrap_or_else(|| SystemClock.today());

    tracing::info!(
        as_of = %as_of,
        currency = %config.currency,
        due_months = config.terms.due_months,
        grace_days = config.terms.grace_days,
        "Building billing report"
    );

    let mut store = InMemoryStore::new();
    let demo = load_demo_data(&mut store, config.currency, config.terms)
        .context("failed to load demo data")?;

    let report = BillingReport::build(&mut store, &demo.policies(), as_of, config.terms)
        .context("failed to evaluate policies")?;

    match config.output {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", report.render_json()?),
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

//! CLI configuration

use chrono::NaiveDate;
use serde::Deserialize;

use core_kernel::Currency;
use domain_billing::InvoiceTerms;

/// How the report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Application configuration
///
/// Every field may be overridden from the environment with the `BILLING_`
/// prefix; nested fields use `__`, e.g. `BILLING_TERMS__GRACE_DAYS=30`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level
    pub log_level: String,
    /// Currency of the demo premiums and payments
    pub currency: Currency,
    /// Date the report is evaluated as of; today if unset
    pub report_date: Option<NaiveDate>,
    /// Report format
    pub output: OutputFormat,
    /// Invoice due and grace offsets
    pub terms: InvoiceTerms,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            currency: Currency::USD,
            report_date: None,
            output: OutputFormat::Text,
            terms: InvoiceTerms::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(
            config::Environment::with_prefix("BILLING")
                .prefix_separator("_")
                .separator("__"),
        )
    }

    /// Loads configuration from an arbitrary source, filling gaps with
    /// defaults
    pub fn from_source<S>(source: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }
}

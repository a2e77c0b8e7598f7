//! Billing schedules
//!
//! A billing schedule divides one annual premium term into equally spaced
//! installments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PolicyError;

/// Installment cadence for a policy's annual premium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillingSchedule {
    /// One installment
    #[serde(rename = "Annual")]
    Annual,
    /// Two installments, six months apart
    #[serde(rename = "Two-Pay")]
    TwoPay,
    /// Four installments, three months apart
    #[serde(rename = "Quarterly")]
    Quarterly,
    /// Twelve installments, one month apart
    #[serde(rename = "Monthly")]
    Monthly,
}

impl BillingSchedule {
    /// All recognized schedules
    pub const ALL: [BillingSchedule; 4] = [
        BillingSchedule::Annual,
        BillingSchedule::TwoPay,
        BillingSchedule::Quarterly,
        BillingSchedule::Monthly,
    ];

    /// Returns the number of installments per premium term
    pub fn installment_count(&self) -> u32 {
        match self {
            BillingSchedule::Annual => 1,
            BillingSchedule::TwoPay => 2,
            BillingSchedule::Quarterly => 4,
            BillingSchedule::Monthly => 12,
        }
    }

    /// Returns the number of months between consecutive bill dates
    pub fn months_between_installments(&self) -> u32 {
        12 / self.installment_count()
    }

    /// Returns the display label
    pub fn label(&self) -> &'static str {
        match self {
            BillingSchedule::Annual => "Annual",
            BillingSchedule::TwoPay => "Two-Pay",
            BillingSchedule::Quarterly => "Quarterly",
            BillingSchedule::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for BillingSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BillingSchedule {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BillingSchedule::ALL
            .into_iter()
            .find(|schedule| schedule.label() == s)
            .ok_or_else(|| PolicyError::InvalidSchedule(s.to_string()))
    }
}

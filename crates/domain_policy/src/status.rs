//! Policy status and cancellation reasons

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PolicyError;

/// Lifecycle status of a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyStatus {
    /// Policy is in force
    Active,
    /// Policy was cancelled before the end of its term
    Canceled,
    /// Policy ran to the end of its term
    Expired,
}

impl PolicyStatus {
    /// Returns true for the statuses a cancellation may move a policy into
    pub fn is_terminal(&self) -> bool {
        matches!(self, PolicyStatus::Canceled | PolicyStatus::Expired)
    }

    /// Returns the display label
    pub fn label(&self) -> &'static str {
        match self {
            PolicyStatus::Active => "Active",
            PolicyStatus::Canceled => "Canceled",
            PolicyStatus::Expired => "Expired",
        }
    }
}

impl Default for PolicyStatus {
    fn default() -> Self {
        PolicyStatus::Active
    }
}

impl fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PolicyStatus {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(PolicyStatus::Active),
            "Canceled" => Ok(PolicyStatus::Canceled),
            "Expired" => Ok(PolicyStatus::Expired),
            other => Err(PolicyError::InvalidStatus(other.to_string())),
        }
    }
}

/// Why a policy was cancelled or expired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CancellationReason {
    #[serde(rename = "Fraud")]
    Fraud,
    #[serde(rename = "Non-Payment")]
    NonPayment,
    #[serde(rename = "Underwriting")]
    Underwriting,
}

impl CancellationReason {
    /// Returns the display label
    pub fn label(&self) -> &'static str {
        match self {
            CancellationReason::Fraud => "Fraud",
            CancellationReason::NonPayment => "Non-Payment",
            CancellationReason::Underwriting => "Underwriting",
        }
    }
}

impl fmt::Display for CancellationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CancellationReason {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Fraud" => Ok(CancellationReason::Fraud),
            "Non-Payment" => Ok(CancellationReason::NonPayment),
            "Underwriting" => Ok(CancellationReason::Underwriting),
            other => Err(PolicyError::InvalidReason(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(!PolicyStatus::Active.is_terminal());
        assert!(PolicyStatus::Canceled.is_terminal());
        assert!(PolicyStatus::Expired.is_terminal());
    }

    #[test]
    fn test_reason_labels() {
        let reason: CancellationReason = "Non-Payment".parse().unwrap();
        assert_eq!(reason, CancellationReason::NonPayment);
        assert_eq!(reason.to_string(), "Non-Payment");
    }

    #[test]
    fn test_unknown_labels() {
        assert_eq!(
            "Cancelled".parse::<PolicyStatus>(),
            Err(PolicyError::InvalidStatus("Cancelled".to_string()))
        );
        assert_eq!(
            "Late".parse::<CancellationReason>(),
            Err(PolicyError::InvalidReason("Late".to_string()))
        );
    }
}

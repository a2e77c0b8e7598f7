//! Invoice payment terms

use serde::{Deserialize, Serialize};

use crate::error::BillingError;

/// How due and cancel dates are derived from an invoice's bill date
///
/// The defaults give a due date one calendar month after billing and a
/// cancel date fourteen days after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceTerms {
    /// Calendar months from bill date to due date
    pub due_months: u32,
    /// Days from due date to cancel date
    pub grace_days: u32,
}

impl Default for InvoiceTerms {
    fn default() -> Self {
        Self {
            due_months: 1,
            grace_days: 14,
        }
    }
}

impl InvoiceTerms {
    /// Checks that the terms keep `bill_date < due_date < cancel_date`
    ///
    /// # Errors
    ///
    /// Returns `InvalidTerms` if either offset is zero
    pub fn validate(&self) -> Result<(), BillingError> {
        if self.due_months == 0 {
            return Err(BillingError::InvalidTerms(
                "due_months must be at least 1".to_string(),
            ));
        }
        if self.grace_days == 0 {
            return Err(BillingError::InvalidTerms(
                "grace_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_terms() {
        let terms = InvoiceTerms::default();
        assert_eq!(terms.due_months, 1);
        assert_eq!(terms.grace_days, 14);
        assert!(terms.validate().is_ok());
    }

    #[test]
    fn test_zero_grace_rejected() {
        let terms = InvoiceTerms { due_months: 1, grace_days: 0 };
        assert!(matches!(terms.validate(), Err(BillingError::InvalidTerms(_))));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let terms: InvoiceTerms = serde_json::from_str(r#"{"grace_days": 30}"#).unwrap();
        assert_eq!(terms.due_months, 1);
        assert_eq!(terms.grace_days, 30);
    }
}

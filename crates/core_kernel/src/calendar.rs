//! Calendar arithmetic and the business clock
//!
//! Billing dates move in calendar months, not fixed day counts. Adding a
//! month to the 31st lands on the last day of the shorter month instead of
//! spilling into the next one.

use chrono::{Days, Months, NaiveDate, Utc};

use crate::error::CoreError;

/// Adds calendar months to a date, clamping to the end of the target month
///
/// # Errors
///
/// Returns `CoreError::DateOutOfRange` if the result is outside chrono's range
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate, CoreError> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| CoreError::date_out_of_range(format!("{} + {} months", date, months)))
}

/// Adds whole days to a date
///
/// # Errors
///
/// Returns `CoreError::DateOutOfRange` if the result is outside chrono's range
pub fn add_days(date: NaiveDate, days: u32) -> Result<NaiveDate, CoreError> {
    date.checked_add_days(Days::new(u64::from(days)))
        .ok_or_else(|| CoreError::date_out_of_range(format!("{} + {} days", date, days)))
}

/// Source of the current business date
///
/// Operations that accept an optional date cursor fall back to
/// `Clock::today` when the caller omits it.
pub trait Clock: Send + Sync {
    /// Returns the current business date
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time (UTC)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock pinned to a fixed date, for deterministic tests and replays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(NaiveDate);

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

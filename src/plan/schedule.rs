//! Projection output structures
//!
//! One `MonthProjection` per simulated month, immutable once emitted.
//! Consumers (tables, charts, export) iterate the sequence; `summary()`
//! derives the aggregate figures the reporting layer shows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One account's activity within a single simulated month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountMonth {
    pub id: u32,
    pub name: String,

    /// Balance carried into the month, before interest
    pub start_balance: f64,

    /// Interest accrued this month
    pub interest: f64,

    /// Minimum required payment, capped at the post-interest balance
    pub min_payment: f64,

    /// Minimum plus any extra allocation received this month
    pub actual_payment: f64,

    /// Balance carried out of the month
    pub end_balance: f64,
}

/// One simulated month
///
/// `accounts` holds rows only for accounts that carried a positive balance
/// into the month; paid-off and closed accounts drop out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthProjection {
    /// Month index, 0-based
    pub month_index: u32,

    /// Calendar date of the month, pinned to the first
    pub date: NaiveDate,

    pub accounts: Vec<AccountMonth>,

    /// Sum of actual payments across accounts
    pub total_payment: f64,

    /// Sum of interest accrued across accounts
    pub total_interest: f64,

    /// Cash neither consumed by minimums nor allocated as extra payment
    pub remaining_cash: f64,

    /// Running sum of unused leftover across all months so far
    pub accumulated_cash: f64,
}

impl MonthProjection {
    /// Aggregate balance at the end of this month
    pub fn total_end_balance(&self) -> f64 {
        self.accounts.iter().map(|a| a.end_balance).sum()
    }
}

/// Complete payoff projection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanResult {
    /// Monthly projection records, strictly ordered by month index
    pub months: Vec<MonthProjection>,
}

impl PlanResult {
    pub fn new() -> Self {
        Self { months: Vec::new() }
    }

    /// Append the next month's record
    pub fn add_month(&mut self, month: MonthProjection) {
        self.months.push(month);
    }

    /// Get summary statistics
    ///
    /// An empty projection (no debts, or all closed/zero) summarizes as
    /// already paid off with no payoff date.
    pub fn summary(&self) -> PlanSummary {
        let total_interest: f64 = self.months.iter().map(|m| m.total_interest).sum();
        let total_paid: f64 = self.months.iter().map(|m| m.total_payment).sum();
        let final_balance = self
            .months
            .last()
            .map(|m| m.total_end_balance())
            .unwrap_or(0.0);
        let paid_off = final_balance == 0.0;

        PlanSummary {
            months_simulated: self.months.len() as u32,
            total_interest,
            total_paid,
            final_balance,
            paid_off,
            payoff_date: if paid_off {
                self.months.last().map(|m| m.date)
            } else {
                None
            },
        }
    }
}

/// Aggregate figures for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    pub months_simulated: u32,
    pub total_interest: f64,
    pub total_paid: f64,

    /// Aggregate balance at the end of the final simulated month
    pub final_balance: f64,

    /// False when the horizon cap was reached with debt still outstanding
    pub paid_off: bool,

    /// Date of the final month when the plan fully pays off
    pub payoff_date: Option<NaiveDate>,
}

//! Monthly budget snapshot: income, deductions, committed expenses, and
//! irregular extra-income events
//!
//! One budget per owning user. The simulator treats it as read-only for
//! the whole projection horizon; only extra-income events vary by month.

mod extra;

pub use extra::{ExtraIncomeEntry, Frequency};

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named custom expense line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomExpense {
    pub name: String,
    pub amount: f64,
}

/// Fixed/committed monthly expenses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseLines {
    #[serde(default)]
    pub housing: f64,
    #[serde(default)]
    pub food: f64,
    #[serde(default)]
    pub transport: f64,
    #[serde(default)]
    pub other: f64,
    /// Open list of named expense lines
    #[serde(default)]
    pub custom: Vec<CustomExpense>,
}

impl ExpenseLines {
    /// Sum of all fixed and custom expense lines
    pub fn total(&self) -> f64 {
        self.housing
            + self.food
            + self.transport
            + self.other
            + self.custom.iter().map(|c| c.amount).sum::<f64>()
    }
}

/// One recurring monthly cash-flow description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Monthly salary
    pub salary: f64,

    /// Other regular monthly income
    #[serde(default)]
    pub other_income: f64,

    /// Monthly tax deduction
    #[serde(default)]
    pub tax: f64,

    /// Monthly social-insurance deduction
    #[serde(default)]
    pub social_insurance: f64,

    /// Monthly retirement-fund contribution
    #[serde(default)]
    pub retirement_contribution: f64,

    /// Committed monthly expenses
    #[serde(default)]
    pub expenses: ExpenseLines,

    /// Irregular income events
    #[serde(default)]
    pub extra_income: Vec<ExtraIncomeEntry>,
}

impl Budget {
    /// Salary plus other regular income
    pub fn regular_income(&self) -> f64 {
        self.salary + self.other_income
    }

    /// Tax, social insurance, and retirement contribution
    pub fn deductions(&self) -> f64 {
        self.tax + self.social_insurance + self.retirement_contribution
    }

    /// Regular income minus committed expenses and deductions
    ///
    /// May be negative when expenses exceed income.
    pub fn regular_free_cash(&self) -> f64 {
        self.regular_income() - self.expenses.total() - self.deductions()
    }

    /// Total extra income paying out in the given calendar month
    pub fn bonus_for_month(&self, year: i32, month: u32) -> f64 {
        self.extra_income
            .iter()
            .filter(|e| e.fires_in(year, month))
            .map(|e| e.amount)
            .sum()
    }
}

/// Error loading a budget snapshot file
#[derive(Debug, Error)]
pub enum BudgetLoadError {
    #[error("failed to read budget file")]
    Io(#[from] std::io::Error),

    #[error("malformed budget JSON")]
    Json(#[from] serde_json::Error),
}

/// Load a budget snapshot from JSON
pub fn load_budget(path: &Path) -> Result<Budget, BudgetLoadError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

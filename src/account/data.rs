//! Debt account data structures matching the stored snapshot format

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category tag for a debt account (informational only, no effect on the
/// projection arithmetic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtCategory {
    CreditCard,
    PersonalLoan,
    Paylater,
    CarLoan,
    MotorcycleLoan,
    BankLoan,
    Other,
}

impl DebtCategory {
    /// Get the string representation matching the stored snapshot format
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtCategory::CreditCard => "credit_card",
            DebtCategory::PersonalLoan => "personal_loan",
            DebtCategory::Paylater => "paylater",
            DebtCategory::CarLoan => "car_loan",
            DebtCategory::MotorcycleLoan => "motorcycle_loan",
            DebtCategory::BankLoan => "bank_loan",
            DebtCategory::Other => "other",
        }
    }
}

/// Lifecycle status of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Accrues interest and requires payments
    Active,
    /// Frozen at zero activity regardless of stored balance
    Closed,
}

impl AccountStatus {
    pub fn is_closed(&self) -> bool {
        matches!(self, AccountStatus::Closed)
    }
}

/// How the minimum required payment is derived from the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinPaymentType {
    /// Percentage of the current balance
    #[serde(rename = "percent")]
    PercentOfBalance,
    /// Flat amount per month
    #[serde(rename = "fixed")]
    FixedAmount,
}

/// A single debt account snapshot
///
/// The simulator only ever reads these; the monthly loop works on its own
/// private copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtAccount {
    /// Stable account identifier
    pub id: u32,

    /// Display name
    pub name: String,

    /// Category tag
    pub category: DebtCategory,

    /// Current balance: principal plus accrued-but-unpaid interest, >= 0
    pub balance: f64,

    /// Nominal annual interest rate in percent
    pub interest_rate: f64,

    /// Promotional annual rate in percent, overriding the nominal rate
    /// while the promo window is open
    #[serde(default)]
    pub promo_rate: Option<f64>,

    /// Last date (inclusive) on which the promotional rate applies
    #[serde(default)]
    pub promo_end_date: Option<NaiveDate>,

    /// Basis for the minimum required payment
    pub min_payment_type: MinPaymentType,

    /// Percent value or flat amount, per `min_payment_type`
    pub min_payment_value: f64,

    /// Installment-loan override; takes precedence over the
    /// type/value pair when set
    #[serde(default)]
    pub fixed_payment: Option<f64>,

    /// Lifecycle status
    pub status: AccountStatus,
}

impl DebtAccount {
    /// Whether the account still participates in the projection
    pub fn is_open(&self) -> bool {
        !self.status.is_closed() && self.balance > 0.0
    }
}

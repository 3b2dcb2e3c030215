//! Load debt account snapshots from CSV
//!
//! The storage layer owns the records; this loader only materializes a
//! read-only snapshot for the simulator and never writes back.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;

use super::data::{AccountStatus, DebtAccount, DebtCategory, MinPaymentType};

/// Error loading a debt snapshot file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read snapshot file")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV record")]
    Csv(#[from] csv::Error),

    #[error("account {id}: unknown {field} value '{value}'")]
    InvalidField {
        id: u32,
        field: &'static str,
        value: String,
    },
}

/// Raw CSV row matching the exported snapshot columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "ID")]
    id: u32,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Balance")]
    balance: f64,
    #[serde(rename = "InterestRate")]
    interest_rate: f64,
    #[serde(rename = "PromoRate")]
    promo_rate: Option<f64>,
    #[serde(rename = "PromoEndDate")]
    promo_end_date: Option<NaiveDate>,
    #[serde(rename = "MinPaymentType")]
    min_payment_type: String,
    #[serde(rename = "MinPaymentValue")]
    min_payment_value: f64,
    #[serde(rename = "FixedPayment")]
    fixed_payment: Option<f64>,
    #[serde(rename = "Status")]
    status: String,
}

impl CsvRow {
    fn to_account(self) -> Result<DebtAccount, LoadError> {
        let category = match self.category.as_str() {
            "credit_card" => DebtCategory::CreditCard,
            "personal_loan" => DebtCategory::PersonalLoan,
            "paylater" => DebtCategory::Paylater,
            "car_loan" => DebtCategory::CarLoan,
            "motorcycle_loan" => DebtCategory::MotorcycleLoan,
            "bank_loan" => DebtCategory::BankLoan,
            "other" => DebtCategory::Other,
            other => {
                return Err(LoadError::InvalidField {
                    id: self.id,
                    field: "Category",
                    value: other.to_string(),
                })
            }
        };

        let min_payment_type = match self.min_payment_type.as_str() {
            "percent" => MinPaymentType::PercentOfBalance,
            "fixed" => MinPaymentType::FixedAmount,
            other => {
                return Err(LoadError::InvalidField {
                    id: self.id,
                    field: "MinPaymentType",
                    value: other.to_string(),
                })
            }
        };

        let status = match self.status.as_str() {
            "active" => AccountStatus::Active,
            "closed" => AccountStatus::Closed,
            other => {
                return Err(LoadError::InvalidField {
                    id: self.id,
                    field: "Status",
                    value: other.to_string(),
                })
            }
        };

        Ok(DebtAccount {
            id: self.id,
            name: self.name,
            category,
            balance: self.balance,
            interest_rate: self.interest_rate,
            promo_rate: self.promo_rate,
            promo_end_date: self.promo_end_date,
            min_payment_type,
            min_payment_value: self.min_payment_value,
            fixed_payment: self.fixed_payment,
            status,
        })
    }
}

/// Load all debt accounts from a snapshot CSV
pub fn load_debts(path: &Path) -> Result<Vec<DebtAccount>, LoadError> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut accounts = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        accounts.push(row.to_account()?);
    }

    Ok(accounts)
}

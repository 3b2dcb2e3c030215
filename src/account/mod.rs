//! Debt accounts and per-account payment arithmetic

mod data;
pub mod calculator;
pub mod loader;

pub use data::{AccountStatus, DebtAccount, DebtCategory, MinPaymentType};
pub use loader::{load_debts, LoadError};

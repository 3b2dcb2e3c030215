//! Per-invocation simulation arena
//!
//! The generator works on its own deep copy of the supplied accounts; the
//! caller's records are never touched. Closed accounts are pinned to zero
//! balance up front so they contribute no interest and no payments.

use chrono::{Datelike, NaiveDate};

use crate::account::DebtAccount;

/// Mutable working state of one plan generation
#[derive(Debug, Clone)]
pub struct PlanState {
    /// Private working copies, in the caller's original order
    pub accounts: Vec<DebtAccount>,

    /// Current month index (0-based)
    pub month_index: u32,

    /// Calendar date of the current month, pinned to the first
    pub current_date: NaiveDate,

    /// Running sum of unused leftover cash across all simulated months
    pub accumulated_cash: f64,
}

impl PlanState {
    /// Build the arena from caller-owned snapshots at projection start
    pub fn new(debts: &[DebtAccount], start: NaiveDate) -> Self {
        let accounts = debts
            .iter()
            .cloned()
            .map(|mut account| {
                if account.status.is_closed() {
                    account.balance = 0.0;
                }
                account
            })
            .collect();

        Self {
            accounts,
            month_index: 0,
            current_date: first_of_month(start),
            accumulated_cash: 0.0,
        }
    }

    /// Whether any account still carries a balance
    pub fn any_open(&self) -> bool {
        self.accounts.iter().any(|a| a.balance > 0.0)
    }

    /// Sum of all working balances
    pub fn total_balance(&self) -> f64 {
        self.accounts.iter().map(|a| a.balance).sum()
    }

    /// Advance to the next calendar month
    pub fn advance_month(&mut self) {
        self.month_index += 1;
        self.current_date = next_month(self.current_date);
    }
}

/// Pin a date to the first of its month
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// First of the following month
fn next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountStatus, DebtCategory, MinPaymentType};

    fn debt(id: u32, balance: f64, status: AccountStatus) -> DebtAccount {
        DebtAccount {
            id,
            name: format!("debt-{id}"),
            category: DebtCategory::Other,
            balance,
            interest_rate: 10.0,
            promo_rate: None,
            promo_end_date: None,
            min_payment_type: MinPaymentType::FixedAmount,
            min_payment_value: 100.0,
            fixed_payment: None,
            status,
        }
    }

    #[test]
    fn test_arena_copies_and_pins_closed_to_zero() {
        let debts = vec![
            debt(1, 5_000.0, AccountStatus::Active),
            debt(2, 3_000.0, AccountStatus::Closed),
        ];
        let start = NaiveDate::from_ymd_opt(2026, 8, 19).unwrap();
        let state = PlanState::new(&debts, start);

        assert_eq!(state.accounts[0].balance, 5_000.0);
        assert_eq!(state.accounts[1].balance, 0.0);
        // Caller's records untouched
        assert_eq!(debts[1].balance, 3_000.0);
        // Date pinned to the first of the month
        assert_eq!(
            state.current_date,
            NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
        );
    }

    #[test]
    fn test_advance_month_rolls_over_year() {
        let debts = vec![debt(1, 1_000.0, AccountStatus::Active)];
        let start = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();
        let mut state = PlanState::new(&debts, start);

        state.advance_month();
        assert_eq!(
            state.current_date,
            NaiveDate::from_ymd_opt(2026, 12, 1).unwrap()
        );
        state.advance_month();
        assert_eq!(
            state.current_date,
            NaiveDate::from_ymd_opt(2027, 1, 1).unwrap()
        );
        assert_eq!(state.month_index, 2);
    }

    #[test]
    fn test_any_open() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let mut state = PlanState::new(&[debt(1, 100.0, AccountStatus::Active)], start);
        assert!(state.any_open());

        state.accounts[0].balance = 0.0;
        assert!(!state.any_open());
    }
}

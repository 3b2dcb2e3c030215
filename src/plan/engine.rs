//! Core generation loop for monthly payoff projections

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::account::{calculator, DebtAccount};
use crate::budget::{Budget, Frequency};

use super::allocation::{allocatable_cash, cash_after_minimums, AllocationPolicy};
use super::schedule::{AccountMonth, MonthProjection, PlanResult};
use super::state::PlanState;

/// Hard cap on the number of simulated months (10 years)
///
/// Guarantees termination even when minimum payments never outrun accruing
/// interest; reaching it yields a valid, non-payoff-complete projection.
pub const MAX_PLAN_MONTHS: u32 = 120;

/// Account ordering for extra payments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Lowest balance first
    #[default]
    Snowball,
    /// Highest interest rate first
    Avalanche,
}

impl Strategy {
    /// Comparator over open accounts; earlier accounts receive extra cash
    /// first
    ///
    /// Ordering uses the nominal rate, not the promo-adjusted one.
    pub fn cmp_accounts(&self, a: &DebtAccount, b: &DebtAccount) -> Ordering {
        match self {
            Strategy::Avalanche => b
                .interest_rate
                .total_cmp(&a.interest_rate)
                .then(a.balance.total_cmp(&b.balance)),
            Strategy::Snowball => a
                .balance
                .total_cmp(&b.balance)
                .then(b.interest_rate.total_cmp(&a.interest_rate)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Snowball => "snowball",
            Strategy::Avalanche => "avalanche",
        }
    }
}

/// Configuration for a plan generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Extra-payment account ordering
    pub strategy: Strategy,

    /// Policy over the regular-income surplus
    pub allocation: AllocationPolicy,

    /// Policy over the extra-income (bonus) pool
    pub extra_income_allocation: AllocationPolicy,

    /// Projection horizon in months; clamped to `MAX_PLAN_MONTHS`
    pub horizon_months: u32,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Snowball,
            allocation: AllocationPolicy::Full,
            extra_income_allocation: AllocationPolicy::Full,
            horizon_months: MAX_PLAN_MONTHS,
        }
    }
}

impl PlanConfig {
    /// Baseline configuration paying minimums only
    ///
    /// Used by the reporting layer to compute interest saved against the
    /// chosen plan.
    pub fn minimums_only() -> Self {
        Self {
            allocation: AllocationPolicy::Fixed(0.0),
            extra_income_allocation: AllocationPolicy::Fixed(0.0),
            ..Self::default()
        }
    }

    fn effective_horizon(&self) -> u32 {
        self.horizon_months.min(MAX_PLAN_MONTHS)
    }
}

/// Month-by-month payoff plan generator
///
/// Pure and synchronous: each run deep-copies the supplied accounts into a
/// private arena, so concurrent runs over the same snapshots need no
/// locking.
pub struct PlanGenerator {
    config: PlanConfig,
}

impl PlanGenerator {
    pub fn new(config: PlanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    /// Project the payoff schedule from the given start date
    ///
    /// The start is pinned to the first of its month; the engine never
    /// reads the clock, so identical inputs always reproduce the same
    /// sequence. Returns an empty projection when there is nothing to pay
    /// off.
    pub fn generate(
        &self,
        debts: &[DebtAccount],
        budget: &Budget,
        start: NaiveDate,
    ) -> PlanResult {
        for entry in &budget.extra_income {
            if entry.frequency == Frequency::OneTime && entry.year.is_none() {
                warn!(
                    "one-time extra income of {} in month {} has no year and will never fire",
                    entry.amount, entry.month
                );
            }
        }

        let mut state = PlanState::new(debts, start);
        let mut result = PlanResult::new();
        let horizon = self.config.effective_horizon();

        while state.any_open() && state.month_index < horizon {
            let month = self.simulate_month(&mut state, budget);
            result.add_month(month);
            state.advance_month();
        }

        debug!(
            "generated {} months ({} strategy), remaining balance {:.2}",
            result.months.len(),
            self.config.strategy.as_str(),
            state.total_balance(),
        );

        result
    }

    /// Execute one month transition: accrue interest, pay minimums,
    /// allocate leftover cash, emit the projection record
    fn simulate_month(&self, state: &mut PlanState, budget: &Budget) -> MonthProjection {
        let date = state.current_date;

        let regular_free_cash = budget.regular_free_cash();
        let total_bonus = budget.bonus_for_month(date.year(), date.month());

        // Interest accrues before any payment; the minimum is computed on
        // the post-interest balance and capped at it.
        let mut accounts = Vec::new();
        let mut total_interest = 0.0;
        let mut total_min_payments = 0.0;

        for account in state.accounts.iter_mut().filter(|a| a.balance > 0.0) {
            let start_balance = account.balance;

            let interest = calculator::monthly_interest(account, date);
            account.balance += interest;
            total_interest += interest;

            let min_payment = calculator::minimum_payment(account).min(account.balance);
            account.balance -= min_payment;
            total_min_payments += min_payment;

            accounts.push(AccountMonth {
                id: account.id,
                name: account.name.clone(),
                start_balance,
                interest,
                min_payment,
                actual_payment: min_payment,
                end_balance: account.balance,
            });
        }

        let mut remaining_cash =
            cash_after_minimums(regular_free_cash, total_bonus, total_min_payments);
        let mut allocatable = allocatable_cash(
            regular_free_cash,
            total_bonus,
            total_min_payments,
            &self.config.allocation,
            &self.config.extra_income_allocation,
        );

        if allocatable > 0.0 {
            let mut order: Vec<usize> = (0..state.accounts.len())
                .filter(|&i| state.accounts[i].balance > 0.0)
                .collect();
            order.sort_by(|&i, &j| {
                self.config
                    .strategy
                    .cmp_accounts(&state.accounts[i], &state.accounts[j])
            });

            for i in order {
                if allocatable <= 0.0 {
                    break;
                }
                let account = &mut state.accounts[i];
                let amount = allocatable.min(account.balance);
                account.balance -= amount;
                allocatable -= amount;
                remaining_cash -= amount;

                if let Some(row) = accounts.iter_mut().find(|r| r.id == account.id) {
                    row.actual_payment += amount;
                    row.end_balance = account.balance;
                }
            }
        }

        let total_payment = accounts.iter().map(|r| r.actual_payment).sum();
        state.accumulated_cash += remaining_cash;

        MonthProjection {
            month_index: state.month_index,
            date,
            accounts,
            total_payment,
            total_interest,
            remaining_cash,
            accumulated_cash: state.accumulated_cash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountStatus, DebtCategory, MinPaymentType};
    use approx::assert_relative_eq;

    fn debt(id: u32, balance: f64, rate: f64) -> DebtAccount {
        DebtAccount {
            id,
            name: format!("debt-{id}"),
            category: DebtCategory::Other,
            balance,
            interest_rate: rate,
            promo_rate: None,
            promo_end_date: None,
            min_payment_type: MinPaymentType::FixedAmount,
            min_payment_value: 0.0,
            fixed_payment: None,
            status: AccountStatus::Active,
        }
    }

    fn free_cash_budget(amount: f64) -> Budget {
        Budget {
            salary: amount,
            other_income: 0.0,
            tax: 0.0,
            social_insurance: 0.0,
            retirement_contribution: 0.0,
            expenses: Default::default(),
            extra_income: Vec::new(),
        }
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    fn snowball_full() -> PlanGenerator {
        PlanGenerator::new(PlanConfig::default())
    }

    #[test]
    fn test_hand_computed_single_debt_schedule() {
        // 10,000 at 12% (1%/month), fixed minimum 500, 1,000 free cash,
        // full allocation: month 0 accrues 100, pays 500 + 500 extra,
        // ends at 9,100; pays off in 11 months.
        let mut account = debt(1, 10_000.0, 12.0);
        account.min_payment_value = 500.0;

        let result = snowball_full().generate(&[account], &free_cash_budget(1_000.0), start());

        let first = &result.months[0];
        assert_relative_eq!(first.total_interest, 100.0, epsilon = 1e-9);
        assert_relative_eq!(first.accounts[0].min_payment, 500.0);
        assert_relative_eq!(first.accounts[0].actual_payment, 1_000.0, epsilon = 1e-9);
        assert_relative_eq!(first.accounts[0].end_balance, 9_100.0, epsilon = 1e-9);
        assert_relative_eq!(first.remaining_cash, 0.0, epsilon = 1e-9);

        assert_eq!(result.months.len(), 11);
        let summary = result.summary();
        assert!(summary.paid_off);
        assert_eq!(
            summary.payoff_date,
            NaiveDate::from_ymd_opt(2026, 11, 1)
        );

        // Final month pays off exactly and banks the leftover
        let last = result.months.last().unwrap();
        assert_relative_eq!(last.total_end_balance(), 0.0);
        assert!(last.remaining_cash > 0.0);
    }

    #[test]
    fn test_avalanche_targets_highest_rate() {
        // Minimums are zero, so the whole 100 goes to the ordering winner
        let debts = vec![debt(1, 1_000.0, 25.0), debt(2, 400.0, 5.0)];
        let config = PlanConfig {
            strategy: Strategy::Avalanche,
            ..Default::default()
        };

        let result =
            PlanGenerator::new(config).generate(&debts, &free_cash_budget(100.0), start());

        let first = &result.months[0];
        assert_relative_eq!(first.accounts[0].actual_payment, 100.0);
        assert_relative_eq!(first.accounts[1].actual_payment, 0.0);
    }

    #[test]
    fn test_snowball_targets_lowest_balance() {
        let debts = vec![debt(1, 1_000.0, 25.0), debt(2, 400.0, 5.0)];

        let result = snowball_full().generate(&debts, &free_cash_budget(100.0), start());

        let first = &result.months[0];
        assert_relative_eq!(first.accounts[0].actual_payment, 0.0);
        assert_relative_eq!(first.accounts[1].actual_payment, 100.0);
    }

    #[test]
    fn test_strategy_tie_breaks() {
        let a = debt(1, 500.0, 5.0);
        let b = debt(2, 500.0, 15.0);
        // Equal balances: snowball falls back to the higher rate
        assert_eq!(Strategy::Snowball.cmp_accounts(&b, &a), Ordering::Less);

        let c = debt(3, 900.0, 10.0);
        let d = debt(4, 300.0, 10.0);
        // Equal rates: avalanche falls back to the lower balance
        assert_eq!(Strategy::Avalanche.cmp_accounts(&d, &c), Ordering::Less);
    }

    #[test]
    fn test_overflow_rolls_to_next_account() {
        let debts = vec![debt(1, 50.0, 10.0), debt(2, 500.0, 20.0)];

        let result = snowball_full().generate(&debts, &free_cash_budget(200.0), start());

        // Snowball clears the 50 balance (plus its interest) and rolls the
        // rest onto the next account.
        let first = &result.months[0];
        let small = first.accounts.iter().find(|r| r.id == 1).unwrap();
        let large = first.accounts.iter().find(|r| r.id == 2).unwrap();
        assert_relative_eq!(small.end_balance, 0.0);
        assert_relative_eq!(
            large.actual_payment,
            200.0 - small.actual_payment,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_promo_rate_window() {
        // 24% nominal with a 0% promo through mid-February: January and
        // February accrue nothing, March accrues 2%.
        let mut account = debt(1, 10_000.0, 24.0);
        account.promo_rate = Some(0.0);
        account.promo_end_date = NaiveDate::from_ymd_opt(2026, 2, 15);
        account.min_payment_value = 500.0;

        let result = snowball_full().generate(&[account], &free_cash_budget(500.0), start());

        assert_relative_eq!(result.months[0].total_interest, 0.0);
        assert_relative_eq!(result.months[1].total_interest, 0.0);
        // Balance is 9,000 entering March
        assert_relative_eq!(result.months[2].total_interest, 180.0, epsilon = 1e-9);
    }

    #[test]
    fn test_horizon_cap_when_interest_outruns_payments() {
        // 2,000/month interest against a 500 minimum: the balance grows
        // and the run stops at the cap.
        let mut account = debt(1, 100_000.0, 24.0);
        account.min_payment_value = 500.0;

        let result = snowball_full().generate(&[account], &free_cash_budget(500.0), start());

        assert_eq!(result.months.len() as u32, MAX_PLAN_MONTHS);
        let summary = result.summary();
        assert!(!summary.paid_off);
        assert!(summary.final_balance > 100_000.0);
        assert!(summary.payoff_date.is_none());
    }

    #[test]
    fn test_horizon_override_is_clamped() {
        let mut account = debt(1, 100_000.0, 24.0);
        account.min_payment_value = 500.0;

        let short = PlanGenerator::new(PlanConfig {
            horizon_months: 6,
            ..Default::default()
        });
        assert_eq!(
            short
                .generate(&[account.clone()], &free_cash_budget(500.0), start())
                .months
                .len(),
            6
        );

        let long = PlanGenerator::new(PlanConfig {
            horizon_months: 600,
            ..Default::default()
        });
        assert_eq!(
            long.generate(&[account], &free_cash_budget(500.0), start())
                .months
                .len() as u32,
            MAX_PLAN_MONTHS
        );
    }

    #[test]
    fn test_empty_debt_list_yields_empty_projection() {
        let result = snowball_full().generate(&[], &free_cash_budget(1_000.0), start());
        assert!(result.months.is_empty());
    }

    #[test]
    fn test_closed_accounts_are_frozen() {
        let mut closed = debt(2, 5_000.0, 30.0);
        closed.status = AccountStatus::Closed;
        let mut active = debt(1, 1_000.0, 10.0);
        active.min_payment_value = 100.0;

        let result = snowball_full().generate(
            &[active, closed],
            &free_cash_budget(100.0),
            start(),
        );

        for month in &result.months {
            assert!(month.accounts.iter().all(|r| r.id == 1));
        }
        assert!(result.summary().paid_off);
    }

    #[test]
    fn test_all_closed_yields_empty_projection() {
        let mut closed = debt(1, 5_000.0, 30.0);
        closed.status = AccountStatus::Closed;

        let result = snowball_full().generate(&[closed], &free_cash_budget(1_000.0), start());
        assert!(result.months.is_empty());
        assert!(result.summary().paid_off);
    }

    #[test]
    fn test_regular_shortfall_backfilled_from_bonus() {
        // Regular cash runs -200; a 1,000 monthly bonus absorbs the
        // deficit and the minimum before paying extra.
        let mut account = debt(1, 500.0, 0.0);
        account.min_payment_value = 100.0;

        let mut budget = free_cash_budget(100.0);
        budget.expenses.other = 300.0;
        budget.extra_income.push(crate::budget::ExtraIncomeEntry {
            month: 1,
            year: Some(2026),
            amount: 1_000.0,
            frequency: Frequency::Monthly,
        });

        let result = snowball_full().generate(&[account], &budget, start());

        let first = &result.months[0];
        assert_relative_eq!(first.accounts[0].actual_payment, 500.0);
        assert_relative_eq!(first.total_end_balance(), 0.0);
        // 800 net cash - 100 minimum - 400 extra
        assert_relative_eq!(first.remaining_cash, 300.0);
        assert_eq!(result.months.len(), 1);
    }

    #[test]
    fn test_percent_allocation_limits_extra() {
        let mut account = debt(1, 10_000.0, 0.0);
        account.min_payment_value = 500.0;

        let config = PlanConfig {
            allocation: AllocationPolicy::Percent(50.0),
            ..Default::default()
        };
        let result =
            PlanGenerator::new(config).generate(&[account], &free_cash_budget(1_000.0), start());

        let first = &result.months[0];
        // Surplus is 500; half of it goes to extra payment
        assert_relative_eq!(first.accounts[0].actual_payment, 750.0);
        assert_relative_eq!(first.remaining_cash, 250.0);
        assert_relative_eq!(first.accumulated_cash, 250.0);
    }

    #[test]
    fn test_minimums_only_config_pays_no_extra() {
        let mut account = debt(1, 10_000.0, 12.0);
        account.min_payment_value = 500.0;

        let generator = PlanGenerator::new(PlanConfig::minimums_only());
        let result = generator.generate(&[account], &free_cash_budget(1_000.0), start());

        let first = &result.months[0];
        assert_relative_eq!(first.accounts[0].actual_payment, 500.0);
        assert_relative_eq!(first.remaining_cash, 500.0);
    }

    #[test]
    fn test_balances_monotone_and_payments_conserved() {
        let mut card = debt(1, 42_000.0, 18.0);
        card.min_payment_type = MinPaymentType::PercentOfBalance;
        card.min_payment_value = 5.0;
        let mut loan = debt(2, 150_000.0, 6.5);
        loan.fixed_payment = Some(4_500.0);

        let mut budget = free_cash_budget(30_000.0);
        budget.expenses.housing = 18_000.0;
        budget.extra_income.push(crate::budget::ExtraIncomeEntry {
            month: 12,
            year: None,
            amount: 20_000.0,
            frequency: Frequency::Yearly,
        });

        let result = snowball_full().generate(&[card, loan], &budget, start());
        assert!(!result.months.is_empty());
        assert!(result.months.len() as u32 <= MAX_PLAN_MONTHS);

        let mut prev_index = None;
        for month in &result.months {
            for row in &month.accounts {
                assert!(row.end_balance >= 0.0);
                // A payment never increases the balance
                assert!(row.end_balance <= row.start_balance + row.interest + 1e-9);
                assert!(row.actual_payment >= row.min_payment - 1e-9);
            }

            let paid: f64 = month.accounts.iter().map(|r| r.actual_payment).sum();
            assert_relative_eq!(month.total_payment, paid, epsilon = 1e-9);
            assert!(month.remaining_cash >= -1e-9);

            if let Some(prev) = prev_index {
                assert_eq!(month.month_index, prev + 1);
            }
            prev_index = Some(month.month_index);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let mut card = debt(1, 42_000.0, 18.0);
        card.min_payment_type = MinPaymentType::PercentOfBalance;
        card.min_payment_value = 5.0;
        let debts = vec![card, debt(2, 9_000.0, 22.0)];
        let budget = free_cash_budget(8_000.0);

        let a = snowball_full().generate(&debts, &budget, start());
        let b = snowball_full().generate(&debts, &budget, start());

        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}

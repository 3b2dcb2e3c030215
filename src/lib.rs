//! Payoff Planner - deterministic projection engine for consumer debt payoff
//!
//! This library provides:
//! - Per-account payment arithmetic (minimums, promo-aware interest)
//! - Month-by-month payoff projections under snowball/avalanche strategies
//! - Cash-flow composition from a recurring budget and irregular income
//! - Strategy comparison against a minimums-only baseline

pub mod account;
pub mod budget;
pub mod compare;
pub mod plan;

// Re-export commonly used types
pub use account::{AccountStatus, DebtAccount, DebtCategory, MinPaymentType};
pub use budget::{Budget, ExtraIncomeEntry, Frequency};
pub use compare::{BaselineSavings, PlanRunner};
pub use plan::{
    AllocationPolicy, MonthProjection, PlanConfig, PlanGenerator, PlanResult, PlanSummary,
    Strategy, MAX_PLAN_MONTHS,
};

//! Payoff plan generation: simulation state, cash allocation, the monthly
//! engine, and the projection output types

mod allocation;
mod engine;
mod schedule;
mod state;

pub use allocation::{AllocationPolicy, allocatable_cash, cash_after_minimums};
pub use engine::{PlanConfig, PlanGenerator, Strategy, MAX_PLAN_MONTHS};
pub use schedule::{AccountMonth, MonthProjection, PlanResult, PlanSummary};
pub use state::PlanState;

//! Runner for comparing payoff configurations over the same snapshots
//!
//! Holds the input snapshots once, then runs any number of configurations
//! against them: strategy A/B comparisons, or a minimums-only baseline for
//! "interest saved" reporting. Runs share no mutable state, so batches are
//! executed in parallel.

use chrono::NaiveDate;
use rayon::prelude::*;

use crate::account::DebtAccount;
use crate::budget::Budget;
use crate::plan::{PlanConfig, PlanGenerator, PlanResult, PlanSummary};

/// Pre-loaded runner for batch plan generation
#[derive(Debug, Clone)]
pub struct PlanRunner {
    debts: Vec<DebtAccount>,
    budget: Budget,
    start: NaiveDate,
}

impl PlanRunner {
    pub fn new(debts: Vec<DebtAccount>, budget: Budget, start: NaiveDate) -> Self {
        Self {
            debts,
            budget,
            start,
        }
    }

    /// Run a single configuration
    pub fn run(&self, config: PlanConfig) -> PlanResult {
        PlanGenerator::new(config).generate(&self.debts, &self.budget, self.start)
    }

    /// Run several configurations in parallel over the same snapshots
    pub fn run_scenarios(&self, configs: &[PlanConfig]) -> Vec<PlanResult> {
        configs
            .par_iter()
            .map(|config| self.run(config.clone()))
            .collect()
    }

    /// Minimums-only projection, the reference point for savings metrics
    pub fn baseline(&self) -> PlanResult {
        self.run(PlanConfig::minimums_only())
    }

    /// Savings of a configuration against the minimums-only baseline
    pub fn savings(&self, config: PlanConfig) -> BaselineSavings {
        let (plan, baseline) = rayon::join(|| self.run(config), || self.baseline());
        BaselineSavings::between(plan.summary(), baseline.summary())
    }

    pub fn debts(&self) -> &[DebtAccount] {
        &self.debts
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }
}

/// A plan's position relative to paying minimums only
#[derive(Debug, Clone)]
pub struct BaselineSavings {
    pub plan: PlanSummary,
    pub baseline: PlanSummary,

    /// Interest avoided by paying extra; floored at zero
    pub interest_saved: f64,

    /// Months shaved off the baseline schedule
    pub months_saved: u32,
}

impl BaselineSavings {
    fn between(plan: PlanSummary, baseline: PlanSummary) -> Self {
        let interest_saved = (baseline.total_interest - plan.total_interest).max(0.0);
        let months_saved = baseline
            .months_simulated
            .saturating_sub(plan.months_simulated);
        Self {
            plan,
            baseline,
            interest_saved,
            months_saved,
        }
    }
}

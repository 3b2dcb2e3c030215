//! Payoff Planner CLI
//!
//! Loads debt and budget snapshots, generates a payoff plan, and prints
//! the month-by-month schedule

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use payoff_planner::account::calculator;
use payoff_planner::{
    account, budget, AllocationPolicy, PlanConfig, PlanGenerator, PlanResult, PlanRunner,
    Strategy, MAX_PLAN_MONTHS,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Snowball,
    Avalanche,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Snowball => Strategy::Snowball,
            StrategyArg::Avalanche => Strategy::Avalanche,
        }
    }
}

#[derive(Parser)]
#[command(version, about = "Debt payoff plan simulator")]
struct Args {
    /// Debt snapshot CSV
    #[arg(long, default_value = "data/sample_debts.csv")]
    debts: PathBuf,

    /// Budget snapshot JSON
    #[arg(long, default_value = "data/sample_budget.json")]
    budget: PathBuf,

    /// Extra-payment strategy
    #[arg(long, value_enum, default_value_t = StrategyArg::Snowball)]
    strategy: StrategyArg,

    /// Commit only this percentage of the regular surplus to extra payments
    #[arg(long)]
    allocation_percent: Option<f64>,

    /// Projection horizon in months (clamped to 120)
    #[arg(long, default_value_t = MAX_PLAN_MONTHS)]
    months: u32,

    /// Simulation start date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Write the full per-account schedule to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let debts = account::load_debts(&args.debts)
        .with_context(|| format!("loading debts from {}", args.debts.display()))?;
    let budget = budget::load_budget(&args.budget)
        .with_context(|| format!("loading budget from {}", args.budget.display()))?;
    let start = args
        .start
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let config = PlanConfig {
        strategy: args.strategy.into(),
        allocation: match args.allocation_percent {
            Some(pct) => AllocationPolicy::Percent(pct),
            None => AllocationPolicy::Full,
        },
        horizon_months: args.months,
        ..Default::default()
    };

    println!("Payoff Planner v0.1.0");
    println!("=====================\n");
    println!("Regular free cash: {:.2}/month", budget.regular_free_cash());
    println!("Strategy: {}\n", config.strategy.as_str());

    for debt in debts.iter().filter(|d| d.is_open()) {
        let min_payment = calculator::minimum_payment(debt);
        let at_minimums = calculator::estimate_payoff_months(debt, min_payment)
            .map(|m| format!("~{} months at minimums", m))
            .unwrap_or_else(|| "never at minimums".to_string());
        println!(
            "  #{} {} [{}]: {:.2} at {}%, min {:.2}, {}",
            debt.id,
            debt.name,
            debt.category.as_str(),
            debt.balance,
            debt.interest_rate,
            min_payment,
            at_minimums,
        );
    }
    println!();

    let generator = PlanGenerator::new(config.clone());
    let result = generator.generate(&debts, &budget, start);

    if result.months.is_empty() {
        println!("Nothing to project: no open debt balances.");
        return Ok(());
    }

    print_schedule(&result);

    if let Some(path) = &args.output {
        write_schedule_csv(&result, path)
            .with_context(|| format!("writing schedule to {}", path.display()))?;
        println!("\nFull schedule written to: {}", path.display());
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Months Simulated: {}", summary.months_simulated);
    println!("  Total Paid: {:.2}", summary.total_paid);
    println!("  Total Interest: {:.2}", summary.total_interest);
    match summary.payoff_date {
        Some(date) => println!("  Debt-Free By: {}", date.format("%B %Y")),
        None => println!(
            "  Not paid off within {} months (remaining balance {:.2})",
            summary.months_simulated, summary.final_balance
        ),
    }

    let runner = PlanRunner::new(debts, budget, start);
    let savings = runner.savings(config);
    println!(
        "  Vs Minimums-Only: {:.2} interest saved, {} months sooner",
        savings.interest_saved, savings.months_saved
    );

    Ok(())
}

/// Print the first two years of the schedule to the console
fn print_schedule(result: &PlanResult) {
    println!(
        "{:>5} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Month", "Date", "Payment", "Interest", "Leftover", "Balance"
    );
    println!("{}", "-".repeat(70));

    for month in result.months.iter().take(24) {
        println!(
            "{:>5} {:>12} {:>12.2} {:>12.2} {:>12.2} {:>12.2}",
            month.month_index,
            month.date.to_string(),
            month.total_payment,
            month.total_interest,
            month.remaining_cash,
            month.total_end_balance(),
        );
    }

    if result.months.len() > 24 {
        println!("... ({} more months)", result.months.len() - 24);
    }
}

/// Flatten the projection into one CSV row per account per month
fn write_schedule_csv(result: &PlanResult, path: &Path) -> anyhow::Result<()> {
    let mut file = File::create(path)?;

    writeln!(
        file,
        "Month,Date,AccountId,Account,StartBalance,Interest,MinPayment,ActualPayment,EndBalance"
    )?;

    for month in &result.months {
        for row in &month.accounts {
            writeln!(
                file,
                "{},{},{},{},{:.2},{:.2},{:.2},{:.2},{:.2}",
                month.month_index,
                month.date,
                row.id,
                row.name,
                row.start_balance,
                row.interest,
                row.min_payment,
                row.actual_payment,
                row.end_balance,
            )?;
        }
    }

    Ok(())
}

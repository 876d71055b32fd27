//! Project both strategies across a range of monthly budgets
//!
//! Outputs one CSV row per (budget, strategy) to show how extra monthly
//! cash moves the debt-free date.
//!
//! Usage: cargo run --bin budget_sweep -- --debts data/debts.csv --from 800 --to 2000 --step 100

use anyhow::{ensure, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use debt_freedom::debt::load_debts;
use debt_freedom::{ProjectionConfig, ScenarioRunner, Strategy};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "budget_sweep", about = "Sweep monthly budgets for both repayment strategies")]
struct Args {
    /// Debt list CSV
    #[arg(long)]
    debts: PathBuf,

    /// Smallest monthly budget
    #[arg(long)]
    from: f64,

    /// Largest monthly budget (inclusive)
    #[arg(long)]
    to: f64,

    #[arg(long, default_value_t = 100.0)]
    step: f64,

    /// Projection horizon in months
    #[arg(long, default_value_t = 60)]
    horizon: u32,

    #[arg(long)]
    today: Option<NaiveDate>,

    #[arg(long, default_value = "budget_sweep_output.csv")]
    output: PathBuf,
}

/// One output row
#[derive(Debug, Serialize)]
struct SweepRow {
    budget: f64,
    strategy: Strategy,
    months_to_freedom: Option<u32>,
    debt_free_date: NaiveDate,
    total_interest: f64,
    final_wealth: f64,
    degraded_months: u32,
}

fn budgets(from: f64, to: f64, step: f64) -> Vec<f64> {
    let count = ((to - from) / step).floor() as usize + 1;
    (0..count).map(|i| from + step * i as f64).collect()
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    ensure!(args.step > 0.0, "--step must be positive");
    ensure!(args.from >= 0.0 && args.to >= args.from, "expected 0 <= --from <= --to");

    let start = Instant::now();
    let debts = load_debts(&args.debts)
        .with_context(|| format!("reading debts from {}", args.debts.display()))?;
    println!("Loaded {} debts in {:?}", debts.len(), start.elapsed());

    let config = ProjectionConfig {
        horizon_cap: args.horizon,
        ..Default::default()
    };
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let runner = ScenarioRunner::with_config(config, today);

    let jobs: Vec<(f64, Strategy)> = budgets(args.from, args.to, args.step)
        .into_iter()
        .flat_map(|budget| Strategy::ALL.map(|strategy| (budget, strategy)))
        .collect();

    println!("Running {} projections...", jobs.len());
    let proj_start = Instant::now();

    // Run projections in parallel
    let rows: Vec<SweepRow> = jobs
        .par_iter()
        .map(|&(budget, strategy)| -> Result<SweepRow> {
            let summary = runner.run(&debts, budget, strategy)?.summary();
            Ok(SweepRow {
                budget,
                strategy,
                months_to_freedom: summary.months_to_freedom,
                debt_free_date: summary.debt_free_date,
                total_interest: summary.total_interest,
                final_wealth: summary.final_wealth,
                degraded_months: summary.degraded_months,
            })
        })
        .collect::<Result<_>>()?;

    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());

    if let Some(first_free) = rows.iter().find(|r| r.months_to_freedom.is_some()) {
        println!(
            "\nSmallest budget reaching zero debt within {} months: {:.2} ({})",
            args.horizon, first_free.budget, first_free.strategy
        );
    } else {
        println!("\nNo budget in range reaches zero debt within {} months", args.horizon);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}

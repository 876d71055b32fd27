//! Debt Freedom CLI
//!
//! Command-line interface for strategy advice and repayment projections
//!
//! ```bash
//! debt_freedom recommend --debts data/debts.csv
//! debt_freedom project --debts data/debts.csv --budget 1500 --output points.csv
//! debt_freedom compare --debts data/debts.csv --cashflow data/cashflow.csv --format json
//! ```

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use debt_freedom::budget::load_budget;
use debt_freedom::debt::load_debts;
use debt_freedom::{recommend, Debt, Projection, ProjectionConfig, ScenarioRunner, Strategy};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "debt_freedom", version, about = "Plan the road to zero debt")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Recommend a repayment strategy for a debt list
    Recommend {
        /// Debt list CSV
        #[arg(long)]
        debts: PathBuf,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Project balances and wealth month by month
    Project {
        #[command(flatten)]
        run: RunArgs,

        /// Override the advisor's strategy
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Write the point series to a CSV file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Project both strategies and compare them
    Compare {
        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Debt list CSV
    #[arg(long)]
    debts: PathBuf,

    /// Total monthly amount available for debt payments
    #[arg(long, conflicts_with = "cashflow", required_unless_present = "cashflow")]
    budget: Option<f64>,

    /// Income/expense CSV (kind,label,amount) to derive the budget from
    #[arg(long)]
    cashflow: Option<PathBuf>,

    /// Start date for the debt-free date (defaults to the local date)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Projection config JSON
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Avalanche,
    Snowball,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Avalanche => Strategy::Avalanche,
            StrategyArg::Snowball => Strategy::Snowball,
        }
    }
}

/// Debts, budget and runner resolved from the common arguments
struct Inputs {
    debts: Vec<Debt>,
    budget: f64,
    runner: ScenarioRunner,
}

impl RunArgs {
    fn resolve(&self) -> Result<Inputs> {
        let debts = read_debts(&self.debts)?;

        let budget = match (&self.budget, &self.cashflow) {
            (Some(budget), _) => *budget,
            (None, Some(path)) => load_budget(path)
                .with_context(|| format!("reading cash flow from {}", path.display()))?
                .monthly_budget(&debts)?,
            (None, None) => anyhow::bail!("either --budget or --cashflow is required"),
        };

        let config = match &self.config {
            Some(path) => ProjectionConfig::from_json_path(path)
                .with_context(|| format!("reading config from {}", path.display()))?,
            None => ProjectionConfig::default(),
        };

        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        log::info!(
            "{} debts, monthly budget {:.2}, horizon {} months, today {}",
            debts.len(),
            budget,
            config.horizon_cap,
            today
        );

        Ok(Inputs {
            debts,
            budget,
            runner: ScenarioRunner::with_config(config, today),
        })
    }
}

fn read_debts(path: &Path) -> Result<Vec<Debt>> {
    load_debts(path).with_context(|| format!("reading debts from {}", path.display()))
}

fn cmd_recommend(debts_path: &Path, format: Format) -> Result<()> {
    let debts = read_debts(debts_path)?;

    let Some(rec) = recommend(&debts) else {
        println!("Nothing left to pay: every debt is at zero.");
        return Ok(());
    };

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&rec)?),
        Format::Text => {
            println!("Recommended strategy: {}", rec.recommended);
            println!("  {}", rec.reason);
            println!(
                "  Highest interest: {} ({}%)",
                rec.highest_interest_debt.name,
                rec.highest_interest_debt.annual_rate()
            );
            println!(
                "  Lowest balance:   {} ({:.2})",
                rec.lowest_balance_debt.name, rec.lowest_balance_debt.current_amount
            );
        }
    }
    Ok(())
}

fn cmd_project(run: &RunArgs, strategy: Option<StrategyArg>, output: Option<&Path>) -> Result<()> {
    let inputs = run.resolve()?;

    let result = match strategy {
        Some(arg) => inputs.runner.run(&inputs.debts, inputs.budget, arg.into())?,
        None => inputs.runner.run_recommended(&inputs.debts, inputs.budget)?,
    };

    if let Some(path) = output {
        write_points(path, &result)?;
        log::info!("wrote {} points to {}", result.points.len(), path.display());
    }

    match run.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        Format::Text => print_projection(&result),
    }
    Ok(())
}

fn cmd_compare(run: &RunArgs) -> Result<()> {
    let inputs = run.resolve()?;
    let comparison = inputs.runner.compare(&inputs.debts, inputs.budget)?;

    match run.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&comparison)?),
        Format::Text => {
            println!("{:<10} {:>8} {:>12} {:>14} {:>12}",
                "Strategy", "Months", "Debt-free", "Interest", "Wealth");
            println!("{}", "-".repeat(60));
            for strategy in Strategy::ALL {
                let summary = comparison.get(strategy).summary();
                println!("{:<10} {:>8} {:>12} {:>14.2} {:>12.0}",
                    strategy,
                    freedom_label(summary.months_to_freedom),
                    summary.debt_free_date.to_string(),
                    summary.total_interest,
                    summary.final_wealth,
                );
            }
            println!();
            println!("Avalanche saves {:.2} in interest and {} months (faster: {})",
                comparison.interest_saved_by_avalanche(),
                comparison.months_saved_by_avalanche(),
                comparison.faster(),
            );
        }
    }
    Ok(())
}

fn freedom_label(months: Option<u32>) -> String {
    months.map_or_else(|| "never".to_string(), |m| m.to_string())
}

fn print_projection(result: &Projection) {
    println!("Strategy: {}  Budget: {:.2}", result.strategy, result.monthly_budget);
    println!("{:>10} {:>14} {:>14}", "Month", "Debt", "Wealth");
    println!("{}", "-".repeat(40));
    for point in &result.points {
        println!("{:>10} {:>14.0} {:>14.0}", point.label, point.total_debt, point.wealth);
    }

    let summary = result.summary();
    println!();
    match summary.months_to_freedom {
        Some(months) => println!("{} months to freedom (debt-free by {})", months, summary.debt_free_date),
        None => println!("Still in debt after {} months", result.debt_free_month_index),
    }
    println!("  Total interest: {:.2}", summary.total_interest);
    println!("  Total paid:     {:.2}", summary.total_paid);
    for payoff in &result.payoffs {
        println!("  {} paid off in month {}", payoff.id, payoff.month);
    }
    if summary.degraded_months > 0 {
        println!("  Budget fell short of minimum payments in {} months", summary.degraded_months);
    }
}

fn write_points(path: &Path, result: &Projection) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for point in &result.points {
        writer.serialize(point)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Recommend { debts, format } => cmd_recommend(debts, *format),
        Command::Project { run, strategy, output } => cmd_project(run, *strategy, output.as_deref()),
        Command::Compare { run } => cmd_compare(run),
    }
}

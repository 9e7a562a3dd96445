//! # crime-forecast
//!
//! Command-line interface for the crime-forecast pipeline.

use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crime_forecast::config::PipelineConfig;
use crime_forecast::core::DailySeries;
use crime_forecast::evaluation::{report, Evaluator};
use crime_forecast::ingest::{
    clean_incidents, extract_daily_counts, load_incident_files, read_daily_counts,
    write_daily_counts, CategoryFilter,
};
use crime_forecast::models::ModelRegistry;
use crime_forecast::split::{split, SplitPolicy, Splits};
use crime_forecast::validation::{one_sample_comparison, two_sample_comparison};

#[derive(Parser)]
#[command(name = "crime-forecast")]
#[command(about = "Backtest baseline forecasts of daily crime counts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the daily series, split it and score every baseline model
    Evaluate {
        /// Incident CSV files, one per year
        #[arg(short, long, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Previously saved daily counts (skips loading incident files)
        #[arg(long, conflicts_with = "input")]
        counts: Option<PathBuf>,

        /// Keyword matched against offense descriptions
        #[arg(long)]
        category: Option<String>,

        /// Test window placement
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,

        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the score table to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save the extracted daily counts to this CSV file
        #[arg(long)]
        save_counts: Option<PathBuf>,
    },

    /// Welch t-test: is the mean daily count of range A greater than range B?
    Compare {
        /// Daily counts CSV (date,count)
        #[arg(long)]
        counts: PathBuf,

        #[arg(long)]
        a_start: NaiveDate,

        #[arg(long)]
        a_end: NaiveDate,

        #[arg(long)]
        b_start: NaiveDate,

        #[arg(long)]
        b_end: NaiveDate,

        /// Significance level
        #[arg(long, default_value = "0.05")]
        alpha: f64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Test year follows validate directly (the lockdown year)
    Contiguous,
    /// Test starts after the lockdown year (March 2021)
    Gap,
}

impl PolicyArg {
    fn policy(self) -> SplitPolicy {
        match self {
            PolicyArg::Contiguous => SplitPolicy::pre_lockdown_backtest(),
            PolicyArg::Gap => SplitPolicy::post_recovery(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crime_forecast=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            input,
            counts,
            category,
            policy,
            config,
            output,
            save_counts,
        } => {
            let mut config = match config {
                Some(path) => PipelineConfig::from_json_file(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => PipelineConfig::default(),
            };
            if let Some(category) = category {
                config.category = category;
            }
            if let Some(policy) = policy {
                config.split = policy.policy();
            }

            let series = match counts {
                Some(path) => read_daily_counts(&path)
                    .with_context(|| format!("reading daily counts {}", path.display()))?,
                None => build_series(&input, &config.category)?,
            };
            if let Some(path) = save_counts {
                write_daily_counts(&series, &path)
                    .with_context(|| format!("writing daily counts {}", path.display()))?;
            }

            run_evaluation(&series, &config, output)?;
        }

        Commands::Compare {
            counts,
            a_start,
            a_end,
            b_start,
            b_end,
            alpha,
        } => {
            let series = read_daily_counts(&counts)
                .with_context(|| format!("reading daily counts {}", counts.display()))?;
            let a = series.between(a_start, a_end).as_f64();
            let b = series.between(b_start, b_end).as_f64();

            let result = two_sample_comparison(&a, &b, alpha)?;
            println!(
                "A {a_start}..{a_end} (n = {}) vs B {b_start}..{b_end} (n = {})",
                a.len(),
                b.len()
            );
            println!(
                "t = {:.4}, df = {:.1}, p = {:.6}",
                result.t_statistic, result.degrees_of_freedom, result.p_value
            );
            println!("{}", result.verdict);
        }
    }

    Ok(())
}

fn build_series(input: &[PathBuf], category: &str) -> anyhow::Result<DailySeries> {
    if input.is_empty() {
        bail!("either --input or --counts is required");
    }

    let raw = load_incident_files(input).context("loading incident files")?;
    let incidents = clean_incidents(raw).context("cleaning incidents")?;
    let filter = CategoryFilter::description_contains(category);
    let series = extract_daily_counts(&incidents, |i| filter.matches(i));

    if series.is_empty() {
        bail!("no incidents match category '{category}'");
    }
    Ok(series)
}

fn run_evaluation(
    series: &DailySeries,
    config: &PipelineConfig,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let splits = split(series, &config.split).context("splitting series")?;
    for window in splits.windows() {
        info!(window = %window.label, start = %window.start, end = %window.end, "window");
    }

    let registry = ModelRegistry::baselines(&config.models)?;
    let evaluation = Evaluator::new(registry).evaluate(&splits, &config.targets);

    println!(
        "category: {}  policy: {}",
        config.category,
        config.split.placement_name()
    );
    print!("{}", report::render(&evaluation.table));

    for failure in &evaluation.failures {
        let window = failure
            .window
            .map(|w| w.to_string())
            .unwrap_or_else(|| "fit".to_string());
        println!("failed: {} ({window}): {}", failure.model, failure.error);
    }
    for &target in &config.targets {
        if let Some(best) = evaluation.table.best_for(target) {
            println!("best on {target}: {} (rmse {})", best.model, best.rmse);
        }
    }

    print_comparisons(&splits, config.alpha);

    if let Some(path) = output {
        report::write_csv(&evaluation.table, &path)
            .with_context(|| format!("writing scores {}", path.display()))?;
        info!(path = %path.display(), "wrote score table");
    }

    Ok(())
}

/// Test-window mean against the validate window.
fn print_comparisons(splits: &Splits<'_>, alpha: f64) {
    let test = splits.test().as_f64();
    let validate = splits.validate().as_f64();

    match one_sample_comparison(&test, &validate, alpha) {
        Ok(r) => println!(
            "one-sample test > validate mean: t = {:.4}, p = {:.6}, significant = {}",
            r.t_statistic, r.p_value, r.significant
        ),
        Err(error) => warn!(%error, "one-sample comparison skipped"),
    }
    match two_sample_comparison(&test, &validate, alpha) {
        Ok(r) => println!("welch test vs validate: {}", r.verdict),
        Err(error) => warn!(%error, "two-sample comparison skipped"),
    }
}

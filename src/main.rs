use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use assertgen::config::Config;
use assertgen::file::loader::{load_value_file, load_value_from_stdin};
use assertgen::generator::sink::WriterSink;
use assertgen::generator::{Generator, Subject};

/// assertgen - Record a document's contents as test assertions
#[derive(Parser)]
#[command(name = "assertgen")]
#[command(version)]
#[command(about = "Print test assertions that verify a YAML/JSON document", long_about = None)]
struct Cli {
    /// YAML, JSON or JSON Lines file to inspect (omit to read stdin)
    file: Option<String>,

    /// Expression that re-obtains the document in the test
    #[arg(short, long)]
    expr: Option<String>,

    /// Decimal places for approximate float assertions
    #[arg(short, long, conflicts_with = "exact")]
    precision: Option<u32>,

    /// Assert exact equality for floats and decimals
    #[arg(long)]
    exact: bool,

    /// Express dates relative to this expression (e.g. "Date.today")
    #[arg(long, value_name = "EXPR")]
    relative_dates: Option<String>,

    /// Date the relative-dates expression stands for (default: local today)
    #[arg(long, value_name = "YYYY-MM-DD", requires = "relative_dates")]
    today: Option<NaiveDate>,

    /// Render string keys as symbols
    #[arg(long)]
    symbolize_keys: bool,

    /// Read ISO date and timestamp strings as dates
    #[arg(long)]
    detect_dates: bool,

    /// Maximum container nesting
    #[arg(long)]
    max_depth: Option<usize>,

    /// Log traversal details to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded config.
    fn merge_into(&self, mut config: Config) -> Config {
        if let Some(expr) = &self.expr {
            config.expr = expr.clone();
        }
        if let Some(precision) = self.precision {
            config.precision = precision;
            config.exact_numbers = false;
        }
        if self.exact {
            config.exact_numbers = true;
        }
        if let Some(anchor) = &self.relative_dates {
            config.relative_dates = Some(anchor.clone());
        }
        if self.symbolize_keys {
            config.symbolize_keys = true;
        }
        if self.detect_dates {
            config.detect_dates = true;
        }
        if let Some(depth) = self.max_depth {
            config.max_depth = depth;
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries only assertions; logs go to stderr
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let config = cli.merge_into(Config::load());
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let load_options = config.load_options();
    let value = match &cli.file {
        Some(path) => load_value_file(path, &load_options)?,
        None => load_value_from_stdin(&load_options)?,
    };

    let mut generator = Generator::new(config.generator_options(today), WriterSink::stdout());
    generator
        .run(Subject::value(&value, config.expr.as_str()))
        .context("Failed to generate assertions")?;

    Ok(())
}

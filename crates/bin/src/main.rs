//! Hobart CLI binary.
//!
//! Fetches statements and quotes for one ticker, runs the metric and
//! valuation engines, and prints the report.

use clap::{Parser, Subcommand};
use hobart::analysis::{AnalysisConfig, run_analysis};
use hobart_data::yahoo::{TreasuryYieldProvider, YahooFundamentalsProvider, YahooQuoteProvider};
use hobart_data::{FinancialStatements, QuoteSnapshot};
use hobart_output::{export_metrics_csv, export_report_json, render_report};
use hobart_valuation::DcfParameters;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "hobart")]
#[command(about = "Hobart: fundamental equity valuation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full analysis: metrics, yields, and DCF valuation
    Analyze {
        /// Stock symbol
        symbol: String,

        /// Projection horizon in years
        #[arg(long, default_value = "10")]
        years: u32,

        /// Near-term growth rate, percent
        #[arg(long, default_value = "5.0")]
        growth: f64,

        /// Discount rate, percent
        #[arg(long, default_value = "12.0")]
        discount: f64,

        /// Terminal growth rate, percent
        #[arg(long, default_value = "2.0")]
        terminal: f64,

        /// Hypothetical share price for the scenario comparison
        #[arg(long)]
        target_price: Option<f64>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Also export the metric series as CSV to this path
        #[arg(long)]
        export_csv: Option<PathBuf>,

        /// Also export the full report as JSON to this path
        #[arg(long)]
        export_json: Option<PathBuf>,
    },

    /// Metric series and growth rates only
    Metrics {
        /// Stock symbol
        symbol: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Current quote snapshot and price ratios
    Quote {
        /// Stock symbol
        symbol: String,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            symbol,
            years,
            growth,
            discount,
            terminal,
            target_price,
            format,
            export_csv,
            export_json,
        } => {
            let params = dcf_parameters(years, growth, discount, terminal)?;
            let config = AnalysisConfig {
                dcf: params,
                target_price,
                ..AnalysisConfig::default()
            };

            let (statements, quote) = fetch_company_data(&symbol).await?;
            let bond_yield = TreasuryYieldProvider::new().fetch().await;

            let report = run_analysis(&statements, &quote, &bond_yield, &config);

            if let Some(path) = export_csv {
                export_metrics_csv(&path, &report.symbol, &report.metrics)?;
                eprintln!("Metrics exported to {}", path.display());
            }
            if let Some(path) = export_json {
                export_report_json(&path, &report)?;
                eprintln!("Report exported to {}", path.display());
            }

            match format.as_str() {
                "json" => println!("{}", report.to_json()?),
                _ => println!("{}", render_report(&report)),
            }
        }

        Commands::Metrics { symbol, format } => {
            let (statements, quote) = fetch_company_data(&symbol).await?;
            let bond_yield = TreasuryYieldProvider::new().fetch().await;

            let report = run_analysis(
                &statements,
                &quote,
                &bond_yield,
                &AnalysisConfig::default(),
            );

            match format.as_str() {
                "json" => {
                    println!("{}", serde_json::to_string_pretty(&report.metrics)?);
                }
                _ => {
                    for metric in report.metrics.iter() {
                        print!("{}", hobart_output::render::subsection_header(&metric.name));
                        print!("{}", hobart_output::render::render_metric_table(metric));
                    }
                }
            }
        }

        Commands::Quote { symbol } => {
            let spinner = fetch_spinner(&symbol);
            let quote = YahooQuoteProvider::new().fetch_snapshot(&symbol).await;
            spinner.finish_and_clear();
            let quote = quote?;

            println!("{}", serde_json::to_string_pretty(&quote)?);
        }
    }

    Ok(())
}

/// Validate CLI percentages and convert them to decimal parameters.
fn dcf_parameters(
    years: u32,
    growth: f64,
    discount: f64,
    terminal: f64,
) -> Result<DcfParameters, String> {
    if years == 0 {
        return Err("--years must be at least 1".to_string());
    }
    if discount <= 0.0 {
        return Err("--discount must be a positive percentage".to_string());
    }
    if growth < 0.0 || terminal < 0.0 {
        return Err("growth rates must not be negative".to_string());
    }

    Ok(DcfParameters {
        years,
        near_term_growth: growth / 100.0,
        discount_rate: discount / 100.0,
        terminal_growth: terminal / 100.0,
    })
}

/// Fetch statements and the quote snapshot concurrently, behind a spinner.
async fn fetch_company_data(
    symbol: &str,
) -> Result<(FinancialStatements, QuoteSnapshot), hobart_data::DataError> {
    let spinner = fetch_spinner(symbol);

    let fundamentals = YahooFundamentalsProvider::new();
    let quotes = YahooQuoteProvider::new();

    let result = futures::try_join!(
        fundamentals.fetch_statements(symbol),
        quotes.fetch_snapshot(symbol)
    );

    spinner.finish_and_clear();
    result
}

fn fetch_spinner(symbol: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .expect("Failed to create progress style"),
    );
    spinner.set_message(format!("Fetching data for {symbol}..."));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

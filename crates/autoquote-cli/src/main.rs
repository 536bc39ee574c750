mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use autoquote_core::types::{Currency, PricingPolicy};
use commands::loan::{AffordArgs, LoanArgs};
use commands::pricing::OnRoadArgs;
use commands::quote::QuoteArgs;
use commands::Settings;

/// Car loan and on-road price calculations
#[derive(Parser)]
#[command(
    name = "aq",
    version,
    about = "Car loan EMI and on-road price calculations",
    long_about = "Quote what a car really costs: on-road price with registration and \
                  insurance fees, the monthly installment (EMI) of a loan against it, \
                  the full repayment schedule, and the largest loan a monthly budget \
                  can carry. All amounts use decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// JSON file overriding fee rates and the offered term range
    #[arg(long, global = true)]
    policy: Option<String>,

    /// Currency used when displaying amounts (table and minimal output)
    #[arg(long, default_value = "INR", global = true)]
    currency: Currency,

    /// Log debug detail to stderr (warnings are always shown); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly installment, total payment and total interest for a loan
    Emi(LoanArgs),
    /// Month-by-month amortisation schedule
    Schedule(LoanArgs),
    /// On-road price from the ex-showroom price
    OnRoad(OnRoadArgs),
    /// Full quote: on-road price, clamped loan amount and EMI
    Quote(QuoteArgs),
    /// Largest loan a monthly budget can service
    Afford(AffordArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

/// Filter used when RUST_LOG is unset: quote warnings by default, debug with -v.
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "autoquote_cli=warn,autoquote_core=warn",
        _ => "autoquote_cli=debug,autoquote_core=debug",
    }
}

fn init_tracing(verbose: u8) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(verbose).into()),
        )
        .init();
}

fn load_settings(cli: &Cli) -> Result<Settings, Box<dyn std::error::Error>> {
    let policy = match cli.policy.as_deref() {
        Some(path) => input::file::read_json::<PricingPolicy>(path)?,
        None => PricingPolicy::default(),
    };
    tracing::debug!(?policy, currency = ?cli.currency, "loaded settings");
    Ok(Settings {
        policy,
        currency: cli.currency.clone(),
    })
}

fn run(cli: Cli) -> Result<Option<(serde_json::Value, Settings)>, Box<dyn std::error::Error>> {
    let settings = load_settings(&cli)?;

    let value = match cli.command {
        Commands::Emi(args) => commands::loan::run_emi(args, &settings)?,
        Commands::Schedule(args) => commands::loan::run_schedule(args, &settings)?,
        Commands::OnRoad(args) => commands::pricing::run_on_road(args, &settings)?,
        Commands::Quote(args) => commands::quote::run_quote(args, &settings)?,
        Commands::Afford(args) => commands::loan::run_afford(args, &settings)?,
        Commands::Version => {
            println!("aq {}", env!("CARGO_PKG_VERSION"));
            return Ok(None);
        }
    };
    Ok(Some((value, settings)))
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = cli.output.clone();

    match run(cli) {
        Ok(Some((value, settings))) => {
            output::format_output(&format, &value, &settings.currency);
            process::exit(0);
        }
        Ok(None) => {}
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_shows_core_warnings() {
        let filter = default_filter(0);
        assert!(filter.contains("autoquote_core=warn"));
        assert!(filter.contains("autoquote_cli=warn"));
        assert!(default_filter(1).contains("autoquote_core=debug"));
        assert!(filter
            .parse::<tracing_subscriber::EnvFilter>()
            .is_ok());
    }
}

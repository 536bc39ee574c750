use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use autoquote_core::loan::affordability;
use autoquote_core::loan::emi::{self, LoanQuoteInput};
use autoquote_core::loan::schedule;

use super::Settings;
use crate::input;

/// Loan parameters shared by the EMI and schedule commands
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (8 = 8% p.a.)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Loan term in whole years
    #[arg(long)]
    pub years: Option<u32>,
}

fn loan_input(args: LoanArgs) -> Result<LoanQuoteInput, Box<dyn std::error::Error>> {
    if let Some(parsed) = input::json_input(args.input.as_deref())? {
        return Ok(parsed);
    }
    Ok(LoanQuoteInput {
        principal: args
            .principal
            .ok_or("--principal is required (or provide --input)")?,
        annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
        term_years: args.years.ok_or("--years is required (or provide --input)")?,
    })
}

pub fn run_emi(args: LoanArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = loan_input(args)?;
    let result = emi::calculate_loan_quote(&loan, &settings.policy)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(
    args: LoanArgs,
    _settings: &Settings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = loan_input(args)?;
    let result = schedule::build_schedule(&loan)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the affordability calculation
#[derive(Args)]
pub struct AffordArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly installment the buyer can pay
    #[arg(long)]
    pub emi: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in whole years
    #[arg(long)]
    pub years: Option<u32>,
}

#[derive(Deserialize)]
struct AffordInput {
    target_monthly_payment: Decimal,
    annual_rate_percent: Decimal,
    term_years: u32,
}

pub fn run_afford(
    args: AffordArgs,
    _settings: &Settings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let afford: AffordInput = match input::json_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => AffordInput {
            target_monthly_payment: args.emi.ok_or("--emi is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args.years.ok_or("--years is required (or provide --input)")?,
        },
    };

    let result = affordability::max_loan_for_emi(
        afford.target_monthly_payment,
        afford.annual_rate_percent,
        afford.term_years,
    )?;
    Ok(serde_json::json!({ "result": result }))
}

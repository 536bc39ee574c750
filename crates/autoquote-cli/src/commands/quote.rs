use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use autoquote_core::listing::{self, Listing, ListingCatalog};
use autoquote_core::quote::{self, LoanForm};

use super::Settings;
use crate::input;

/// Arguments for a full car loan quote
#[derive(Args)]
pub struct QuoteArgs {
    /// Path to JSON loan form (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Ex-showroom price (not needed with --listing-id)
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Amount to borrow; defaults to the full on-road price
    #[arg(long, allow_hyphen_values = true)]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Loan term in whole years; out-of-range values are clamped
    #[arg(long, allow_hyphen_values = true)]
    pub years: Option<i64>,

    /// JSON array of marketplace listings ({ id, name, price })
    #[arg(long, requires = "listing_id")]
    pub listings: Option<String>,

    /// Listing whose price seeds the quote
    #[arg(long, requires = "listings")]
    pub listing_id: Option<String>,
}

pub fn run_quote(args: QuoteArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let listed = args.listings.is_some();

    let form: LoanForm = match input::json_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let ex_showroom_price = match args.price {
                Some(price) => price,
                None if listed => Decimal::ZERO,
                None => return Err("--price is required (or provide --input or --listings)".into()),
            };
            LoanForm {
                ex_showroom_price,
                loan_amount: args.loan_amount,
                annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
                term_years: args.years,
            }
        }
    };

    let result = match (args.listings, args.listing_id) {
        (Some(path), Some(id)) => {
            let listings: Vec<Listing> = input::file::read_json(&path)?;
            let catalog = ListingCatalog::new(listings)?;
            listing::quote_for_listing(&catalog, &id, &form, &settings.policy)?
        }
        _ => quote::build_quote(&form, &settings.policy)?,
    };
    Ok(serde_json::to_value(result)?)
}

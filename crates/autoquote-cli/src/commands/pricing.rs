use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use autoquote_core::pricing::on_road;

use super::Settings;
use crate::input;

/// Arguments for the on-road price breakdown
#[derive(Args)]
pub struct OnRoadArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Ex-showroom price of the car
    #[arg(long, allow_hyphen_values = true)]
    pub price: Option<Decimal>,
}

#[derive(Deserialize)]
struct OnRoadInput {
    ex_showroom_price: Decimal,
}

pub fn run_on_road(args: OnRoadArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let price = match input::json_input::<OnRoadInput>(args.input.as_deref())? {
        Some(parsed) => parsed.ex_showroom_price,
        None => args.price.ok_or("--price is required (or provide --input)")?,
    };

    let result = on_road::compute_on_road_price_with(price, &settings.policy)?;
    Ok(serde_json::json!({ "result": result }))
}

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.10 = 10%).
pub type Rate = Decimal;

/// Rates expressed as percentages (8 = 8% per annum), the way buyers quote them.
pub type Percent = Decimal;

/// Digit grouping used when displaying an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grouping {
    /// Lakh/crore grouping: 1,23,45,678
    Indian,
    /// Thousands grouping: 12,345,678
    Western,
}

/// Currency code
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
    AED,
    JPY,
    Other(String),
}

impl Currency {
    pub fn symbol(&self) -> String {
        match self {
            Currency::INR => "₹".into(),
            Currency::USD => "$".into(),
            Currency::EUR => "€".into(),
            Currency::GBP => "£".into(),
            Currency::AED => "AED ".into(),
            Currency::JPY => "¥".into(),
            Currency::Other(code) => format!("{code} "),
        }
    }

    pub fn grouping(&self) -> Grouping {
        match self {
            Currency::INR => Grouping::Indian,
            _ => Grouping::Western,
        }
    }

    /// Smallest unit shown to buyers. Instalments are quoted in whole units.
    pub fn display_decimals(&self) -> u32 {
        0
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        if code.is_empty() {
            return Err("currency code must not be empty".into());
        }
        Ok(match code.as_str() {
            "INR" => Currency::INR,
            "USD" => Currency::USD,
            "EUR" => Currency::EUR,
            "GBP" => Currency::GBP,
            "AED" => Currency::AED,
            "JPY" => Currency::JPY,
            _ => Currency::Other(code),
        })
    }
}

/// Fee rates and form bounds applied when quoting a car.
///
/// Every field has a default, so a partial JSON policy only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    pub registration_fee_rate: Rate,
    pub insurance_fee_rate: Rate,
    pub min_term_years: u32,
    pub max_term_years: u32,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            registration_fee_rate: dec!(0.10),
            insurance_fee_rate: dec!(0.01),
            min_term_years: 1,
            max_term_years: 10,
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    for warning in &warnings {
        tracing::warn!(methodology, "{warning}");
    }
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_parse_is_case_insensitive() {
        assert_eq!("inr".parse::<Currency>().unwrap(), Currency::INR);
        assert_eq!(" usd ".parse::<Currency>().unwrap(), Currency::USD);
        assert_eq!(
            "chf".parse::<Currency>().unwrap(),
            Currency::Other("CHF".into())
        );
        assert!("".parse::<Currency>().is_err());
    }

    #[test]
    fn test_partial_policy_keeps_defaults() {
        let policy: PricingPolicy =
            serde_json::from_str(r#"{ "max_term_years": 7 }"#).unwrap();
        assert_eq!(policy.max_term_years, 7);
        assert_eq!(policy.min_term_years, 1);
        assert_eq!(policy.registration_fee_rate, dec!(0.10));
        assert_eq!(policy.insurance_fee_rate, dec!(0.01));
    }
}

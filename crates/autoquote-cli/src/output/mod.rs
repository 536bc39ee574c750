pub mod csv_out;
pub mod minimal;
pub mod table;

use autoquote_core::format::format_currency;
use autoquote_core::types::Currency;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::OutputFormat;

/// Result fields holding money, shown with the currency symbol in human formats.
const MONEY_FIELDS: &[&str] = &[
    "ex_showroom_price",
    "registration_fee",
    "insurance_fee",
    "on_road_price",
    "loan_amount",
    "down_payment",
    "principal",
    "max_principal",
    "monthly_payment",
    "total_payment",
    "total_interest",
    "total_principal",
    "opening_balance",
    "payment",
    "interest",
    "closing_balance",
];

/// Currency display for a money field, or None for anything else.
pub fn display_money(key: &str, value: &Value, currency: &Currency) -> Option<String> {
    if !MONEY_FIELDS.contains(&key) {
        return None;
    }
    let amount: Decimal = match value {
        Value::String(s) => s.parse().ok()?,
        Value::Number(n) => n.to_string().parse().ok()?,
        _ => return None,
    };
    Some(format_currency(amount, currency))
}

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value, currency: &Currency) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("JSON serialization error: {}", e),
        },
        OutputFormat::Table => table::print_table(value, currency),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value, currency),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_money_formats_known_fields() {
        let shown = display_money("on_road_price", &json!("1110000.00"), &Currency::INR);
        assert_eq!(shown.as_deref(), Some("₹11,10,000"));
    }

    #[test]
    fn test_display_money_ignores_other_fields() {
        assert_eq!(display_money("term_years", &json!(5), &Currency::INR), None);
        assert_eq!(display_money("monthly_payment", &json!(null), &Currency::INR), None);
    }
}

use autoquote_core::types::Currency;
use serde_json::Value;

use super::display_money;

/// Fields that answer the question a command was asked, most specific first.
const HEADLINE_FIELDS: &[&str] = &["max_principal", "monthly_payment", "on_road_price"];

/// Print just the headline figure of the output.
pub fn print_minimal(value: &Value, currency: &Currency) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in HEADLINE_FIELDS {
            if let Some(val) = map.get(*key).filter(|v| !v.is_null()) {
                let shown = display_money(key, val, currency).unwrap_or_else(|| plain(val));
                println!("{}", shown);
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, plain(val));
            return;
        }
    }

    println!("{}", plain(result_obj));
}

fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        _ => value.to_string(),
    }
}

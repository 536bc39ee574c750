use autoquote_core::types::Currency;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::display_money;

/// Render the result envelope as tables: scalar fields first, then any
/// nested list (such as schedule rows), then warnings and methodology.
pub fn print_table(value: &Value, currency: &Currency) {
    let Value::Object(envelope) = value else {
        println!("{}", value);
        return;
    };

    match envelope.get("result") {
        Some(Value::Object(result)) => print_result(result, currency),
        _ => print_fields(envelope, currency),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_result(result: &Map<String, Value>, currency: &Currency) {
    print_fields(result, currency);

    for (key, val) in result {
        if let Value::Array(items) = val {
            if items.iter().any(Value::is_object) {
                println!("\n{}:", key);
                print_rows(items, currency);
            }
        }
    }
}

fn print_fields(map: &Map<String, Value>, currency: &Currency) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if matches!(val, Value::Array(_)) {
            continue;
        }
        builder.push_record([key.as_str(), &cell(key, val, currency)]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value], currency: &Currency) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);

    for row in rows.iter().filter_map(Value::as_object) {
        let record: Vec<String> = headers
            .iter()
            .map(|h| row.get(h).map(|v| cell(h, v, currency)).unwrap_or_default())
            .collect();
        builder.push_record(record);
    }

    println!("{}", Table::from(builder));
}

fn cell(key: &str, value: &Value, currency: &Currency) -> String {
    if let Some(money) = display_money(key, value, currency) {
        return money;
    }
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
        _ => value.to_string(),
    }
}

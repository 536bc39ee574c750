use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
///
/// Schedules become one record per month; any other result becomes
/// `field,value` pairs. Amounts keep full precision.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let outcome = match result {
        Value::Object(map) => match map.get("rows") {
            Some(Value::Array(rows)) => write_rows(&mut wtr, rows),
            _ => write_pairs(&mut wtr, map),
        },
        Value::Array(rows) => write_rows(&mut wtr, rows),
        other => wtr.write_record([csv_value(other)]),
    };

    if let Err(e) = outcome.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        eprintln!("CSV write error: {}", e);
    }
}

fn write_pairs<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    map: &serde_json::Map<String, Value>,
) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in map {
        wtr.write_record([key.clone(), csv_value(val)])?;
    }
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            wtr.write_record([csv_value(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for row in rows.iter().filter_map(Value::as_object) {
        let record: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(csv_value).unwrap_or_default())
            .collect();
        wtr.write_record(&record)?;
    }
    Ok(())
}

fn csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(_) | Value::Bool(_) => value.to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        let result = &value["result"];
        match result.get("rows") {
            Some(Value::Array(rows)) => write_rows(&mut wtr, rows).unwrap(),
            _ => write_pairs(&mut wtr, result.as_object().unwrap()).unwrap(),
        }
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_schedule_rows_become_records() {
        let value = json!({ "result": { "rows": [
            { "month": 1, "payment": "5000" },
            { "month": 2, "payment": "5000" }
        ]}});
        assert_eq!(render(&value), "month,payment\n1,5000\n2,5000\n");
    }

    #[test]
    fn test_scalar_result_becomes_pairs() {
        let value = json!({ "result": { "on_road_price": "1110000" } });
        assert_eq!(render(&value), "field,value\non_road_price,1110000\n");
    }
}

use crate::normalize::observer::Observer;
use crate::normalize::types::Record;
use serde_json::Value;

/// Parse one input line into a record.
///
/// Tries the SIMD parser first and falls back to serde_json when it rejects
/// the line. Anything that is not a JSON object is reported to the observer
/// and dropped; parse errors never leave this function.
pub fn parse_line<O: Observer>(line: &str, observer: &O) -> Option<Record> {
    let mut bytes = line.as_bytes().to_vec();
    let parsed = match simd_json::serde::from_slice::<Value>(&mut bytes) {
        Ok(value) => Ok(value),
        Err(_) => serde_json::from_str::<Value>(line).map_err(|e| e.to_string()),
    };

    match parsed {
        Ok(Value::Object(record)) => Some(record),
        Ok(other) => {
            observer.malformed_line(line, &format!("expected a JSON object, found {}", kind(&other)));
            None
        }
        Err(reason) => {
            observer.malformed_line(line, &reason);
            None
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

use crate::normalize::types::Record;
use serde_json::Value;

/// Flatten nested objects into top-level keys joined by `separator`.
///
/// `{"parking": {"total": 3}}` becomes `{"parking/total": 3}`. Arrays are
/// kept as opaque values. A key produced twice keeps the later value.
pub fn flatten(record: Record, separator: &str) -> Record {
    let mut flat = Record::new();
    flatten_into(record, separator, None, &mut flat);
    flat
}

fn flatten_into(record: Record, separator: &str, prefix: Option<&str>, flat: &mut Record) {
    for (key, value) in record {
        let flat_key = match prefix {
            Some(prefix) if !prefix.is_empty() => format!("{}{}{}", prefix, separator, key),
            _ => key,
        };

        match value {
            Value::Object(nested) => flatten_into(nested, separator, Some(&flat_key), flat),
            other => {
                flat.insert(flat_key, other);
            }
        }
    }
}

/// Rebuild nested objects by splitting keys on `separator`.
///
/// Inverse of [`flatten`] for keys that do not themselves contain the
/// separator. When a key names both a value and a parent of other keys, the
/// nested object wins.
pub fn unflatten(record: Record, separator: &str) -> Record {
    let mut nested = Record::new();
    for (key, value) in record {
        let parts: Vec<&str> = key.split(separator).collect();
        insert_nested(&mut nested, &parts, value);
    }
    nested
}

fn insert_nested(target: &mut Record, parts: &[&str], value: Value) {
    match parts {
        [] => {}
        [leaf] => {
            if !matches!(target.get(*leaf), Some(Value::Object(_))) {
                target.insert(leaf.to_string(), value);
            }
        }
        [parent, rest @ ..] => {
            let slot = target
                .entry(parent.to_string())
                .or_insert_with(|| Value::Object(Record::new()));
            if !slot.is_object() {
                *slot = Value::Object(Record::new());
            }
            if let Value::Object(child) = slot {
                insert_nested(child, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_flatten_nested() {
        let input = record(json!({
            "ml_num": "A1",
            "parking": {"total": 2, "garage": 1},
            "scores": {"school": 8},
            "house_area": {"estimate": {"low": 900, "high": 1100}}
        }));

        let flat = flatten(input, "/");
        assert_eq!(
            Value::Object(flat.clone()),
            json!({
                "ml_num": "A1",
                "parking/total": 2,
                "parking/garage": 1,
                "scores/school": 8,
                "house_area/estimate/low": 900,
                "house_area/estimate/high": 1100
            })
        );
        assert!(flat.values().all(|v| !v.is_object()));
    }

    #[test]
    fn test_flatten_keeps_input_order() {
        let flat = flatten(record(json!({"b": {"y": 1, "x": 2}, "a": 3})), "/");
        let keys: Vec<&str> = flat.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b/y", "b/x", "a"]);
    }

    #[test]
    fn test_arrays_are_opaque() {
        let input = record(json!({"rooms": [{"name": "kitchen"}, {"name": "den"}], "tags": []}));
        let flat = flatten(input.clone(), "/");
        assert_eq!(flat, input);
    }

    #[test]
    fn test_custom_separator_and_empty_objects() {
        let flat = flatten(record(json!({"map": {"lat": 1.5}, "land": {}})), ".");
        assert_eq!(Value::Object(flat), json!({"map.lat": 1.5}));
    }

    #[test]
    fn test_empty_key_prefix_is_not_joined() {
        let flat = flatten(record(json!({"": {"a": 1}})), "/");
        assert_eq!(Value::Object(flat), json!({"a": 1}));
    }

    #[test]
    fn test_collision_keeps_later_value() {
        let flat = flatten(record(json!({"parking/total": 1, "parking": {"total": 2}})), "/");
        assert_eq!(Value::Object(flat), json!({"parking/total": 2}));
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let once = flatten(
            record(json!({"a": {"b": {"c": 1}}, "d": [1, {"e": 2}], "f": null})),
            "/",
        );
        let twice = flatten(once.clone(), "/");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unflatten_round_trip() {
        let original = record(json!({
            "ml_num": "A1",
            "parking": {"total": 2, "parking_type": "Driveway"},
            "map": {"lat": 43.6, "lon": -79.4},
            "land": {"front": 30.0, "extra": {"depth": 100.5}},
            "tags": ["pool", "garden"],
            "sold": null
        }));

        let round_trip = unflatten(flatten(original.clone(), "/"), "/");
        assert_eq!(round_trip, original);
    }

    #[test]
    fn test_unflatten_nested_object_wins_over_scalar() {
        let flat = record(json!({"parking": 1, "parking/total": 2, "map/lat": 43.6, "map": "x"}));

        let nested = unflatten(flat, "/");
        assert_eq!(
            Value::Object(nested),
            json!({"parking": {"total": 2}, "map": {"lat": 43.6}})
        );
    }
}

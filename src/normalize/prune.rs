use crate::normalize::types::Record;
use crate::schema::Schema;

/// Keep only the fields the schema declares.
///
/// Builds a new record rather than editing the input, so callers holding the
/// unpruned record never see it change.
pub fn prune(record: &Record, schema: &Schema) -> Record {
    record
        .iter()
        .filter(|(key, _)| schema.contains(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Owned variant of [`prune`] for pipeline stages that consume the record
pub fn prune_owned(record: Record, schema: &Schema) -> Record {
    record
        .into_iter()
        .filter(|(key, _)| schema.contains(key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldType, HOUSE_SIGMA_SCHEMA};
    use serde_json::{json, Value};
    use std::collections::HashSet;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_removes_exactly_unknown_fields() {
        let input = record(json!({
            "ml_num": "A1",
            "parking/total": 2,
            "scores/school": 8,
            "photo_count": 12,
            "map/zoom": 3
        }));

        let pruned = prune(&input, &HOUSE_SIGMA_SCHEMA);

        let input_keys: HashSet<&String> = input.keys().collect();
        let kept: HashSet<&String> = pruned.keys().collect();
        let removed: HashSet<&String> = input_keys.difference(&kept).copied().collect();
        let unknown: HashSet<&String> = input.keys().filter(|k| !HOUSE_SIGMA_SCHEMA.contains(k)).collect();

        assert_eq!(removed, unknown);
        assert_eq!(
            Value::Object(pruned),
            json!({"ml_num": "A1", "parking/total": 2, "scores/school": 8})
        );
        assert_eq!(input.len(), 5);
    }

    #[test]
    fn test_prune_is_idempotent() {
        let schema = Schema::new([("a", FieldType::Int32), ("b/c", FieldType::Category)]);
        let input = record(json!({"a": 1, "b/c": "x", "b/d": "y", "e": null}));

        let once = prune(&input, &schema);
        assert_eq!(prune(&once, &schema), once);
        assert_eq!(prune_owned(input, &schema), once);
    }

    #[test]
    fn test_keeps_values_untouched() {
        let schema = Schema::new([("bedroom", FieldType::Int32)]);
        let pruned = prune(&record(json!({"bedroom": "3+1"})), &schema);

        // Type tags are advisory; a string in an int32 column passes through.
        assert_eq!(pruned.get("bedroom"), Some(&json!("3+1")));
    }
}

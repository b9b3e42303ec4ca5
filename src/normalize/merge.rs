use crate::normalize::types::Record;
use serde_json::Value;

/// Shallow-merge the named top-level sections of a record.
///
/// Sections are applied in order, so a key in a later section overwrites
/// the same key from an earlier one. A missing section, or one that is not
/// an object, contributes nothing. Everything outside the sections is
/// discarded.
pub fn merge_sections<S: AsRef<str>>(mut record: Record, sections: &[S]) -> Record {
    let mut merged = Record::new();

    for section in sections {
        if let Some(Value::Object(fields)) = record.get_mut(section.as_ref()).map(Value::take) {
            for (key, value) in fields {
                merged.insert(key, value);
            }
        }
    }

    merged
}

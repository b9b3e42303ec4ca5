use crate::normalize::observer::Observer;
use crate::normalize::types::{FieldPath, Record, Resolved};
use serde_json::Value;
use std::collections::HashSet;

/// Why a record was or was not let through the duplicate filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    /// The record itself was empty
    Empty,
    /// No truthy value at the key path
    MissingKey,
    Duplicate,
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        self == Verdict::Accepted
    }
}

/// Drops records whose value at a key path has already been seen in this run
#[derive(Debug)]
pub struct DuplicateFilter {
    path: FieldPath,
    seen: HashSet<String>,
}

impl DuplicateFilter {
    pub fn new(path: FieldPath) -> Self {
        DuplicateFilter {
            path,
            seen: HashSet::new(),
        }
    }

    /// Number of distinct keys accepted so far
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn accept<O: Observer>(&mut self, record: &Record, observer: &O) -> bool {
        self.check(record, observer).is_accepted()
    }

    /// Classify a record, remembering its key when it is accepted.
    ///
    /// A record with no value, `null`, or an empty/zero/false value at the
    /// key path is rejected as if its key had already been seen.
    pub fn check<O: Observer>(&mut self, record: &Record, observer: &O) -> Verdict {
        if record.is_empty() {
            return Verdict::Empty;
        }

        let key = match self.path.resolve(record) {
            Resolved::Found(value) if is_truthy(value) => value,
            _ => {
                observer.missing_key(&self.path);
                return Verdict::MissingKey;
            }
        };

        if self.seen.insert(seen_key(key)) {
            Verdict::Accepted
        } else {
            observer.duplicate(&self.path, key);
            Verdict::Duplicate
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Canonical text of a key.
///
/// Numbers compare by value, so `1`, `1.0` and `1e0` share a key, and `true`
/// keys like `1`. Strings carry their own tag so `"1"` and `1` stay distinct.
fn seen_key(value: &Value) -> String {
    match value {
        Value::String(s) => format!("s:{}", s),
        Value::Bool(b) => format!("n:{}", u8::from(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                format!("n:{}", i)
            } else if let Some(u) = n.as_u64() {
                format!("n:{}", u)
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 => format!("n:{:.0}", f),
                    Some(f) => format!("n:{}", f),
                    None => format!("n:{}", n),
                }
            }
        }
        other => format!("j:{}", other),
    }
}

//! Run-scoped observation of pipeline events
//!
//! Stages never log through global state directly. They report what they
//! drop to an `Observer` handed to them by the pipeline, which decides how
//! the event is surfaced.

use crate::normalize::types::FieldPath;
use serde::Serialize;
use serde_json::Value;
use tracing::Span;

/// Receives notable events from the pipeline stages
pub trait Observer {
    /// A line could not be parsed into a JSON object
    fn malformed_line(&self, line: &str, reason: &str);

    /// A record was dropped because its dedup key was already seen
    fn duplicate(&self, path: &FieldPath, key: &Value);

    /// A record was dropped because it has no usable value at the dedup key
    fn missing_key(&self, _path: &FieldPath) {}
}

impl<O: Observer + ?Sized> Observer for &O {
    fn malformed_line(&self, line: &str, reason: &str) {
        (**self).malformed_line(line, reason)
    }

    fn duplicate(&self, path: &FieldPath, key: &Value) {
        (**self).duplicate(path, key)
    }

    fn missing_key(&self, path: &FieldPath) {
        (**self).missing_key(path)
    }
}

/// Emits pipeline events as `tracing` events inside a per-run span
#[derive(Debug)]
pub struct TracingObserver {
    span: Span,
}

impl TracingObserver {
    pub fn new(dedup_key: &FieldPath) -> Self {
        TracingObserver {
            span: tracing::info_span!("normalize", dedup_key = %dedup_key),
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Observer for TracingObserver {
    fn malformed_line(&self, line: &str, reason: &str) {
        let _entered = self.span.enter();
        tracing::warn!(%reason, "cannot parse {}", line);
    }

    fn duplicate(&self, path: &FieldPath, key: &Value) {
        let _entered = self.span.enter();
        tracing::debug!("found a duplicate entry with {} = {}", path, key);
    }

    fn missing_key(&self, path: &FieldPath) {
        let _entered = self.span.enter();
        tracing::trace!("dropping entry without a value at {}", path);
    }
}

/// Counters describing one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub lines: u64,
    pub malformed: u64,
    pub empty: u64,
    pub missing_key: u64,
    pub duplicates: u64,
    pub emitted: u64,
}

impl RunStats {
    /// Records read but not emitted
    pub fn dropped(&self) -> u64 {
        self.malformed + self.empty + self.missing_key + self.duplicates
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;

    /// Keeps every event so tests can assert on them
    #[derive(Debug, Default)]
    pub struct RecordingObserver {
        pub malformed: RefCell<Vec<String>>,
        pub duplicates: RefCell<Vec<(String, Value)>>,
        pub missing: RefCell<Vec<String>>,
    }

    impl Observer for RecordingObserver {
        fn malformed_line(&self, line: &str, _reason: &str) {
            self.malformed.borrow_mut().push(line.to_string());
        }

        fn duplicate(&self, path: &FieldPath, key: &Value) {
            self.duplicates.borrow_mut().push((path.to_string(), key.clone()));
        }

        fn missing_key(&self, path: &FieldPath) {
            self.missing.borrow_mut().push(path.to_string());
        }
    }
}

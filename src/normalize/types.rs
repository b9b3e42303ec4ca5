use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A single listing: string keys to JSON values, in input order
pub type Record = Map<String, Value>;

/// Separator used between nested key names, both for flattening and for
/// writing a `FieldPath` as text
pub const DEFAULT_SEPARATOR: &str = "/";

/// Errors raised while building a pipeline configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("field path must have at least one segment")]
    EmptyFieldPath,

    #[error("field path `{0}` contains an empty segment")]
    EmptySegment(String),

    #[error("separator must not be empty")]
    EmptySeparator,
}

/// Ordered key segments identifying a possibly nested field, e.g. `map/lat`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<String>);

/// Outcome of looking a `FieldPath` up in a record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Found(&'a Value),
    NotFound,
}

impl FieldPath {
    pub fn new<I, S>(segments: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(ConfigError::EmptyFieldPath);
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(ConfigError::EmptySegment(segments.join(DEFAULT_SEPARATOR)));
        }
        Ok(FieldPath(segments))
    }

    /// A path with a single top-level key
    pub fn single(key: impl Into<String>) -> Self {
        FieldPath(vec![key.into()])
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Walk the path one segment at a time.
    ///
    /// Any step that lands on something other than an object while segments
    /// remain yields `NotFound`, as does a `null` at the end of the path.
    pub fn resolve<'a>(&self, record: &'a Record) -> Resolved<'a> {
        let (last, parents) = match self.0.split_last() {
            Some(split) => split,
            None => return Resolved::NotFound,
        };

        let mut current = record;
        for segment in parents {
            match current.get(segment) {
                Some(Value::Object(child)) => current = child,
                _ => return Resolved::NotFound,
            }
        }

        match current.get(last) {
            None | Some(Value::Null) => Resolved::NotFound,
            Some(value) => Resolved::Found(value),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(DEFAULT_SEPARATOR))
    }
}

impl FromStr for FieldPath {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ConfigError::EmptyFieldPath);
        }
        FieldPath::new(s.split(DEFAULT_SEPARATOR))
    }
}

/// Configuration for the normalization pipeline
#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    /// Separator placed between nested key names when flattening
    pub separator: String,

    /// Field whose value identifies a listing for duplicate suppression
    pub dedup_key: FieldPath,

    /// Top-level sections merged into one record, later sections win
    pub sections: Vec<String>,
}

impl NormalizeConfig {
    pub fn with_separator(mut self, separator: impl Into<String>) -> Result<Self, ConfigError> {
        let separator = separator.into();
        if separator.is_empty() {
            return Err(ConfigError::EmptySeparator);
        }
        self.separator = separator;
        Ok(self)
    }

    pub fn with_dedup_key(mut self, dedup_key: FieldPath) -> Self {
        self.dedup_key = dedup_key;
        self
    }
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        NormalizeConfig {
            separator: String::from(DEFAULT_SEPARATOR),
            dedup_key: FieldPath::single("ml_num"),
            sections: vec![String::from("house"), String::from("analytics")],
        }
    }
}

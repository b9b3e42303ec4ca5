//! Output schema: the allow-list of flattened field names
//!
//! Each field carries a type tag for the downstream table loader. The tags
//! are advisory; nothing in this crate checks values against them.

pub mod house_sigma;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

pub use house_sigma::HOUSE_SIGMA_SCHEMA;

/// Declared semantic type of an output column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text or mixed values
    Object,
    Category,
    Int32,
    Float64,
    Datetime64,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Object => "object",
            FieldType::Category => "category",
            FieldType::Int32 => "int32",
            FieldType::Float64 => "float64",
            FieldType::Datetime64 => "datetime64",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field names allowed in output records, in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<(String, FieldType)>,
    index: HashMap<String, usize>,
}

impl Schema {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, FieldType)>,
        S: Into<String>,
    {
        let mut schema = Schema {
            fields: Vec::new(),
            index: HashMap::new(),
        };
        for (name, field_type) in fields {
            schema.insert(name.into(), field_type);
        }
        schema
    }

    /// Load a schema from a JSON object of `{"field": "type"}` pairs
    pub fn from_json_str(json: &str) -> Result<Self> {
        let dtypes: serde_json::Map<String, Value> =
            serde_json::from_str(json).context("Schema must be a JSON object")?;

        let mut fields = Vec::with_capacity(dtypes.len());
        for (name, tag) in dtypes {
            let field_type: FieldType = serde_json::from_value(tag)
                .with_context(|| format!("Unknown type for schema field `{}`", name))?;
            fields.push((name, field_type));
        }
        Ok(Schema::new(fields))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema file: {}", path.display()))?;
        Self::from_json_str(&json)
    }

    fn insert(&mut self, name: String, field_type: FieldType) {
        match self.index.get(&name) {
            Some(&pos) => self.fields[pos].1 = field_type,
            None => {
                self.index.insert(name.clone(), self.fields.len());
                self.fields.push((name, field_type));
            }
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.index.contains_key(field)
    }

    pub fn field_type(&self, field: &str) -> Option<FieldType> {
        self.index.get(field).map(|&pos| self.fields[pos].1)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// The dtype map handed to the table loader, in declaration order
    pub fn dtypes(&self) -> serde_json::Map<String, Value> {
        self.fields
            .iter()
            .map(|(name, field_type)| (name.clone(), Value::from(field_type.as_str())))
            .collect()
    }
}

//! Listing normalization - turn raw JSON lines into flat, schema-bound rows
//!
//! The stages run in this order, each pulling from the one before:
//!
//! 1. `source`: lines from one or more inputs, in order
//! 2. `parser`: JSON objects, malformed lines dropped with a warning
//! 3. `merge`: the `house` and `analytics` sections combined
//! 4. `dedup`: listings whose key was already seen are dropped
//! 5. `flatten`: nested objects become `parent/child` keys
//! 6. `prune`: fields outside the schema removed

pub mod types;
pub mod source;
pub mod parser;
pub mod merge;
pub mod dedup;
pub mod flatten;
pub mod prune;
pub mod observer;
pub mod pipeline;
pub mod writer;

pub use types::{ConfigError, FieldPath, NormalizeConfig, Record, Resolved, DEFAULT_SEPARATOR};
pub use source::LineSource;
pub use parser::parse_line;
pub use merge::merge_sections;
pub use dedup::{DuplicateFilter, Verdict};
pub use flatten::{flatten, unflatten};
pub use prune::{prune, prune_owned};
pub use observer::{Observer, RunStats, TracingObserver};
pub use pipeline::Normalizer;
pub use writer::RecordWriter;

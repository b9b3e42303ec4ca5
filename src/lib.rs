//! # Hearth - listing normalization
//!
//! Turns line-delimited JSON listing dumps into flat rows ready for a typed
//! table loader.
//!
//! ## Modules
//!
//! - **normalize**: the streaming pipeline (parse, merge, dedup, flatten, prune)
//! - **schema**: the allow-list of output fields and their declared types
//!
//! ## Quick Start
//!
//! ```rust
//! use hearth::normalize::{LineSource, NormalizeConfig, Normalizer, TracingObserver};
//! use hearth::HOUSE_SIGMA_SCHEMA;
//! use std::io::Cursor;
//!
//! # fn main() -> anyhow::Result<()> {
//! let input = r#"{"house": {"ml_num": "A1", "parking": {"total": 2}}, "analytics": {"scores": {"school": 8}}}"#;
//!
//! let config = NormalizeConfig::default();
//! let observer = TracingObserver::new(&config.dedup_key);
//! let lines = LineSource::from_reader("inline", Cursor::new(input));
//!
//! for record in Normalizer::new(lines, config, &HOUSE_SIGMA_SCHEMA, observer) {
//!     let record = record?;
//!     assert_eq!(record["parking/total"], 2);
//! }
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use std::io::Write;
use std::path::Path;

pub mod normalize;
pub mod schema;

// Re-export commonly used types for convenience
pub use normalize::{
    FieldPath, LineSource, NormalizeConfig, Normalizer, Observer, Record, RecordWriter, RunStats,
    TracingObserver,
};
pub use schema::{FieldType, Schema, HOUSE_SIGMA_SCHEMA};

/// Open the given files and return the lazy stream of normalized records.
///
/// Fails up front if any file cannot be opened.
pub fn normalize_files<'s, I, P>(
    paths: I,
    config: NormalizeConfig,
    schema: &'s Schema,
) -> Result<Normalizer<'s, LineSource, TracingObserver>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let lines = LineSource::open(paths)?;
    let observer = TracingObserver::new(&config.dedup_key);
    Ok(Normalizer::new(lines, config, schema, observer))
}

/// Main entry point: normalize a line source into a JSON Lines writer
pub fn normalize_to_writer<W: Write, O: Observer>(
    lines: LineSource,
    writer: &mut RecordWriter<W>,
    config: NormalizeConfig,
    schema: &Schema,
    observer: O,
) -> Result<RunStats> {
    let mut normalizer = Normalizer::new(lines, config, schema, observer);
    writer.write_all(normalizer.by_ref())?;
    writer.flush()?;
    Ok(normalizer.stats())
}

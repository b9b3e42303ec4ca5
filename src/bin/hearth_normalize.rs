//! hearth-normalize: Normalize listing dumps into flat JSON Lines
//!
//! Usage:
//!   # Normalize several dumps, in order, to stdout
//!   hearth-normalize day1.jsonl day2.jsonl
//!
//!   # Read from stdin, write to a file
//!   cat dump.jsonl | hearth-normalize -o listings.jsonl
//!
//!   # Deduplicate on a nested key with a custom schema
//!   hearth-normalize --dedup-key map/lat --schema dtypes.json dump.jsonl
//!
//!   # Print the dtype map for the table loader
//!   hearth-normalize --print-schema

// Use MiMalloc allocator for better performance
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use once_cell::sync::Lazy;
use hearth::normalize::{DEFAULT_SEPARATOR, LineSource};
use hearth::{normalize_to_writer, FieldPath, NormalizeConfig, RecordWriter, Schema, TracingObserver, HOUSE_SIGMA_SCHEMA};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hearth-normalize")]
#[command(about = "Deduplicate, flatten and prune listing JSON Lines", long_about = None)]
struct Args {
    /// Input files, read in order (use stdin if omitted)
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// Output file (stdout if omitted)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Field identifying a listing, nested segments joined by "/"
    #[arg(long, default_value = "ml_num")]
    dedup_key: FieldPath,

    /// Separator placed between nested key names
    #[arg(long, default_value = DEFAULT_SEPARATOR)]
    separator: String,

    /// JSON file of {"field": "type"} pairs replacing the built-in schema
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Print the active schema's dtype map and exit
    #[arg(long)]
    print_schema: bool,

    /// Log filter, e.g. "debug" or "hearth=trace" (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref())?;

    let schema = select_schema(args.schema.as_deref())?;

    if args.print_schema {
        println!("{}", render_schema(&schema)?);
        return Ok(());
    }

    let config = NormalizeConfig::default()
        .with_separator(args.separator)?
        .with_dedup_key(args.dedup_key);

    let lines = open_inputs(&args.inputs)?;

    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create output: {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };
    let mut writer = RecordWriter::new(BufWriter::new(output));

    let observer = TracingObserver::new(&config.dedup_key);
    let span = observer.span().clone();
    let stats = normalize_to_writer(lines, &mut writer, config, &schema, observer)?;

    let _entered = span.enter();
    tracing::info!(
        lines = stats.lines,
        emitted = stats.emitted,
        malformed = stats.malformed,
        duplicates = stats.duplicates,
        missing_key = stats.missing_key,
        empty = stats.empty,
        "normalization finished"
    );
    tracing::debug!(stats = %serde_json::to_string(&stats)?, "run stats");

    Ok(())
}

/// The built-in listing schema, or the one loaded from `path`
fn select_schema(path: Option<&Path>) -> Result<Cow<'static, Schema>> {
    let Some(path) = path else {
        return Ok(Cow::Borrowed(Lazy::force(&HOUSE_SIGMA_SCHEMA)));
    };

    let schema = Schema::from_json_file(path)?;
    if schema.is_empty() {
        tracing::warn!("schema {} declares no fields; every field will be pruned", path.display());
    }
    Ok(Cow::Owned(schema))
}

/// The dtype map as pretty JSON, for the table loader
fn render_schema(schema: &Schema) -> Result<String> {
    serde_json::to_string_pretty(&schema.dtypes()).context("Failed to serialize schema")
}

/// Files in order, or stdin when none are given
fn open_inputs(inputs: &[PathBuf]) -> Result<LineSource> {
    if inputs.is_empty() {
        Ok(LineSource::from_reader("stdin", BufReader::new(std::io::stdin())))
    } else {
        LineSource::open(inputs)
    }
}

/// Log to stderr so stdout stays a clean record stream
fn init_tracing(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).context("Invalid --log-level")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hearth=info,hearth_normalize=info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth::FieldType;
    use std::io::Write as _;

    #[test]
    fn test_builtin_schema_without_override() {
        let schema = select_schema(None).unwrap();
        assert!(matches!(schema, Cow::Borrowed(_)));
        assert_eq!(schema.len(), HOUSE_SIGMA_SCHEMA.len());
    }

    #[test]
    fn test_schema_override_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dtypes.json");
        std::fs::write(&path, r#"{"ml_num": "object", "map/lat": "float64"}"#).unwrap();

        let schema = select_schema(Some(path.as_path())).unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.field_type("map/lat"), Some(FieldType::Float64));
        assert!(!schema.contains("bedroom"));
    }

    #[test]
    fn test_schema_override_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(select_schema(Some(dir.path().join("nope.json").as_path())).is_err());
    }

    #[test]
    fn test_render_schema() {
        let schema = Schema::new([("ml_num", FieldType::Object), ("bedroom", FieldType::Int32)]);
        let rendered: serde_json::Value = serde_json::from_str(&render_schema(&schema).unwrap()).unwrap();
        assert_eq!(rendered, serde_json::json!({"ml_num": "object", "bedroom": "int32"}));
    }

    #[test]
    fn test_open_inputs_reads_files_in_order() {
        let mut first = tempfile::NamedTempFile::new().unwrap();
        writeln!(first, "a").unwrap();
        let mut second = tempfile::NamedTempFile::new().unwrap();
        writeln!(second, "b").unwrap();

        let inputs = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        let lines: Vec<String> = open_inputs(&inputs).unwrap().collect::<Result<_>>().unwrap();
        assert_eq!(lines, vec!["a", "b"]);
    }
}

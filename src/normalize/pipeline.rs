//! Pull-based composition of the normalization stages
//!
//! Each call to `next` reads lines until one survives every stage, so no
//! stage ever runs ahead of the consumer.

use crate::normalize::dedup::{DuplicateFilter, Verdict};
use crate::normalize::flatten::flatten;
use crate::normalize::merge::merge_sections;
use crate::normalize::observer::{Observer, RunStats};
use crate::normalize::parser::parse_line;
use crate::normalize::prune::prune_owned;
use crate::normalize::types::{NormalizeConfig, Record};
use crate::schema::Schema;
use anyhow::Result;

/// Turns a stream of raw lines into a stream of flat, pruned records
pub struct Normalizer<'s, L, O> {
    lines: L,
    config: NormalizeConfig,
    schema: &'s Schema,
    dedup: DuplicateFilter,
    observer: O,
    stats: RunStats,
}

impl<'s, L, O> Normalizer<'s, L, O>
where
    L: Iterator<Item = Result<String>>,
    O: Observer,
{
    pub fn new(lines: L, config: NormalizeConfig, schema: &'s Schema, observer: O) -> Self {
        let dedup = DuplicateFilter::new(config.dedup_key.clone());
        Normalizer {
            lines,
            config,
            schema,
            dedup,
            observer,
            stats: RunStats::default(),
        }
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Run one line through every stage
    fn process(&mut self, line: &str) -> Option<Record> {
        self.stats.lines += 1;

        let Some(parsed) = parse_line(line, &self.observer) else {
            self.stats.malformed += 1;
            return None;
        };

        let merged = merge_sections(parsed, &self.config.sections);

        match self.dedup.check(&merged, &self.observer) {
            Verdict::Accepted => {}
            Verdict::Empty => {
                self.stats.empty += 1;
                return None;
            }
            Verdict::MissingKey => {
                self.stats.missing_key += 1;
                return None;
            }
            Verdict::Duplicate => {
                self.stats.duplicates += 1;
                return None;
            }
        }

        let flat = flatten(merged, &self.config.separator);
        self.stats.emitted += 1;
        Some(prune_owned(flat, self.schema))
    }
}

impl<'s, L, O> Iterator for Normalizer<'s, L, O>
where
    L: Iterator<Item = Result<String>>,
    O: Observer,
{
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };

            if let Some(record) = self.process(&line) {
                return Some(Ok(record));
            }
        }
    }
}

use anyhow::{Context, Result};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// Lazily yields the lines of several inputs, one input after another
pub struct LineSource {
    pending: VecDeque<(String, Box<dyn BufRead>)>,
    current: Option<(String, Lines<Box<dyn BufRead>>)>,
}

impl LineSource {
    /// Open every file up front so a missing input fails before any record
    /// is produced. Reading still happens one line at a time.
    pub fn open<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut pending = VecDeque::new();
        for path in paths {
            let path = path.as_ref();
            let file = File::open(path)
                .with_context(|| format!("Failed to open input: {}", path.display()))?;
            pending.push_back((
                path.display().to_string(),
                Box::new(BufReader::new(file)) as Box<dyn BufRead>,
            ));
        }

        Ok(LineSource { pending, current: None })
    }

    /// Read from an already open reader, e.g. stdin
    pub fn from_reader<R: BufRead + 'static>(name: impl Into<String>, reader: R) -> Self {
        let mut pending = VecDeque::new();
        pending.push_back((name.into(), Box::new(reader) as Box<dyn BufRead>));
        LineSource { pending, current: None }
    }

    /// Append another reader after the ones already queued
    pub fn append<R: BufRead + 'static>(mut self, name: impl Into<String>, reader: R) -> Self {
        self.pending.push_back((name.into(), Box::new(reader)));
        self
    }
}

impl Iterator for LineSource {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((name, lines)) = self.current.as_mut() {
                match lines.next() {
                    Some(line) => {
                        return Some(line.with_context(|| format!("Failed to read line from {}", name)));
                    }
                    None => self.current = None,
                }
            }

            let (name, reader) = self.pending.pop_front()?;
            self.current = Some((name, reader.lines()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_concatenates_in_order() {
        let source = LineSource::from_reader("a", Cursor::new("1\n2\n"))
            .append("empty", Cursor::new(""))
            .append("b", Cursor::new("3\n4"));

        let lines: Vec<String> = source.collect::<Result<_>>().unwrap();
        assert_eq!(lines, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_open_files() {
        let mut first = tempfile::NamedTempFile::new().unwrap();
        writeln!(first, "{{\"a\": 1}}").unwrap();
        let mut second = tempfile::NamedTempFile::new().unwrap();
        writeln!(second, "{{\"b\": 2}}").unwrap();
        writeln!(second, "{{\"c\": 3}}").unwrap();

        let source = LineSource::open([first.path(), second.path()]).unwrap();
        let lines: Vec<String> = source.collect::<Result<_>>().unwrap();
        assert_eq!(lines, vec!["{\"a\": 1}", "{\"b\": 2}", "{\"c\": 3}"]);
    }

    #[test]
    fn test_missing_file_fails_on_open() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.jsonl");

        let err = LineSource::open([&missing]).err().unwrap();
        assert!(err.to_string().contains("missing.jsonl"));
    }
}

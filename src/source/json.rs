//! JSON order exports
//!
//! Reads orders exported from the document database as JSON files, JSONL
//! files, whole directories of either, or stdin.

use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::core::{LoadResult, Order};
use crate::error::{AppError, RecordError};
use crate::source::OrderSource;
use crate::source::loader::load_files;
use crate::source::record::{looks_like_order, parse_order};

/// Orders parsed from one document, plus how many records were rejected
#[derive(Debug, Default)]
pub(crate) struct ParsedBatch {
    pub(crate) orders: Vec<Order>,
    pub(crate) skipped: usize,
}

impl ParsedBatch {
    fn push(&mut self, origin: &str, record: Result<Order, RecordError>) {
        match record {
            Ok(order) => self.orders.push(order),
            Err(err) => {
                tracing::debug!(origin, error = %err, "Skipping malformed order record");
                self.skipped += 1;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DocumentFormat {
    /// One JSON document: an array, an `{"orders": ...}` envelope, or an id-keyed map
    Json,
    /// One order per line
    Lines,
}

impl DocumentFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("jsonl") => DocumentFormat::Lines,
            _ => DocumentFormat::Json,
        }
    }
}

fn parse_records(batch: &mut ParsedBatch, origin: &str, records: &Value) {
    match records {
        Value::Array(items) => {
            for item in items {
                batch.push(origin, parse_order(item, None));
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                batch.push(origin, parse_order(item, Some(key)));
            }
        }
        other => batch.push(origin, parse_order(other, None)),
    }
}

/// Parse a whole document in the given format
pub(crate) fn parse_document(content: &str, format: DocumentFormat, origin: &str) -> ParsedBatch {
    let mut batch = ParsedBatch::default();

    match format {
        DocumentFormat::Lines => {
            for line in content.lines().filter(|l| !l.trim().is_empty()) {
                let record = serde_json::from_str::<Value>(line)
                    .map_err(|e| RecordError::Json(e.to_string()))
                    .and_then(|value| parse_order(&value, None));
                batch.push(origin, record);
            }
        }
        DocumentFormat::Json => match serde_json::from_str::<Value>(content) {
            Ok(Value::Object(mut root)) if root.contains_key("orders") => {
                let records = root.remove("orders").unwrap_or(Value::Null);
                parse_records(&mut batch, origin, &records);
            }
            Ok(Value::Object(root)) if looks_like_order(&root) => {
                batch.push(origin, parse_order(&Value::Object(root), None));
            }
            Ok(records) => parse_records(&mut batch, origin, &records),
            Err(e) => {
                tracing::warn!(origin, error = %e, "Ignoring unparseable JSON document");
                batch.skipped += 1;
            }
        },
    }

    batch
}

/// Orders stored on disk: a single file or a directory searched recursively
pub(crate) struct JsonFileSource {
    root: PathBuf,
}

impl JsonFileSource {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn fetch_error(&self, source: std::io::Error) -> AppError {
        AppError::Fetch {
            path: self.root.display().to_string(),
            source,
        }
    }

    fn find_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for pattern in ["**/*.json", "**/*.jsonl"] {
            let full = format!("{}/{}", self.root.display(), pattern);
            if let Ok(entries) = glob::glob(&full) {
                files.extend(entries.flatten());
            }
        }
        files.sort();
        files
    }

    fn parse_file(path: &Path) -> Result<ParsedBatch, AppError> {
        let content = fs::read_to_string(path).map_err(|source| AppError::Fetch {
            path: path.display().to_string(),
            source,
        })?;
        let origin = path.display().to_string();
        Ok(parse_document(&content, DocumentFormat::from_path(path), &origin))
    }

    /// Like `parse_file`, but a file that cannot be read counts as one skipped record
    fn parse_discovered_file(path: &Path) -> Result<ParsedBatch, AppError> {
        Self::parse_file(path).or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "Skipping unreadable order file");
            Ok(ParsedBatch {
                orders: Vec::new(),
                skipped: 1,
            })
        })
    }
}

impl OrderSource for JsonFileSource {
    fn name(&self) -> String {
        self.root.display().to_string()
    }

    fn fetch(&self) -> Result<LoadResult, AppError> {
        let meta = fs::metadata(&self.root).map_err(|e| self.fetch_error(e))?;
        if meta.is_file() {
            return load_files(&self.name(), std::slice::from_ref(&self.root), Self::parse_file);
        }
        let files = self.find_files();
        load_files(&self.name(), &files, Self::parse_discovered_file)
    }
}

/// Orders piped on stdin; JSON document first, falling back to JSONL
pub(crate) struct StdinSource;

impl OrderSource for StdinSource {
    fn name(&self) -> String {
        "stdin".to_string()
    }

    fn fetch(&self) -> Result<LoadResult, AppError> {
        let start = std::time::Instant::now();
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|source| AppError::Fetch {
                path: self.name(),
                source,
            })?;

        let format = if serde_json::from_str::<Value>(&content).is_ok() {
            DocumentFormat::Json
        } else {
            DocumentFormat::Lines
        };
        let batch = parse_document(&content, format, "stdin");

        Ok(LoadResult {
            valid: batch.orders.len(),
            orders: batch.orders,
            skipped: batch.skipped,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }
}

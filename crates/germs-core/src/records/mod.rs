//! Raw annotated records
//!
//! Raw records arrive as newline-delimited JSON, one object per text:
//! `{"id": ..., "text": ..., "annotations": [{"user": ..., "label": ...}]}`.
//! They are parsed into typed records once, at ingestion, so that every
//! later stage can rely on known labels and unique ids.

pub mod compare;
pub mod merge;

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GermsError, Result};
use crate::label::OrdinalLabel;

/// A single annotator's judgement of a text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub user: String,
    pub label: OrdinalLabel,
}

impl Annotation {
    pub fn new(user: impl Into<String>, label: OrdinalLabel) -> Self {
        Self {
            user: user.into(),
            label,
        }
    }
}

/// A text together with all annotations collected for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedItem {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl AnnotatedItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>, annotations: Vec<Annotation>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            annotations,
        }
    }

    /// Labels of all annotations, in record order
    pub fn labels(&self) -> impl Iterator<Item = OrdinalLabel> + '_ {
        self.annotations.iter().map(|a| a.label)
    }
}

/// Parse newline-delimited JSON objects, skipping blank lines.
///
/// `source` is only used to report where a malformed line came from.
pub fn parse_json_lines<T, R>(reader: R, source: &Path) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: BufRead,
{
    let mut values = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value = serde_json::from_str(trimmed).map_err(|e| GermsError::InvalidRecord {
            path: source.to_path_buf(),
            line: index + 1,
            reason: e.to_string(),
        })?;
        values.push(value);
    }
    Ok(values)
}

/// Parse raw annotated records and reject duplicate ids
pub fn parse_items<R: BufRead>(reader: R, source: &Path) -> Result<Vec<AnnotatedItem>> {
    let items: Vec<AnnotatedItem> = parse_json_lines(reader, source)?;

    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if !seen.insert(item.id.as_str()) {
            return Err(GermsError::DuplicateId {
                id: item.id.clone(),
                path: source.to_path_buf(),
            });
        }
    }

    debug!(path = %source.display(), items = items.len(), "parsed raw records");
    Ok(items)
}

/// Read raw annotated records from a JSONL file
pub fn read_items(path: &Path) -> Result<Vec<AnnotatedItem>> {
    let file = File::open(path).map_err(|e| GermsError::io_operation("open", path.display(), e))?;
    parse_items(BufReader::new(file), path)
}

/// Drop items whose annotation list is empty, returning the remaining
/// items and the number removed
pub fn drop_empty(items: Vec<AnnotatedItem>) -> (Vec<AnnotatedItem>, usize) {
    let before = items.len();
    let kept: Vec<AnnotatedItem> = items
        .into_iter()
        .filter(|item| {
            if item.annotations.is_empty() {
                warn!(id = %item.id, "dropping item without annotations");
                false
            } else {
                true
            }
        })
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}

/// Write records as newline-delimited JSON
pub fn write_items<W: Write>(items: &[AnnotatedItem], writer: W) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    for item in items {
        serde_json::to_writer(&mut writer, item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write records to a JSONL file
pub fn write_items_file(path: &Path, items: &[AnnotatedItem]) -> Result<()> {
    let file =
        File::create(path).map_err(|e| GermsError::io_operation("create", path.display(), e))?;
    write_items(items, file)
}

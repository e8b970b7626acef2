//! Gold targets
//!
//! The gold file is a JSON array of objects, each holding an `id` and one
//! value per scored column. An object keyed by id is accepted as well.
//! A column value is either a single scalar or, where several answers are
//! acceptable, a list of scalars.

mod build;
mod resolve;

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::bail_target;
use crate::error::{GermsError, Result};

pub use build::build_targets;
pub use resolve::{resolve_column, resolve_target, scalar_column, FALLBACK_INDEX};

/// Largest magnitude below which every integer is exact in an `f64`
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A single gold value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GoldScalar {
    Text(String),
    Number(serde_json::Number),
}

impl GoldScalar {
    /// Categorical form used for comparison with submission cells.
    /// Integral floats such as `1.0` are written without the fraction.
    pub fn as_label(&self) -> String {
        match self {
            GoldScalar::Text(s) => s.clone(),
            GoldScalar::Number(n) => match n.as_f64() {
                Some(v) if n.is_f64() && v.fract() == 0.0 && v.abs() < MAX_EXACT_INTEGER => {
                    format!("{}", v as i64)
                }
                _ => n.to_string(),
            },
        }
    }

    /// Numeric form used for distributions
    pub fn as_probability(&self) -> Option<f64> {
        match self {
            GoldScalar::Text(s) => s.trim().parse().ok(),
            GoldScalar::Number(n) => n.as_f64(),
        }
    }
}

impl From<&str> for GoldScalar {
    fn from(value: &str) -> Self {
        GoldScalar::Text(value.to_string())
    }
}

/// Gold value of one column for one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GoldValue {
    /// Several acceptable answers
    List(Vec<GoldScalar>),
    /// Exactly one correct answer
    Scalar(GoldScalar),
}

/// Gold values of all columns for one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldEntry {
    pub id: String,
    #[serde(flatten)]
    pub columns: BTreeMap<String, GoldValue>,
}

/// The complete gold set, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoldTargets {
    entries: Vec<GoldEntry>,
    index: BTreeMap<String, usize>,
}

impl GoldTargets {
    /// Build from entries, rejecting duplicate ids
    pub fn new(entries: Vec<GoldEntry>) -> Result<Self> {
        let mut index = BTreeMap::new();
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.id.clone(), position).is_some() {
                return Err(GermsError::DuplicateId {
                    id: entry.id.clone(),
                    path: "gold targets".into(),
                });
            }
        }
        Ok(Self { entries, index })
    }

    /// Parse a gold file
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_reader(reader)?;
        let entries = if value.is_object() {
            let by_id: BTreeMap<String, BTreeMap<String, GoldValue>> =
                serde_json::from_value(value)?;
            by_id
                .into_iter()
                .map(|(id, mut columns)| {
                    columns.remove("id");
                    GoldEntry { id, columns }
                })
                .collect()
        } else {
            serde_json::from_value(value)?
        };
        Self::new(entries)
    }

    /// Load a gold file
    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).map_err(|e| GermsError::io_operation("open", path.display(), e))?;
        let targets = Self::from_reader(BufReader::new(file))?;
        info!(path = %path.display(), targets = targets.len(), "loaded targets");
        Ok(targets)
    }

    /// Write the gold set as a JSON array
    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = BufWriter::new(writer);
        serde_json::to_writer_pretty(&mut writer, &self.entries)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Write the gold set to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).map_err(|e| GermsError::io_operation("create", path.display(), e))?;
        self.write(file)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[GoldEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&GoldEntry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    /// Set of gold ids
    pub fn ids(&self) -> BTreeSet<&str> {
        self.index.keys().map(String::as_str).collect()
    }

    /// Gold values of `column`, aligned to the given row ids
    pub fn column<'a>(&'a self, ids: &[String], column: &str) -> Result<Vec<&'a GoldValue>> {
        ids.iter()
            .map(|id| {
                let Some(entry) = self.get(id) else {
                    bail_target!(id, column, "id not found in targets");
                };
                match entry.columns.get(column) {
                    Some(value) => Ok(value),
                    None => bail_target!(id, column, "column not found in targets"),
                }
            })
            .collect()
    }
}

/// Compare submission ids against the gold ids.
///
/// Returns the sorted ids missing from the submission, the ids the gold set
/// does not know, and ids that occur more than once in the submission.
pub fn compare_ids(
    submission: &[String],
    gold: &GoldTargets,
) -> (Vec<String>, Vec<String>, Vec<String>) {
    let mut seen = HashSet::with_capacity(submission.len());
    let mut duplicated = BTreeSet::new();
    for id in submission {
        if !seen.insert(id.as_str()) {
            duplicated.insert(id.clone());
        }
    }

    let gold_ids = gold.ids();
    let missing = gold_ids
        .iter()
        .copied()
        .filter(|id| !seen.contains(id))
        .map(str::to_string)
        .collect();
    let mut unexpected: Vec<String> = seen
        .iter()
        .copied()
        .filter(|id| !gold_ids.contains(id))
        .map(str::to_string)
        .collect();
    unexpected.sort();

    (missing, unexpected, duplicated.into_iter().collect())
}

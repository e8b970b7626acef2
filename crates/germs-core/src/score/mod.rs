//! Submission scoring
//!
//! Subtask 1 is scored per column with accuracy and macro-F1, subtask 2
//! with the Jensen-Shannon distance between predicted and gold
//! distributions. Both start by checking that the submission covers
//! exactly the gold ids and the subtask's columns.

mod categorical;
mod counts;
mod divergence;

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{GermsError, Result};
use crate::gold::{compare_ids, GoldTargets};
use crate::schema::{Subtask, ID_COLUMN};
use crate::table::Table;

pub use categorical::ClassificationMetrics;
pub use counts::ConfusionCounts;
pub use divergence::jensen_shannon_distance;

/// Metrics of one scored submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    #[serde(flatten)]
    pub metrics: BTreeMap<String, f64>,
    pub score: f64,
}

impl ScoreReport {
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = BufWriter::new(writer);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Write the report to `output`, or to `report_file` inside it when
    /// `output` is a directory. Returns the path written.
    pub fn save(&self, output: &Path, report_file: &str) -> Result<PathBuf> {
        let path = if output.is_dir() {
            output.join(report_file)
        } else {
            output.to_path_buf()
        };
        let file =
            File::create(&path).map_err(|e| GermsError::io_operation("create", path.display(), e))?;
        self.write(file)?;
        info!(path = %path.display(), score = self.score, "wrote report");
        Ok(path)
    }
}

/// Submission ids must equal the gold ids and the value columns must be
/// those of the subtask
pub fn check_alignment(subtask: Subtask, table: &Table, gold: &GoldTargets) -> Result<()> {
    let (missing, unexpected, duplicated) = compare_ids(table.ids(), gold);
    if !(missing.is_empty() && unexpected.is_empty() && duplicated.is_empty()) {
        return Err(GermsError::IdSetMismatch {
            missing,
            unexpected,
            duplicated,
        });
    }

    let found: BTreeSet<&str> = table
        .columns()
        .iter()
        .map(String::as_str)
        .filter(|c| *c != ID_COLUMN)
        .collect();
    let expected: BTreeSet<&str> = subtask.value_columns().iter().copied().collect();
    if found != expected {
        return Err(GermsError::ColumnSetMismatch {
            expected: subtask.value_columns().join(", "),
            found: found.into_iter().collect::<Vec<_>>().join(", "),
        });
    }
    Ok(())
}

/// Score a validated submission table against the gold targets
pub fn score_submission(subtask: Subtask, table: &Table, gold: &GoldTargets) -> Result<ScoreReport> {
    check_alignment(subtask, table, gold)?;
    let report = match subtask {
        Subtask::Categorical => categorical::score(table, gold)?,
        Subtask::Distributional => divergence::score(table, gold)?,
    };
    info!(subtask = %subtask, score = report.score, "scored submission");
    Ok(report)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

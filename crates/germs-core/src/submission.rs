//! Loading, validating and scoring a submission in one place

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;

use crate::config::ScorerConfig;
use crate::error::Result;
use crate::gold::GoldTargets;
use crate::schema::Subtask;
use crate::score::{check_alignment, score_submission, ScoreReport};
use crate::table::{read_table_file, resolve_submission, Table, TableShape};
use crate::trace_time;
use crate::validate::{ValidationMode, Validator};

/// A submission table read from disk
#[derive(Debug, Clone)]
pub struct Submission {
    pub subtask: Subtask,
    pub path: PathBuf,
    pub table: Table,
}

impl Submission {
    /// Read the submission at `path`, which may be a file or a directory
    /// holding exactly one file with the configured extension. The table
    /// must have one row per gold entry.
    pub fn load(
        subtask: Subtask,
        path: &Path,
        gold: &GoldTargets,
        config: &ScorerConfig,
    ) -> Result<Self> {
        let start = Instant::now();
        let path = resolve_submission(path, config.extension())?;
        let shape = TableShape::for_subtask(subtask, gold.len());
        let table = read_table_file(&path, &shape)?;
        trace_time!(start, "load_submission", rows = table.row_count());
        info!(path = %path.display(), subtask = %subtask, rows = table.row_count(), "loaded submission");
        Ok(Self {
            subtask,
            path,
            table,
        })
    }

    /// Cell checks followed by the id and column alignment with the gold set
    pub fn validate(&self, gold: &GoldTargets, config: &ScorerConfig, mode: ValidationMode) -> Result<()> {
        Validator::new(config.eps)
            .with_mode(mode)
            .validate(&self.table, self.subtask)?;
        check_alignment(self.subtask, &self.table, gold)
    }

    /// Validate, then score
    pub fn evaluate(
        &self,
        gold: &GoldTargets,
        config: &ScorerConfig,
        mode: ValidationMode,
    ) -> Result<ScoreReport> {
        self.validate(gold, config, mode)?;
        score_submission(self.subtask, &self.table, gold)
    }
}

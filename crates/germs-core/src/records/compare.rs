//! Annotation-level comparison of predicted records with gold records
//!
//! Each item is reduced to its set of `(user, label)` pairs. Pairs present
//! on both sides are true positives, predicted-only pairs false positives
//! and gold-only pairs false negatives. An item that is empty on both
//! sides counts as one true positive. Counts are summed over all items
//! before the micro-averaged rates are computed.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::AnnotatedItem;
use crate::error::{GermsError, Result};
use crate::label::OrdinalLabel;
use crate::score::ConfusionCounts;

fn pairs(item: &AnnotatedItem) -> BTreeSet<(&str, OrdinalLabel)> {
    item.annotations
        .iter()
        .map(|a| (a.user.as_str(), a.label))
        .collect()
}

/// Pair counts for one item
pub fn compare_item(gold: &AnnotatedItem, predicted: &AnnotatedItem) -> ConfusionCounts {
    let expected = pairs(gold);
    let found = pairs(predicted);

    let mut counts = ConfusionCounts::new(
        expected.intersection(&found).count(),
        found.difference(&expected).count(),
        expected.difference(&found).count(),
    );
    if expected.is_empty() && found.is_empty() {
        counts.tp += 1;
    }
    counts
}

/// Micro-averaged agreement of predicted annotations with gold annotations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationReport {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub accuracy: f64,
    pub counts: ConfusionCounts,
    /// Number of predicted items
    pub predictions: usize,
    /// Items present in both sets
    pub compared: usize,
    /// Gold ids without a prediction, not counted in the rates
    pub unmatched: Vec<String>,
}

impl AnnotationReport {
    fn from_counts(
        counts: ConfusionCounts,
        predictions: usize,
        compared: usize,
        unmatched: Vec<String>,
    ) -> Self {
        Self {
            precision: counts.precision(),
            recall: counts.recall(),
            f1: counts.f1(),
            accuracy: counts.accuracy(),
            counts,
            predictions,
            compared,
            unmatched,
        }
    }

    /// Write the report as pretty JSON to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).map_err(|e| GermsError::io_operation("create", path.display(), e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// Compare every gold item that has a prediction with the same id.
///
/// Predicted items whose id the gold set does not know are ignored, as are
/// gold items without a prediction; the latter are listed in the report.
pub fn compare_items(gold: &[AnnotatedItem], predicted: &[AnnotatedItem]) -> AnnotationReport {
    let by_id: BTreeMap<&str, &AnnotatedItem> =
        predicted.iter().map(|item| (item.id.as_str(), item)).collect();

    let mut total = ConfusionCounts::default();
    let mut compared = 0;
    let mut unmatched = Vec::new();
    for item in gold {
        match by_id.get(item.id.as_str()) {
            Some(prediction) => {
                let counts = compare_item(item, prediction);
                debug!(id = %item.id, ?counts, "compared item");
                total += counts;
                compared += 1;
            }
            None => unmatched.push(item.id.clone()),
        }
    }

    if !unmatched.is_empty() {
        warn!(count = unmatched.len(), "gold items without prediction");
    }
    let extra = predicted.len().saturating_sub(compared);
    if extra > 0 {
        warn!(count = extra, "predictions without gold item");
    }
    info!(compared, tp = total.tp, fp = total.fp, fn_ = total.fn_, "compared annotations");

    AnnotationReport::from_counts(total, predicted.len(), compared, unmatched)
}

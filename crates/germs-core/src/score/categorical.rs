//! Accuracy and macro-F1 for subtask 1

use std::collections::{BTreeMap, BTreeSet};

use super::{mean, ConfusionCounts, ScoreReport};
use crate::error::{GermsError, Result};
use crate::gold::{resolve_column, scalar_column, GoldTargets};
use crate::schema::{Subtask, RESOLVABLE_COLUMNS};
use crate::table::Table;

/// Agreement between predictions and targets of one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationMetrics {
    pub accuracy: f64,
    pub macro_f1: f64,
}

impl ClassificationMetrics {
    /// Exact-match accuracy and F1 averaged over every label that occurs in
    /// either slice
    pub fn from_predictions(predictions: &[String], targets: &[String]) -> Self {
        let labels: BTreeSet<&str> = predictions
            .iter()
            .chain(targets)
            .map(String::as_str)
            .collect();
        let mut counts: BTreeMap<&str, ConfusionCounts> =
            labels.iter().map(|l| (*l, ConfusionCounts::default())).collect();

        let mut correct = 0usize;
        for (predicted, target) in predictions.iter().zip(targets) {
            if predicted == target {
                correct += 1;
                if let Some(c) = counts.get_mut(predicted.as_str()) {
                    c.tp += 1;
                }
            } else {
                if let Some(c) = counts.get_mut(predicted.as_str()) {
                    c.fp += 1;
                }
                if let Some(c) = counts.get_mut(target.as_str()) {
                    c.fn_ += 1;
                }
            }
        }

        let accuracy = if targets.is_empty() {
            0.0
        } else {
            correct as f64 / targets.len() as f64
        };
        let f1: Vec<f64> = counts.values().map(ConfusionCounts::f1).collect();

        Self {
            accuracy,
            macro_f1: mean(&f1),
        }
    }
}

pub(super) fn score(table: &Table, gold: &GoldTargets) -> Result<ScoreReport> {
    let ids = table.ids();
    let mut metrics = BTreeMap::new();
    let mut f1 = Vec::new();

    for column in Subtask::Categorical.value_columns() {
        let predictions = table
            .column(column)
            .ok_or_else(|| GermsError::ColumnSetMismatch {
                expected: column.to_string(),
                found: table.columns().join(", "),
            })?;
        let values = gold.column(ids, column)?;
        let targets = if RESOLVABLE_COLUMNS.contains(column) {
            resolve_column(column, ids, predictions, &values)?
        } else {
            scalar_column(column, ids, &values)?
        };

        let result = ClassificationMetrics::from_predictions(predictions, &targets);
        metrics.insert(format!("{column}_acc"), result.accuracy);
        metrics.insert(format!("{column}_f1"), result.macro_f1);
        f1.push(result.macro_f1);
    }

    Ok(ScoreReport {
        metrics,
        score: mean(&f1),
    })
}

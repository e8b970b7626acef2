//! Jensen-Shannon distance for subtask 2

use std::collections::BTreeMap;

use super::{mean, ScoreReport};
use crate::bail_target;
use crate::error::{GermsError, Result};
use crate::gold::{GoldTargets, GoldValue};
use crate::schema::{DIST_BIN_COLUMNS, DIST_MULTI_COLUMNS};
use crate::table::Table;
use crate::validate::parse_probability;

/// Scale each entry so the vector sums to 1. `None` for a zero sum.
fn normalized(v: &[f64]) -> Option<Vec<f64>> {
    let sum: f64 = v.iter().sum();
    if sum <= 0.0 || !sum.is_finite() {
        return None;
    }
    Some(v.iter().map(|x| x / sum).collect())
}

/// `x * ln(x / y)`, with zero-probability terms contributing 0
fn relative_entropy(x: f64, y: f64) -> f64 {
    if x > 0.0 && y > 0.0 {
        x * (x / y).ln()
    } else {
        0.0
    }
}

/// Base-2 Jensen-Shannon distance between two probability vectors.
///
/// Both vectors are normalized to unit sum first. Returns `None` when the
/// lengths differ or either vector sums to zero. The result lies in
/// `[0, 1]`.
pub fn jensen_shannon_distance(p: &[f64], q: &[f64]) -> Option<f64> {
    if p.len() != q.len() {
        return None;
    }
    let p = normalized(p)?;
    let q = normalized(q)?;

    let divergence: f64 = p
        .iter()
        .zip(&q)
        .map(|(&a, &b)| {
            let m = (a + b) / 2.0;
            relative_entropy(a, m) + relative_entropy(b, m)
        })
        .sum::<f64>()
        / 2.0;

    Some((divergence / std::f64::consts::LN_2).max(0.0).sqrt())
}

fn gold_vector(gold: &[Vec<&GoldValue>], columns: &[&str], id: &str, row: usize) -> Result<Vec<f64>> {
    columns
        .iter()
        .zip(gold)
        .map(|(column, values)| match values[row] {
            GoldValue::Scalar(value) => match value.as_probability() {
                Some(p) => Ok(p),
                None => bail_target!(id, column, "not a probability"),
            },
            GoldValue::List(_) => bail_target!(id, column, "column does not accept a list"),
        })
        .collect()
}

fn predicted_vector(table: &Table, columns: &[&str], row: usize) -> Result<Vec<f64>> {
    columns
        .iter()
        .map(|column| {
            let raw = table.cell(column, row).unwrap_or("");
            parse_probability(raw).ok_or_else(|| GermsError::NonNumericValue {
                id: table.row_id(row),
                index: row,
                column: column.to_string(),
                value: raw.to_string(),
            })
        })
        .collect()
}

/// Mean distance over all rows for one column group
fn group_distance(table: &Table, gold: &GoldTargets, columns: &[&str]) -> Result<f64> {
    let ids = table.ids();
    let gold_columns = columns
        .iter()
        .map(|column| gold.column(ids, column))
        .collect::<Result<Vec<_>>>()?;

    let mut distances = Vec::with_capacity(ids.len());
    for (row, id) in ids.iter().enumerate() {
        let predicted = predicted_vector(table, columns, row)?;
        let expected = gold_vector(&gold_columns, columns, id, row)?;
        let Some(distance) = jensen_shannon_distance(&predicted, &expected) else {
            bail_target!(id, &columns.join(", "), "distribution sums to zero");
        };
        distances.push(distance);
    }
    Ok(mean(&distances))
}

pub(super) fn score(table: &Table, gold: &GoldTargets) -> Result<ScoreReport> {
    let bin = group_distance(table, gold, &DIST_BIN_COLUMNS)?;
    let multi = group_distance(table, gold, &DIST_MULTI_COLUMNS)?;

    let mut metrics = BTreeMap::new();
    metrics.insert("js_dist_bin".to_string(), bin);
    metrics.insert("js_dist_multi".to_string(), multi);

    Ok(ScoreReport {
        metrics,
        score: mean(&[bin, multi]),
    })
}

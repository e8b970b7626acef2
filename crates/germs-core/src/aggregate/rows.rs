use serde::Serialize;

use crate::label::{OrdinalLabel, LABEL_COUNT};
use crate::schema::{CATEGORICAL_COLUMNS, DISTRIBUTION_COLUMNS};
use crate::table::TableRecord;

fn flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

/// Subtask 1 decisions derived from one item's annotations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoricalRow {
    pub id: String,
    /// Majority label is not `0-Kein`
    pub bin_maj: bool,
    /// At least one annotation is not `0-Kein`
    pub bin_one: bool,
    /// No annotation is `0-Kein`
    pub bin_all: bool,
    /// Majority label
    pub multi_maj: OrdinalLabel,
    /// Annotations contain both `0-Kein` and another label
    pub disagree_bin: bool,
}

impl TableRecord for CategoricalRow {
    fn columns() -> &'static [&'static str] {
        &CATEGORICAL_COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            flag(self.bin_maj),
            flag(self.bin_one),
            flag(self.bin_all),
            self.multi_maj.to_string(),
            flag(self.disagree_bin),
        ]
    }
}

/// Subtask 2 label distributions derived from one item's annotations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionRow {
    pub id: String,
    /// Fractions of `0-Kein` and of all other labels
    pub dist_bin: [f64; 2],
    /// Fraction per ordinal label
    pub dist_multi: [f64; LABEL_COUNT],
}

/// Round a distribution to `places` decimal places with the largest
/// remainder method, so the rounded group keeps the sum of the input.
///
/// Units left over after flooring go to the cells with the largest
/// fractional parts, lower index first on ties. Beyond `f64::DIGITS`
/// places the values are returned unchanged.
pub fn round_distribution<const N: usize>(values: [f64; N], places: usize) -> [f64; N] {
    if places > f64::DIGITS as usize {
        return values;
    }
    let scale = 10f64.powi(places as i32);
    let scaled = values.map(|v| v * scale);
    let mut units = scaled.map(|v| v.floor());

    let total = scaled.iter().sum::<f64>().round();
    let leftover = (total - units.iter().sum::<f64>()).max(0.0) as usize;

    let mut order: Vec<usize> = (0..N).collect();
    order.sort_by(|&a, &b| {
        let fa = scaled[a] - units[a];
        let fb = scaled[b] - units[b];
        fb.total_cmp(&fa).then(a.cmp(&b))
    });
    for &i in order.iter().take(leftover) {
        units[i] += 1.0;
    }

    units.map(|u| u / scale)
}

impl DistributionRow {
    /// Copy with both groups rounded to `places` decimal places, each
    /// still summing to 1
    pub fn rounded(&self, places: usize) -> Self {
        Self {
            id: self.id.clone(),
            dist_bin: round_distribution(self.dist_bin, places),
            dist_multi: round_distribution(self.dist_multi, places),
        }
    }
}

impl TableRecord for DistributionRow {
    fn columns() -> &'static [&'static str] {
        &DISTRIBUTION_COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        std::iter::once(self.id.clone())
            .chain(
                self.dist_bin
                    .iter()
                    .chain(self.dist_multi.iter())
                    .map(|v| v.to_string()),
            )
            .collect()
    }
}

//! Aggregation of multi-annotator labels
//!
//! Every raw item is reduced independently in two ways: a categorical
//! decision row for subtask 1 and a label distribution row for subtask 2.

mod rows;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::config::TieBreak;
use crate::error::{GermsError, Result};
use crate::label::{OrdinalLabel, LABEL_COUNT};
use crate::records::AnnotatedItem;

pub use rows::{round_distribution, CategoricalRow, DistributionRow};

/// Number of annotations per ordinal label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelCounts([usize; LABEL_COUNT]);

impl LabelCounts {
    pub fn from_labels(labels: impl IntoIterator<Item = OrdinalLabel>) -> Self {
        let mut counts = [0; LABEL_COUNT];
        for label in labels {
            counts[label.index()] += 1;
        }
        Self(counts)
    }

    /// Counts over every annotation of every item
    pub fn from_items(items: &[AnnotatedItem]) -> Self {
        Self::from_labels(items.iter().flat_map(|item| item.labels()))
    }

    /// `(label, count)` pairs in label order, zero counts included
    pub fn iter(&self) -> impl Iterator<Item = (OrdinalLabel, usize)> + '_ {
        OrdinalLabel::ALL
            .into_iter()
            .map(move |label| (label, self.get(label)))
    }

    /// Count of a single label
    pub fn get(&self, label: OrdinalLabel) -> usize {
        self.0[label.index()]
    }

    /// Total number of annotations
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// Number of annotations other than `0-Kein`
    pub fn present(&self) -> usize {
        self.total() - self.get(OrdinalLabel::Kein)
    }

    /// All labels sharing the highest count, in ascending order.
    /// Empty when there are no annotations.
    pub fn modal_labels(&self) -> Vec<OrdinalLabel> {
        let max = self.0.iter().copied().max().unwrap_or(0);
        if max == 0 {
            return Vec::new();
        }
        OrdinalLabel::ALL
            .into_iter()
            .filter(|label| self.get(*label) == max)
            .collect()
    }

    /// Fraction of annotations per label
    pub fn fractions(&self) -> Option<[f64; LABEL_COUNT]> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        Some(self.0.map(|count| count as f64 / total as f64))
    }
}

impl Serialize for LabelCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(label, count)| (label.as_str(), count)))
    }
}

/// Reduces annotated items to decision and distribution rows
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    tie_break: TieBreak,
}

impl Aggregator {
    pub fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    fn counts(item: &AnnotatedItem) -> Result<LabelCounts> {
        let counts = LabelCounts::from_labels(item.labels());
        if counts.total() == 0 {
            return Err(GermsError::EmptyAnnotationSet {
                id: item.id.clone(),
            });
        }
        Ok(counts)
    }

    /// Every label tied for the highest count, in ascending order
    pub fn majority_candidates(&self, item: &AnnotatedItem) -> Result<Vec<OrdinalLabel>> {
        Ok(Self::counts(item)?.modal_labels())
    }

    /// Majority label with ties broken by the configured rule
    pub fn majority(&self, item: &AnnotatedItem) -> Result<OrdinalLabel> {
        let candidates = self.majority_candidates(item)?;
        let chosen = match self.tie_break {
            TieBreak::Lowest => candidates.first(),
            TieBreak::Highest => candidates.last(),
        };
        if candidates.len() > 1 {
            debug!(id = %item.id, ?candidates, ?chosen, "majority tie");
        }
        chosen.copied().ok_or_else(|| GermsError::EmptyAnnotationSet {
            id: item.id.clone(),
        })
    }

    /// Subtask 1 decision row for an item
    pub fn categorical(&self, item: &AnnotatedItem) -> Result<CategoricalRow> {
        let counts = Self::counts(item)?;
        let multi_maj = self.majority(item)?;
        let present = counts.present();

        Ok(CategoricalRow {
            id: item.id.clone(),
            bin_maj: multi_maj.is_present(),
            bin_one: present > 0,
            bin_all: present == counts.total(),
            multi_maj,
            disagree_bin: present > 0 && counts.get(OrdinalLabel::Kein) > 0,
        })
    }

    /// Subtask 2 distribution row for an item
    pub fn distribution(&self, item: &AnnotatedItem) -> Result<DistributionRow> {
        let counts = Self::counts(item)?;
        let total = counts.total() as f64;
        let dist_multi = counts.fractions().ok_or_else(|| GermsError::EmptyAnnotationSet {
            id: item.id.clone(),
        })?;
        let absent = counts.get(OrdinalLabel::Kein) as f64 / total;
        let present = counts.present() as f64 / total;

        Ok(DistributionRow {
            id: item.id.clone(),
            dist_bin: [absent, present],
            dist_multi,
        })
    }

    /// Decision rows for all items, failing on the first empty item
    pub fn categorical_rows(&self, items: &[AnnotatedItem]) -> Result<Vec<CategoricalRow>> {
        items.iter().map(|item| self.categorical(item)).collect()
    }

    /// Distribution rows for all items, failing on the first empty item
    pub fn distribution_rows(&self, items: &[AnnotatedItem]) -> Result<Vec<DistributionRow>> {
        items.iter().map(|item| self.distribution(item)).collect()
    }
}

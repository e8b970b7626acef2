//! Configuration type definitions

use serde::{Deserialize, Serialize};

/// Default tolerance when checking that a distribution sums to 1.0
pub const DEFAULT_EPS: f64 = 0.001;

/// Default extension of submission files discovered in a directory
pub const DEFAULT_SUBMISSION_EXTENSION: &str = "tsv";

/// Default file name of a score report written into a directory
pub const DEFAULT_REPORT_FILE: &str = "scores.json";

/// Rule for picking the majority label when several labels share the
/// highest count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// The tied label with the lowest ordinal value wins
    #[default]
    Lowest,
    /// The tied label with the highest ordinal value wins
    Highest,
}

/// Scorer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Absolute tolerance for distribution sums
    #[serde(default = "default_eps")]
    pub eps: f64,

    /// Majority tie-break rule used by the aggregator
    #[serde(default)]
    pub tie_break: TieBreak,

    /// Extension used to locate a submission inside a directory
    #[serde(default = "default_submission_extension")]
    pub submission_extension: String,

    /// Fixed number of decimal places for written distributions
    /// (optional; shortest exact representation when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal_places: Option<usize>,

    /// File name for score reports written into a directory
    #[serde(default = "default_report_file")]
    pub report_file: String,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            eps: DEFAULT_EPS,
            tie_break: TieBreak::default(),
            submission_extension: default_submission_extension(),
            decimal_places: None,
            report_file: default_report_file(),
        }
    }
}

fn default_eps() -> f64 {
    DEFAULT_EPS
}

fn default_submission_extension() -> String {
    DEFAULT_SUBMISSION_EXTENSION.to_string()
}

fn default_report_file() -> String {
    DEFAULT_REPORT_FILE.to_string()
}

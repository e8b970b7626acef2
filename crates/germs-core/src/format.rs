//! Output format handling for germs-eval
//!
//! - human: aligned text for terminal use
//! - json: stable, machine-readable JSON

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GermsError;
use crate::score::ScoreReport;

/// Output format for germs-eval commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = GermsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(GermsError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a score report as aligned `name  value` lines, `score` last
pub fn human_report(report: &ScoreReport) -> String {
    let width = report
        .metrics
        .keys()
        .map(String::len)
        .chain(std::iter::once("score".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (name, value) in &report.metrics {
        out.push_str(&format!("{:<width$}  {:.4}\n", name, value, width = width));
    }
    out.push_str(&format!("{:<width$}  {:.4}", "score", report.score, width = width));
    out
}

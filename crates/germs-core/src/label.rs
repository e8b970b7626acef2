//! Ordinal severity labels
//!
//! Annotators assign each text one of five ordered categories, from
//! `0-Kein` (none) to `4-Extrem` (extreme).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GermsError;

/// Number of ordinal categories
pub const LABEL_COUNT: usize = 5;

/// One of the five ordered severity categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OrdinalLabel {
    #[serde(rename = "0-Kein")]
    Kein,
    #[serde(rename = "1-Gering")]
    Gering,
    #[serde(rename = "2-Vorhanden")]
    Vorhanden,
    #[serde(rename = "3-Stark")]
    Stark,
    #[serde(rename = "4-Extrem")]
    Extrem,
}

impl OrdinalLabel {
    /// All labels in ascending order
    pub const ALL: [OrdinalLabel; LABEL_COUNT] = [
        OrdinalLabel::Kein,
        OrdinalLabel::Gering,
        OrdinalLabel::Vorhanden,
        OrdinalLabel::Stark,
        OrdinalLabel::Extrem,
    ];

    /// Position in the ordinal scale (0..=4)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Label at a position in the ordinal scale
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Wire representation, e.g. `2-Vorhanden`
    pub fn as_str(self) -> &'static str {
        match self {
            OrdinalLabel::Kein => "0-Kein",
            OrdinalLabel::Gering => "1-Gering",
            OrdinalLabel::Vorhanden => "2-Vorhanden",
            OrdinalLabel::Stark => "3-Stark",
            OrdinalLabel::Extrem => "4-Extrem",
        }
    }

    /// Whether the label marks the text as affected at all
    pub fn is_present(self) -> bool {
        self != OrdinalLabel::Kein
    }

    /// Wire representations of all labels, in order
    pub fn names() -> [&'static str; LABEL_COUNT] {
        Self::ALL.map(OrdinalLabel::as_str)
    }
}

impl FromStr for OrdinalLabel {
    type Err = GermsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| GermsError::invalid_value("label", s))
    }
}

impl fmt::Display for OrdinalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Column layout of the two submission formats

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GermsError;

/// Name of the key column shared by both formats
pub const ID_COLUMN: &str = "id";

pub const BIN_MAJ: &str = "bin_maj";
pub const BIN_ONE: &str = "bin_one";
pub const BIN_ALL: &str = "bin_all";
pub const MULTI_MAJ: &str = "multi_maj";
pub const DISAGREE_BIN: &str = "disagree_bin";

/// Subtask 1 columns, in file order
pub const CATEGORICAL_COLUMNS: [&str; 6] =
    [ID_COLUMN, BIN_MAJ, BIN_ONE, BIN_ALL, MULTI_MAJ, DISAGREE_BIN];

/// Allowed cell values of a binary column
pub const BINARY_VALUES: [&str; 2] = ["0", "1"];

/// Subtask 1 columns whose gold value may list several acceptable answers
pub const RESOLVABLE_COLUMNS: [&str; 2] = [BIN_MAJ, MULTI_MAJ];

/// Binary distribution group
pub const DIST_BIN_COLUMNS: [&str; 2] = ["dist_bin_0", "dist_bin_1"];

/// Five-way distribution group
pub const DIST_MULTI_COLUMNS: [&str; 5] = [
    "dist_multi_0",
    "dist_multi_1",
    "dist_multi_2",
    "dist_multi_3",
    "dist_multi_4",
];

/// Subtask 2 columns, in file order
pub const DISTRIBUTION_COLUMNS: [&str; 8] = [
    ID_COLUMN,
    DIST_BIN_COLUMNS[0],
    DIST_BIN_COLUMNS[1],
    DIST_MULTI_COLUMNS[0],
    DIST_MULTI_COLUMNS[1],
    DIST_MULTI_COLUMNS[2],
    DIST_MULTI_COLUMNS[3],
    DIST_MULTI_COLUMNS[4],
];

/// Scoring track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subtask {
    /// Subtask 1: categorical decisions scored by macro-F1
    Categorical,
    /// Subtask 2: label distributions scored by Jensen-Shannon distance
    Distributional,
}

impl Subtask {
    /// Declared columns including `id`, in file order
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Subtask::Categorical => &CATEGORICAL_COLUMNS,
            Subtask::Distributional => &DISTRIBUTION_COLUMNS,
        }
    }

    /// Declared columns without `id`
    pub fn value_columns(self) -> &'static [&'static str] {
        &self.columns()[1..]
    }

    /// Number used on the command line and in file names
    pub fn number(self) -> u8 {
        match self {
            Subtask::Categorical => 1,
            Subtask::Distributional => 2,
        }
    }
}

impl FromStr for Subtask {
    type Err = GermsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "a" => Ok(Subtask::Categorical),
            "2" | "b" => Ok(Subtask::Distributional),
            other => Err(GermsError::invalid_value("subtask (expected 1 or 2)", other)),
        }
    }
}

impl fmt::Display for Subtask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

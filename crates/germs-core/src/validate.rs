//! Submission validation
//!
//! A loaded table is checked for value domains and well-formed
//! distributions before any metric is computed. By default the first
//! violation aborts validation; collect-all mode reports every violation.

use tracing::debug;

use crate::config::DEFAULT_EPS;
use crate::error::{GermsError, Result};
use crate::label::OrdinalLabel;
use crate::schema::{Subtask, BINARY_VALUES, DIST_BIN_COLUMNS, DIST_MULTI_COLUMNS, MULTI_MAJ};
use crate::table::Table;

/// How violations are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Stop at the first violation
    #[default]
    FailFast,
    /// Check everything and report all violations together
    CollectAll,
}

struct Violations {
    mode: ValidationMode,
    found: Vec<GermsError>,
}

impl Violations {
    fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            found: Vec::new(),
        }
    }

    fn record(&mut self, violation: GermsError) -> Result<()> {
        match self.mode {
            ValidationMode::FailFast => Err(violation),
            ValidationMode::CollectAll => {
                self.found.push(violation);
                Ok(())
            }
        }
    }

    fn finish(mut self) -> Result<()> {
        match self.found.len() {
            0 => Ok(()),
            1 => Err(self.found.remove(0)),
            _ => Err(GermsError::ValidationFailed {
                violations: self.found,
            }),
        }
    }
}

/// Checks cell contents of a loaded table
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    eps: f64,
    mode: ValidationMode,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(DEFAULT_EPS)
    }
}

impl Validator {
    /// Fail-fast validator with the given distribution tolerance
    pub fn new(eps: f64) -> Self {
        Self {
            eps,
            mode: ValidationMode::FailFast,
        }
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Every declared column must be present and nothing else
    pub fn check_columns(&self, table: &Table, expected: &[&str]) -> Result<()> {
        let found = table.column_set();
        let wanted: std::collections::BTreeSet<&str> = expected.iter().copied().collect();
        if found != wanted || found.len() != table.columns().len() {
            return Err(GermsError::SchemaMismatch {
                expected: expected.join(", "),
                found: table.columns().join(", "),
            });
        }
        Ok(())
    }

    /// Every cell of `column` must be one of `allowed`
    pub fn check_allowed(&self, table: &Table, column: &str, allowed: &[&str]) -> Result<()> {
        let mut violations = Violations::new(self.mode);
        self.allowed_into(table, column, allowed, &mut violations)?;
        violations.finish()
    }

    /// Every cell of the group must be a probability and every row must
    /// sum to 1.0 within the tolerance
    pub fn check_distribution(&self, table: &Table, columns: &[&str]) -> Result<()> {
        let mut violations = Violations::new(self.mode);
        self.distribution_into(table, columns, &mut violations)?;
        violations.finish()
    }

    /// Run all checks for a subtask
    pub fn validate(&self, table: &Table, subtask: Subtask) -> Result<()> {
        self.check_columns(table, subtask.columns())?;

        let mut violations = Violations::new(self.mode);
        match subtask {
            Subtask::Categorical => {
                let labels = OrdinalLabel::names();
                for column in subtask.value_columns() {
                    let allowed: &[&str] = if *column == MULTI_MAJ {
                        &labels
                    } else {
                        &BINARY_VALUES
                    };
                    self.allowed_into(table, column, allowed, &mut violations)?;
                }
            }
            Subtask::Distributional => {
                self.distribution_into(table, &DIST_BIN_COLUMNS, &mut violations)?;
                self.distribution_into(table, &DIST_MULTI_COLUMNS, &mut violations)?;
            }
        }
        violations.finish()
    }

    fn column<'t>(table: &'t Table, column: &str) -> Result<&'t [String]> {
        table.column(column).ok_or_else(|| GermsError::SchemaMismatch {
            expected: column.to_string(),
            found: table.columns().join(", "),
        })
    }

    fn allowed_into(
        &self,
        table: &Table,
        column: &str,
        allowed: &[&str],
        violations: &mut Violations,
    ) -> Result<()> {
        let cells = Self::column(table, column)?;
        let before = violations.found.len();
        for (index, value) in cells.iter().enumerate() {
            if !allowed.contains(&value.as_str()) {
                violations.record(GermsError::InvalidCategoricalValue {
                    id: table.row_id(index),
                    index,
                    column: column.to_string(),
                    value: value.clone(),
                    allowed: allowed.join(", "),
                })?;
            }
        }
        if violations.found.len() == before {
            debug!(column, "column is ok");
        }
        Ok(())
    }

    fn distribution_into(
        &self,
        table: &Table,
        columns: &[&str],
        violations: &mut Violations,
    ) -> Result<()> {
        let cells = columns
            .iter()
            .map(|column| Self::column(table, column))
            .collect::<Result<Vec<_>>>()?;

        let before = violations.found.len();
        for index in 0..table.row_count() {
            match self.row_sum(table, columns, &cells, index) {
                Ok(sum) if (sum - 1.0).abs() > self.eps => {
                    violations.record(GermsError::DistributionNotNormalized {
                        id: table.row_id(index),
                        index,
                        columns: columns.join(", "),
                        sum,
                    })?;
                }
                Ok(_) => {}
                Err(violation) => violations.record(violation)?,
            }
        }
        if violations.found.len() == before {
            debug!(columns = %columns.join(", "), "distribution is ok");
        }
        Ok(())
    }

    /// Sum of one row of a distribution group, or the first bad cell
    fn row_sum(
        &self,
        table: &Table,
        columns: &[&str],
        cells: &[&[String]],
        index: usize,
    ) -> Result<f64> {
        let mut sum = 0.0;
        for (column, values) in columns.iter().zip(cells) {
            let raw = values.get(index).map(String::as_str).unwrap_or("");
            let value = parse_probability(raw).ok_or_else(|| GermsError::NonNumericValue {
                id: table.row_id(index),
                index,
                column: column.to_string(),
                value: raw.to_string(),
            })?;
            if !(0.0..=1.0).contains(&value) {
                return Err(GermsError::OutOfRangeValue {
                    id: table.row_id(index),
                    index,
                    column: column.to_string(),
                    value,
                });
            }
            sum += value;
        }
        Ok(sum)
    }
}

/// Parse a decimal cell; non-finite values are not numbers here
pub fn parse_probability(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests;

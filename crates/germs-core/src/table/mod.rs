//! Column-oriented string tables
//!
//! Submissions are loaded as a mapping from column name to the raw cell
//! strings of that column. Interpretation of the cells is left to the
//! validator and scorer.

mod codec;
mod discover;

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{GermsError, Result};
use crate::schema::ID_COLUMN;

pub use codec::{read_table, read_table_file, write_table, write_table_file, TableShape, DELIMITER};
pub use discover::{locate_submission, resolve_submission};

/// A record that can be emitted as one table row
pub trait TableRecord {
    /// Declared columns, in file order
    fn columns() -> &'static [&'static str];

    /// Cell values in the order of [`TableRecord::columns`]
    fn cells(&self) -> Vec<String>;
}

/// A table of raw string cells with a declared column order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    columns: Vec<String>,
    data: BTreeMap<String, Vec<String>>,
}

impl Table {
    /// Create an empty table with the given column order
    pub fn new<S: AsRef<str>>(columns: &[S]) -> Self {
        let columns: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
        let data = columns.iter().map(|c| (c.clone(), Vec::new())).collect();
        Self { columns, data }
    }

    /// Build a table from records
    pub fn from_records<R: TableRecord>(records: &[R]) -> Self {
        let mut table = Self::new(R::columns());
        for record in records {
            table.append(record.cells());
        }
        table
    }

    /// Append a row whose cells follow the declared column order
    pub fn push_row(&mut self, cells: Vec<String>) -> Result<()> {
        if cells.len() != self.columns.len() {
            return Err(GermsError::Other(format!(
                "row has {} cells but table has {} columns",
                cells.len(),
                self.columns.len()
            )));
        }
        self.append(cells);
        Ok(())
    }

    fn append(&mut self, cells: Vec<String>) {
        for (column, cell) in self.columns.iter().zip(cells) {
            if let Some(values) = self.data.get_mut(column) {
                values.push(cell);
            }
        }
    }

    /// Declared column order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Declared column names as a set
    pub fn column_set(&self) -> BTreeSet<&str> {
        self.columns.iter().map(String::as_str).collect()
    }

    /// Cells of a column
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.data.get(name).map(Vec::as_slice)
    }

    /// Cells of the `id` column (empty if the table has none)
    pub fn ids(&self) -> &[String] {
        self.column(ID_COLUMN).unwrap_or(&[])
    }

    /// Id of a row, or its index when the table has no `id` column
    pub fn row_id(&self, row: usize) -> String {
        self.ids()
            .get(row)
            .cloned()
            .unwrap_or_else(|| format!("#{}", row))
    }

    /// A single cell
    pub fn cell(&self, column: &str, row: usize) -> Option<&str> {
        self.column(column)?.get(row).map(String::as_str)
    }

    /// Cells of a row, in declared column order
    pub fn row(&self, row: usize) -> Option<Vec<&str>> {
        self.columns
            .iter()
            .map(|c| self.cell(c, row))
            .collect::<Option<Vec<_>>>()
    }

    /// Number of rows, counted on the `id` column when present
    pub fn row_count(&self) -> usize {
        match self.column(ID_COLUMN) {
            Some(ids) => ids.len(),
            None => self
                .columns
                .first()
                .and_then(|c| self.column(c))
                .map_or(0, <[String]>::len),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

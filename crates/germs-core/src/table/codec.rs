//! Tab-separated reading and writing of tables

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Instant;

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use tracing::{debug, info};

use super::Table;
use crate::error::{GermsError, Result};
use crate::schema::Subtask;
use crate::trace_time;

/// Field delimiter of all tabular files
pub const DELIMITER: u8 = b'\t';

/// Expected shape of a table being read
#[derive(Debug, Clone, Copy)]
pub struct TableShape<'a> {
    /// Exact number of data rows
    pub rows: usize,
    /// Exact set of column names (order is not enforced)
    pub columns: &'a [&'a str],
}

impl<'a> TableShape<'a> {
    pub fn new(rows: usize, columns: &'a [&'a str]) -> Self {
        Self { rows, columns }
    }
}

impl TableShape<'static> {
    /// Shape of a submission for a subtask
    pub fn for_subtask(subtask: Subtask, rows: usize) -> Self {
        Self::new(rows, subtask.columns())
    }
}

fn join_names<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names.into_iter().collect::<Vec<_>>().join(", ")
}

fn check_header(header: &StringRecord, expected: &[&str]) -> Result<()> {
    let found: Vec<&str> = header.iter().collect();
    let found_set: BTreeSet<&str> = found.iter().copied().collect();
    let expected_set: BTreeSet<&str> = expected.iter().copied().collect();

    if found_set != expected_set || found_set.len() != found.len() {
        return Err(GermsError::SchemaMismatch {
            expected: join_names(expected.iter().copied()),
            found: join_names(found),
        });
    }
    Ok(())
}

fn row_error(err: csv::Error) -> GermsError {
    let Some(line) = err.position().map(csv::Position::line) else {
        return GermsError::Csv(err);
    };
    let reason = match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => Some(format!("expected {} fields, found {}", expected_len, len)),
        csv::ErrorKind::Utf8 { err, .. } => Some(err.to_string()),
        _ => None,
    };
    match reason {
        Some(reason) => GermsError::MalformedRow { line, reason },
        None => GermsError::Csv(err),
    }
}

/// Read a tab-separated table with a header line.
///
/// Fails on a header whose column set differs from the expected one, on
/// more rows than expected (as soon as the extra row is seen), and on
/// fewer rows than expected once the input is exhausted.
pub fn read_table<R: Read>(reader: R, shape: &TableShape) -> Result<Table> {
    let start = Instant::now();
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let header = reader.headers().map_err(row_error)?.clone();
    check_header(&header, shape.columns)?;

    let mut table = Table::new(&header.iter().collect::<Vec<_>>());
    for (index, record) in reader.records().enumerate() {
        if index >= shape.rows {
            return Err(GermsError::RowCountExceeded {
                expected: shape.rows,
            });
        }
        let record = record.map_err(row_error)?;
        table.push_row(record.iter().map(str::to_string).collect())?;
    }

    let found = table.row_count();
    if found != shape.rows {
        return Err(GermsError::RowCountShort {
            expected: shape.rows,
            found,
        });
    }

    trace_time!(start, "read_table", rows = found);
    Ok(table)
}

/// Read a table from a file
pub fn read_table_file(path: &Path, shape: &TableShape) -> Result<Table> {
    info!(path = %path.display(), "loading table");
    let file = File::open(path).map_err(|e| GermsError::io_operation("open", path.display(), e))?;
    let table = read_table(file, shape)?;
    debug!(rows = table.row_count(), "loaded table");
    Ok(table)
}

/// Write a table as tab-separated text with a single header line
pub fn write_table<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    writer.write_record(table.columns())?;
    for row in 0..table.row_count() {
        let cells = table
            .row(row)
            .ok_or_else(|| GermsError::Other(format!("ragged table at row {}", row)))?;
        writer.write_record(cells)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a table to a file
pub fn write_table_file(path: &Path, table: &Table) -> Result<()> {
    let file =
        File::create(path).map_err(|e| GermsError::io_operation("create", path.display(), e))?;
    write_table(table, file)?;
    debug!(path = %path.display(), rows = table.row_count(), "wrote table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CATEGORICAL_COLUMNS;
    use std::io::Cursor;

    const COLUMNS: [&str; 3] = ["id", "a", "b"];

    fn read(input: &str, rows: usize) -> Result<Table> {
        read_table(Cursor::new(input), &TableShape::new(rows, &COLUMNS))
    }

    #[test]
    fn test_read_accepts_any_column_order() {
        let table = read("b\tid\ta\n1\tx\t0\n0\ty\t1\n", 2).unwrap();
        assert_eq!(table.columns(), &["b", "id", "a"]);
        assert_eq!(table.ids(), &["x", "y"]);
        assert_eq!(table.cell("a", 1), Some("1"));
    }

    #[test]
    fn test_read_rejects_extra_column() {
        let err = read("id\ta\tb\tc\nx\t0\t1\t2\n", 1).unwrap_err();
        assert!(matches!(err, GermsError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_read_rejects_missing_column() {
        let err = read("id\ta\nx\t0\n", 1).unwrap_err();
        match err {
            GermsError::SchemaMismatch { expected, found } => {
                assert_eq!(expected, "id, a, b");
                assert_eq!(found, "id, a");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_rejects_duplicate_column() {
        let err = read("id\ta\tb\ta\nx\t0\t1\t0\n", 1).unwrap_err();
        assert!(matches!(err, GermsError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_read_checks_header_without_rows() {
        let err = read("id\ta\n", 0).unwrap_err();
        assert!(matches!(err, GermsError::SchemaMismatch { .. }));
        let table = read("id\ta\tb\n", 0).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_read_too_many_rows() {
        let err = read("id\ta\tb\nx\t0\t1\ny\t1\t0\nz\t1\t1\n", 2).unwrap_err();
        assert!(matches!(err, GermsError::RowCountExceeded { expected: 2 }));
    }

    #[test]
    fn test_read_too_few_rows() {
        let err = read("id\ta\tb\nx\t0\t1\n", 3).unwrap_err();
        assert!(matches!(
            err,
            GermsError::RowCountShort {
                expected: 3,
                found: 1
            }
        ));
    }

    #[test]
    fn test_read_ragged_row() {
        let err = read("id\ta\tb\nx\t0\n", 1).unwrap_err();
        assert!(matches!(err, GermsError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn test_round_trip() {
        let mut table = Table::new(&CATEGORICAL_COLUMNS);
        table
            .push_row(["x1", "0", "1", "0", "0-Kein", "1"].map(String::from).to_vec())
            .unwrap();
        table
            .push_row(["x2", "1", "1", "1", "3-Stark", "0"].map(String::from).to_vec())
            .unwrap();

        let mut buf = Vec::new();
        write_table(&table, &mut buf).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("id\tbin_maj\tbin_one\tbin_all\tmulti_maj\tdisagree_bin\n"));
        assert_eq!(text.lines().count(), 3);

        let back = read_table(
            Cursor::new(buf),
            &TableShape::for_subtask(Subtask::Categorical, 2),
        )
        .unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        let mut table = Table::new(&COLUMNS);
        table
            .push_row(vec!["x".into(), "has\ttab".into(), "".into()])
            .unwrap();
        write_table_file(&path, &table).unwrap();

        let back = read_table_file(&path, &TableShape::new(1, &COLUMNS)).unwrap();
        assert_eq!(back.cell("a", 0), Some("has\ttab"));
        assert_eq!(back.cell("b", 0), Some(""));
    }
}

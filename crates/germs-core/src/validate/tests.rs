use super::*;
use crate::schema::{CATEGORICAL_COLUMNS, DISTRIBUTION_COLUMNS};

fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
    let mut table = Table::new(columns);
    for row in rows {
        table
            .push_row(row.iter().map(|c| c.to_string()).collect())
            .unwrap();
    }
    table
}

fn categorical(rows: &[&[&str]]) -> Table {
    table(&CATEGORICAL_COLUMNS, rows)
}

fn distributional(rows: &[&[&str]]) -> Table {
    table(&DISTRIBUTION_COLUMNS, rows)
}

#[test]
fn test_valid_categorical_table() {
    let t = categorical(&[
        &["a", "0", "1", "0", "0-Kein", "1"],
        &["b", "1", "1", "1", "4-Extrem", "0"],
    ]);
    Validator::default()
        .validate(&t, Subtask::Categorical)
        .unwrap();
}

#[test]
fn test_extra_column_rejected() {
    let t = table(&["id", "bin_maj", "extra"], &[&["a", "0", "x"]]);
    let err = Validator::default()
        .check_columns(&t, &["id", "bin_maj"])
        .unwrap_err();
    assert!(matches!(err, GermsError::SchemaMismatch { .. }));
}

#[test]
fn test_missing_column_rejected() {
    let t = table(
        &["id", "bin_maj", "bin_one", "bin_all", "multi_maj"],
        &[&["a", "0", "1", "0", "0-Kein"]],
    );
    let err = Validator::default()
        .validate(&t, Subtask::Categorical)
        .unwrap_err();
    assert!(matches!(err, GermsError::SchemaMismatch { .. }));
}

#[test]
fn test_categorical_value_outside_domain() {
    let t = categorical(&[
        &["a", "0", "1", "0", "0-Kein", "1"],
        &["b", "1", "yes", "1", "4-Extrem", "0"],
    ]);
    let err = Validator::default()
        .validate(&t, Subtask::Categorical)
        .unwrap_err();
    match err {
        GermsError::InvalidCategoricalValue {
            id,
            index,
            column,
            value,
            ..
        } => {
            assert_eq!(id, "b");
            assert_eq!(index, 1);
            assert_eq!(column, "bin_one");
            assert_eq!(value, "yes");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_categorical_columns_checked_in_file_order() {
    let t = categorical(&[&["a", "0", "1", "0", "5-Mega", "2"]]);
    let err = Validator::default()
        .validate(&t, Subtask::Categorical)
        .unwrap_err();
    assert!(
        matches!(err, GermsError::InvalidCategoricalValue { ref column, .. } if column == "multi_maj")
    );

    let err = Validator::default()
        .with_mode(ValidationMode::CollectAll)
        .validate(&t, Subtask::Categorical)
        .unwrap_err();
    match err {
        GermsError::ValidationFailed { violations } => {
            let columns: Vec<&str> = violations
                .iter()
                .filter_map(|v| match v {
                    GermsError::InvalidCategoricalValue { column, .. } => Some(column.as_str()),
                    _ => None,
                })
                .collect();
            assert_eq!(columns, vec!["multi_maj", "disagree_bin"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_multi_maj_must_be_label() {
    let t = categorical(&[&["a", "0", "1", "0", "2", "1"]]);
    let err = Validator::default()
        .check_allowed(&t, MULTI_MAJ, &OrdinalLabel::names())
        .unwrap_err();
    assert!(err.to_string().contains("0-Kein, 1-Gering"));
}

#[test]
fn test_first_violation_is_reported() {
    let t = categorical(&[
        &["a", "2", "1", "0", "0-Kein", "1"],
        &["b", "3", "1", "0", "0-Kein", "1"],
    ]);
    let err = Validator::default()
        .validate(&t, Subtask::Categorical)
        .unwrap_err();
    assert_eq!(err.row_id(), Some("a"));
}

#[test]
fn test_collect_all_reports_every_violation() {
    let t = categorical(&[
        &["a", "2", "1", "0", "0-Kein", "1"],
        &["b", "1", "1", "1", "9-Neu", "0"],
        &["c", "1", "1", "1", "3-Stark", "0"],
    ]);
    let err = Validator::default()
        .with_mode(ValidationMode::CollectAll)
        .validate(&t, Subtask::Categorical)
        .unwrap_err();
    match err {
        GermsError::ValidationFailed { violations } => {
            let ids: Vec<_> = violations.iter().filter_map(|v| v.row_id()).collect();
            assert_eq!(ids, vec!["a", "b"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_collect_all_single_violation_is_unwrapped() {
    let t = categorical(&[&["a", "2", "1", "0", "0-Kein", "1"]]);
    let err = Validator::default()
        .with_mode(ValidationMode::CollectAll)
        .validate(&t, Subtask::Categorical)
        .unwrap_err();
    assert!(matches!(err, GermsError::InvalidCategoricalValue { .. }));
}

#[test]
fn test_valid_distribution_table() {
    let t = distributional(&[
        &["a", "0.6666666666666666", "0.3333333333333333", "0.5", "0.25", "0.25", "0", "0"],
        &["b", "1", "0", "0.2", "0.2", "0.2", "0.2", "0.2"],
    ]);
    Validator::default()
        .validate(&t, Subtask::Distributional)
        .unwrap();
}

#[test]
fn test_distribution_sum_outside_tolerance() {
    let t = table(&["id", "p", "q"], &[&["a", "0.5", "0.47"]]);
    let err = Validator::default()
        .check_distribution(&t, &["p", "q"])
        .unwrap_err();
    match err {
        GermsError::DistributionNotNormalized { id, sum, .. } => {
            assert_eq!(id, "a");
            assert!((sum - 0.97).abs() < 1e-12);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_distribution_sum_inside_tolerance() {
    let t = table(&["id", "p", "q"], &[&["a", "0.5", "0.4995"]]);
    Validator::default()
        .check_distribution(&t, &["p", "q"])
        .unwrap();
}

#[test]
fn test_custom_tolerance() {
    let t = table(&["id", "p", "q"], &[&["a", "0.5", "0.47"]]);
    Validator::new(0.05).check_distribution(&t, &["p", "q"]).unwrap();
}

#[test]
fn test_non_numeric_value() {
    let t = table(&["id", "p", "q"], &[&["a", "half", "0.5"]]);
    let err = Validator::default()
        .check_distribution(&t, &["p", "q"])
        .unwrap_err();
    assert!(matches!(
        err,
        GermsError::NonNumericValue { ref column, ref value, .. } if column == "p" && value == "half"
    ));
}

#[test]
fn test_nan_is_not_numeric() {
    let t = table(&["id", "p", "q"], &[&["a", "NaN", "0.5"]]);
    let err = Validator::default()
        .check_distribution(&t, &["p", "q"])
        .unwrap_err();
    assert!(matches!(err, GermsError::NonNumericValue { .. }));
}

#[test]
fn test_out_of_range_value() {
    let t = table(&["id", "p", "q"], &[&["a", "1.5", "-0.5"]]);
    let err = Validator::default()
        .check_distribution(&t, &["p", "q"])
        .unwrap_err();
    assert!(matches!(
        err,
        GermsError::OutOfRangeValue { ref column, value, .. } if column == "p" && value == 1.5
    ));
}

#[test]
fn test_collect_all_distribution_rows() {
    let t = table(
        &["id", "p", "q"],
        &[
            &["a", "x", "0.5"],
            &["b", "0.5", "0.5"],
            &["c", "0.9", "0.9"],
        ],
    );
    let err = Validator::default()
        .with_mode(ValidationMode::CollectAll)
        .check_distribution(&t, &["p", "q"])
        .unwrap_err();
    match err {
        GermsError::ValidationFailed { violations } => {
            assert_eq!(violations.len(), 2);
            assert!(matches!(violations[0], GermsError::NonNumericValue { .. }));
            assert!(matches!(
                violations[1],
                GermsError::DistributionNotNormalized { .. }
            ));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

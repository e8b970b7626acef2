//! Target resolution for items with several acceptable answers

use super::{GoldScalar, GoldValue};
use crate::bail_target;
use crate::error::Result;

/// Position of the list element used as target when a prediction matches
/// none of the acceptable answers
pub const FALLBACK_INDEX: usize = 0;

/// Effective target for one prediction.
///
/// A scalar gold value is used unchanged. For a list, a prediction that is
/// one of the acceptable answers becomes its own target (scored correct);
/// any other prediction is scored against the fallback element. Returns
/// `None` for an empty list.
pub fn resolve_target(gold: &GoldValue, prediction: &str) -> Option<String> {
    match gold {
        GoldValue::Scalar(value) => Some(value.as_label()),
        GoldValue::List(values) => {
            if values.iter().any(|v| v.as_label() == prediction) {
                Some(prediction.to_string())
            } else {
                values.get(FALLBACK_INDEX).map(GoldScalar::as_label)
            }
        }
    }
}

/// Effective targets for a column of predictions
pub fn resolve_column(
    column: &str,
    ids: &[String],
    predictions: &[String],
    gold: &[&GoldValue],
) -> Result<Vec<String>> {
    ids.iter()
        .zip(predictions)
        .zip(gold)
        .map(|((id, prediction), value)| match resolve_target(value, prediction) {
            Some(target) => Ok(target),
            None => bail_target!(id, column, "empty list of acceptable values"),
        })
        .collect()
}

/// Targets for a column that only admits single values
pub fn scalar_column(column: &str, ids: &[String], gold: &[&GoldValue]) -> Result<Vec<String>> {
    ids.iter()
        .zip(gold)
        .map(|(id, value)| match value {
            GoldValue::Scalar(value) => Ok(value.as_label()),
            GoldValue::List(_) => bail_target!(id, column, "column does not accept a list"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(values: &[&str]) -> GoldValue {
        GoldValue::List(values.iter().map(|v| GoldScalar::from(*v)).collect())
    }

    #[test]
    fn test_scalar_unchanged() {
        let gold = GoldValue::Scalar("1".into());
        assert_eq!(resolve_target(&gold, "0").as_deref(), Some("1"));
    }

    #[test]
    fn test_prediction_in_list() {
        assert_eq!(resolve_target(&list(&["A", "B"]), "B").as_deref(), Some("B"));
    }

    #[test]
    fn test_prediction_outside_list_uses_first() {
        assert_eq!(resolve_target(&list(&["A", "B"]), "C").as_deref(), Some("A"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(resolve_target(&list(&[]), "C"), None);
        let gold = list(&[]);
        let err = resolve_column("multi_maj", &["q".into()], &["C".into()], &[&gold]).unwrap_err();
        assert_eq!(err.row_id(), Some("q"));
    }

    #[test]
    fn test_resolve_column() {
        let a = list(&["0-Kein", "1-Gering"]);
        let b = GoldValue::Scalar("3-Stark".into());
        let c = list(&["2-Vorhanden", "4-Extrem"]);
        let ids: Vec<String> = ["a", "b", "c"].map(String::from).to_vec();
        let predictions: Vec<String> = ["1-Gering", "0-Kein", "0-Kein"].map(String::from).to_vec();

        let resolved = resolve_column("multi_maj", &ids, &predictions, &[&a, &b, &c]).unwrap();
        assert_eq!(resolved, vec!["1-Gering", "3-Stark", "2-Vorhanden"]);
    }

    #[test]
    fn test_scalar_column_rejects_list() {
        let gold = list(&["0", "1"]);
        let err = scalar_column("bin_one", &["a".into()], &[&gold]).unwrap_err();
        assert!(err.to_string().contains("bin_one"));
    }
}

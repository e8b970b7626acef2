//! Join released gold labels with the test texts they belong to.
//!
//! The test set ships texts with the names of the annotators who labelled
//! them, while the labels are released separately as `{"id", "labels"}`
//! entries in the same annotator order. Merging both yields raw annotated
//! records in the usual shape.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::{parse_json_lines, AnnotatedItem, Annotation};
use crate::error::{GermsError, Result};
use crate::label::OrdinalLabel;

/// A test text with the annotators assigned to it
#[derive(Debug, Clone, Deserialize)]
pub struct TestItem {
    pub id: String,
    #[serde(default)]
    pub text: String,
    pub annotators: Vec<String>,
}

/// Released labels for one text, in annotator order
#[derive(Debug, Clone, Deserialize)]
pub struct LabelEntry {
    pub id: String,
    pub labels: Vec<OrdinalLabel>,
}

/// Merge labels into test items.
///
/// Items without released labels are skipped. The label and annotator
/// lists of an item must have the same length.
pub fn merge_labels(labels: Vec<LabelEntry>, items: Vec<TestItem>) -> Result<Vec<AnnotatedItem>> {
    let mut by_id: HashMap<String, Vec<OrdinalLabel>> = labels
        .into_iter()
        .map(|entry| (entry.id, entry.labels))
        .collect();

    let total = items.len();
    let mut merged = Vec::with_capacity(total);
    for item in items {
        let Some(item_labels) = by_id.remove(&item.id) else {
            continue;
        };
        if item_labels.len() != item.annotators.len() {
            return Err(GermsError::LabelCountMismatch {
                id: item.id,
                labels: item_labels.len(),
                annotators: item.annotators.len(),
            });
        }
        let annotations = item
            .annotators
            .into_iter()
            .zip(item_labels)
            .map(|(user, label)| Annotation::new(user, label))
            .collect();
        merged.push(AnnotatedItem::new(item.id, item.text, annotations));
    }

    debug!(
        merged = merged.len(),
        skipped = total - merged.len(),
        unused_labels = by_id.len(),
        "merged labels"
    );
    Ok(merged)
}

/// Read the labels JSON array and test JSONL file and merge them
pub fn merge_files(labels_path: &Path, texts_path: &Path) -> Result<Vec<AnnotatedItem>> {
    let labels_file = File::open(labels_path)
        .map_err(|e| GermsError::io_operation("open", labels_path.display(), e))?;
    let labels: Vec<LabelEntry> = serde_json::from_reader(BufReader::new(labels_file))?;

    let texts_file = File::open(texts_path)
        .map_err(|e| GermsError::io_operation("open", texts_path.display(), e))?;
    let items: Vec<TestItem> = parse_json_lines(BufReader::new(texts_file), texts_path)?;

    merge_labels(labels, items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_item(id: &str, annotators: &[&str]) -> TestItem {
        TestItem {
            id: id.to_string(),
            text: format!("text {id}"),
            annotators: annotators.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_merge_pairs_annotators_with_labels() {
        let labels = vec![LabelEntry {
            id: "t1".into(),
            labels: vec![OrdinalLabel::Kein, OrdinalLabel::Stark],
        }];
        let merged = merge_labels(labels, vec![test_item("t1", &["A001", "A004"])]).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "text t1");
        assert_eq!(merged[0].annotations[1], Annotation::new("A004", OrdinalLabel::Stark));
    }

    #[test]
    fn test_merge_skips_items_without_labels() {
        let labels = vec![LabelEntry {
            id: "t2".into(),
            labels: vec![OrdinalLabel::Gering],
        }];
        let items = vec![test_item("t1", &["A001"]), test_item("t2", &["A002"])];
        let merged = merge_labels(labels, items).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "t2");
    }

    #[test]
    fn test_merge_rejects_length_mismatch() {
        let labels = vec![LabelEntry {
            id: "t1".into(),
            labels: vec![OrdinalLabel::Gering],
        }];
        let err = merge_labels(labels, vec![test_item("t1", &["A001", "A002"])]).unwrap_err();
        assert!(matches!(
            err,
            GermsError::LabelCountMismatch {
                labels: 1,
                annotators: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_merge_files() {
        let dir = tempfile::tempdir().unwrap();
        let labels_path = dir.path().join("labels.json");
        let texts_path = dir.path().join("test.jsonl");
        std::fs::write(
            &labels_path,
            r#"[{"id": "t1", "labels": ["2-Vorhanden", "0-Kein"]}]"#,
        )
        .unwrap();
        std::fs::write(
            &texts_path,
            "{\"id\": \"t1\", \"text\": \"hi\", \"annotators\": [\"A001\", \"A002\"]}\n",
        )
        .unwrap();

        let merged = merge_files(&labels_path, &texts_path).unwrap();
        assert_eq!(merged[0].annotations.len(), 2);
        assert_eq!(merged[0].annotations[0].label, OrdinalLabel::Vorhanden);
    }
}

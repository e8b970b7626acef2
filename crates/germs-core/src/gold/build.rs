//! Derive gold targets from annotated items
//!
//! The produced entries carry the columns of both subtasks. Where the
//! majority label is tied, `multi_maj` lists every tied label and
//! `bin_maj` lists both binary answers if the tie spans `0-Kein` and a
//! present label.

use std::collections::BTreeMap;

use super::{GoldEntry, GoldScalar, GoldTargets, GoldValue};
use crate::aggregate::Aggregator;
use crate::error::{GermsError, Result};
use crate::records::AnnotatedItem;
use crate::schema::{
    BIN_ALL, BIN_MAJ, BIN_ONE, DISAGREE_BIN, DIST_BIN_COLUMNS, DIST_MULTI_COLUMNS, MULTI_MAJ,
};

fn flag(value: bool) -> GoldValue {
    GoldValue::Scalar(if value { "1" } else { "0" }.into())
}

fn probability(id: &str, value: f64) -> Result<GoldValue> {
    serde_json::Number::from_f64(value)
        .map(|n| GoldValue::Scalar(GoldScalar::Number(n)))
        .ok_or_else(|| GermsError::Other(format!("non-finite probability for {}", id)))
}

fn entry(aggregator: &Aggregator, item: &AnnotatedItem) -> Result<GoldEntry> {
    let row = aggregator.categorical(item)?;
    let distribution = aggregator.distribution(item)?;
    let candidates = aggregator.majority_candidates(item)?;

    let mut columns = BTreeMap::new();

    let any_absent = candidates.iter().any(|l| !l.is_present());
    let any_present = candidates.iter().any(|l| l.is_present());
    let bin_maj = if any_absent && any_present {
        GoldValue::List(vec!["0".into(), "1".into()])
    } else {
        flag(any_present)
    };
    columns.insert(BIN_MAJ.to_string(), bin_maj);

    let multi_maj = match candidates.as_slice() {
        [single] => GoldValue::Scalar(single.as_str().into()),
        tied => GoldValue::List(tied.iter().map(|l| l.as_str().into()).collect()),
    };
    columns.insert(MULTI_MAJ.to_string(), multi_maj);

    columns.insert(BIN_ONE.to_string(), flag(row.bin_one));
    columns.insert(BIN_ALL.to_string(), flag(row.bin_all));
    columns.insert(DISAGREE_BIN.to_string(), flag(row.disagree_bin));

    for (column, value) in DIST_BIN_COLUMNS.iter().zip(distribution.dist_bin) {
        columns.insert(column.to_string(), probability(&item.id, value)?);
    }
    for (column, value) in DIST_MULTI_COLUMNS.iter().zip(distribution.dist_multi) {
        columns.insert(column.to_string(), probability(&item.id, value)?);
    }

    Ok(GoldEntry {
        id: item.id.clone(),
        columns,
    })
}

/// Gold targets for both subtasks, one entry per item in input order
pub fn build_targets(items: &[AnnotatedItem], aggregator: &Aggregator) -> Result<GoldTargets> {
    let entries = items
        .iter()
        .map(|item| entry(aggregator, item))
        .collect::<Result<Vec<_>>>()?;
    GoldTargets::new(entries)
}

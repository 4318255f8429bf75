use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use crate::{
    counts::CountsTable,
    lengths::LengthTable,
    table::{Row, Schema, Table},
};

#[derive(Debug, Error, Eq, PartialEq)]
pub enum JoinError {
    #[error("column '{0}' is present in both the length and counts tables")]
    DuplicateColumn(String),
}

#[derive(Default)]
struct Entry {
    attributes: Option<Vec<String>>,
    length: Option<f64>,
    values: Option<Vec<Option<f64>>>,
}

/// Outer joins the length and counts tables on gene ID.
///
/// Every gene ID in either table appears exactly once in the result, in lexicographic order.
/// Cells from the side a gene is missing from are left empty.
pub fn outer_join(lengths: LengthTable, counts: CountsTable) -> Result<Table, JoinError> {
    let (descriptive_names, gene_records) = lengths.into_parts();
    let (sample_names, count_records) = counts.into_parts();

    let names: HashSet<_> = descriptive_names.iter().collect();

    if let Some(name) = sample_names.iter().find(|name| names.contains(name)) {
        return Err(JoinError::DuplicateColumn(name.clone()));
    }

    let mut entries: BTreeMap<String, Entry> = BTreeMap::new();

    for record in gene_records {
        let (id, attributes, length) = record.into_parts();
        let entry = entries.entry(id).or_default();
        entry.attributes = Some(attributes);
        entry.length = length;
    }

    for (id, values) in count_records {
        let entry = entries.entry(id).or_default();
        entry.values = Some(values);
    }

    let sample_count = sample_names.len();

    let rows = entries
        .into_iter()
        .map(|(id, entry)| {
            let values = entry.values.unwrap_or_else(|| vec![None; sample_count]);

            Row::new(id, entry.attributes, entry.length, values)
        })
        .collect();

    Ok(Table::new(Schema::new(descriptive_names, sample_names), rows))
}

use std::{collections::HashSet, io::Read};

use thiserror::Error;

use crate::{table::ID_COLUMN, tsv};

#[derive(Debug, Error)]
pub enum ReadCountsError {
    #[error("missing column: {}", ID_COLUMN)]
    MissingIdColumn,
    #[error("missing sample columns")]
    MissingSampleColumns,
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),
    #[error("invalid count for gene '{id}' in sample '{sample}'")]
    InvalidCount {
        id: String,
        sample: String,
        #[source]
        source: tsv::ParseValueError,
    },
    #[error("duplicate gene ID: {0}")]
    DuplicateId(String),
    #[error("invalid record")]
    InvalidRecord(#[source] csv::Error),
}

/// Raw counts, one value per sample, keyed by gene ID.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CountsTable {
    sample_names: Vec<String>,
    records: Vec<(String, Vec<Option<f64>>)>,
}

impl CountsTable {
    pub fn sample_names(&self) -> &[String] {
        &self.sample_names
    }

    pub fn records(&self) -> &[(String, Vec<Option<f64>>)] {
        &self.records
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<(String, Vec<Option<f64>>)>) {
        (self.sample_names, self.records)
    }
}

pub fn read<R>(reader: &mut csv::Reader<R>) -> Result<CountsTable, ReadCountsError>
where
    R: Read,
{
    let headers = reader
        .headers()
        .map_err(ReadCountsError::InvalidRecord)?
        .clone();

    if let Some(name) = tsv::find_duplicate_name(&headers) {
        return Err(ReadCountsError::DuplicateColumn(name.into()));
    }

    let id_index = headers
        .iter()
        .position(|name| name == ID_COLUMN)
        .ok_or(ReadCountsError::MissingIdColumn)?;

    let sample_names: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != id_index)
        .map(|(_, name)| name.into())
        .collect();

    if sample_names.is_empty() {
        return Err(ReadCountsError::MissingSampleColumns);
    }

    let mut ids = HashSet::new();
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result.map_err(ReadCountsError::InvalidRecord)?;

        let id = &record[id_index];

        if !ids.insert(id.to_string()) {
            return Err(ReadCountsError::DuplicateId(id.into()));
        }

        let values = record
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != id_index)
            .zip(&sample_names)
            .map(|((_, raw_value), sample)| {
                tsv::parse_value(raw_value).map_err(|e| ReadCountsError::InvalidCount {
                    id: id.into(),
                    sample: sample.clone(),
                    source: e,
                })
            })
            .collect::<Result<_, _>>()?;

        records.push((id.into(), values));
    }

    Ok(CountsTable {
        sample_names,
        records,
    })
}

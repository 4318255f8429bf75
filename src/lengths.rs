use std::{collections::HashSet, io::Read};

use thiserror::Error;

use crate::{
    table::{ID_COLUMN, LENGTH_COLUMN},
    tsv,
};

#[derive(Debug, Error)]
pub enum ReadLengthsError {
    #[error("missing column: {0}")]
    MissingColumn(&'static str),
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),
    #[error("invalid length for gene '{id}'")]
    InvalidLength {
        id: String,
        #[source]
        source: tsv::ParseValueError,
    },
    #[error("duplicate gene ID: {0}")]
    DuplicateId(String),
    #[error("invalid record")]
    InvalidRecord(#[source] csv::Error),
}

/// A gene and its descriptive attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneRecord {
    id: String,
    attributes: Vec<String>,
    total_exon_length: Option<f64>,
}

impl GeneRecord {
    pub fn new(id: String, attributes: Vec<String>, total_exon_length: Option<f64>) -> Self {
        Self {
            id,
            attributes,
            total_exon_length,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw descriptive cells, in column order. This includes the unparsed length.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn total_exon_length(&self) -> Option<f64> {
        self.total_exon_length
    }

    pub fn into_parts(self) -> (String, Vec<String>, Option<f64>) {
        (self.id, self.attributes, self.total_exon_length)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LengthTable {
    descriptive_names: Vec<String>,
    records: Vec<GeneRecord>,
}

impl LengthTable {
    /// Names of every column other than the gene ID, in file order.
    pub fn descriptive_names(&self) -> &[String] {
        &self.descriptive_names
    }

    pub fn records(&self) -> &[GeneRecord] {
        &self.records
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<GeneRecord>) {
        (self.descriptive_names, self.records)
    }
}

pub fn read<R>(reader: &mut csv::Reader<R>) -> Result<LengthTable, ReadLengthsError>
where
    R: Read,
{
    let headers = reader
        .headers()
        .map_err(ReadLengthsError::InvalidRecord)?
        .clone();

    if let Some(name) = tsv::find_duplicate_name(&headers) {
        return Err(ReadLengthsError::DuplicateColumn(name.into()));
    }

    let id_index = headers
        .iter()
        .position(|name| name == ID_COLUMN)
        .ok_or(ReadLengthsError::MissingColumn(ID_COLUMN))?;

    let length_index = headers
        .iter()
        .position(|name| name == LENGTH_COLUMN)
        .ok_or(ReadLengthsError::MissingColumn(LENGTH_COLUMN))?;

    let descriptive_names = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != id_index)
        .map(|(_, name)| name.into())
        .collect();

    let mut ids = HashSet::new();
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result.map_err(ReadLengthsError::InvalidRecord)?;

        let id = &record[id_index];

        if !ids.insert(id.to_string()) {
            return Err(ReadLengthsError::DuplicateId(id.into()));
        }

        let total_exon_length = tsv::parse_value(&record[length_index]).map_err(|e| {
            ReadLengthsError::InvalidLength {
                id: id.into(),
                source: e,
            }
        })?;

        let attributes = record
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != id_index)
            .map(|(_, value)| value.into())
            .collect();

        records.push(GeneRecord::new(id.into(), attributes, total_exon_length));
    }

    Ok(LengthTable {
        descriptive_names,
        records,
    })
}

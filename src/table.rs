//! Gene expression tables.

pub const ID_COLUMN: &str = "ensembl_id";
pub const LENGTH_COLUMN: &str = "total_exon_length";

/// Column layout of a merged table.
///
/// The identifier column always comes first, followed by the descriptive columns (which include
/// the length column) and the sample columns.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Schema {
    descriptive_names: Vec<String>,
    sample_names: Vec<String>,
}

impl Schema {
    pub fn new(descriptive_names: Vec<String>, sample_names: Vec<String>) -> Self {
        Self {
            descriptive_names,
            sample_names,
        }
    }

    pub fn descriptive_names(&self) -> &[String] {
        &self.descriptive_names
    }

    pub fn sample_names(&self) -> &[String] {
        &self.sample_names
    }

    /// Returns all column names in output order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        [ID_COLUMN]
            .into_iter()
            .chain(self.descriptive_names.iter().map(|s| s.as_str()))
            .chain(self.sample_names.iter().map(|s| s.as_str()))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    id: String,
    attributes: Option<Vec<String>>,
    length: Option<f64>,
    values: Vec<Option<f64>>,
}

impl Row {
    pub fn new(
        id: String,
        attributes: Option<Vec<String>>,
        length: Option<f64>,
        values: Vec<Option<f64>>,
    ) -> Self {
        Self {
            id,
            attributes,
            length,
            values,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw descriptive cells, or `None` when the gene is absent from the length table.
    pub fn attributes(&self) -> Option<&[String]> {
        self.attributes.as_deref()
    }

    pub fn length(&self) -> Option<f64> {
        self.length
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    schema: Schema,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(schema: Schema, rows: Vec<Row>) -> Self {
        Self { schema, rows }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn lengths(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|row| row.length).collect()
    }

    /// Returns the values of the sample at column index `i`, one per row.
    pub fn sample_values(&self, i: usize) -> Vec<Option<f64>> {
        self.rows
            .iter()
            .map(|row| row.values.get(i).copied().flatten())
            .collect()
    }

    /// Builds a table with the same schema and rows but with the sample columns replaced.
    ///
    /// `columns` is column-major: one vector per sample, each with one value per row.
    pub fn with_sample_columns(&self, columns: Vec<Vec<Option<f64>>>) -> Self {
        debug_assert_eq!(columns.len(), self.schema.sample_names.len());

        let mut rows = self.rows.clone();

        for row in &mut rows {
            row.values.clear();
        }

        for column in columns {
            debug_assert_eq!(column.len(), rows.len());

            for (row, value) in rows.iter_mut().zip(column) {
                row.values.push(value);
            }
        }

        Self {
            schema: self.schema.clone(),
            rows,
        }
    }
}

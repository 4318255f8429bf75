use std::io::{self, Write};

use super::DECIMAL_PLACES;
use crate::{table::Table, tsv};

pub struct Writer<W>
where
    W: Write,
{
    inner: csv::Writer<W>,
}

impl<W> Writer<W>
where
    W: Write,
{
    pub fn new(inner: W) -> Self {
        Self {
            inner: tsv::writer(inner),
        }
    }

    /// Writes the header and every row of the table.
    ///
    /// Missing cells are written as empty fields. Sample values are written with exactly
    /// [`DECIMAL_PLACES`] decimal digits.
    pub fn write_table(&mut self, table: &Table) -> io::Result<()> {
        let schema = table.schema();

        self.inner.write_record(schema.column_names())?;

        let descriptive_column_count = schema.descriptive_names().len();
        let mut record = csv::StringRecord::new();

        for row in table.rows() {
            record.clear();

            record.push_field(row.id());

            match row.attributes() {
                Some(attributes) => {
                    for attribute in attributes {
                        record.push_field(attribute);
                    }
                }
                None => {
                    for _ in 0..descriptive_column_count {
                        record.push_field("");
                    }
                }
            }

            for value in row.values() {
                match value {
                    Some(n) => record.push_field(&format_value(*n)),
                    None => record.push_field(""),
                }
            }

            self.inner.write_record(&record)?;
        }

        Ok(())
    }

    /// Flushes buffered records and returns the underlying writer.
    pub fn finish(self) -> io::Result<W> {
        self.inner.into_inner().map_err(|e| e.into_error())
    }
}

fn format_value(n: f64) -> String {
    // Negative zero is written as zero.
    let n = if n == 0.0 { 0.0 } else { n };
    format!("{n:.prec$}", prec = DECIMAL_PLACES as usize)
}

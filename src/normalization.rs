mod length_policy;
pub mod tpm;
mod writer;

pub use self::{length_policy::LengthPolicy, writer::Writer};

use thiserror::Error;

use crate::table::Table;

/// Number of decimal places kept in normalized values.
pub const DECIMAL_PLACES: i32 = 4;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("unusable length ({length}) for gene '{id}' in sample '{sample}'")]
    UnusableLength {
        id: String,
        sample: String,
        length: f64,
    },
}

/// Replaces each sample column of the table with its TPMs.
///
/// The schema, row order, and descriptive columns of the input table are preserved. Values are
/// rounded to [`DECIMAL_PLACES`].
pub fn calculate_tpms(table: &Table, length_policy: LengthPolicy) -> Result<Table, Error> {
    let lengths = table.lengths();
    let sample_names = table.schema().sample_names();

    let mut columns = Vec::with_capacity(sample_names.len());

    for (i, sample) in sample_names.iter().enumerate() {
        let counts = table.sample_values(i);

        let tpms = tpm::normalize(&lengths, &counts, length_policy).map_err(
            |tpm::UnusableLengthError(j)| {
                let row = &table.rows()[j];

                Error::UnusableLength {
                    id: row.id().into(),
                    sample: sample.clone(),
                    length: row.length().unwrap_or(f64::NAN),
                }
            },
        )?;

        columns.push(
            tpms.into_iter()
                .map(|value| value.map(|n| round(n, DECIMAL_PLACES)))
                .collect(),
        );
    }

    Ok(table.with_sample_columns(columns))
}

pub fn round(n: f64, decimal_places: i32) -> f64 {
    let scale = 10f64.powi(decimal_places);
    (n * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Row, Schema};

    fn build_table(lengths: &[Option<f64>], counts: &[[Option<f64>; 2]]) -> Table {
        let schema = Schema::new(
            vec![String::from("total_exon_length")],
            vec![String::from("sampleA"), String::from("sampleB")],
        );

        let rows = lengths
            .iter()
            .zip(counts)
            .enumerate()
            .map(|(i, (length, values))| {
                let attributes = length.map(|n| vec![n.to_string()]);
                Row::new(format!("g{}", i + 1), attributes, *length, values.to_vec())
            })
            .collect();

        Table::new(schema, rows)
    }

    #[test]
    fn test_calculate_tpms() -> Result<(), Error> {
        let table = build_table(
            &[Some(1000.0), Some(2000.0), Some(3000.0), None],
            &[
                [Some(10.0), Some(1.0)],
                [Some(20.0), Some(1.0)],
                [Some(0.0), Some(1.0)],
                [Some(5.0), None],
            ],
        );

        let actual = calculate_tpms(&table, LengthPolicy::default())?;

        assert_eq!(actual.schema(), table.schema());

        for (a, b) in actual.rows().iter().zip(table.rows()) {
            assert_eq!(a.id(), b.id());
            assert_eq!(a.attributes(), b.attributes());
            assert_eq!(a.length(), b.length());
        }

        assert_eq!(
            actual.sample_values(0),
            [Some(500000.0), Some(500000.0), Some(0.0), None]
        );

        // 1/1000, 1/2000, 1/3000 scaled to a million: 545454.5454..., 272727.2727..., 181818.1818...
        assert_eq!(
            actual.sample_values(1),
            [Some(545454.5455), Some(272727.2727), Some(181818.1818), None]
        );

        Ok(())
    }

    #[test]
    fn test_calculate_tpms_with_unusable_length() {
        let table = build_table(
            &[Some(1000.0), Some(0.0)],
            &[[Some(10.0), Some(1.0)], [Some(20.0), Some(1.0)]],
        );

        assert_eq!(
            calculate_tpms(&table, LengthPolicy::Error),
            Err(Error::UnusableLength {
                id: String::from("g2"),
                sample: String::from("sampleA"),
                length: 0.0,
            })
        );
    }

    #[test]
    fn test_round() {
        assert_eq!(round(545454.54545454, 4), 545454.5455);
        assert_eq!(round(3.252960768479983, 4), 3.253);
        assert_eq!(round(500000.0, 4), 500000.0);
        assert_eq!(round(0.00004, 4), 0.0);
    }
}

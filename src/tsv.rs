use std::{
    collections::HashSet,
    fs::File,
    io::{self, Read},
    num,
    path::Path,
};

use flate2::read::MultiGzDecoder;
use thiserror::Error;

const DELIMITER: u8 = b'\t';

static MISSING_VALUES: &[&str] = &["", "NA", "NaN", "nan"];

pub fn open<P>(src: P) -> io::Result<csv::Reader<Box<dyn Read>>>
where
    P: AsRef<Path>,
{
    let path = src.as_ref();
    let extension = path.extension();
    let file = File::open(path)?;

    let inner: Box<dyn Read> = match extension.and_then(|ext| ext.to_str()) {
        Some("gz") => Box::new(MultiGzDecoder::new(file)),
        _ => Box::new(file),
    };

    Ok(reader(inner))
}

pub fn reader<R>(inner: R) -> csv::Reader<R>
where
    R: Read,
{
    csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .from_reader(inner)
}

pub fn writer<W>(inner: W) -> csv::Writer<W>
where
    W: io::Write,
{
    csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(inner)
}

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ParseValueError {
    #[error("invalid number")]
    Invalid(#[source] num::ParseFloatError),
    #[error("non-finite number: {0}")]
    NonFinite(String),
}

/// Parses a numeric cell, treating empty and `NA`-like cells as missing.
///
/// Other spellings of NaN and infinity (e.g., `NAN`, `inf`) are rejected.
pub fn parse_value(s: &str) -> Result<Option<f64>, ParseValueError> {
    let s = s.trim();

    if MISSING_VALUES.contains(&s) {
        return Ok(None);
    }

    let n: f64 = s.parse().map_err(ParseValueError::Invalid)?;

    if n.is_finite() {
        Ok(Some(n))
    } else {
        Err(ParseValueError::NonFinite(s.into()))
    }
}

/// Returns the first column name that appears more than once in a header.
pub fn find_duplicate_name(headers: &csv::StringRecord) -> Option<&str> {
    let mut names = HashSet::new();
    headers.iter().find(|name| !names.insert(*name))
}

#[cfg(test)]
mod tests {
    use std::{env, fs, io::Write};

    use flate2::{write::GzEncoder, Compression};

    use super::*;

    #[test]
    fn test_parse_value() -> Result<(), ParseValueError> {
        assert_eq!(parse_value("8")?, Some(8.0));
        assert_eq!(parse_value("2.5")?, Some(2.5));
        assert_eq!(parse_value(" 13 ")?, Some(13.0));
        assert_eq!(parse_value("-3")?, Some(-3.0));
        assert_eq!(parse_value("")?, None);
        assert_eq!(parse_value("NA")?, None);
        assert_eq!(parse_value("NaN")?, None);
        assert_eq!(parse_value("nan")?, None);

        assert!(matches!(
            parse_value("chr1"),
            Err(ParseValueError::Invalid(_))
        ));

        for s in ["NAN", "-nan", "inf", "-inf", "Infinity", "1e400"] {
            assert_eq!(
                parse_value(s),
                Err(ParseValueError::NonFinite(s.into())),
                "{s}"
            );
        }

        Ok(())
    }

    #[test]
    fn test_find_duplicate_name() {
        let headers = csv::StringRecord::from(vec!["ensembl_id", "rep1", "rep2"]);
        assert_eq!(find_duplicate_name(&headers), None);

        let headers = csv::StringRecord::from(vec!["ensembl_id", "rep1", "rep2", "rep1"]);
        assert_eq!(find_duplicate_name(&headers), Some("rep1"));
    }

    #[test]
    fn test_open_with_gzip_compressed_file() -> io::Result<()> {
        let dst = env::temp_dir().join("count2tpm-tsv-open.tsv.gz");

        let mut encoder = GzEncoder::new(fs::File::create(&dst)?, Compression::default());
        encoder.write_all(b"ensembl_id\tsampleA\ng1\t10\n")?;
        encoder.finish()?;

        let mut reader = open(&dst)?;

        let headers = reader.headers()?.clone();
        assert_eq!(headers, vec!["ensembl_id", "sampleA"]);

        let records: Vec<_> = reader.records().collect::<Result<_, _>>()?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], vec!["g1", "10"]);

        fs::remove_file(dst)?;

        Ok(())
    }
}

use std::{
    fs::File,
    io::{self, BufReader},
    path::Path,
};

use flate2::{write::GzEncoder, Compression};

pub fn compress<P, Q>(src: P, dst: Q) -> io::Result<()>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let mut reader = File::open(src).map(BufReader::new)?;

    let mut encoder = File::create(dst).map(|file| GzEncoder::new(file, Compression::default()))?;
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    Ok(())
}

/// Reads a TSV file as a header and rows of raw cells.
pub fn read_tsv<P>(src: P) -> io::Result<(Vec<String>, Vec<Vec<String>>)>
where
    P: AsRef<Path>,
{
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_path(src)?;

    let header = reader.headers()?.iter().map(String::from).collect();

    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(String::from).collect());
    }

    Ok((header, rows))
}

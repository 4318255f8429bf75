use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    counts::{self, CountsTable},
    join::{self, outer_join},
    lengths::{self, LengthTable},
    normalization::{self, calculate_tpms, LengthPolicy},
    table::Table,
    tsv,
};

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("I/O error")]
    Io(#[source] io::Error),
    #[error("could not open file: {1}")]
    OpenFile(#[source] io::Error, PathBuf),
    #[error("could not create file: {1}")]
    CreateFile(#[source] io::Error, PathBuf),
    #[error("invalid counts: {1}")]
    ReadCounts(#[source] counts::ReadCountsError, PathBuf),
    #[error("invalid lengths: {1}")]
    ReadLengths(#[source] lengths::ReadLengthsError, PathBuf),
    #[error("could not join tables")]
    Join(#[source] join::JoinError),
    #[error("normalization error")]
    Normalization(#[source] normalization::Error),
}

/// Converts the counts in `counts_src` to TPMs and writes them to `dst`.
pub fn normalize<P, Q, R>(
    counts_src: P,
    lengths_src: Q,
    dst: R,
    length_policy: LengthPolicy,
) -> Result<(), NormalizeError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    let counts_src = counts_src.as_ref();
    let lengths_src = lengths_src.as_ref();
    let dst = dst.as_ref();

    info!(src = ?counts_src, "reading counts");

    let counts = read_counts(counts_src)?;

    info!(
        gene_count = counts.records().len(),
        sample_count = counts.sample_names().len(),
        "read counts"
    );

    info!(src = ?lengths_src, "reading lengths");

    let lengths = read_lengths(lengths_src)?;

    info!(gene_count = lengths.records().len(), "read lengths");

    let table = outer_join(lengths, counts).map_err(NormalizeError::Join)?;

    info!(gene_count = table.rows().len(), "joined tables");
    warn_unmatched_genes(&table);

    info!(%length_policy, "normalizing counts");

    let tpms = calculate_tpms(&table, length_policy).map_err(NormalizeError::Normalization)?;

    info!(dst = ?dst, "writing TPMs");

    let writer = File::create(dst)
        .map(BufWriter::new)
        .map_err(|e| NormalizeError::CreateFile(e, dst.into()))?;

    let mut tpm_writer = normalization::Writer::new(writer);
    tpm_writer.write_table(&tpms).map_err(NormalizeError::Io)?;

    tpm_writer
        .finish()
        .and_then(|mut writer| writer.flush())
        .map_err(NormalizeError::Io)?;

    Ok(())
}

fn read_counts(src: &Path) -> Result<CountsTable, NormalizeError> {
    let mut reader = tsv::open(src).map_err(|e| NormalizeError::OpenFile(e, src.into()))?;
    counts::read(&mut reader).map_err(|e| NormalizeError::ReadCounts(e, src.into()))
}

fn read_lengths(src: &Path) -> Result<LengthTable, NormalizeError> {
    let mut reader = tsv::open(src).map_err(|e| NormalizeError::OpenFile(e, src.into()))?;
    lengths::read(&mut reader).map_err(|e| NormalizeError::ReadLengths(e, src.into()))
}

fn warn_unmatched_genes(table: &Table) {
    let without_lengths = table
        .rows()
        .iter()
        .filter(|row| row.attributes().is_none())
        .count();

    if without_lengths > 0 {
        warn!(gene_count = without_lengths, "genes are missing lengths");
    }

    let without_counts = table
        .rows()
        .iter()
        .filter(|row| row.values().iter().all(Option::is_none))
        .count();

    if without_counts > 0 {
        warn!(gene_count = without_counts, "genes have no counts");
    }
}

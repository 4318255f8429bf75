use std::path::PathBuf;

use clap::Parser;
use git_testament::{git_testament, render_testament};

use crate::normalization::LengthPolicy;

git_testament!(TESTAMENT);

/// Convert gene read counts to transcripts per million (TPM).
#[derive(Parser)]
#[command(version = render_testament!(TESTAMENT))]
pub struct Cli {
    /// Input counts file (TSV). Requires an `ensembl_id` column and one column per sample.
    #[arg(short = 'c', long = "countsFile")]
    pub counts_file: PathBuf,

    /// Input gene lengths file (TSV). Requires `ensembl_id` and `total_exon_length` columns.
    #[arg(short = 'l', long = "lengthFile")]
    pub length_file: PathBuf,

    /// Output destination for TPMs.
    #[arg(short = 'o', long = "outFile", default_value = "./out.tpm.tsv")]
    pub out_file: PathBuf,

    /// Treatment of genes with a zero, negative, or non-finite length.
    #[arg(long, default_value_t = LengthPolicy::Missing)]
    pub length_policy: LengthPolicy,
}

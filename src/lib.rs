//! Conversion of gene read counts to transcripts per million (TPM).

pub mod cli;
pub mod commands;
pub mod counts;
pub mod join;
pub mod lengths;
pub mod normalization;
pub mod table;
pub mod tsv;

pub use self::{
    cli::Cli,
    normalization::LengthPolicy,
    table::{Row, Schema, Table},
};

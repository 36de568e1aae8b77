//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Row-level problems are not errors here: they are `RowRejection`s, counted
//! by the track builder and never propagated.

use crate::columns::{ColumnReport, SemanticField};
use thiserror::Error;

/// Errors that can occur while reading the CSV input
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to open input: {0}")]
    OpenFailed(#[from] std::io::Error),

    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that abort the conversion of one file
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Could not detect all required columns (missing: {})", format_fields(.missing))]
    UnresolvableColumn {
        missing: Vec<SemanticField>,
        report: Box<ColumnReport>,
    },

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

fn format_fields(fields: &[SemanticField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The workbook could not be opened or parsed.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: calamine::XlsxError,
    },

    /// The configured worksheet does not exist.
    #[error("worksheet '{sheet}' not found (available: {available:?})")]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    /// The worksheet has no header row.
    #[error("worksheet is empty: no header row")]
    EmptySheet,

    /// A header cell names no known column.
    #[error("unknown header '{header}' in column {position}")]
    UnknownHeader { header: String, position: usize },

    /// Two header cells map to the same column.
    #[error("column '{column}' appears more than once in the header")]
    DuplicateHeader { column: &'static str },

    /// Required columns are absent from the header.
    #[error("missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),

    /// Rendering the workbook failed.
    #[error("failed to render workbook: {0}")]
    Render(#[from] rust_xlsxwriter::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The rendered workbook could not replace the store file.
    #[error("failed to replace store file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

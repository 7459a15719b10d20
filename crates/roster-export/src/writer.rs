//! Atomic JSON file output.

use std::io::Write;
use std::path::{Path, PathBuf};

use roster_core::{Category, RecencyWindow, RosterTable};
use serde::Serialize;

use crate::error::ExportError;
use crate::projector::project;

/// File name of the aggregate projection.
pub const TOTAL_FILE: &str = "total.json";

/// One written (or, in a dry run, computed) file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub file: &'static str,
    pub path: PathBuf,
    pub records: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub files: Vec<FileReport>,
    pub unknown_categories: Vec<String>,
    pub dry_run: bool,
}

/// Project `table` and write the eight JSON files into `dir`.
///
/// With `dry_run` nothing touches the filesystem; the report still lists
/// what would have been written.
///
/// # Errors
///
/// Returns [`ExportError`] if a file cannot be serialized or replaced.
pub fn export(
    table: &RosterTable,
    dir: &Path,
    window: RecencyWindow,
    dry_run: bool,
) -> Result<ExportReport, ExportError> {
    let projection = project(table, window);

    if !dry_run {
        std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let mut files = Vec::with_capacity(Category::ALL.len() + 1);
    for (category, records) in &projection.by_category {
        files.push(emit(dir, category.file_name(), records, dry_run)?);
    }
    files.push(emit(dir, TOTAL_FILE, &projection.total, dry_run)?);

    Ok(ExportReport {
        files,
        unknown_categories: projection.unknown,
        dry_run,
    })
}

fn emit<T: Serialize>(
    dir: &Path,
    file: &'static str,
    records: &[T],
    dry_run: bool,
) -> Result<FileReport, ExportError> {
    let path = dir.join(file);
    if dry_run {
        tracing::debug!(file, records = records.len(), "dry run, not written");
    } else {
        write_json(&path, file, records)?;
        tracing::debug!(path = %path.display(), records = records.len(), "wrote projection");
    }
    Ok(FileReport {
        file,
        path,
        records: records.len(),
    })
}

/// Serialize `value` with two-space indentation and a trailing newline, then
/// swap it into place through a temp file in the same directory.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization or any filesystem step fails.
pub fn write_json<T: Serialize + ?Sized>(
    path: &Path,
    file: &'static str,
    value: &T,
) -> Result<(), ExportError> {
    let mut bytes =
        serde_json::to_vec_pretty(value).map_err(|source| ExportError::Serialize { file, source })?;
    bytes.push(b'\n');

    let io_error = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(io_error)?;
    staged.write_all(&bytes).map_err(io_error)?;
    staged.as_file().sync_all().map_err(io_error)?;
    staged.persist(path).map_err(|source| ExportError::Persist {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

//! What the workbook held before a save.
//!
//! A save rewrites the file, so every sheet is read back first (values and
//! formulas) and carried into the new workbook.

use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};

use crate::error::StoreError;

#[derive(Debug)]
pub(crate) struct SheetSnapshot {
    pub name: String,
    pub cells: Range<Data>,
    pub formulas: Range<String>,
}

/// Every sheet of the workbook at `path`, in workbook order. A missing file
/// has no sheets.
pub(crate) fn read(path: &Path) -> Result<Vec<SheetSnapshot>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let read_error = |source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook: Xlsx<_> = open_workbook(path).map_err(read_error)?;
    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let cells = workbook.worksheet_range(&name).map_err(read_error)?;
        let formulas = workbook.worksheet_formula(&name).map_err(read_error)?;
        sheets.push(SheetSnapshot {
            name,
            cells,
            formulas,
        });
    }
    Ok(sheets)
}

impl SheetSnapshot {
    /// Non-empty values, at absolute `(row, col)` positions.
    pub fn values(&self) -> impl Iterator<Item = ((u32, u32), &Data)> + '_ {
        absolute(&self.cells).filter(|(_, data)| !matches!(data, Data::Empty))
    }

    /// Formula cells, at absolute positions, without the leading `=`.
    pub fn formulas(&self) -> impl Iterator<Item = ((u32, u32), &str)> + '_ {
        absolute(&self.formulas)
            .map(|(position, formula)| (position, formula.as_str()))
            .filter(|(_, formula)| !formula.is_empty())
    }

    pub fn value_at(&self, position: (u32, u32)) -> Option<&Data> {
        self.cells
            .get_value(position)
            .filter(|data| !matches!(data, Data::Empty))
    }

    pub fn formula_at(&self, position: (u32, u32)) -> Option<&str> {
        self.formulas
            .get_value(position)
            .map(String::as_str)
            .filter(|formula| !formula.is_empty())
    }
}

fn absolute<T: calamine::CellType>(range: &Range<T>) -> impl Iterator<Item = ((u32, u32), &T)> {
    let (first_row, first_col) = range.start().unwrap_or((0, 0));
    range.used_cells().map(move |(row, col, value)| {
        (
            (first_row.saturating_add(index(row)), first_col.saturating_add(index(col))),
            value,
        )
    })
}

fn index(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

//! Loading the roster from a workbook.
//!
//! The header row is validated once and turned into a [`HeaderLayout`]: one
//! optional [`Column`] per position. Rows are then read by name, so the
//! columns may appear in any order in the file.
//!
//! Table row `i` always sits on sheet row `header + 1 + i`: interior blank
//! rows stay in the table so a save writes every row back where it came from.

use std::path::Path;

use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use roster_core::{ActivityCell, Column, RosterRow, RosterTable, normalize};

use crate::error::StoreError;

/// Open `path` and read the roster from worksheet `sheet`.
///
/// # Errors
///
/// Returns [`StoreError`] if the workbook cannot be opened, the sheet is
/// missing, or the header row does not name exactly the roster columns.
pub fn load(path: &Path, sheet: &str) -> Result<RosterTable, StoreError> {
    let read_error = |source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook: Xlsx<_> = open_workbook(path).map_err(read_error)?;
    let available = workbook.sheet_names();
    if !available.iter().any(|name| name == sheet) {
        return Err(StoreError::SheetNotFound {
            sheet: sheet.to_string(),
            available,
        });
    }

    let range = workbook.worksheet_range(sheet).map_err(read_error)?;
    let table = from_range(&range)?;
    tracing::debug!(path = %path.display(), sheet, rows = table.len(), "loaded roster");
    Ok(table)
}

/// Build a table from an in-memory cell range whose first row is the header.
///
/// Trailing blank rows are dropped; interior ones are kept in place.
///
/// # Errors
///
/// Returns [`StoreError`] if the range is empty or the header is invalid.
pub fn from_range(range: &Range<Data>) -> Result<RosterTable, StoreError> {
    RosterSheet::parse(range).map(|sheet| sheet.rows.into_iter().collect())
}

/// A roster worksheet located on its sheet.
#[derive(Debug)]
pub(crate) struct RosterSheet {
    /// Absolute index of the header row.
    pub header_row: u32,
    /// Absolute column index of every roster column.
    pub columns: Vec<(Column, u32)>,
    /// Record rows; `rows[i]` sits on sheet row `header_row + 1 + i`.
    pub rows: Vec<RosterRow>,
}

impl RosterSheet {
    pub(crate) fn parse(range: &Range<Data>) -> Result<Self, StoreError> {
        let (header_row, first_col) = range.start().unwrap_or((0, 0));
        let mut cells = range.rows();
        let header = cells.next().ok_or(StoreError::EmptySheet)?;
        let layout = HeaderLayout::from_cells(header)?;

        let mut rows: Vec<RosterRow> = cells.map(|cells| layout.read_row(cells)).collect();
        while rows.last().is_some_and(RosterRow::is_blank) {
            rows.pop();
        }

        let columns = (first_col..)
            .zip(&layout.positions)
            .filter_map(|(index, column)| column.map(|column| (column, index)))
            .collect();
        Ok(Self {
            header_row,
            columns,
            rows,
        })
    }
}

/// Column assignment for every header position.
#[derive(Debug)]
struct HeaderLayout {
    positions: Vec<Option<Column>>,
}

impl HeaderLayout {
    fn from_cells(cells: &[Data]) -> Result<Self, StoreError> {
        let mut positions = Vec::with_capacity(cells.len());
        for (position, cell) in cells.iter().enumerate() {
            let text = cell_text(cell);
            if text.trim().is_empty() {
                positions.push(None);
                continue;
            }
            let column = Column::from_header(&text).ok_or_else(|| StoreError::UnknownHeader {
                header: text.trim().to_string(),
                position: position + 1,
            })?;
            if positions.contains(&Some(column)) {
                return Err(StoreError::DuplicateHeader {
                    column: column.header(),
                });
            }
            positions.push(Some(column));
        }

        let missing: Vec<&'static str> = Column::ALL
            .into_iter()
            .filter(|column| !positions.contains(&Some(*column)))
            .map(Column::header)
            .collect();
        if !missing.is_empty() {
            return Err(StoreError::MissingColumns(missing));
        }

        Ok(Self { positions })
    }

    fn read_row(&self, cells: &[Data]) -> RosterRow {
        let mut row = RosterRow::default();
        for (column, cell) in self
            .positions
            .iter()
            .zip(cells)
            .filter_map(|(column, cell)| column.map(|column| (column, cell)))
        {
            match (column.activity_platform(), cell) {
                (Some(platform), Data::DateTime(value)) => {
                    row.account_mut(platform).activity = value
                        .as_datetime()
                        .and_then(|value| normalize(value))
                        .map_or(ActivityCell::Empty, ActivityCell::Active);
                }
                _ => row.set_text(column, &cell_text(cell)),
            }
        }
        row
    }
}

/// Text of a cell as a person would read it in the sheet.
///
/// Integral floats drop the fraction, so a `404` typed as a number reads as
/// `"404"`.
pub(crate) fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => text.clone(),
        Data::Int(value) => value.to_string(),
        Data::Float(value) if value.fract() == 0.0 => format!("{value:.0}"),
        Data::Float(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(value) => value
            .as_datetime()
            .map(|value| value.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

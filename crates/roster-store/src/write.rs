//! Writing the roster back to a workbook.
//!
//! A save is read-modify-write: the current file is read back, every other
//! sheet is copied with its values and formulas, and in the roster sheet only
//! the roster cells whose meaning changed are rewritten. Unchanged roster
//! cells keep their original typed value. The roster area gets the house
//! styling (dark frozen header, autofilter, per-category row fill), then the
//! new file is swapped into place through a temp file in the same directory.

use std::io::Write;
use std::path::Path;

use calamine::Data;
use roster_core::{Category, Column, Field, RosterRow, RosterTable};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Formula, Workbook, Worksheet, XlsxError};

use crate::error::StoreError;
use crate::read::{RosterSheet, cell_text};
use crate::snapshot::{self, SheetSnapshot};

const HEADER_FILL: u32 = 0x1E_29_3B;
const BORDER_COLOR: u32 = 0xB0_BE_C5;
const HEADER_HEIGHT: f64 = 24.0;
const ROW_HEIGHT: f64 = 18.0;
const ZOOM: u16 = 90;

const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
const DURATION_FORMAT: &str = "[h]:mm:ss";

/// Column widths, in canonical column order.
const COLUMN_WIDTHS: [f64; 15] = [
    15.0, 40.0, 22.0, 15.0, 28.0, 15.0, 48.0, 15.0, 35.0, 25.0, 15.0, 28.0, 20.0, 20.0, 20.0,
];

const fn category_fill(category: Option<Category>) -> u32 {
    match category {
        Some(Category::Age) => 0xE3_F0_FB,
        Some(Category::Autonomias) => 0xE8_F5_E9,
        Some(Category::Gobierno) => 0xFC_E4_EC,
        Some(Category::Congreso) => 0xFF_F8_E1,
        Some(Category::Senado) => 0xF3_E5_F5,
        Some(Category::Partidos) => 0xFF_E0_B2,
        Some(Category::Universidades) => 0xE0_F7_FA,
        None => 0xFF_FF_FF,
    }
}

/// Write `table` into worksheet `sheet` of the workbook at `path`, keeping
/// everything else the workbook holds, and atomically replace the file.
///
/// # Errors
///
/// Returns [`StoreError`] if the current file cannot be read, its roster
/// sheet has an invalid header, rendering fails, or the file cannot be
/// replaced.
pub fn save(path: &Path, sheet: &str, table: &RosterTable) -> Result<(), StoreError> {
    let previous = snapshot::read(path)?;
    let buffer = render(sheet, table, &previous)?;

    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(&buffer)?;
    staged.as_file().sync_all()?;
    staged.persist(path)?;

    tracing::debug!(
        path = %path.display(),
        rows = table.len(),
        sheets = previous.len().max(1),
        "saved roster"
    );
    Ok(())
}

/// Render the workbook into memory, on top of the sheets it held before.
pub(crate) fn render(
    sheet: &str,
    table: &RosterTable,
    previous: &[SheetSnapshot],
) -> Result<Vec<u8>, StoreError> {
    let mut workbook = Workbook::new();
    let mut roster_written = false;

    for snapshot in previous {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&snapshot.name)?;
        if snapshot.name == sheet {
            let placement = Placement::from_snapshot(snapshot)?;
            write_roster(worksheet, table, &placement, Some(snapshot))?;
            roster_written = true;
        } else {
            copy_cells(worksheet, snapshot, |_| false)?;
        }
    }

    if !roster_written {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet)?;
        write_roster(worksheet, table, &Placement::fresh(), None)?;
    }

    Ok(workbook.save_to_buffer()?)
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// Where the roster sits on its sheet.
#[derive(Debug)]
struct Placement {
    header_row: u32,
    columns: Vec<(Column, u16)>,
    /// Rows as they were on the sheet before this save.
    previous_rows: Vec<RosterRow>,
}

impl Placement {
    /// Canonical layout starting at `A1`.
    fn fresh() -> Self {
        Self {
            header_row: 0,
            columns: Column::ALL.into_iter().zip(0u16..).collect(),
            previous_rows: Vec::new(),
        }
    }

    /// The layout already on the sheet. An empty sheet gets the canonical one.
    fn from_snapshot(snapshot: &SheetSnapshot) -> Result<Self, StoreError> {
        match RosterSheet::parse(&snapshot.cells) {
            Ok(sheet) => Ok(Self {
                header_row: sheet.header_row,
                columns: sheet
                    .columns
                    .into_iter()
                    .map(|(column, index)| (column, column_index(index)))
                    .collect(),
                previous_rows: sheet.rows,
            }),
            Err(StoreError::EmptySheet) => Ok(Self::fresh()),
            Err(error) => Err(error),
        }
    }

    fn row_of(&self, index: usize) -> u32 {
        self.header_row
            .saturating_add(1)
            .saturating_add(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Roster cells are the header and data cells of the roster columns.
    fn owns(&self, (row, col): (u32, u32)) -> bool {
        row >= self.header_row && self.columns.iter().any(|(_, index)| u32::from(*index) == col)
    }

    fn first_column(&self) -> u16 {
        self.columns.iter().map(|(_, index)| *index).min().unwrap_or(0)
    }

    fn last_column(&self) -> u16 {
        self.columns.iter().map(|(_, index)| *index).max().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Roster sheet
// ---------------------------------------------------------------------------

fn write_roster(
    worksheet: &mut Worksheet,
    table: &RosterTable,
    placement: &Placement,
    previous: Option<&SheetSnapshot>,
) -> Result<(), XlsxError> {
    if let Some(previous) = previous {
        copy_cells(worksheet, previous, |position| placement.owns(position))?;
    }

    write_header(worksheet, placement, previous)?;
    for (index, row) in table.iter().enumerate() {
        let before = placement.previous_rows.get(index);
        write_row(worksheet, placement.row_of(index), row, before, placement, previous)?;
    }

    let last_row = placement.row_of(table.len()).saturating_sub(1);
    worksheet.set_freeze_panes(placement.header_row.saturating_add(1), 0)?;
    worksheet.autofilter(
        placement.header_row,
        placement.first_column(),
        last_row,
        placement.last_column(),
    )?;
    worksheet.set_zoom(ZOOM);
    Ok(())
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_name("Calibri")
        .set_font_size(11)
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(BORDER_COLOR))
}

fn row_format(category: Option<Category>) -> Format {
    Format::new()
        .set_font_name("Calibri")
        .set_font_size(10)
        .set_background_color(Color::RGB(category_fill(category)))
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(BORDER_COLOR))
}

/// Header labels keep their spelling from the sheet; new sheets get the
/// canonical label.
fn write_header(
    worksheet: &mut Worksheet,
    placement: &Placement,
    previous: Option<&SheetSnapshot>,
) -> Result<(), XlsxError> {
    let format = header_format();
    let row = placement.header_row;

    worksheet.set_row_height(row, HEADER_HEIGHT)?;
    for (column, col) in &placement.columns {
        let label = previous
            .and_then(|sheet| sheet.value_at((row, u32::from(*col))))
            .map(cell_text)
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| column.header().to_string());
        worksheet.write_string_with_format(row, *col, label, &format)?;
        worksheet.set_column_width(*col, width(*column))?;
    }
    Ok(())
}

/// Write one table row. A cell whose value reads the same as before keeps its
/// original content, which covers numbers, formulas and activity text the
/// loader did not recognize.
fn write_row(
    worksheet: &mut Worksheet,
    row_index: u32,
    row: &RosterRow,
    before: Option<&RosterRow>,
    placement: &Placement,
    previous: Option<&SheetSnapshot>,
) -> Result<(), XlsxError> {
    let category = row.category.as_deref().and_then(Category::from_label);
    let format = row_format(category);

    worksheet.set_row_height(row_index, ROW_HEIGHT)?;
    for (column, col) in &placement.columns {
        let field = row.field(*column);
        let position = (row_index, u32::from(*col));
        let unchanged = before.is_some_and(|before| before.field(*column) == field);

        if unchanged {
            if let Some(previous) = previous {
                let formula = previous.formula_at(position);
                if let Some(data) = previous.value_at(position) {
                    write_data(worksheet, position, data, formula, &format)?;
                    continue;
                }
                if let Some(formula) = formula {
                    write_formula(worksheet, position, formula, "", &format)?;
                    continue;
                }
            }
        }

        let text = match field {
            Field::Text(text) => text.map(str::to_string),
            Field::Activity(cell) => Some(cell.to_string()).filter(|text| !text.is_empty()),
        };
        match text {
            Some(text) => worksheet.write_string_with_format(row_index, *col, text, &format)?,
            None => worksheet.write_blank(row_index, *col, &format)?,
        };
    }
    Ok(())
}

fn width(column: Column) -> f64 {
    Column::ALL
        .iter()
        .position(|candidate| *candidate == column)
        .map_or(15.0, |index| COLUMN_WIDTHS[index])
}

// ---------------------------------------------------------------------------
// Copying cells
// ---------------------------------------------------------------------------

/// Copy every value and formula of `snapshot` except the positions `skip`
/// claims.
fn copy_cells(
    worksheet: &mut Worksheet,
    snapshot: &SheetSnapshot,
    skip: impl Fn((u32, u32)) -> bool,
) -> Result<(), XlsxError> {
    let plain = Format::new();
    for (position, data) in snapshot.values() {
        if !skip(position) {
            write_data(worksheet, position, data, snapshot.formula_at(position), &plain)?;
        }
    }
    for (position, formula) in snapshot.formulas() {
        if !skip(position) && snapshot.value_at(position).is_none() {
            write_formula(worksheet, position, formula, "", &plain)?;
        }
    }
    Ok(())
}

/// Write a calamine value with its own cell type.
#[allow(clippy::cast_precision_loss)]
fn write_data(
    worksheet: &mut Worksheet,
    position: (u32, u32),
    data: &Data,
    formula: Option<&str>,
    format: &Format,
) -> Result<(), XlsxError> {
    if let Some(formula) = formula {
        return write_formula(worksheet, position, formula, &cell_text(data), format);
    }

    let (row, col) = (position.0, column_index(position.1));
    match data {
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => {
            worksheet.write_string_with_format(row, col, text, format)?;
        }
        Data::Float(value) => {
            worksheet.write_number_with_format(row, col, *value, format)?;
        }
        Data::Int(value) => {
            worksheet.write_number_with_format(row, col, *value as f64, format)?;
        }
        Data::Bool(value) => {
            worksheet.write_boolean_with_format(row, col, *value, format)?;
        }
        Data::DateTime(value) => {
            let serial = value.as_f64();
            let layout = if value.is_duration() {
                DURATION_FORMAT
            } else if serial.fract() == 0.0 {
                DATE_FORMAT
            } else {
                DATETIME_FORMAT
            };
            let format = format.clone().set_num_format(layout);
            worksheet.write_number_with_format(row, col, serial, &format)?;
        }
        Data::Error(error) => {
            worksheet.write_string_with_format(row, col, error.to_string(), format)?;
        }
        Data::Empty => {
            worksheet.write_blank(row, col, format)?;
        }
    }
    Ok(())
}

fn write_formula(
    worksheet: &mut Worksheet,
    position: (u32, u32),
    formula: &str,
    cached: &str,
    format: &Format,
) -> Result<(), XlsxError> {
    let formula = Formula::new(formula).set_result(cached);
    worksheet.write_formula_with_format(position.0, column_index(position.1), formula, format)?;
    Ok(())
}

fn column_index(index: u32) -> u16 {
    u16::try_from(index).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn widths_cover_every_column() {
        assert_eq!(COLUMN_WIDTHS.len(), Column::ALL.len());
        assert_eq!(width(Column::Category), 15.0);
        assert_eq!(width(Column::MastodonHandle), 48.0);
    }

    #[test]
    fn known_categories_get_distinct_fills() {
        let fills: Vec<u32> = Category::ALL
            .into_iter()
            .map(|category| category_fill(Some(category)))
            .collect();
        for (i, fill) in fills.iter().enumerate() {
            assert!(!fills[i + 1..].contains(fill));
            assert_ne!(*fill, category_fill(None));
        }
    }

    #[test]
    fn renders_a_non_empty_workbook() {
        let mut row = RosterRow::default();
        row.set_text(Column::Category, "Senado");
        row.set_text(Column::Name, "Luis");
        let table = RosterTable::new(vec![row]);
        let bytes = render("Sheet1", &table, &[]).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn fresh_placement_is_canonical() {
        let placement = Placement::fresh();
        assert_eq!(placement.row_of(0), 1);
        assert_eq!(placement.first_column(), 0);
        assert_eq!(placement.last_column(), 14);
        assert!(placement.owns((0, 14)));
        assert!(!placement.owns((3, 15)));
    }
}

// xlsx_reader.rs
use crate::error::{Error, Result};
use crate::xlsx_table::{Cell, Row, Table};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::Path;
use tracing::debug;

pub const XLSX_EXTENSION: &str = "xlsx";

pub fn has_xlsx_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case(XLSX_EXTENSION))
}

/// Checks that `path` is an existing `.xlsx` file before anything opens it.
pub fn ensure_xlsx_input(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }
    if !has_xlsx_extension(path) {
        return Err(Error::UnsupportedExtension {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Reads every row of the first sheet.
pub fn read_table(path: &Path) -> Result<Table> {
    let range = first_sheet(path)?;
    let rows = anchored_rows(&range);
    debug!(path = %path.display(), rows = rows.len(), "read sheet");
    Ok(Table::new(rows))
}

/// Reads only the header row of the first sheet; empty if the sheet is.
pub fn read_header(path: &Path) -> Result<Row> {
    let range = first_sheet(path)?;
    Ok(anchored_rows(&range).into_iter().next().unwrap_or_default())
}

// The workbook is dropped on return, so its file handle never outlives the call.
fn first_sheet(path: &Path) -> Result<Range<Data>> {
    ensure_xlsx_input(path)?;
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| Error::workbook(path, e))?;
    match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => Ok(range),
        Some(Err(e)) => Err(Error::workbook(path, e)),
        None => Err(Error::workbook(path, "workbook has no sheets")),
    }
}

/// Converts the used range into rows anchored at A1.
///
/// The reader trims leading empty rows and columns off the used range; they
/// are put back as empty cells so column letters and row 1 mean the same
/// thing they do in a spreadsheet application.
fn anchored_rows(range: &Range<Data>) -> Vec<Row> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };
    let start_row = start_row as usize;
    let start_col = start_col as usize;
    let width = start_col + range.width();

    let mut rows: Vec<Row> = Vec::with_capacity(start_row + range.height());
    rows.extend((0..start_row).map(|_| vec![Cell::Empty; width]));
    for source in range.rows() {
        let mut row = Vec::with_capacity(width);
        row.extend((0..start_col).map(|_| Cell::Empty));
        row.extend(source.iter().map(to_cell));
        rows.push(row);
    }
    rows
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Error(e.to_string()),
    }
}

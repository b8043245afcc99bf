// xlsx_writer.rs
use crate::error::{Error, Result};
use crate::xlsx_table::Cell;
use rust_xlsxwriter::{Format, Formula, Workbook, Worksheet};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::{Builder, NamedTempFile};
use tracing::debug;

/// Worksheet limits of the xlsx format.
pub const MAX_ROWS: u32 = 1_048_576;
pub const MAX_COLUMNS: usize = 16_384;

const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Error values a formula can name directly, so they stay errors in the output.
const ERROR_LITERALS: [&str; 7] = [
    "#DIV/0!", "#N/A", "#NAME?", "#NULL!", "#NUM!", "#REF!", "#VALUE!",
];

/// Collects rows for a single output sheet.
pub struct SheetWriter {
    worksheet: Worksheet,
    datetime_format: Format,
    next_row: u32,
}

impl Default for SheetWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetWriter {
    pub fn new() -> Self {
        Self {
            worksheet: Worksheet::new(),
            datetime_format: Format::new().set_num_format(DATETIME_FORMAT),
            next_row: 0,
        }
    }

    pub fn rows_written(&self) -> usize {
        self.next_row as usize
    }

    pub fn append(&mut self, row: &[Cell]) -> Result<()> {
        if self.next_row >= MAX_ROWS {
            return Err(Error::Write(format!(
                "output would exceed {} rows",
                MAX_ROWS
            )));
        }
        if row.len() > MAX_COLUMNS {
            return Err(Error::Write(format!(
                "row {} has {} cells, the limit is {}",
                self.next_row + 1,
                row.len(),
                MAX_COLUMNS
            )));
        }

        let r = self.next_row;
        for (index, cell) in row.iter().enumerate() {
            let c = index as u16;
            match cell {
                Cell::Empty => {}
                Cell::Error(e) if ERROR_LITERALS.contains(&e.as_str()) => {
                    let formula = Formula::new(format!("={}", e)).set_result(e.as_str());
                    self.worksheet.write_formula(r, c, formula)?;
                }
                Cell::Text(s) | Cell::Error(s) => {
                    self.worksheet.write_string(r, c, s.as_str())?;
                }
                Cell::Int(i) => {
                    self.worksheet.write_number(r, c, *i as f64)?;
                }
                Cell::Float(f) => {
                    self.worksheet.write_number(r, c, *f)?;
                }
                Cell::Bool(b) => {
                    self.worksheet.write_boolean(r, c, *b)?;
                }
                Cell::DateTime(serial) => {
                    self.worksheet
                        .write_number_with_format(r, c, *serial, &self.datetime_format)?;
                }
            }
        }
        self.next_row += 1;
        Ok(())
    }

    /// Writes the workbook next to `destination`, then renames it into place.
    ///
    /// Either the complete file ends up at `destination` or nothing does; an
    /// existing file there is replaced and keeps its permissions; a new file
    /// gets the same mode `fs::write` would give it. Returns the size of the
    /// written file.
    pub fn save(self, destination: &Path) -> Result<u64> {
        let dir = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut workbook = Workbook::new();
        workbook.push_worksheet(self.worksheet);

        let mut tmp = new_temp_file(dir).map_err(|e| Error::io(e, dir))?;
        workbook.save_to_writer(tmp.as_file_mut())?;
        if let Ok(existing) = fs::metadata(destination) {
            tmp.as_file()
                .set_permissions(existing.permissions())
                .map_err(|e| Error::io(e, tmp.path()))?;
        }
        tmp.as_file_mut()
            .flush()
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| Error::io(e, tmp.path()))?;
        tmp.persist(destination)
            .map_err(|e| Error::io(e.error, destination))?;

        let size = fs::metadata(destination)
            .map_err(|e| Error::io(e, destination))?
            .len();
        debug!(path = %destination.display(), rows = self.next_row, size, "saved workbook");
        Ok(size)
    }
}

/// Temp file in `dir`, created with the umask-filtered default mode.
#[cfg(unix)]
fn new_temp_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    Builder::new()
        .prefix(".merge_wiper")
        .suffix(".xlsx.tmp")
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn new_temp_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    Builder::new()
        .prefix(".merge_wiper")
        .suffix(".xlsx.tmp")
        .tempfile_in(dir)
}

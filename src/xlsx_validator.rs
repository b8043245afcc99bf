// xlsx_validator.rs
use crate::error::{Error, Result};
use crate::xlsx_reader::read_header;
use crate::xlsx_table::Row;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Confirms every file shares the first file's header row, cell for cell.
///
/// Stops at the first mismatch and names that file; later files are never
/// opened. Returns the shared header on success.
pub fn check_same_headers(file_paths: &[PathBuf]) -> Result<Row> {
    let (first, rest) = file_paths.split_first().ok_or(Error::NoInputFiles)?;
    let header = read_header(first)?;
    debug!(path = %first.display(), columns = header.len(), "reference header");

    for path in rest {
        let current = read_header(path)?;
        if current != header {
            warn!(path = %path.display(), "header row differs");
            return Err(Error::HeaderMismatch { path: path.clone() });
        }
    }
    Ok(header)
}

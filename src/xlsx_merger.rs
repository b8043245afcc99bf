// xlsx_merger.rs
use crate::error::{Error, Result};
use crate::xlsx_reader::{has_xlsx_extension, read_table};
use crate::xlsx_writer::SheetWriter;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Data rows one input contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRows {
    pub path: PathBuf,
    pub rows: usize,
}

#[derive(Debug, Clone)]
pub struct MergeSummary {
    /// One entry per input, in input order.
    pub file_rows: Vec<FileRows>,
    pub rows_in: usize,
    pub rows_out: usize,
    pub output_path: PathBuf,
    pub output_size: u64,
    pub elapsed: Duration,
}

impl MergeSummary {
    pub fn files_processed(&self) -> usize {
        self.file_rows.len()
    }
}

/// Concatenates the data rows of every file under the first file's header.
///
/// Headers are not compared here; run `check_same_headers` first. Files are
/// read one at a time, in the order given, and each is released before the
/// next is opened. The output is saved atomically at `destination`.
pub fn merge(file_paths: &[PathBuf], destination: &Path) -> Result<MergeSummary> {
    let started = Instant::now();
    if file_paths.is_empty() {
        return Err(Error::NoInputFiles);
    }
    if !has_xlsx_extension(destination) {
        return Err(Error::UnsupportedExtension {
            path: destination.to_path_buf(),
        });
    }

    let mut writer = SheetWriter::new();
    let mut file_rows = Vec::with_capacity(file_paths.len());

    for (index, path) in file_paths.iter().enumerate() {
        debug!(path = %path.display(), "merging file");
        let table = read_table(path)?;
        if index == 0 {
            writer.append(table.header())?;
        }
        for row in table.data_rows() {
            writer.append(row)?;
        }
        file_rows.push(FileRows {
            path: path.clone(),
            rows: table.data_len(),
        });
    }

    let rows_in: usize = file_rows.iter().map(|f| f.rows).sum();
    let rows_out = writer.rows_written().saturating_sub(1);
    let output_size = writer.save(destination)?;

    info!(
        files = file_rows.len(),
        rows_in,
        rows_out,
        output = %destination.display(),
        "merge complete"
    );

    Ok(MergeSummary {
        file_rows,
        rows_in,
        rows_out,
        output_path: destination.to_path_buf(),
        output_size,
        elapsed: started.elapsed(),
    })
}

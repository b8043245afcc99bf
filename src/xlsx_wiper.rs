// xlsx_wiper.rs
use crate::error::{Error, Result};
use crate::xlsx_reader::{has_xlsx_extension, read_table};
use crate::xlsx_table::{CellKey, Table};
use crate::xlsx_writer::{SheetWriter, MAX_COLUMNS};
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use tracing::info;

/// Zero-based index of the column whose values must be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyColumn(usize);

impl KeyColumn {
    pub fn new(index: usize) -> Self {
        KeyColumn(index)
    }

    pub fn index(self) -> usize {
        self.0
    }

    /// Reads a column letter (`A`, `z`, `AB`) or a 1-based column number and
    /// checks it against the header width.
    pub fn parse(input: &str, width: usize) -> Result<Self> {
        let trimmed = input.trim();
        let invalid = || Error::InvalidKeyColumn {
            input: trimmed.to_string(),
        };
        let caps = key_column_pattern().captures(trimmed).ok_or_else(invalid)?;

        let index = if let Some(letters) = caps.get(1) {
            column_index(letters.as_str()).ok_or_else(invalid)?
        } else {
            let number: usize = caps[2].parse().map_err(|_| invalid())?;
            number.checked_sub(1).ok_or_else(invalid)?
        };

        if index >= width {
            return Err(Error::KeyColumnOutOfRange { index, width });
        }
        Ok(KeyColumn(index))
    }
}

impl fmt::Display for KeyColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", column_letter(self.0))
    }
}

fn key_column_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:([A-Za-z]{1,3})|([0-9]{1,5}))$").expect("key column pattern is valid")
    })
}

/// Spreadsheet letters for a zero-based column: 0 is `A`, 26 is `AA`.
pub fn column_letter(index: usize) -> String {
    let mut n = index.saturating_add(1);
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Zero-based column for spreadsheet letters, `None` past the sheet's last column.
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut n: usize = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        n = n.checked_mul(26)?.checked_add(digit)?;
    }
    let index = n - 1;
    (index < MAX_COLUMNS).then_some(index)
}

/// Keeps the header and the first data row for each distinct key value.
pub fn dedupe_rows(table: &Table, key: KeyColumn) -> Table {
    let mut seen: HashSet<CellKey> = HashSet::new();
    let mut kept = Vec::with_capacity(table.rows().len());
    if let Some(header) = table.rows().first() {
        kept.push(header.clone());
    }
    for row in table.data_rows() {
        if seen.insert(CellKey::of(row, key.index())) {
            kept.push(row.clone());
        }
    }
    Table::new(kept)
}

#[derive(Debug, Clone)]
pub struct WipeSummary {
    pub input_path: PathBuf,
    pub key_column: KeyColumn,
    pub rows_in: usize,
    pub rows_out: usize,
    pub output_path: PathBuf,
    pub output_size: u64,
    pub elapsed: Duration,
}

impl WipeSummary {
    pub fn rows_removed(&self) -> usize {
        self.rows_in.saturating_sub(self.rows_out)
    }
}

/// Removes rows whose key-column value already appeared earlier in the file.
pub fn wipe(path: &Path, key: KeyColumn, destination: &Path) -> Result<WipeSummary> {
    let started = Instant::now();
    if !has_xlsx_extension(destination) {
        return Err(Error::UnsupportedExtension {
            path: destination.to_path_buf(),
        });
    }

    let table = read_table(path)?;
    let width = table.header().len();
    if key.index() >= width {
        return Err(Error::KeyColumnOutOfRange {
            index: key.index(),
            width,
        });
    }

    let kept = dedupe_rows(&table, key);
    let mut writer = SheetWriter::new();
    for row in kept.rows() {
        writer.append(row)?;
    }
    let output_size = writer.save(destination)?;

    let summary = WipeSummary {
        input_path: path.to_path_buf(),
        key_column: key,
        rows_in: table.data_len(),
        rows_out: kept.data_len(),
        output_path: destination.to_path_buf(),
        output_size,
        elapsed: started.elapsed(),
    };
    info!(
        input = %path.display(),
        key = %key,
        rows_in = summary.rows_in,
        rows_out = summary.rows_out,
        removed = summary.rows_removed(),
        "wipe complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xlsx_table::Cell;
    use tempfile::tempdir;

    fn id_val(id: i64, val: &str) -> Vec<Cell> {
        vec![Cell::Int(id), Cell::text(val)]
    }

    fn id_val_table() -> Table {
        Table::new(vec![
            vec![Cell::text("ID"), Cell::text("Val")],
            id_val(1, "x"),
            id_val(2, "y"),
            id_val(1, "z"),
        ])
    }

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
        assert_eq!(column_index("A"), Some(0));
        assert_eq!(column_index("z"), Some(25));
        assert_eq!(column_index("AA"), Some(26));
        assert_eq!(column_index("XFD"), Some(MAX_COLUMNS - 1));
        assert_eq!(column_index("XFE"), None);
        assert_eq!(column_index(""), None);
    }

    #[test]
    fn test_parse_key_column() {
        assert_eq!(KeyColumn::parse("a", 2).unwrap(), KeyColumn::new(0));
        assert_eq!(KeyColumn::parse(" B ", 2).unwrap(), KeyColumn::new(1));
        assert_eq!(KeyColumn::parse("3", 5).unwrap(), KeyColumn::new(2));
        assert_eq!(KeyColumn::parse("AA", 30).unwrap(), KeyColumn::new(26));
        assert!(matches!(
            KeyColumn::parse("C", 2),
            Err(Error::KeyColumnOutOfRange { index: 2, width: 2 })
        ));
        assert!(matches!(
            KeyColumn::parse("0", 2),
            Err(Error::InvalidKeyColumn { .. })
        ));
        for bad in ["", "A1", "?", "ABCD"] {
            assert!(matches!(
                KeyColumn::parse(bad, 10),
                Err(Error::InvalidKeyColumn { .. })
            ));
        }
        assert_eq!(KeyColumn::new(27).to_string(), "AB");
        assert!(!KeyColumn::new(usize::MAX).to_string().is_empty());
    }

    #[test]
    fn test_rows_removed_never_underflows() {
        let summary = WipeSummary {
            input_path: PathBuf::from("in.xlsx"),
            key_column: KeyColumn::new(0),
            rows_in: 1,
            rows_out: 3,
            output_path: PathBuf::from("out.xlsx"),
            output_size: 0,
            elapsed: Duration::ZERO,
        };
        assert_eq!(summary.rows_removed(), 0);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let kept = dedupe_rows(&id_val_table(), KeyColumn::new(0));
        assert_eq!(kept.data_rows(), &[id_val(1, "x"), id_val(2, "y")]);
    }

    #[test]
    fn test_header_always_kept() {
        let table = Table::new(vec![
            vec![Cell::Int(1), Cell::text("Val")],
            id_val(1, "x"),
        ]);
        let kept = dedupe_rows(&table, KeyColumn::new(0));
        assert_eq!(kept, table);
    }

    #[test]
    fn test_empty_and_absent_keys() {
        let table = Table::new(vec![
            vec![Cell::text("ID"), Cell::text("Val")],
            vec![Cell::Empty, Cell::text("first empty")],
            vec![Cell::Empty, Cell::text("second empty")],
            vec![],
            vec![],
            vec![Cell::text(""), Cell::text("empty string")],
        ]);
        let kept = dedupe_rows(&table, KeyColumn::new(0));
        assert_eq!(
            kept.data_rows(),
            &[
                vec![Cell::Empty, Cell::text("first empty")],
                vec![],
                vec![Cell::text(""), Cell::text("empty string")],
            ]
        );
    }

    #[test]
    fn test_typed_keys_are_distinct() {
        let table = Table::new(vec![
            vec![Cell::text("K")],
            vec![Cell::Int(1)],
            vec![Cell::text("1")],
            vec![Cell::Bool(true)],
            vec![Cell::Float(1.0)],
        ]);
        let kept = dedupe_rows(&table, KeyColumn::new(0));
        assert_eq!(kept.data_len(), 3);
    }

    #[test]
    fn test_no_repeats_unchanged_and_idempotent() {
        let table = Table::new(vec![
            vec![Cell::text("ID")],
            vec![Cell::Int(1)],
            vec![Cell::Int(2)],
        ]);
        assert_eq!(dedupe_rows(&table, KeyColumn::new(0)), table);

        let once = dedupe_rows(&id_val_table(), KeyColumn::new(0));
        assert_eq!(dedupe_rows(&once, KeyColumn::new(0)), once);
    }

    #[test]
    fn test_wipe_file() {
        let tmp = tempdir().unwrap();
        let input = tmp.path().join("input.xlsx");
        let out = tmp.path().join("wipe_result.xlsx");
        let mut writer = SheetWriter::new();
        for row in id_val_table().rows() {
            writer.append(row).unwrap();
        }
        writer.save(&input).unwrap();

        let summary = wipe(&input, KeyColumn::new(0), &out).unwrap();
        assert_eq!(summary.rows_in, 3);
        assert_eq!(summary.rows_out, 2);
        assert_eq!(summary.rows_removed(), 1);

        let written = read_table(&out).unwrap();
        assert_eq!(written.header(), &[Cell::text("ID"), Cell::text("Val")]);
        assert_eq!(written.data_rows(), &[id_val(1, "x"), id_val(2, "y")]);
    }

    #[test]
    fn test_wipe_rejects_out_of_range_key() {
        let tmp = tempdir().unwrap();
        let input = tmp.path().join("input.xlsx");
        let out = tmp.path().join("out.xlsx");
        let mut writer = SheetWriter::new();
        writer.append(&[Cell::text("ID")]).unwrap();
        writer.save(&input).unwrap();

        assert!(matches!(
            wipe(&input, KeyColumn::new(3), &out),
            Err(Error::KeyColumnOutOfRange { index: 3, width: 1 })
        ));
        assert!(!out.exists());
    }
}

//! End-to-end merge and wipe runs over real xlsx files.

use std::path::{Path, PathBuf};

use merge_wiper::xlsx_reader::read_table;
use merge_wiper::xlsx_writer::SheetWriter;
use merge_wiper::{check_same_headers, merge, wipe, Cell, Error, KeyColumn, Row};
use tempfile::{tempdir, TempDir};

fn write_sheet(dir: &TempDir, name: &str, rows: &[Row]) -> PathBuf {
    let path = dir.path().join(name);
    let mut writer = SheetWriter::new();
    for row in rows {
        writer.append(row).unwrap_or_else(|e| panic!("append failed: {e}"));
    }
    writer
        .save(&path)
        .unwrap_or_else(|e| panic!("save failed: {e}"));
    path
}

fn row(cells: &[Cell]) -> Row {
    cells.to_vec()
}

fn name_age_header() -> Row {
    row(&[Cell::text("Name"), Cell::text("Age")])
}

/// Validate-then-merge, the way the menu runs it.
fn validated_merge(files: &[PathBuf], destination: &Path) -> merge_wiper::Result<usize> {
    check_same_headers(files)?;
    merge(files, destination).map(|summary| summary.rows_out)
}

#[test]
fn test_merge_two_files() {
    let dir = tempdir().unwrap();
    let a = write_sheet(
        &dir,
        "a.xlsx",
        &[
            name_age_header(),
            row(&[Cell::text("Alice"), Cell::Int(30)]),
            row(&[Cell::text("Bob"), Cell::Int(25)]),
        ],
    );
    let b = write_sheet(
        &dir,
        "b.xlsx",
        &[name_age_header(), row(&[Cell::text("Carol"), Cell::Int(40)])],
    );
    let out = dir.path().join("merge_result.xlsx");

    check_same_headers(&[a.clone(), b.clone()]).unwrap();
    let summary = merge(&[a, b], &out).unwrap();
    assert_eq!(summary.files_processed(), 2);
    assert_eq!(summary.rows_in, 3);
    assert_eq!(summary.rows_out, 3);

    let merged = read_table(&out).unwrap();
    assert_eq!(merged.header(), name_age_header().as_slice());
    let names: Vec<String> = merged
        .data_rows()
        .iter()
        .map(|r| r[0].to_string())
        .collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
}

#[test]
fn test_mismatched_headers_write_nothing() {
    let dir = tempdir().unwrap();
    let a = write_sheet(
        &dir,
        "a.xlsx",
        &[name_age_header(), row(&[Cell::text("Alice"), Cell::Int(30)])],
    );
    let c = write_sheet(
        &dir,
        "c.xlsx",
        &[row(&[Cell::text("Name"), Cell::text("Years")])],
    );
    let out = dir.path().join("merge_result.xlsx");

    match validated_merge(&[a, c.clone()], &out) {
        Err(Error::HeaderMismatch { path }) => assert_eq!(path, c),
        other => panic!("expected header mismatch, got {other:?}"),
    }
    assert!(!out.exists());
}

#[test]
fn test_single_file_merge_is_unchanged() {
    let dir = tempdir().unwrap();
    let rows = vec![
        name_age_header(),
        row(&[Cell::text("Alice"), Cell::Int(30)]),
        row(&[Cell::text("Bob"), Cell::Bool(false)]),
    ];
    let a = write_sheet(&dir, "a.xlsx", &rows);
    let out = dir.path().join("out.xlsx");

    assert_eq!(validated_merge(&[a.clone()], &out).unwrap(), 2);
    assert_eq!(read_table(&out).unwrap(), read_table(&a).unwrap());
}

#[test]
fn test_wipe_id_val() {
    let dir = tempdir().unwrap();
    let input = write_sheet(
        &dir,
        "ids.xlsx",
        &[
            row(&[Cell::text("ID"), Cell::text("Val")]),
            row(&[Cell::Int(1), Cell::text("x")]),
            row(&[Cell::Int(2), Cell::text("y")]),
            row(&[Cell::Int(1), Cell::text("z")]),
        ],
    );
    let out = dir.path().join("wipe_result.xlsx");

    let key = KeyColumn::parse("A", 2).unwrap();
    let summary = wipe(&input, key, &out).unwrap();
    assert_eq!(summary.rows_in, 3);
    assert_eq!(summary.rows_out, 2);
    assert_eq!(summary.rows_removed(), 1);

    let kept: Vec<String> = read_table(&out)
        .unwrap()
        .data_rows()
        .iter()
        .map(|r| r[1].to_string())
        .collect();
    assert_eq!(kept, vec!["x", "y"]);
}

#[test]
fn test_wipe_is_idempotent_on_disk() {
    let dir = tempdir().unwrap();
    let input = write_sheet(
        &dir,
        "ids.xlsx",
        &[
            row(&[Cell::text("ID"), Cell::text("Val")]),
            row(&[Cell::text("a"), Cell::Int(1)]),
            row(&[Cell::text("a"), Cell::Int(2)]),
            row(&[Cell::text("b"), Cell::Int(3)]),
        ],
    );
    let once = dir.path().join("once.xlsx");
    let twice = dir.path().join("twice.xlsx");

    wipe(&input, KeyColumn::new(0), &once).unwrap();
    let second = wipe(&once, KeyColumn::new(0), &twice).unwrap();
    assert_eq!(second.rows_removed(), 0);
    assert_eq!(read_table(&twice).unwrap(), read_table(&once).unwrap());
}

#[test]
fn test_wipe_keeps_first_empty_key() {
    let dir = tempdir().unwrap();
    let input = write_sheet(
        &dir,
        "sparse.xlsx",
        &[
            row(&[Cell::text("ID"), Cell::text("Val")]),
            row(&[Cell::Empty, Cell::text("first")]),
            row(&[Cell::text("k"), Cell::text("second")]),
            row(&[Cell::Empty, Cell::text("third")]),
        ],
    );
    let out = dir.path().join("out.xlsx");

    let summary = wipe(&input, KeyColumn::new(0), &out).unwrap();
    assert_eq!(summary.rows_out, 2);
    let kept: Vec<String> = read_table(&out)
        .unwrap()
        .data_rows()
        .iter()
        .map(|r| r[1].to_string())
        .collect();
    assert_eq!(kept, vec!["first", "second"]);
}

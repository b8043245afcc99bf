// xlsx_table.rs
//! In-memory rows and cells read from a worksheet.

use std::fmt;

/// A single worksheet cell value.
///
/// Numbers compare by value, so `Int(1)` equals `Float(1.0)`. Every other
/// variant is only ever equal to itself: the text `"1"` is not the number `1`
/// and `Bool(true)` is not `Int(1)`.
#[derive(Debug, Clone, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Excel serial date-time (days since 1899-12-30).
    DateTime(f64),
    /// Formula error such as `#DIV/0!`.
    Error(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Hashable projection used to track seen values during a wipe.
    pub fn key(&self) -> CellKey {
        match self {
            Cell::Empty => CellKey::Empty,
            Cell::Text(s) => CellKey::Text(s.clone()),
            Cell::Int(_) | Cell::Float(_) => {
                CellKey::Number(normalized_bits(self.as_number().unwrap_or_default()))
            }
            Cell::Bool(b) => CellKey::Bool(*b),
            Cell::DateTime(f) => CellKey::DateTime(normalized_bits(*f)),
            Cell::Error(e) => CellKey::Error(e.clone()),
        }
    }
}

// -0.0 and 0.0 compare equal as numbers, so they must hash the same.
fn normalized_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Cell::Empty, Cell::Empty) => true,
            (Cell::Text(a), Cell::Text(b)) => a == b,
            (Cell::Bool(a), Cell::Bool(b)) => a == b,
            (Cell::DateTime(a), Cell::DateTime(b)) => a == b,
            (Cell::Error(a), Cell::Error(b)) => a == b,
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(x) => write!(f, "{}", x),
            Cell::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Cell::DateTime(x) => write!(f, "{}", x),
            Cell::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

/// Identity of a key-column value within one wipe pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellKey {
    Empty,
    /// The row ends before the key column.
    Absent,
    Text(String),
    Number(u64),
    Bool(bool),
    DateTime(u64),
    Error(String),
}

impl CellKey {
    /// Key of `row` at `column`, or `Absent` when the row is too short.
    pub fn of(row: &[Cell], column: usize) -> Self {
        row.get(column).map(Cell::key).unwrap_or(CellKey::Absent)
    }
}

pub type Row = Vec<Cell>;

/// Rows of one worksheet; row 0 is the header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// The header row, empty when the sheet has no rows.
    pub fn header(&self) -> &[Cell] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// All rows after the header.
    pub fn data_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn data_len(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl From<Vec<Row>> for Table {
    fn from(rows: Vec<Row>) -> Self {
        Table::new(rows)
    }
}

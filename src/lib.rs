//! Merge xlsx files that share a header row, and wipe duplicate rows from
//! one xlsx file by a key column.
//!
//! The pipeline modules (`xlsx_*`) never touch the console; the prompt and
//! report modules wrap them for the interactive binary.

pub mod config;
pub mod error;
pub mod file_selector;
pub mod logging;
pub mod report;
pub mod user_experience;
pub mod user_interaction;
pub mod xlsx_manager;
pub mod xlsx_merger;
pub mod xlsx_reader;
pub mod xlsx_table;
pub mod xlsx_validator;
pub mod xlsx_wiper;
pub mod xlsx_writer;

pub use error::{Error, ErrorKind, Result};
pub use xlsx_merger::{merge, FileRows, MergeSummary};
pub use xlsx_table::{Cell, CellKey, Row, Table};
pub use xlsx_validator::check_same_headers;
pub use xlsx_wiper::{dedupe_rows, wipe, KeyColumn, WipeSummary};

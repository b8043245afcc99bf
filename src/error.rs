//! Error types for merge_wiper.

use std::path::PathBuf;

/// Result type alias for merge_wiper operations.
pub type Result<T> = std::result::Result<T, Error>;

/// How a failure is reported back to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input from the operator or mismatched files.
    Validation,
    /// Missing, unreadable or unwritable paths.
    Io,
    /// Anything else: corrupt workbooks, writer failures.
    Unexpected,
}

/// Errors that can occur while merging or wiping workbooks.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A merge input's header row differs from the first file's header row.
    #[error("Header row of {path:?} differs from the first file")]
    HeaderMismatch {
        /// The first file whose header did not match.
        path: PathBuf,
    },

    /// The key column text could not be read as a column letter or number.
    #[error("'{input}' is not a column letter or number")]
    InvalidKeyColumn {
        /// The raw operator input.
        input: String,
    },

    /// The key column lies outside the header row.
    #[error("Column {index} is out of range for a header with {width} columns")]
    KeyColumnOutOfRange {
        /// Zero-based column index.
        index: usize,
        /// Number of header cells.
        width: usize,
    },

    /// A merge was requested with no input files.
    #[error("No input files were given")]
    NoInputFiles,

    /// Input file does not exist or is not a regular file.
    #[error("File not found: {path:?}")]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Input or output path does not carry the `.xlsx` extension.
    #[error("Only .xlsx files are supported: {path:?}")]
    UnsupportedExtension {
        /// The offending path.
        path: PathBuf,
    },

    /// I/O error during file operations.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        /// The path where the error occurred, if known.
        path: Option<PathBuf>,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The workbook could not be opened or its sheet could not be read.
    #[error("Could not read workbook {path:?}: {message}")]
    Workbook {
        /// The workbook path.
        path: PathBuf,
        /// Description from the reader.
        message: String,
    },

    /// The output workbook could not be produced.
    #[error("Could not write workbook: {0}")]
    Write(String),

    /// The configuration file is malformed.
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Create an I/O error with a path.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// Create a workbook read error.
    pub fn workbook(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Workbook {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Classify the error for reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::HeaderMismatch { .. }
            | Self::InvalidKeyColumn { .. }
            | Self::KeyColumnOutOfRange { .. }
            | Self::NoInputFiles => ErrorKind::Validation,
            Self::NotFound { .. } | Self::UnsupportedExtension { .. } | Self::Io { .. } => {
                ErrorKind::Io
            }
            Self::Workbook { .. } | Self::Write(_) | Self::Config(_) => ErrorKind::Unexpected,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io { path: None, source }
    }
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Write(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

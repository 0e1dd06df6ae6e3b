use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum UnirankError {
    #[error("invalid CSS selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    #[error("failed to open {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[error("WebDriver error: {0}")]
    WebDriver(String),

    #[error("no page is open; call open() first")]
    NoPageOpen,

    #[error("failed to write workbook {path}: {reason}")]
    Export { path: PathBuf, reason: String },

    #[error("failed to read workbook: {0}")]
    Workbook(String),

    #[error("failed to load config from {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a single table row was dropped during extraction.
///
/// Never propagated past the row it belongs to; the extractor logs it and
/// moves on to the next row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("row has no <td> cells")]
    NoCells,
}

/// Why a whole column kept its text values during coercion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoercionError {
    #[error("column '{column}' expected {expected} values, found {found}")]
    RaggedColumn {
        column: String,
        expected: usize,
        found: usize,
    },
}

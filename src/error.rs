//! Error types for leafdb
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using DbError
pub type Result<T> = std::result::Result<T, DbError>;

/// Unified error type for leafdb operations
#[derive(Debug, Error)]
pub enum DbError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt database file: {0}")]
    CorruptFile(String),

    // -------------------------------------------------------------------------
    // Pager Errors
    // -------------------------------------------------------------------------
    #[error("Page {page} out of bounds (max pages {max})")]
    PageOutOfBounds { page: u32, max: u32 },

    #[error("Tried to flush page {0}, which is not cached")]
    PageNotCached(u32),

    #[error("Short write on page {page}: wrote {written} of {expected} bytes")]
    ShortWrite {
        page: u32,
        written: usize,
        expected: usize,
    },

    // -------------------------------------------------------------------------
    // Node / Table Errors
    // -------------------------------------------------------------------------
    #[error("Leaf node full ({0} cells)")]
    NodeFull(u32),

    #[error("Table full")]
    TableFull,

    #[error("Duplicate key: {0}")]
    DuplicateKey(u32),

    #[error("Cursor is past the end of the table")]
    CursorOutOfRange,

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Command Errors
    // -------------------------------------------------------------------------
    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Unrecognized command: {0}")]
    UnrecognizedCommand(String),

    #[error("Unrecognized keyword: {0}")]
    UnrecognizedStatement(String),

    #[error("No database is open")]
    NoDatabaseOpen,
}

impl DbError {
    /// Whether a session can keep going after this error
    ///
    /// Full tables, duplicate keys and malformed input are reported to the
    /// user; everything else points at the file or the environment.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DbError::TableFull
                | DbError::NodeFull(_)
                | DbError::DuplicateKey(_)
                | DbError::Syntax(_)
                | DbError::UnrecognizedCommand(_)
                | DbError::UnrecognizedStatement(_)
                | DbError::NoDatabaseOpen
        )
    }
}

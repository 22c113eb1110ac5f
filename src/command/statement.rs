//! Command definitions
//!
//! Represents parsed lines of user input.

use std::path::PathBuf;

use crate::row::Row;

/// Meta commands, handled by the shell itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    /// Close the database and leave the shell
    Exit,

    /// Open (or create) a database file
    Open { path: PathBuf },

    /// Print the root leaf's keys
    Btree,

    /// Print the layout constants
    Constants,
}

/// Statements, executed by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Insert one row
    Insert(Row),

    /// Return every row in key order
    Select,
}

/// One parsed line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Blank line
    Empty,

    Meta(MetaCommand),

    Statement(Statement),
}

//! Command Module
//!
//! Turns a line of user input into a typed command for the shell.
//!
//! ## Input Grammar
//!
//! ### Meta Commands (start with `.`)
//! - `.exit`            - close the database and quit
//! - `.open <file>`     - close the current database and open another
//! - `.btree`           - dump the keys of the root leaf
//! - `.constants`       - print the layout constants
//!
//! ### Statements
//! - `insert <id> <username> <email>`
//! - `select`
//!
//! Tokens are separated by whitespace. Parsing never touches the engine.

mod parser;
mod statement;

pub use parser::parse_line;
pub use statement::{Input, MetaCommand, Statement};

//! Shell
//!
//! The interactive session on top of the engine: parses each line, runs it,
//! and renders the outcome to a writer.
//!
//! The shell never terminates the process. `.exit` comes back to the caller
//! as [`Flow::Quit`]; the caller then runs [`Shell::close`].

use std::io::Write;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::command::{parse_line, Input, MetaCommand, Statement};
use crate::config::Config;
use crate::engine::{Engine, ExecuteOutcome};
use crate::error::{DbError, Result};
use crate::row::Row;

/// Prompt printed before each line
pub const PROMPT: &str = "leafdb> ";

/// What the read loop should do after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An interactive session holding at most one open database
pub struct Shell {
    /// Template for `.open`; its path is replaced per open
    config: Config,
    engine: Option<Engine>,
}

impl Shell {
    /// A session with no database open
    pub fn new(config: Config) -> Self {
        Self {
            config,
            engine: None,
        }
    }

    /// A session that opens `config.db_path` right away
    pub fn open(config: Config) -> Result<Self> {
        let engine = Engine::open(config.clone())?;
        Ok(Self {
            config,
            engine: Some(engine),
        })
    }

    pub fn is_open(&self) -> bool {
        self.engine.is_some()
    }

    pub fn engine(&mut self) -> Option<&mut Engine> {
        self.engine.as_mut()
    }

    /// Handle one line of input, writing any output to `out`
    ///
    /// Engine and parse errors are rendered and the session continues; only a
    /// failure to write to `out` is returned.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let input = match parse_line(line) {
            Ok(input) => input,
            Err(e) => {
                render_error(out, &e)?;
                return Ok(Flow::Continue);
            }
        };

        match input {
            Input::Empty => Ok(Flow::Continue),
            Input::Meta(MetaCommand::Exit) => Ok(Flow::Quit),
            Input::Meta(meta) => {
                if let Err(e) = self.run_meta(meta, out) {
                    render_error(out, &e)?;
                }
                Ok(Flow::Continue)
            }
            Input::Statement(statement) => {
                if let Err(e) = self.run_statement(statement, out) {
                    render_error(out, &e)?;
                }
                Ok(Flow::Continue)
            }
        }
    }

    /// Close the open database, if any
    pub fn close(mut self) -> Result<()> {
        match self.engine.take() {
            Some(engine) => engine.close(),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn run_meta<W: Write>(&mut self, meta: MetaCommand, out: &mut W) -> Result<()> {
        match meta {
            MetaCommand::Exit => Ok(()),
            MetaCommand::Open { path } => self.open_database(path, out),
            MetaCommand::Constants => {
                let c = Engine::constants();
                writeln!(out, "Constants:")?;
                writeln!(out, "ROW_SIZE: {}", c.row_size)?;
                writeln!(out, "COMMON_NODE_HEADER_SIZE: {}", c.common_node_header_size)?;
                writeln!(out, "LEAF_NODE_HEADER_SIZE: {}", c.leaf_node_header_size)?;
                writeln!(out, "LEAF_NODE_CELL_SIZE: {}", c.leaf_node_cell_size)?;
                writeln!(out, "LEAF_NODE_SPACE_FOR_CELLS: {}", c.leaf_node_space_for_cells)?;
                writeln!(out, "LEAF_NODE_MAX_CELLS: {}", c.leaf_node_max_cells)?;
                Ok(())
            }
            MetaCommand::Btree => {
                let engine = self.engine.as_mut().ok_or(DbError::NoDatabaseOpen)?;
                let dump = engine.leaf_dump()?;
                writeln!(out, "Tree:")?;
                writeln!(out, "leaf (size {})", dump.cells.len())?;
                for (index, key) in dump.cells {
                    writeln!(out, "  - {} : {}", index, key)?;
                }
                Ok(())
            }
        }
    }

    fn open_database<W: Write>(&mut self, path: PathBuf, out: &mut W) -> Result<()> {
        if let Some(engine) = self.engine.take() {
            engine.close()?;
        }

        let mut config = self.config.clone();
        config.db_path = path;
        let engine = Engine::open(config)?;
        info!(path = %engine.db_path().display(), "database opened from shell");
        self.engine = Some(engine);

        writeln!(out, "Database opened successfully!")?;
        Ok(())
    }

    fn run_statement<W: Write>(&mut self, statement: Statement, out: &mut W) -> Result<()> {
        let engine = self.engine.as_mut().ok_or(DbError::NoDatabaseOpen)?;

        match engine.execute(statement)? {
            ExecuteOutcome::Inserted => {}
            ExecuteOutcome::Rows(rows) => {
                for row in &rows {
                    render_row(out, row)?;
                }
            }
        }
        writeln!(out, "Executed.")?;
        Ok(())
    }
}

fn render_row<W: Write>(out: &mut W, row: &Row) -> Result<()> {
    writeln!(out, "({}, {}, {})", row.id, row.username, row.email)?;
    Ok(())
}

fn render_error<W: Write>(out: &mut W, err: &DbError) -> Result<()> {
    if !err.is_recoverable() {
        warn!(error = %err, "command failed");
    }
    match err {
        DbError::DuplicateKey(_) => writeln!(out, "Error: Duplicate key.")?,
        DbError::TableFull | DbError::NodeFull(_) => writeln!(out, "Error: Table full.")?,
        DbError::NoDatabaseOpen => writeln!(
            out,
            "No database is open. Use '.open <filename>' to open or create a database file."
        )?,
        other => writeln!(out, "Error: {}", other)?,
    }
    Ok(())
}

//! Engine Module
//!
//! The facade the command layer talks to.
//!
//! ## Responsibilities
//! - Open the table (initializing the root leaf on a fresh file)
//! - Insert rows with duplicate rejection
//! - Scan rows in key order
//! - Report layout constants and leaf contents for debugging
//! - Flush everything on close

use std::path::Path;

use tracing::{debug, info};

use crate::btree::{
    COMMON_NODE_HEADER_SIZE, LEAF_NODE_CELL_SIZE, LEAF_NODE_HEADER_SIZE, LEAF_NODE_MAX_CELLS,
    LEAF_NODE_SPACE_FOR_CELLS,
};
use crate::command::Statement;
use crate::config::Config;
use crate::error::{DbError, Result};
use crate::row::{Row, ROW_SIZE};
use crate::table::{Scan, Table};

/// Result of executing a statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecuteOutcome {
    /// One row was inserted
    Inserted,

    /// Every row, in key order
    Rows(Vec<Row>),
}

/// Layout constants, for the `.constants` report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constants {
    pub row_size: usize,
    pub common_node_header_size: usize,
    pub leaf_node_header_size: usize,
    pub leaf_node_cell_size: usize,
    pub leaf_node_space_for_cells: usize,
    pub leaf_node_max_cells: usize,
}

/// Snapshot of a leaf page's keys, for the `.btree` report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafDump {
    pub page_num: u32,
    /// (cell index, key) in cell order
    pub cells: Vec<(u32, u32)>,
}

/// The storage engine
///
/// Single-threaded: every call runs to completion, and nothing is written to
/// disk until [`Engine::close`].
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// The table (owns the pager)
    table: Table,
}

impl Engine {
    /// Open or create the page file named by the config
    pub fn open(config: Config) -> Result<Self> {
        let table = Table::open(&config)?;
        info!(
            path = %config.db_path.display(),
            num_pages = table.pager().num_pages(),
            "engine opened"
        );
        Ok(Self { config, table })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified page file
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().db_path(path).build();
        Self::open(config)
    }

    /// Execute a statement
    ///
    /// Routes statements to appropriate handlers
    pub fn execute(&mut self, statement: Statement) -> Result<ExecuteOutcome> {
        match statement {
            Statement::Insert(row) => {
                self.insert_row(&row)?;
                Ok(ExecuteOutcome::Inserted)
            }
            Statement::Select => {
                let rows = self.scan()?.collect::<Result<Vec<_>>>()?;
                Ok(ExecuteOutcome::Rows(rows))
            }
        }
    }

    /// Insert a row built from its fields
    pub fn insert(&mut self, id: u32, username: &str, email: &str) -> Result<()> {
        self.insert_row(&Row::new(id, username, email))
    }

    /// Insert a row at its sorted position
    ///
    /// Fails with `DuplicateKey` if the id is present and `TableFull` if the
    /// root leaf has no free cell. Both leave the page untouched.
    pub fn insert_row(&mut self, row: &Row) -> Result<()> {
        let mut cursor = self.table.find(row.id)?;

        if cursor.key()? == Some(row.id) {
            return Err(DbError::DuplicateKey(row.id));
        }

        let cell_num = cursor.cell_num();
        cursor.insert(row.id, row).map_err(|e| match e {
            DbError::NodeFull(_) => DbError::TableFull,
            other => other,
        })?;

        debug!(id = row.id, cell_num, "inserted row");
        Ok(())
    }

    /// Lazy scan of every row in ascending key order
    ///
    /// Each call starts again from the first row.
    pub fn scan(&mut self) -> Result<Scan<'_>> {
        self.table.scan()
    }

    /// Number of rows stored
    pub fn row_count(&mut self) -> Result<u32> {
        self.table.row_count()
    }

    /// Layout constants
    pub fn constants() -> Constants {
        Constants {
            row_size: ROW_SIZE,
            common_node_header_size: COMMON_NODE_HEADER_SIZE,
            leaf_node_header_size: LEAF_NODE_HEADER_SIZE,
            leaf_node_cell_size: LEAF_NODE_CELL_SIZE,
            leaf_node_space_for_cells: LEAF_NODE_SPACE_FOR_CELLS,
            leaf_node_max_cells: LEAF_NODE_MAX_CELLS,
        }
    }

    /// Keys of the root leaf, in cell order
    pub fn leaf_dump(&mut self) -> Result<LeafDump> {
        let page_num = self.table.root_page_num();
        let leaf = self.table.root_leaf()?;
        let cells = leaf.keys().into_iter().zip(0u32..).map(|(key, i)| (i, key)).collect();
        Ok(LeafDump { page_num, cells })
    }

    /// Close the engine, flushing every cached page
    pub fn close(self) -> Result<()> {
        let path = self.config.db_path.clone();
        self.table.close()?;
        info!(path = %path.display(), "engine closed");
        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the page file path
    pub fn db_path(&self) -> &Path {
        &self.config.db_path
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the underlying table
    pub fn table(&mut self) -> &mut Table {
        &mut self.table
    }
}

//! Cursor
//!
//! A position in the table: (page, cell index) plus an end-of-table flag.

use crate::btree::LeafNode;
use crate::error::{DbError, Result};
use crate::pager::Page;
use crate::row::{deserialize, Row};

use super::Table;

/// A transient position inside a table
///
/// Holds the table's only mutable borrow, so page changes made through the
/// cursor are visible to the table as soon as the cursor is dropped. There is
/// no multi-page traversal: the cursor stays on its leaf.
pub struct Cursor<'t> {
    table: &'t mut Table,
    page_num: u32,
    cell_num: u32,
    end_of_table: bool,
}

impl<'t> Cursor<'t> {
    pub(super) fn new(table: &'t mut Table, page_num: u32, cell_num: u32, end_of_table: bool) -> Self {
        Self {
            table,
            page_num,
            cell_num,
            end_of_table,
        }
    }

    pub fn page_num(&self) -> u32 {
        self.page_num
    }

    pub fn cell_num(&self) -> u32 {
        self.cell_num
    }

    /// Whether the cursor is one past the last cell
    pub fn is_end(&self) -> bool {
        self.end_of_table
    }

    fn page(&mut self) -> Result<&mut Page> {
        self.table.pager.get_page(self.page_num)
    }

    /// Serialized row bytes under the cursor
    pub fn value(&mut self) -> Result<&[u8]> {
        let cell_num = self.cell_num;
        let end_of_table = self.end_of_table;

        let page: &Page = self.page()?;
        let leaf = LeafNode::new(page.as_bytes());
        if end_of_table || cell_num >= leaf.num_cells() {
            return Err(DbError::CursorOutOfRange);
        }
        Ok(leaf.into_value(cell_num))
    }

    /// Key under the cursor, `None` at end of table
    pub fn key(&mut self) -> Result<Option<u32>> {
        if self.end_of_table {
            return Ok(None);
        }
        let cell_num = self.cell_num;
        let leaf = LeafNode::new(self.page()?);
        if cell_num >= leaf.num_cells() {
            return Ok(None);
        }
        Ok(Some(leaf.key(cell_num)))
    }

    /// Deserialized row under the cursor
    pub fn row(&mut self) -> Result<Row> {
        deserialize(self.value()?)
    }

    /// Move to the next cell, setting the end flag at the last one
    pub fn advance(&mut self) -> Result<()> {
        let num_cells = LeafNode::new(self.page()?).num_cells();
        self.cell_num += 1;
        if self.cell_num >= num_cells {
            self.end_of_table = true;
        }
        Ok(())
    }

    /// Insert `(key, row)` at the cursor, shifting later cells right
    ///
    /// The caller is responsible for the cursor being the key's insertion
    /// point (see [`Table::find`]).
    pub fn insert(&mut self, key: u32, row: &Row) -> Result<()> {
        let cell_num = self.cell_num;
        LeafNode::new(self.page()?).insert(cell_num, key, row)?;
        self.end_of_table = false;
        Ok(())
    }

    /// Turn this cursor into an iterator over the rows from here on
    pub fn into_scan(self) -> Scan<'t> {
        Scan {
            cursor: self,
            failed: false,
        }
    }
}

/// Lazy, finite iterator over rows in key order
///
/// Stops after the first error.
pub struct Scan<'t> {
    cursor: Cursor<'t>,
    failed: bool,
}

impl Iterator for Scan<'_> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor.is_end() {
            return None;
        }

        let row = self.cursor.row().and_then(|row| {
            self.cursor.advance()?;
            Ok(row)
        });

        if row.is_err() {
            self.failed = true;
        }
        Some(row)
    }
}

impl Table {
    /// Scan every row from the start of the table
    pub fn scan(&mut self) -> Result<Scan<'_>> {
        Ok(self.start()?.into_scan())
    }
}

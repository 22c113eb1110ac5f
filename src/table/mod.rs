//! Table Module
//!
//! A table owns one pager and designates page 0 as its root leaf.
//!
//! ## Responsibilities
//! - Initialize page 0 as an empty root leaf on a fresh file
//! - Hand out cursors at the start, the end, or a key's insertion point
//! - Release the pager on close
//!
//! Cursors borrow the table mutably, so a cursor can never outlive the table
//! and two cursors can never hold the same page at once.

mod cursor;
mod find;

use std::path::Path;

use tracing::info;

use crate::btree::{LeafNode, NodeType, LEAF_NODE_MAX_CELLS};
use crate::config::Config;
use crate::error::{DbError, Result};
use crate::pager::{Page, Pager};

pub use cursor::{Cursor, Scan};
pub use find::find_in_leaf;

/// A single-leaf table backed by a page file
pub struct Table {
    pager: Pager,
    root_page_num: u32,
}

impl Table {
    /// Open or create the table described by `config`
    pub fn open(config: &Config) -> Result<Self> {
        config.validate()?;

        let mut pager = Pager::open(&config.db_path, config.max_pages)?;
        pager.set_sync_on_close(config.sync_on_close);

        let root_page_num = 0;
        if pager.num_pages() == 0 {
            // Fresh file: page 0 becomes an empty root leaf.
            let mut root = LeafNode::new(pager.get_page(root_page_num)?);
            root.initialize();
            root.set_root(true);
            info!(path = %config.db_path.display(), "initialized empty root leaf");
        } else {
            let root = LeafNode::new(pager.get_page(root_page_num)?);
            match root.node_type() {
                Ok(NodeType::Leaf) => {
                    let num_cells = root.num_cells();
                    if num_cells as usize > LEAF_NODE_MAX_CELLS {
                        return Err(DbError::CorruptFile(format!(
                            "root leaf claims {} cells, at most {} fit in a page",
                            num_cells, LEAF_NODE_MAX_CELLS
                        )));
                    }
                }
                Ok(NodeType::Internal) => {
                    return Err(DbError::CorruptFile(
                        "root page is an internal node; only single-leaf tables are supported"
                            .to_string(),
                    ))
                }
                Err(tag) => {
                    return Err(DbError::CorruptFile(format!(
                        "root page has unknown node type tag {}",
                        tag
                    )))
                }
            }
        }

        Ok(Self {
            pager,
            root_page_num,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified page file
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().db_path(path).build();
        Self::open(&config)
    }

    /// Cursor at the first cell; already at end if the table is empty
    pub fn start(&mut self) -> Result<Cursor<'_>> {
        let page_num = self.root_page_num;
        let num_cells = self.root_leaf()?.num_cells();
        Ok(Cursor::new(self, page_num, 0, num_cells == 0))
    }

    /// Cursor one past the last cell
    pub fn end(&mut self) -> Result<Cursor<'_>> {
        let page_num = self.root_page_num;
        let num_cells = self.root_leaf()?.num_cells();
        Ok(Cursor::new(self, page_num, num_cells, true))
    }

    /// Number of rows in the table
    pub fn row_count(&mut self) -> Result<u32> {
        Ok(self.root_leaf()?.num_cells())
    }

    /// Flush all pages and release the file
    pub fn close(self) -> Result<()> {
        self.pager.close()
    }

    pub fn root_page_num(&self) -> u32 {
        self.root_page_num
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// View of the root page as a leaf
    pub(crate) fn root_leaf(&mut self) -> Result<LeafNode<&mut Page>> {
        let root = self.root_page_num;
        self.leaf(root)
    }

    pub(crate) fn leaf(&mut self, page_num: u32) -> Result<LeafNode<&mut Page>> {
        Ok(LeafNode::new(self.pager.get_page(page_num)?))
    }
}

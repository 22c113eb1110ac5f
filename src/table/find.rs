//! Table finder
//!
//! Binary search over the root leaf's sorted keys.

use tracing::trace;

use crate::btree::{LeafNode, NodeType};
use crate::error::{DbError, Result};

use super::{Cursor, Table};

impl Table {
    /// Cursor at `key`, or at the index where `key` would be inserted
    ///
    /// One routine answers both "is this key present" (the cell under the
    /// cursor holds `key`) and "where does it go" (the cursor's index keeps
    /// the leaf sorted). The cursor is at end of table when the index equals
    /// the cell count.
    pub fn find(&mut self, key: u32) -> Result<Cursor<'_>> {
        let page_num = self.root_page_num;
        let leaf = self.leaf(page_num)?;

        if leaf.node_type() != Ok(NodeType::Leaf) {
            return Err(DbError::CorruptFile(format!(
                "page {} is not a leaf node; internal node search is not supported",
                page_num
            )));
        }

        let num_cells = leaf.num_cells();
        let cell_num = find_in_leaf(&leaf, key);
        trace!(key, cell_num, num_cells, "found insertion point");

        Ok(Cursor::new(self, page_num, cell_num, cell_num >= num_cells))
    }
}

/// Index of `key` in the leaf, or the index it should be inserted at
pub fn find_in_leaf<B: AsRef<[u8]>>(leaf: &LeafNode<B>, key: u32) -> u32 {
    let mut low = 0;
    let mut high = leaf.num_cells();

    while low != high {
        let mid = (low + high) / 2;
        let key_at_mid = leaf.key(mid);
        if key == key_at_mid {
            return mid;
        }
        if key < key_at_mid {
            high = mid;
        } else {
            low = mid + 1;
        }
    }

    low
}

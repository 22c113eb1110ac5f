//! Leaf node view
//!
//! Interprets a page buffer as a leaf node. The view borrows the buffer; it
//! never copies it.

use tracing::debug;

use crate::error::{DbError, Result};
use crate::row::{serialize, Row, ROW_SIZE};

use super::{
    read_u32, write_u32, NodeType, IS_ROOT_OFFSET, LEAF_NODE_CELL_SIZE, LEAF_NODE_HEADER_SIZE,
    LEAF_NODE_KEY_OFFSET, LEAF_NODE_MAX_CELLS, LEAF_NODE_NUM_CELLS_OFFSET,
    LEAF_NODE_VALUE_OFFSET, LEAF_NODE_VALUE_SIZE, NODE_TYPE_OFFSET, PARENT_POINTER_OFFSET,
};

/// A leaf node laid over a page buffer
///
/// Read accessors work over any `AsRef<[u8]>`; mutation needs `AsMut<[u8]>`.
/// Cell indices are not bounds-checked against the cell count: callers
/// (the cursor and the finder) only pass indices in `0..=num_cells`.
pub struct LeafNode<B> {
    buf: B,
}

impl<B: AsRef<[u8]>> LeafNode<B> {
    pub fn new(buf: B) -> Self {
        Self { buf }
    }

    fn bytes(&self) -> &[u8] {
        self.buf.as_ref()
    }

    /// Node-type tag, or the raw byte if it is not a known tag
    pub fn node_type(&self) -> std::result::Result<NodeType, u8> {
        NodeType::try_from(self.bytes()[NODE_TYPE_OFFSET])
    }

    pub fn is_root(&self) -> bool {
        self.bytes()[IS_ROOT_OFFSET] != 0
    }

    pub fn parent_pointer(&self) -> u32 {
        read_u32(self.bytes(), PARENT_POINTER_OFFSET)
    }

    pub fn num_cells(&self) -> u32 {
        read_u32(self.bytes(), LEAF_NODE_NUM_CELLS_OFFSET)
    }

    pub fn is_full(&self) -> bool {
        self.num_cells() as usize >= LEAF_NODE_MAX_CELLS
    }

    /// Bytes of cell `cell_num` (key + row)
    pub fn cell(&self, cell_num: u32) -> &[u8] {
        let start = cell_offset(cell_num);
        &self.bytes()[start..start + LEAF_NODE_CELL_SIZE]
    }

    pub fn key(&self, cell_num: u32) -> u32 {
        read_u32(self.bytes(), cell_offset(cell_num) + LEAF_NODE_KEY_OFFSET)
    }

    /// Serialized row bytes of cell `cell_num`
    pub fn value(&self, cell_num: u32) -> &[u8] {
        let start = cell_offset(cell_num) + LEAF_NODE_VALUE_OFFSET;
        &self.bytes()[start..start + LEAF_NODE_VALUE_SIZE]
    }

    /// Keys of all occupied cells, in cell order
    pub fn keys(&self) -> Vec<u32> {
        (0..self.num_cells()).map(|i| self.key(i)).collect()
    }
}

impl<'a> LeafNode<&'a [u8]> {
    /// Value slot borrowed for the lifetime of the underlying page
    pub fn into_value(self, cell_num: u32) -> &'a [u8] {
        let start = cell_offset(cell_num) + LEAF_NODE_VALUE_OFFSET;
        &self.buf[start..start + LEAF_NODE_VALUE_SIZE]
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> LeafNode<B> {
    fn bytes_mut(&mut self) -> &mut [u8] {
        self.buf.as_mut()
    }

    /// Mark the node as an empty leaf
    pub fn initialize(&mut self) {
        let buf = self.bytes_mut();
        buf[NODE_TYPE_OFFSET] = NodeType::Leaf as u8;
        write_u32(buf, LEAF_NODE_NUM_CELLS_OFFSET, 0);
    }

    pub fn set_root(&mut self, is_root: bool) {
        self.bytes_mut()[IS_ROOT_OFFSET] = u8::from(is_root);
    }

    pub fn set_parent_pointer(&mut self, page_num: u32) {
        write_u32(self.bytes_mut(), PARENT_POINTER_OFFSET, page_num);
    }

    pub fn set_num_cells(&mut self, num_cells: u32) {
        write_u32(self.bytes_mut(), LEAF_NODE_NUM_CELLS_OFFSET, num_cells);
    }

    pub fn set_key(&mut self, cell_num: u32, key: u32) {
        write_u32(self.bytes_mut(), cell_offset(cell_num) + LEAF_NODE_KEY_OFFSET, key);
    }

    pub fn value_mut(&mut self, cell_num: u32) -> &mut [u8] {
        let start = cell_offset(cell_num) + LEAF_NODE_VALUE_OFFSET;
        &mut self.bytes_mut()[start..start + LEAF_NODE_VALUE_SIZE]
    }

    /// Insert `(key, row)` at `cell_num`, shifting later cells one slot right
    ///
    /// Fails with `NodeFull` before touching the page when the leaf already
    /// holds `LEAF_NODE_MAX_CELLS` cells. Splitting is not implemented.
    pub fn insert(&mut self, cell_num: u32, key: u32, row: &Row) -> Result<()> {
        let num_cells = self.num_cells();
        if num_cells as usize >= LEAF_NODE_MAX_CELLS {
            return Err(DbError::NodeFull(num_cells));
        }
        debug_assert!(cell_num <= num_cells, "insert index past end of leaf");

        let mut value = [0u8; ROW_SIZE];
        serialize(row, &mut value)?;

        // Highest cell first so nothing is overwritten before it moves.
        let buf = self.bytes_mut();
        for i in (cell_num..num_cells).rev() {
            let src = cell_offset(i);
            buf.copy_within(src..src + LEAF_NODE_CELL_SIZE, src + LEAF_NODE_CELL_SIZE);
        }

        self.set_num_cells(num_cells + 1);
        self.set_key(cell_num, key);
        self.value_mut(cell_num).copy_from_slice(&value);

        debug!(key, cell_num, num_cells = num_cells + 1, "inserted leaf cell");
        Ok(())
    }
}

/// Byte offset of cell `cell_num` within the page
fn cell_offset(cell_num: u32) -> usize {
    LEAF_NODE_HEADER_SIZE + cell_num as usize * LEAF_NODE_CELL_SIZE
}

//! B-Tree Node Module
//!
//! On-disk layout of B-tree nodes. Only leaf nodes are implemented: the whole
//! table lives in a single root leaf on page 0.
//!
//! ## Leaf Node Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Common Header (6 bytes)                                 │
//! │   NodeType: u8 (1) | IsRoot: u8 (1) | Parent: u32 (4)   │
//! ├─────────────────────────────────────────────────────────┤
//! │ Leaf Header (4 bytes)                                   │
//! │   NumCells: u32 (4)                                     │
//! ├─────────────────────────────────────────────────────────┤
//! │ Cells (NumCells × 295 bytes, sorted by key)             │
//! │   [Key: u32 (4)][Row (291)]                             │
//! │   ... repeated for each cell ...                        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! All integers are little-endian. Fields are read and written through the
//! offset constants below, never through a struct overlay.

mod leaf;

use bytes::{Buf, BufMut};

use crate::pager::PAGE_SIZE;
use crate::row::ROW_SIZE;

pub use leaf::LeafNode;

// =============================================================================
// Common Node Header Layout
// =============================================================================

pub const NODE_TYPE_SIZE: usize = 1;
pub const NODE_TYPE_OFFSET: usize = 0;
pub const IS_ROOT_SIZE: usize = 1;
pub const IS_ROOT_OFFSET: usize = NODE_TYPE_OFFSET + NODE_TYPE_SIZE;
pub const PARENT_POINTER_SIZE: usize = 4;
pub const PARENT_POINTER_OFFSET: usize = IS_ROOT_OFFSET + IS_ROOT_SIZE;
pub const COMMON_NODE_HEADER_SIZE: usize = NODE_TYPE_SIZE + IS_ROOT_SIZE + PARENT_POINTER_SIZE;

// =============================================================================
// Leaf Node Header Layout
// =============================================================================

pub const LEAF_NODE_NUM_CELLS_SIZE: usize = 4;
pub const LEAF_NODE_NUM_CELLS_OFFSET: usize = COMMON_NODE_HEADER_SIZE;
pub const LEAF_NODE_HEADER_SIZE: usize = COMMON_NODE_HEADER_SIZE + LEAF_NODE_NUM_CELLS_SIZE;

// =============================================================================
// Leaf Node Body Layout
// =============================================================================

pub const LEAF_NODE_KEY_SIZE: usize = 4;
pub const LEAF_NODE_KEY_OFFSET: usize = 0;
pub const LEAF_NODE_VALUE_SIZE: usize = ROW_SIZE;
pub const LEAF_NODE_VALUE_OFFSET: usize = LEAF_NODE_KEY_OFFSET + LEAF_NODE_KEY_SIZE;
pub const LEAF_NODE_CELL_SIZE: usize = LEAF_NODE_KEY_SIZE + LEAF_NODE_VALUE_SIZE;
pub const LEAF_NODE_SPACE_FOR_CELLS: usize = PAGE_SIZE - LEAF_NODE_HEADER_SIZE;
pub const LEAF_NODE_MAX_CELLS: usize = LEAF_NODE_SPACE_FOR_CELLS / LEAF_NODE_CELL_SIZE;

// A page must fit at least one cell.
const _: () = assert!(LEAF_NODE_MAX_CELLS > 0);

// =============================================================================
// Node Type
// =============================================================================

/// Node-type tag stored in the first byte of every node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NodeType {
    Internal = 0,
    Leaf = 1,
}

impl TryFrom<u8> for NodeType {
    type Error = u8;

    fn try_from(tag: u8) -> std::result::Result<Self, Self::Error> {
        match tag {
            0 => Ok(NodeType::Internal),
            1 => Ok(NodeType::Leaf),
            other => Err(other),
        }
    }
}

// =============================================================================
// Little-endian field helpers
// =============================================================================

pub(crate) fn read_u32(buf: &[u8], offset: usize) -> u32 {
    (&buf[offset..offset + 4]).get_u32_le()
}

pub(crate) fn write_u32(buf: &mut [u8], offset: usize, value: u32) {
    (&mut buf[offset..offset + 4]).put_u32_le(value);
}

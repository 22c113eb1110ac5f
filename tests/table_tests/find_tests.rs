//! Tests for the table finder
//!
//! These tests verify:
//! - Exact matches return the key's cell
//! - Misses return the insertion point (front, middle, back)
//! - The end flag is set exactly when the index equals the cell count

use leafdb::btree::LeafNode;
use leafdb::pager::Page;
use leafdb::row::Row;
use leafdb::table::{find_in_leaf, Table};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn row(id: u32) -> Row {
    Row::new(id, "u", "e")
}

/// A leaf page holding `keys` (already sorted)
fn leaf_with(keys: &[u32]) -> Page {
    let mut page = Page::zeroed();
    let mut leaf = LeafNode::new(&mut page);
    leaf.initialize();
    for (i, &key) in keys.iter().enumerate() {
        leaf.insert(i as u32, key, &row(key)).unwrap();
    }
    page
}

fn find(keys: &[u32], key: u32) -> u32 {
    let page = leaf_with(keys);
    find_in_leaf(&LeafNode::new(page.as_bytes()), key)
}

// =============================================================================
// Binary Search Tests
// =============================================================================

#[test]
fn test_find_in_empty_leaf() {
    assert_eq!(find(&[], 42), 0);
}

#[test]
fn test_find_exact_matches() {
    let keys = [10, 20, 30, 40, 50];
    for (i, &key) in keys.iter().enumerate() {
        assert_eq!(find(&keys, key), i as u32);
    }
}

#[test]
fn test_find_insertion_points() {
    let keys = [10, 20, 30, 40, 50];

    assert_eq!(find(&keys, 5), 0);
    assert_eq!(find(&keys, 15), 1);
    assert_eq!(find(&keys, 35), 3);
    assert_eq!(find(&keys, 45), 4);
    assert_eq!(find(&keys, 55), 5);
}

#[test]
fn test_find_extreme_keys() {
    let keys = [0, u32::MAX];

    assert_eq!(find(&keys, 0), 0);
    assert_eq!(find(&keys, 1), 1);
    assert_eq!(find(&keys, u32::MAX), 1);
}

#[test]
fn test_find_single_cell() {
    assert_eq!(find(&[7], 6), 0);
    assert_eq!(find(&[7], 7), 0);
    assert_eq!(find(&[7], 8), 1);
}

// =============================================================================
// Table::find Tests
// =============================================================================

#[test]
fn test_table_find_cursor_flags() {
    let temp_dir = TempDir::new().unwrap();
    let mut table = Table::open_path(&temp_dir.path().join("test.db")).unwrap();
    for id in [1u32, 3, 5] {
        table.find(id).unwrap().insert(id, &row(id)).unwrap();
    }

    let mut hit = table.find(3).unwrap();
    assert_eq!(hit.cell_num(), 1);
    assert!(!hit.is_end());
    assert_eq!(hit.key().unwrap(), Some(3));

    let mut miss = table.find(4).unwrap();
    assert_eq!(miss.cell_num(), 2);
    assert_eq!(miss.key().unwrap(), Some(5));

    let mut past = table.find(9).unwrap();
    assert_eq!(past.cell_num(), 3);
    assert!(past.is_end());
    assert_eq!(past.key().unwrap(), None);
}

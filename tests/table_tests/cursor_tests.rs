//! Tests for Table and Cursor
//!
//! These tests verify:
//! - Root leaf initialization on a fresh file
//! - start/end cursor positions and end-of-table flags
//! - value/key access and the end-of-table error
//! - advance through every cell
//! - Lazy scans that restart on every call

use std::fs;

use leafdb::btree::{LeafNode, NodeType, LEAF_NODE_MAX_CELLS};
use leafdb::pager::PAGE_SIZE;
use leafdb::row::{Row, ROW_SIZE};
use leafdb::table::Table;
use leafdb::DbError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_table() -> (TempDir, Table) {
    let temp_dir = TempDir::new().unwrap();
    let table = Table::open_path(&temp_dir.path().join("test.db")).unwrap();
    (temp_dir, table)
}

fn row(id: u32) -> Row {
    Row::new(id, format!("user{}", id), format!("user{}@x.com", id))
}

/// Insert rows in the given order through find + cursor insert
fn insert_all(table: &mut Table, ids: &[u32]) {
    for &id in ids {
        let mut cursor = table.find(id).unwrap();
        cursor.insert(id, &row(id)).unwrap();
    }
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_initializes_root_leaf() {
    let (_temp, mut table) = setup_temp_table();

    assert_eq!(table.root_page_num(), 0);
    assert_eq!(table.pager().num_pages(), 1);
    assert_eq!(table.row_count().unwrap(), 0);
}

#[test]
fn test_fresh_file_root_flags_persist() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.db");

    let table = Table::open_path(&path).unwrap();
    table.close().unwrap();

    let data = fs::read(&path).unwrap();
    assert_eq!(data.len(), PAGE_SIZE);
    let leaf = LeafNode::new(&data[..]);
    assert_eq!(leaf.node_type(), Ok(NodeType::Leaf));
    assert!(leaf.is_root());
    assert_eq!(leaf.num_cells(), 0);
}

#[test]
fn test_open_rejects_non_leaf_root() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.db");
    // Tag 0 is an internal node
    fs::write(&path, vec![0u8; PAGE_SIZE]).unwrap();

    let result = Table::open_path(&path);

    assert!(matches!(result, Err(DbError::CorruptFile(_))));
}

#[test]
fn test_open_rejects_oversized_cell_count() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.db");
    let mut page = vec![0u8; PAGE_SIZE];
    let mut leaf = LeafNode::new(&mut page[..]);
    leaf.initialize();
    leaf.set_num_cells(1000);
    fs::write(&path, &page).unwrap();

    let result = Table::open_path(&path);

    assert!(matches!(result, Err(DbError::CorruptFile(_))));
}

#[test]
fn test_open_accepts_full_leaf_cell_count() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.db");
    let mut page = vec![0u8; PAGE_SIZE];
    let mut leaf = LeafNode::new(&mut page[..]);
    leaf.initialize();
    leaf.set_num_cells(LEAF_NODE_MAX_CELLS as u32);
    fs::write(&path, &page).unwrap();

    let mut table = Table::open_path(&path).unwrap();

    assert_eq!(table.row_count().unwrap(), LEAF_NODE_MAX_CELLS as u32);
}

// =============================================================================
// start / end Tests
// =============================================================================

#[test]
fn test_start_on_empty_table_is_end() {
    let (_temp, mut table) = setup_temp_table();

    let cursor = table.start().unwrap();

    assert!(cursor.is_end());
    assert_eq!(cursor.cell_num(), 0);
    assert_eq!(cursor.page_num(), 0);
}

#[test]
fn test_start_on_populated_table() {
    let (_temp, mut table) = setup_temp_table();
    insert_all(&mut table, &[1, 2]);

    let cursor = table.start().unwrap();

    assert!(!cursor.is_end());
    assert_eq!(cursor.cell_num(), 0);
}

#[test]
fn test_end_points_past_last_cell() {
    let (_temp, mut table) = setup_temp_table();
    insert_all(&mut table, &[1, 2, 3]);

    let mut cursor = table.end().unwrap();

    assert!(cursor.is_end());
    assert_eq!(cursor.cell_num(), 3);
    assert_eq!(cursor.key().unwrap(), None);
}

// =============================================================================
// value / advance Tests
// =============================================================================

#[test]
fn test_value_at_end_fails() {
    let (_temp, mut table) = setup_temp_table();

    let mut cursor = table.end().unwrap();

    assert!(matches!(cursor.value(), Err(DbError::CursorOutOfRange)));
    assert!(matches!(cursor.row(), Err(DbError::CursorOutOfRange)));
}

#[test]
fn test_value_returns_serialized_row() {
    let (_temp, mut table) = setup_temp_table();
    insert_all(&mut table, &[4]);

    let mut cursor = table.start().unwrap();
    let value = cursor.value().unwrap();

    assert_eq!(value.len(), ROW_SIZE);
    assert_eq!(value, &row(4).to_bytes()[..]);
}

#[test]
fn test_advance_walks_all_cells_then_ends() {
    let (_temp, mut table) = setup_temp_table();
    insert_all(&mut table, &[3, 1, 2]);

    let mut cursor = table.start().unwrap();
    let mut keys = Vec::new();
    while !cursor.is_end() {
        keys.push(cursor.key().unwrap().unwrap());
        cursor.advance().unwrap();
    }

    assert_eq!(keys, vec![1, 2, 3]);
    assert_eq!(cursor.cell_num(), 3);
}

// =============================================================================
// Scan Tests
// =============================================================================

#[test]
fn test_scan_empty_table() {
    let (_temp, mut table) = setup_temp_table();

    let rows: Vec<Row> = table.scan().unwrap().map(|r| r.unwrap()).collect();

    assert!(rows.is_empty());
}

#[test]
fn test_scan_is_lazy_and_restartable() {
    let (_temp, mut table) = setup_temp_table();
    insert_all(&mut table, &[5, 6, 7]);

    {
        let mut scan = table.scan().unwrap();
        assert_eq!(scan.next().unwrap().unwrap().id, 5);
        // Abandon the partial scan
    }

    let ids: Vec<u32> = table.scan().unwrap().map(|r| r.unwrap().id).collect();
    assert_eq!(ids, vec![5, 6, 7]);
}

#[test]
fn test_scan_from_cursor_position() {
    let (_temp, mut table) = setup_temp_table();
    insert_all(&mut table, &[10, 20, 30]);

    let ids: Vec<u32> = table
        .find(20)
        .unwrap()
        .into_scan()
        .map(|r| r.unwrap().id)
        .collect();

    assert_eq!(ids, vec![20, 30]);
}

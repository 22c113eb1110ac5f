//! Tests for the row codec
//!
//! These tests verify:
//! - Byte-exact field layout (LE id, zero-padded text)
//! - Round-trip of rows within the field limits
//! - Truncation of over-long text
//! - Null-terminated reads
//! - Undersized slot handling

use leafdb::row::{
    deserialize, serialize, Row, EMAIL_OFFSET, EMAIL_SIZE, ROW_SIZE, USERNAME_OFFSET,
    USERNAME_SIZE,
};
use leafdb::DbError;

// =============================================================================
// Layout Tests
// =============================================================================

#[test]
fn test_row_size_is_sum_of_fields() {
    assert_eq!(ROW_SIZE, 4 + 32 + 255);
    assert_eq!(ROW_SIZE, 291);
    assert_eq!(USERNAME_OFFSET, 4);
    assert_eq!(EMAIL_OFFSET, 36);
}

#[test]
fn test_serialize_layout() {
    let row = Row::new(0x0102_0304, "bob", "bob@x.com");
    let mut buf = [0xFFu8; ROW_SIZE];

    serialize(&row, &mut buf).unwrap();

    // Id is little-endian
    assert_eq!(&buf[0..4], &[0x04, 0x03, 0x02, 0x01]);

    // Username copied then zero-padded
    assert_eq!(&buf[USERNAME_OFFSET..USERNAME_OFFSET + 3], b"bob");
    assert!(buf[USERNAME_OFFSET + 3..EMAIL_OFFSET].iter().all(|&b| b == 0));

    // Email copied then zero-padded
    assert_eq!(&buf[EMAIL_OFFSET..EMAIL_OFFSET + 9], b"bob@x.com");
    assert!(buf[EMAIL_OFFSET + 9..ROW_SIZE].iter().all(|&b| b == 0));
}

#[test]
fn test_to_bytes_matches_serialize() {
    let row = Row::new(7, "alice", "alice@x.com");
    let mut buf = [0u8; ROW_SIZE];
    serialize(&row, &mut buf).unwrap();

    assert_eq!(row.to_bytes(), buf);
}

#[test]
fn test_serialize_only_touches_row_size_bytes() {
    let row = Row::new(1, "a", "b");
    let mut buf = vec![0xAAu8; ROW_SIZE + 10];

    serialize(&row, &mut buf).unwrap();

    assert!(buf[ROW_SIZE..].iter().all(|&b| b == 0xAA));
}

// =============================================================================
// Round-trip Tests
// =============================================================================

#[test]
fn test_round_trip() {
    let row = Row::new(42, "carol", "carol@x.com");
    let decoded = deserialize(&row.to_bytes()).unwrap();
    assert_eq!(decoded, row);
}

#[test]
fn test_round_trip_empty_text() {
    let row = Row::new(0, "", "");
    let decoded = deserialize(&row.to_bytes()).unwrap();
    assert_eq!(decoded, row);
}

#[test]
fn test_round_trip_max_id() {
    let row = Row::new(u32::MAX, "max", "max@x.com");
    let decoded = deserialize(&row.to_bytes()).unwrap();
    assert_eq!(decoded.id, u32::MAX);
}

#[test]
fn test_round_trip_exact_field_widths() {
    let username = "u".repeat(USERNAME_SIZE);
    let email = "e".repeat(EMAIL_SIZE);
    let row = Row::new(9, username.clone(), email.clone());

    let decoded = deserialize(&row.to_bytes()).unwrap();

    assert_eq!(decoded.username, username);
    assert_eq!(decoded.email, email);
}

// =============================================================================
// Truncation Tests
// =============================================================================

#[test]
fn test_long_username_truncated() {
    let username = "x".repeat(USERNAME_SIZE + 20);
    let row = Row::new(1, username, "a@x.com");

    let decoded = deserialize(&row.to_bytes()).unwrap();

    assert_eq!(decoded.username.len(), USERNAME_SIZE);
    assert_eq!(decoded.username, "x".repeat(USERNAME_SIZE));
    assert_eq!(decoded.email, "a@x.com");
}

#[test]
fn test_long_email_truncated() {
    let email = "y".repeat(EMAIL_SIZE * 2);
    let row = Row::new(1, "a", email);

    let decoded = deserialize(&row.to_bytes()).unwrap();

    assert_eq!(decoded.email.len(), EMAIL_SIZE);
    assert_eq!(decoded.email, "y".repeat(EMAIL_SIZE));
}

// =============================================================================
// Deserialize Tests
// =============================================================================

#[test]
fn test_text_ends_at_first_zero() {
    let mut buf = [0u8; ROW_SIZE];
    buf[USERNAME_OFFSET..USERNAME_OFFSET + 3].copy_from_slice(b"abc");
    // Garbage after the terminator is not part of the string
    buf[USERNAME_OFFSET + 4..USERNAME_OFFSET + 6].copy_from_slice(b"zz");

    let row = deserialize(&buf).unwrap();

    assert_eq!(row.username, "abc");
}

#[test]
fn test_zeroed_slot_is_empty_row() {
    let row = deserialize(&[0u8; ROW_SIZE]).unwrap();
    assert_eq!(row, Row::new(0, "", ""));
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_serialize_slot_too_small() {
    let row = Row::new(1, "a", "b");
    let mut buf = [0u8; ROW_SIZE - 1];

    let result = serialize(&row, &mut buf);

    assert!(matches!(result, Err(DbError::Serialization(_))));
    assert!(buf.iter().all(|&b| b == 0));
}

#[test]
fn test_deserialize_slot_too_small() {
    let result = deserialize(&[0u8; 10]);
    assert!(matches!(result, Err(DbError::Serialization(_))));
}

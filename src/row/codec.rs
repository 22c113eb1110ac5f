//! Row codec
//!
//! Fixed-width binary (de)serialization of a [`Row`] to and from a byte slot.

use bytes::{Buf, BufMut};

use crate::error::{DbError, Result};

use super::{Row, EMAIL_SIZE, ROW_SIZE, USERNAME_SIZE};

/// Serialize `row` into the first `ROW_SIZE` bytes of `dest`
///
/// Over-long text is truncated to the field width. Fails only when `dest`
/// cannot hold a full row.
pub fn serialize(row: &Row, dest: &mut [u8]) -> Result<()> {
    if dest.len() < ROW_SIZE {
        return Err(DbError::Serialization(format!(
            "row slot too small: {} bytes, need {}",
            dest.len(),
            ROW_SIZE
        )));
    }
    encode_into(row, &mut dest[..ROW_SIZE]);
    Ok(())
}

/// Deserialize a row from the first `ROW_SIZE` bytes of `src`
pub fn deserialize(src: &[u8]) -> Result<Row> {
    if src.len() < ROW_SIZE {
        return Err(DbError::Serialization(format!(
            "row slot too small: {} bytes, need {}",
            src.len(),
            ROW_SIZE
        )));
    }

    let mut buf = &src[..ROW_SIZE];
    let id = buf.get_u32_le();
    let username = take_text(&mut buf, USERNAME_SIZE);
    let email = take_text(&mut buf, EMAIL_SIZE);

    Ok(Row { id, username, email })
}

/// Write a row into a slot of exactly `ROW_SIZE` bytes
pub(super) fn encode_into(row: &Row, mut slot: &mut [u8]) {
    slot.put_u32_le(row.id);
    put_text(&mut slot, row.username.as_bytes(), USERNAME_SIZE);
    put_text(&mut slot, row.email.as_bytes(), EMAIL_SIZE);
}

/// Copy what fits of `text` into a `width`-byte field, zero-filling the rest
fn put_text<B: BufMut>(buf: &mut B, text: &[u8], width: usize) {
    let len = text.len().min(width);
    buf.put_slice(&text[..len]);
    buf.put_bytes(0, width - len);
}

/// Read a `width`-byte field, stopping the string at the first zero byte
fn take_text(buf: &mut &[u8], width: usize) -> String {
    let field = &buf[..width];
    let end = field.iter().position(|&b| b == 0).unwrap_or(width);
    let text = String::from_utf8_lossy(&field[..end]).into_owned();
    buf.advance(width);
    text
}

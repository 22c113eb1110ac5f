//! Row Module
//!
//! The logical record stored in the table and its fixed-width layout.
//!
//! ## Row Format
//! ```text
//! ┌──────────┬──────────────────┬──────────────────────────────┐
//! │ Id (4)   │ Username (32)    │ Email (255)                  │
//! │ u32 LE   │ zero-padded      │ zero-padded                  │
//! └──────────┴──────────────────┴──────────────────────────────┘
//! ```
//!
//! Text fields are null-terminated inside their fixed buffer: the logical
//! string ends at the first zero byte. Text longer than the field is
//! truncated to exactly the field width.

mod codec;

pub use codec::{deserialize, serialize};

// =============================================================================
// Layout Constants
// =============================================================================

/// Width of the id field
pub const ID_SIZE: usize = std::mem::size_of::<u32>();

/// Maximum username length in bytes
pub const USERNAME_SIZE: usize = 32;

/// Maximum email length in bytes
pub const EMAIL_SIZE: usize = 255;

pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;

/// Serialized row size: Id (4) + Username (32) + Email (255) = 291 bytes
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

// =============================================================================
// Row
// =============================================================================

/// A single table record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Sort key
    pub id: u32,
    pub username: String,
    pub email: String,
}

impl Row {
    pub fn new(id: u32, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
        }
    }

    /// Serialize into a fresh fixed-width buffer
    pub fn to_bytes(&self) -> [u8; ROW_SIZE] {
        let mut buf = [0u8; ROW_SIZE];
        codec::encode_into(self, &mut buf);
        buf
    }
}

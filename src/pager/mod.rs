//! Pager Module
//!
//! Mediates between logical page numbers and byte offsets in the page file.
//!
//! ## Responsibilities
//! - Open/create the page file and validate its length
//! - Load pages lazily into an in-memory cache on first access
//! - Keep every loaded page cached for the rest of the session
//! - Write pages back and evict them on close
//!
//! ## File Format
//! ```text
//! ┌─────────────────┬─────────────────┬─────────────────┬─────
//! │ Page 0 (4096)   │ Page 1 (4096)   │ Page 2 (4096)   │ ...
//! │ root leaf node  │                 │                 │
//! └─────────────────┴─────────────────┴─────────────────┴─────
//!   offset = page_num × PAGE_SIZE
//! ```
//!
//! The file length must always be an exact multiple of `PAGE_SIZE`.

mod cache;
mod page;

pub use cache::Pager;
pub use page::Page;

/// Size of every page, in memory and on disk
pub const PAGE_SIZE: usize = 4096;

/// Default cap on page numbers handed out by the pager
pub const TABLE_MAX_PAGES: u32 = 100;

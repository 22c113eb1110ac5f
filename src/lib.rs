//! # leafdb
//!
//! A single-file, page-backed key-value table engine with:
//! - Fixed-width row records keyed by a `u32` id
//! - A page cache that loads 4 KB pages lazily and flushes them on close
//! - A single B-tree leaf page holding cells sorted by key
//! - Binary-search lookup that doubles as the insertion point
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Shell / CLI                               │
//! │          (meta commands, statements, rendering)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Engine                                  │
//! │           (open / insert / scan / close)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Cursor    │          │    Find     │
//!   │  (advance)  │          │  (bsearch)  │
//!   └──────┬──────┘          └──────┬──────┘
//!          └────────────┬───────────┘
//!                       ▼
//!               ┌──────────────┐      ┌─────────────┐
//!               │  Leaf Node   │─────▶│  Row Codec  │
//!               └──────┬───────┘      └─────────────┘
//!                      ▼
//!               ┌──────────────┐
//!               │    Pager     │
//!               │ (page cache) │
//!               └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod row;
pub mod pager;
pub mod btree;
pub mod table;
pub mod engine;

pub mod command;
pub mod shell;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DbError, Result};
pub use config::Config;
pub use engine::Engine;
pub use row::Row;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of leafdb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

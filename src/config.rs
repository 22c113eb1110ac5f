//! Configuration for leafdb
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{DbError, Result};
use crate::pager::TABLE_MAX_PAGES;

/// Main configuration for a leafdb table
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Path of the page file. Created on open if it does not exist.
    pub db_path: PathBuf,

    /// Hard cap on the page numbers the pager will hand out
    pub max_pages: u32,

    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// fsync the file after the final flush on close
    pub sync_on_close: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./leafdb.db"),
            max_pages: TABLE_MAX_PAGES,
            sync_on_close: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the values that cannot be expressed in the types
    pub fn validate(&self) -> Result<()> {
        if self.max_pages == 0 {
            return Err(DbError::Config(
                "max_pages must be at least 1 (page 0 is the root)".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the page file path
    pub fn db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.db_path = path.into();
        self
    }

    /// Set the maximum number of pages
    pub fn max_pages(mut self, count: u32) -> Self {
        self.config.max_pages = count;
        self
    }

    /// Enable or disable fsync on close
    pub fn sync_on_close(mut self, sync: bool) -> Self {
        self.config.sync_on_close = sync;
        self
    }

    /// Build the config
    pub fn build(self) -> Config {
        self.config
    }
}

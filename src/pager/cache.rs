//! Page cache
//!
//! Owns the page file handle and a sparse map of loaded pages.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::error::{DbError, Result};

use super::{Page, PAGE_SIZE};

/// Page cache over a single page file
///
/// Pages are loaded on first access and stay cached until [`Pager::close`],
/// so repeated access during a search or an insert shift never goes back to
/// disk. All page buffers are owned here; callers only borrow them.
pub struct Pager {
    /// Path of the page file (for logging)
    path: PathBuf,
    /// Backing file, opened read/write
    file: File,
    /// File length at open time
    file_length: u64,
    /// Pages in use: pages present in the file plus pages allocated since
    num_pages: u32,
    /// Page numbers at or above this are rejected
    max_pages: u32,
    /// Loaded pages, ordered by page number
    pages: BTreeMap<u32, Page>,
    /// fsync after the final flush on close
    sync_on_close: bool,
}

impl Pager {
    /// Open or create the page file at `path`
    ///
    /// Fails with `CorruptFile` if the file length is not a whole number of
    /// pages.
    pub fn open(path: &Path, max_pages: u32) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let file_length = file.metadata()?.len();
        if file_length % PAGE_SIZE as u64 != 0 {
            return Err(DbError::CorruptFile(format!(
                "{}: length {} is not a multiple of page size {}",
                path.display(),
                file_length,
                PAGE_SIZE
            )));
        }

        let num_pages = u32::try_from(file_length / PAGE_SIZE as u64).map_err(|_| {
            DbError::CorruptFile(format!(
                "{}: {} bytes holds more pages than can be addressed",
                path.display(),
                file_length
            ))
        })?;

        info!(path = %path.display(), file_length, num_pages, "opened page file");

        Ok(Self {
            path: path.to_path_buf(),
            file,
            file_length,
            num_pages,
            max_pages,
            pages: BTreeMap::new(),
            sync_on_close: true,
        })
    }

    /// Set whether `close` fsyncs the file
    pub fn set_sync_on_close(&mut self, sync: bool) {
        self.sync_on_close = sync;
    }

    /// Get a page, loading it into the cache on first access
    ///
    /// A page inside the file is read from disk (a short read leaves the tail
    /// zeroed); any other page starts zero-filled and extends the page count.
    pub fn get_page(&mut self, page_num: u32) -> Result<&mut Page> {
        if page_num >= self.max_pages {
            return Err(DbError::PageOutOfBounds {
                page: page_num,
                max: self.max_pages,
            });
        }

        match self.pages.entry(page_num) {
            Entry::Occupied(o) => Ok(o.into_mut()),
            Entry::Vacant(v) => {
                let mut page = Page::zeroed();

                if page_num < self.num_pages {
                    let offset = page_num as u64 * PAGE_SIZE as u64;
                    self.file.seek(SeekFrom::Start(offset))?;
                    let read = read_up_to(&mut self.file, page.as_bytes_mut())?;
                    debug!(page_num, read, "loaded page from disk");
                } else {
                    self.num_pages = page_num + 1;
                    debug!(page_num, num_pages = self.num_pages, "allocated new page");
                }

                Ok(v.insert(page))
            }
        }
    }

    /// Write a cached page back to its offset in the file
    pub fn flush(&mut self, page_num: u32) -> Result<()> {
        let page = self
            .pages
            .get(&page_num)
            .ok_or(DbError::PageNotCached(page_num))?;

        let offset = page_num as u64 * PAGE_SIZE as u64;
        self.file.seek(SeekFrom::Start(offset))?;
        let written = write_up_to(&mut self.file, page.as_bytes())?;
        if written < PAGE_SIZE {
            return Err(DbError::ShortWrite {
                page: page_num,
                written,
                expected: PAGE_SIZE,
            });
        }

        debug!(page_num, "flushed page");
        Ok(())
    }

    /// Flush every cached page in page order, evict them, and release the file
    ///
    /// A failed flush does not stop the others; the first failure is returned
    /// after the file handle has been dropped.
    pub fn close(mut self) -> Result<()> {
        let mut first_err: Option<DbError> = None;

        let page_nums: Vec<u32> = self.pages.keys().copied().collect();
        for page_num in page_nums {
            if let Err(e) = self.flush(page_num) {
                error!(page_num, error = %e, "failed to flush page on close");
                first_err.get_or_insert(e);
            }
        }
        self.pages.clear();

        if self.sync_on_close && first_err.is_none() {
            if let Err(e) = self.file.sync_all() {
                error!(error = %e, "failed to sync page file on close");
                first_err = Some(DbError::Io(e));
            }
        }

        info!(path = %self.path.display(), num_pages = self.num_pages, "closed page file");
        drop(self.file);

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of pages in use
    pub fn num_pages(&self) -> u32 {
        self.num_pages
    }

    /// File length when the pager was opened
    pub fn file_length(&self) -> u64 {
        self.file_length
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }

    /// Number of pages currently held in the cache
    pub fn cached_pages(&self) -> usize {
        self.pages.len()
    }

    /// Whether a page has been loaded
    pub fn is_cached(&self, page_num: u32) -> bool {
        self.pages.contains_key(&page_num)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// =============================================================================
// Private Helpers
// =============================================================================

/// Read until `buf` is full or EOF, returning the bytes read
fn read_up_to(file: &mut File, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Write until `buf` is drained or the OS stops accepting bytes
fn write_up_to(file: &mut File, buf: &[u8]) -> std::io::Result<usize> {
    let mut written = 0;
    while written < buf.len() {
        match file.write(&buf[written..]) {
            Ok(0) => break,
            Ok(n) => written += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(written)
}

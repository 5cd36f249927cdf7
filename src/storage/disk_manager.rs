//! Disk Manager - low-level file I/O for database pages.
//!
//! The [`DiskManager`] handles all direct file operations under a
//! database's data directory: reading and writing page files, and
//! enumerating the page files that exist for a table during recovery.

use std::fs;
use std::path::{Path, PathBuf};

use crate::common::config::PAGE_CAPACITY;
use crate::common::{Error, PageId, PageKind, Result};
use crate::storage::page::Page;

/// Manages disk I/O under a single database's data directory.
///
/// # File Layout
/// ```text
/// <root>/
///   metadata.json
///   <table>/
///     base/col_<i>_page_<n>.page.json
///     tail/col_<i>_page_<n>.page.json
/// ```
///
/// # Thread Safety
/// `DiskManager` is single-threaded; `BufferPoolManager` is responsible
/// for serializing access to it (spec.md §5).
pub struct DiskManager {
    root: PathBuf,
}

impl DiskManager {
    /// Bind to a data directory, creating it if necessary.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        fs::create_dir_all(&root)?;
        Ok(Self {
            root: root.as_ref().to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.root.join("metadata.json")
    }

    fn full_path(&self, page_id: &PageId) -> PathBuf {
        self.root.join(page_id.relative_path())
    }

    /// Read a page from disk.
    ///
    /// # Errors
    /// Returns `Error::PageNotFound` if no file exists at this page's
    /// path; returns `Error::CorruptPage` if it exists but fails to
    /// parse or fails its internal consistency check.
    pub fn read_page(&self, page_id: &PageId) -> Result<Page> {
        let path = self.full_path(page_id);
        let bytes = fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::PageNotFound(page_id.to_string())
            } else {
                Error::Io(e)
            }
        })?;
        Page::deserialize(&bytes, PAGE_CAPACITY)
    }

    /// Write a page to disk, creating its table/kind directory if needed.
    pub fn write_page(&self, page_id: &PageId, page: &Page) -> Result<()> {
        let path = self.full_path(page_id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = page.serialize()?;
        fs::write(path, bytes)?;
        Ok(())
    }

    pub fn page_exists(&self, page_id: &PageId) -> bool {
        self.full_path(page_id).exists()
    }

    /// List the page numbers present for a given table/column/kind,
    /// sorted ascending. Used by recovery to enumerate a column's pages.
    pub fn page_numbers(&self, table: &str, column: u16, kind: PageKind) -> Result<Vec<u32>> {
        let dir = self.root.join(table).join(kind.dir_name());
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let prefix = format!("col_{column}_page_");
        let mut nums = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(rest) = name.strip_prefix(&prefix) {
                if let Some(num_str) = rest.strip_suffix(".page.json") {
                    if let Ok(n) = num_str.parse::<u32>() {
                        nums.push(n);
                    }
                }
            }
        }
        nums.sort_unstable();
        Ok(nums)
    }
}

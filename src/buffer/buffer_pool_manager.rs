//! Buffer Pool Manager - the core page caching layer.
//!
//! The [`BufferPoolManager`] provides:
//! - Page caching between disk and memory, keyed by composite [`PageId`]
//! - Pin-based reference counting
//! - Automatic dirty page write-back on eviction and `flush_all_pages`
//! - An LRU eviction policy among unpinned frames

use std::collections::HashMap;
use std::sync::atomic::Ordering;

use log::{debug, trace};
use parking_lot::{Mutex, RwLock};

use crate::buffer::replacer::LruReplacer;
use crate::buffer::{BufferPoolStats, Frame, PageReadGuard, PageWriteGuard};
use crate::common::{Error, FrameId, PageId, Result};
use crate::storage::DiskManager;

/// Manages a pool of buffer frames for caching disk pages.
///
/// # Thread Safety
/// - `page_table`: `RwLock` — many readers, few writers
/// - `free_list`: `Mutex` — always modified
/// - `replacer`: `Mutex` — internal state changes on access
/// - `disk_manager`: `Mutex` — single-threaded I/O
/// - `frames`: no lock — fixed size, each `Frame` has internal locks
/// - `stats`: no lock — all atomic counters
pub struct BufferPoolManager {
    frames: Vec<Frame>,
    page_table: RwLock<HashMap<PageId, FrameId>>,
    free_list: Mutex<Vec<FrameId>>,
    replacer: Mutex<LruReplacer>,
    disk_manager: Mutex<DiskManager>,
    stats: BufferPoolStats,
    pool_size: usize,
}

impl BufferPoolManager {
    /// Create a new buffer pool manager.
    ///
    /// # Panics
    /// Panics if `pool_size` is 0.
    pub fn new(pool_size: usize, disk_manager: DiskManager) -> Self {
        assert!(pool_size > 0, "pool_size must be > 0");

        let frames: Vec<Frame> = (0..pool_size).map(|_| Frame::new()).collect();
        let free_list: Vec<FrameId> = (0..pool_size).map(FrameId::new).collect();

        Self {
            frames,
            page_table: RwLock::new(HashMap::new()),
            free_list: Mutex::new(free_list),
            replacer: Mutex::new(LruReplacer::new()),
            disk_manager: Mutex::new(disk_manager),
            stats: BufferPoolStats::new(),
            pool_size,
        }
    }

    // ========================================================================
    // Public API: Fetch pages
    // ========================================================================

    /// Fetch a page for reading (shared access).
    ///
    /// # Errors
    /// - `Error::PageNotFound` / `Error::CorruptPage` if the page can't be
    ///   loaded from disk.
    /// - `Error::BufferPoolExhausted` if all frames are pinned.
    pub fn fetch_page_read(&self, page_id: &PageId) -> Result<PageReadGuard<'_>> {
        let frame_id = self.fetch_page_internal(page_id)?;
        let lock = self.frames[frame_id.0].page();
        Ok(PageReadGuard::new(self, frame_id, page_id.clone(), lock))
    }

    /// Fetch a page for writing (exclusive access). Marks the page dirty
    /// when the returned guard drops.
    pub fn fetch_page_write(&self, page_id: &PageId) -> Result<PageWriteGuard<'_>> {
        let frame_id = self.fetch_page_internal(page_id)?;
        let lock = self.frames[frame_id.0].page_mut();
        Ok(PageWriteGuard::new(self, frame_id, page_id.clone(), lock))
    }

    // ========================================================================
    // Public API: Create pages
    // ========================================================================

    /// Allocate a brand-new, empty page at `page_id` and load it into the
    /// buffer pool pinned for writing. Unlike the teacher's auto-numbered
    /// `new_page`, the caller (a `Table`) decides the page id, since page
    /// numbers are assigned per physical column rather than from a single
    /// database-wide counter.
    ///
    /// # Errors
    /// `Error::BufferPoolExhausted` if all frames are pinned.
    pub fn new_page(&self, page_id: PageId) -> Result<PageWriteGuard<'_>> {
        let frame_id = self.get_free_frame()?;
        let frame = &self.frames[frame_id.0];

        frame.reset();
        frame.set_page_id(Some(page_id.clone()));
        frame.pin();

        {
            let mut pt = self.page_table.write();
            pt.insert(page_id.clone(), frame_id);
        }
        {
            let mut replacer = self.replacer.lock();
            replacer.record_access(frame_id);
            replacer.set_evictable(frame_id, false);
        }

        trace!("new_page {page_id}");
        let lock = frame.page_mut();
        Ok(PageWriteGuard::new(self, frame_id, page_id, lock))
    }

    // ========================================================================
    // Public API: Flush pages
    // ========================================================================

    /// Flush a specific page to disk if it's dirty and resident.
    pub fn flush_page(&self, page_id: &PageId) -> Result<()> {
        let frame_id = {
            let pt = self.page_table.read();
            match pt.get(page_id) {
                Some(&fid) => fid,
                None => return Ok(()),
            }
        };
        self.flush_frame(frame_id, page_id)
    }

    /// Flush all dirty, resident pages to disk.
    pub fn flush_all_pages(&self) -> Result<()> {
        let pages: Vec<(PageId, FrameId)> = {
            let pt = self.page_table.read();
            pt.iter().map(|(pid, &fid)| (pid.clone(), fid)).collect()
        };

        for (page_id, frame_id) in pages {
            self.flush_frame(frame_id, &page_id)?;
        }
        Ok(())
    }

    // ========================================================================
    // Public API: Stats and info
    // ========================================================================

    pub fn stats(&self) -> &BufferPoolStats {
        &self.stats
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn free_frame_count(&self) -> usize {
        self.free_list.lock().len()
    }

    pub fn page_count(&self) -> usize {
        self.page_table.read().len()
    }

    // ========================================================================
    // Internal: called by PageGuard on drop
    // ========================================================================

    pub(crate) fn unpin_page_internal(&self, frame_id: FrameId, is_dirty: bool) {
        let frame = &self.frames[frame_id.0];

        if is_dirty {
            frame.mark_dirty();
        }

        let new_pin_count = frame.unpin();
        if new_pin_count == 0 {
            let mut replacer = self.replacer.lock();
            replacer.set_evictable(frame_id, true);
        }
    }

    // ========================================================================
    // Internal: core fetch logic
    // ========================================================================

    fn fetch_page_internal(&self, page_id: &PageId) -> Result<FrameId> {
        {
            let pt = self.page_table.read();
            if let Some(&frame_id) = pt.get(page_id) {
                self.handle_cache_hit(frame_id);
                return Ok(frame_id);
            }
        }
        self.handle_cache_miss(page_id)
    }

    fn handle_cache_hit(&self, frame_id: FrameId) {
        let frame = &self.frames[frame_id.0];
        frame.pin();

        let mut replacer = self.replacer.lock();
        replacer.record_access(frame_id);
        replacer.set_evictable(frame_id, false);

        self.stats.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    fn handle_cache_miss(&self, page_id: &PageId) -> Result<FrameId> {
        self.stats.cache_misses.fetch_add(1, Ordering::Relaxed);

        let frame_id = self.get_free_frame()?;

        let page_data = {
            let dm = self.disk_manager.lock();
            dm.read_page(page_id)?
        };
        self.stats.pages_read.fetch_add(1, Ordering::Relaxed);

        let frame = &self.frames[frame_id.0];
        *frame.page_mut() = page_data;
        frame.set_page_id(Some(page_id.clone()));
        frame.pin();

        {
            let mut pt = self.page_table.write();
            pt.insert(page_id.clone(), frame_id);
        }
        {
            let mut replacer = self.replacer.lock();
            replacer.record_access(frame_id);
            replacer.set_evictable(frame_id, false);
        }

        Ok(frame_id)
    }

    // ========================================================================
    // Internal: frame allocation and eviction
    // ========================================================================

    fn get_free_frame(&self) -> Result<FrameId> {
        {
            let mut fl = self.free_list.lock();
            if let Some(frame_id) = fl.pop() {
                return Ok(frame_id);
            }
        }
        self.evict_page()
    }

    fn evict_page(&self) -> Result<FrameId> {
        let frame_id = {
            let mut replacer = self.replacer.lock();
            replacer.evict().ok_or(Error::BufferPoolExhausted)?
        };

        self.stats.evictions.fetch_add(1, Ordering::Relaxed);

        let frame = &self.frames[frame_id.0];
        let old_page_id = frame.page_id();

        if frame.is_dirty() {
            if let Some(pid) = &old_page_id {
                self.flush_frame(frame_id, pid)?;
            }
        }

        if let Some(pid) = &old_page_id {
            let mut pt = self.page_table.write();
            pt.remove(pid);
            debug!("evicted {pid}");
        }

        frame.clear_dirty();
        frame.set_page_id(None);

        Ok(frame_id)
    }

    fn flush_frame(&self, frame_id: FrameId, page_id: &PageId) -> Result<()> {
        let frame = &self.frames[frame_id.0];

        if frame.is_dirty() {
            let page = frame.page();
            {
                let dm = self.disk_manager.lock();
                dm.write_page(page_id, &page)?;
            }
            drop(page);

            frame.clear_dirty();
            self.stats.pages_written.fetch_add(1, Ordering::Relaxed);
        }
        Ok(())
    }
}

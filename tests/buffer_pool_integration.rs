//! Integration tests for the buffer pool manager against the slotted
//! integer page format.

use lstore::buffer::BufferPoolManager;
use lstore::common::{PageId, PageKind};
use lstore::storage::DiskManager;
use std::sync::Arc;
use tempfile::tempdir;

fn create_bpm(pool_size: usize) -> (BufferPoolManager, tempfile::TempDir) {
    let dir = tempdir().unwrap();
    let dm = DiskManager::open(dir.path()).unwrap();
    (BufferPoolManager::new(pool_size, dm), dir)
}

fn pid(n: u32) -> PageId {
    PageId::new(Arc::from("grades"), 0, n, PageKind::Base)
}

/// Data survives repeated eviction cycles: a small pool forces every
/// page in turn to be written back and later re-read from disk.
#[test]
fn test_data_persistence_across_evictions() {
    let (bpm, _dir) = create_bpm(2);

    for i in 0..5u32 {
        let mut guard = bpm.new_page(pid(i)).unwrap();
        guard.write(i as i64).unwrap();
        guard.write((i as i64) * 3).unwrap();
    }

    for i in 0..5u32 {
        let guard = bpm.fetch_page_read(&pid(i)).unwrap();
        assert_eq!(guard.read(0).unwrap(), i as i64);
        assert_eq!(guard.read(1).unwrap(), (i as i64) * 3);
    }
}

#[test]
fn test_flush_all_pages_persists_across_pool_restart() {
    let dir = tempdir().unwrap();

    {
        let dm = DiskManager::open(dir.path()).unwrap();
        let bpm = BufferPoolManager::new(4, dm);
        let mut guard = bpm.new_page(pid(0)).unwrap();
        guard.write(42).unwrap();
        drop(guard);
        bpm.flush_all_pages().unwrap();
    }

    let dm = DiskManager::open(dir.path()).unwrap();
    let bpm = BufferPoolManager::new(4, dm);
    let guard = bpm.fetch_page_read(&pid(0)).unwrap();
    assert_eq!(guard.read(0).unwrap(), 42);
}

#[test]
fn test_pages_across_distinct_columns_do_not_collide() {
    let (bpm, _dir) = create_bpm(8);

    let col0 = PageId::new(Arc::from("grades"), 0, 0, PageKind::Base);
    let col1 = PageId::new(Arc::from("grades"), 1, 0, PageKind::Base);

    { bpm.new_page(col0.clone()).unwrap().write(111).unwrap(); }
    { bpm.new_page(col1.clone()).unwrap().write(222).unwrap(); }

    assert_eq!(bpm.fetch_page_read(&col0).unwrap().read(0).unwrap(), 111);
    assert_eq!(bpm.fetch_page_read(&col1).unwrap().read(0).unwrap(), 222);
}

//! Configuration constants for lstore.

/// Number of integer slots in a page.
///
/// Every physical column of a table is stored as a sequence of pages of
/// this capacity. A page is append-only except for the in-place
/// overwrite performed by [`crate::table::merge`].
pub const PAGE_CAPACITY: usize = 512;

/// Number of meta columns prefixed to every physical record:
/// `INDIRECTION`, `RID`, `TIMESTAMP`, `SCHEMA`.
pub const META_COLUMN_COUNT: usize = 4;

/// Number of frames in the buffer pool.
///
/// Sized generously relative to `PAGE_CAPACITY` so ordinary test and
/// scenario workloads never hit `BufferPoolExhausted`; callers that need
/// a different size construct their own `BufferPoolManager` directly.
pub const BUFFER_POOL_FRAMES: usize = 64;

/// Whether `Database::close` runs `Table::merge` on every table before
/// flushing. Off by default because merge collapses version history
/// (spec.md §4.7, §9.3).
pub const MERGE_ON_CLOSE: bool = false;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_capacity_reasonable() {
        assert!(PAGE_CAPACITY > 0);
    }

    #[test]
    fn test_meta_column_count() {
        assert_eq!(META_COLUMN_COUNT, 4);
    }
}

//! lstore - a columnar storage engine with versioned reads over a
//! base/tail record model.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                             Database                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │        Query surface (table::query) / Table              │   │
//! │  │   insert · update · delete · select · sum · merge        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │     VersionComposer (table::version) + Index             │   │
//! │  │         indirection-chain walk, PK/secondary index        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Buffer Pool (buffer/)                          │   │
//! │  │   BufferPoolManager + Frame + LruReplacer + Statistics    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │           Storage Layer (storage/)                       │   │
//! │  │          DiskManager + Page (slotted integers)            │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, FrameId, Rid, Error, config)
//! - [`buffer`] - Buffer pool management and LRU eviction
//! - [`storage`] - Disk I/O and the slotted page format
//! - [`index`] - Hash-based secondary and primary-key indexes
//! - [`record`] - The meta-column layout shared by every table
//! - [`table`] - Base/tail records, the version composer, recovery, merge
//! - [`database`] - Table catalog and data-directory lifecycle
//!
//! # Quick start
//! ```no_run
//! use lstore::Database;
//!
//! let mut db = Database::open("my_database").unwrap();
//! db.create_table("grades", 3, 0).unwrap();
//! let grades = db.get_table_mut("grades").unwrap();
//! grades.insert(&[1, 90, 100]).unwrap();
//! grades.update(1, &[None, Some(95), None]).unwrap();
//! assert_eq!(grades.select(1, 0, &[0, 1, 2]).unwrap(), vec![vec![1, 95, 100]]);
//! db.close().unwrap();
//! ```

pub mod buffer;
pub mod common;
pub mod database;
pub mod index;
pub mod record;
pub mod storage;
pub mod table;

pub use common::config::PAGE_CAPACITY;
pub use common::{Error, FrameId, PageId, PageKind, Result, Rid};

pub use buffer::{BufferPoolManager, BufferPoolStats, Frame, StatsSnapshot};
pub use database::Database;
pub use storage::{DiskManager, Page};
pub use table::{Query, Table, TableSchema};

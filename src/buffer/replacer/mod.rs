//! Eviction policy implementations (replacers).
//!
//! Implements [`LruReplacer`], the least-recently-used policy spec.md
//! §4.2 requires among unpinned frames.

mod lru;

pub use lru::LruReplacer;

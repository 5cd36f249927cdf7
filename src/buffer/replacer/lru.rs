//! LRU (Least Recently Used) page replacement policy.
//!
//! Evicts the unpinned frame that was least recently accessed, matching
//! spec.md §4.2's "LRU-like eviction" requirement: among frames with pin
//! count 0, choose the least recently used.

use std::collections::{HashSet, VecDeque};

use crate::common::FrameId;

/// LRU replacement policy.
///
/// Every access moves a frame to the back of the recency queue. Eviction
/// scans from the front (oldest) and returns the first frame that is
/// marked evictable, without disturbing the order of the rest.
pub struct LruReplacer {
    /// Frame IDs in recency order, front = least recently used.
    queue: VecDeque<FrameId>,

    /// Frame IDs currently tracked by the replacer (pinned or not).
    tracked: HashSet<FrameId>,

    /// Frame IDs that are evictable (pin_count == 0).
    evictable: HashSet<FrameId>,
}

impl LruReplacer {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            tracked: HashSet::new(),
            evictable: HashSet::new(),
        }
    }

    /// Record that a frame was accessed, moving it to the most-recently-used
    /// end of the queue.
    pub fn record_access(&mut self, frame_id: FrameId) {
        if self.tracked.contains(&frame_id) {
            if let Some(pos) = self.queue.iter().position(|&f| f == frame_id) {
                self.queue.remove(pos);
            }
        } else {
            self.tracked.insert(frame_id);
        }
        self.queue.push_back(frame_id);
    }

    /// Set whether a frame is evictable (pin_count reached/left zero).
    pub fn set_evictable(&mut self, frame_id: FrameId, evictable: bool) {
        if evictable {
            self.evictable.insert(frame_id);
        } else {
            self.evictable.remove(&frame_id);
        }
    }

    /// Evict the least recently used evictable frame, if any.
    pub fn evict(&mut self) -> Option<FrameId> {
        let position = self
            .queue
            .iter()
            .position(|fid| self.evictable.contains(fid))?;

        let frame_id = self.queue.remove(position)?;
        self.tracked.remove(&frame_id);
        self.evictable.remove(&frame_id);
        Some(frame_id)
    }

    /// Remove a frame from the replacer entirely (e.g. on frame reset).
    pub fn remove(&mut self, frame_id: FrameId) {
        if let Some(pos) = self.queue.iter().position(|&f| f == frame_id) {
            self.queue.remove(pos);
        }
        self.tracked.remove(&frame_id);
        self.evictable.remove(&frame_id);
    }

    pub fn evictable_count(&self) -> usize {
        self.evictable.len()
    }
}

impl Default for LruReplacer {
    fn default() -> Self {
        Self::new()
    }
}

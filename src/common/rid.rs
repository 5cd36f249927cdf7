//! Record identifier type.

use std::fmt;

/// Identifies a record within a single table.
///
/// Base and tail RIDs are drawn from disjoint counters (spec.md §3,
/// "RID space"), so the `base` flag is carried alongside the numeric
/// value rather than relying on, say, sign bits or a shared range.
/// RIDs are never reused (I6) and are only ever compared for equality
/// within the owning table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rid {
    pub value: u64,
    pub base: bool,
}

impl Rid {
    #[inline]
    pub fn base(value: u64) -> Self {
        Self { value, base: true }
    }

    #[inline]
    pub fn tail(value: u64) -> Self {
        Self { value, base: false }
    }

    #[inline]
    pub fn is_base(&self) -> bool {
        self.base
    }

    /// Encode as the signed integer stored in an `INDIRECTION` slot.
    ///
    /// Base and tail RIDs are drawn from disjoint counters starting at 0,
    /// so the raw value alone can't tell them apart once it's sitting in
    /// a page slot. Base RIDs encode as themselves; tail RIDs encode as
    /// `-(value + 1)`, which keeps the two ranges disjoint (including at
    /// value 0) without needing a second field.
    #[inline]
    pub fn encode(&self) -> i64 {
        if self.base {
            self.value as i64
        } else {
            -(self.value as i64) - 1
        }
    }

    /// Inverse of [`Rid::encode`].
    #[inline]
    pub fn decode(raw: i64) -> Self {
        if raw >= 0 {
            Rid::base(raw as u64)
        } else {
            Rid::tail((-raw - 1) as u64)
        }
    }
}

impl fmt::Display for Rid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.base {
            write!(f, "B{}", self.value)
        } else {
            write!(f, "T{}", self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_and_tail_distinct() {
        let b = Rid::base(5);
        let t = Rid::tail(5);
        assert_ne!(b, t);
        assert!(b.is_base());
        assert!(!t.is_base());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Rid::base(1)), "B1");
        assert_eq!(format!("{}", Rid::tail(2)), "T2");
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        for rid in [Rid::base(0), Rid::base(7), Rid::tail(0), Rid::tail(7)] {
            assert_eq!(Rid::decode(rid.encode()), rid);
        }
    }

    #[test]
    fn test_encode_disjoint_ranges() {
        assert_ne!(Rid::base(0).encode(), Rid::tail(0).encode());
    }
}

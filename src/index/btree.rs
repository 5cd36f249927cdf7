//! Ordered index placeholder.
//!
//! spec.md §1 and §4.3 call out a B+-tree-backed index as an optional,
//! pluggable alternative to [`super::HashIndex`] for `locate_range` — out
//! of scope for this core. `HashIndex::locate_range` already satisfies
//! the `Index` contract with a linear scan; swapping in an ordered
//! structure here would not change any caller.

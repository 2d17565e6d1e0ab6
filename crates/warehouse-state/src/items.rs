//! Per-agent item inventory pinned to grid cells.

use rustc_hash::FxHashMap;
use warehouse_core::Pos;

/// A mapping from cell to a strictly positive item count.
///
/// Canonical form: a position is absent iff its count is zero.  All mutation
/// goes through [`add`](ItemMap::add) / [`remove_one`](ItemMap::remove_one),
/// which maintain that invariant, so `count(pos) == 0` and "key absent" are
/// always the same statement.
///
/// Each agent owns its own `ItemMap`; the same physical cell may hold items
/// belonging to several agents at once (distinct virtual inventories).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemMap {
    counts: FxHashMap<Pos, u32>,
}

impl ItemMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Item count at `pos` (zero when absent).
    #[inline]
    pub fn count(&self, pos: Pos) -> u32 {
        self.counts.get(&pos).copied().unwrap_or(0)
    }

    /// Add one item at `pos`.
    pub fn add(&mut self, pos: Pos) {
        *self.counts.entry(pos).or_insert(0) += 1;
    }

    /// Remove one item at `pos`, dropping the key when the count reaches
    /// zero.  Returns `false` (and changes nothing) when no item is there.
    pub fn remove_one(&mut self, pos: Pos) -> bool {
        match self.counts.get_mut(&pos) {
            None => false,
            Some(n) => {
                *n -= 1;
                if *n == 0 {
                    self.counts.remove(&pos);
                }
                true
            }
        }
    }

    /// Iterate `(pos, count)` pairs.  Order is deterministic for identical
    /// operation histories (FxHashMap has no random state).
    pub fn iter(&self) -> impl Iterator<Item = (Pos, u32)> + '_ {
        self.counts.iter().map(|(&p, &n)| (p, n))
    }

    /// Total items across all cells.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Number of distinct cells holding at least one item.
    pub fn cell_count(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

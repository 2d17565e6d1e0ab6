//! Shared free list of reusable search nodes.

use std::sync::Mutex;

use crate::SearchNode;

/// A thread-safe free list amortising node allocation across turns.
///
/// All planner workers share one pool (`Arc<NodePool>`); acquiring and
/// returning nodes are their only cross-thread operations.  Nodes are reset
/// on release, so a pooled node is indistinguishable from a fresh one —
/// reuse is observationally transparent.
#[derive(Default)]
pub struct NodePool {
    free: Mutex<Vec<Box<SearchNode>>>,
}

impl NodePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a zeroed node, reusing a returned one when available.
    pub fn acquire(&self) -> Box<SearchNode> {
        self.free
            .lock()
            .expect("node pool poisoned")
            .pop()
            .unwrap_or_default()
    }

    /// Reset `node` and make it available for reuse.
    pub fn release(&self, mut node: Box<SearchNode>) {
        node.reset();
        self.free.lock().expect("node pool poisoned").push(node);
    }

    /// Number of nodes currently waiting for reuse.
    pub fn idle(&self) -> usize {
        self.free.lock().expect("node pool poisoned").len()
    }
}

//! Per-agent local state.

use warehouse_core::Pos;

/// One agent's local state: where it is and whether it carries an item.
///
/// Doubles as the planner lattice key, so it stays `Copy + Hash + Eq` and
/// small (6 bytes).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct AgentState {
    pub pos:      Pos,
    pub has_item: bool,
}

impl AgentState {
    #[inline]
    pub const fn new(pos: Pos, has_item: bool) -> Self {
        AgentState { pos, has_item }
    }
}

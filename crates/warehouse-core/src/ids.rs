//! Agent identifiers.

/// An agent's index in the population.
///
/// Agents are numbered `0..num_agents` once at simulator start and the
/// population never changes, so the id is simultaneously the subscript into
/// every per-agent array: joint states, item maps, the three counters, and
/// the planner RNG streams.  There is no "unset" id — every `AgentId` in
/// circulation names a live agent.
///
/// The inner integer is `pub` so call sites that already hold a loop index
/// can build an id directly with `AgentId(i as u32)`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct AgentId(pub u32);

impl AgentId {
    /// The subscript this id denotes in the per-agent arrays.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

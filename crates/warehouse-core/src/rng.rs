//! Seeded random number streams.
//!
//! Randomness enters the simulator at three points: initial agent
//! placement, item spawning inside the transition kernel, and the uniform
//! tie-breaking of the greedy rollout policy.  The first two belong to the
//! episode loop; the third runs inside the planner workers, which Rayon
//! schedules in whatever order it likes.
//!
//! To keep an episode bit-reproducible anyway, the streams are split by
//! owner rather than shared:
//!
//! - the episode loop holds a single [`SimRng`] for everything that touches
//!   ground truth;
//! - each agent's planner draws from its own [`AgentRng`], derived from the
//!   run seed and the agent id alone.
//!
//! A `par_iter_mut` worker mutates exactly one `AgentRng` and nothing else,
//! so thread scheduling can reorder the *work* but never the *draws*: the
//! joint action computed for a given turn is a pure function of the run
//! seed.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::AgentId;

/// Multiplier that spreads consecutive agent ids across the whole 64-bit
/// seed space (the golden-ratio increment used by splitmix64).
const SEED_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// The random stream of one agent's planner.
///
/// The simulator owns a `Vec<AgentRng>` parallel to its other per-agent
/// arrays and lends element `i` to the worker planning for agent `i`.  The
/// derivation depends only on `(run_seed, agent)`, so every agent's stream
/// is fixed the moment the run seed is — no stream shifts when workers
/// finish in a different order.
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(run_seed: u64, agent: AgentId) -> Self {
        // Offset by one so agent 0 does not reuse the bare run seed (which
        // already drives the SimRng).
        let mix = (agent.0 as u64 + 1).wrapping_mul(SEED_SPREAD);
        AgentRng(SmallRng::seed_from_u64(run_seed.wrapping_add(mix)))
    }

    /// Uniform pick from a candidate slice — how the rollout policy breaks
    /// ties between equally good moves.  `None` only on an empty slice,
    /// which the callers rule out (`Stay` keeps the legal set non-empty).
    #[inline]
    pub fn choose<'a, T>(&mut self, candidates: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        candidates.choose(&mut self.0)
    }

    /// The raw generator, handed to the transition kernel for its simulated
    /// item spawns.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// The episode loop's own stream: start-cell placement, ground-truth item
/// spawns, and the `RANDOM` exchange strategies.
///
/// Never crosses a thread boundary — planner workers use [`AgentRng`]
/// streams instead.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform value in `range` (floor-cell indices, bidder picks).
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// The raw generator, handed to the transition kernel when the real
    /// state advances.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}

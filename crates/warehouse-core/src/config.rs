//! Run configuration.
//!
//! Loaded from a JSON file by the CLI and passed (shared, read-only) to the
//! simulator and every planner.  All knobs that shape an episode live here;
//! nothing is read from the environment.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

// ── Exchange strategies ───────────────────────────────────────────────────────

/// How an over-loaded agent picks which pending item to offer.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum RequestStrategy {
    #[default]
    #[serde(rename = "NEAREST_FROM_DEPOT")]
    NearestFromDepot,
    #[serde(rename = "FARTHEST_FROM_DEPOT")]
    FarthestFromDepot,
    #[serde(rename = "RANDOM")]
    Random,
}

/// How an under-loaded agent picks which outstanding request to bid on.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum AcceptStrategy {
    #[default]
    #[serde(rename = "NEAREST_FROM_DEPOT")]
    NearestFromDepot,
    #[serde(rename = "FARTHEST_FROM_DEPOT")]
    FarthestFromDepot,
    #[serde(rename = "RANDOM")]
    Random,
}

/// How a request's originator picks the final acceptor among the bidders.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum NominateStrategy {
    #[default]
    #[serde(rename = "LOWEST_LOAD")]
    LowestLoad,
    #[serde(rename = "HIGHEST_LOAD")]
    HighestLoad,
    #[serde(rename = "RANDOM")]
    Random,
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration (JSON, camelCase keys).
///
/// `validate()` must be called once after deserialization; every other
/// consumer may then assume the documented ranges hold.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimConfig {
    /// Number of agents sharing the grid.  ≥ 1.
    pub num_agents: usize,

    /// Episode length in turns.  ≥ 1.
    pub last_turn: u32,

    /// Per-agent, per-turn probability of a new item spawning.  In [0, 1].
    pub new_item_prob: f64,

    /// MCTS iterations per planning call.  ≥ 1.
    pub num_iters: u32,

    /// Search horizon in turns.  ≥ 1.
    pub max_depth: u32,

    /// Visits before a lattice node stops promoting agents to rollout.  ≥ 1.
    /// With 1, every newly seen state is expanded immediately.
    pub expand_thresh: u32,

    /// Reward for a successful `PICKUP`.
    pub pickup_reward: f64,

    /// Reward for a successful `CLEAR` at the depot.
    pub clear_reward: f64,

    /// Reward (typically negative) added to every collided agent.
    pub penalty: f64,

    /// Reward added on `STAY`.  Default 0.
    #[serde(default)]
    pub stay_penalty: f64,

    /// Geometric discount per search depth step.  In (0, 1].
    pub discount_factor: f64,

    /// Recency weighting of node statistics.  In (0, 1]; 1 disables decay.
    #[serde(default = "default_decay_rate")]
    pub decay_rate: f64,

    /// Master RNG seed.  Run `k` of a batch re-seeds with `rand_seed + k`.
    pub rand_seed: i64,

    /// Run the item-exchange phase before each planning round.
    #[serde(default, alias = "enableLoadBalance")]
    pub enable_exchange: bool,

    #[serde(default)]
    pub request_strategy: RequestStrategy,

    #[serde(default)]
    pub accept_strategy: AcceptStrategy,

    #[serde(default)]
    pub nominate_strategy: NominateStrategy,
}

fn default_decay_rate() -> f64 {
    1.0
}

impl SimConfig {
    /// Check every field against its documented range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn at_least_one(field: &'static str, got: i64) -> Result<(), ConfigError> {
            if got < 1 {
                return Err(ConfigError::TooSmall { field, got });
            }
            Ok(())
        }

        at_least_one("numAgents", self.num_agents as i64)?;
        at_least_one("lastTurn", self.last_turn as i64)?;
        at_least_one("numIters", self.num_iters as i64)?;
        at_least_one("maxDepth", self.max_depth as i64)?;
        at_least_one("expandThresh", self.expand_thresh as i64)?;

        if !(0.0..=1.0).contains(&self.new_item_prob) {
            return Err(ConfigError::OutOfRange {
                field: "newItemProb",
                range: "[0, 1]",
                got:   self.new_item_prob,
            });
        }
        if !(self.discount_factor > 0.0 && self.discount_factor <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "discountFactor",
                range: "(0, 1]",
                got:   self.discount_factor,
            });
        }
        if !(self.decay_rate > 0.0 && self.decay_rate <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "decayRate",
                range: "(0, 1]",
                got:   self.decay_rate,
            });
        }
        Ok(())
    }

    /// The seed for run `k` of a batch.
    #[inline]
    pub fn run_seed(&self, run: u32) -> u64 {
        (self.rand_seed as u64).wrapping_add(run as u64)
    }
}

//! The `Simulator` struct and its turn loop.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info};

use warehouse_core::{Action, AgentId, AgentRng, SimConfig, SimRng};
use warehouse_map::MapIndex;
use warehouse_plan::{NodePool, Planner};
use warehouse_state::{AgentState, ItemMap, step};

use crate::exchange::run_exchange;
use crate::{RunSummary, SimError, SimResult};

/// Owns the ground-truth world state and drives one episode.
///
/// All fields are `pub`: tests and the trace dump read them directly, and
/// nothing outside the turn loop mutates them.
pub struct Simulator {
    pub cfg:  SimConfig,
    pub map:  Arc<MapIndex>,
    pub turn: u32,

    /// Ground-truth joint state, indexed by agent.
    pub states: Vec<AgentState>,
    /// Ground-truth per-agent inventories.
    pub items:  Vec<ItemMap>,
    /// The joint action applied on the previous turn (empty before turn 1).
    pub last_actions: Vec<Action>,

    // ── Running counters ──────────────────────────────────────────────────
    pub items_count:  Vec<u64>,
    pub pickup_count: Vec<u64>,
    pub clear_count:  Vec<u64>,

    // ── Randomness ────────────────────────────────────────────────────────
    /// Ground-truth stream (spawns, initial placement, exchange).
    pub sim_rng: SimRng,
    /// One independent stream per agent's planner.
    pub agent_rngs: Vec<AgentRng>,

    /// Search-node free list shared by all planner workers.
    pub pool: Arc<NodePool>,
}

impl Simulator {
    /// Set up an episode: distinct random start cells, empty inventories,
    /// per-agent planner streams seeded from `seed`.
    pub fn new(cfg: SimConfig, map: Arc<MapIndex>, seed: u64) -> SimResult<Simulator> {
        let n = cfg.num_agents;
        let floor = map.floor_cells();
        if n > floor.len() {
            return Err(SimError::TooManyAgents { agents: n, floor: floor.len() });
        }

        let mut sim_rng = SimRng::new(seed);
        let mut used = vec![false; floor.len()];
        let mut states = Vec::with_capacity(n);
        for _ in 0..n {
            let start = loop {
                let idx = sim_rng.gen_range(0..floor.len());
                if !used[idx] {
                    used[idx] = true;
                    break floor[idx];
                }
            };
            states.push(AgentState::new(start, false));
        }

        let agent_rngs = (0..n as u32).map(|i| AgentRng::new(seed, AgentId(i))).collect();

        Ok(Simulator {
            cfg,
            map,
            turn: 0,
            states,
            items: vec![ItemMap::new(); n],
            last_actions: Vec::new(),
            items_count: vec![0; n],
            pickup_count: vec![0; n],
            clear_count: vec![0; n],
            sim_rng,
            agent_rngs,
            pool: Arc::new(NodePool::new()),
        })
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.turn >= self.cfg.last_turn
    }

    // ── Planning phase ────────────────────────────────────────────────────

    /// Run every agent's planner to its iteration budget and collect the
    /// recommended joint action.
    ///
    /// Workers share only the read-only map/config snapshot and the node
    /// pool; each owns its lattices and RNG stream, so no synchronisation
    /// is needed and the result is independent of scheduling.
    pub fn plan_actions(&mut self) -> Vec<Action> {
        let map = &*self.map;
        let cfg = &self.cfg;
        let pool = &*self.pool;
        let states = &self.states;
        let items = &self.items;
        let turn = self.turn;

        let planned: Vec<(Action, f64)> = self
            .agent_rngs
            .par_iter_mut()
            .enumerate()
            .map(|(i, rng)| {
                let mut planner = Planner::new(map, cfg, rng, pool, cfg.new_item_prob);
                for k in 0..cfg.num_iters {
                    planner.update(turn, states, items, k);
                }
                let best = planner.best_action(i, states[i], &items[i]);
                planner.free();
                best
            })
            .collect();

        for (i, &(action, value)) in planned.iter().enumerate() {
            debug!(turn, agent = i, %action, value, "planned");
        }
        planned.into_iter().map(|(action, _)| action).collect()
    }

    // ── Ground-truth transition ───────────────────────────────────────────

    /// Apply `actions` to the real state and update the counters.
    pub fn advance(&mut self, actions: &[Action]) -> SimResult<()> {
        let n = self.cfg.num_agents;
        if actions.len() != n {
            return Err(SimError::ActionCountMismatch { expected: n, got: actions.len() });
        }

        let skip = vec![false; n];
        let result = step(
            &self.states,
            actions,
            &skip,
            &mut self.items,
            &self.map,
            &self.cfg,
            self.cfg.new_item_prob,
            self.sim_rng.inner(),
        );
        for (i, outcome) in result.outcomes.iter().enumerate() {
            if outcome.new_item {
                self.items_count[i] += 1;
            }
            if outcome.picked_up {
                self.pickup_count[i] += 1;
            }
            if outcome.cleared {
                self.clear_count[i] += 1;
            }
        }
        self.states = result.next_states;
        self.last_actions = actions.to_vec();
        self.turn += 1;
        Ok(())
    }

    // ── Turn and episode drivers ──────────────────────────────────────────

    /// One full turn: optional exchange, parallel planning, transition.
    pub fn run_turn(&mut self) -> SimResult<()> {
        if self.cfg.enable_exchange {
            let transfers = run_exchange(
                &self.states,
                &mut self.items,
                &mut self.items_count,
                &self.map,
                &self.cfg,
                &mut self.sim_rng,
            );
            if !transfers.is_empty() {
                debug!(turn = self.turn, count = transfers.len(), "exchange round");
            }
        }
        let actions = self.plan_actions();
        self.advance(&actions)
    }

    /// Drive the episode to `last_turn` and report the final counters.
    pub fn run(&mut self) -> SimResult<RunSummary> {
        while !self.is_done() {
            self.run_turn()?;
        }
        let summary = self.summary();
        info!(
            items = summary.total_items(),
            clears = summary.total_clears(),
            clear_rate = summary.total_clear_rate(),
            "episode finished"
        );
        Ok(summary)
    }

    /// Snapshot of the running counters.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            items_count:  self.items_count.clone(),
            pickup_count: self.pickup_count.clone(),
            clear_count:  self.clear_count.clone(),
        }
    }
}

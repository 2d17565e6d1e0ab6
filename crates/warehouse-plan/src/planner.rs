//! The Factored-UCT planner.
//!
//! One planner instance serves one *real* agent for one turn, but internally
//! simulates every agent: each simulated agent owns an independent lattice
//! of [`SearchNode`]s indexed by `(depth, local state)`.  Joint actions are
//! never enumerated — agents are coupled only through the shared transition
//! kernel, which keeps the node count linear in the local-state space.
//!
//! Planners are single-use: construct, run `num_iters` iterations via
//! [`update`](Planner::update), read [`best_action`](Planner::best_action),
//! then [`free`](Planner::free) the nodes back to the pool.

use rustc_hash::FxHashMap;

use warehouse_core::{Action, AgentRng, Pos, SimConfig};
use warehouse_map::MapIndex;
use warehouse_state::{AgentState, ItemMap, step};

use crate::{NodePool, SearchNode, greedy, legal_actions};

/// Per-depth, per-local-state statistics for one simulated agent.
type Lattice = Vec<FxHashMap<AgentState, Box<SearchNode>>>;

pub struct Planner<'a> {
    /// `lattices[agent][depth][state]` — every simulated agent's tree.
    pub(crate) lattices: Vec<Lattice>,
    map:           &'a MapIndex,
    cfg:           &'a SimConfig,
    rng:           &'a mut AgentRng,
    pool:          &'a NodePool,
    new_item_prob: f64,
}

impl<'a> Planner<'a> {
    pub fn new(
        map:           &'a MapIndex,
        cfg:           &'a SimConfig,
        rng:           &'a mut AgentRng,
        pool:          &'a NodePool,
        new_item_prob: f64,
    ) -> Self {
        Planner {
            lattices: (0..cfg.num_agents).map(|_| Lattice::new()).collect(),
            map,
            cfg,
            rng,
            pool,
            new_item_prob,
        }
    }

    /// Run one MCTS iteration rooted at the current real state.
    ///
    /// The caller's item maps are never mutated — each iteration simulates on
    /// its own copies.
    pub fn update(&mut self, turn: u32, states: &[AgentState], items: &[ItemMap], iter_idx: u32) {
        debug_assert_eq!(states.len(), self.cfg.num_agents);
        let mut items_copy = items.to_vec();
        let rollout = vec![false; states.len()];
        let mut targets = vec![Pos::NONE; states.len()];
        self.descend(turn, 0, states, &mut items_copy, &rollout, &mut targets, iter_idx);
    }

    /// The recommended root action for agent `id` and its expected reward.
    pub fn best_action(&self, id: usize, state: AgentState, items: &ItemMap) -> (Action, f64) {
        let valid = legal_actions(state, items, self.map);
        match self.lattices[id].first().and_then(|root| root.get(&state)) {
            Some(node) => node.best_action(&valid),
            // Root never visited (zero-iteration planner): fall back to the
            // first legal action rather than dividing by zero.
            None => (valid[0], 0.0),
        }
    }

    /// Return every owned node to the pool.  Consumes the planner — a freed
    /// planner must not be reused.
    pub fn free(self) {
        let pool = self.pool;
        for lattice in self.lattices {
            for level in lattice {
                for (_, node) in level {
                    pool.release(node);
                }
            }
        }
    }

    // ── One recursive descent step ────────────────────────────────────────

    /// Advance the simulated joint state by one depth level and
    /// back-propagate discounted returns on unwind.
    ///
    /// `rollout[i]` marks agents already promoted to rollout in this
    /// iteration; they skip the lattice entirely and act greedily.
    #[allow(clippy::too_many_arguments)]
    fn descend(
        &mut self,
        turn:     u32,
        depth:    u32,
        states:   &[AgentState],
        items:    &mut [ItemMap],
        rollout:  &[bool],
        targets:  &mut [Pos],
        iter_idx: u32,
    ) -> Vec<f64> {
        let n = states.len();
        if turn == self.cfg.last_turn || depth == self.cfg.max_depth {
            return vec![0.0; n];
        }
        let d = depth as usize;
        let map = self.map;
        let cfg = self.cfg;
        let pool = self.pool;

        let mut next_rollout = rollout.to_vec();
        let mut actions = vec![Action::Stay; n];
        for i in 0..n {
            let state = states[i];
            if !rollout[i] {
                let lattice = &mut self.lattices[i];
                while lattice.len() <= d {
                    lattice.push(FxHashMap::default());
                }
                let node = lattice[d].entry(state).or_insert_with(|| pool.acquire());
                if node.rollout_cnt < cfg.expand_thresh {
                    node.rollout_cnt += 1;
                    next_rollout[i] = true;
                }
            }
            if next_rollout[i] {
                actions[i] = greedy(i, states, items, targets, map, self.rng);
            } else {
                let valid = legal_actions(state, &items[i], map);
                actions[i] = self.lattices[i][d][&state].select(&valid);
            }
        }

        // Rollout agents step as ghosts: no collisions against the tree.
        let result = step(
            states,
            &actions,
            &next_rollout,
            items,
            map,
            cfg,
            self.new_item_prob,
            self.rng.inner(),
        );
        let mut returns = self.descend(
            turn + 1,
            depth + 1,
            &result.next_states,
            items,
            &next_rollout,
            targets,
            iter_idx,
        );

        for i in 0..n {
            returns[i] = result.rewards[i] + cfg.discount_factor * returns[i];
            if !rollout[i] {
                let node = self.lattices[i][d]
                    .get_mut(&states[i])
                    .expect("tree-bound agent always has a node at this depth");
                node.apply_decay(iter_idx, cfg.decay_rate);
                node.record(actions[i], returns[i]);
            }
        }
        returns
    }
}

//! Per-(agent, depth, state) search statistics and the UCB1 rule.

use warehouse_core::Action;

/// Accumulated statistics for one lattice entry.
///
/// All fields are `pub` for direct access on the planner's hot path.  A node
/// is only ever touched by the planner thread that owns its lattice.
#[derive(Clone, Debug, Default)]
pub struct SearchNode {
    /// Discounted-return sum per action.
    pub cum_reward:  [f64; Action::COUNT],
    /// Selection count per action (f64: decay scales it fractionally).
    pub select_cnt:  [f64; Action::COUNT],
    /// Total visits; equals `Σ select_cnt` after every back-propagation.
    pub total_cnt:   f64,
    /// Iterations that reached this node while still tree-bound — drives the
    /// visit-N-times-then-expand policy.
    pub rollout_cnt: u32,
    /// Iteration index of the latest back-propagation (decay bookkeeping).
    pub last_update: u32,
}

impl SearchNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// UCB1 score of `action`: `+∞` while unvisited, otherwise
    /// mean reward plus the exploration bonus.
    pub fn ucb1(&self, action: Action) -> f64 {
        let cnt = self.select_cnt[action.index()];
        if cnt == 0.0 {
            return f64::INFINITY;
        }
        self.cum_reward[action.index()] / cnt + (2.0 * self.total_cnt.ln() / cnt).sqrt()
    }

    /// The first UCB1-argmax over `actions` (deterministic for fixed input).
    pub fn select(&self, actions: &[Action]) -> Action {
        let mut chosen = actions[0];
        let mut best = f64::NEG_INFINITY;
        for &action in actions {
            let score = self.ucb1(action);
            if score > best {
                best = score;
                chosen = action;
            }
        }
        chosen
    }

    /// The most-selected action over `actions` and its mean reward — the
    /// recommendation reported after the iteration budget is spent.
    pub fn best_action(&self, actions: &[Action]) -> (Action, f64) {
        let mut chosen = actions[0];
        let mut best = f64::NEG_INFINITY;
        for &action in actions {
            let cnt = self.select_cnt[action.index()];
            if cnt > best {
                best = cnt;
                chosen = action;
            }
        }
        let cnt = self.select_cnt[chosen.index()];
        let mean = if cnt > 0.0 {
            self.cum_reward[chosen.index()] / cnt
        } else {
            0.0
        };
        (chosen, mean)
    }

    /// Geometrically age the statistics toward iteration `iter_idx`.
    ///
    /// Multiplies every counter and reward sum by `rate^(iter_idx −
    /// last_update)`, making the statistics recency-weighted.  `rate == 1`
    /// leaves the numbers untouched (and keeps `total_cnt == Σ select_cnt`
    /// exact).
    pub fn apply_decay(&mut self, iter_idx: u32, rate: f64) {
        if rate < 1.0 {
            let factor = rate.powi((iter_idx - self.last_update) as i32);
            self.total_cnt *= factor;
            for a in 0..Action::COUNT {
                self.select_cnt[a] *= factor;
                self.cum_reward[a] *= factor;
            }
        }
        self.last_update = iter_idx;
    }

    /// Incorporate one back-propagated sample.
    pub fn record(&mut self, action: Action, reward: f64) {
        self.total_cnt += 1.0;
        self.select_cnt[action.index()] += 1.0;
        self.cum_reward[action.index()] += reward;
    }

    /// Zero everything so the node can go back to the pool.
    pub fn reset(&mut self) {
        *self = SearchNode::default();
    }
}

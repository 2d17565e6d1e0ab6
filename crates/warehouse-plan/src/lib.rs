//! `warehouse-plan` — the decentralised Monte-Carlo planner.
//!
//! Each agent runs its own [`Planner`] every turn: an iteration-bounded MCTS
//! over a depth-indexed lattice of per-state statistics, one lattice per
//! *simulated* agent (Factored UCT).  Other agents are approximated by the
//! greedy rollout policy; coupling happens only through the shared
//! transition kernel.
//!
//! | Module      | Contents                                             |
//! |-------------|------------------------------------------------------|
//! | [`greedy`]  | legal-action set, greedy navigator (rollout policy)  |
//! | [`node`]    | `SearchNode` — UCB1 statistics + time decay          |
//! | [`pool`]    | `NodePool` — thread-safe free list of search nodes   |
//! | [`planner`] | `Planner` — iteration driver, descent, backprop      |

pub mod greedy;
pub mod node;
pub mod planner;
pub mod pool;


pub use greedy::{greedy, legal_actions};
pub use node::SearchNode;
pub use planner::Planner;
pub use pool::NodePool;

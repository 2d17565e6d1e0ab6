//! `warehouse-sim` — the episode driver.
//!
//! # Turn structure
//!
//! ```text
//! for turn in 0..last_turn:
//!   ① Exchange  — (optional) over-loaded agents hand one pending item to
//!                 under-loaded ones.
//!   ② Plan      — one single-use Planner per agent, run in parallel on
//!                 Rayon's pool; each reports its best root action.
//!   ③ Advance   — the transition kernel applies the joint action to ground
//!                 truth with the simulator's own RNG; counters update.
//! ```
//!
//! The simulator owns the ground-truth joint state and item maps; planners
//! receive immutable snapshots and their own deterministic RNG streams, so
//! the whole episode is reproducible from one seed regardless of thread
//! scheduling.

pub mod dump;
pub mod error;
pub mod exchange;
pub mod sim;
pub mod summary;


pub use error::{SimError, SimResult};
pub use exchange::{Transfer, agent_load, run_exchange};
pub use sim::Simulator;
pub use summary::RunSummary;

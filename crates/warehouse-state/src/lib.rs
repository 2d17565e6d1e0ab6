//! `warehouse-state` — agent state, item inventories, and the joint
//! transition kernel.
//!
//! The kernel ([`step`]) is the single shared model of the world: the
//! simulator calls it once per turn on ground truth, and every planner calls
//! it thousands of times per turn on simulated copies.  Both sides see
//! identical semantics — collision resolution, inventory updates, and item
//! spawning — which is what makes the search's value estimates meaningful.

pub mod items;
pub mod kernel;
pub mod state;

#[cfg(test)]
mod tests;

pub use items::ItemMap;
pub use kernel::{StepOutcome, StepResult, step};
pub use state::AgentState;

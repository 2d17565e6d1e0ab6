//! `warehouse-core` — foundational types for the warehouse simulator.
//!
//! This crate is a dependency of every other `warehouse-*` crate.  It
//! intentionally has no `warehouse-*` dependencies and minimal external ones
//! (`rand`, `serde`, `thiserror`).
//!
//! # What lives here
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`ids`]    | `AgentId`                                              |
//! | [`pos`]    | `Pos` grid coordinate + `NONE` sentinel                |
//! | [`action`] | `Action` enum (moves, stay, pickup, clear)             |
//! | [`rng`]    | `AgentRng` (per-agent), `SimRng` (simulation-level)    |
//! | [`config`] | `SimConfig`, exchange strategy enums, validation       |
//! | [`error`]  | `ConfigError`                                          |

pub mod action;
pub mod config;
pub mod error;
pub mod ids;
pub mod pos;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use action::Action;
pub use config::{AcceptStrategy, NominateStrategy, RequestStrategy, SimConfig};
pub use error::ConfigError;
pub use ids::AgentId;
pub use pos::Pos;
pub use rng::{AgentRng, SimRng};

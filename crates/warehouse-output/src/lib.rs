//! `warehouse-output` — turning run summaries into something readable.
//!
//! | Module     | Contents                                                |
//! |------------|---------------------------------------------------------|
//! | [`report`] | per-run report, `Aggregate` (mean/variance across runs) |
//! | [`csv`]    | `SummaryCsvWriter` — one row per (run, agent)           |
//! | [`error`]  | `OutputError`                                           |

pub mod csv;
pub mod error;
pub mod report;

#[cfg(test)]
mod tests;

pub use csv::SummaryCsvWriter;
pub use error::{OutputError, OutputResult};
pub use report::{Aggregate, Stats, render_report};

//! Human-readable run reports and cross-run aggregation.

use std::fmt::Write;

use warehouse_sim::RunSummary;

/// Mean and population variance of one metric across runs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stats {
    pub mean:     f64,
    pub variance: f64,
}

impl Stats {
    fn from_values(values: &[f64]) -> Stats {
        if values.is_empty() {
            return Stats { mean: 0.0, variance: 0.0 };
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
        Stats { mean, variance }
    }
}

/// Render one run's outcome: each agent's counters and rate, then the total.
pub fn render_report(run: u32, summary: &RunSummary) -> String {
    let mut out = String::new();
    writeln!(out, "=== RUN {run} ===").unwrap();
    for i in 0..summary.num_agents() {
        writeln!(
            out,
            "agent {i}: items {} pickups {} clears {} clear rate {:.3}",
            summary.items_count[i],
            summary.pickup_count[i],
            summary.clear_count[i],
            summary.clear_rate(i),
        )
        .unwrap();
    }
    writeln!(
        out,
        "total:   items {} pickups {} clears {} clear rate {:.3}",
        summary.total_items(),
        summary.total_pickups(),
        summary.total_clears(),
        summary.total_clear_rate(),
    )
    .unwrap();
    out
}

/// Accumulates run summaries and reports mean/variance per agent and for
/// the total, for each of: items generated, clears, clear rate.
pub struct Aggregate {
    num_agents: usize,
    runs:       Vec<RunSummary>,
}

impl Aggregate {
    pub fn new(num_agents: usize) -> Self {
        Aggregate { num_agents, runs: Vec::new() }
    }

    pub fn push(&mut self, summary: RunSummary) {
        debug_assert_eq!(summary.num_agents(), self.num_agents);
        self.runs.push(summary);
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    fn collect<F: Fn(&RunSummary) -> f64>(&self, f: F) -> Stats {
        let values: Vec<f64> = self.runs.iter().map(f).collect();
        Stats::from_values(&values)
    }

    pub fn agent_items(&self, i: usize) -> Stats {
        self.collect(|s| s.items_count[i] as f64)
    }

    pub fn agent_clears(&self, i: usize) -> Stats {
        self.collect(|s| s.clear_count[i] as f64)
    }

    pub fn agent_clear_rate(&self, i: usize) -> Stats {
        self.collect(|s| s.clear_rate(i))
    }

    pub fn total_items(&self) -> Stats {
        self.collect(|s| s.total_items() as f64)
    }

    pub fn total_clears(&self) -> Stats {
        self.collect(|s| s.total_clears() as f64)
    }

    pub fn total_clear_rate(&self) -> Stats {
        self.collect(|s| s.total_clear_rate())
    }

    /// Render the aggregate block printed after all runs.
    pub fn render(&self) -> String {
        let mut out = String::new();
        writeln!(out, "=== AGGREGATE over {} runs ===", self.len()).unwrap();
        for i in 0..self.num_agents {
            let items = self.agent_items(i);
            let clears = self.agent_clears(i);
            let rate = self.agent_clear_rate(i);
            writeln!(
                out,
                "agent {i}: items {:.2} (var {:.2}) clears {:.2} (var {:.2}) \
                 clear rate {:.3} (var {:.4})",
                items.mean, items.variance, clears.mean, clears.variance,
                rate.mean, rate.variance,
            )
            .unwrap();
        }
        let items = self.total_items();
        let clears = self.total_clears();
        let rate = self.total_clear_rate();
        writeln!(
            out,
            "total:   items {:.2} (var {:.2}) clears {:.2} (var {:.2}) \
             clear rate {:.3} (var {:.4})",
            items.mean, items.variance, clears.mean, clears.variance,
            rate.mean, rate.variance,
        )
        .unwrap();
        out
    }
}

//! Unit tests for warehouse-output.

use warehouse_sim::RunSummary;

use crate::{Aggregate, SummaryCsvWriter, render_report};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn summary(items: Vec<u64>, pickups: Vec<u64>, clears: Vec<u64>) -> RunSummary {
    RunSummary {
        items_count:  items,
        pickup_count: pickups,
        clear_count:  clears,
    }
}

// ── Per-run report ────────────────────────────────────────────────────────────

#[cfg(test)]
mod report {
    use super::*;

    #[test]
    fn lists_each_agent_and_the_total() {
        let text = render_report(2, &summary(vec![4, 2], vec![3, 1], vec![2, 1]));
        assert!(text.contains("=== RUN 2 ==="));
        assert!(text.contains("agent 0: items 4 pickups 3 clears 2 clear rate 0.500"));
        assert!(text.contains("agent 1: items 2 pickups 1 clears 1 clear rate 0.500"));
        assert!(text.contains("total:   items 6 pickups 4 clears 3 clear rate 0.500"));
    }
}

// ── Aggregate ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod aggregate {
    use super::*;

    #[test]
    fn mean_and_variance_across_runs() {
        let mut agg = Aggregate::new(1);
        agg.push(summary(vec![2], vec![2], vec![2])); // rate 1.0
        agg.push(summary(vec![4], vec![2], vec![2])); // rate 0.5
        assert_eq!(agg.len(), 2);

        let items = agg.agent_items(0);
        assert_eq!(items.mean, 3.0);
        assert_eq!(items.variance, 1.0);

        let rate = agg.agent_clear_rate(0);
        assert_eq!(rate.mean, 0.75);
        assert_eq!(rate.variance, 0.0625);

        let total = agg.total_clear_rate();
        assert_eq!(total.mean, 0.75);
    }

    #[test]
    fn single_run_has_zero_variance() {
        let mut agg = Aggregate::new(2);
        agg.push(summary(vec![3, 1], vec![2, 1], vec![1, 0]));
        assert_eq!(agg.agent_items(0).variance, 0.0);
        assert_eq!(agg.total_clears().mean, 1.0);
    }

    #[test]
    fn render_mentions_every_agent() {
        let mut agg = Aggregate::new(2);
        agg.push(summary(vec![3, 1], vec![2, 1], vec![1, 0]));
        let text = agg.render();
        assert!(text.contains("=== AGGREGATE over 1 runs ==="));
        assert!(text.contains("agent 0:"));
        assert!(text.contains("agent 1:"));
        assert!(text.contains("total:"));
    }
}

// ── CSV writer ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_writer {
    use super::*;

    #[test]
    fn writes_header_agent_rows_and_total_row() {
        let mut writer = SummaryCsvWriter::from_writer(Vec::new()).unwrap();
        writer
            .write_run(0, &summary(vec![4, 2], vec![3, 1], vec![2, 1]))
            .unwrap();
        writer.finish().unwrap();

        let lines: Vec<String> = {
            let bytes = writer.into_inner().unwrap();
            String::from_utf8(bytes).unwrap().lines().map(String::from).collect()
        };
        assert_eq!(lines[0], "run,agent,items,pickups,clears,clear_rate");
        assert_eq!(lines[1], "0,0,4,3,2,0.500");
        assert_eq!(lines[2], "0,1,2,1,1,0.500");
        assert_eq!(lines[3], "0,total,6,4,3,0.500");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn finish_is_idempotent() {
        let mut writer = SummaryCsvWriter::from_writer(Vec::new()).unwrap();
        writer.finish().unwrap();
        writer.finish().unwrap();
    }
}

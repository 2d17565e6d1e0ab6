//! CSV export of run summaries.
//!
//! One file, one row per (run, agent) plus a `total` row per run:
//!
//! ```text
//! run,agent,items,pickups,clears,clear_rate
//! 0,0,12,9,8,0.667
//! 0,total,24,17,15,0.625
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use warehouse_sim::RunSummary;

use crate::OutputResult;

/// Streams run summaries into a CSV file (or any writer).
pub struct SummaryCsvWriter<W: Write> {
    inner:    Writer<W>,
    finished: bool,
}

impl SummaryCsvWriter<File> {
    /// Create the file at `path` and write the header row.
    pub fn from_path(path: &Path) -> OutputResult<Self> {
        Self::from_writer(File::create(path)?)
    }
}

impl<W: Write> SummaryCsvWriter<W> {
    pub fn from_writer(writer: W) -> OutputResult<Self> {
        let mut inner = Writer::from_writer(writer);
        inner.write_record(["run", "agent", "items", "pickups", "clears", "clear_rate"])?;
        Ok(Self { inner, finished: false })
    }

    pub fn write_run(&mut self, run: u32, summary: &RunSummary) -> OutputResult<()> {
        for i in 0..summary.num_agents() {
            self.inner.write_record(&[
                run.to_string(),
                i.to_string(),
                summary.items_count[i].to_string(),
                summary.pickup_count[i].to_string(),
                summary.clear_count[i].to_string(),
                format!("{:.3}", summary.clear_rate(i)),
            ])?;
        }
        self.inner.write_record(&[
            run.to_string(),
            "total".to_string(),
            summary.total_items().to_string(),
            summary.total_pickups().to_string(),
            summary.total_clears().to_string(),
            format!("{:.3}", summary.total_clear_rate()),
        ])?;
        Ok(())
    }

    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.inner.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying writer (e.g. to inspect the bytes
    /// in tests).
    pub fn into_inner(mut self) -> OutputResult<W> {
        self.inner.flush()?;
        self.inner
            .into_inner()
            .map_err(|e| crate::OutputError::Io(std::io::Error::other(e.to_string())))
    }
}

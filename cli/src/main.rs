//! `warehouse` — run the multi-agent warehouse simulator.
//!
//! ```text
//! warehouse --mapdata-file data/map.txt --config-file data/config.json --run 10
//! ```
//!
//! Each run is an independent episode re-seeded with `randSeed + run_index`;
//! after the last run the aggregator prints mean and variance of the
//! per-agent and total statistics.  `--verbose` dumps the world state every
//! turn and raises the log level to debug.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use warehouse_core::SimConfig;
use warehouse_map::MapIndex;
use warehouse_output::{Aggregate, SummaryCsvWriter, render_report};
use warehouse_sim::Simulator;

#[derive(Parser)]
#[command(name = "warehouse", about = "Decentralised multi-agent warehouse simulator")]
struct Cli {
    /// Number of independent runs to aggregate.
    #[arg(long = "run", default_value_t = 1)]
    run: u32,

    /// Map text file (`#` wall, `.` floor, `D` depot).
    #[arg(long = "mapdata-file")]
    mapdata_file: PathBuf,

    /// JSON configuration file.
    #[arg(long = "config-file")]
    config_file: PathBuf,

    /// Dump the world state every turn and log at debug level.
    #[arg(long, short)]
    verbose: bool,

    /// Write per-run summaries to this CSV file.
    #[arg(long = "csv-out")]
    csv_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = load_config(&cli.config_file)?;
    let map = Arc::new(
        MapIndex::load(&cli.mapdata_file)
            .with_context(|| format!("loading map file {}", cli.mapdata_file.display()))?,
    );

    let mut aggregate = Aggregate::new(cfg.num_agents);
    let mut csv = match &cli.csv_out {
        Some(path) => Some(
            SummaryCsvWriter::from_path(path)
                .with_context(|| format!("creating CSV file {}", path.display()))?,
        ),
        None => None,
    };

    let mut stdout = std::io::stdout().lock();
    for run in 0..cli.run {
        let seed = cfg.run_seed(run);
        info!(run, seed, "starting run");
        let mut sim = Simulator::new(cfg.clone(), Arc::clone(&map), seed)?;

        let summary = if cli.verbose {
            while !sim.is_done() {
                sim.dump(&mut stdout)?;
                sim.run_turn()?;
            }
            sim.dump(&mut stdout)?;
            sim.summary()
        } else {
            sim.run()?
        };

        write!(stdout, "{}", render_report(run, &summary))?;
        if let Some(writer) = csv.as_mut() {
            writer.write_run(run, &summary)?;
        }
        aggregate.push(summary);
    }

    write!(stdout, "{}", aggregate.render())?;
    if let Some(mut writer) = csv {
        writer.finish()?;
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<SimConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let cfg: SimConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validating config file {}", path.display()))?;
    Ok(cfg)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

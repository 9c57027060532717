use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use demo_arena::arena_schema;
use dispatch::{DispatchLoop, HandlerRegistry, StopReason, WindowId};
use serde::Serialize;

mod input;
mod rng;
mod session;
mod sim;

use input::ScriptedInput;
use session::{ArenaSession, SessionReport};
use sim::MatchStats;

#[derive(Parser)]
#[command(
    name = "demo-sim",
    version,
    about = "Deterministic arena simulation that writes snapshot captures"
)]
struct Cli {
    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 300)]
    ticks: u32,
    /// RNG seed for deterministic results.
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Output directory for captures.
    #[arg(long, default_value = "captures")]
    out_dir: PathBuf,
}

const MAIN_WINDOW: WindowId = WindowId::new(1);

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let schema = arena_schema();

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("create output dir {}", cli.out_dir.display()))?;
    write_schema_json(&cli.out_dir, &schema)?;

    let report = Rc::new(RefCell::new(SessionReport::default()));
    let mut registry = HandlerRegistry::new();
    registry.register(
        MAIN_WINDOW,
        Box::new(ArenaSession::new(
            cli.ticks,
            cli.seed,
            cli.out_dir.clone(),
            Rc::clone(&report),
        )),
    )?;

    let mut pump = DispatchLoop::new(ScriptedInput::new(MAIN_WINDOW, cli.seed), registry);
    let run = pump.run();

    let mut report = report.borrow_mut();
    if let Some(err) = report.error.take() {
        return Err(err.context("simulation failed"));
    }
    if run.stop != StopReason::HandlerQuit {
        anyhow::bail!("dispatch loop stopped early: {:?}", run.stop);
    }

    let summary = Summary {
        ticks: cli.ticks,
        seed: cli.seed,
        schema_hash: tools::format_hash(schema::schema_hash(&schema)),
        snapshot_bytes: report.snapshot_bytes,
        snapshots_written: report.snapshots,
        total_bytes: report.total_bytes,
        messages: run.messages,
        idle_frames: run.idle_frames,
        alive_at_end: report.alive_at_end,
        stats: report.stats,
    };
    write_summary_json(&cli.out_dir, &summary)?;
    tracing::info!(
        snapshots = summary.snapshots_written,
        total_bytes = summary.total_bytes,
        alive = summary.alive_at_end,
        "simulation complete"
    );

    Ok(())
}

fn write_schema_json(out_dir: &Path, schema: &schema::Schema) -> Result<()> {
    let path = out_dir.join("schema.json");
    let contents = serde_json::to_string_pretty(schema).context("serialize schema")?;
    fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn write_summary_json(out_dir: &Path, summary: &Summary) -> Result<()> {
    let path = out_dir.join("summary.json");
    let contents = serde_json::to_string_pretty(summary).context("serialize summary")?;
    fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct Summary {
    ticks: u32,
    seed: u64,
    schema_hash: String,
    snapshot_bytes: usize,
    snapshots_written: u32,
    total_bytes: u64,
    messages: u64,
    idle_frames: u64,
    alive_at_end: usize,
    stats: MatchStats,
}

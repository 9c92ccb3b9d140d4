//! Knowledge-graph tab: lay out the filtered graph and export a frame, or
//! select the node under a point.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use spacebio_common::AttributeFilter;
use spacebio_kg::{FrameRecorder, GraphEngine, SharedTarget, SvgCanvas};
use tracing::info;

use super::{print_json, FilterArgs};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FrameFormat {
    Svg,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct LayoutArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
    /// Simulation steps before the frame is taken
    #[arg(long, default_value_t = 500)]
    pub ticks: usize,
    /// Seed for reproducible initial positions
    #[arg(long)]
    pub seed: Option<u64>,
}

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Engine loaded with the filtered graph and advanced `args.ticks` steps,
/// drawing into `target`. `None` when the filter leaves no nodes.
async fn settled_engine(session: &Session, args: &LayoutArgs, target: SharedTarget) -> Option<GraphEngine> {
    let filter: AttributeFilter = args.filter.clone().into();
    let data = session.store.get_graph(&filter).await;
    if data.nodes.is_empty() {
        return None;
    }

    let mut engine = match args.seed {
        Some(seed) => GraphEngine::with_rng(session.config.engine_config(), StdRng::seed_from_u64(seed)),
        None => session.graph_engine(),
    };
    engine.attach(target);
    engine.load(&data);
    engine.step(args.ticks);
    Some(engine)
}

// ── graph ─────────────────────────────────────────────────────────────────────

pub async fn graph(
    session: &Session,
    args: LayoutArgs,
    format: FrameFormat,
    output: Option<PathBuf>,
    animate_ms: Option<u64>,
) -> Result<()> {
    let rendered = match format {
        FrameFormat::Svg => {
            let canvas = Arc::new(Mutex::new(SvgCanvas::new()));
            let Some(engine) = settled_engine(session, &args, canvas.clone()).await else {
                println!("No graph data for this filter.");
                return Ok(());
            };
            let engine = animate(engine, animate_ms).await;
            report(&engine);
            let svg = lock(&canvas).document().unwrap_or_default().to_string();
            svg
        }
        FrameFormat::Json => {
            let recorder = Arc::new(Mutex::new(FrameRecorder::default()));
            let Some(engine) = settled_engine(session, &args, recorder.clone()).await else {
                println!("No graph data for this filter.");
                return Ok(());
            };
            let engine = animate(engine, animate_ms).await;
            report(&engine);
            let recorder = lock(&recorder);
            info!(frames = recorder.frames(), draw_calls = recorder.draw_calls(), "Frames recorded");
            let frame = serde_json::to_string_pretty(recorder.last_frame())?;
            frame
        }
    };

    match output {
        Some(path) => {
            tokio::fs::write(&path, rendered)
                .await
                .with_context(|| format!("writing frame to {}", path.display()))?;
            println!("Frame written to {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

/// Let the animation loop run for `ms` milliseconds, then stop it.
async fn animate(mut engine: GraphEngine, ms: Option<u64>) -> GraphEngine {
    let Some(ms) = ms else { return engine };
    if engine.start() {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        engine.stop();
    }
    engine
}

fn report(engine: &GraphEngine) {
    if let Some((nodes, ticks, speed)) =
        engine.with_layout(|l| (l.nodes().len(), l.ticks(), l.total_speed()))
    {
        info!(nodes, ticks, total_speed = speed, state = ?engine.state(), "📈 Graph layout");
    }
}

// ── select ────────────────────────────────────────────────────────────────────

pub async fn select(session: &Session, args: LayoutArgs, x: f64, y: f64, json: bool) -> Result<()> {
    let recorder: SharedTarget = Arc::new(Mutex::new(FrameRecorder::default()));
    let Some(engine) = settled_engine(session, &args, recorder).await else {
        println!("No graph data for this filter.");
        return Ok(());
    };

    let selection = engine.select(x, y);
    if json {
        return print_json(&selection);
    }
    match selection {
        Some(s) => println!("{} ({:?}) at ({:.1}, {:.1}) [id: {}]", s.label, s.category, s.x, s.y, s.id),
        None => {
            println!("No node at ({x:.1}, {y:.1}). Node centres:");
            let centres: Vec<String> = engine
                .with_layout(|l| {
                    l.nodes()
                        .iter()
                        .map(|n| format!("  {:<32} ({:.1}, {:.1})", n.label, n.x, n.y))
                        .collect()
                })
                .unwrap_or_default();
            println!("{}", centres.join("\n"));
        }
    }
    Ok(())
}

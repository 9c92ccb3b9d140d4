//! Graph engine: owns one layout, one render target and the animation task.
//!
//! ```text
//!   Uninitialized --load--> Seeded --start--> Running --stop--> Stopped
//!                              ^                 |                  |
//!                              +------load-------+------load--------+
//! ```
//!
//! Loading new data always aborts a running loop first, and dropping the
//! engine aborts it too, so at most one loop ever draws to a target. Each
//! loop carries the frame epoch it was started in and only draws while the
//! epoch is unchanged. Stopping bumps the epoch under the target lock, so
//! once `stop` or `load` returns no further frame from the old loop lands.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use spacebio_common::{GraphData, NodeCategory};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::layout::{ForceLayout, LayoutParams};
use crate::render::RenderTarget;

pub type SharedTarget = Arc<Mutex<dyn RenderTarget>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    Uninitialized,
    Seeded,
    Running,
    Stopped,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub layout: LayoutParams,
    pub frame_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { layout: LayoutParams::default(), frame_interval: Duration::from_millis(16) }
    }
}

/// The node under a click.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub id: String,
    pub label: String,
    pub category: NodeCategory,
    pub x: f64,
    pub y: f64,
}

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct GraphEngine {
    config: EngineConfig,
    rng: StdRng,
    layout: Option<Arc<Mutex<ForceLayout>>>,
    target: Option<SharedTarget>,
    /// Running loop and the target it draws into.
    task: Option<(JoinHandle<()>, SharedTarget)>,
    epoch: Arc<AtomicU64>,
    state: EngineState,
}

impl GraphEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine whose seeded layouts are reproducible.
    pub fn with_rng(config: EngineConfig, rng: StdRng) -> Self {
        Self {
            config,
            rng,
            layout: None,
            target: None,
            task: None,
            epoch: Arc::new(AtomicU64::new(0)),
            state: EngineState::Uninitialized,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn attach(&mut self, target: SharedTarget) {
        self.target = Some(target);
    }

    /// Seed a fresh layout for `data`, stopping any running loop.
    pub fn load(&mut self, data: &GraphData) {
        self.abort_loop();
        let layout = ForceLayout::seed(data, self.config.layout, &mut self.rng);
        info!(nodes = layout.nodes().len(), edges = layout.edges().len(), "📈 Graph layout seeded");
        self.layout = Some(Arc::new(Mutex::new(layout)));
        self.state = EngineState::Seeded;
    }

    /// Spawn the animation loop. Requires a tokio runtime.
    ///
    /// Returns `false` without doing anything when there is no data, the
    /// dataset is empty, or no render target is attached.
    pub fn start(&mut self) -> bool {
        if self.state == EngineState::Running {
            return true;
        }
        let (Some(layout), Some(target)) = (&self.layout, &self.target) else {
            debug!(state = ?self.state, "graph loop not started: no layout or render target");
            return false;
        };
        if lock(layout).is_empty() {
            debug!("graph loop not started: empty dataset");
            return false;
        }

        let layout = Arc::clone(layout);
        let target = Arc::clone(target);
        let period = self.config.frame_interval.max(Duration::from_millis(1));
        let epoch = self.epoch.load(Ordering::SeqCst);
        let handle = tokio::spawn(animate(layout, Arc::clone(&target), period, Arc::clone(&self.epoch), epoch));
        self.task = Some((handle, target));
        self.state = EngineState::Running;
        true
    }

    pub fn stop(&mut self) {
        if self.abort_loop() {
            self.state = EngineState::Stopped;
        }
    }

    fn abort_loop(&mut self) -> bool {
        let Some((handle, target)) = self.task.take() else {
            return false;
        };
        {
            // Waits out a frame in progress.
            let _target = lock(&target);
            self.epoch.fetch_add(1, Ordering::SeqCst);
        }
        handle.abort();
        debug!("graph loop aborted");
        true
    }

    /// Advance `ticks` steps synchronously, then draw one frame.
    pub fn step(&mut self, ticks: usize) {
        let Some(layout) = &self.layout else { return };
        let mut layout = lock(layout);
        for _ in 0..ticks {
            layout.tick();
        }
        if let Some(target) = &self.target {
            layout.render(&mut *lock(target));
        }
    }

    pub fn select(&self, x: f64, y: f64) -> Option<Selection> {
        let layout = lock(self.layout.as_ref()?);
        let node = layout.hit_test(x, y)?;
        Some(Selection {
            id: node.id.clone(),
            label: node.label.clone(),
            category: node.category,
            x: node.x,
            y: node.y,
        })
    }

    /// Run `f` against the current layout.
    pub fn with_layout<R>(&self, f: impl FnOnce(&ForceLayout) -> R) -> Option<R> {
        self.layout.as_ref().map(|layout| f(&*lock(layout)))
    }
}

impl Drop for GraphEngine {
    fn drop(&mut self) {
        self.abort_loop();
    }
}

async fn animate(
    layout: Arc<Mutex<ForceLayout>>,
    target: SharedTarget,
    period: Duration,
    epoch: Arc<AtomicU64>,
    started_in: u64,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        {
            let mut guard = lock(&layout);
            let mut target = lock(&target);
            if epoch.load(Ordering::SeqCst) != started_in {
                return;
            }
            guard.tick();
            guard.render(&mut *target);
        }
    }
}

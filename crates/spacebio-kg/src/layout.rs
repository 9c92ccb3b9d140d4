//! Force-directed layout simulation.
//!
//! Each tick pulls every node weakly toward the canvas centre, pushes apart
//! every pair closer than [`REPULSION_RANGE`], damps, integrates and clamps.
//! All impulses of a tick are computed from the positions at the start of
//! that tick, so the result does not depend on node order.

use std::collections::HashMap;

use rand::Rng;
use spacebio_common::{GraphData, NodeCategory};

use crate::render::{DrawCommand, RenderTarget};
use crate::spatial::SpatialGrid;
use crate::style::{self, NodeStyle};

pub const CENTERING: f64 = 0.001;
pub const REPULSION_RANGE: f64 = 100.0;
pub const REPULSION_STRENGTH: f64 = 0.01;
pub const DAMPING: f64 = 0.9;
pub const DEFAULT_GRID_THRESHOLD: usize = 64;

/// Seeded positions fall in `[SEED_MARGIN, 1 - SEED_MARGIN]` of each axis.
const SEED_MARGIN: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub width: f64,
    pub height: f64,
    /// Above this many nodes repulsion uses the spatial grid.
    pub grid_threshold: usize,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self { width: 800.0, height: 600.0, grid_threshold: DEFAULT_GRID_THRESHOLD }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub id: String,
    pub label: String,
    pub category: NodeCategory,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
}

impl LayoutNode {
    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (x - self.x).hypot(y - self.y) <= self.radius
    }
}

#[derive(Debug, Clone)]
pub struct ForceLayout {
    nodes: Vec<LayoutNode>,
    /// Resolved `(source, target)` node indices.
    edges: Vec<(usize, usize)>,
    params: LayoutParams,
    ticks: u64,
}

impl ForceLayout {
    /// Place every node of `data` at a random point in the central 60 % of
    /// the canvas with zero velocity. Edges naming unknown ids are dropped.
    pub fn seed<R: Rng>(data: &GraphData, params: LayoutParams, rng: &mut R) -> Self {
        let nodes: Vec<LayoutNode> = data
            .nodes
            .iter()
            .map(|n| LayoutNode {
                id: n.id.clone(),
                label: n.label.clone(),
                category: n.category,
                x: params.width * rng.gen_range(SEED_MARGIN..1.0 - SEED_MARGIN),
                y: params.height * rng.gen_range(SEED_MARGIN..1.0 - SEED_MARGIN),
                vx: 0.0,
                vy: 0.0,
                radius: n.category.radius(),
            })
            .collect();

        let mut index: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            index.entry(node.id.as_str()).or_insert(i);
        }

        let edges: Vec<(usize, usize)> = data
            .edges
            .iter()
            .filter_map(|e| Some((*index.get(e.source.as_str())?, *index.get(e.target.as_str())?)))
            .collect();

        let skipped = data.edges.len() - edges.len();
        if skipped > 0 {
            tracing::debug!(skipped, "edges with unknown endpoints ignored");
        }

        Self { nodes, edges, params, ticks: 0 }
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Simulation ───────────────────────────────────────────────────────────

    pub fn tick(&mut self) {
        if self.nodes.is_empty() {
            return;
        }

        let (cx, cy) = (self.params.width / 2.0, self.params.height / 2.0);
        let mut impulses: Vec<(f64, f64)> = self
            .nodes
            .iter()
            .map(|n| ((cx - n.x) * CENTERING, (cy - n.y) * CENTERING))
            .collect();

        let nodes = &self.nodes;
        if nodes.len() > self.params.grid_threshold {
            let grid = SpatialGrid::build(nodes.iter().map(|n| (n.x, n.y)), REPULSION_RANGE);
            grid.for_each_candidate_pair(|i, j| repel(nodes, i, j, &mut impulses));
        } else {
            for i in 0..nodes.len() {
                for j in i + 1..nodes.len() {
                    repel(nodes, i, j, &mut impulses);
                }
            }
        }

        let (width, height) = (self.params.width, self.params.height);
        for (node, (ix, iy)) in self.nodes.iter_mut().zip(impulses) {
            node.vx = (node.vx + ix) * DAMPING;
            node.vy = (node.vy + iy) * DAMPING;
            node.x += node.vx;
            node.y += node.vy;
            clamp_axis(&mut node.x, &mut node.vx, node.radius, width - node.radius);
            clamp_axis(&mut node.y, &mut node.vy, node.radius, height - node.radius);
        }
        self.ticks += 1;
    }

    /// Sum of velocity magnitudes.
    pub fn total_speed(&self) -> f64 {
        self.nodes.iter().map(LayoutNode::speed).sum()
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.nodes.iter().map(|n| 0.5 * (n.vx * n.vx + n.vy * n.vy)).sum()
    }

    pub fn is_settled(&self, epsilon: f64) -> bool {
        self.total_speed() < epsilon
    }

    /// First node, in insertion order, whose circle contains `(x, y)`.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.contains(x, y))
    }

    // ── Rendering ────────────────────────────────────────────────────────────

    /// Draw one frame: background, edges, then nodes with labels.
    pub fn render(&self, target: &mut dyn RenderTarget) {
        if self.nodes.is_empty() {
            return;
        }

        target.draw(DrawCommand::Clear {
            width: self.params.width,
            height: self.params.height,
            color: style::BACKGROUND,
        });

        for &(s, t) in &self.edges {
            let (a, b) = (&self.nodes[s], &self.nodes[t]);
            target.draw(DrawCommand::Line {
                from: (a.x, a.y),
                to: (b.x, b.y),
                color: style::EDGE_COLOR,
                width: style::EDGE_WIDTH,
            });
        }

        for node in &self.nodes {
            target.draw(DrawCommand::Circle {
                center: (node.x, node.y),
                radius: node.radius,
                color: node.category.color(),
            });
            target.draw(DrawCommand::Label {
                at: (node.x, node.y + node.radius + style::LABEL_OFFSET),
                text: node.label.clone(),
                color: style::LABEL_COLOR,
            });
        }

        target.end_frame();
    }
}

/// Add the equal and opposite repulsion impulse for the pair `(i, j)`.
fn repel(nodes: &[LayoutNode], i: usize, j: usize, impulses: &mut [(f64, f64)]) {
    let (i, j) = if i < j { (i, j) } else { (j, i) };
    let dx = nodes[i].x - nodes[j].x;
    let dy = nodes[i].y - nodes[j].y;
    let distance = dx.hypot(dy);
    if distance >= REPULSION_RANGE {
        return;
    }

    // coincident nodes split along x
    let (ux, uy) = if distance > 0.0 { (dx / distance, dy / distance) } else { (1.0, 0.0) };
    let force = (REPULSION_RANGE - distance) * REPULSION_STRENGTH;

    impulses[i].0 += ux * force;
    impulses[i].1 += uy * force;
    impulses[j].0 -= ux * force;
    impulses[j].1 -= uy * force;
}

/// Keep `pos` within `[min, max]`; a clamped axis loses its velocity.
fn clamp_axis(pos: &mut f64, velocity: &mut f64, min: f64, max: f64) {
    if *pos < min {
        *pos = min;
        *velocity = 0.0;
    } else if *pos > max {
        *pos = max;
        *velocity = 0.0;
    }
}

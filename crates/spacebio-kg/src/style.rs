//! Visual constants and per-category node styling.

use spacebio_common::NodeCategory;

pub const BACKGROUND: &str = "#0A0A0A";
pub const EDGE_COLOR: &str = "#A9A9A9";
pub const EDGE_WIDTH: f64 = 2.0;
pub const LABEL_COLOR: &str = "#FFFFFF";
pub const LABEL_FONT_SIZE: u32 = 12;
/// Labels sit this far below the bottom edge of their circle.
pub const LABEL_OFFSET: f64 = 15.0;

/// Largest radius any category draws with.
pub const MAX_NODE_RADIUS: f64 = 25.0;

pub trait NodeStyle {
    fn color(&self) -> &'static str;
    fn radius(&self) -> f64;
}

impl NodeStyle for NodeCategory {
    fn color(&self) -> &'static str {
        match self {
            NodeCategory::Organism   => "#FFD700",
            NodeCategory::Experiment => "#1E90FF",
            NodeCategory::Mission    => "#FC3D21",
            NodeCategory::Result     => "#28A745",
            NodeCategory::Unknown    => EDGE_COLOR,
        }
    }

    fn radius(&self) -> f64 {
        match self {
            NodeCategory::Organism   => MAX_NODE_RADIUS,
            NodeCategory::Experiment => 20.0,
            _                        => 15.0,
        }
    }
}

//! spacebio-kg: Force-directed knowledge-graph layout and rendering.
//!
//! A [`ForceLayout`] holds simulated node positions for one dataset and
//! advances them one tick at a time. A [`GraphEngine`] owns a layout, a
//! render target and (while running) the animation task that ticks and
//! redraws at a fixed frame rate.

pub mod style;
pub mod spatial;
pub mod layout;
pub mod render;
pub mod engine;

pub use engine::{EngineConfig, EngineState, GraphEngine, Selection, SharedTarget};
pub use layout::{ForceLayout, LayoutNode, LayoutParams};
pub use render::{DrawCommand, FrameRecorder, RenderTarget, SvgCanvas};
pub use style::NodeStyle;

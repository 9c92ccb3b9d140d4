//! spacebio-common: Shared types, errors, and traits used across all spacebio crates.

pub mod error;
pub mod entities;
pub mod graph;

// Re-export commonly used types
pub use entities::{AttributeFilter, Item, PdfDocument, Publication, Summary, TimelineEntry};
pub use graph::{GraphData, GraphEdge, GraphNode, NodeCategory};

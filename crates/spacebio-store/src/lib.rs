//! spacebio-store: In-memory mock data store.
//!
//! Everything is generated once when the store is constructed:
//!   - the publication catalog (fixed fixtures with summaries)
//!   - the knowledge-graph fixture
//!   - the PDF library (hundreds of synthetic documents)
//!
//! The store is an explicit object handed to consumers; there are no
//! process-wide caches.

pub mod error;
pub mod catalog;
pub mod graph_fixture;
pub mod library;
pub mod timeline;
pub mod store;

pub use error::{Result, StoreError};
pub use store::{LatencyConfig, MockDataStore, StoreConfig};
pub use library::LibraryConfig;

//! spacebio-search: Keyword relevance search and ranking.
//!
//! Scoring is term presence: an item scores one point for every distinct
//! query token found anywhere in its lower-cased text. Used by the
//! publication catalog, the PDF library and the assistant context builder.

pub mod tokenize;
pub mod scorer;
pub mod excerpt;
pub mod library;

pub use scorer::{rank, ScoredResult, SearchOptions};
pub use tokenize::tokenize;

//! The mock data store and its async entry points.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use spacebio_common::{AttributeFilter, GraphData, PdfDocument, Publication, Summary, TimelineEntry};
use spacebio_search::library::{related_by_keywords, RelatedMatch};
use spacebio_search::{rank, ScoredResult, SearchOptions};

use crate::error::{Result, StoreError};
use crate::library::LibraryConfig;
use crate::{catalog, graph_fixture, library};

/// Artificial delay per entry point, standing in for network latency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencyConfig {
    pub search: Duration,
    pub graph: Duration,
    pub summary: Duration,
    pub timeline: Duration,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            search: Duration::from_millis(500),
            graph: Duration::from_millis(300),
            summary: Duration::from_millis(400),
            timeline: Duration::from_millis(300),
        }
    }
}

impl LatencyConfig {
    pub fn none() -> Self {
        Self {
            search: Duration::ZERO,
            graph: Duration::ZERO,
            summary: Duration::ZERO,
            timeline: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub library: LibraryConfig,
    pub latency: LatencyConfig,
    pub search: SearchOptions,
}

async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Session-scoped, immutable corpus. Construct once, share by `Arc`.
pub struct MockDataStore {
    publications: Vec<Publication>,
    graph: GraphData,
    pdfs: Vec<PdfDocument>,
    pdf_index: HashMap<String, usize>,
    config: StoreConfig,
}

impl MockDataStore {
    /// Generate every fixture from `config`.
    pub fn generate(config: StoreConfig) -> Self {
        let pdfs = library::generate(&config.library);
        tracing::info!(
            publications = catalog::publications().len(),
            pdfs = pdfs.len(),
            "mock data store generated"
        );
        Self::from_parts(catalog::publications(), graph_fixture::graph(), pdfs, config)
    }

    /// Assemble a store from explicit records.
    pub fn from_parts(
        publications: Vec<Publication>,
        graph: GraphData,
        pdfs: Vec<PdfDocument>,
        config: StoreConfig,
    ) -> Self {
        let pdf_index = pdfs.iter().enumerate().map(|(i, d)| (d.id.clone(), i)).collect();
        Self { publications, graph, pdfs, pdf_index, config }
    }

    pub fn config(&self) -> &StoreConfig { &self.config }

    pub fn publications(&self) -> &[Publication] { &self.publications }

    // ── Catalog entry points ─────────────────────────────────────────────────

    /// Publications matching `query` and `filter`, best first. A blank query
    /// lists every publication passing the filter.
    pub async fn search(&self, query: &str, filter: &AttributeFilter) -> Vec<Publication> {
        simulate(self.config.latency.search).await;
        let results: Vec<Publication> = rank(query, filter, &self.publications, &self.config.search)
            .into_iter()
            .map(|r| r.item.clone())
            .collect();
        tracing::debug!(query, results = results.len(), "catalog search");
        results
    }

    pub async fn get_graph(&self, filter: &AttributeFilter) -> GraphData {
        simulate(self.config.latency.graph).await;
        graph_fixture::filtered(self.graph.clone(), filter, &self.publications)
    }

    pub async fn get_summary(&self, publication_id: u32) -> Option<Summary> {
        simulate(self.config.latency.summary).await;
        self.publications
            .iter()
            .find(|p| p.id == publication_id)
            .map(|p| p.summary.clone())
    }

    pub async fn get_timeline(&self) -> Vec<TimelineEntry> {
        simulate(self.config.latency.timeline).await;
        self.publications.iter().map(TimelineEntry::from).collect()
    }

    // ── PDF library ──────────────────────────────────────────────────────────

    pub fn all_pdfs(&self) -> &[PdfDocument] { &self.pdfs }

    pub fn pdf(&self, id: &str) -> Option<&PdfDocument> {
        self.pdf_index.get(id).map(|&i| &self.pdfs[i])
    }

    /// Relevance-ranked library search, at most `limit` hits.
    pub fn search_pdfs(&self, query: &str, limit: usize) -> Vec<ScoredResult<'_, PdfDocument>> {
        let options = self.config.search.clone().with_limit(limit);
        rank(query, &AttributeFilter::default(), &self.pdfs, &options)
    }

    pub fn related_pdfs(
        &self,
        keywords: &[String],
        exclude_id: Option<&str>,
        limit: usize,
    ) -> Vec<RelatedMatch<'_, PdfDocument>> {
        related_by_keywords(keywords, exclude_id, &self.pdfs, limit)
    }

    // ── Document access ──────────────────────────────────────────────────────

    /// Path of the PDF file for `id`, checked to exist on disk.
    pub async fn locate_document(&self, id: &str) -> Result<PathBuf> {
        let doc = self.pdf(id).ok_or_else(|| StoreError::DocumentNotFound(id.to_string()))?;
        let path = PathBuf::from(&doc.file_path);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            _ => Err(StoreError::DocumentUnavailable { id: id.to_string(), path }),
        }
    }

    pub async fn read_document(&self, id: &str) -> Result<Vec<u8>> {
        let path = self.locate_document(id).await?;
        Ok(tokio::fs::read(&path).await?)
    }
}

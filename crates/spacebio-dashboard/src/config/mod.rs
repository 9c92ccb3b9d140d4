//! Configuration loading for spacebio.
//! Reads spacebio.toml from the current directory or the path in SPACEBIO_CONFIG.
//! A missing file is not an error: every field has a default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use spacebio_assistant::AssistantConfig;
use spacebio_common::error::{Result, SpacebioError};
use spacebio_kg::style::MAX_NODE_RADIUS;
use spacebio_kg::{EngineConfig, LayoutParams};
use spacebio_search::SearchOptions;
use spacebio_store::{LatencyConfig as StoreLatency, LibraryConfig as StoreLibrary, StoreConfig};
use tracing::info;

pub const DEFAULT_CONFIG_FILE: &str = "spacebio.toml";
pub const GEMINI_KEY_ENV: &str = "SPACEBIO_GEMINI_API_KEY";
pub const LLM_KEY_ENV: &str = "SPACEBIO_LLM_API_KEY";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub latency: LatencyConfig,
}

// ── [llm] ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    Gemini,
    OpenaiCompatible,
    Disabled,
}

#[derive(Debug, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: LlmProvider,
    /// Backend default when unset.
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default, deserialize_with = "secret")]
    pub api_key: Option<SecretString>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_provider()     -> LlmProvider { LlmProvider::Gemini }
fn default_timeout_secs() -> u64         { 30 }

fn secret<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<SecretString>, D::Error> {
    Ok(Option::<String>::deserialize(d)?.map(SecretString::from))
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            base_url: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Environment variable consulted when `api_key` is not in the file.
    pub fn key_env_var(&self) -> Option<&'static str> {
        match self.provider {
            LlmProvider::Gemini           => Some(GEMINI_KEY_ENV),
            LlmProvider::OpenaiCompatible => Some(LLM_KEY_ENV),
            LlmProvider::Disabled         => None,
        }
    }

    /// The configured key, else the provider's environment variable.
    /// Blank values count as missing.
    pub fn resolve_api_key(&self, env: impl Fn(&str) -> Option<String>) -> Option<SecretString> {
        if let Some(key) = &self.api_key {
            if !key.expose_secret().trim().is_empty() {
                return Some(SecretString::from(key.expose_secret().to_owned()));
            }
        }
        let var = self.key_env_var()?;
        env(var)
            .filter(|v| !v.trim().is_empty())
            .map(SecretString::from)
    }
}

// ── [search] ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
    #[serde(default = "default_context_results")]
    pub context_results: usize,
    #[serde(default = "default_context_chars")]
    pub context_chars: usize,
}

fn default_min_token_len()   -> usize { 3 }
fn default_search_limit()    -> usize { 10 }
fn default_context_results() -> usize { 3 }
fn default_context_chars()   -> usize { 1000 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_token_len: default_min_token_len(),
            search_limit: default_search_limit(),
            context_results: default_context_results(),
            context_chars: default_context_chars(),
        }
    }
}

impl SearchConfig {
    /// Unlimited options; callers apply their own limit.
    pub fn options(&self) -> SearchOptions {
        SearchOptions::default().with_min_token_len(self.min_token_len)
    }
}

// ── [graph] ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    #[serde(default = "default_grid_threshold")]
    pub grid_threshold: usize,
}

fn default_width()             -> f64   { 800.0 }
fn default_height()            -> f64   { 600.0 }
fn default_frame_interval_ms() -> u64   { 16 }
fn default_grid_threshold()    -> usize { spacebio_kg::layout::DEFAULT_GRID_THRESHOLD }

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            frame_interval_ms: default_frame_interval_ms(),
            grid_threshold: default_grid_threshold(),
        }
    }
}

// ── [library] ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct LibraryConfig {
    #[serde(default = "default_document_count")]
    pub document_count: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_document_root")]
    pub document_root: PathBuf,
}

fn default_document_count() -> usize   { 572 }
fn default_seed()           -> u64     { 0x5eed_b10 }
fn default_page_size()      -> usize   { 12 }
fn default_document_root()  -> PathBuf { PathBuf::from("Nasa pdfs") }

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            document_count: default_document_count(),
            seed: default_seed(),
            page_size: default_page_size(),
            document_root: default_document_root(),
        }
    }
}

// ── [latency] ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct LatencyConfig {
    #[serde(default = "default_search_ms")]
    pub search_ms: u64,
    #[serde(default = "default_graph_ms")]
    pub graph_ms: u64,
    #[serde(default = "default_summary_ms")]
    pub summary_ms: u64,
    #[serde(default = "default_timeline_ms")]
    pub timeline_ms: u64,
}

fn default_search_ms()   -> u64 { 500 }
fn default_graph_ms()    -> u64 { 300 }
fn default_summary_ms()  -> u64 { 400 }
fn default_timeline_ms() -> u64 { 300 }

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            search_ms: default_search_ms(),
            graph_ms: default_graph_ms(),
            summary_ms: default_summary_ms(),
            timeline_ms: default_timeline_ms(),
        }
    }
}


impl Config {
    /// Load configuration from `path`, falling back to SPACEBIO_CONFIG and
    /// then spacebio.toml in the current directory.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => std::env::var("SPACEBIO_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE)),
        };

        if !path.exists() {
            info!(path = %path.display(), "No config file found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_toml(&content)?;
        info!(path = %path.display(), provider = ?config.llm.provider, "⚙️ Configuration loaded");
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        // Every node must fit between opposite edges.
        let min_side = 2.0 * MAX_NODE_RADIUS;
        let fits = |side: f64| side.is_finite() && side >= min_side;
        if !fits(self.graph.width) || !fits(self.graph.height) {
            return Err(SpacebioError::Config(format!(
                "graph canvas must be at least {min_side}x{min_side}, got {}x{}",
                self.graph.width, self.graph.height
            )));
        }
        if self.library.page_size == 0 {
            return Err(SpacebioError::Config("library.page_size must be at least 1".to_string()));
        }
        Ok(())
    }

    // ── Conversions into component configs ───────────────────────────────────

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            library: StoreLibrary {
                document_count: self.library.document_count,
                seed: self.library.seed,
                document_root: self.library.document_root.clone(),
            },
            latency: StoreLatency {
                search: Duration::from_millis(self.latency.search_ms),
                graph: Duration::from_millis(self.latency.graph_ms),
                summary: Duration::from_millis(self.latency.summary_ms),
                timeline: Duration::from_millis(self.latency.timeline_ms),
            },
            search: self.search.options(),
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            layout: LayoutParams {
                width: self.graph.width,
                height: self.graph.height,
                grid_threshold: self.graph.grid_threshold,
            },
            frame_interval: Duration::from_millis(self.graph.frame_interval_ms),
        }
    }

    pub fn assistant_config(&self) -> AssistantConfig {
        AssistantConfig {
            context_results: self.search.context_results,
            context_chars: self.search.context_chars,
            search: self.search.options(),
        }
    }
}

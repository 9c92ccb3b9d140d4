//! Composition root: builds the store, the generation service and the
//! components that consume them from one `Config`.

use std::sync::Arc;

use anyhow::{Context, Result};
use spacebio_assistant::Assistant;
use spacebio_kg::GraphEngine;
use spacebio_llm::backend::DEFAULT_GEMINI_MODEL;
use spacebio_llm::{GeminiBackend, GenerationService, LlmBackend, OpenAiCompatibleBackend};
use spacebio_store::MockDataStore;
use tracing::{info, warn};

use crate::config::{Config, LlmConfig, LlmProvider};

pub const DEFAULT_OPENAI_COMPATIBLE_URL: &str = "http://localhost:11434";
pub const DEFAULT_OPENAI_COMPATIBLE_MODEL: &str = "llama3:8b";

pub struct Session {
    pub config: Config,
    pub store: Arc<MockDataStore>,
    pub generator: Arc<GenerationService>,
}

impl Session {
    pub fn open(config: Config) -> Result<Self> {
        let store = Arc::new(MockDataStore::generate(config.store_config()));
        let generator = match build_backend(&config.llm, |var| std::env::var(var).ok())? {
            Some(backend) => GenerationService::new(backend),
            None => GenerationService::disabled(),
        };
        Ok(Self { config, store, generator: Arc::new(generator) })
    }

    pub fn assistant(&self) -> Assistant {
        Assistant::new(Arc::clone(&self.store), Arc::clone(&self.generator), self.config.assistant_config())
    }

    pub fn graph_engine(&self) -> GraphEngine {
        GraphEngine::new(self.config.engine_config())
    }
}

/// The configured backend, or `None` when generation is disabled or no key
/// is available for a provider that needs one.
pub fn build_backend(
    llm: &LlmConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Option<Arc<dyn LlmBackend>>> {
    let backend: Arc<dyn LlmBackend> = match llm.provider {
        LlmProvider::Disabled => {
            info!("LLM provider disabled, answers will come from the offline set");
            return Ok(None);
        }
        LlmProvider::Gemini => {
            let Some(key) = llm.resolve_api_key(&env) else {
                warn!(
                    "Gemini configured but no API key found (set llm.api_key or {})",
                    crate::config::GEMINI_KEY_ENV
                );
                return Ok(None);
            };
            let model = llm.model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL);
            let mut backend = GeminiBackend::new(key, model, llm.timeout()).context("building Gemini client")?;
            if let Some(url) = &llm.base_url {
                backend = backend.with_base_url(url.clone());
            }
            Arc::new(backend)
        }
        LlmProvider::OpenaiCompatible => {
            let base_url = llm.base_url.as_deref().unwrap_or(DEFAULT_OPENAI_COMPATIBLE_URL);
            let model = llm.model.as_deref().unwrap_or(DEFAULT_OPENAI_COMPATIBLE_MODEL);
            let key = llm.resolve_api_key(&env);
            Arc::new(
                OpenAiCompatibleBackend::new(base_url, model, key, llm.timeout())
                    .context("building OpenAI-compatible client")?,
            )
        }
    };
    info!(model = backend.model_id(), local = backend.is_local(), "🤖 LLM backend configured");
    Ok(Some(backend))
}

//! Generation service: one backend behind a probe-once initialisation.
//!
//! The first call to [`GenerationService::initialize`] sends a short probe
//! prompt. Its outcome is stored for the lifetime of the service; concurrent
//! callers wait on the same in-flight probe rather than starting their own.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::backend::{LlmBackend, LlmError, LlmRequest};
use crate::prompt::{self, SummaryKind, PROBE_PROMPT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceState {
    Uninitialized,
    Ready,
    Degraded,
}

pub struct GenerationService {
    backend: Option<Arc<dyn LlmBackend>>,
    state: OnceCell<ServiceState>,
}

impl GenerationService {
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self { backend: Some(backend), state: OnceCell::new() }
    }

    /// A service with no backend. Initialises straight to `Degraded`.
    pub fn disabled() -> Self {
        Self { backend: None, state: OnceCell::new() }
    }

    pub fn model_id(&self) -> Option<&str> {
        self.backend.as_ref().map(|b| b.model_id())
    }

    /// Current state without triggering initialisation.
    pub fn state(&self) -> ServiceState {
        self.state.get().copied().unwrap_or(ServiceState::Uninitialized)
    }

    /// Probe the backend once and remember the outcome. Idempotent.
    pub async fn initialize(&self) -> ServiceState {
        *self.state.get_or_init(|| self.probe()).await
    }

    async fn probe(&self) -> ServiceState {
        let Some(backend) = &self.backend else {
            warn!("No LLM backend configured, generation disabled");
            return ServiceState::Degraded;
        };

        match backend.complete(LlmRequest::prompt(PROBE_PROMPT)).await {
            Ok(resp) if !resp.content.trim().is_empty() => {
                info!(model = backend.model_id(), "✅ Generation service initialized");
                ServiceState::Ready
            }
            Ok(_) => {
                warn!(model = backend.model_id(), "Generation probe returned an empty response");
                ServiceState::Degraded
            }
            Err(e) => {
                warn!(model = backend.model_id(), error = %e, "Generation probe failed");
                ServiceState::Degraded
            }
        }
    }

    /// Complete `prompt`. Fails when the service is degraded, the call fails,
    /// or the backend answers with only whitespace.
    pub async fn generate(&self, prompt: String) -> Result<String, LlmError> {
        let backend = match (self.initialize().await, &self.backend) {
            (ServiceState::Ready, Some(backend)) => backend,
            _ => return Err(LlmError::Unavailable("generation service is not initialized".to_string())),
        };

        debug!(model = backend.model_id(), prompt_chars = prompt.len(), "generation request");
        let resp = backend.complete(LlmRequest::prompt(prompt)).await?;
        if resp.content.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        debug!(
            model = %resp.model,
            prompt_tokens = resp.prompt_tokens,
            completion_tokens = resp.completion_tokens,
            "generation complete"
        );
        Ok(resp.content)
    }

    // ── Tasks ────────────────────────────────────────────────────────────────

    pub async fn answer(&self, question: &str, context: &str) -> Result<String, LlmError> {
        self.generate(prompt::answer(question, context)).await
    }

    pub async fn summarize(&self, text: &str, kind: SummaryKind) -> Result<String, LlmError> {
        self.generate(prompt::summary(text, kind)).await
    }

    pub async fn analyze_paper(&self, paper_content: &str) -> Result<String, LlmError> {
        self.generate(prompt::analysis(paper_content)).await
    }

    pub async fn related_research(&self, topic: &str) -> Result<String, LlmError> {
        self.generate(prompt::related_research(topic)).await
    }
}

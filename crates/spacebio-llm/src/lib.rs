//! spacebio-llm: Text-generation backends and the generation service.
//!
//! `backend` holds the `LlmBackend` trait and the HTTP backends (Gemini and
//! any OpenAI-compatible endpoint). `service` wraps one backend with a
//! probe-once initialisation state machine and the task-specific prompts
//! from `prompt`.

pub mod backend;
pub mod prompt;
pub mod service;

pub use backend::{GeminiBackend, LlmBackend, LlmError, LlmRequest, LlmResponse, Message, OpenAiCompatibleBackend};
pub use prompt::SummaryKind;
pub use service::{GenerationService, ServiceState};

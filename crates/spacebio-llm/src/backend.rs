//! LLM backend trait and concrete implementations.
//!
//! Backends:
//!   GeminiBackend           : Google Gemini `generateContent` API
//!   OpenAiCompatibleBackend : any OpenAI-compatible endpoint (Ollama,
//!                             LMStudio, vLLM, OpenRouter, …)

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    #[error("Empty response received")]
    EmptyResponse,
    #[error("API error [{status}]: {message}")]
    ApiError { status: u16, message: String },
}

// ── Request / Response ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,   // "system" | "user" | "assistant"
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    pub messages: Vec<Message>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl LlmRequest {
    /// Single user turn, backend defaults for everything else.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            messages: vec![Message { role: "user".to_string(), content: text.into() }],
            model: None,
            max_tokens: None,
            temperature: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub content: String,
    pub model: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

// ── Trait ─────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError>;
    fn model_id(&self) -> &str;
    fn is_local(&self) -> bool;
}

fn http_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

// ── Helpers: response parsing ─────────────────────────────────────────────────

fn parse_openai_response(json: &serde_json::Value, fallback_model: &str) -> LlmResponse {
    LlmResponse {
        content: json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string(),
        model: json["model"]
            .as_str()
            .unwrap_or(fallback_model)
            .to_string(),
        prompt_tokens:     json["usage"]["prompt_tokens"].as_u64().unwrap_or(0) as u32,
        completion_tokens: json["usage"]["completion_tokens"].as_u64().unwrap_or(0) as u32,
    }
}

/// Gemini may split a candidate into several text parts; they are joined.
fn parse_gemini_response(json: &serde_json::Value, model: &str) -> LlmResponse {
    let content = json["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect::<String>())
        .unwrap_or_default();

    LlmResponse {
        content,
        model: json["modelVersion"].as_str().unwrap_or(model).to_string(),
        prompt_tokens:     json["usageMetadata"]["promptTokenCount"].as_u64().unwrap_or(0) as u32,
        completion_tokens: json["usageMetadata"]["candidatesTokenCount"].as_u64().unwrap_or(0) as u32,
    }
}

async fn check_response_status(resp: reqwest::Response) -> Result<serde_json::Value, LlmError> {
    let status = resp.status().as_u16();
    let body: serde_json::Value = resp.json().await?;
    if status >= 400 {
        let msg = body["error"]["message"]
            .as_str()
            .or_else(|| body["message"].as_str())
            .unwrap_or("unknown API error")
            .to_string();
        return Err(LlmError::ApiError { status, message: msg });
    }
    Ok(body)
}

// ── 1. Google Gemini ──────────────────────────────────────────────────────────

pub struct GeminiBackend {
    pub model: String,
    pub base_url: String,
    api_key: SecretString,
    client: reqwest::Client,
}

impl GeminiBackend {
    pub fn new(api_key: SecretString, model: impl Into<String>, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            model: model.into(),
            base_url: GEMINI_BASE_URL.to_string(),
            api_key,
            client: http_client(timeout)?,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: [GeminiPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl<'a> GeminiRequest<'a> {
    /// Gemini takes the system turn separately and calls the assistant "model".
    fn from_request(req: &'a LlmRequest) -> Self {
        let system_instruction = req
            .messages
            .iter()
            .find(|m| m.role == "system")
            .map(|m| GeminiContent { role: None, parts: [GeminiPart { text: &m.content }] });

        let contents = req
            .messages
            .iter()
            .filter(|m| m.role != "system")
            .map(|m| GeminiContent {
                role: Some(if m.role == "assistant" { "model" } else { "user" }),
                parts: [GeminiPart { text: &m.content }],
            })
            .collect();

        let generation_config = (req.max_tokens.is_some() || req.temperature.is_some()).then_some(GenerationConfig {
            max_output_tokens: req.max_tokens,
            temperature: req.temperature,
        });

        Self { contents, system_instruction, generation_config }
    }
}

#[async_trait]
impl LlmBackend for GeminiBackend {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
        let model = req.model.as_deref().unwrap_or(&self.model);
        let url = format!("{}/models/{}:generateContent", self.base_url.trim_end_matches('/'), model);

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&GeminiRequest::from_request(&req))
            .send()
            .await?;
        let json = check_response_status(resp).await?;
        Ok(parse_gemini_response(&json, model))
    }

    fn model_id(&self) -> &str { &self.model }
    fn is_local(&self) -> bool { false }
}

// ── 2. OpenAI-Compatible (Ollama, LMStudio, vLLM, OpenRouter, …) ─────────────

pub struct OpenAiCompatibleBackend {
    pub base_url: String,
    pub model: String,
    api_key: Option<SecretString>,
    client: reqwest::Client,
}

impl OpenAiCompatibleBackend {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<SecretString>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key,
            client: http_client(timeout)?,
        })
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(k) => req.bearer_auth(k.expose_secret()),
            None    => req,
        }
    }
}

#[async_trait]
impl LlmBackend for OpenAiCompatibleBackend {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "model":       req.model.as_deref().unwrap_or(&self.model),
            "messages":    req.messages,
            "max_tokens":  req.max_tokens.unwrap_or(4096),
            "temperature": req.temperature.unwrap_or(0.7),
        });
        let resp = self.auth(self.client.post(&url)).json(&body).send().await?;
        let json = check_response_status(resp).await?;
        Ok(parse_openai_response(&json, &self.model))
    }

    fn model_id(&self) -> &str { &self.model }

    fn is_local(&self) -> bool {
        self.base_url.contains("localhost") || self.base_url.contains("127.0.0.1")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key() -> SecretString {
        SecretString::from("AIza-test".to_string())
    }

    #[test]
    fn test_gemini_backend_is_not_local() {
        let b = GeminiBackend::new(key(), DEFAULT_GEMINI_MODEL, DEFAULT_TIMEOUT).unwrap();
        assert!(!b.is_local());
        assert_eq!(b.model_id(), "gemini-2.5-flash");
        assert_eq!(b.base_url, GEMINI_BASE_URL);
    }

    #[test]
    fn test_openai_compatible_local_detection() {
        let local = OpenAiCompatibleBackend::new("http://localhost:11434", "llama3:8b", None, DEFAULT_TIMEOUT).unwrap();
        assert!(local.is_local());
        let remote = OpenAiCompatibleBackend::new("https://openrouter.ai/api", "m", Some(key()), DEFAULT_TIMEOUT).unwrap();
        assert!(!remote.is_local());
    }

    #[test]
    fn test_prompt_request_is_single_user_turn() {
        let req = LlmRequest::prompt("Test connection");
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, "user");
        assert!(req.model.is_none());
    }

    #[test]
    fn test_parse_gemini_response_joins_parts() {
        let json = serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "<p>Hello" }, { "text": " space</p>" }] } }],
            "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 4 }
        });
        let resp = parse_gemini_response(&json, "gemini-2.5-flash");
        assert_eq!(resp.content, "<p>Hello space</p>");
        assert_eq!(resp.model, "gemini-2.5-flash");
        assert_eq!((resp.prompt_tokens, resp.completion_tokens), (12, 4));
    }

    #[test]
    fn test_parse_gemini_response_without_candidates_is_empty() {
        let json = serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        assert_eq!(parse_gemini_response(&json, "m").content, "");
    }

    #[test]
    fn test_parse_openai_response() {
        let json = serde_json::json!({
            "model": "llama3",
            "choices": [{ "message": { "content": "Bone loss." } }],
            "usage": { "prompt_tokens": 5, "completion_tokens": 2 }
        });
        let resp = parse_openai_response(&json, "fallback");
        assert_eq!(resp.content, "Bone loss.");
        assert_eq!(resp.model, "llama3");
    }

    #[test]
    fn test_gemini_request_body() {
        let req = LlmRequest {
            messages: vec![
                Message { role: "system".into(), content: "Be brief.".into() },
                Message { role: "user".into(), content: "Hi".into() },
                Message { role: "assistant".into(), content: "Hello".into() },
            ],
            model: None,
            max_tokens: Some(256),
            temperature: None,
        };
        let body = serde_json::to_value(GeminiRequest::from_request(&req)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "contents": [
                    { "role": "user", "parts": [{ "text": "Hi" }] },
                    { "role": "model", "parts": [{ "text": "Hello" }] }
                ],
                "systemInstruction": { "parts": [{ "text": "Be brief." }] },
                "generationConfig": { "maxOutputTokens": 256 }
            })
        );
    }

    #[test]
    fn test_gemini_prompt_body_has_no_optional_sections() {
        let req = LlmRequest::prompt("Test connection");
        let body = serde_json::to_value(GeminiRequest::from_request(&req)).unwrap();
        assert_eq!(body, serde_json::json!({ "contents": [{ "role": "user", "parts": [{ "text": "Test connection" }] }] }));
    }
}

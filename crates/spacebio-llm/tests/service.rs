use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use spacebio_llm::{GenerationService, LlmBackend, LlmError, LlmRequest, LlmResponse, ServiceState, SummaryKind};

fn ok(content: &str) -> Result<LlmResponse, LlmError> {
    Ok(LlmResponse { content: content.to_string(), model: "test".to_string(), prompt_tokens: 0, completion_tokens: 0 })
}

/// Replies from a fixed script and records every prompt it sees.
struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn new(replies: Vec<Result<LlmResponse, LlmError>>) -> Arc<Self> {
        Arc::new(Self { replies: Mutex::new(replies.into()), prompts: Mutex::new(Vec::new()) })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmBackend for ScriptedBackend {
    async fn complete(&self, req: LlmRequest) -> Result<LlmResponse, LlmError> {
        self.prompts.lock().unwrap().push(req.messages[0].content.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Unavailable("script exhausted".into())))
    }
    fn model_id(&self) -> &str { "scripted" }
    fn is_local(&self) -> bool { true }
}

/// Slow backend counting how many calls it receives.
struct CountingBackend {
    calls: AtomicUsize,
    delay: Duration,
}

#[async_trait]
impl LlmBackend for CountingBackend {
    async fn complete(&self, _req: LlmRequest) -> Result<LlmResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        ok("pong")
    }
    fn model_id(&self) -> &str { "counting" }
    fn is_local(&self) -> bool { true }
}

#[tokio::test]
async fn test_probe_runs_once_under_concurrent_callers() {
    let backend = Arc::new(CountingBackend { calls: AtomicUsize::new(0), delay: Duration::from_millis(30) });
    let service = Arc::new(GenerationService::new(backend.clone()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.initialize().await })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap(), ServiceState::Ready);
    }

    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    assert_eq!(service.initialize().await, ServiceState::Ready);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_probe_degrades_and_generate_fails_without_calling_backend() {
    let backend = ScriptedBackend::new(vec![Err(LlmError::ApiError { status: 403, message: "bad key".into() })]);
    let service = GenerationService::new(backend.clone());

    assert_eq!(service.state(), ServiceState::Uninitialized);
    assert_eq!(service.initialize().await, ServiceState::Degraded);
    assert!(matches!(service.generate("hi".into()).await, Err(LlmError::Unavailable(_))));
    assert_eq!(backend.prompts(), vec!["Test connection".to_string()]);
}

#[tokio::test]
async fn test_empty_probe_reply_degrades() {
    let service = GenerationService::new(ScriptedBackend::new(vec![ok("   ")]));
    assert_eq!(service.initialize().await, ServiceState::Degraded);
}

#[tokio::test]
async fn test_disabled_service_is_degraded() {
    let service = GenerationService::disabled();
    assert_eq!(service.model_id(), None);
    assert_eq!(service.initialize().await, ServiceState::Degraded);
    assert!(service.answer("q", "").await.is_err());
}

#[tokio::test]
async fn test_generate_initializes_lazily_and_rejects_blank_answers() {
    let backend = ScriptedBackend::new(vec![ok("pong"), ok("<p>Answer</p>"), ok("\n")]);
    let service = GenerationService::new(backend.clone());

    let answer = service.answer("How does radiation affect DNA?", "Paper: A").await.unwrap();
    assert_eq!(answer, "<p>Answer</p>");
    assert!(matches!(service.summarize("text", SummaryKind::Plain).await, Err(LlmError::EmptyResponse)));

    let prompts = backend.prompts();
    assert_eq!(prompts.len(), 3);
    assert_eq!(prompts[0], "Test connection");
    assert!(prompts[1].contains("User Question: How does radiation affect DNA?"));
    assert!(prompts[2].starts_with("Provide a simple"));
}

#[tokio::test]
async fn test_task_prompts_reach_backend() {
    let backend = ScriptedBackend::new(vec![ok("pong"), ok("analysis"), ok("areas")]);
    let service = GenerationService::new(backend.clone());

    assert_eq!(service.analyze_paper("Abstract: bones").await.unwrap(), "analysis");
    assert_eq!(service.related_research("bone loss").await.unwrap(), "areas");

    let prompts = backend.prompts();
    assert!(prompts[1].ends_with("Paper content:\nAbstract: bones"));
    assert!(prompts[2].contains("\"bone loss\""));
}

#[tokio::test]
async fn test_transport_error_propagates_after_ready() {
    let backend = ScriptedBackend::new(vec![ok("pong"), Err(LlmError::ApiError { status: 500, message: "boom".into() })]);
    let service = GenerationService::new(backend);
    match service.generate("x".into()).await {
        Err(LlmError::ApiError { status, .. }) => assert_eq!(status, 500),
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(service.state(), ServiceState::Ready);
}

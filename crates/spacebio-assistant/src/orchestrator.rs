//! The assistant: library search, prompt context and answer bookkeeping.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use spacebio_common::{AttributeFilter, PdfDocument};
use spacebio_llm::{GenerationService, LlmError, ServiceState};
use spacebio_search::{rank, ScoredResult, SearchOptions};
use spacebio_store::MockDataStore;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::fallback::FallbackTopic;
use crate::markup::{has_visible_text, sanitize_markup};
use crate::transcript::{ConversationMessage, RelatedPaper, Transcript};

pub const GREETING: &str = "Hello! I'm your NASA Space Biology Research Assistant. I can help you explore and \
    understand research from NASA's space biology articles. Ask me anything about microgravity effects, astronaut \
    health, space agriculture, or any other space biology topic!";

pub const INIT_FAILURE_NOTICE: &str = "AI service initialization failed, but I can still help you search through \
    NASA research papers and provide information based on the available content.";

pub const SUGGESTED_QUESTIONS: [&str; 5] = [
    "How does microgravity affect plant growth?",
    "What are the health risks for astronauts on long missions?",
    "How do we protect astronauts from space radiation?",
    "What is bioregenerative life support?",
    "How does space affect human psychology?",
];

const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Papers used as prompt context and attached as related reading.
    pub context_results: usize,
    /// Characters of each paper's content included in the context.
    pub context_chars: usize,
    pub search: SearchOptions,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self { context_results: 3, context_chars: 1000, search: SearchOptions::default() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AskOutcome {
    /// The reply was appended to the transcript.
    Answered(ConversationMessage),
    /// A newer question was answered first; this reply was dropped.
    Superseded { sequence: u64 },
    /// Blank question, nothing recorded.
    Ignored,
}

/// Prompt context: one block per paper, content cut to `chars` characters.
pub fn build_context(hits: &[ScoredResult<'_, PdfDocument>], chars: usize) -> String {
    hits.iter()
        .map(|hit| {
            let content: String = hit.item.content.chars().take(chars).collect();
            format!("Paper: {}\nContent: {}", hit.item.title, content)
        })
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

pub struct Assistant {
    store: Arc<MockDataStore>,
    generator: Arc<GenerationService>,
    config: AssistantConfig,
    transcript: Mutex<Transcript>,
    last_sequence: AtomicU64,
}

impl Assistant {
    pub fn new(store: Arc<MockDataStore>, generator: Arc<GenerationService>, config: AssistantConfig) -> Self {
        Self {
            store,
            generator,
            config,
            transcript: Mutex::new(Transcript::default()),
            last_sequence: AtomicU64::new(0),
        }
    }

    /// Greet, then initialise generation. A degraded service adds a notice.
    pub async fn open_session(&self) -> ServiceState {
        self.transcript.lock().await.push(ConversationMessage::assistant(GREETING));

        let state = self.generator.initialize().await;
        if state == ServiceState::Degraded {
            self.transcript
                .lock()
                .await
                .push(ConversationMessage::assistant(INIT_FAILURE_NOTICE).offline());
        }
        info!(state = ?state, "💬 Assistant session opened");
        state
    }

    /// Answer `question`. Always yields exactly one reply per non-blank
    /// question; the reply is dropped only if a newer question was answered
    /// in the meantime.
    pub async fn ask(&self, question: &str) -> AskOutcome {
        let question = question.trim();
        if question.is_empty() {
            return AskOutcome::Ignored;
        }

        let sequence = self.last_sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.transcript.lock().await.push(ConversationMessage::user(question, sequence));

        let (context, related) = self.gather_context(question);
        debug!(sequence, related = related.len(), context_chars = context.len(), "assistant context built");

        // An answer that sanitises down to nothing counts as empty.
        let generated = self.generator.answer(question, &context).await.and_then(|html| {
            let clean = sanitize_markup(&html);
            if has_visible_text(&clean) { Ok(clean) } else { Err(LlmError::EmptyResponse) }
        });
        let reply = match generated {
            Ok(clean) => ConversationMessage::assistant(clean),
            Err(e) => {
                let topic = FallbackTopic::for_question(question);
                warn!(sequence, error = %e, topic = ?topic, "Generation failed, using offline answer");
                ConversationMessage::assistant(topic.answer()).offline()
            }
        }
        .with_related(related)
        .for_sequence(sequence);

        let mut transcript = self.transcript.lock().await;
        if transcript.push_answer(reply.clone()) {
            AskOutcome::Answered(reply)
        } else {
            info!(sequence, "Discarding answer to superseded question");
            AskOutcome::Superseded { sequence }
        }
    }

    fn gather_context(&self, question: &str) -> (String, Vec<RelatedPaper>) {
        let options = self.config.search.clone().with_limit(self.config.context_results);
        let hits = rank(question, &AttributeFilter::default(), self.store.all_pdfs(), &options);
        let context = build_context(&hits, self.config.context_chars);
        let related = hits.iter().map(RelatedPaper::from).collect();
        (context, related)
    }

    /// Copy of the transcript so far.
    pub async fn transcript(&self) -> Vec<ConversationMessage> {
        self.transcript.lock().await.messages().to_vec()
    }

    pub fn suggested_questions(&self) -> &'static [&'static str] {
        &SUGGESTED_QUESTIONS
    }

    pub fn service_state(&self) -> ServiceState {
        self.generator.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, title: &str, content: &str) -> PdfDocument {
        PdfDocument {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            keywords: vec![],
            organism: String::new(),
            mission: String::new(),
            year: 2022,
            experiment_type: String::new(),
            abstract_text: String::new(),
            file_path: String::new(),
        }
    }

    #[test]
    fn test_build_context_format() {
        let docs = [doc("a", "Bone A", "0123456789"), doc("b", "Bone B", "short")];
        let hits: Vec<_> = docs
            .iter()
            .map(|d| ScoredResult { item: d, score: 1, excerpt: String::new() })
            .collect();
        assert_eq!(
            build_context(&hits, 4),
            "Paper: Bone A\nContent: 0123\n\n---\n\nPaper: Bone B\nContent: shor"
        );
        assert_eq!(build_context(&[], 4), "");
    }
}

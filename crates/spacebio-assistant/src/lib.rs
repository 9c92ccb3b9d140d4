//! spacebio-assistant: Question answering over the PDF library.
//!
//! Every question is matched against the library, the best papers become
//! the prompt context, and the generation service writes the answer. When
//! generation is unavailable a fixed topic answer is used instead, so a
//! question always receives exactly one reply.

pub mod fallback;
pub mod markup;
pub mod transcript;
pub mod orchestrator;

pub use fallback::FallbackTopic;
pub use markup::{has_visible_text, sanitize_markup, to_plain_text};
pub use orchestrator::{Assistant, AssistantConfig, AskOutcome, GREETING, INIT_FAILURE_NOTICE, SUGGESTED_QUESTIONS};
pub use transcript::{ConversationMessage, RelatedPaper, Role, Transcript};

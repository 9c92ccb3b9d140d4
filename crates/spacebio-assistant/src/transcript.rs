//! Conversation messages and the append-only transcript.

use chrono::{DateTime, Utc};
use serde::Serialize;
use spacebio_common::PdfDocument;
use spacebio_search::ScoredResult;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// A library paper attached to an answer as further reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedPaper {
    pub id: String,
    pub title: String,
    pub year: u16,
    pub score: u32,
}

impl From<&ScoredResult<'_, PdfDocument>> for RelatedPaper {
    fn from(hit: &ScoredResult<'_, PdfDocument>) -> Self {
        Self {
            id: hit.item.id.clone(),
            title: hit.item.title.clone(),
            year: hit.item.year,
            score: hit.score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub related: Vec<RelatedPaper>,
    /// Content is a fixed answer, not a generated one.
    pub is_offline: bool,
    /// The question sequence number this message belongs to, if any.
    pub sequence: Option<u64>,
}

impl ConversationMessage {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            related: Vec::new(),
            is_offline: false,
            sequence: None,
        }
    }

    pub fn user(content: impl Into<String>, sequence: u64) -> Self {
        Self::new(Role::User, content).for_sequence(sequence)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn offline(mut self) -> Self {
        self.is_offline = true;
        self
    }

    pub fn with_related(mut self, related: Vec<RelatedPaper>) -> Self {
        self.related = related;
        self
    }

    pub fn for_sequence(mut self, sequence: u64) -> Self {
        self.sequence = Some(sequence);
        self
    }
}

/// Messages in append order. Nothing is ever edited or removed.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<ConversationMessage>,
    newest_answered: Option<u64>,
}

impl Transcript {
    pub fn push(&mut self, message: ConversationMessage) {
        self.messages.push(message);
    }

    /// Append an answer unless an answer to a newer question is already in
    /// the transcript. Returns whether the answer was appended.
    pub fn push_answer(&mut self, message: ConversationMessage) -> bool {
        if let (Some(sequence), Some(newest)) = (message.sequence, self.newest_answered) {
            if sequence < newest {
                return false;
            }
        }
        if let Some(sequence) = message.sequence {
            self.newest_answered = Some(sequence);
        }
        self.messages.push(message);
        true
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_in_order_are_all_kept() {
        let mut t = Transcript::default();
        assert!(t.push_answer(ConversationMessage::assistant("a").for_sequence(1)));
        assert!(t.push_answer(ConversationMessage::assistant("b").for_sequence(2)));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_stale_answer_discarded() {
        let mut t = Transcript::default();
        t.push(ConversationMessage::user("first", 1));
        t.push(ConversationMessage::user("second", 2));
        assert!(t.push_answer(ConversationMessage::assistant("second answer").for_sequence(2)));
        assert!(!t.push_answer(ConversationMessage::assistant("first answer").for_sequence(1)));
        assert_eq!(t.len(), 3);
        assert_eq!(t.messages()[2].content, "second answer");
    }

    #[test]
    fn test_unsequenced_messages_always_appended() {
        let mut t = Transcript::default();
        assert!(t.push_answer(ConversationMessage::assistant("b").for_sequence(5)));
        assert!(t.push_answer(ConversationMessage::assistant("notice")));
        assert!(t.messages().iter().all(|m| m.role == Role::Assistant));
    }

    #[test]
    fn test_message_builders() {
        let m = ConversationMessage::assistant("x").offline().for_sequence(3);
        assert!(m.is_offline);
        assert_eq!(m.sequence, Some(3));
        assert_eq!(ConversationMessage::user("q", 7).role, Role::User);
    }
}

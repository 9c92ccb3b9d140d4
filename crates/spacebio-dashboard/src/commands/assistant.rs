//! Research assistant tab: one-shot questions and an interactive chat.

use anyhow::Result;
use spacebio_assistant::{to_plain_text, AskOutcome, Assistant, ConversationMessage, Role};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::print_json;
use crate::session::Session;

const QUIT_WORDS: [&str; 3] = ["quit", "exit", ":q"];

pub async fn ask(session: &Session, question: &str, json: bool) -> Result<()> {
    let assistant = session.assistant();
    assistant.open_session().await;

    match assistant.ask(question).await {
        AskOutcome::Answered(message) if json => print_json(&message)?,
        AskOutcome::Answered(message) => print!("{}", render_message(&message)),
        AskOutcome::Ignored => println!("Please enter a question."),
        AskOutcome::Superseded { .. } => {}
    }
    Ok(())
}

pub async fn chat(session: &Session) -> Result<()> {
    let assistant = session.assistant();
    assistant.open_session().await;
    for message in assistant.transcript().await {
        print!("{}", render_message(&message));
    }
    print!("{}", render_suggestions(&assistant));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if QUIT_WORDS.contains(&line.to_lowercase().as_str()) {
            break;
        }
        if let AskOutcome::Answered(message) = assistant.ask(line).await {
            print!("{}", render_message(&message));
        }
    }
    println!("Goodbye.");
    Ok(())
}

fn render_suggestions(assistant: &Assistant) -> String {
    let mut out = String::from("Try asking:\n");
    for (i, q) in assistant.suggested_questions().iter().enumerate() {
        out.push_str(&format!("  {}. {q}\n", i + 1));
    }
    out.push('\n');
    out
}

pub fn render_message(message: &ConversationMessage) -> String {
    let speaker = match message.role {
        Role::User => "You",
        Role::Assistant => "Assistant",
    };
    let offline = if message.is_offline { " (offline)" } else { "" };
    let mut out = format!(
        "[{}] {speaker}{offline}:\n{}\n",
        message.timestamp.format("%H:%M"),
        to_plain_text(&message.content)
    );
    if !message.related.is_empty() {
        out.push_str("Related papers:\n");
        for paper in &message.related {
            out.push_str(&format!("  - {} ({}) [{}]\n", paper.title, paper.year, paper.id));
        }
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use spacebio_assistant::RelatedPaper;

    #[test]
    fn test_offline_answer_rendering() {
        let message = ConversationMessage::assistant("<p>Space radiation &amp; DNA</p>")
            .offline()
            .with_related(vec![RelatedPaper {
                id: "PMC1".to_string(),
                title: "Radiation Study".to_string(),
                year: 2022,
                score: 1,
            }]);
        let out = render_message(&message);
        assert!(out.contains("Assistant (offline):\nSpace radiation & DNA\n"));
        assert!(out.ends_with("Related papers:\n  - Radiation Study (2022) [PMC1]\n\n"));
    }

    #[test]
    fn test_user_message_rendering() {
        let out = render_message(&ConversationMessage::user("How do plants grow?", 1));
        assert!(out.contains("You:\nHow do plants grow?\n"));
        assert!(!out.contains("Related papers"));
    }
}

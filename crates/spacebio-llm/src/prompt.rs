//! Prompt builders for each generation task.

use serde::{Deserialize, Serialize};

/// Sent once to check that the backend answers at all.
pub const PROBE_PROMPT: &str = "Test connection";

/// Paper analysis only looks at the start of the document.
pub const ANALYSIS_CHAR_LIMIT: usize = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    Plain,
    Technical,
}

pub fn answer(question: &str, context: &str) -> String {
    format!(
        "You are an expert NASA space biology research assistant. You have access to comprehensive NASA \
research articles about space biology, microgravity effects, astronaut health, space agriculture, and related topics.

Context from NASA research articles:
{context}

User Question: {question}

IMPORTANT: Format your response using clean HTML markup for better readability. Use the following guidelines:

1. Use <h3> for main section headings
2. Use <h4> for subsection headings
3. Use <p> for paragraphs
4. Use <ul> and <li> for bullet points
5. Use <strong> for emphasis
6. Use <em> for italics
7. Use <br> for line breaks when needed
8. No markdown syntax (**, *, #, etc.) - use HTML only

Structure your response with:
- <h3>Key Findings</h3>
- <h3>Scientific Details</h3>
- <h3>Applications & Implications</h3>
- <h3>Related Research Areas</h3>

Keep the response informative but accessible. When referencing research context, clearly indicate it. \
When using general knowledge, mention it as \"Based on general NASA research knowledge\".

Provide a comprehensive answer in clean HTML format."
    )
}

pub fn summary(text: &str, kind: SummaryKind) -> String {
    match kind {
        SummaryKind::Plain => format!(
            "Provide a simple, easy-to-understand summary of this NASA space biology research in plain \
language that anyone can understand:\n\n{text}"
        ),
        SummaryKind::Technical => format!(
            "Provide a technical summary of this NASA space biology research, highlighting key findings, \
methodologies, and implications:\n\n{text}"
        ),
    }
}

pub fn analysis(paper_content: &str) -> String {
    let excerpt: String = paper_content.chars().take(ANALYSIS_CHAR_LIMIT).collect();
    format!(
        "Analyze this NASA space biology research paper and extract:
1. Key findings
2. Research methodology
3. Implications for space exploration
4. Connection to other space biology research
5. Practical applications

Paper content:
{excerpt}"
    )
}

pub fn related_research(topic: &str) -> String {
    format!(
        "Based on the topic \"{topic}\" in space biology and NASA research, suggest 5 related research areas \
or questions that would be interesting to explore. Focus on:
- Microgravity effects
- Astronaut health
- Space agriculture
- Life support systems
- Planetary biology
- Space medicine

Provide specific, actionable research questions or topics."
    )
}

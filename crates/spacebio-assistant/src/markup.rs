//! Markup handling for generated answers.
//!
//! Answers are requested as a small HTML subset. Anything outside that
//! subset is removed before an answer reaches the transcript.

use std::sync::OnceLock;

use regex::{Captures, Regex};

pub const ALLOWED_TAGS: [&str; 8] = ["h3", "h4", "p", "ul", "li", "strong", "em", "br"];

fn dropped_blocks() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<!--.*?-->|<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
            .expect("block pattern is valid")
    })
}

fn tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<\s*(/?)\s*([A-Za-z][A-Za-z0-9]*)\b[^>]*>").expect("tag pattern is valid")
    })
}

fn blank_lines() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n(?:[ \t]*\n)+").expect("blank-line pattern is valid"))
}

/// Strip a surrounding ```html fence, which models add despite instructions.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Keep only the allowed tags, without attributes. Text inside removed tags
/// stays; script, style and comment blocks are removed with their content.
pub fn sanitize_markup(html: &str) -> String {
    let without_blocks = dropped_blocks().replace_all(strip_code_fence(html), "");
    tag()
        .replace_all(&without_blocks, |caps: &Captures| {
            let closing = &caps[1];
            let name = caps[2].to_ascii_lowercase();
            match name.as_str() {
                "br" => "<br>".to_string(),
                n if ALLOWED_TAGS.contains(&n) => format!("<{closing}{n}>"),
                _ => String::new(),
            }
        })
        .trim()
        .to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Whether sanitised markup leaves any readable text once tags are gone.
pub fn has_visible_text(html: &str) -> bool {
    let text = tag().replace_all(html, "");
    !decode_entities(&text).trim().is_empty()
}

/// Render sanitised markup as terminal text.
pub fn to_plain_text(html: &str) -> String {
    let clean = sanitize_markup(html);
    let text = tag().replace_all(&clean, |caps: &Captures| {
        let closing = !caps[1].is_empty();
        match (caps[2].to_ascii_lowercase().as_str(), closing) {
            ("h3", false) => "\n\n## ",
            ("h4", false) => "\n\n### ",
            ("h3" | "h4" | "p" | "ul", _) => "\n\n",
            ("li", false) => "\n  • ",
            ("br", _) => "\n",
            _ => "",
        }
    });
    let text = decode_entities(&text);
    blank_lines().replace_all(text.trim(), "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_allowed_tags_kept_attributes_stripped() {
        let html = r#"<h3 class="title">Key Findings</h3><p style="color:red">Bone <strong>loss</strong></p>"#;
        assert_eq!(sanitize_markup(html), "<h3>Key Findings</h3><p>Bone <strong>loss</strong></p>");
    }

    #[test]
    fn test_disallowed_tags_removed_text_kept() {
        let html = r#"<div><a href="javascript:alert(1)">link</a> <img src=x onerror=alert(1)>text</div>"#;
        assert_eq!(sanitize_markup(html), "link text");
    }

    #[test]
    fn test_script_and_style_blocks_removed_entirely() {
        let html = "<p>a</p><script>alert('x')</script><STYLE>p{}</STYLE><!-- note --><p>b</p>";
        assert_eq!(sanitize_markup(html), "<p>a</p><p>b</p>");
    }

    #[test]
    fn test_br_variants_normalised() {
        assert_eq!(sanitize_markup("a<br/>b<BR />c"), "a<br>b<br>c");
    }

    #[test]
    fn test_code_fence_removed() {
        assert_eq!(sanitize_markup("```html\n<p>Hi</p>\n```"), "<p>Hi</p>");
        assert_eq!(sanitize_markup("<p>Hi</p>"), "<p>Hi</p>");
    }

    #[test]
    fn test_plain_text_rendering() {
        let html = "<h3>Key Findings</h3><ul><li>Bone &amp; muscle</li><li>Vision</li></ul><p>Done<br>now</p>";
        assert_eq!(
            to_plain_text(html),
            "## Key Findings\n\n  • Bone & muscle\n  • Vision\n\nDone\nnow"
        );
    }

    #[test]
    fn test_markup_only_input_has_no_visible_text() {
        for html in ["<div><script>x()</script></div>", "```html\n```", "<!-- -->", "<p> &nbsp; </p><ul><li></li></ul>"] {
            assert!(!has_visible_text(&sanitize_markup(html)), "{html}");
        }
        assert!(has_visible_text(&sanitize_markup("<p>Bone</p>")));
    }

    #[test]
    fn test_plain_text_of_plain_input_is_unchanged() {
        let text = "Space radiation is a major concern for long-duration missions.";
        assert_eq!(to_plain_text(text), text);
    }
}

/// Short excerpt shown next to a search hit.

/// Number of leading characters used when no sentence mentions a token.
pub const EXCERPT_FALLBACK_CHARS: usize = 200;

/// First sentence of `body` (split on runs of `.`, `!`, `?`) that contains
/// any of `tokens`, trimmed and terminated with a period. Without such a
/// sentence, the first 200 characters of `body` followed by `...`.
pub fn excerpt(body: &str, tokens: &[String]) -> String {
    let hit = body
        .split(|c: char| matches!(c, '.' | '!' | '?'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .find(|sentence| {
            let lower = sentence.to_lowercase();
            tokens.iter().any(|t| lower.contains(t.as_str()))
        });

    match hit {
        Some(sentence) => format!("{sentence}."),
        None => {
            let head: String = body.chars().take(EXCERPT_FALLBACK_CHARS).collect();
            format!("{head}...")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_first_matching_sentence_wins() {
        let body = "Intro text here. Radiation damages DNA! Radiation also alters repair?";
        assert_eq!(excerpt(body, &toks(&["radiation"])), "Radiation damages DNA.");
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let body = "Nothing. MICROGRAVITY changes growth.";
        assert_eq!(excerpt(body, &toks(&["microgravity"])), "MICROGRAVITY changes growth.");
    }

    #[test]
    fn test_fallback_truncates_on_char_boundary() {
        let body = "é".repeat(250);
        let out = excerpt(&body, &toks(&["zzz"]));
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), EXCERPT_FALLBACK_CHARS + 3);
    }

    #[test]
    fn test_short_body_without_match_keeps_whole_body() {
        assert_eq!(excerpt("Tiny body", &[]), "Tiny body...");
    }
}

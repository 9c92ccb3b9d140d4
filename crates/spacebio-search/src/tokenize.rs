/// Query tokenization.

/// Default minimum token length in characters. Shorter tokens ("of", "in")
/// are dropped before scoring.
pub const DEFAULT_MIN_TOKEN_LEN: usize = 3;

/// Lower-case `query`, split on whitespace, strip punctuation from token
/// edges, and keep tokens of at least `min_len` characters.
/// Duplicates are collapsed; first-occurrence order is kept.
pub fn tokenize(query: &str, min_len: usize) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for raw in query.to_lowercase().split_whitespace() {
        let token = raw.trim_matches(|c: char| c.is_ascii_punctuation());
        if token.is_empty() || token.chars().count() < min_len {
            continue;
        }
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
    }
    tokens
}

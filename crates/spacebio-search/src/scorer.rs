//! Term-presence relevance scoring and ranking.

use std::cmp::Reverse;

use serde::Serialize;
use spacebio_common::{AttributeFilter, Item};

use crate::excerpt::excerpt;
use crate::tokenize::{tokenize, DEFAULT_MIN_TOKEN_LEN};

/// Per-call knobs. Call sites differ in how many hits they want.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Tokens shorter than this many characters are ignored.
    pub min_token_len: usize,
    /// Keep only the top `limit` results.
    pub limit: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { min_token_len: DEFAULT_MIN_TOKEN_LEN, limit: None }
    }
}

impl SearchOptions {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_min_token_len(mut self, min_token_len: usize) -> Self {
        self.min_token_len = min_token_len;
        self
    }
}

/// One ranked hit. Borrowed from the collection; lives as long as the query result.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredResult<'a, T> {
    pub item: &'a T,
    pub score: u32,
    pub excerpt: String,
}

/// Lower-cased concatenation of every searchable field of `item`.
pub fn haystack<T: Item + ?Sized>(item: &T) -> String {
    let mut text = String::with_capacity(item.title().len() + item.body().len() + 64);
    text.push_str(item.title());
    text.push(' ');
    text.push_str(item.body());
    for keyword in item.keywords() {
        text.push(' ');
        text.push_str(keyword);
    }
    if let Some(abstract_text) = item.abstract_text() {
        text.push(' ');
        text.push_str(abstract_text);
    }
    text.to_lowercase()
}

/// Number of distinct `tokens` occurring as substrings of `haystack`.
pub fn score_haystack(haystack: &str, tokens: &[String]) -> u32 {
    tokens.iter().filter(|t| haystack.contains(t.as_str())).count() as u32
}

/// Rank `items` against `query`, restricted by `filter`.
///
/// A blank query browses: every item passing the filter is returned with
/// score 0 in collection order. Otherwise items scoring 0 are dropped, and
/// a query with no usable tokens returns nothing. Results are sorted by
/// descending score; equal scores keep collection order.
pub fn rank<'a, T: Item>(
    query: &str,
    filter: &AttributeFilter,
    items: &'a [T],
    options: &SearchOptions,
) -> Vec<ScoredResult<'a, T>> {
    let browse = query.trim().is_empty();
    let tokens = tokenize(query, options.min_token_len);

    if !browse && tokens.is_empty() {
        tracing::debug!(query, "no usable tokens in query");
        return Vec::new();
    }

    let mut hits: Vec<(&'a T, u32)> = items
        .iter()
        .filter(|item| filter.matches(*item))
        .filter_map(|item| {
            if browse {
                return Some((item, 0));
            }
            let score = score_haystack(&haystack(item), &tokens);
            (score > 0).then_some((item, score))
        })
        .collect();

    // sort_by_key is stable: ties stay in collection order
    hits.sort_by_key(|(_, score)| Reverse(*score));

    if let Some(limit) = options.limit {
        hits.truncate(limit);
    }

    tracing::debug!(query, tokens = tokens.len(), results = hits.len(), "ranked");

    hits.into_iter()
        .map(|(item, score)| ScoredResult {
            item,
            score,
            excerpt: excerpt(item.body(), &tokens),
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use spacebio_common::{Publication, Summary};

    fn publication(id: u32, title: &str, keywords: &[&str]) -> Publication {
        Publication {
            id,
            title: title.to_string(),
            authors: vec![],
            year: 2020 + (id % 4) as u16,
            mission: if id % 2 == 0 { "ISS National Lab" } else { "Artemis Analog" }.to_string(),
            organism: if id % 3 == 0 { "Homo sapiens" } else { "Arabidopsis thaliana" }.to_string(),
            experiment_type: "Space Biology".to_string(),
            abstract_text: String::new(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            connections: vec![],
            summary: Summary { plain: String::new(), technical: String::new() },
        }
    }

    fn ids<T: Item>(results: &[ScoredResult<'_, T>]) -> Vec<String> {
        results.iter().map(|r| r.item.item_id()).collect()
    }

    #[test]
    fn test_bone_astronauts_scenario() {
        let items = vec![
            publication(1, "Bone Density Changes", &["bone", "astronauts"]),
            publication(2, "Plant Growth", &["plant"]),
        ];
        let results = rank("bone astronauts", &AttributeFilter::default(), &items, &SearchOptions::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].item.id, 1);
        assert_eq!(results[0].score, 2);
    }

    #[test]
    fn test_score_counts_presence_not_frequency() {
        let items = vec![publication(1, "bone bone bone", &["bone"])];
        let results = rank("bone", &AttributeFilter::default(), &items, &SearchOptions::default());
        assert_eq!(results[0].score, 1);
    }

    #[test]
    fn test_ties_keep_collection_order() {
        let items = vec![
            publication(1, "radiation shielding", &[]),
            publication(2, "microgravity radiation", &[]),
            publication(3, "radiation dosimetry", &[]),
        ];
        let results = rank("radiation microgravity", &AttributeFilter::default(), &items, &SearchOptions::default());
        assert_eq!(ids(&results), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_limit_truncates_after_sorting() {
        let items = vec![
            publication(1, "plant", &[]),
            publication(2, "plant growth", &[]),
            publication(3, "plant growth space", &[]),
        ];
        let opts = SearchOptions::default().with_limit(2);
        let results = rank("plant growth space", &AttributeFilter::default(), &items, &opts);
        assert_eq!(ids(&results), vec!["3", "2"]);
    }

    #[test]
    fn test_blank_query_browses_with_filter() {
        let items = vec![
            publication(1, "a", &[]),
            publication(2, "b", &[]),
            publication(3, "c", &[]),
        ];
        let filter = AttributeFilter { organism: Some("sapiens".to_string()), ..Default::default() };
        let results = rank("  ", &filter, &items, &SearchOptions::default());
        assert_eq!(ids(&results), vec!["3"]);
        assert_eq!(results[0].score, 0);
    }

    #[test]
    fn test_query_of_only_short_tokens_returns_nothing() {
        let items = vec![publication(1, "of in at", &[])];
        assert!(rank("of in", &AttributeFilter::default(), &items, &SearchOptions::default()).is_empty());
    }

    #[test]
    fn test_min_token_len_is_configurable() {
        let items = vec![publication(1, "dna repair", &[])];
        let strict = SearchOptions::default().with_min_token_len(4);
        assert!(rank("dna", &AttributeFilter::default(), &items, &strict).is_empty());
        assert_eq!(rank("dna", &AttributeFilter::default(), &items, &SearchOptions::default()).len(), 1);
    }

    #[test]
    fn test_filter_can_exclude_scored_item() {
        let items = vec![publication(1, "bone", &[]), publication(2, "bone", &[])];
        let filter = AttributeFilter { mission: Some("iss".to_string()), ..Default::default() };
        let results = rank("bone", &filter, &items, &SearchOptions::default());
        assert_eq!(ids(&results), vec!["2"]);
    }

    // ── Properties ────────────────────────────────────────────────────────────

    const VOCAB: &[&str] = &[
        "bone", "plant", "radiation", "microgravity", "astronaut", "dna", "growth", "mars", "cell", "iss",
    ];

    fn corpus() -> impl Strategy<Value = Vec<Publication>> {
        prop::collection::vec(
            (prop::sample::subsequence(VOCAB.to_vec(), 0..5), prop::sample::subsequence(VOCAB.to_vec(), 0..3)),
            0..12,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (title, keywords))| publication(i as u32, &title.join(" "), &keywords))
                .collect()
        })
    }

    fn query() -> impl Strategy<Value = String> {
        prop::sample::subsequence(VOCAB.to_vec(), 1..4).prop_map(|words| words.join(" "))
    }

    proptest! {
        #[test]
        fn proptest_results_sorted_by_descending_score(items in corpus(), q in query()) {
            let results = rank(&q, &AttributeFilter::default(), &items, &SearchOptions::default());
            for pair in results.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }
        }

        #[test]
        fn proptest_every_result_contains_a_token(items in corpus(), q in query()) {
            let tokens = tokenize(&q, DEFAULT_MIN_TOKEN_LEN);
            let results = rank(&q, &AttributeFilter::default(), &items, &SearchOptions::default());
            for r in &results {
                prop_assert!(r.score > 0);
                let hay = haystack(r.item);
                prop_assert!(tokens.iter().any(|t| hay.contains(t.as_str())));
            }
        }

        #[test]
        fn proptest_rank_is_idempotent(items in corpus(), q in query()) {
            let a = rank(&q, &AttributeFilter::default(), &items, &SearchOptions::default());
            let b = rank(&q, &AttributeFilter::default(), &items, &SearchOptions::default());
            prop_assert_eq!(ids(&a), ids(&b));
            let scores_a: Vec<u32> = a.iter().map(|r| r.score).collect();
            let scores_b: Vec<u32> = b.iter().map(|r| r.score).collect();
            prop_assert_eq!(scores_a, scores_b);
        }

        #[test]
        fn proptest_filter_is_subset(items in corpus(), q in query(), year in 2020u16..2024) {
            let all = ids(&rank(&q, &AttributeFilter::default(), &items, &SearchOptions::default()));
            let filter = AttributeFilter { year: Some(year), ..Default::default() };
            let filtered = ids(&rank(&q, &filter, &items, &SearchOptions::default()));
            for id in &filtered {
                prop_assert!(all.contains(id));
            }
        }
    }
}

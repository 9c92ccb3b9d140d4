//! Library browsing helpers: topic categories, the single-substring library
//! filter, keyword-overlap "related papers", and pagination.

use serde::{Deserialize, Serialize};
use spacebio_common::Item;

/// Topic shelves of the PDF library. `None` at call sites means "all papers".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LibraryCategory {
    Microgravity,
    Radiation,
    Plant,
    Health,
    Psychology,
}

impl LibraryCategory {
    pub const ALL: [LibraryCategory; 5] = [
        LibraryCategory::Microgravity,
        LibraryCategory::Radiation,
        LibraryCategory::Plant,
        LibraryCategory::Health,
        LibraryCategory::Psychology,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LibraryCategory::Microgravity => "Microgravity",
            LibraryCategory::Radiation    => "Radiation",
            LibraryCategory::Plant        => "Plant Biology",
            LibraryCategory::Health       => "Astronaut Health",
            LibraryCategory::Psychology   => "Psychology",
        }
    }

    /// Keyword fragments that place an item on this shelf.
    pub fn terms(&self) -> &'static [&'static str] {
        match self {
            LibraryCategory::Microgravity => &["microgravity"],
            LibraryCategory::Radiation    => &["radiation"],
            LibraryCategory::Plant        => &["plant", "agriculture"],
            LibraryCategory::Health       => &["health", "medical"],
            LibraryCategory::Psychology   => &["psychology", "mental"],
        }
    }

    pub fn matches<T: Item + ?Sized>(&self, item: &T) -> bool {
        item.keywords().iter().any(|k| {
            let k = k.to_lowercase();
            self.terms().iter().any(|term| k.contains(term))
        })
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "microgravity" => Some(LibraryCategory::Microgravity),
            "radiation"    => Some(LibraryCategory::Radiation),
            "plant"        => Some(LibraryCategory::Plant),
            "health"       => Some(LibraryCategory::Health),
            "psychology"   => Some(LibraryCategory::Psychology),
            _              => None,
        }
    }
}

/// Per-category item counts, in `LibraryCategory::ALL` order.
pub fn category_counts<T: Item>(items: &[T]) -> Vec<(LibraryCategory, usize)> {
    LibraryCategory::ALL
        .iter()
        .map(|c| (*c, items.iter().filter(|i| c.matches(*i)).count()))
        .collect()
}

/// Library view filter: the whole lower-cased query must occur in the title,
/// the body or one keyword; then the optional category applies.
pub fn filter_library<'a, T: Item>(
    items: &'a [T],
    query: &str,
    category: Option<LibraryCategory>,
) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| {
            needle.is_empty()
                || item.title().to_lowercase().contains(&needle)
                || item.body().to_lowercase().contains(&needle)
                || item.keywords().iter().any(|k| k.to_lowercase().contains(&needle))
        })
        .filter(|item| category.map_or(true, |c| c.matches(*item)))
        .collect()
}

// ── Related items ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct RelatedMatch<'a, T> {
    pub item: &'a T,
    /// Input keywords shared with the item.
    pub common_keywords: Vec<String>,
    pub score: u32,
}

/// Items sharing keywords with `keywords`. A keyword is shared when it and
/// one of the item's keywords contain each other (either direction,
/// case-insensitive). The item with id `exclude_id` is skipped.
pub fn related_by_keywords<'a, T: Item>(
    keywords: &[String],
    exclude_id: Option<&str>,
    items: &'a [T],
    limit: usize,
) -> Vec<RelatedMatch<'a, T>> {
    let wanted: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

    let mut related: Vec<RelatedMatch<'a, T>> = items
        .iter()
        .filter(|item| exclude_id.map_or(true, |id| item.item_id() != id))
        .filter_map(|item| {
            let own: Vec<String> = item.keywords().iter().map(|k| k.to_lowercase()).collect();
            let common: Vec<String> = wanted
                .iter()
                .filter(|k| own.iter().any(|pk| pk.contains(k.as_str()) || k.contains(pk.as_str())))
                .cloned()
                .collect();
            if common.is_empty() {
                return None;
            }
            let score = common.len() as u32;
            Some(RelatedMatch { item, common_keywords: common, score })
        })
        .collect();

    related.sort_by(|a, b| b.score.cmp(&a.score));
    related.truncate(limit);
    related
}

// ── Pagination ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based page number actually served.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slice out 1-based `page` of `per_page` items. Page 0 is treated as page 1;
/// a page past the end is empty.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> Page<'_, T> {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let total_pages = items.len().div_ceil(per_page);
    let start = ((page - 1) * per_page).min(items.len());
    let end = (start + per_page).min(items.len());
    Page { items: &items[start..end], page, total_pages, total_items: items.len() }
}

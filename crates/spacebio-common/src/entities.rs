/// Core record types for the research corpus.
/// Publications back the catalog views, PDF documents back the library and
/// the assistant context. Both are created once per session and never mutated.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Item: the searchable view shared by publications and documents
// ---------------------------------------------------------------------------

/// Read-only view of a corpus record used by search, filtering and ranking.
pub trait Item {
    /// Stable identifier, rendered as text.
    fn item_id(&self) -> String;
    fn title(&self) -> &str;
    /// Main text: the abstract for publications, the full content for documents.
    fn body(&self) -> &str;
    fn keywords(&self) -> &[String];
    /// Secondary summary text appended to the search haystack, if any.
    fn abstract_text(&self) -> Option<&str> { None }

    fn year(&self) -> u16;
    fn organism(&self) -> &str;
    fn experiment_type(&self) -> &str;
    fn mission(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Publication
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub plain: String,
    pub technical: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Publication {
    pub id: u32,
    pub title: String,
    pub authors: Vec<String>,
    pub year: u16,
    pub mission: String,
    pub organism: String,
    pub experiment_type: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub keywords: Vec<String>,
    /// Free-form concept slugs linking the publication to graph topics.
    pub connections: Vec<String>,
    pub summary: Summary,
}

impl Item for Publication {
    fn item_id(&self) -> String { self.id.to_string() }
    fn title(&self) -> &str { &self.title }
    fn body(&self) -> &str { &self.abstract_text }
    fn keywords(&self) -> &[String] { &self.keywords }
    fn year(&self) -> u16 { self.year }
    fn organism(&self) -> &str { &self.organism }
    fn experiment_type(&self) -> &str { &self.experiment_type }
    fn mission(&self) -> &str { &self.mission }
}

// ---------------------------------------------------------------------------
// PDF document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfDocument {
    /// PubMed Central identifier, e.g. `PMC10020673`.
    pub id: String,
    pub title: String,
    pub content: String,
    pub keywords: Vec<String>,
    pub organism: String,
    pub mission: String,
    pub year: u16,
    pub experiment_type: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub file_path: String,
}

impl Item for PdfDocument {
    fn item_id(&self) -> String { self.id.clone() }
    fn title(&self) -> &str { &self.title }
    fn body(&self) -> &str { &self.content }
    fn keywords(&self) -> &[String] { &self.keywords }
    fn abstract_text(&self) -> Option<&str> { Some(&self.abstract_text) }
    fn year(&self) -> u16 { self.year }
    fn organism(&self) -> &str { &self.organism }
    fn experiment_type(&self) -> &str { &self.experiment_type }
    fn mission(&self) -> &str { &self.mission }
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub year: u16,
    pub title: String,
    pub mission: String,
    pub experiment_type: String,
    pub id: u32,
}

impl From<&Publication> for TimelineEntry {
    fn from(p: &Publication) -> Self {
        Self {
            year: p.year,
            title: p.title.clone(),
            mission: p.mission.clone(),
            experiment_type: p.experiment_type.clone(),
            id: p.id,
        }
    }
}

// ---------------------------------------------------------------------------
// Attribute filter
// ---------------------------------------------------------------------------

/// Structured filter applied on top of free-text search.
/// Text attributes match as case-insensitive substrings, the year exactly.
/// A filter with every field `None` places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFilter {
    pub organism: Option<String>,
    pub experiment_type: Option<String>,
    pub mission: Option<String>,
    pub year: Option<u16>,
}

impl AttributeFilter {
    pub fn is_empty(&self) -> bool {
        self.organism.is_none()
            && self.experiment_type.is_none()
            && self.mission.is_none()
            && self.year.is_none()
    }

    pub fn matches<T: Item + ?Sized>(&self, item: &T) -> bool {
        fn contains_ci(haystack: &str, needle: &Option<String>) -> bool {
            match needle {
                Some(n) => haystack.to_lowercase().contains(&n.to_lowercase()),
                None => true,
            }
        }

        contains_ci(item.organism(), &self.organism)
            && contains_ci(item.experiment_type(), &self.experiment_type)
            && contains_ci(item.mission(), &self.mission)
            && self.year.map_or(true, |y| item.year() == y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publication() -> Publication {
        Publication {
            id: 7,
            title: "Bone Density Changes".to_string(),
            authors: vec![],
            year: 2022,
            mission: "Artemis Analog".to_string(),
            organism: "Homo sapiens".to_string(),
            experiment_type: "Human Physiology".to_string(),
            abstract_text: "Bone loss in orbit.".to_string(),
            keywords: vec!["bone".to_string()],
            connections: vec![],
            summary: Summary { plain: String::new(), technical: String::new() },
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = AttributeFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&publication()));
    }

    #[test]
    fn test_filter_text_attributes_are_case_insensitive_substrings() {
        let filter = AttributeFilter {
            organism: Some("SAPIENS".to_string()),
            mission: Some("artemis".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&publication()));

        let miss = AttributeFilter { experiment_type: Some("botan".to_string()), ..Default::default() };
        assert!(!miss.matches(&publication()));
    }

    #[test]
    fn test_filter_year_is_exact() {
        let hit = AttributeFilter { year: Some(2022), ..Default::default() };
        let miss = AttributeFilter { year: Some(2023), ..Default::default() };
        assert!(hit.matches(&publication()));
        assert!(!miss.matches(&publication()));
    }

    #[test]
    fn test_timeline_entry_from_publication() {
        let entry = TimelineEntry::from(&publication());
        assert_eq!(entry.id, 7);
        assert_eq!(entry.year, 2022);
        assert_eq!(entry.experiment_type, "Human Physiology");
    }
}

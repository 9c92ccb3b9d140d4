//! Search, summary and timeline tabs over the publication catalog.

use anyhow::{Context, Result};
use spacebio_assistant::to_plain_text;
use spacebio_common::{AttributeFilter, Publication, TimelineEntry};
use spacebio_llm::SummaryKind;
use spacebio_store::timeline::{experiment_type_counts, group_by_year};
use tracing::info;

use super::print_json;
use crate::session::Session;

// ── search ────────────────────────────────────────────────────────────────────

pub async fn search(
    session: &Session,
    query: &str,
    filter: AttributeFilter,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let limit = limit.unwrap_or(session.config.search.search_limit);
    let mut results = session.store.search(query, &filter).await;
    let total = results.len();
    results.truncate(limit);
    info!(query, results = total, shown = results.len(), "🔍 Catalog search");

    if json {
        return print_json(&results);
    }
    print!("{}", render_publications(&results));
    Ok(())
}

pub fn render_publications(publications: &[Publication]) -> String {
    if publications.is_empty() {
        return "No results found.\n".to_string();
    }
    let mut out = String::new();
    for p in publications {
        out.push_str(&format!("[{}] {} ({})\n", p.id, p.title, p.year));
        out.push_str(&format!("    {} | {} | {}\n", p.mission, p.organism, p.experiment_type));
        out.push_str(&format!("    Authors: {}\n", p.authors.join(", ")));
        out.push_str(&format!("    Keywords: {}\n", p.keywords.join(", ")));
    }
    out
}

// ── summary ───────────────────────────────────────────────────────────────────

pub async fn summary(session: &Session, id: u32, kind: SummaryKind, generate: bool, json: bool) -> Result<()> {
    if generate {
        return generated_summary(session, id, kind).await;
    }

    let Some(summary) = session.store.get_summary(id).await else {
        println!("No summary available for publication {id}.");
        return Ok(());
    };
    if json {
        return print_json(&summary);
    }
    let text = match kind {
        SummaryKind::Plain => &summary.plain,
        SummaryKind::Technical => &summary.technical,
    };
    println!("{text}");
    Ok(())
}

/// Ask the model for a fresh summary of the abstract. Failures are reported,
/// there is no offline summary.
async fn generated_summary(session: &Session, id: u32, kind: SummaryKind) -> Result<()> {
    let Some(publication) = session.store.publications().iter().find(|p| p.id == id) else {
        println!("No publication with id {id}.");
        return Ok(());
    };
    let html = session
        .generator
        .summarize(&publication.abstract_text, kind)
        .await
        .with_context(|| format!("generating a {kind:?} summary for publication {id}"))?;
    println!("{}", to_plain_text(&html));
    Ok(())
}

// ── timeline ──────────────────────────────────────────────────────────────────

pub async fn timeline(session: &Session, year: Option<u16>, json: bool) -> Result<()> {
    let mut entries = session.store.get_timeline().await;
    if let Some(year) = year {
        entries.retain(|e| e.year == year);
    }
    if json {
        return print_json(&group_by_year(&entries));
    }
    print!("{}", render_timeline(&entries));
    Ok(())
}

pub fn render_timeline(entries: &[TimelineEntry]) -> String {
    let groups = group_by_year(entries);
    if groups.is_empty() {
        return "No timeline entries.\n".to_string();
    }
    let mut out = String::new();
    for (year, items) in &groups {
        let noun = if items.len() == 1 { "publication" } else { "publications" };
        out.push_str(&format!("{year}  ({} {noun})\n", items.len()));
        let types: Vec<String> = experiment_type_counts(items)
            .into_iter()
            .map(|(t, n)| format!("{t} x{n}"))
            .collect();
        out.push_str(&format!("  {}\n", types.join(", ")));
        for entry in items {
            out.push_str(&format!("    [{}] {} ({})\n", entry.id, entry.title, entry.mission));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(id: u32, year: u16, kind: &str) -> TimelineEntry {
        TimelineEntry {
            year,
            title: format!("Study {id}"),
            mission: "ISS".to_string(),
            experiment_type: kind.to_string(),
            id,
        }
    }

    #[test]
    fn test_timeline_groups_years_ascending() {
        let entries = [entry(1, 2023, "Botanical"), entry(2, 2021, "Medical"), entry(3, 2023, "Botanical")];
        assert_eq!(
            render_timeline(&entries),
            "2021  (1 publication)\n  Medical x1\n    [2] Study 2 (ISS)\n\
             2023  (2 publications)\n  Botanical x2\n    [1] Study 1 (ISS)\n    [3] Study 3 (ISS)\n"
        );
    }

    #[test]
    fn test_empty_views_render_placeholder() {
        assert_eq!(render_timeline(&[]), "No timeline entries.\n");
        assert_eq!(render_publications(&[]), "No results found.\n");
    }
}

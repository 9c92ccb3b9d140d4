//! PDF library tab: browse, related papers, open and analyse documents.

use anyhow::{Context, Result};
use spacebio_assistant::to_plain_text;
use spacebio_common::PdfDocument;
use spacebio_search::library::{category_counts, filter_library, paginate, LibraryCategory, Page};
use tracing::info;

use super::{clip, print_json};
use crate::session::Session;

pub fn parse_category(s: &str) -> std::result::Result<LibraryCategory, String> {
    LibraryCategory::parse(s).ok_or_else(|| {
        format!("unknown category '{s}' (expected microgravity, radiation, plant, health or psychology)")
    })
}

// ── library ───────────────────────────────────────────────────────────────────

pub fn library(
    session: &Session,
    query: Option<&str>,
    category: Option<LibraryCategory>,
    page: usize,
    json: bool,
) -> Result<()> {
    let pdfs = session.store.all_pdfs();
    let matches: Vec<PdfDocument> = filter_library(pdfs, query.unwrap_or(""), category)
        .into_iter()
        .cloned()
        .collect();
    let page = paginate(&matches, page, session.config.library.page_size);
    info!(matches = page.total_items, page = page.page, pages = page.total_pages, "📚 Library view");

    if json {
        return print_json(&page);
    }
    print!("{}", render_shelves(pdfs));
    print!("{}", render_page(&page));
    Ok(())
}

pub fn render_shelves(pdfs: &[PdfDocument]) -> String {
    let shelves: Vec<String> = category_counts(pdfs)
        .into_iter()
        .map(|(c, n)| format!("{} ({n})", c.label()))
        .collect();
    format!("All Papers ({}) | {}\n\n", pdfs.len(), shelves.join(" | "))
}

pub fn render_page(page: &Page<'_, PdfDocument>) -> String {
    if page.total_items == 0 {
        return "No papers match.\n".to_string();
    }
    let mut out = String::new();
    for doc in page.items {
        out.push_str(&format!("{}  {} ({})\n", doc.id, doc.title, doc.year));
        out.push_str(&format!("    {} | {} | {}\n", doc.organism, doc.mission, doc.experiment_type));
        out.push_str(&format!("    {}\n", clip(&doc.abstract_text, 120)));
    }
    out.push_str(&format!(
        "\nPage {} of {} ({} papers)\n",
        page.page, page.total_pages, page.total_items
    ));
    out
}

// ── related ───────────────────────────────────────────────────────────────────

pub async fn related(session: &Session, id: &str, limit: usize, suggest: bool, json: bool) -> Result<()> {
    let Some(doc) = session.store.pdf(id) else {
        println!("No paper with id {id}.");
        return Ok(());
    };
    let related = session.store.related_pdfs(&doc.keywords, Some(&doc.id), limit);

    if json {
        print_json(&related)?;
    } else if related.is_empty() {
        println!("No related papers found for {id}.");
    } else {
        println!("Papers related to \"{}\":", doc.title);
        for m in &related {
            println!("  {}  {} ({})", m.item.id, m.item.title, m.item.year);
            println!("      shared: {}", m.common_keywords.join(", "));
        }
    }

    if suggest {
        let html = session
            .generator
            .related_research(&doc.title)
            .await
            .context("generating related research suggestions")?;
        println!("\n{}", to_plain_text(&html));
    }
    Ok(())
}

// ── open / analyze ────────────────────────────────────────────────────────────

pub async fn open(session: &Session, id: &str) -> Result<()> {
    let path = session.store.locate_document(id).await?;
    println!("{}", path.display());
    Ok(())
}

pub async fn analyze(session: &Session, id: &str) -> Result<()> {
    let Some(doc) = session.store.pdf(id) else {
        println!("No paper with id {id}.");
        return Ok(());
    };
    let html = session
        .generator
        .analyze_paper(&doc.content)
        .await
        .with_context(|| format!("analysing {id}"))?;
    println!("{}\n\n{}", doc.title, to_plain_text(&html));
    Ok(())
}

//! Subcommand implementations. Each tab of the dashboard is one module.

pub mod assistant;
pub mod catalog;
pub mod graph;
pub mod library;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use spacebio_common::AttributeFilter;

/// Attribute filters shared by the catalog and graph commands.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Organism substring, e.g. "arabidopsis"
    #[arg(long)]
    pub organism: Option<String>,
    /// Experiment type substring, e.g. "radiation"
    #[arg(long)]
    pub experiment_type: Option<String>,
    /// Mission substring, e.g. "ISS"
    #[arg(long)]
    pub mission: Option<String>,
    #[arg(long)]
    pub year: Option<u16>,
}

impl From<FilterArgs> for AttributeFilter {
    fn from(args: FilterArgs) -> Self {
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        AttributeFilter {
            organism: non_blank(args.organism),
            experiment_type: non_blank(args.experiment_type),
            mission: non_blank(args.mission),
            year: args.year,
        }
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// First `max` characters of `text`, with an ellipsis when cut.
pub fn clip(text: &str, max: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{}...", head.trim_end())
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_filter_values_dropped() {
        let filter: AttributeFilter = FilterArgs {
            organism: Some("  ".to_string()),
            mission: Some("ISS".to_string()),
            ..Default::default()
        }
        .into();
        assert_eq!(filter.organism, None);
        assert_eq!(filter.mission.as_deref(), Some("ISS"));
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("microgravity effects", 12), "microgravity...");
        assert_eq!(clip("ééééé", 2), "éé...");
    }
}

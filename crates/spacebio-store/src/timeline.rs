//! Timeline aggregation over publication entries.

use std::collections::BTreeMap;

use spacebio_common::TimelineEntry;

/// Entries grouped by year, years ascending, entry order preserved.
pub fn group_by_year(entries: &[TimelineEntry]) -> BTreeMap<u16, Vec<&TimelineEntry>> {
    let mut groups: BTreeMap<u16, Vec<&TimelineEntry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.year).or_default().push(entry);
    }
    groups
}

/// Experiment-type counts within one year group, types in first-seen order.
pub fn experiment_type_counts<'a>(entries: &[&'a TimelineEntry]) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for entry in entries {
        match counts.iter_mut().find(|(t, _)| *t == entry.experiment_type) {
            Some((_, n)) => *n += 1,
            None => counts.push((entry.experiment_type.as_str(), 1)),
        }
    }
    counts
}

/// Largest number of entries in any single year; 0 for no entries.
pub fn busiest_year_count(entries: &[TimelineEntry]) -> usize {
    group_by_year(entries).values().map(Vec::len).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, year: u16, kind: &str) -> TimelineEntry {
        TimelineEntry {
            year,
            title: format!("t{id}"),
            mission: "ISS".to_string(),
            experiment_type: kind.to_string(),
            id,
        }
    }

    #[test]
    fn test_group_by_year_sorted() {
        let entries = vec![entry(1, 2023, "A"), entry(2, 2021, "B"), entry(3, 2023, "A")];
        let groups = group_by_year(&entries);
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![2021, 2023]);
        assert_eq!(groups[&2023].iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(busiest_year_count(&entries), 2);
    }

    #[test]
    fn test_experiment_type_counts() {
        let entries = vec![entry(1, 2023, "Botany"), entry(2, 2023, "Astro"), entry(3, 2023, "Botany")];
        let refs: Vec<&TimelineEntry> = entries.iter().collect();
        assert_eq!(experiment_type_counts(&refs), vec![("Botany", 2), ("Astro", 1)]);
    }

    #[test]
    fn test_empty_timeline() {
        assert!(group_by_year(&[]).is_empty());
        assert_eq!(busiest_year_count(&[]), 0);
    }
}

//! Knowledge-graph fixture and attribute-filtered subgraphs.

use std::collections::HashSet;

use spacebio_common::{AttributeFilter, GraphData, GraphEdge, GraphNode, NodeCategory, Publication};

/// Experiment nodes and the catalog publication each one describes.
const EXPERIMENT_PUBLICATIONS: &[(&str, u32)] = &[
    ("plant-growth", 1),
    ("bone-density", 2),
    ("microbial-dynamics", 3),
    ("radiation-effects", 4),
];

pub fn graph() -> GraphData {
    use NodeCategory::*;

    let nodes = vec![
        GraphNode::new("arabidopsis", "Arabidopsis thaliana", Organism),
        GraphNode::new("humans", "Homo sapiens", Organism),
        GraphNode::new("microbes", "Microbial Communities", Organism),
        GraphNode::new("plant-growth", "Plant Growth Study", Experiment),
        GraphNode::new("bone-density", "Bone Density Study", Experiment),
        GraphNode::new("microbial-dynamics", "Microbial Dynamics", Experiment),
        GraphNode::new("radiation-effects", "Radiation Biology", Experiment),
        GraphNode::new("iss", "International Space Station", Mission),
        GraphNode::new("artemis", "Artemis Program", Mission),
        GraphNode::new("cell-walls", "Cell Wall Changes", Result),
        GraphNode::new("bone-loss", "Bone Mineral Loss", Result),
        GraphNode::new("microbial-shift", "Community Succession", Result),
        GraphNode::new("dna-damage", "DNA Repair Deficiency", Result),
    ];

    let edges = [
        ("arabidopsis", "plant-growth"),
        ("plant-growth", "cell-walls"),
        ("plant-growth", "iss"),
        ("humans", "bone-density"),
        ("bone-density", "bone-loss"),
        ("bone-density", "artemis"),
        ("microbes", "microbial-dynamics"),
        ("microbial-dynamics", "microbial-shift"),
        ("humans", "radiation-effects"),
        ("radiation-effects", "dna-damage"),
        ("radiation-effects", "iss"),
    ]
    .into_iter()
    .map(|(s, t)| GraphEdge::new(s, t))
    .collect();

    GraphData { nodes, edges }
}

/// Restrict `data` to experiments whose publication passes `filter`, plus
/// the nodes directly linked to them. An empty filter returns `data` as is.
pub fn filtered(data: GraphData, filter: &AttributeFilter, publications: &[Publication]) -> GraphData {
    if filter.is_empty() {
        return data;
    }

    let kept_experiments: HashSet<&str> = EXPERIMENT_PUBLICATIONS
        .iter()
        .filter(|(_, pub_id)| {
            publications.iter().any(|p| p.id == *pub_id && filter.matches(p))
        })
        .map(|(node_id, _)| *node_id)
        .collect();

    let edges: Vec<GraphEdge> = data
        .edges
        .into_iter()
        .filter(|e| {
            kept_experiments.contains(e.source.as_str()) || kept_experiments.contains(e.target.as_str())
        })
        .collect();

    let mut kept: HashSet<String> = kept_experiments.iter().map(|s| s.to_string()).collect();
    for e in &edges {
        kept.insert(e.source.clone());
        kept.insert(e.target.clone());
    }

    let nodes = data.nodes.into_iter().filter(|n| kept.contains(&n.id)).collect();
    GraphData { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::publications;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fixture_edges_reference_existing_nodes() {
        let g = graph();
        let ids: HashSet<&str> = g.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(g.nodes.len(), 13);
        assert_eq!(g.edges.len(), 11);
        for e in &g.edges {
            assert!(ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()));
        }
    }

    #[test]
    fn test_empty_filter_keeps_whole_graph() {
        assert_eq!(filtered(graph(), &AttributeFilter::default(), &publications()), graph());
    }

    #[test]
    fn test_organism_filter_keeps_matching_experiment_neighbourhood() {
        let filter = AttributeFilter { organism: Some("sapiens".to_string()), ..Default::default() };
        let g = filtered(graph(), &filter, &publications());
        let mut ids: Vec<&str> = g.nodes.iter().map(|n| n.id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["artemis", "bone-density", "bone-loss", "humans"]);
        assert_eq!(g.edges.len(), 3);
    }

    #[test]
    fn test_filter_matching_nothing_yields_empty_graph() {
        let filter = AttributeFilter { year: Some(1999), ..Default::default() };
        assert!(filtered(graph(), &filter, &publications()).is_empty());
    }
}

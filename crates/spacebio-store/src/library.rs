//! Synthetic PDF library.
//!
//! Documents cycle through fixed topic, organism and mission lists; the
//! first twenty carry real-looking PMC ids, the rest get random ids from a
//! seeded RNG so a given seed always yields the same library.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spacebio_common::PdfDocument;

const TOPICS: [&str; 30] = [
    "Microgravity Effects", "Space Radiation Biology", "Astronaut Health", "Plant Growth in Space",
    "Bone Density Studies", "Muscle Atrophy Research", "Space Psychology", "Life Support Systems",
    "Bioregenerative Agriculture", "Cellular Metabolism", "Protein Synthesis", "Gene Expression",
    "Immune System Changes", "Cardiovascular Adaptation", "Neurovestibular Function",
    "Sleep Disorders in Space", "Nutrition and Space Flight", "Exercise Countermeasures",
    "Radiation Shielding", "Mars Mission Preparation", "Lunar Base Research", "Space Medicine",
    "Tissue Engineering", "Stem Cell Research", "Developmental Biology", "Cancer Risk Assessment",
    "Vision Impairment", "Pharmaceutical Research", "Biomarker Analysis", "Omics Studies",
];

const ORGANISMS: [&str; 12] = [
    "Arabidopsis thaliana", "Mus musculus", "Homo sapiens", "Saccharomyces cerevisiae",
    "Caenorhabditis elegans", "Drosophila melanogaster", "Escherichia coli", "Various Microorganisms",
    "Rodent Models", "Cell Cultures", "Plant Species", "Bacteria Cultures",
];

const MISSIONS: [&str; 10] = [
    "International Space Station", "Space Shuttle Missions", "Apollo Program",
    "Artemis Program", "Mars Analog Studies", "Parabolic Flight Experiments",
    "Ground-Based Studies", "Centrifuge Experiments", "SpaceX Missions", "Boeing Starliner",
];

const BASE_PMC_IDS: [&str; 20] = [
    "PMC10020673", "PMC10025027", "PMC10027818", "PMC10030976", "PMC10058394",
    "PMC10063413", "PMC10138634", "PMC10142442", "PMC10144393", "PMC10233975",
    "PMC10261121", "PMC10264680", "PMC10284894", "PMC10285634", "PMC10308117",
    "PMC10342025", "PMC10344948", "PMC10370681", "PMC10386755", "PMC10390562",
];

#[derive(Debug, Clone)]
pub struct LibraryConfig {
    pub document_count: usize,
    pub seed: u64,
    /// Directory holding `{id}.pdf` files for open/download.
    pub document_root: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            document_count: 572,
            seed: 0x5eed_b10,
            document_root: PathBuf::from("Nasa pdfs"),
        }
    }
}

// ── Topic profiles ────────────────────────────────────────────────────────────

/// Topics with dedicated templates; everything else uses `General`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TopicProfile {
    Microgravity,
    Radiation,
    AstronautHealth,
    PlantGrowth,
    BoneDensity,
    General,
}

impl TopicProfile {
    fn of(topic: &str) -> Self {
        match topic {
            "Microgravity Effects"    => TopicProfile::Microgravity,
            "Space Radiation Biology" => TopicProfile::Radiation,
            "Astronaut Health"        => TopicProfile::AstronautHealth,
            "Plant Growth in Space"   => TopicProfile::PlantGrowth,
            "Bone Density Studies"    => TopicProfile::BoneDensity,
            _                         => TopicProfile::General,
        }
    }

    fn keywords(&self) -> [&'static str; 5] {
        match self {
            TopicProfile::Microgravity => ["microgravity", "weightlessness", "space biology", "cellular adaptation", "gravitational biology"],
            TopicProfile::Radiation => ["space radiation", "DNA damage", "cosmic rays", "radiation biology", "space dosimetry"],
            TopicProfile::AstronautHealth => ["astronaut health", "space medicine", "physiological adaptation", "countermeasures", "human spaceflight"],
            TopicProfile::PlantGrowth => ["space agriculture", "plant biology", "crop production", "photosynthesis", "space farming"],
            TopicProfile::BoneDensity => ["bone loss", "osteoporosis", "bone metabolism", "calcium regulation", "skeletal health"],
            TopicProfile::General => ["space biology", "NASA research", "space exploration", "biological systems", "space environment"],
        }
    }

    fn experiment_type(&self) -> &'static str {
        match self {
            TopicProfile::Microgravity    => "Gravitational Biology",
            TopicProfile::Radiation       => "Radiation Research",
            TopicProfile::AstronautHealth => "Human Physiology",
            TopicProfile::PlantGrowth     => "Botanical Research",
            TopicProfile::BoneDensity     => "Bone & Muscle Research",
            TopicProfile::General         => "Space Biology Research",
        }
    }

    fn content(&self, organism: &str) -> String {
        match self {
            TopicProfile::Microgravity => format!(
"Abstract: This comprehensive study examines how microgravity conditions affect {organism} during spaceflight missions. Our research utilized advanced proteomics and genomics techniques to analyze cellular responses to weightlessness.

Key Findings:
- Significant alterations in cellular metabolism and protein expression
- Changes in gene regulation patterns under microgravity conditions
- Adaptive responses in cellular structure and function
- Long-term effects on organism physiology and behavior

Methodology: Samples were collected during various mission phases and analyzed using state-of-the-art laboratory techniques including mass spectrometry, RNA sequencing, and advanced imaging systems.

Implications: These results provide crucial insights for developing countermeasures for long-duration space missions and understanding fundamental biological processes in altered gravitational environments."),
            TopicProfile::Radiation => format!(
"Abstract: Investigation of radiation effects on {organism} exposed to galactic cosmic rays and solar particle events during space missions.

Key Findings:
- DNA damage and repair mechanisms in space radiation environment
- Cellular response to chronic low-dose radiation exposure
- Impact on reproductive health and genetic stability
- Development of biological dosimetry techniques

Research Methods: Controlled radiation exposure studies using ground-based facilities and space-based experiments aboard the International Space Station.

Applications: Results contribute to radiation risk assessment models and development of protective strategies for crew health during deep space exploration missions."),
            _ => format!(
"Abstract: Comprehensive analysis of {organism} responses to space environment conditions including microgravity, radiation, and confined habitat systems.

Key Findings:
- Systematic changes in biological processes during spaceflight
- Adaptation mechanisms to space environment stressors
- Implications for human health and mission success
- Development of monitoring and countermeasure strategies

Methodology: Multi-omics approach combining genomics, proteomics, and metabolomics analysis of samples collected before, during, and after space missions.

Significance: This research advances our understanding of space biology and supports the development of evidence-based strategies for safe human space exploration."),
        }
    }
}

// ── Generation ────────────────────────────────────────────────────────────────

fn document_ids(count: usize, rng: &mut StdRng) -> Vec<String> {
    (0..count)
        .map(|i| match BASE_PMC_IDS.get(i) {
            Some(id) => id.to_string(),
            None => format!("PMC{}", 10_000_000 + rng.gen_range(0..9_999_999u32)),
        })
        .collect()
}

/// Build the whole library. Ids are unique within the result.
pub fn generate(config: &LibraryConfig) -> Vec<PdfDocument> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut seen = std::collections::HashSet::new();
    let mut ids = document_ids(config.document_count, &mut rng);
    // random ids can collide; re-draw until unique
    for id in ids.iter_mut() {
        while !seen.insert(id.clone()) {
            *id = format!("PMC{}", 10_000_000 + rng.gen_range(0..9_999_999u32));
        }
    }

    ids.into_iter()
        .enumerate()
        .map(|(index, id)| {
            let topic = TOPICS[index % TOPICS.len()];
            let organism = ORGANISMS[index % ORGANISMS.len()];
            let mission = MISSIONS[index % MISSIONS.len()];
            let profile = TopicProfile::of(topic);

            PdfDocument {
                title: format!("{topic} in Space Environment - {id}"),
                content: profile.content(organism),
                keywords: profile.keywords().iter().map(|k| k.to_string()).collect(),
                organism: organism.to_string(),
                mission: mission.to_string(),
                year: 2020 + (index % 5) as u16,
                experiment_type: profile.experiment_type().to_string(),
                abstract_text: format!(
                    "This study investigates {} in {organism} under space environment conditions. \
                     Our research provides valuable insights into biological adaptation mechanisms and \
                     contributes to the safety and success of human space exploration missions.",
                    topic.to_lowercase()
                ),
                file_path: config.document_root.join(format!("{id}.pdf")).to_string_lossy().into_owned(),
                id,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn small(count: usize, seed: u64) -> LibraryConfig {
        LibraryConfig { document_count: count, seed, ..Default::default() }
    }

    #[test]
    fn test_default_library_size_and_unique_ids() {
        let docs = generate(&LibraryConfig::default());
        assert_eq!(docs.len(), 572);
        let ids: HashSet<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), docs.len());
    }

    #[test]
    fn test_base_ids_come_first() {
        let docs = generate(&small(25, 1));
        assert_eq!(docs[0].id, "PMC10020673");
        assert_eq!(docs[19].id, "PMC10390562");
        assert!(docs[20].id.starts_with("PMC1"));
    }

    #[test]
    fn test_same_seed_same_library() {
        let a: Vec<String> = generate(&small(60, 42)).into_iter().map(|d| d.id).collect();
        let b: Vec<String> = generate(&small(60, 42)).into_iter().map(|d| d.id).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_topic_profiles_drive_fields() {
        let docs = generate(&small(6, 1));
        assert_eq!(docs[0].experiment_type, "Gravitational Biology");
        assert!(docs[0].keywords.contains(&"microgravity".to_string()));
        assert!(docs[1].content.contains("galactic cosmic rays"));
        assert_eq!(docs[5].experiment_type, "Space Biology Research");
        assert_eq!(docs[5].year, 2020);
        assert_eq!(docs[4].year, 2024);
    }

    #[test]
    fn test_file_path_under_document_root() {
        let docs = generate(&small(1, 1));
        assert!(docs[0].file_path.ends_with("PMC10020673.pdf"));
        assert!(docs[0].file_path.starts_with("Nasa pdfs"));
    }
}

//! Publication catalog fixtures.

use spacebio_common::{Publication, Summary};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The fixed publication catalog, in presentation order.
pub fn publications() -> Vec<Publication> {
    vec![
        Publication {
            id: 1,
            title: "Effects of Microgravity on Plant Cell Walls and Growth Patterns".to_string(),
            authors: strings(&["Dr. Sarah Johnson", "Dr. Mike Chen", "Dr. Lisa Rodriguez"]),
            year: 2023,
            mission: "ISS Expedition 68".to_string(),
            organism: "Arabidopsis thaliana".to_string(),
            experiment_type: "Botanical Research".to_string(),
            abstract_text: "This study investigates how microgravity conditions aboard the International Space Station \
                affect plant cell wall composition and growth patterns in Arabidopsis thaliana. Results show significant \
                changes in cellulose organization and altered gravitropic responses.".to_string(),
            keywords: strings(&["microgravity", "plant biology", "cell walls", "ISS", "space agriculture"]),
            connections: strings(&["cell-wall-proteins", "gravitropism", "space-farming"]),
            summary: Summary {
                plain: "Scientists studied how plants grow differently in space without gravity. They found that plant \
                    cell walls become weaker and plants grow in unusual directions, which could affect future space \
                    farming efforts.".to_string(),
                technical: "Microgravity exposure resulted in 40% reduction in cellulose crystallinity, altered pectin \
                    methylesterification patterns, and dysregulated auxin transport mechanisms affecting gravitropic \
                    responses in Arabidopsis seedlings.".to_string(),
            },
        },
        Publication {
            id: 2,
            title: "Bone Density Changes in Astronauts During Long-Duration Spaceflight".to_string(),
            authors: strings(&["Dr. Robert Kim", "Dr. Emma Thompson", "Dr. James Wilson"]),
            year: 2022,
            mission: "Artemis Analog".to_string(),
            organism: "Homo sapiens".to_string(),
            experiment_type: "Human Physiology".to_string(),
            abstract_text: "Comprehensive analysis of bone mineral density changes in astronauts during 6-month \
                missions, with implications for Mars exploration preparedness.".to_string(),
            keywords: strings(&["bone density", "astronauts", "long-duration flight", "osteoporosis", "countermeasures"]),
            connections: strings(&["calcium-metabolism", "exercise-protocols", "mars-mission-prep"]),
            summary: Summary {
                plain: "Astronauts lose bone strength during long space missions, similar to osteoporosis on Earth. \
                    This research helps develop exercise programs to keep astronauts healthy for future trips to \
                    Mars.".to_string(),
                technical: "Astronauts experienced 1.5% monthly bone mineral density loss in weight-bearing bones, \
                    with trabecular bone showing greater susceptibility than cortical bone. ARED exercise protocols \
                    mitigated 60% of expected bone loss.".to_string(),
            },
        },
        Publication {
            id: 3,
            title: "Microbial Community Dynamics in Closed-Loop Life Support Systems".to_string(),
            authors: strings(&["Dr. Ana Martinez", "Dr. Kevin Park", "Dr. Rachel Green"]),
            year: 2023,
            mission: "ECLSS Testing".to_string(),
            organism: "Mixed microbial communities".to_string(),
            experiment_type: "Astrobiology".to_string(),
            abstract_text: "Investigation of microbial ecosystem stability and succession patterns in spacecraft \
                environmental control systems over extended periods.".to_string(),
            keywords: strings(&["microbiome", "life support", "biofilms", "spacecraft hygiene", "closed ecosystems"]),
            connections: strings(&["water-recycling", "air-purification", "crew-health"]),
            summary: Summary {
                plain: "Researchers studied bacteria and other microbes that grow in spacecraft air and water \
                    systems. Understanding these tiny organisms helps keep astronauts healthy and life support \
                    systems working properly.".to_string(),
                technical: "Microbial diversity decreased 35% over 180 days in closed systems, with Proteobacteria \
                    and Firmicutes dominating. Biofilm formation on surfaces increased antimicrobial resistance by \
                    3-fold, requiring enhanced cleaning protocols.".to_string(),
            },
        },
        Publication {
            id: 4,
            title: "Radiation Effects on DNA Repair Mechanisms in Human Cells".to_string(),
            authors: strings(&["Dr. Maria Santos", "Dr. David Lee", "Dr. Jennifer Adams"]),
            year: 2021,
            mission: "ISS National Lab".to_string(),
            organism: "Human cell cultures".to_string(),
            experiment_type: "Radiation Biology".to_string(),
            abstract_text: "Analysis of DNA damage and repair pathway efficiency in human cells exposed to space \
                radiation environment.".to_string(),
            keywords: strings(&["radiation", "DNA repair", "space environment", "cellular response", "cancer risk"]),
            connections: strings(&["radiation-shielding", "pharmaceutical-countermeasures", "crew-health-monitoring"]),
            summary: Summary {
                plain: "Space radiation damages astronaut DNA more than radiation on Earth. Scientists are studying \
                    how cells fix this damage to develop better protection for long space missions.".to_string(),
                technical: "Galactic cosmic radiation exposure resulted in 3.2-fold increase in double-strand breaks \
                    and 40% reduction in homologous recombination repair efficiency. p53 pathway activation was \
                    sustained for 72 hours post-exposure.".to_string(),
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_unique() {
        let pubs = publications();
        let ids: HashSet<u32> = pubs.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), pubs.len());
    }

    #[test]
    fn test_line_continuations_do_not_leave_double_spaces() {
        for p in publications() {
            assert!(!p.abstract_text.contains("  "), "{}", p.title);
            assert!(!p.summary.technical.contains("  "), "{}", p.title);
        }
    }
}

//! Fixed answers used when generation is unavailable.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackTopic {
    Microgravity,
    Plant,
    Radiation,
    Astronaut,
    Mars,
    General,
}

impl FallbackTopic {
    /// Topics checked against a question, first match wins.
    pub const MATCH_ORDER: [FallbackTopic; 5] = [
        FallbackTopic::Microgravity,
        FallbackTopic::Plant,
        FallbackTopic::Radiation,
        FallbackTopic::Astronaut,
        FallbackTopic::Mars,
    ];

    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            FallbackTopic::Microgravity => Some("microgravity"),
            FallbackTopic::Plant        => Some("plant"),
            FallbackTopic::Radiation    => Some("radiation"),
            FallbackTopic::Astronaut    => Some("astronaut"),
            FallbackTopic::Mars         => Some("mars"),
            FallbackTopic::General      => None,
        }
    }

    pub fn for_question(question: &str) -> Self {
        let question = question.to_lowercase();
        Self::MATCH_ORDER
            .into_iter()
            .find(|topic| topic.keyword().is_some_and(|k| question.contains(k)))
            .unwrap_or(FallbackTopic::General)
    }

    pub fn answer(&self) -> &'static str {
        match self {
            FallbackTopic::Microgravity => "Microgravity affects many biological processes including bone density, \
                muscle mass, and plant growth. In space, astronauts experience bone loss and muscle atrophy due to \
                the lack of gravitational stress.",
            FallbackTopic::Plant => "Plants in space grow differently due to the absence of gravity. They lose \
                their normal orientation cues and may grow in unusual directions. NASA has conducted many plant \
                growth experiments on the ISS.",
            FallbackTopic::Radiation => "Space radiation is a major concern for long-duration missions. It can \
                damage DNA and increase cancer risk. NASA is developing better shielding materials and monitoring \
                systems.",
            FallbackTopic::Astronaut => "Astronauts face many health challenges in space including bone loss, \
                muscle atrophy, vision changes, and psychological stress. Exercise and nutrition are key \
                countermeasures.",
            FallbackTopic::Mars => "Mars missions will require advanced life support systems, radiation \
                protection, and psychological support for crew members during the 6-9 month journey each way.",
            FallbackTopic::General => "I apologize, but I'm currently experiencing technical difficulties \
                connecting to the AI service. However, I can tell you that NASA conducts extensive space biology \
                research covering topics like microgravity effects, radiation biology, plant growth in space, and \
                astronaut health. Please try your question again or check the PDF library for specific research \
                papers.",
        }
    }
}

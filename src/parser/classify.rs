use crate::models::{EventType, TopicKeywordMap};

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Priority order: first marker found wins.
const TYPE_MARKERS: &[(&[&str], EventType)] = &[
    (&["virtual"], EventType::Virtual),
    (&["webinar"], EventType::Webinar),
    (&["in-person", "onsite"], EventType::InPerson),
    (&["hybrid"], EventType::Hybrid),
];

pub fn classify_type(text: &str) -> EventType {
    let lower = text.to_lowercase();
    TYPE_MARKERS
        .iter()
        .find(|(markers, _)| markers.iter().any(|m| lower.contains(m)))
        .map(|(_, kind)| *kind)
        .unwrap_or(EventType::Uncategorized)
}

/// Every topic with a keyword contained in `text`, in map order.
/// Never empty: falls back to `Uncategorized`.
pub fn classify_topics(text: &str, keywords: &TopicKeywordMap) -> Vec<String> {
    let lower = text.to_lowercase();
    let topics: Vec<String> = keywords
        .iter()
        .filter(|(_, kws)| kws.iter().any(|kw| lower.contains(kw.as_str())))
        .map(|(topic, _)| topic.to_string())
        .collect();

    if topics.is_empty() {
        vec![UNCATEGORIZED.to_string()]
    } else {
        topics
    }
}

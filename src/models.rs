use std::fmt;

use serde::{Deserialize, Serialize};

/// One organization from the input list.
#[derive(Debug, Clone, Deserialize)]
pub struct Organization {
    pub name: String,
    pub events_url: String,
}

/// Topic label → lower-cased keywords, in declared order.
#[derive(Debug, Clone, Default)]
pub struct TopicKeywordMap {
    topics: Vec<(String, Vec<String>)>,
}

impl TopicKeywordMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a topic. Keywords are lower-cased; blank ones are dropped.
    pub fn insert<I, S>(&mut self, topic: &str, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        self.topics.push((topic.to_string(), keywords));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.topics.iter().map(|(t, k)| (t.as_str(), k.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }
}

impl<'a> FromIterator<(&'a str, &'a [&'a str])> for TopicKeywordMap {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a [&'a str])>>(iter: T) -> Self {
        let mut map = TopicKeywordMap::new();
        for (topic, keywords) in iter {
            map.insert(topic, keywords.iter());
        }
        map
    }
}

/// Unvalidated candidate straight out of an adapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCandidate {
    pub title: String,
    pub link: String,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Everything the listing block says, when `title` is only its headline.
    /// Classifiers read this instead of the title.
    pub raw_text: Option<String>,
}

impl RawCandidate {
    /// Text the type and topic classifiers run on.
    pub fn classification_text(&self) -> &str {
        self.raw_text.as_deref().unwrap_or(&self.title)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventType {
    Virtual,
    Webinar,
    #[serde(rename = "In-Person")]
    InPerson,
    Hybrid,
    Uncategorized,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Virtual => "Virtual",
            EventType::Webinar => "Webinar",
            EventType::InPerson => "In-Person",
            EventType::Hybrid => "Hybrid",
            EventType::Uncategorized => "Uncategorized",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One output row.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub organization: String,
    pub event_title: String,
    pub event_date: String,
    pub event_type: EventType,
    pub topics: Vec<String>,
    pub location: String,
    pub description: String,
    pub link: String,
}

impl EventRecord {
    pub const COLUMNS: [&'static str; 8] = [
        "organization",
        "event_title",
        "event_date",
        "event_type",
        "topics",
        "location",
        "description",
        "link",
    ];

    pub fn topics_joined(&self) -> String {
        self.topics.join(", ")
    }

    /// Cells in `COLUMNS` order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.organization.clone(),
            self.event_title.clone(),
            self.event_date.clone(),
            self.event_type.to_string(),
            self.topics_joined(),
            self.location.clone(),
            self.description.clone(),
            self.link.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_map_keeps_declared_order() {
        let map: TopicKeywordMap = [
            ("Workforce", &["jobs", "Talent"][..]),
            ("AI", &["ai"][..]),
        ]
        .into_iter()
        .collect();
        let names: Vec<&str> = map.iter().map(|(t, _)| t).collect();
        assert_eq!(names, ["Workforce", "AI"]);
        assert_eq!(map.iter().next().unwrap().1, ["jobs", "talent"]);
    }

    #[test]
    fn blank_keywords_dropped() {
        let mut map = TopicKeywordMap::new();
        map.insert("Cloud", ["cloud", "  ", ""]);
        assert_eq!(map.iter().next().unwrap().1.len(), 1);
    }

    #[test]
    fn event_type_labels() {
        assert_eq!(EventType::InPerson.to_string(), "In-Person");
        assert_eq!(
            serde_json::to_string(&EventType::InPerson).unwrap(),
            "\"In-Person\""
        );
    }

    #[test]
    fn row_matches_columns() {
        let rec = EventRecord {
            organization: "Org".into(),
            event_title: "Summit".into(),
            event_date: "Apr 10, 2025".into(),
            event_type: EventType::Hybrid,
            topics: vec!["AI".into(), "Cloud".into()],
            location: "Austin TX".into(),
            description: String::new(),
            link: "https://example.org".into(),
        };
        let row = rec.to_row();
        assert_eq!(row.len(), EventRecord::COLUMNS.len());
        assert_eq!(row[3], "Hybrid");
        assert_eq!(row[4], "AI, Cloud");
    }
}

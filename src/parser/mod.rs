pub mod classify;
pub mod dates;
pub mod location;
pub mod text;

use crate::models::{EventRecord, Organization, RawCandidate, TopicKeywordMap};

/// Validate → split → classify → normalize. `None` means the candidate was rejected.
pub fn process_candidate(
    org: &Organization,
    candidate: &RawCandidate,
    topics: &TopicKeywordMap,
) -> Option<EventRecord> {
    if !text::is_valid_title(&candidate.title) {
        return None;
    }

    let (title, date) = dates::split_date(&candidate.title);
    // Both classifiers see the raw, pre-split text so date/location words still count.
    let raw = candidate.classification_text();
    let event_type = classify::classify_type(raw);
    let topic_labels = classify::classify_topics(raw, topics);
    let location = location::normalize_location(candidate.location.as_deref().unwrap_or(""));

    Some(EventRecord {
        organization: text::clean_text(&org.name),
        event_title: text::clean_text(&title),
        event_date: text::clean_text(&date),
        event_type,
        topics: topic_labels.iter().map(|t| text::clean_text(t)).collect(),
        location: text::clean_text(&location),
        description: text::clean_text(candidate.description.as_deref().unwrap_or("")),
        link: text::clean_text(&candidate.link),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventType;

    fn org() -> Organization {
        Organization {
            name: " Tech Council ".into(),
            events_url: "https://techcouncil.org/events".into(),
        }
    }

    fn topics() -> TopicKeywordMap {
        [("AI", &["ai"][..]), ("Security", &["cyber"][..])]
            .into_iter()
            .collect()
    }

    #[test]
    fn full_chain() {
        let cand = RawCandidate {
            title: "Spring Summit – Apr 10, 2025 (Virtual, AI track)".into(),
            link: "https://techcouncil.org/events/spring".into(),
            location: None,
            description: Some("  2025-04-10 ".into()),
            raw_text: None,
        };
        let rec = process_candidate(&org(), &cand, &topics()).unwrap();
        assert_eq!(rec.organization, "Tech Council");
        assert_eq!(rec.event_title, "Spring Summit");
        assert_eq!(rec.event_date, "Apr 10, 2025");
        assert_eq!(rec.event_type, EventType::Virtual);
        assert_eq!(rec.topics, ["AI"]);
        assert_eq!(rec.location, "Unknown");
        assert_eq!(rec.description, "2025-04-10");
    }

    #[test]
    fn classifiers_read_whole_block() {
        let cand = RawCandidate {
            title: "Spring Summit – Apr 10, 2025".into(),
            raw_text: Some("Spring Summit – Apr 10, 2025 Virtual, AI track".into()),
            ..Default::default()
        };
        let rec = process_candidate(&org(), &cand, &topics()).unwrap();
        assert_eq!(rec.event_title, "Spring Summit");
        assert_eq!(rec.event_type, EventType::Virtual);
        assert_eq!(rec.topics, ["AI"]);
    }

    #[test]
    fn invalid_title_dropped() {
        let cand = RawCandidate {
            title: "Upcoming Events".into(),
            ..Default::default()
        };
        assert!(process_candidate(&org(), &cand, &topics()).is_none());
    }

    #[test]
    fn location_normalized() {
        let cand = RawCandidate {
            title: "Cyber Breakfast Briefing".into(),
            location: Some("minneapolis, mn".into()),
            ..Default::default()
        };
        let rec = process_candidate(&org(), &cand, &topics()).unwrap();
        assert_eq!(rec.location, "Minneapolis MN");
        assert_eq!(rec.topics, ["Security"]);
        assert_eq!(rec.event_date, "");
    }
}

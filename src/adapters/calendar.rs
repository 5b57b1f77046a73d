use anyhow::Result;
use scraper::Html;

use super::{element_text, resolve_link, selector, Adapter};
use crate::models::{Organization, RawCandidate};

/// A hosted events platform: where it lives and how its event links look.
#[derive(Debug, Clone, Copy)]
pub struct CalendarPlatform {
    pub domain: &'static str,
    pub event_path: &'static str,
    pub origin: &'static str,
}

impl CalendarPlatform {
    pub const EVENTBRITE: CalendarPlatform = CalendarPlatform {
        domain: "eventbrite.com",
        event_path: "/e/",
        origin: "https://www.eventbrite.com",
    };

    pub const MEETUP: CalendarPlatform = CalendarPlatform {
        domain: "meetup.com",
        event_path: "/events/",
        origin: "https://www.meetup.com",
    };
}

/// Anchors pointing at event pages; location and description ride along as
/// `data-location` / `data-description` attributes.
pub struct CalendarAdapter {
    platform: CalendarPlatform,
    name: String,
}

impl CalendarAdapter {
    pub fn new(platform: CalendarPlatform) -> Self {
        Self {
            platform,
            name: format!("calendar:{}", platform.domain),
        }
    }
}

impl Adapter for CalendarAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, events_url: &str) -> bool {
        events_url.contains(self.platform.domain)
    }

    fn extract(&self, document: &Html, _org: &Organization) -> Result<Vec<RawCandidate>> {
        let anchors = selector(&format!("[href*=\"{}\"]", self.platform.event_path))?;

        let candidates = document
            .select(&anchors)
            .filter_map(|el| {
                let href = el.value().attr("href")?;
                let attr = |key: &str| el.value().attr(key).unwrap_or_default().to_string();
                Some(RawCandidate {
                    title: element_text(&el),
                    link: resolve_link(self.platform.origin, href),
                    location: Some(attr("data-location")),
                    description: Some(attr("data-description")),
                    raw_text: None,
                })
            })
            .collect();

        Ok(candidates)
    }
}

use anyhow::Result;
use scraper::{ElementRef, Html};

use super::{element_text, selector, Adapter};
use crate::models::{Organization, RawCandidate};

const GROUP_SELECTOR: &str = ".wp-block-group";
const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

/// This layout carries no per-item location at all.
const NO_LOCATION_FIELD: &str = "Unspecified";

/// CMS pages where each event is a content group with no link of its own.
pub struct GroupedBlockAdapter {
    url_marker: &'static str,
    name: String,
}

impl GroupedBlockAdapter {
    pub fn new(url_marker: &'static str) -> Self {
        Self {
            url_marker,
            name: format!("grouped:{}", url_marker),
        }
    }
}

impl Adapter for GroupedBlockAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, events_url: &str) -> bool {
        events_url.contains(self.url_marker)
    }

    fn extract(&self, document: &Html, org: &Organization) -> Result<Vec<RawCandidate>> {
        let groups = selector(GROUP_SELECTOR)?;
        let headings = selector(HEADING_SELECTOR)?;

        let candidates = document
            .select(&groups)
            // Wrapper groups hold other groups; only leaves are events.
            .filter(|group| group.select(&groups).next().is_none())
            .map(|group| {
                let title = group
                    .select(&headings)
                    .next()
                    .map(|h| element_text(&h))
                    .unwrap_or_else(|| element_text(&group));
                RawCandidate {
                    title,
                    link: org.events_url.clone(),
                    location: Some(NO_LOCATION_FIELD.to_string()),
                    description: next_paragraph(&group),
                    raw_text: Some(element_text(&group)),
                }
            })
            .collect();

        Ok(candidates)
    }
}

fn next_paragraph(el: &ElementRef) -> Option<String> {
    el.next_siblings()
        .find_map(ElementRef::wrap)
        .filter(|sib| sib.value().name() == "p")
        .map(|p| element_text(&p))
}

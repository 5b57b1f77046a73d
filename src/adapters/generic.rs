use std::collections::HashSet;

use anyhow::Result;
use scraper::{ElementRef, Html};

use super::{element_text, resolve_link, selector, Adapter};
use crate::models::{Organization, RawCandidate};

/// Common listing containers: plain `.event`, The Events Calendar (tribe), Squarespace, articles.
const BLOCK_SELECTORS: &[&str] = &[
    ".event",
    ".tribe-events-calendar-list__event",
    ".tribe-event",
    ".list-item-event",
    "article",
];
const TITLE_SELECTOR: &str =
    ".tribe-events-calendar-list__event-title, .event-title, h1, h2, h3, h4";
const LOCATION_SELECTOR: &str = ".event-location, .tribe-events-venue, .location";
const TIME_SELECTOR: &str = "time[datetime]";

/// Fallback for any URL no other adapter claims.
pub struct GenericAdapter;

impl Adapter for GenericAdapter {
    fn name(&self) -> &str {
        "generic"
    }

    fn matches(&self, _events_url: &str) -> bool {
        true
    }

    fn extract(&self, document: &Html, org: &Organization) -> Result<Vec<RawCandidate>> {
        let blocks = selector(&BLOCK_SELECTORS.join(", "))?;
        let titles = selector(TITLE_SELECTOR)?;
        let locations = selector(LOCATION_SELECTOR)?;
        let times = selector(TIME_SELECTOR)?;
        let anchors = selector("a[href]")?;

        let matched: Vec<ElementRef> = document.select(&blocks).collect();
        let ids: HashSet<_> = matched.iter().map(|el| el.id()).collect();

        let candidates = matched
            .iter()
            // An `.event` inside an `article` is the same listing twice.
            .filter(|el| !el.ancestors().any(|a| ids.contains(&a.id())))
            .map(|block| {
                let block_text = element_text(block);
                let title = block
                    .select(&titles)
                    .next()
                    .map(|t| element_text(&t))
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| block_text.clone());
                let link = block
                    .select(&anchors)
                    .next()
                    .and_then(|a| a.value().attr("href"))
                    .map(|href| resolve_link(&org.events_url, href))
                    .unwrap_or_else(|| org.events_url.clone());
                let location = block.select(&locations).next().map(|l| element_text(&l));
                let description = block
                    .select(&times)
                    .next()
                    .and_then(|t| t.value().attr("datetime"))
                    .map(|d| d.trim().to_string());

                RawCandidate {
                    title,
                    link,
                    location,
                    description,
                    raw_text: Some(block_text),
                }
            })
            .collect();

        Ok(candidates)
    }
}

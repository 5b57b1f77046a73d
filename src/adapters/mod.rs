//! Per-source extraction strategies.
//!
//! Every adapter turns a parsed page into raw candidates without touching the
//! network. The registry picks one by testing the organization's events URL,
//! first match wins, with the generic adapter as the catch-all.

pub mod calendar;
pub mod generic;
pub mod grouped;

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::models::{Organization, RawCandidate};
use crate::parser::text::clean_text;

pub use calendar::{CalendarAdapter, CalendarPlatform};
pub use generic::GenericAdapter;
pub use grouped::GroupedBlockAdapter;

pub trait Adapter: Send + Sync {
    fn name(&self) -> &str;

    /// URL test used by the registry.
    fn matches(&self, events_url: &str) -> bool;

    /// Candidates in document order.
    fn extract(&self, document: &Html, org: &Organization) -> Result<Vec<RawCandidate>>;
}

pub struct Registry {
    adapters: Vec<Box<dyn Adapter>>,
    fallback: GenericAdapter,
}

impl Registry {
    /// Registry with only the generic fallback.
    pub fn empty() -> Self {
        Self {
            adapters: Vec::new(),
            fallback: GenericAdapter,
        }
    }

    /// The built-in sources.
    pub fn with_known_sources() -> Self {
        let mut registry = Self::empty();
        registry.register(CalendarAdapter::new(CalendarPlatform::EVENTBRITE));
        registry.register(CalendarAdapter::new(CalendarPlatform::MEETUP));
        registry.register(GroupedBlockAdapter::new("tecna.org"));
        registry
    }

    /// Add an adapter. Checked after those already registered, before the fallback.
    pub fn register<A: Adapter + 'static>(&mut self, adapter: A) {
        self.adapters.push(Box::new(adapter));
    }

    pub fn select(&self, events_url: &str) -> &dyn Adapter {
        self.adapters
            .iter()
            .find(|a| a.matches(events_url))
            .map(|a| &**a)
            .unwrap_or(&self.fallback)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_known_sources()
    }
}

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector {:?}: {}", css, e))
}

/// Visible text of an element, whitespace-collapsed.
pub(crate) fn element_text(el: &ElementRef) -> String {
    clean_text(&el.text().collect::<Vec<_>>().join(" "))
}

/// Resolve `href` against `base`; falls back to the raw href if either is unparseable.
pub(crate) fn resolve_link(base: &str, href: &str) -> String {
    let href = href.trim();
    Url::parse(base)
        .and_then(|b| b.join(href))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;
use tracing::warn;

use crate::models::{Organization, TopicKeywordMap};

pub const ENV_PREFIX: &str = "EVENTS";

/// Runtime knobs from `EVENTS_*` environment variables; CLI flags override them.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub timeout_secs: u64,
    pub workers: usize,
    pub output: PathBuf,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Config::builder()
            .set_default("timeout_secs", 10)?
            .set_default("workers", 4)?
            .set_default("output", "output/tecna_event_topic_map.csv")?
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid EVENTS_* settings")
    }
}

/// Load `[{"name": ..., "events_url": ...}, ...]`. Entries without a URL are dropped.
pub fn load_organizations(path: &Path) -> Result<Vec<Organization>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_organizations(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn parse_organizations(json: &str) -> Result<Vec<Organization>> {
    let orgs: Vec<Organization> = serde_json::from_str(json)?;
    Ok(orgs
        .into_iter()
        .filter_map(|org| {
            let events_url = org.events_url.trim().to_string();
            if events_url.is_empty() {
                warn!("Organization {:?} has no events_url, ignoring", org.name);
                return None;
            }
            Some(Organization {
                name: org.name.trim().to_string(),
                events_url,
            })
        })
        .collect())
}

/// Load `{"Topic": ["keyword", ...], ...}`, keeping the file's topic order.
pub fn load_topics(path: &Path) -> Result<TopicKeywordMap> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_topics(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn parse_topics(json: &str) -> Result<TopicKeywordMap> {
    let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
    let mut topics = TopicKeywordMap::new();
    for (topic, value) in raw {
        let keywords: Vec<String> = serde_json::from_value(value)
            .with_context(|| format!("Topic {:?} must map to a list of keywords", topic))?;
        topics.insert(&topic, keywords);
    }
    Ok(topics)
}

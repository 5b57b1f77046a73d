use std::sync::Arc;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use scraper::Html;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::adapters::Registry;
use crate::fetcher::{FetchError, Fetcher};
use crate::models::{EventRecord, Organization, TopicKeywordMap};
use crate::parser;

/// What happened to one organization. Failures stay inside their own outcome.
#[derive(Debug)]
pub enum OrgOutcome {
    Extracted {
        adapter: String,
        candidates: usize,
        records: Vec<EventRecord>,
    },
    Skipped {
        reason: String,
    },
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunStats {
    pub organizations: usize,
    pub fetched: usize,
    pub skipped: usize,
    pub candidates: usize,
    pub rejected: usize,
    pub records: usize,
}

pub struct RunOutput {
    pub records: Vec<EventRecord>,
    pub stats: RunStats,
}

/// Fetch every organization (bounded by `workers`), then extract on the rayon pool.
/// Records come back in input order, page order within an organization.
pub async fn run(
    orgs: &[Organization],
    topics: &TopicKeywordMap,
    registry: Arc<Registry>,
    fetcher: Arc<dyn Fetcher>,
    workers: usize,
) -> Result<RunOutput> {
    let bodies = fetch_all(orgs, fetcher, workers).await;

    // Parsing is CPU-bound; keep it off the async workers.
    let orgs = orgs.to_vec();
    let topics = topics.clone();
    tokio::task::spawn_blocking(move || extract_all(&orgs, bodies, &topics, &registry))
        .await
        .context("extraction stage failed")
}

/// Extract every fetched page in parallel and tally the run. `bodies[i]` belongs to `orgs[i]`.
pub fn extract_all(
    orgs: &[Organization],
    bodies: Vec<Result<String, FetchError>>,
    topics: &TopicKeywordMap,
    registry: &Registry,
) -> RunOutput {
    let outcomes: Vec<OrgOutcome> = orgs
        .par_iter()
        .zip(bodies.into_par_iter())
        .map(|(org, body)| process_org(org, body, registry, topics))
        .collect();

    let mut stats = RunStats {
        organizations: orgs.len(),
        ..Default::default()
    };
    let mut records = Vec::new();

    for (org, outcome) in orgs.iter().zip(outcomes) {
        match outcome {
            OrgOutcome::Extracted {
                adapter,
                candidates,
                records: org_records,
            } => {
                info!(
                    "{}: {} events from {} candidates ({})",
                    org.name,
                    org_records.len(),
                    candidates,
                    adapter
                );
                stats.fetched += 1;
                stats.candidates += candidates;
                stats.rejected += candidates - org_records.len();
                records.extend(org_records);
            }
            OrgOutcome::Skipped { reason } => {
                warn!("Skipping {}: {}", org.name, reason);
                stats.skipped += 1;
            }
        }
    }

    stats.records = records.len();
    info!(
        "Run finished: {} orgs ({} fetched, {} skipped), {} candidates, {} rejected, {} records",
        stats.organizations,
        stats.fetched,
        stats.skipped,
        stats.candidates,
        stats.rejected,
        stats.records
    );

    RunOutput { records, stats }
}

async fn fetch_all(
    orgs: &[Organization],
    fetcher: Arc<dyn Fetcher>,
    workers: usize,
) -> Vec<Result<String, FetchError>> {
    let semaphore = Arc::new(Semaphore::new(workers.max(1)));

    let pb = ProgressBar::new(orgs.len() as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("=> "));
    }

    let handles: Vec<_> = orgs
        .iter()
        .map(|org| {
            let fetcher = Arc::clone(&fetcher);
            let sem = Arc::clone(&semaphore);
            let url = org.events_url.clone();
            let pb = pb.clone();
            tokio::spawn(async move {
                let _permit = match sem.acquire().await {
                    Ok(permit) => permit,
                    Err(e) => return Err(FetchError::Transport(e.to_string())),
                };
                debug!("Fetching {}", url);
                let result = fetcher.fetch(&url).await;
                pb.inc(1);
                result
            })
        })
        .collect();

    // Awaiting in spawn order keeps input order regardless of completion order.
    let mut bodies = Vec::with_capacity(handles.len());
    for handle in handles {
        let body = match handle.await {
            Ok(result) => result,
            Err(e) => Err(FetchError::Transport(format!("fetch task failed: {}", e))),
        };
        bodies.push(body);
    }

    pb.finish_and_clear();
    bodies
}

/// Parse, adapt and normalize one fetched page. Never fails; problems become `Skipped`.
pub fn process_org(
    org: &Organization,
    body: Result<String, FetchError>,
    registry: &Registry,
    topics: &TopicKeywordMap,
) -> OrgOutcome {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            return OrgOutcome::Skipped {
                reason: e.to_string(),
            }
        }
    };

    match extract_records(org, &body, registry, topics) {
        Ok((adapter, candidates, records)) => OrgOutcome::Extracted {
            adapter,
            candidates,
            records,
        },
        Err(e) => OrgOutcome::Skipped {
            reason: format!("extraction failed: {:#}", e),
        },
    }
}

fn extract_records(
    org: &Organization,
    body: &str,
    registry: &Registry,
    topics: &TopicKeywordMap,
) -> Result<(String, usize, Vec<EventRecord>)> {
    let document = Html::parse_document(body);
    let adapter = registry.select(&org.events_url);
    let candidates = adapter.extract(&document, org)?;

    let records: Vec<EventRecord> = candidates
        .iter()
        .filter_map(|c| {
            let record = parser::process_candidate(org, c, topics);
            if record.is_none() {
                debug!("{}: rejected {:?}", org.name, c.title);
            }
            record
        })
        .collect();

    Ok((adapter.name().to_string(), candidates.len(), records))
}

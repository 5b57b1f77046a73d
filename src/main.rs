mod adapters;
mod export;
mod fetcher;
mod models;
mod parser;
mod pipeline;
mod settings;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use tracing::info;

use adapters::Registry;
use fetcher::HttpFetcher;

#[derive(Parser)]
#[command(name = "event_scraper", about = "Upcoming-event scraper for member organizations")]
struct Cli {
    /// Organizations file: [{"name", "events_url"}, ...]
    #[arg(long, global = true, default_value = "orgs.json")]
    orgs: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every organization's events page and write the event table
    Run {
        /// Topic keywords file: {"Topic": ["keyword", ...]}
        #[arg(long, default_value = "topics.json")]
        topics: PathBuf,
        /// Output CSV path (default: EVENTS_OUTPUT or output/tecna_event_topic_map.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Concurrent fetches
        #[arg(short = 'w', long)]
        workers: Option<usize>,
        /// Per-request timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,
    },
    /// Show which adapter each organization would use (no network)
    Plan,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let orgs = settings::load_organizations(&cli.orgs)?;
    let registry = Arc::new(Registry::with_known_sources());

    match cli.command {
        Commands::Run {
            topics,
            output,
            workers,
            timeout,
        } => {
            let settings = settings::Settings::from_env()?;
            let topics = settings::load_topics(&topics)?;
            let output = output.unwrap_or(settings.output);
            let workers = workers.unwrap_or(settings.workers);
            let timeout = Duration::from_secs(timeout.unwrap_or(settings.timeout_secs));

            info!(
                "Loaded {} organizations, {} topics ({} workers, {}s timeout)",
                orgs.len(),
                topics.len(),
                workers,
                timeout.as_secs()
            );

            let fetcher = Arc::new(HttpFetcher::new(timeout, settings.user_agent.as_deref())?);
            let out =
                pipeline::run(&orgs, &topics, Arc::clone(&registry), fetcher, workers).await?;

            export::write_csv(&output, &out.records)?;
            println!(
                "Wrote {} events from {}/{} organizations to {}",
                out.stats.records,
                out.stats.fetched,
                out.stats.organizations,
                output.display()
            );
        }
        Commands::Plan => {
            println!("{:<32} | {:<24} | URL", "Organization", "Adapter");
            println!("{}", "-".repeat(90));
            for org in &orgs {
                println!(
                    "{:<32} | {:<24} | {}",
                    truncate(&org.name, 32),
                    registry.select(&org.events_url).name(),
                    org.events_url
                );
            }
            println!("\n{} organizations", orgs.len());
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

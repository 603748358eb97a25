use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use eci_results_scraper::config::{FetchSettings, load_config, validate_fetch_settings};
use eci_results_scraper::core::cache::PageCache;
use eci_results_scraper::core::error::AppError;
use eci_results_scraper::features::election::ElectionType;
use eci_results_scraper::features::fetcher::{HttpTransport, ResilientFetcher};
use eci_results_scraper::features::scrape::{RunStatus, ScrapeRequest, ScrapeService};

#[derive(Parser)]
#[command(name = "eci-scrape", about = "Scrape an election results portal into JSON datasets")]
struct Cli {
    /// Index page of the results portal
    seed_url: Url,

    /// Skip election type detection (lok-sabha or vidhan-sabha)
    #[arg(long = "type")]
    election_type: Option<ElectionType>,

    /// Write the four artifacts here instead of under the output root
    #[arg(long)]
    output_dir: Option<PathBuf>,

    #[arg(long)]
    max_attempts: Option<u32>,

    #[arg(long)]
    base_backoff_secs: Option<f64>,

    /// Minimum gap between two requests
    #[arg(long)]
    request_delay_secs: Option<f64>,

    #[arg(long)]
    timeout_secs: Option<f64>,
}

impl Cli {
    fn apply_overrides(&self, settings: &mut FetchSettings) {
        if let Some(max_attempts) = self.max_attempts {
            settings.max_attempts = max_attempts;
        }
        if let Some(base_backoff_secs) = self.base_backoff_secs {
            settings.base_backoff_secs = base_backoff_secs;
        }
        if let Some(request_delay_secs) = self.request_delay_secs {
            settings.request_delay_secs = request_delay_secs;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            settings.timeout_secs = timeout_secs;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, AppError> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = load_config()?;
    cli.apply_overrides(&mut config.fetch);
    validate_fetch_settings(&config.fetch)?;

    let transport = Arc::new(HttpTransport::new(&config.fetch)?);
    let referer = format!("{}/", cli.seed_url.origin().ascii_serialization());
    let mut fetcher = ResilientFetcher::new(transport, &config.fetch).with_referer(referer);
    if let Some(cache_dir) = &config.page_cache_dir {
        tracing::info!(dir = %cache_dir.display(), "page cache enabled");
        fetcher = fetcher.with_cache(PageCache::open(cache_dir)?);
    }

    let service = ScrapeService::new(Arc::new(fetcher), config.output_root.clone())?;
    let outcome = service
        .run(ScrapeRequest {
            seed_url: cli.seed_url,
            type_override: cli.election_type,
            output_dir: cli.output_dir,
        })
        .await;

    let report = serde_json::to_string_pretty(&outcome.report)
        .map_err(|err| AppError::serialization(format!("failed to render run report: {err}")))?;
    println!("{report}");

    Ok(if outcome.report.status == RunStatus::Failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

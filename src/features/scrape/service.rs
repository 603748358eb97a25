use std::path::PathBuf;
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use tracing::{error, info, warn};
use url::Url;

use crate::core::error::AppError;
use crate::features::election::{ElectionType, detect_with_override};
use crate::features::fetcher::PageSource;
use crate::features::output::ArtifactWriter;
use crate::features::scrape::dto::ElectionDatasets;
use crate::features::scrape::metadata::derive_datasets;
use crate::features::scrape::orchestrator::Orchestrator;
use crate::features::scrape::profile::ElectionProfile;
use crate::features::scrape::report::{Phase, RunReport};

#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    pub seed_url: Url,
    pub type_override: Option<ElectionType>,
    pub output_dir: Option<PathBuf>,
}

impl ScrapeRequest {
    pub fn new(seed_url: Url) -> Self {
        Self {
            seed_url,
            type_override: None,
            output_dir: None,
        }
    }
}

#[derive(Debug)]
pub struct RunOutcome {
    pub report: RunReport,
    pub datasets: Option<ElectionDatasets>,
}

pub struct ScrapeService {
    source: Arc<dyn PageSource>,
    writer: ArtifactWriter,
    output_root: PathBuf,
}

impl ScrapeService {
    pub fn new(source: Arc<dyn PageSource>, output_root: PathBuf) -> Result<Self, AppError> {
        Ok(Self {
            source,
            writer: ArtifactWriter::new()?,
            output_root,
        })
    }

    pub async fn run(&self, request: ScrapeRequest) -> RunOutcome {
        let mut report = RunReport::new(request.seed_url.as_str());
        match self.execute(&request, &mut report).await {
            Ok(datasets) => {
                info!(
                    status = ?report.status,
                    pages = report.pages_attempted,
                    gaps = report.gaps.len(),
                    "scrape finished"
                );
                RunOutcome {
                    report,
                    datasets: Some(datasets),
                }
            }
            Err(err) => {
                error!(error = %err, "scrape failed");
                report.fail(&err);
                RunOutcome {
                    report,
                    datasets: None,
                }
            }
        }
    }

    async fn execute(
        &self,
        request: &ScrapeRequest,
        report: &mut RunReport,
    ) -> Result<ElectionDatasets, AppError> {
        let seed = match self.source.fetch(&request.seed_url).await {
            Ok(seed) => seed,
            Err(err) => {
                report.record_skipped();
                return Err(err.into());
            }
        };
        report.record_success();

        let detection = {
            let document = seed.document();
            detect_with_override(&seed.url, &document, request.type_override)?
        };
        report.election_id = Some(detection.election_id());
        if detection.election_type == ElectionType::VidhanSabha && detection.state_code.is_none() {
            warn!("assembly election without a recognised state");
            report.warn("state could not be determined from the seed page");
            report.mark_incomplete();
        }

        let orchestrator = Orchestrator::new(
            self.source.as_ref(),
            ElectionProfile::for_type(detection.election_type),
        )?;
        let working = std::mem::replace(report, RunReport::new(request.seed_url.as_str()));
        let accumulator = orchestrator.run(&seed, &detection, working).await?;

        let scraped_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let (datasets, derived) =
            derive_datasets(&detection, request.seed_url.as_str(), scraped_at, accumulator);
        *report = derived;
        report.advance(Phase::MetadataDerived)?;

        let output_dir = request.output_dir.clone().unwrap_or_else(|| {
            self.output_root
                .join(detection.election_type.dir_name())
                .join(detection.election_id())
        });
        self.writer.commit(&output_dir, &datasets).await?;
        report.output_dir = Some(output_dir.display().to_string());
        report.advance(Phase::Saved)?;

        Ok(datasets)
    }
}

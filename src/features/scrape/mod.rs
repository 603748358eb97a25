pub mod accumulator;
pub mod dto;
pub mod extract;
pub mod metadata;
pub mod orchestrator;
pub mod profile;
pub mod report;
pub mod service;

pub use accumulator::ScrapeAccumulator;
pub use dto::ElectionDatasets;
pub use orchestrator::Orchestrator;
pub use profile::ElectionProfile;
pub use report::{Gap, GapKind, Phase, RunReport, RunStatus};
pub use service::{RunOutcome, ScrapeRequest, ScrapeService};

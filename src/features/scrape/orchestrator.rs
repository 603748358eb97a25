use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, info, warn};
use url::Url;

use crate::core::error::AppError;
use crate::features::discovery::LinkDiscoverer;
use crate::features::election::{Candidate, Constituency, Detection};
use crate::features::fetcher::{Page, PageSource};
use crate::features::scrape::accumulator::ScrapeAccumulator;
use crate::features::scrape::dto::{
    CandidatePage, ConstituencyTarget, PageLinks, PartyRow,
};
use crate::features::scrape::extract;
use crate::features::scrape::profile::ElectionProfile;
use crate::features::scrape::report::{GapKind, Phase, RunReport};

struct Listing {
    parties: Vec<PartyRow>,
    party_links: Vec<Url>,
    links: PageLinks,
}

pub struct Orchestrator<'a> {
    source: &'a dyn PageSource,
    profile: ElectionProfile,
    discoverer: LinkDiscoverer,
}

impl<'a> Orchestrator<'a> {
    pub fn new(source: &'a dyn PageSource, profile: ElectionProfile) -> Result<Self, AppError> {
        let discoverer = LinkDiscoverer::new(&profile.patterns)?;
        Ok(Self {
            source,
            profile,
            discoverer,
        })
    }

    pub fn profile(&self) -> &ElectionProfile {
        &self.profile
    }

    pub async fn run(
        &self,
        seed: &Page,
        detection: &Detection,
        report: RunReport,
    ) -> Result<ScrapeAccumulator, AppError> {
        let accumulator = ScrapeAccumulator::new(report);
        let accumulator = self.scrape_parties(seed, accumulator).await?;
        let accumulator = self.discover_constituencies(accumulator)?;
        self.scrape_candidates(detection, accumulator).await
    }

    async fn scrape_parties(
        &self,
        seed: &Page,
        mut accumulator: ScrapeAccumulator,
    ) -> Result<ScrapeAccumulator, AppError> {
        let listing = self.read_listing(seed, true);
        let mut queue = VecDeque::new();
        let mut visited = HashSet::from([seed.url.as_str().to_string()]);
        self.absorb_listing(&mut accumulator, listing, &mut queue, &mut visited);

        while let Some(url) = queue.pop_front() {
            match self.source.fetch(&url).await {
                Ok(page) => {
                    accumulator.report.record_success();
                    let listing = self.read_listing(&page, accumulator.parties.is_empty());
                    self.absorb_listing(&mut accumulator, listing, &mut queue, &mut visited);
                }
                Err(err) => {
                    warn!(url = %url, error = %err, "skipping party page");
                    accumulator.report.record_gap(
                        GapKind::Party,
                        url.as_str(),
                        format!("{} after {} attempt(s)", err.failure, err.attempts_made),
                    );
                }
            }
        }

        info!(
            parties = accumulator.parties.len(),
            party_pages = visited.len() - 1,
            "party step finished"
        );
        accumulator.report.advance(Phase::PartiesScraped)?;
        Ok(accumulator)
    }

    fn absorb_listing(
        &self,
        accumulator: &mut ScrapeAccumulator,
        listing: Listing,
        queue: &mut VecDeque<Url>,
        visited: &mut HashSet<String>,
    ) {
        for row in listing.parties {
            accumulator.add_party(row);
        }
        for link in listing.party_links {
            if visited.insert(link.as_str().to_string()) {
                queue.push_back(link);
            }
        }
        accumulator.page_links.push(listing.links);
    }

    fn read_listing(&self, page: &Page, with_parties: bool) -> Listing {
        let document = page.document();
        let root = document.root();
        Listing {
            parties: if with_parties {
                extract::party_summary(&root)
            } else {
                Vec::new()
            },
            party_links: self.discoverer.discover_party_links(&page.url, &root),
            links: PageLinks {
                constituency_links: self.discoverer.discover_constituency_links(&page.url, &root),
                labels: extract::constituency_labels(&page.url, &root),
            },
        }
    }

    fn discover_constituencies(
        &self,
        mut accumulator: ScrapeAccumulator,
    ) -> Result<ScrapeAccumulator, AppError> {
        let page_links = std::mem::take(&mut accumulator.page_links);

        let mut names = HashMap::new();
        for label in page_links.iter().flat_map(|links| links.labels.iter()) {
            if let Some(link) = &label.link {
                names
                    .entry(link.as_str().to_string())
                    .or_insert_with(|| label.name.clone());
            }
        }

        for url in page_links.into_iter().flat_map(|links| links.constituency_links) {
            let Some(code) = self.discoverer.constituency_code(&url) else {
                debug!(url = %url, "constituency link without a code");
                continue;
            };
            let name = names.get(url.as_str()).cloned();
            accumulator.add_target(ConstituencyTarget { url, code, name });
        }

        if accumulator.targets.is_empty() {
            warn!("no constituency pages discovered");
            accumulator.report.warn("no constituency pages discovered");
            accumulator.report.mark_incomplete();
        }

        info!(constituencies = accumulator.targets.len(), "constituency pages discovered");
        accumulator.report.advance(Phase::ConstituenciesDiscovered)?;
        Ok(accumulator)
    }

    async fn scrape_candidates(
        &self,
        detection: &Detection,
        mut accumulator: ScrapeAccumulator,
    ) -> Result<ScrapeAccumulator, AppError> {
        let state_code = if self.profile.rows_carry_state {
            detection.state_code.clone()
        } else {
            None
        };

        let targets = accumulator.targets.clone();
        for target in targets {
            let page = match self.source.fetch(&target.url).await {
                Ok(page) => page,
                Err(err) => {
                    warn!(code = %target.code, error = %err, "skipping constituency");
                    accumulator.report.record_gap(
                        GapKind::Constituency,
                        target.url.as_str(),
                        format!("{} after {} attempt(s)", err.failure, err.attempts_made),
                    );
                    continue;
                }
            };

            let extracted = read_candidates(&page);
            if extracted.rows.is_empty() {
                warn!(code = %target.code, url = %target.url, "no candidate rows on page");
                accumulator.report.record_gap(
                    GapKind::Constituency,
                    target.url.as_str(),
                    "no candidate rows found",
                );
                continue;
            }
            if extracted.used_fallback {
                accumulator.report.warn(format!(
                    "candidates for {} read from the fallback results table",
                    target.code
                ));
            }

            let name = resolve_name(&target, extracted.heading_name);
            accumulator.add_constituency(Constituency {
                code: target.code.clone(),
                name,
                state_code: state_code.clone(),
            });

            let mut added = 0;
            for row in extracted.rows {
                let candidate = Candidate {
                    name: row.name,
                    party: row.party,
                    constituency_code: target.code.clone(),
                    state_code: state_code.clone(),
                    votes: row.votes,
                    margin: row.margin,
                    status: row.status,
                    photo_url: row.photo_url,
                };
                if accumulator.add_candidate(candidate) {
                    added += 1;
                }
            }
            accumulator.report.record_success();
            debug!(code = %target.code, candidates = added, "constituency scraped");
        }

        info!(
            constituencies = accumulator.constituencies.len(),
            candidates = accumulator.candidates.len(),
            gaps = accumulator.report.gaps.len(),
            "candidate step finished"
        );
        accumulator.report.advance(Phase::CandidatesScraped)?;
        Ok(accumulator)
    }
}

fn read_candidates(page: &Page) -> CandidatePage {
    let document = page.document();
    extract::candidate_page(&page.url, &document.root())
}

fn resolve_name(target: &ConstituencyTarget, heading_name: Option<String>) -> String {
    if let Some(name) = &target.name {
        return name.clone();
    }
    match heading_name {
        Some(name) => {
            warn!(code = %target.code, "constituency name taken from page heading");
            name
        }
        None => {
            warn!(code = %target.code, "no constituency name found, using code");
            target.code.clone()
        }
    }
}

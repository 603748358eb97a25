use std::collections::HashSet;

use crate::features::election::{Candidate, Constituency};
use crate::features::scrape::dto::{ConstituencyTarget, PageLinks, PartyRow};
use crate::features::scrape::report::RunReport;

#[derive(Debug)]
pub struct ScrapeAccumulator {
    pub report: RunReport,
    pub parties: Vec<PartyRow>,
    pub page_links: Vec<PageLinks>,
    pub targets: Vec<ConstituencyTarget>,
    pub constituencies: Vec<Constituency>,
    pub candidates: Vec<Candidate>,
    party_names: HashSet<String>,
    target_urls: HashSet<String>,
    constituency_codes: HashSet<String>,
    candidate_keys: HashSet<(String, String)>,
}

impl ScrapeAccumulator {
    pub fn new(report: RunReport) -> Self {
        Self {
            report,
            parties: Vec::new(),
            page_links: Vec::new(),
            targets: Vec::new(),
            constituencies: Vec::new(),
            candidates: Vec::new(),
            party_names: HashSet::new(),
            target_urls: HashSet::new(),
            constituency_codes: HashSet::new(),
            candidate_keys: HashSet::new(),
        }
    }

    pub fn add_party(&mut self, row: PartyRow) -> bool {
        if !self.party_names.insert(row.name.clone()) {
            return false;
        }
        self.parties.push(row);
        true
    }

    pub fn add_target(&mut self, target: ConstituencyTarget) -> bool {
        if !self.target_urls.insert(target.url.as_str().to_string()) {
            return false;
        }
        self.targets.push(target);
        true
    }

    pub fn add_constituency(&mut self, constituency: Constituency) -> bool {
        if !self.constituency_codes.insert(constituency.code.clone()) {
            return false;
        }
        self.constituencies.push(constituency);
        true
    }

    pub fn add_candidate(&mut self, candidate: Candidate) -> bool {
        let key = (candidate.constituency_code.clone(), candidate.name.clone());
        if !self.candidate_keys.insert(key) {
            return false;
        }
        self.candidates.push(candidate);
        true
    }
}

use url::Url;

use crate::features::election::{Candidate, CandidateStatus, Constituency, ElectionMetadata, Party};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyRow {
    pub name: String,
    pub symbol: Option<String>,
    pub seats: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstituencyLabel {
    pub name: String,
    pub number: String,
    pub link: Option<Url>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRow {
    pub name: String,
    pub party: String,
    pub votes: Option<u64>,
    pub margin: Option<u64>,
    pub status: CandidateStatus,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePage {
    pub rows: Vec<CandidateRow>,
    pub heading_name: Option<String>,
    pub used_fallback: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PageLinks {
    pub constituency_links: Vec<Url>,
    pub labels: Vec<ConstituencyLabel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstituencyTarget {
    pub url: Url,
    pub code: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectionDatasets {
    pub parties: Vec<Party>,
    pub constituencies: Vec<Constituency>,
    pub candidates: Vec<Candidate>,
    pub metadata: ElectionMetadata,
}

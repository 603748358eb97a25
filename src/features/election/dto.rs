use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElectionType {
    LokSabha,
    VidhanSabha,
}

impl ElectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElectionType::LokSabha => "LOK_SABHA",
            ElectionType::VidhanSabha => "VIDHAN_SABHA",
        }
    }

    pub fn dir_name(&self) -> &'static str {
        match self {
            ElectionType::LokSabha => "lok_sabha",
            ElectionType::VidhanSabha => "vidhan_sabha",
        }
    }
}

impl fmt::Display for ElectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElectionType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "lok_sabha" | "ls" | "pc" => Ok(ElectionType::LokSabha),
            "vidhan_sabha" | "vs" | "ac" | "assembly" => Ok(ElectionType::VidhanSabha),
            _ => Err(format!(
                "unknown election type `{value}`; expected lok-sabha or vidhan-sabha"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CandidateStatus {
    Won,
    Lost,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub party: String,
    pub constituency_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    pub votes: Option<u64>,
    pub margin: Option<u64>,
    pub status: CandidateStatus,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub symbol: Option<String>,
    pub total_seats: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constituency {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionMetadata {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub election_type: ElectionType,
    pub year: u16,
    pub state_code: Option<String>,
    pub state_name: Option<String>,
    pub total_constituencies: usize,
    pub total_candidates: usize,
    pub total_parties: usize,
    pub result_status: String,
    pub incomplete: bool,
    pub gaps: usize,
    pub winning_party: Option<String>,
    pub winning_party_seats: Option<u32>,
    pub runner_up_party: Option<String>,
    pub runner_up_seats: Option<u32>,
    pub source_url: String,
    pub scraped_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    pub election_type: ElectionType,
    pub year: u16,
    pub state_code: Option<String>,
    pub state_name: Option<String>,
}

impl Detection {
    pub fn election_id(&self) -> String {
        match (self.election_type, &self.state_name) {
            (ElectionType::LokSabha, _) => format!("lok-sabha-{}", self.year),
            (ElectionType::VidhanSabha, Some(state)) => {
                format!("{}-assembly-{}", slugify(state), self.year)
            }
            (ElectionType::VidhanSabha, None) => format!("vidhan-sabha-{}", self.year),
        }
    }

    pub fn election_name(&self) -> String {
        match (self.election_type, &self.state_name) {
            (ElectionType::LokSabha, _) => format!("Lok Sabha General Elections {}", self.year),
            (ElectionType::VidhanSabha, Some(state)) => {
                format!("{state} Legislative Assembly Elections {}", self.year)
            }
            (ElectionType::VidhanSabha, None) => {
                format!("Vidhan Sabha Elections {}", self.year)
            }
        }
    }
}

fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

use std::collections::{BTreeMap, HashSet};

use tracing::{info, warn};

use crate::features::election::{
    Candidate, CandidateStatus, Constituency, Detection, ElectionMetadata, Party,
};
use crate::features::scrape::accumulator::ScrapeAccumulator;
use crate::features::scrape::dto::ElectionDatasets;
use crate::features::scrape::report::RunReport;

pub fn derive_datasets(
    detection: &Detection,
    source_url: &str,
    scraped_at: String,
    accumulator: ScrapeAccumulator,
) -> (ElectionDatasets, RunReport) {
    let ScrapeAccumulator {
        mut report,
        parties: party_rows,
        constituencies,
        candidates,
        ..
    } = accumulator;

    let mut won = BTreeMap::<String, u32>::new();
    for candidate in candidates
        .iter()
        .filter(|candidate| candidate.status == CandidateStatus::Won)
    {
        *won.entry(candidate.party.clone()).or_default() += 1;
    }

    let mut parties = if party_rows.is_empty() && !candidates.is_empty() {
        warn!("no party summary found, deriving parties from candidates");
        report.warn("no party summary found; party list derived from candidates");
        let mut names = candidates
            .iter()
            .map(|candidate| candidate.party.clone())
            .collect::<Vec<_>>();
        names.sort();
        names.dedup();
        names
            .into_iter()
            .map(|name| Party {
                total_seats: won.get(&name).copied().unwrap_or(0),
                name,
                symbol: None,
            })
            .collect::<Vec<_>>()
    } else {
        party_rows
            .into_iter()
            .map(|row| {
                let derived = won.get(&row.name).copied().unwrap_or(0);
                let total_seats = match row.seats {
                    Some(scraped) if scraped != derived => {
                        report.warn(format!(
                            "party `{}` lists {scraped} seats but {derived} winning candidates were scraped",
                            row.name
                        ));
                        scraped
                    }
                    Some(scraped) => scraped,
                    None => derived,
                };
                Party {
                    name: row.name,
                    symbol: row.symbol,
                    total_seats,
                }
            })
            .collect::<Vec<_>>()
    };
    parties.sort_by(|left, right| {
        right
            .total_seats
            .cmp(&left.total_seats)
            .then_with(|| left.name.cmp(&right.name))
    });

    check_references(&mut report, &parties, &constituencies, &candidates);

    let mut ranking = won.into_iter().collect::<Vec<_>>();
    ranking.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(&right.0)));
    let mut ranking = ranking.into_iter();
    let winner = ranking.next();
    let runner_up = ranking.next();

    let incomplete = report.is_incomplete();
    let metadata = ElectionMetadata {
        id: detection.election_id(),
        name: detection.election_name(),
        election_type: detection.election_type,
        year: detection.year,
        state_code: detection.state_code.clone(),
        state_name: detection.state_name.clone(),
        total_constituencies: constituencies.len(),
        total_candidates: candidates.len(),
        total_parties: parties.len(),
        result_status: if incomplete { "INCOMPLETE" } else { "COMPLETE" }.to_string(),
        incomplete,
        gaps: report.gaps.len(),
        winning_party: winner.as_ref().map(|(name, _)| name.clone()),
        winning_party_seats: winner.as_ref().map(|(_, seats)| *seats),
        runner_up_party: runner_up.as_ref().map(|(name, _)| name.clone()),
        runner_up_seats: runner_up.as_ref().map(|(_, seats)| *seats),
        source_url: source_url.to_string(),
        scraped_at,
    };

    info!(
        constituencies = metadata.total_constituencies,
        candidates = metadata.total_candidates,
        parties = metadata.total_parties,
        winner = metadata.winning_party.as_deref().unwrap_or("-"),
        "derived election metadata"
    );

    let datasets = ElectionDatasets {
        parties,
        constituencies,
        candidates,
        metadata,
    };
    (datasets, report)
}

fn check_references(
    report: &mut RunReport,
    parties: &[Party],
    constituencies: &[Constituency],
    candidates: &[Candidate],
) {
    let party_names = parties
        .iter()
        .map(|party| party.name.as_str())
        .collect::<HashSet<_>>();
    let codes = constituencies
        .iter()
        .map(|constituency| constituency.code.as_str())
        .collect::<HashSet<_>>();

    let mut unknown_parties = BTreeMap::<&str, usize>::new();
    let mut unknown_codes = BTreeMap::<&str, usize>::new();
    for candidate in candidates {
        if !party_names.contains(candidate.party.as_str()) {
            *unknown_parties.entry(candidate.party.as_str()).or_default() += 1;
        }
        if !codes.contains(candidate.constituency_code.as_str()) {
            *unknown_codes.entry(candidate.constituency_code.as_str()).or_default() += 1;
        }
    }

    for (party, count) in unknown_parties {
        warn!(party, count, "candidates reference a party missing from the party list");
        report.warn(format!(
            "{count} candidate(s) reference party `{party}` which is missing from the party list"
        ));
    }
    for (code, count) in unknown_codes {
        warn!(code, count, "candidates reference an unknown constituency");
        report.warn(format!(
            "{count} candidate(s) reference constituency `{code}` which was not scraped"
        ));
    }
}

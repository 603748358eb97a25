use tracing::{debug, warn};
use url::Url;

use crate::features::election::CandidateStatus;
use crate::features::markup::MarkupNode;
use crate::features::normalize::{
    clean_margin, clean_name, clean_party_label, clean_votes, parse_constituency_label,
    parse_status, split_party_symbol,
};
use crate::features::scrape::dto::{CandidatePage, CandidateRow, ConstituencyLabel, PartyRow};

const NOTA_PARTY: &str = "none of the above";

pub fn party_summary<N: MarkupNode>(root: &N) -> Vec<PartyRow> {
    let mut rows = Vec::new();
    for row in root.find_all("tr") {
        let cells = row.find_all("td");
        if cells.len() < 4 {
            continue;
        }

        let label = cells[0]
            .find_first("a")
            .map(|anchor| anchor.inner_text())
            .unwrap_or_else(|| cells[0].inner_text());
        let (name, symbol) = split_party_symbol(&label);
        if !name.chars().any(char::is_alphabetic) || name.eq_ignore_ascii_case("total") {
            continue;
        }

        let seats = clean_votes(&cells[3].inner_text()).and_then(|seats| u32::try_from(seats).ok());
        rows.push(PartyRow { name, symbol, seats });
    }
    rows
}

pub fn constituency_labels<N: MarkupNode>(base: &Url, root: &N) -> Vec<ConstituencyLabel> {
    let mut labels = Vec::new();
    for row in root.find_all("tr") {
        let cells = row.find_all("td");
        if cells.len() < 2 {
            continue;
        }

        let Some((cell, (name, number))) = cells
            .iter()
            .find_map(|cell| parse_constituency_label(&cell.inner_text()).map(|label| (cell, label)))
        else {
            continue;
        };

        let link = cell
            .find_first("a[href]")
            .or_else(|| row.find_first("a[href]"))
            .and_then(|anchor| anchor.attribute("href"))
            .and_then(|href| resolve(base, &href));
        labels.push(ConstituencyLabel { name, number, link });
    }
    labels
}

pub fn candidate_page<N: MarkupNode>(page_url: &Url, root: &N) -> CandidatePage {
    let cards = root.find_all("div.cand-box");
    let (rows, used_fallback) = if cards.is_empty() {
        warn!(url = %page_url, "no candidate cards on page, falling back to results table");
        (table_rows(root), true)
    } else {
        let rows = cards
            .iter()
            .filter_map(|card| card_row(page_url, card))
            .collect::<Vec<_>>();
        (rows, false)
    };

    let rows = rows
        .into_iter()
        .filter(|row| {
            let nota = row.name.eq_ignore_ascii_case("nota")
                || row.party.eq_ignore_ascii_case(NOTA_PARTY);
            if nota {
                debug!(url = %page_url, "dropping NOTA row");
            }
            !nota
        })
        .collect();

    let heading_name = root
        .find_all("h1, h2, h3, h4")
        .iter()
        .find_map(|heading| heading_constituency(&heading.inner_text()));

    CandidatePage {
        rows,
        heading_name,
        used_fallback,
    }
}

fn card_row<N: MarkupNode>(page_url: &Url, card: &N) -> Option<CandidateRow> {
    let name = card
        .find_first(".nme-prty h5")
        .map(|node| clean_name(&node.inner_text()))
        .filter(|name| !name.is_empty());
    let Some(name) = name else {
        debug!(url = %page_url, "candidate card without a name");
        return None;
    };
    let party = card
        .find_first(".nme-prty h6")
        .map(|node| clean_party_label(&node.inner_text()))
        .unwrap_or_default();
    if party.is_empty() {
        debug!(url = %page_url, candidate = %name, "candidate card without a party");
        return None;
    }

    let mut status = CandidateStatus::Unknown;
    let mut votes = None;
    let mut margin = None;
    if let Some(status_node) = card.find_first("div.status") {
        let parts = status_node.find_all("div");
        status = parse_status(&status_node.attribute("class").unwrap_or_default());
        if status == CandidateStatus::Unknown {
            if let Some(label) = parts.first() {
                status = parse_status(&label.inner_text());
            }
        }
        if let Some(counts) = parts.get(1) {
            (votes, margin) = split_counts(&counts.inner_text());
        }
    }

    let photo_url = card
        .find_first("img")
        .and_then(|img| img.attribute("src"))
        .and_then(|src| resolve(page_url, &src))
        .map(String::from);

    Some(CandidateRow {
        name,
        party,
        votes,
        margin,
        status,
        photo_url,
    })
}

fn table_rows<N: MarkupNode>(root: &N) -> Vec<CandidateRow> {
    let Some(table) = root.find_first("table") else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    for row in table.find_all("tr") {
        let cells = row.find_all("td");
        if cells.len() < 4 {
            continue;
        }

        let name = clean_name(&cells[0].inner_text());
        let party = clean_party_label(&cells[1].inner_text());
        if !name.chars().any(char::is_alphabetic) || party.is_empty() {
            continue;
        }

        let mut status = parse_status(&row.inner_text());
        if status == CandidateStatus::Unknown && row.find_first("b, strong").is_some() {
            status = CandidateStatus::Won;
        }

        rows.push(CandidateRow {
            name,
            party,
            votes: clean_votes(&cells[2].inner_text()),
            margin: clean_margin(&cells[3].inner_text()),
            status,
            photo_url: None,
        });
    }
    rows
}

// "146839 (+ 53204)" into votes and margin.
fn split_counts(text: &str) -> (Option<u64>, Option<u64>) {
    match text.find('(') {
        Some(open) => (clean_votes(&text[..open]), clean_margin(&text[open..])),
        None => {
            let mut tokens = text.split_whitespace();
            let votes = tokens.next().and_then(clean_votes);
            let rest = tokens.collect::<Vec<_>>().join(" ");
            (votes, clean_margin(&rest))
        }
    }
}

// "Assembly Constituency 147 - Kopri-Pachpakhadi (Maharashtra)" into the
// constituency name.
fn heading_constituency(text: &str) -> Option<String> {
    let (prefix, rest) = text.split_once(" - ")?;
    if !prefix.trim_end().ends_with(|ch: char| ch.is_ascii_digit()) {
        return None;
    }

    let rest = rest.trim_end();
    let rest = match rest.rfind('(') {
        Some(open) if rest.ends_with(')') => &rest[..open],
        _ => rest,
    };
    let name = clean_name(rest);
    name.chars().any(char::is_alphabetic).then_some(name)
}

fn resolve(base: &Url, href: &str) -> Option<Url> {
    let mut url = base.join(href.trim()).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.set_fragment(None);
    Some(url)
}

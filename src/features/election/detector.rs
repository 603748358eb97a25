use tracing::{debug, info, warn};
use url::Url;

use crate::core::error::AppError;
use crate::features::election::dto::{Detection, ElectionType};
use crate::features::election::states::find_state;
use crate::features::markup::Document;

const MIN_YEAR: u16 = 1950;
const MAX_YEAR: u16 = 2099;

const URL_TOKENS: &[(&str, ElectionType)] = &[
    ("pcresultgen", ElectionType::LokSabha),
    ("parliamentaryconstituencies", ElectionType::LokSabha),
    ("resultacgen", ElectionType::VidhanSabha),
    ("acgen", ElectionType::VidhanSabha),
    ("assemblyconstituencies", ElectionType::VidhanSabha),
];

const PATH_SEGMENTS: &[(&str, ElectionType)] = &[
    ("pc", ElectionType::LokSabha),
    ("ac", ElectionType::VidhanSabha),
];

const TEXT_PHRASES: &[(&str, ElectionType)] = &[
    ("lok sabha", ElectionType::LokSabha),
    ("parliamentary constituenc", ElectionType::LokSabha),
    ("general election to parliament", ElectionType::LokSabha),
    ("vidhan sabha", ElectionType::VidhanSabha),
    ("legislative assembly", ElectionType::VidhanSabha),
    ("assembly constituenc", ElectionType::VidhanSabha),
];

pub fn detect(seed_url: &Url, document: &Document) -> Result<Detection, AppError> {
    detect_with_override(seed_url, document, None)
}

pub fn detect_with_override(
    seed_url: &Url,
    document: &Document,
    type_override: Option<ElectionType>,
) -> Result<Detection, AppError> {
    let title = document.title().unwrap_or_default();

    let election_type = match type_override {
        Some(election_type) => {
            info!(%election_type, "election type set explicitly");
            election_type
        }
        None => match type_from_url(seed_url) {
            Some(election_type) => election_type,
            None => type_from_text(&title, &document.visible_text())?,
        },
    };

    let year = detect_year(seed_url, &title, || document.visible_text())?;

    let (state_code, state_name) = match election_type {
        ElectionType::LokSabha => (None, None),
        ElectionType::VidhanSabha => {
            let sources = [title.clone(), document.headings().join(" "), document.visible_text()];
            match sources.iter().find_map(|text| find_state(text)) {
                Some(entry) => (Some(entry.code.to_string()), Some(entry.name.to_string())),
                None => {
                    warn!(url = %seed_url, "could not determine state for assembly election");
                    (None, None)
                }
            }
        }
    };

    let detection = Detection {
        election_type,
        year,
        state_code,
        state_name,
    };
    info!(
        election_type = %detection.election_type,
        year = detection.year,
        state = detection.state_code.as_deref().unwrap_or("-"),
        "detected election"
    );
    Ok(detection)
}

fn type_from_url(url: &Url) -> Option<ElectionType> {
    let lowered = format!("{}?{}", url.path(), url.query().unwrap_or_default()).to_lowercase();
    let mut found = URL_TOKENS
        .iter()
        .filter(|(token, _)| lowered.contains(token))
        .map(|(_, election_type)| *election_type)
        .collect::<Vec<_>>();

    if let Some(segments) = url.path_segments() {
        for segment in segments {
            let segment = segment.to_ascii_lowercase();
            found.extend(
                PATH_SEGMENTS
                    .iter()
                    .filter(|(name, _)| *name == segment)
                    .map(|(_, election_type)| *election_type),
            );
        }
    }

    found.sort();
    found.dedup();
    match found.as_slice() {
        [only] => Some(*only),
        [] => None,
        _ => {
            debug!(url = %url, "URL carries tokens for both election types");
            None
        }
    }
}

fn type_from_text(title: &str, body: &str) -> Result<ElectionType, AppError> {
    let text = format!("{title} {body}").to_lowercase();
    let mut lok_sabha = 0;
    let mut vidhan_sabha = 0;
    for (phrase, election_type) in TEXT_PHRASES {
        let hits = text.matches(phrase).count();
        match election_type {
            ElectionType::LokSabha => lok_sabha += hits,
            ElectionType::VidhanSabha => vidhan_sabha += hits,
        }
    }

    debug!(lok_sabha, vidhan_sabha, "election type phrase counts");
    if lok_sabha > vidhan_sabha {
        Ok(ElectionType::LokSabha)
    } else if vidhan_sabha > lok_sabha {
        Ok(ElectionType::VidhanSabha)
    } else {
        Err(AppError::detection(
            "could not determine election type from URL or page text".to_string(),
        ))
    }
}

fn detect_year(
    url: &Url,
    title: &str,
    body: impl FnOnce() -> String,
) -> Result<u16, AppError> {
    let mut years = year_candidates(url.as_str());
    years.extend(year_candidates(title));
    if let Some(year) = most_frequent(&years) {
        return Ok(year);
    }

    debug!("no year in URL or title, scanning page body");
    most_frequent(&year_candidates(&body())).ok_or_else(|| {
        AppError::detection(format!("could not determine election year for {url}"))
    })
}

fn year_candidates(text: &str) -> Vec<u16> {
    let mut years = Vec::new();
    let mut run = String::new();
    for ch in text.chars().chain(std::iter::once(' ')) {
        if ch.is_ascii_digit() {
            run.push(ch);
            continue;
        }
        if run.len() == 4 {
            if let Ok(year) = run.parse::<u16>() {
                if (MIN_YEAR..=MAX_YEAR).contains(&year) {
                    years.push(year);
                }
            }
        }
        run.clear();
    }
    years
}

fn most_frequent(years: &[u16]) -> Option<u16> {
    let mut best: Option<(u16, usize)> = None;
    for year in years {
        let count = years.iter().filter(|other| *other == year).count();
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((*year, count));
        }
    }
    best.map(|(year, _)| year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(title: &str, body: &str) -> Document {
        Document::parse(&format!(
            "<html><head><title>{title}</title></head><body>{body}</body></html>"
        ))
    }

    #[test]
    fn lok_sabha_token_and_title_year() {
        let url = Url::parse("https://results.example.test/PcResultGenJune2024/index.htm").expect("url");
        let document = page("General Election to Parliamentary Constituencies: Trends & Results June-2024", "");

        let detection = detect(&url, &document).expect("detection");
        assert_eq!(detection.election_type, ElectionType::LokSabha);
        assert_eq!(detection.year, 2024);
        assert_eq!(detection.state_code, None);
    }

    #[test]
    fn assembly_seed_reads_state_from_title() {
        let url = Url::parse("https://results.example.test/ResultAcGenFeb2025/index.htm").expect("url");
        let document = page("General Election to Assembly Constituencies: Delhi Feb 2025", "<h2>NCT OF Delhi</h2>");

        let detection = detect(&url, &document).expect("detection");
        assert_eq!(detection.election_type, ElectionType::VidhanSabha);
        assert_eq!(detection.year, 2025);
        assert_eq!(detection.state_code.as_deref(), Some("DL"));
        assert_eq!(detection.election_id(), "delhi-assembly-2025");
    }

    #[test]
    fn falls_back_to_page_text_for_type() {
        let url = Url::parse("https://results.example.test/results2019/index.htm").expect("url");
        let document = page(
            "Results",
            "<p>Maharashtra Legislative Assembly</p><p>Assembly Constituencies</p><p>Lok Sabha by-poll</p>",
        );

        let detection = detect(&url, &document).expect("detection");
        assert_eq!(detection.election_type, ElectionType::VidhanSabha);
        assert_eq!(detection.year, 2019);
        assert_eq!(detection.state_code.as_deref(), Some("MH"));
    }

    #[test]
    fn path_segment_decides_type() {
        let url = Url::parse("https://results.example.test/2024/pc/index.htm").expect("url");
        let detection = detect(&url, &page("Results", "")).expect("detection");
        assert_eq!(detection.election_type, ElectionType::LokSabha);
    }

    #[test]
    fn ambiguous_type_is_a_detection_error() {
        let url = Url::parse("https://results.example.test/2024/index.htm").expect("url");
        let err = detect(&url, &page("Results 2024", "<p>Election results</p>")).expect_err("ambiguous");
        assert!(matches!(err, AppError::Detection(_)));
    }

    #[test]
    fn override_skips_type_inference() {
        let url = Url::parse("https://results.example.test/2024/index.htm").expect("url");
        let detection = detect_with_override(
            &url,
            &page("Results 2024", ""),
            Some(ElectionType::LokSabha),
        )
        .expect("detection");
        assert_eq!(detection.election_type, ElectionType::LokSabha);
        assert_eq!(detection.year, 2024);
    }

    #[test]
    fn missing_year_is_a_detection_error() {
        let url = Url::parse("https://results.example.test/PcResultGen/index.htm").expect("url");
        let err = detect(&url, &page("Results", "<p>Counting day</p>")).expect_err("no year");
        assert!(matches!(err, AppError::Detection(_)));
    }

    #[test]
    fn year_scan_prefers_frequency_then_first_seen() {
        assert_eq!(most_frequent(&year_candidates("2019 2024 2024")), Some(2024));
        assert_eq!(most_frequent(&year_candidates("2019 2024")), Some(2019));
        assert!(year_candidates("12024 1949 2100 20245").is_empty());
        assert_eq!(year_candidates("June-2024/S1312"), vec![2024]);
    }
}

use crate::features::election::CandidateStatus;

const NOISE_WORDS: [&str; 2] = ["votes", "vote"];

pub fn clean_votes(raw: &str) -> Option<u64> {
    clean_count(raw, false)
}

pub fn clean_margin(raw: &str) -> Option<u64> {
    clean_count(raw, true)
}

pub fn clean_name(raw: &str) -> String {
    let collapsed = collapse_whitespace(raw);
    let collapsed = collapsed.trim_end_matches(is_footnote_marker).trim_end();

    let has_letters = collapsed.chars().any(char::is_alphabetic);
    let all_upper = !collapsed.chars().any(char::is_lowercase);
    if has_letters && all_upper {
        title_case(collapsed)
    } else {
        collapsed.to_string()
    }
}

pub fn clean_party_label(raw: &str) -> String {
    collapse_whitespace(raw)
        .trim_matches(|ch: char| ch == '-' || ch == ':' || ch == ',' || ch.is_whitespace())
        .to_string()
}

// Splits "Bharatiya Janata Party - BJP" into name and symbol.
pub fn split_party_symbol(raw: &str) -> (String, Option<String>) {
    let cleaned = collapse_whitespace(raw);
    match cleaned.rsplit_once(" - ") {
        Some((name, symbol)) => {
            let name = clean_party_label(name);
            let symbol = clean_party_label(symbol);
            if name.is_empty() {
                (symbol, None)
            } else if symbol.is_empty() {
                (name, None)
            } else {
                (name, Some(symbol))
            }
        }
        None => (clean_party_label(&cleaned), None),
    }
}

// Parses "Kopri-Pachpakhadi(147)" into ("Kopri-Pachpakhadi", "147").
pub fn parse_constituency_label(raw: &str) -> Option<(String, String)> {
    let cleaned = collapse_whitespace(raw);
    let inner_end = cleaned.strip_suffix(')')?;
    let open = inner_end.rfind('(')?;
    let number = inner_end[open + 1..].trim();
    if number.is_empty() || !number.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }

    let name = clean_name(&inner_end[..open]);
    if !name.chars().any(char::is_alphabetic) {
        return None;
    }

    let number = number.trim_start_matches('0');
    let number = if number.is_empty() { "0" } else { number };
    Some((name, number.to_string()))
}

pub fn parse_status(raw: &str) -> CandidateStatus {
    let mut status = CandidateStatus::Unknown;
    for word in raw
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| !word.is_empty())
    {
        match word.to_lowercase().as_str() {
            "won" | "winner" | "elected" => return CandidateStatus::Won,
            "lost" | "defeated" => status = CandidateStatus::Lost,
            _ => {}
        }
    }
    status
}

fn clean_count(raw: &str, signed: bool) -> Option<u64> {
    let mut text = strip_bracketed_notes(raw).to_lowercase();
    for word in NOISE_WORDS {
        text = text.replace(word, " ");
    }

    let mut body = trim_noise(&text);
    if let Some(inner) = body.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
        body = trim_noise(inner);
    }
    if let Some(rest) = body.strip_prefix('+') {
        body = trim_noise(rest);
    } else if signed {
        if let Some(rest) = body.strip_prefix(['-', '\u{2212}']) {
            body = trim_noise(rest);
        }
    }

    digit_groups(body)?.parse::<u64>().ok()
}

// Commas must sit between digits; anything else is not a single count.
fn digit_groups(body: &str) -> Option<String> {
    let mut digits = String::with_capacity(body.len());
    for group in body.split(',') {
        if group.is_empty() || !group.chars().all(|ch| ch.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

fn trim_noise(text: &str) -> &str {
    text.trim_matches(|ch: char| ch.is_whitespace() || is_footnote_marker(ch))
}

fn is_footnote_marker(ch: char) -> bool {
    matches!(ch, '*' | '#' | '\u{2020}' | '\u{2021}')
}

fn strip_bracketed_notes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut depth = 0usize;
    for ch in raw.chars() {
        match ch {
            '[' => depth += 1,
            ']' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut start_of_word = true;
    for ch in raw.chars() {
        if ch.is_alphabetic() {
            if start_of_word {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            start_of_word = false;
        } else {
            out.push(ch);
            start_of_word = true;
        }
    }
    out
}

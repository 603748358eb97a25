#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use url::Url;

use eci_results_scraper::core::error::{FetchError, FetchFailure};
use eci_results_scraper::features::fetcher::{Clock, Page, PageSource, RawResponse, Transport};

/// Clock that never really sleeps; sleeping moves time forward.
pub struct FakeClock {
    start: Instant,
    elapsed: Mutex<Duration>,
    sleeps: Mutex<Vec<Duration>>,
}

impl FakeClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
            sleeps: Mutex::new(Vec::new()),
        })
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().expect("sleeps lock").clone()
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.start + *self.elapsed.lock().expect("elapsed lock")
    }

    async fn sleep(&self, duration: Duration) {
        *self.elapsed.lock().expect("elapsed lock") += duration;
        self.sleeps.lock().expect("sleeps lock").push(duration);
    }
}

/// Transport that replays a fixed script of responses per URL.
pub struct ScriptedTransport {
    script: Mutex<HashMap<String, VecDeque<Result<RawResponse, FetchFailure>>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(self, url: &str, status: u16, body: &str) -> Self {
        self.push(url, Ok(RawResponse {
            status,
            body: body.to_string(),
        }))
    }

    pub fn fail(self, url: &str, failure: FetchFailure) -> Self {
        self.push(url, Err(failure))
    }

    fn push(self, url: &str, outcome: Result<RawResponse, FetchFailure>) -> Self {
        self.script
            .lock()
            .expect("script lock")
            .entry(url.to_string())
            .or_default()
            .push_back(outcome);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &Url, _referer: Option<&str>) -> Result<RawResponse, FetchFailure> {
        self.calls.lock().expect("calls lock").push(url.to_string());
        self.script
            .lock()
            .expect("script lock")
            .get_mut(url.as_str())
            .and_then(VecDeque::pop_front)
            .unwrap_or(Err(FetchFailure::Status(404)))
    }
}

/// In-memory results portal. Unknown URLs answer 404; URLs registered as
/// broken answer with their status after three attempts.
pub struct FakeSite {
    pages: HashMap<String, String>,
    broken: HashMap<String, u16>,
    fetched: Mutex<Vec<String>>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            broken: HashMap::new(),
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub fn page(mut self, url: &str, body: String) -> Self {
        self.pages.insert(url.to_string(), body);
        self
    }

    pub fn broken(mut self, url: &str, status: u16) -> Self {
        self.broken.insert(url.to_string(), status);
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().expect("fetched lock").clone()
    }
}

#[async_trait]
impl PageSource for FakeSite {
    async fn fetch(&self, url: &Url) -> Result<Page, FetchError> {
        self.fetched.lock().expect("fetched lock").push(url.to_string());
        if let Some(status) = self.broken.get(url.as_str()) {
            return Err(FetchError {
                url: url.to_string(),
                failure: FetchFailure::Status(*status),
                attempts_made: 3,
            });
        }
        match self.pages.get(url.as_str()) {
            Some(body) => Ok(Page::new(url.clone(), 200, body.clone(), 1)),
            None => Err(FetchError {
                url: url.to_string(),
                failure: FetchFailure::Status(404),
                attempts_made: 1,
            }),
        }
    }
}

pub const LS_BASE: &str = "https://results.example.test/PcResultGenJune2024/";
pub const VS_BASE: &str = "https://results.example.test/ResultAcGenFeb2025/";

pub fn seed_page(title: &str, parties: &[(&str, &str, u32)], links: &[(&str, &str)]) -> String {
    let rows = parties
        .iter()
        .map(|(name, symbol, seats)| {
            format!(
                "<tr><td><a href=\"#\">{name} - {symbol}</a></td><td>{seats}</td><td>0</td><td>{seats}</td></tr>"
            )
        })
        .collect::<String>();
    let anchors = links
        .iter()
        .map(|(href, text)| format!("<li><a href=\"{href}\">{text}</a></li>"))
        .collect::<String>();
    format!(
        "<html><head><title>{title}</title></head><body>\
         <table><tr><th>Party</th><th>Won</th><th>Leading</th><th>Total</th></tr>{rows}</table>\
         <ul>{anchors}</ul></body></html>"
    )
}

pub fn party_win_page(constituencies: &[(&str, &str, &str)]) -> String {
    let rows = constituencies
        .iter()
        .enumerate()
        .map(|(index, (href, name, number))| {
            format!(
                "<tr><td>{}</td><td><a href=\"{href}\">{name}({number})</a></td><td>Winner</td><td>100</td><td>10</td></tr>",
                index + 1
            )
        })
        .collect::<String>();
    format!(
        "<html><head><title>Party wise winners</title></head><body>\
         <table><tr><th>S.No</th><th>Constituency</th><th>Winner</th><th>Votes</th><th>Margin</th></tr>{rows}</table>\
         <a href=\"index.htm\">Home</a></body></html>"
    )
}

/// `(name, party, status class, votes, margin)` per card.
pub fn candidate_page(heading: &str, cards: &[(&str, &str, &str, &str, &str)]) -> String {
    let cards = cards
        .iter()
        .map(|(name, party, status, votes, margin)| {
            format!(
                "<div class=\"cand-box\"><div class=\"cand-info\">\
                 <div class=\"status {status}\"><div>{status}</div><div>{votes} <span>{margin}</span></div></div>\
                 <div class=\"nme-prty\"><h5>{name}</h5><h6>{party}</h6></div>\
                 </div></div>"
            )
        })
        .collect::<String>();
    format!("<html><body><h2>{heading}</h2>{cards}</body></html>")
}

/// A three-constituency national election: Alpha wins two seats, Beta one.
pub fn lok_sabha_site() -> FakeSite {
    let url = |path: &str| format!("{LS_BASE}{path}");
    FakeSite::new()
        .page(
            &url("index.htm"),
            seed_page(
                "General Election to Parliamentary Constituencies: Trends &amp; Results June-2024",
                &[("Alpha Party", "ALP", 2), ("Beta Party", "BTP", 1)],
                &[
                    ("partywisewinresult-1.htm", "Alpha Party"),
                    ("partywisewinresult-2.htm", "Beta Party"),
                ],
            ),
        )
        .page(
            &url("partywisewinresult-1.htm"),
            party_win_page(&[
                ("candidateswise-S0101.htm", "NORTH", "1"),
                ("candidateswise-S0102.htm", "South", "2"),
            ]),
        )
        .page(
            &url("partywisewinresult-2.htm"),
            party_win_page(&[("candidateswise-S0103.htm", "East", "3")]),
        )
        .page(
            &url("candidateswise-S0101.htm"),
            candidate_page(
                "Parliamentary Constituency 1 - North (State)",
                &[
                    ("ASHA RAO", "Alpha Party", "won", "1,20,000", "(+ 20,000)"),
                    ("Bala Iyer", "Beta Party", "lost", "1,00,000", "( -20,000)"),
                    ("NOTA", "None of the Above", "", "2,000", "( -118,000)"),
                ],
            ),
        )
        .page(
            &url("candidateswise-S0102.htm"),
            candidate_page(
                "Parliamentary Constituency 2 - South (State)",
                &[
                    ("Chitra Das", "Alpha Party", "won", "90,000", "(+ 5,000)"),
                    ("Dev Nair", "Beta Party", "lost", "85,000", "( -5,000)"),
                ],
            ),
        )
        .page(
            &url("candidateswise-S0103.htm"),
            candidate_page(
                "Parliamentary Constituency 3 - East (State)",
                &[
                    ("Esha Pal", "Beta Party", "won", "70,000", "(+ 1,000)"),
                    ("Farid Khan", "Alpha Party", "lost", "69,000", "( -1,000)"),
                ],
            ),
        )
}

use std::collections::HashSet;

use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};
use tracing::debug;
use url::Url;

use crate::core::error::AppError;
use crate::features::discovery::patterns::LinkPatterns;
use crate::features::markup::MarkupNode;

struct LinkRule {
    urls: RegexSet,
    texts: Vec<String>,
}

impl LinkRule {
    fn compile(urls: &[String], texts: &[String]) -> Result<Self, AppError> {
        let urls = RegexSetBuilder::new(urls)
            .case_insensitive(true)
            .build()
            .map_err(|err| AppError::configuration(format!("invalid link pattern: {err}")))?;
        let texts = texts.iter().map(|text| text.to_lowercase()).collect();
        Ok(Self { urls, texts })
    }

    fn matches(&self, url: &Url, anchor_text: &str) -> bool {
        if self.urls.is_match(url.as_str()) {
            return true;
        }
        let anchor_text = anchor_text.to_lowercase();
        self.texts.iter().any(|text| anchor_text.contains(text.as_str()))
    }
}

pub struct LinkDiscoverer {
    party: LinkRule,
    constituency: LinkRule,
    code: Regex,
}

impl LinkDiscoverer {
    pub fn new(patterns: &LinkPatterns) -> Result<Self, AppError> {
        let code = RegexBuilder::new(&patterns.constituency_code)
            .case_insensitive(true)
            .build()
            .map_err(|err| AppError::configuration(format!("invalid constituency code pattern: {err}")))?;

        Ok(Self {
            party: LinkRule::compile(&patterns.party_urls, &patterns.party_texts)?,
            constituency: LinkRule::compile(
                &patterns.constituency_urls,
                &patterns.constituency_texts,
            )?,
            code,
        })
    }

    pub fn discover_party_links<N: MarkupNode>(&self, base: &Url, root: &N) -> Vec<Url> {
        collect_links(base, root, &self.party)
    }

    pub fn discover_constituency_links<N: MarkupNode>(&self, base: &Url, root: &N) -> Vec<Url> {
        collect_links(base, root, &self.constituency)
    }

    pub fn constituency_code(&self, url: &Url) -> Option<String> {
        let file = url.path_segments()?.next_back()?;
        self.code
            .captures(file)
            .and_then(|captures| captures.get(1))
            .map(|code| code.as_str().to_ascii_uppercase())
    }
}

fn collect_links<N: MarkupNode>(base: &Url, root: &N, rule: &LinkRule) -> Vec<Url> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in root.find_all("a[href]") {
        let Some(href) = anchor.attribute("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') {
            continue;
        }

        let mut resolved = match base.join(href) {
            Ok(resolved) => resolved,
            Err(err) => {
                debug!(href, error = %err, "skipping unresolvable link");
                continue;
            }
        };
        if resolved.scheme() != "http" && resolved.scheme() != "https" {
            continue;
        }
        resolved.set_fragment(None);

        if !rule.matches(&resolved, &anchor.inner_text()) {
            continue;
        }
        if seen.insert(resolved.as_str().to_string()) {
            links.push(resolved);
        }
    }

    links
}

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

pub trait MarkupNode: Sized {
    fn find_all(&self, pattern: &str) -> Vec<Self>;
    fn attribute(&self, name: &str) -> Option<String>;
    fn inner_text(&self) -> String;
    fn tag_name(&self) -> String;

    fn find_first(&self, pattern: &str) -> Option<Self> {
        self.find_all(pattern).into_iter().next()
    }

    fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .map(|value| {
                value
                    .split_whitespace()
                    .any(|candidate| candidate.eq_ignore_ascii_case(class))
            })
            .unwrap_or(false)
    }
}

impl<'a> MarkupNode for ElementRef<'a> {
    fn find_all(&self, pattern: &str) -> Vec<Self> {
        match Selector::parse(pattern) {
            Ok(selector) => self.select(&selector).collect(),
            Err(err) => {
                debug!(pattern, error = %err, "ignoring unparseable selector");
                Vec::new()
            }
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(|value| value.to_string())
    }

    fn inner_text(&self) -> String {
        self.text()
            .flat_map(|chunk| chunk.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn tag_name(&self) -> String {
        self.value().name().to_ascii_lowercase()
    }
}

pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    pub fn title(&self) -> Option<String> {
        self.root()
            .find_first("title")
            .map(|title| title.inner_text())
            .filter(|title| !title.is_empty())
    }

    pub fn headings(&self) -> Vec<String> {
        self.root()
            .find_all("h1, h2, h3")
            .iter()
            .map(|heading| heading.inner_text())
            .filter(|text| !text.is_empty())
            .collect()
    }

    pub fn visible_text(&self) -> String {
        let Some(body) = self.root().find_first("body") else {
            return self.root().inner_text();
        };

        let mut chunks = Vec::new();
        for node in body.descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            let hidden = node
                .parent()
                .and_then(ElementRef::wrap)
                .map(|parent| matches!(parent.value().name(), "script" | "style" | "noscript"))
                .unwrap_or(false);
            if !hidden {
                chunks.extend(text.split_whitespace());
            }
        }
        chunks.join(" ")
    }
}

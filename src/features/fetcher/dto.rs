use url::Url;

use crate::features::markup::Document;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// A successfully fetched page. The body is kept as text and parsed on demand
/// so the parsed tree never has to live across an await point.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    pub status: u16,
    pub body: String,
    pub attempts: u32,
    pub from_cache: bool,
}

impl Page {
    pub fn new(url: Url, status: u16, body: String, attempts: u32) -> Self {
        Self {
            url,
            status,
            body,
            attempts,
            from_cache: false,
        }
    }

    pub fn cached(url: Url, body: String) -> Self {
        Self {
            url,
            status: 200,
            body,
            attempts: 0,
            from_cache: true,
        }
    }

    pub fn document(&self) -> Document {
        Document::parse(&self.body)
    }
}

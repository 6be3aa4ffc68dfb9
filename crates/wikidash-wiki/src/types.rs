//! Wikipedia / Wikimedia API response types.
//!
//! The action API (`action=query`, `format=json`) returns per-page data under
//! `query.pages`, keyed by the page id as a string; [`PagesResponse`] captures
//! that pattern generically. Every field is optional on the wire, so almost
//! everything here is `#[serde(default)]`. Fields the dashboard never reads are not modelled.

use std::collections::HashMap;

use serde::de::IgnoredAny;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// list=search
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: SearchQuery,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

/// A single full-text search match.
#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub title: String,
}

// ---------------------------------------------------------------------------
// prop=… (pages keyed by id)
// ---------------------------------------------------------------------------

/// Envelope for every `prop=` query: `{ "query": { "pages": { "<id>": P } } }`.
#[derive(Debug, Deserialize)]
pub struct PagesResponse<P> {
    #[serde(default)]
    pub query: Option<PagesQuery<P>>,
}

#[derive(Debug, Deserialize)]
pub struct PagesQuery<P> {
    #[serde(default)]
    pub pages: HashMap<String, P>,
}

impl<P> PagesResponse<P> {
    /// Takes the entry stored under `page_id`, if any.
    #[must_use]
    pub fn into_page(self, page_id: i64) -> Option<P> {
        self.query?.pages.remove(&page_id.to_string())
    }

    /// Takes an arbitrary entry; used for single-title queries where the id
    /// is not known yet.
    #[must_use]
    pub fn into_first_page(self) -> Option<P> {
        self.query?.pages.into_values().next()
    }
}

/// Page info + plain-text extract + thumbnail (`prop=info|extracts|pageimages`).
#[derive(Debug, Default, Deserialize)]
pub struct CorePage {
    #[serde(default)]
    pub pageid: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    /// Page size in bytes.
    #[serde(default)]
    pub length: Option<u64>,
    #[serde(default)]
    pub extract: Option<String>,
    /// Last-touched timestamp, RFC 3339.
    #[serde(default)]
    pub touched: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    #[serde(default)]
    pub fullurl: Option<String>,
    /// Present (as `""`) when the title does not exist.
    #[serde(default)]
    pub missing: Option<serde_json::Value>,
    /// Present (as `""`) when the title is not a valid page name.
    #[serde(default)]
    pub invalid: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub source: String,
}

/// A link entry as returned by both `prop=links` and `prop=linkshere`.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkEntry {
    pub title: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LinksPage {
    #[serde(default)]
    pub links: Vec<LinkEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BacklinksPage {
    #[serde(default)]
    pub linkshere: Vec<LinkEntry>,
}

/// One revision from `prop=revisions`; the revision ids are not read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Revision {
    /// Absent when the user name has been suppressed.
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RevisionsPage {
    #[serde(default)]
    pub revisions: Vec<Revision>,
}

/// Only the number of interlanguage links is used, so entries are skipped.
#[derive(Debug, Default, Deserialize)]
pub struct LangLinksPage {
    #[serde(default)]
    pub langlinks: Vec<IgnoredAny>,
}

// ---------------------------------------------------------------------------
// pageviews per-article
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct PageviewsResponse {
    #[serde(default)]
    pub items: Vec<PageviewItem>,
}

/// One day of views. `timestamp` looks like `"2024010100"`; the first eight
/// characters are the date.
#[derive(Debug, Clone, Deserialize)]
pub struct PageviewItem {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub views: Option<u64>,
}

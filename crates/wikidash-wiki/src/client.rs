//! HTTP client for the Wikipedia action API and the Wikimedia pageviews API.
//!
//! Wraps `reqwest` with per-endpoint URL building and typed response
//! deserialization. Each `fetch_*` method maps to one slot of the aggregated
//! article and fails independently with a [`FetchError`]; deciding which of
//! those failures are fatal is left to `WikiClient::fetch_wiki_data`.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use wikidash_core::{AppConfig, DEFAULT_API_BASE_URL, DEFAULT_PAGEVIEWS_BASE_URL};

use crate::error::{FetchError, WikiError};
use crate::pageviews::PageviewWindow;
use crate::types::{
    BacklinksPage, CorePage, LangLinksPage, LinksPage, PageviewsResponse, PagesResponse,
    RevisionsPage, SearchResponse,
};

/// Page size of the revision lookup; no continuation is followed.
pub const REVISION_LIMIT: u32 = 100;

/// Thumbnail width requested alongside the page info.
const THUMBNAIL_SIZE: u32 = 300;

/// Client for the two upstream services.
///
/// Use [`WikiClient::new`] for production or [`WikiClient::with_base_urls`]
/// to point at a mock server in tests.
pub struct WikiClient {
    client: Client,
    api_base: Url,
    pageviews_base: Url,
}

impl WikiClient {
    /// Creates a client pointed at the production English Wikipedia endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::Client`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, WikiError> {
        Self::with_base_urls(
            DEFAULT_API_BASE_URL,
            DEFAULT_PAGEVIEWS_BASE_URL,
            timeout_secs,
            user_agent,
        )
    }

    /// Creates a client from the shared application configuration.
    ///
    /// # Errors
    ///
    /// See [`WikiClient::with_base_urls`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, WikiError> {
        Self::with_base_urls(
            &config.api_base_url,
            &config.pageviews_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with custom base URLs (for testing with wiremock).
    ///
    /// `api_base` is the full `api.php` URL; `pageviews_base` is the
    /// per-article prefix that the encoded title and date range are appended to.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::Client`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`WikiError::InvalidBaseUrl`] if either URL
    /// does not parse or cannot carry path segments.
    pub fn with_base_urls(
        api_base: &str,
        pageviews_base: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, WikiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let api_base = parse_base_url(api_base)?;
        let pageviews_base = parse_base_url(pageviews_base.trim_end_matches('/'))?;

        Ok(Self {
            client,
            api_base,
            pageviews_base,
        })
    }

    /// Runs a full-text search and returns the title of the single best match.
    ///
    /// # Errors
    ///
    /// Any [`FetchError`]; zero matches is `Ok(None)`, not an error.
    pub async fn search_title(&self, query: &str) -> Result<Option<String>, FetchError> {
        let url = self.query_url(&[("list", "search"), ("srsearch", query), ("srlimit", "1")]);
        let response: SearchResponse = self.request_json(&url, "search").await?;
        Ok(response.query.search.into_iter().next().map(|hit| hit.title))
    }

    /// Page id, byte length, plain-text extract, thumbnail and last-touched time.
    ///
    /// # Errors
    ///
    /// Any [`FetchError`].
    pub async fn fetch_core_info(
        &self,
        title: &str,
    ) -> Result<PagesResponse<CorePage>, FetchError> {
        let thumb = THUMBNAIL_SIZE.to_string();
        let url = self.query_url(&[
            ("prop", "info|extracts|pageimages"),
            ("inprop", "url|protection"),
            ("explaintext", ""),
            ("pithumbsize", &thumb),
            ("titles", title),
        ]);
        self.request_json(&url, "core info").await
    }

    /// Outbound links, as many as the endpoint returns in one response.
    ///
    /// # Errors
    ///
    /// Any [`FetchError`].
    pub async fn fetch_links(&self, title: &str) -> Result<PagesResponse<LinksPage>, FetchError> {
        let url = self.query_url(&[("prop", "links"), ("pllimit", "max"), ("titles", title)]);
        self.request_json(&url, "links").await
    }

    /// Pages that link here, one response only.
    ///
    /// # Errors
    ///
    /// Any [`FetchError`].
    pub async fn fetch_backlinks(
        &self,
        title: &str,
    ) -> Result<PagesResponse<BacklinksPage>, FetchError> {
        let url = self.query_url(&[("prop", "linkshere"), ("lhlimit", "max"), ("titles", title)]);
        self.request_json(&url, "backlinks").await
    }

    /// Oldest-first revision history, capped at [`REVISION_LIMIT`].
    ///
    /// # Errors
    ///
    /// Any [`FetchError`].
    pub async fn fetch_revisions(
        &self,
        title: &str,
    ) -> Result<PagesResponse<RevisionsPage>, FetchError> {
        let limit = REVISION_LIMIT.to_string();
        let url = self.query_url(&[
            ("prop", "revisions"),
            ("rvprop", "timestamp|user|ids"),
            ("rvlimit", &limit),
            ("rvdir", "newer"),
            ("titles", title),
        ]);
        self.request_json(&url, "revisions").await
    }

    /// Interlanguage links.
    ///
    /// # Errors
    ///
    /// Any [`FetchError`].
    pub async fn fetch_langlinks(
        &self,
        title: &str,
    ) -> Result<PagesResponse<LangLinksPage>, FetchError> {
        let url = self.query_url(&[("prop", "langlinks"), ("lllimit", "max"), ("titles", title)]);
        self.request_json(&url, "langlinks").await
    }

    /// Daily user pageviews over `window` (inclusive on both ends).
    ///
    /// # Errors
    ///
    /// Any [`FetchError`]. The service answers 404 for titles without data.
    pub async fn fetch_pageviews(
        &self,
        title: &str,
        window: PageviewWindow,
    ) -> Result<PageviewsResponse, FetchError> {
        let url = self.pageviews_url(title, window);
        self.request_json(&url, "pageviews").await
    }

    /// Builds an action-API URL with `origin=*&format=json&action=query`
    /// followed by `extra`, all percent-encoded.
    pub(crate) fn query_url(&self, extra: &[(&str, &str)]) -> Url {
        let mut url = self.api_base.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("origin", "*");
            pairs.append_pair("format", "json");
            pairs.append_pair("action", "query");
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Builds `<pageviews base>/<title>/daily/<start>/<end>`, encoding the
    /// title as a single path segment (so `AC/DC` stays one segment).
    pub(crate) fn pageviews_url(&self, title: &str, window: PageviewWindow) -> Url {
        let mut url = self.pageviews_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(title)
                .push("daily")
                .push(&window.start_code())
                .push(&window.end_code());
        }
        url
    }

    /// Sends a GET request, requires a 2xx status, rejects action-API error
    /// envelopes, and deserializes the body into `T`.
    async fn request_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, FetchError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| FetchError::Deserialize {
                context: context.to_string(),
                source: e,
            })?;
        Self::check_api_error(&value)?;

        serde_json::from_value(value).map_err(|e| FetchError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }

    /// The action API reports bad parameters as `200 OK` with an `"error"`
    /// object instead of the payload.
    fn check_api_error(body: &serde_json::Value) -> Result<(), FetchError> {
        if let Some(error) = body.get("error") {
            let field = |name: &str| {
                error
                    .get(name)
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("unknown")
                    .to_string()
            };
            return Err(FetchError::Api {
                code: field("code"),
                info: field("info"),
            });
        }
        Ok(())
    }
}

fn parse_base_url(raw: &str) -> Result<Url, WikiError> {
    let url = Url::parse(raw).map_err(|e| WikiError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(WikiError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "URL cannot carry path segments".to_string(),
        });
    }
    Ok(url)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

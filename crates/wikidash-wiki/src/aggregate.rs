//! Title resolution and the six-way concurrent fetch behind
//! [`WikiClient::fetch_wiki_data`].

use chrono::{NaiveDate, Utc};

use crate::client::WikiClient;
use crate::error::{FetchError, WikiError};
use crate::normalize::{normalize_article, ArticleSlots, NormalizedArticle};
use crate::pageviews::PageviewWindow;
use crate::types::{CorePage, PagesResponse};

impl WikiClient {
    /// Maps free-text input to the canonical title of the best search match.
    ///
    /// # Errors
    ///
    /// [`WikiError::SearchFailed`] if the search request fails, or
    /// [`WikiError::PageNotFound`] if it matches nothing (a blank query never
    /// reaches the network).
    pub async fn resolve_title(&self, query: &str) -> Result<String, WikiError> {
        if query.trim().is_empty() {
            return Err(WikiError::PageNotFound {
                query: query.to_string(),
            });
        }

        let hit = self
            .search_title(query)
            .await
            .map_err(|source| WikiError::SearchFailed { source })?;

        hit.ok_or_else(|| WikiError::PageNotFound {
            query: query.to_string(),
        })
    }

    /// Resolves `query` and aggregates everything known about the article,
    /// using today's UTC date for the pageview window.
    ///
    /// # Errors
    ///
    /// See [`WikiClient::fetch_wiki_data_as_of`].
    pub async fn fetch_wiki_data(&self, query: &str) -> Result<NormalizedArticle, WikiError> {
        self.fetch_wiki_data_as_of(query, Utc::now().date_naive())
            .await
    }

    /// Resolves `query`, then fetches core info, links, backlinks, revisions,
    /// language links and pageviews concurrently and merges them.
    ///
    /// Only resolution and the core-info slot are fatal. Any other slot that
    /// fails is logged and treated as empty.
    ///
    /// # Errors
    ///
    /// Resolution errors from [`WikiClient::resolve_title`], or
    /// [`WikiError::PageDataNotFound`] when the core-info request fails or
    /// yields no usable page.
    pub async fn fetch_wiki_data_as_of(
        &self,
        query: &str,
        today: NaiveDate,
    ) -> Result<NormalizedArticle, WikiError> {
        let title = self.resolve_title(query).await?;
        let window = PageviewWindow::ending_before(today);

        let (core, links, backlinks, revisions, langlinks, pageviews) = tokio::join!(
            self.fetch_core_info(&title),
            self.fetch_links(&title),
            self.fetch_backlinks(&title),
            self.fetch_revisions(&title),
            self.fetch_langlinks(&title),
            self.fetch_pageviews(&title, window),
        );

        let core = core.map_err(|source| WikiError::PageDataNotFound {
            title: title.clone(),
            source: Some(source),
        })?;
        let Some((page_id, page)) = usable_page(core) else {
            return Err(WikiError::PageDataNotFound {
                title,
                source: None,
            });
        };

        let slots = ArticleSlots {
            links: settle("links", &title, links)
                .and_then(|r| r.into_page(page_id))
                .map(|p| p.links)
                .unwrap_or_default(),
            backlinks: settle("backlinks", &title, backlinks)
                .and_then(|r| r.into_page(page_id))
                .map(|p| p.linkshere)
                .unwrap_or_default(),
            revisions: settle("revisions", &title, revisions)
                .and_then(|r| r.into_page(page_id))
                .map(|p| p.revisions)
                .unwrap_or_default(),
            langlinks: settle("langlinks", &title, langlinks)
                .and_then(|r| r.into_page(page_id))
                .map(|p| p.langlinks)
                .unwrap_or_default(),
            pageviews: settle("pageviews", &title, pageviews)
                .map(|r| r.items)
                .unwrap_or_default(),
        };

        tracing::debug!(
            title = %title,
            page_id,
            links = slots.links.len(),
            revisions = slots.revisions.len(),
            "aggregated article"
        );

        Ok(normalize_article(&title, page_id, page, slots))
    }
}

/// Logs a failed non-core slot and degrades it to `None`.
fn settle<T>(slot: &'static str, title: &str, result: Result<T, FetchError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(
                slot,
                title = %title,
                transient = e.is_transient(),
                error = %e,
                "slot fetch failed; treating as empty"
            );
            None
        }
    }
}

/// The single page of a core-info response, unless it is absent, flagged
/// missing/invalid, or has no id.
fn usable_page(response: PagesResponse<CorePage>) -> Option<(i64, CorePage)> {
    let page = response.into_first_page()?;
    if page.missing.is_some() || page.invalid.is_some() {
        return None;
    }
    let page_id = page.pageid?;
    Some((page_id, page))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core_response(body: serde_json::Value) -> PagesResponse<CorePage> {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn usable_page_returns_id_and_page() {
        let response = core_response(serde_json::json!({
            "query": { "pages": { "736": { "pageid": 736, "title": "Albert Einstein" } } }
        }));
        let (id, page) = usable_page(response).unwrap();
        assert_eq!(id, 736);
        assert_eq!(page.title.as_deref(), Some("Albert Einstein"));
    }

    #[test]
    fn missing_or_invalid_pages_are_unusable() {
        let missing = core_response(serde_json::json!({
            "query": { "pages": { "-1": { "title": "Nope", "missing": "" } } }
        }));
        assert!(usable_page(missing).is_none());

        let invalid = core_response(serde_json::json!({
            "query": { "pages": { "-1": { "title": "<", "invalid": "" } } }
        }));
        assert!(usable_page(invalid).is_none());
    }

    #[test]
    fn response_without_pages_or_id_is_unusable() {
        assert!(usable_page(core_response(serde_json::json!({ "batchcomplete": "" }))).is_none());
        let no_id = core_response(serde_json::json!({
            "query": { "pages": { "1": { "title": "x" } } }
        }));
        assert!(usable_page(no_id).is_none());
    }

    #[test]
    fn settle_degrades_errors_to_none() {
        let err: Result<u8, FetchError> = Err(FetchError::UnexpectedStatus {
            status: 500,
            url: "https://example.org".to_string(),
        });
        assert_eq!(settle("links", "x", err), None);
        assert_eq!(settle("links", "x", Ok::<u8, FetchError>(3)), Some(3));
    }
}

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use wikidash_wiki::{
    chart_points, render_summary, DisplayBlock, ErrorKind, NormalizedArticle, PageviewPoint,
    WikiError,
};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

pub(super) const NOT_FOUND_MESSAGE: &str =
    "This Wikipedia page doesn't exist. Try something else, e.g. Virat Kohli";

#[derive(Debug, Deserialize)]
pub(super) struct ArticleQuery {
    pub title: Option<String>,
}

/// The article record plus its presentation-ready summary and chart series.
#[derive(Debug, Serialize)]
pub(super) struct ArticleView {
    article: NormalizedArticle,
    summary: Vec<DisplayBlock>,
    pageviews: Vec<PageviewPoint>,
}

impl ArticleView {
    fn new(article: NormalizedArticle) -> Self {
        let summary = render_summary(&article.raw_summary);
        let pageviews = chart_points(&article.daily_views);
        Self {
            article,
            summary,
            pageviews,
        }
    }
}

pub(super) async fn get_article(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ArticleQuery>,
) -> Result<Json<ApiResponse<ArticleView>>, ApiError> {
    let title = query.title.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "query parameter 'title' is required",
        ));
    }

    let article = state
        .client
        .fetch_wiki_data(title)
        .await
        .map_err(|e| map_wiki_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: ArticleView::new(article),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Chooses the error code from the error's kind, never from its text.
pub(super) fn map_wiki_error(request_id: String, error: &WikiError) -> ApiError {
    match error.kind() {
        ErrorKind::NotFound => {
            tracing::info!(error = %error, "article not found");
            ApiError::new(request_id, "not_found", NOT_FOUND_MESSAGE)
        }
        ErrorKind::Transient => {
            tracing::warn!(error = %error, "upstream unavailable");
            ApiError::new(request_id, "upstream_unavailable", error.to_string())
        }
        ErrorKind::Upstream => {
            tracing::error!(error = %error, "upstream request failed");
            ApiError::new(request_id, "upstream_error", error.to_string())
        }
    }
}

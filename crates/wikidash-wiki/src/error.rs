use serde::Serialize;
use thiserror::Error;

/// Coarse classification of a fatal error, used by presentation layers to
/// pick a status code and message without inspecting error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The article does not exist (no search match, or upstream reports it missing).
    NotFound,
    /// Network failure, timeout, or a 5xx/429 from upstream.
    Transient,
    /// Upstream answered, but with something unusable.
    Upstream,
}

/// Failure of a single upstream request.
///
/// For the non-core slots these are absorbed and logged; only title
/// resolution and the core-info lookup turn them into a [`WikiError`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The action API answered 200 with an `"error"` object.
    #[error("MediaWiki API error {code}: {info}")]
    Api { code: String, info: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Returns `true` for failures caused by the transport or an overloaded
    /// upstream rather than by the content of the response.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request() || e.is_body(),
            FetchError::UnexpectedStatus { status, .. } => *status >= 500 || *status == 429,
            FetchError::Api { .. } | FetchError::Deserialize { .. } => false,
        }
    }
}

/// Errors that abort [`crate::WikiClient::fetch_wiki_data`].
#[derive(Debug, Error)]
pub enum WikiError {
    /// The `reqwest::Client` could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Title resolution: the search request itself failed.
    #[error("search request failed: {source}")]
    SearchFailed {
        #[source]
        source: FetchError,
    },

    /// Title resolution: the search returned zero matches.
    #[error("page \"{query}\" not found via search")]
    PageNotFound { query: String },

    /// Aggregation: the core-info lookup yielded no usable page object.
    #[error("page data not found for \"{title}\"")]
    PageDataNotFound {
        title: String,
        #[source]
        source: Option<FetchError>,
    },
}

impl WikiError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            WikiError::PageNotFound { .. } | WikiError::PageDataNotFound { source: None, .. } => {
                ErrorKind::NotFound
            }
            WikiError::SearchFailed { source }
            | WikiError::PageDataNotFound {
                source: Some(source),
                ..
            } => {
                if source.is_transient() {
                    ErrorKind::Transient
                } else {
                    ErrorKind::Upstream
                }
            }
            WikiError::Client(_) | WikiError::InvalidBaseUrl { .. } => ErrorKind::Upstream,
        }
    }

    /// True for failures of the title-resolution step.
    #[must_use]
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            WikiError::SearchFailed { .. } | WikiError::PageNotFound { .. }
        )
    }

    /// True for failures of the core-info step after a successful resolution.
    #[must_use]
    pub fn is_aggregation(&self) -> bool {
        matches!(self, WikiError::PageDataNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deserialize_err() -> FetchError {
        let src = serde_json::from_str::<()>("invalid").unwrap_err();
        FetchError::Deserialize {
            context: "test".to_owned(),
            source: src,
        }
    }

    #[test]
    fn server_errors_and_throttling_are_transient() {
        let err = FetchError::UnexpectedStatus {
            status: 503,
            url: "https://example.org".to_owned(),
        };
        assert!(err.is_transient());
        let err = FetchError::UnexpectedStatus {
            status: 429,
            url: "https://example.org".to_owned(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn client_errors_and_bad_bodies_are_not_transient() {
        let err = FetchError::UnexpectedStatus {
            status: 404,
            url: "https://example.org".to_owned(),
        };
        assert!(!err.is_transient());
        assert!(!deserialize_err().is_transient());
        assert!(!FetchError::Api {
            code: "badvalue".to_owned(),
            info: "nope".to_owned()
        }
        .is_transient());
    }

    #[test]
    fn page_not_found_is_a_not_found_resolution_error() {
        let err = WikiError::PageNotFound {
            query: "Qwzxv".to_owned(),
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.is_resolution());
        assert!(!err.is_aggregation());
    }

    #[test]
    fn search_failure_kind_follows_the_fetch_error() {
        let err = WikiError::SearchFailed {
            source: FetchError::UnexpectedStatus {
                status: 502,
                url: "https://example.org".to_owned(),
            },
        };
        assert_eq!(err.kind(), ErrorKind::Transient);
        assert!(err.is_resolution());

        let err = WikiError::SearchFailed {
            source: deserialize_err(),
        };
        assert_eq!(err.kind(), ErrorKind::Upstream);
    }

    #[test]
    fn missing_page_data_is_an_aggregation_error() {
        let err = WikiError::PageDataNotFound {
            title: "Albert Einstein".to_owned(),
            source: None,
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.is_aggregation());
        assert!(!err.is_resolution());
        assert_eq!(err.to_string(), "page data not found for \"Albert Einstein\"");
    }

    #[test]
    fn error_kind_serializes_as_snake_case() {
        let json = serde_json::to_string(&ErrorKind::NotFound).unwrap();
        assert_eq!(json, "\"not_found\"");
    }
}

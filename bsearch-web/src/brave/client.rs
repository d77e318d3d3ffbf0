use super::types::WebSearchApiResponse;
use bsearch_http::{HeaderAuth, HttpClient, HttpError, RequestOpts};
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use std::time::Instant;

pub const WEB_SEARCH_PATH: &str = "res/v1/web/search";
const TOKEN_HEADER: &str = "x-subscription-token";
const LOG_QUERY_CHARS: usize = 160;

/// Minimal client for Brave Search API (web vertical).
#[derive(Clone, Debug)]
pub struct BraveApi {
    http: HttpClient,
    token: String,
}

impl BraveApi {
    /// `api_base` is the scheme and host, e.g. `https://api.search.brave.com`.
    pub fn new(api_base: &str, subscription_token: impl Into<String>) -> Result<Self, HttpError> {
        let http = HttpClient::new(api_base)?;
        Ok(Self {
            http,
            token: subscription_token.into(),
        })
    }

    /// One `GET res/v1/web/search?q=<query>`.
    ///
    /// `query` is the raw text; the HTTP layer percent-encodes it once.
    pub async fn web_search(&self, query: &str) -> Result<WebSearchApiResponse, HttpError> {
        let auth = HeaderAuth::new(HeaderName::from_static(TOKEN_HEADER), &self.token)?;
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let query_snippet = snippet(query);
        let started = Instant::now();
        tracing::info!(
            target: "web.brave",
            query = %query_snippet,
            "brave.web_search.start"
        );

        let result = self
            .http
            .get_json::<WebSearchApiResponse>(
                WEB_SEARCH_PATH,
                RequestOpts {
                    auth: Some(auth),
                    headers: Some(headers),
                    query: Some(vec![("q", query.into())]),
                },
            )
            .await;

        match &result {
            Ok(resp) => {
                tracing::info!(
                    target: "web.brave",
                    query = %query_snippet,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    web_results = resp.web_result_count(),
                    "brave.web_search.success"
                );
                tracing::debug!(?resp, "full web search response");
            }
            Err(e) => {
                tracing::warn!(
                    target: "web.brave",
                    query = %query_snippet,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %e,
                    "brave.web_search.error"
                );
            }
        }
        result
    }
}

fn snippet(query: &str) -> String {
    if query.chars().count() > LOG_QUERY_CHARS {
        let mut s: String = query.chars().take(LOG_QUERY_CHARS).collect();
        s.push('…');
        s
    } else {
        query.to_string()
    }
}

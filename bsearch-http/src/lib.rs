//! Minimal JSON-over-HTTP client with safe logging and header auth.
//!
//! - One request per call: no timeout, no retries, default redirect policy
//! - Redacts sensitive query params and never logs secret header values
//! - Decodes the body whatever the status; non-success is logged, not raised
//! - Optional *raw* request/response logging via `BSEARCH_HTTP_RAW=1`
//!
//! Example (no_run):
//! ```no_run
//! # async fn demo() -> Result<(), bsearch_http::HttpError> {
//! let client = bsearch_http::HttpClient::new("https://api.example.com")?;
//! let got: serde_json::Value = client
//!     .get_json("v1/items", bsearch_http::RequestOpts::default())
//!     .await?;
//! # Ok(()) }
//! ```
//!
//! Errors keep the failure stage apart ([`HttpError::Url`] and
//! [`HttpError::Build`] before anything is sent, [`HttpError::Network`] on
//! send, [`HttpError::Body`] while draining, [`HttpError::Decode`] after) so
//! callers can map each one to their own exit semantics.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::env;
use thiserror::Error;

// ==============================
// Raw logging toggles
// ==============================

const RAW_ENV: &str = "BSEARCH_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024; // cap raw body logs (64 KiB)

const SECRET_HEADERS: &[&str] = &["authorization", "x-subscription-token"];
const SECRET_PARAMS: &[&str] = &[
    "access_token",
    "authorization",
    "auth",
    "key",
    "api_key",
    "token",
    "secret",
    "client_secret",
    "bearer",
];

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

fn is_secret_header(name: &str) -> bool {
    SECRET_HEADERS.iter().any(|s| name.eq_ignore_ascii_case(s))
}

fn is_secret_param(name: &str) -> bool {
    SECRET_PARAMS.iter().any(|s| name.eq_ignore_ascii_case(s))
}

/// Render a best-effort curl command for repro/debug, with secrets redacted.
fn make_curl(method: &Method, url: &Url, headers: &HeaderMap) -> String {
    let mut parts = vec!["curl".to_string(), format!("-X{}", method)];
    for (name, val) in redact_headers(headers) {
        parts.push(format!("-H '{}: {}'", name, val.replace('\'', r"'\''")));
    }
    parts.push(format!("'{}'", url.as_str()));
    parts.join(" ")
}

/// Redact sensitive headers for logging
fn redact_headers(h: &HeaderMap) -> Vec<(String, String)> {
    h.iter()
        .map(|(k, v)| {
            let key = k.as_str().to_string();
            let val = if is_secret_header(&key) {
                "<redacted>".to_string()
            } else {
                v.to_str().unwrap_or("").to_string()
            };
            (key, val)
        })
        .collect()
}

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("response body read failed: {0}")]
    Body(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
}

// ==============================
// Auth & Request Options
// ==============================

/// A credential carried in a request header (e.g. Brave's
/// `X-Subscription-Token`). The value is sent as-is and never logged.
#[derive(Clone, Debug)]
pub struct HeaderAuth {
    pub name: HeaderName,
    pub value: HeaderValue,
}

impl HeaderAuth {
    /// Validate `value` as a header value without transforming it.
    ///
    /// ```
    /// use bsearch_http::HeaderAuth;
    /// use reqwest::header::HeaderName;
    ///
    /// let name = HeaderName::from_static("x-subscription-token");
    /// assert!(HeaderAuth::new(name.clone(), "abc123").is_ok());
    /// assert!(HeaderAuth::new(name, "bad\nvalue").is_err());
    /// ```
    pub fn new(name: HeaderName, value: &str) -> Result<Self, HttpError> {
        let mut value = HeaderValue::from_str(value).map_err(|e| {
            HttpError::Build(format!("invalid {} header: {e}", name.as_str()))
        })?;
        value.set_sensitive(true);
        Ok(Self { name, value })
    }
}

/// Per-request options.
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub auth: Option<HeaderAuth>,
    pub headers: Option<HeaderMap>,
    pub query: Option<Vec<(&'a str, Cow<'a, str>)>>, // e.g. [("q", "term".into())]
}

// ==============================
// Client
// ==============================

#[derive(Clone, Debug)]
pub struct HttpClient {
    base: Url,
    inner: Client,
}

impl HttpClient {
    /// Construct a client anchored to a base URL.
    ///
    /// ```
    /// use bsearch_http::{HttpClient, HttpError};
    ///
    /// assert!(HttpClient::new("https://api.example.com").is_ok());
    /// assert!(matches!(HttpClient::new("not a url"), Err(HttpError::Url(_))));
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        let inner = Client::builder()
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self { base, inner })
    }

    /// GET `path` (relative to the base) and decode the body as JSON.
    pub async fn get_json<T>(&self, path: &str, opts: RequestOpts<'_>) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let url = self
            .base
            .join(path)
            .map_err(|e| HttpError::Url(e.to_string()))?;
        let method = Method::GET;

        // ----- Build request -----
        let mut rb = self.inner.request(method.clone(), url.clone());

        if let Some(q) = &opts.query {
            let pairs: Vec<(&str, &str)> = q.iter().map(|(k, v)| (*k, v.as_ref())).collect();
            rb = rb.query(&pairs);
        }

        let mut sent_headers = opts.headers.clone().unwrap_or_default();
        if let Some(auth) = &opts.auth {
            sent_headers.insert(auth.name.clone(), auth.value.clone());
        }
        rb = rb.headers(sent_headers.clone());

        let request = rb.build().map_err(|e| HttpError::Build(e.to_string()))?;

        // ----- Safe request logging (pre-send) -----
        let redacted_q: Vec<(String, String)> = opts
            .query
            .as_ref()
            .map(|q| {
                q.iter()
                    .map(|(k, v)| {
                        let shown = if is_secret_param(k) {
                            "<redacted>".to_string()
                        } else {
                            v.as_ref().to_string()
                        };
                        ((*k).to_string(), shown)
                    })
                    .collect()
            })
            .unwrap_or_default();

        // Lightweight request id without extra deps
        let req_id = format!(
            "r{:x}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        );

        let auth_kind = if opts.auth.is_some() { "header" } else { "none" };

        tracing::debug!(
            req_id=%req_id,
            method=%method,
            host_path=%format!("{}{}", url.host_str().unwrap_or("-"), url.path()),
            query=?redacted_q,
            auth_kind,
            "http.request.start"
        );

        if raw_enabled() {
            let curl = make_curl(&method, request.url(), &sent_headers);
            tracing::debug!(target: "http.raw", %req_id, %curl, "request");
        }

        // ----- Send -----
        let t0 = std::time::Instant::now();
        let resp = self.inner.execute(request).await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(req_id=%req_id, message=%message, "http.network_error.send");
            HttpError::Network(message)
        })?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = resp.bytes().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(req_id=%req_id, message=%message, "http.network_error.body");
            HttpError::Body(message)
        })?;
        let dur_ms = t0.elapsed().as_millis() as u64;

        let req_hdr_id = headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::debug!(
            req_id=%req_id,
            %status,
            duration_ms=dur_ms,
            body_len=bytes.len(),
            x_request_id=%req_hdr_id,
            "http.response.headers"
        );

        if raw_enabled() {
            let hdrs = redact_headers(&headers);
            let mut body_snip = bytes.to_vec();
            let truncated = body_snip.len() > RAW_MAX_BODY;
            if truncated {
                body_snip.truncate(RAW_MAX_BODY);
            }
            let text = String::from_utf8_lossy(&body_snip);
            tracing::info!(
                target:"http.raw",
                %req_id,
                status=%status,
                duration_ms=dur_ms,
                headers=?hdrs,
                body=%text,
                truncated
            );
        }

        let snippet = snip_body(&bytes);
        tracing::trace!(
            req_id=%req_id,
            body_snippet=%snippet,
            "http.response.body_snippet"
        );

        if !status.is_success() {
            tracing::warn!(
                req_id=%req_id,
                %status,
                message=%extract_error_message(&bytes),
                x_request_id=%req_hdr_id,
                "http.response.non_success"
            );
        }

        serde_json::from_slice::<T>(&bytes).map_err(|e| {
            tracing::warn!(
                req_id=%req_id,
                serde_line=%e.line(),
                serde_col=%e.column(),
                serde_err=%e.to_string(),
                body_snippet=%snippet,
                "http.response.decode_error"
            );
            HttpError::Decode(e.to_string(), snippet)
        })
    }
}

// ==============================
// Helpers
// ==============================

fn extract_error_message(body: &[u8]) -> String {
    // Brave: {"type":"ErrorResponse","error":{"detail":"...","code":"...","status":401}}
    #[derive(Deserialize)]
    struct Envelope {
        error: Detail,
    }
    #[derive(Deserialize)]
    struct Detail {
        #[serde(default)]
        detail: String,
        #[serde(default)]
        message: String,
        #[serde(default)]
        code: String,
    }

    // Generic: {"message":"..."} or {"detail":"..."}
    #[derive(Deserialize)]
    struct Msg {
        #[serde(default)]
        message: String,
        #[serde(default)]
        detail: String,
    }

    if let Ok(env) = serde_json::from_slice::<Envelope>(body) {
        let e = env.error;
        for candidate in [e.detail, e.message, e.code] {
            if !candidate.is_empty() {
                return candidate;
            }
        }
    }
    if let Ok(m) = serde_json::from_slice::<Msg>(body) {
        if !m.message.is_empty() {
            return m.message;
        }
        if !m.detail.is_empty() {
            return m.detail;
        }
    }
    snip_body(body)
}

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > 500 {
        let mut cut = 500;
        while !snip.is_char_boundary(cut) {
            cut -= 1;
        }
        snip.truncate(cut);
        snip.push_str("...");
    }
    snip
}

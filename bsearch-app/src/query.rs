//! One search round trip: validate inputs, echo the encoded query, call
//! Brave, print the number of web results.

use bsearch_config::Settings;
use bsearch_http::HttpError;
use bsearch_web::brave::BraveApi;
use std::io::{self, Write};
use thiserror::Error;
use url::form_urlencoded;

pub const USAGE: &str = "Usage: b query string...";

const EXIT_FAILURE: u8 = 1;
const EXIT_REQUEST_CONSTRUCTION: u8 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No query terms; usage was printed and nothing was sent.
    Usage,
    /// Number of `web.results` in the response.
    Count(usize),
}

/// Every way a single invocation can fail. Each one is terminal.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("BRAVE_TOKEN environment variable not set")]
    Configuration,
    #[error("Error creating request: {0}")]
    RequestConstruction(String),
    #[error("An error during request")]
    Transport(String),
    #[error("An error during response read")]
    Io(String),
    #[error("{0}")]
    Decode(String),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl QueryError {
    pub fn exit_code(&self) -> u8 {
        match self {
            QueryError::RequestConstruction(_) => EXIT_REQUEST_CONSTRUCTION,
            _ => EXIT_FAILURE,
        }
    }

    /// Underlying cause for logs; the display text of these stays generic.
    pub fn detail(&self) -> Option<&str> {
        match self {
            QueryError::Transport(d) | QueryError::Io(d) => Some(d),
            _ => None,
        }
    }
}

impl From<HttpError> for QueryError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Url(_) | HttpError::Build(_) => {
                QueryError::RequestConstruction(err.to_string())
            }
            HttpError::Network(msg) => QueryError::Transport(msg),
            HttpError::Body(msg) => QueryError::Io(msg),
            HttpError::Decode(msg, _) => QueryError::Decode(msg),
        }
    }
}

/// `application/x-www-form-urlencoded` form of `raw`, the same encoding the
/// HTTP layer applies to the `q` parameter.
pub fn encode_query(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

pub async fn run<W: Write>(
    terms: &[String],
    settings: &Settings,
    out: &mut W,
) -> Result<Outcome, QueryError> {
    if settings.token.is_empty() {
        return Err(QueryError::Configuration);
    }

    if terms.is_empty() {
        writeln!(out, "{USAGE}")?;
        return Ok(Outcome::Usage);
    }

    let raw = terms.join(" ");
    write!(out, "Args at once: {}", encode_query(&raw))?;
    out.flush()?;

    let api = BraveApi::new(&settings.api_base, settings.token.as_str())?;
    let resp = api.web_search(&raw).await?;

    let count = resp.web_result_count();
    writeln!(out)?;
    writeln!(out, "{count}")?;
    Ok(Outcome::Count(count))
}

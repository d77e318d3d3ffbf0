//! Brave Search API access.
//!
//! - Response schema for the web search endpoint (`brave::types`)
//! - A single-request client over `bsearch-http` (`brave::client`)

pub mod brave;

pub mod client;
pub mod types;

pub use client::{BraveApi, WEB_SEARCH_PATH};
pub use types::WebSearchApiResponse;

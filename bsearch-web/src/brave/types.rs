use serde::{Deserialize, Deserializer, Serialize};

/// Brave sends `null` for some empty collections; treat it like a missing key.
fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

/// Top-level body of `GET /res/v1/web/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSearchApiResponse {
    /// Always "search"
    #[serde(rename = "type")]
    pub r#type: String,

    #[serde(default)]
    pub mixed: Option<MixedResponse>,

    #[serde(default)]
    pub query: Option<Query>,

    #[serde(default)]
    pub videos: Option<Videos>,

    #[serde(default)]
    pub web: Option<Search>, // "Search" vertical (web results)
}

impl WebSearchApiResponse {
    /// Number of organic web results; `0` when the `web` section is absent.
    pub fn web_result_count(&self) -> usize {
        self.web.as_ref().map_or(0, |w| w.results.len())
    }
}

/// Display-order hints across verticals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixedResponse {
    /// Always "mixed"
    #[serde(rename = "type", default)]
    pub r#type: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub main: Vec<MixedEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub top: Vec<MixedEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub side: Vec<MixedEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixedEntry {
    #[serde(rename = "type")]
    pub kind: MixedKind,

    #[serde(default)]
    pub index: Option<usize>, // present when referencing a single item
    #[serde(default)]
    pub all: Option<bool>, // true => include entire vertical
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MixedKind {
    Web,
    News,
    Videos,
    Faq,
    Discussions,
    Infobox,
    Locations,
    #[serde(other)]
    Unknown,
}

/// How Brave interpreted the query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    #[serde(default, deserialize_with = "null_as_default")]
    pub original: String,

    #[serde(default)]
    pub altered: Option<String>,
    #[serde(default)]
    pub show_strict_warning: Option<bool>,
    #[serde(default)]
    pub is_navigational: Option<bool>,
    #[serde(default)]
    pub is_news_breaking: Option<bool>,
    #[serde(default)]
    pub spellcheck_off: Option<bool>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub bad_results: Option<bool>,
    #[serde(default)]
    pub should_fallback: Option<bool>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub header_country: Option<String>,
    #[serde(default)]
    pub more_results_available: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Videos {
    /// Always "videos"
    #[serde(rename = "type")]
    pub r#type: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<VideoResult>,

    #[serde(default)]
    pub mutated_by_goggles: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResult {
    #[serde(rename = "type")]
    pub r#type: String, // "video_result"

    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, alias = "video_data")]
    pub video: Option<VideoData>,

    #[serde(default)]
    pub meta_url: Option<MetaUrl>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    #[serde(default)]
    pub age: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoData {
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub views: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub author: Option<Profile>,
    #[serde(default)]
    pub requires_subscription: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaUrl {
    #[serde(default)]
    pub scheme: Option<String>,
    #[serde(default)]
    pub netloc: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub favicon: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Search {
    /// Always "search"
    #[serde(rename = "type")]
    pub r#type: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub family_friendly: Option<bool>,
}

/// Fields shared by every result kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub is_source_local: Option<bool>,
    #[serde(default)]
    pub is_source_both: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub page_age: Option<String>,
    #[serde(default)]
    pub page_fetched: Option<String>,
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub family_friendly: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub item: ResultItem,

    /// Always "search_result"
    #[serde(rename = "type")]
    pub r#type: String,

    #[serde(default)]
    pub subtype: Option<String>, // "generic" etc.
    #[serde(default)]
    pub is_live: Option<bool>,

    #[serde(default)]
    pub meta_url: Option<MetaUrl>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    #[serde(default)]
    pub age: Option<String>,
}

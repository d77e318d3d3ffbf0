use bsearch_web::brave::WebSearchApiResponse;
use bsearch_web::brave::types::MixedKind;
use serde_json::Value;

const WEB_TEXT: &str = include_str!("fixtures/web_text.json");
const VIDEOS_ONLY: &str = include_str!("fixtures/videos_only.json");
const MIXED: &str = include_str!("fixtures/mixed.json");

fn decode(raw: &str) -> WebSearchApiResponse {
    serde_json::from_str(raw).expect("fixture decodes")
}

/// Length of `web.results` straight from the untyped JSON.
fn raw_web_len(raw: &str) -> usize {
    let v: Value = serde_json::from_str(raw).unwrap();
    v.pointer("/web/results")
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

#[test]
fn web_result_count_matches_input_for_every_shape() {
    for raw in [WEB_TEXT, VIDEOS_ONLY, MIXED] {
        assert_eq!(decode(raw).web_result_count(), raw_web_len(raw));
    }
    assert_eq!(decode(WEB_TEXT).web_result_count(), 3);
    assert_eq!(decode(VIDEOS_ONLY).web_result_count(), 0);
    assert_eq!(decode(MIXED).web_result_count(), 2);
}

#[test]
fn reencoding_reproduces_the_decoded_value() {
    for raw in [WEB_TEXT, VIDEOS_ONLY, MIXED] {
        let first = decode(raw);
        let encoded = serde_json::to_string(&first).unwrap();
        let second: WebSearchApiResponse = serde_json::from_str(&encoded).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn text_results_keep_nested_fields() {
    let resp = decode(WEB_TEXT);
    let web = resp.web.as_ref().unwrap();
    assert_eq!(web.family_friendly, Some(true));

    let first = &web.results[0];
    assert_eq!(first.item.url.as_deref(), Some("https://tokio.rs/"));
    assert_eq!(first.item.language.as_deref(), Some("en"));
    assert_eq!(
        first.meta_url.as_ref().and_then(|m| m.netloc.as_deref()),
        Some("tokio.rs")
    );
    assert_eq!(
        first.thumbnail.as_ref().and_then(|t| t.original.as_deref()),
        Some("https://tokio.rs/img/tokio.png")
    );
    assert_eq!(web.results[1].age.as_deref(), Some("March 3, 2023"));
    assert_eq!(
        web.results[2].item.page_fetched.as_deref(),
        Some("2025-01-12T08:30:00Z")
    );

    let query = resp.query.as_ref().unwrap();
    assert_eq!(query.original, "rust async runtime");
    assert_eq!(query.spellcheck_off, Some(true));
    assert_eq!(query.more_results_available, Some(true));
}

#[test]
fn video_results_keep_video_payload() {
    let resp = decode(VIDEOS_ONLY);
    assert!(resp.web.is_none());

    let videos = resp.videos.as_ref().unwrap();
    assert_eq!(videos.results.len(), 2);
    assert_eq!(videos.mutated_by_goggles, Some(false));

    let data = videos.results[0].video.as_ref().unwrap();
    assert_eq!(data.duration.as_deref(), Some("42:10"));
    assert_eq!(data.tags.as_deref(), Some(&["rust".to_string(), "conference".to_string()][..]));
    assert_eq!(
        data.author.as_ref().and_then(|a| a.name.as_deref()),
        Some("Rust Foundation")
    );
    assert_eq!(data.requires_subscription, Some(false));
}

#[test]
fn mixed_ordering_hints_are_decoded() {
    let resp = decode(MIXED);
    let mixed = resp.mixed.as_ref().unwrap();

    let kinds: Vec<MixedKind> = mixed.main.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        [MixedKind::Web, MixedKind::Videos, MixedKind::Web, MixedKind::Faq]
    );
    assert_eq!(mixed.main[2].index, Some(1));
    assert_eq!(mixed.main[1].all, Some(true));
    assert_eq!(mixed.top[0].kind, MixedKind::Infobox);

    let video = &resp.videos.as_ref().unwrap().results[0];
    assert_eq!(
        video.video.as_ref().and_then(|v| v.creator.as_deref()),
        Some("rustacean.net")
    );
    assert_eq!(resp.query.unwrap().city.as_deref(), Some("Berlin"));
}

// Integration tests for the HTTP adapter against a local fixture API.
// Exercises decoding, URL layout and the failure-to-absence policy.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{audio_json, catalog_json, surah_detail_json, tafsir_json, verse_json, Fixture};
use pretty_assertions::assert_eq;
use quran_browser_core::{
    domain::{LANG_BENGALI, LANG_ENGLISH},
    PortError, QuranResourceClient, SurahCatalog, VerseAggregator, VerseKey,
};
use reader_lib::adapters::{HttpQuranClient, NoticeBoard};

fn key(surah: i64, ayah: i64) -> VerseKey {
    VerseKey::new(surah, ayah).unwrap()
}

#[tokio::test]
async fn test_catalog_is_numbered_by_position() {
    let server = Fixture::new().json("/surah.json", catalog_json(114)).serve().await;
    let client = Arc::new(server.client());
    let notices = Arc::new(NoticeBoard::new());
    let catalog = SurahCatalog::new(client, notices.clone());

    assert_eq!(catalog.load().await.unwrap(), 114);

    let surahs = catalog.get_all();
    assert_eq!(surahs[0].surah_no, 1);
    assert_eq!(surahs[0].surah_name, "Surah 1");
    assert_eq!(surahs[113].surah_no, 114);
    assert_eq!(surahs[1].revelation_place.as_str(), "Medina");
    assert!(notices.list().is_empty());
}

#[tokio::test]
async fn test_catalog_failures_are_reported() {
    let server = Fixture::new()
        .respond("/surah.json", StatusCode::INTERNAL_SERVER_ERROR, "{}")
        .json("/reciters.json", "not json")
        .serve()
        .await;
    let client = server.client();

    assert!(matches!(client.fetch_catalog().await, Err(PortError::Network(_))));
    assert!(matches!(client.fetch_reciter_catalog().await, Err(PortError::Decode(_))));
}

#[tokio::test]
async fn test_catalog_failure_raises_one_notice() {
    let server = Fixture::new().json("/surah.json", "[{\"broken\": true}]").serve().await;
    let notices = Arc::new(NoticeBoard::new());
    let catalog = SurahCatalog::new(Arc::new(server.client()), notices.clone());

    assert!(catalog.load().await.is_err());
    assert!(catalog.get_all().is_empty());
    assert_eq!(notices.list().len(), 1);
}

#[tokio::test]
async fn test_unreachable_api_is_a_network_error() {
    // Bind and drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpQuranClient::new(reqwest::Client::new(), format!("http://{}/api", addr));

    assert!(matches!(client.fetch_catalog().await, Err(PortError::Network(_))));
    assert_eq!(client.fetch_verse(key(1, 1)).await, None);
}

#[tokio::test]
async fn test_reciters_accept_names_and_objects() {
    let server = Fixture::new()
        .json(
            "/reciters.json",
            r#"{"1": "Mishary Rashid Al Afasy", "2": {"name": "Abu Bakr Al Shatri"}}"#,
        )
        .serve()
        .await;

    let mut reciters = server.client().fetch_reciter_catalog().await.unwrap();
    reciters.sort_by(|a, b| a.id.cmp(&b.id));

    assert_eq!(reciters.len(), 2);
    assert_eq!(reciters[1].name, "Abu Bakr Al Shatri");
}

#[tokio::test]
async fn test_verse_resources_decode() {
    let server = Fixture::new()
        .json("/1/1.json", verse_json("In the name of Allah"))
        .json("/audio/1/1.json", audio_json())
        .json("/tafsir/1_1.json", tafsir_json("Commentary"))
        .json("/1.json", surah_detail_json(7))
        .serve()
        .await;
    let client = server.client();

    let verse = client.fetch_verse(key(1, 1)).await.unwrap();
    assert_eq!(verse.arabic, "بِسْمِ ٱللَّهِ ٱلرَّحْمَـٰنِ ٱلرَّحِيمِ");
    assert_eq!(verse.translation(LANG_ENGLISH), Some("In the name of Allah"));
    assert!(verse.translation(LANG_BENGALI).is_some());
    assert_eq!(verse.surah_name_arabic, "الفاتحة");

    let audio = client.fetch_audio(key(1, 1)).await.unwrap();
    let urls: Vec<&str> = audio.iter().map(|a| a.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://cdn.example/1/1_1.mp3", "https://origin.example/2/1_1.mp3"]
    );

    let tafsirs = client.fetch_tafsir(key(1, 1)).await.unwrap();
    assert_eq!(tafsirs.len(), 2);
    assert_eq!(tafsirs[0].author, "Ibn Kathir");

    let detail = client.fetch_surah_detail(1).await.unwrap();
    assert_eq!(detail.total_ayah, 7);
    assert_eq!(detail.audio_url_for("1"), Some("https://origin.example/1.mp3"));
    assert_eq!(detail.audio_url_for("2"), Some("https://cdn.example/2.mp3"));
}

#[tokio::test]
async fn test_missing_and_malformed_resources_are_absent() {
    let server = Fixture::new()
        .json("/2/3.json", "{\"arabic1\": 42}")
        .serve()
        .await;
    let client = server.client();

    assert_eq!(client.fetch_verse(key(2, 3)).await, None);
    assert_eq!(client.fetch_verse(key(2, 4)).await, None);
    assert_eq!(client.fetch_audio(key(2, 3)).await, None);
    assert_eq!(client.fetch_tafsir(key(2, 3)).await, None);
    assert_eq!(client.fetch_surah_detail(2).await, None);
    assert_eq!(server.hits("/2/3.json"), 1);
}

#[tokio::test]
async fn test_aggregator_uses_embedded_audio_when_audio_resource_missing() {
    let mut verse = verse_json("Guidance for the righteous");
    verse["audio"] = serde_json::json!({
        "1": {"reciter": "Mishary Rashid Al Afasy", "url": "https://cdn.example/2_2.mp3"}
    });
    let server = Fixture::new().json("/2/2.json", verse).serve().await;
    let aggregator = VerseAggregator::new(Arc::new(server.client()));

    let view = aggregator.aggregate(2, 2).await.unwrap();

    assert_eq!(view.audio.len(), 1);
    assert_eq!(view.audio[0].url, "https://cdn.example/2_2.mp3");
    assert_eq!(view.tafsir, None);
    assert_eq!(server.hits("/audio/2/2.json"), 1);
    assert_eq!(server.hits("/tafsir/2_2.json"), 1);
}

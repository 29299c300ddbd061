// Shared helpers for the integration tests: a local stand-in for the remote Quran
// JSON API that records every path it serves.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    routing::get,
    Router,
};
use reader_lib::adapters::HttpQuranClient;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub struct Fixture {
    routes: Vec<(String, StatusCode, String)>,
}

pub struct FixtureServer {
    pub base_url: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl FixtureServer {
    /// Number of requests served for paths starting with `prefix` (below `/api`).
    pub fn hits(&self, prefix: &str) -> usize {
        let prefix = format!("/api{}", prefix);
        self.hits
            .lock()
            .unwrap()
            .iter()
            .filter(|path| path.starts_with(&prefix))
            .count()
    }

    pub fn client(&self) -> HttpQuranClient {
        HttpQuranClient::new(reqwest::Client::new(), self.base_url.clone())
    }
}

impl Fixture {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Serves `body` with 200 at `/api{path}`.
    pub fn json(self, path: &str, body: impl ToString) -> Self {
        self.respond(path, StatusCode::OK, body)
    }

    pub fn respond(mut self, path: &str, status: StatusCode, body: impl ToString) -> Self {
        self.routes
            .push((format!("/api{}", path), status, body.to_string()));
        self
    }

    /// Starts the server on an ephemeral port. Unknown paths answer 404.
    pub async fn serve(self) -> FixtureServer {
        let hits = Arc::new(Mutex::new(Vec::new()));
        let mut router = Router::new();
        for (path, status, body) in self.routes {
            let hits = hits.clone();
            let served = path.clone();
            router = router.route(
                &path,
                get(move || {
                    hits.lock().unwrap().push(served.clone());
                    let body = body.clone();
                    async move { (status, [(CONTENT_TYPE, "application/json")], body) }
                }),
            );
        }
        let missing = hits.clone();
        let router = router.fallback(move |uri: axum::http::Uri| {
            missing.lock().unwrap().push(uri.path().to_string());
            async { StatusCode::NOT_FOUND }
        });

        FixtureServer {
            base_url: format!("{}/api", spawn(router).await),
            hits,
        }
    }
}

/// Serves `router` on 127.0.0.1 and returns `http://addr`.
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn catalog_json(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| {
                json!({
                    "surahName": format!("Surah {}", i + 1),
                    "surahNameArabic": "سورة",
                    "surahNameTranslation": "Chapter",
                    "revelationPlace": if i % 2 == 0 { "Mecca" } else { "Madina" },
                    "totalAyah": 7,
                    // Deliberately wrong; numbering must come from list position.
                    "surahNo": 500 + i,
                })
            })
            .collect(),
    )
}

pub fn verse_json(english: &str) -> Value {
    json!({
        "surahName": "Al-Faatiha",
        "surahNameArabic": "الفاتحة",
        "surahNo": 1,
        "ayahNo": 1,
        "arabic1": "بِسْمِ ٱللَّهِ ٱلرَّحْمَـٰنِ ٱلرَّحِيمِ",
        "arabic2": "بسم الله الرحمن الرحيم",
        "english": english,
        "bengali": "পরম করুণাময় অতি দয়ালু আল্লাহর নামে",
        "urdu": "شروع الله کا نام لے کر جو بڑا مہربان نہایت رحم والا ہے"
    })
}

pub fn audio_json() -> Value {
    json!({
        "2": {"reciter": "Abu Bakr Al Shatri", "url": "https://cdn.example/2/1_1.mp3", "originalUrl": "https://origin.example/2/1_1.mp3"},
        "1": {"reciter": "Mishary Rashid Al Afasy", "url": "https://cdn.example/1/1_1.mp3"}
    })
}

pub fn tafsir_json(content: &str) -> Value {
    json!({
        "surahName": "Al-Faatiha",
        "tafsirs": [
            {"author": "Ibn Kathir", "groupVerse": null, "content": content},
            {"author": "Maarif Ul Quran", "groupVerse": null, "content": "Second commentary"}
        ]
    })
}

pub fn surah_detail_json(total_ayah: u32) -> Value {
    json!({
        "surahName": "Al-Faatiha",
        "surahNameArabic": "الفاتحة",
        "revelationPlace": "Mecca",
        "totalAyah": total_ayah,
        "audio": {
            "1": {"reciter": "Mishary Rashid Al Afasy", "url": "https://cdn.example/1.mp3", "originalUrl": "https://origin.example/1.mp3"},
            "2": {"reciter": "Abu Bakr Al Shatri", "url": "https://cdn.example/2.mp3"}
        }
    })
}

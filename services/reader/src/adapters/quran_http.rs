//! services/reader/src/adapters/quran_http.rs
//!
//! This module contains the adapter for the remote Quran JSON API.
//! It implements the `QuranResourceClient` port from the `core` crate.

use std::collections::HashMap;

use async_trait::async_trait;
use quran_browser_core::domain::{
    reciter_sort_key, AudioOption, Reciter, RevelationPlace, SurahDetail, SurahListing,
    TafsirEntry, Verse, VerseKey, LANG_BENGALI, LANG_ENGLISH, LANG_URDU,
};
use quran_browser_core::ports::{PortError, PortResult, QuranResourceClient};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `QuranResourceClient` port over HTTP.
#[derive(Clone)]
pub struct HttpQuranClient {
    client: Client,
    base_url: String,
}

impl HttpQuranClient {
    /// Creates a new `HttpQuranClient`. `base_url` must not end with a slash.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetches `path` below the base URL and decodes the body as JSON.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> PortResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PortError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PortError::NotFound(url));
        }
        if !status.is_success() {
            return Err(PortError::Network(format!("{} returned {}", url, status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PortError::Network(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| PortError::Decode(format!("{}: {}", url, e)))
    }

    /// Like `get_json`, but any failure becomes `None`.
    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        match self.get_json(path).await {
            Ok(value) => Some(value),
            Err(PortError::NotFound(url)) => {
                debug!("Nothing at {}", url);
                None
            }
            Err(e) => {
                warn!("Error fetching {}: {}", path, e);
                None
            }
        }
    }
}

//=========================================================================================
// Wire Record Structs
//=========================================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SurahRecord {
    surah_name: String,
    #[serde(default)]
    surah_name_arabic: String,
    total_ayah: u32,
    #[serde(default)]
    revelation_place: Option<String>,
}
impl SurahRecord {
    fn to_domain(self) -> SurahListing {
        SurahListing {
            surah_name: self.surah_name,
            surah_name_arabic: self.surah_name_arabic,
            total_ayah: self.total_ayah,
            revelation_place: RevelationPlace::from_label(self.revelation_place.as_deref()),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SurahDetailRecord {
    surah_name: String,
    #[serde(default)]
    surah_name_arabic: String,
    total_ayah: u32,
    #[serde(default)]
    revelation_place: Option<String>,
    #[serde(default)]
    audio: HashMap<String, AudioRecord>,
}
impl SurahDetailRecord {
    fn to_domain(self) -> SurahDetail {
        SurahDetail {
            surah_name: self.surah_name,
            surah_name_arabic: self.surah_name_arabic,
            total_ayah: self.total_ayah,
            revelation_place: RevelationPlace::from_label(self.revelation_place.as_deref()),
            audio: audio_options(self.audio),
        }
    }
}

/// Reciter entries are either a bare name or an object carrying one.
#[derive(Deserialize)]
#[serde(untagged)]
enum ReciterRecord {
    Name(String),
    Described { name: String },
}
impl ReciterRecord {
    fn to_domain(self, id: String) -> Reciter {
        let name = match self {
            Self::Name(name) | Self::Described { name } => name,
        };
        Reciter { id, name }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AudioRecord {
    #[serde(default)]
    reciter: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    original_url: Option<String>,
}
impl AudioRecord {
    /// `originalUrl` is preferred; entries with no usable URL are dropped.
    fn to_domain(self, reciter_id: String) -> Option<AudioOption> {
        let url = non_empty(self.original_url).or_else(|| non_empty(self.url))?;
        Some(AudioOption {
            reciter_name: self.reciter.unwrap_or_else(|| reciter_id.clone()),
            reciter_id,
            url,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerseRecord {
    #[serde(default)]
    surah_name: String,
    #[serde(default)]
    surah_name_arabic: String,
    #[serde(default)]
    arabic1: Option<String>,
    #[serde(default)]
    arabic2: Option<String>,
    #[serde(default)]
    english: Option<String>,
    #[serde(default)]
    bengali: Option<String>,
    #[serde(default)]
    urdu: Option<String>,
    #[serde(default)]
    audio: Option<HashMap<String, AudioRecord>>,
}
impl VerseRecord {
    fn to_domain(self, key: VerseKey) -> Verse {
        let translations = [
            (LANG_ENGLISH, self.english),
            (LANG_BENGALI, self.bengali),
            (LANG_URDU, self.urdu),
        ]
        .into_iter()
        .filter_map(|(lang, text)| non_empty(text).map(|text| (lang.to_string(), text)))
        .collect();

        Verse {
            key,
            surah_name: self.surah_name,
            surah_name_arabic: self.surah_name_arabic,
            arabic: non_empty(self.arabic1)
                .or_else(|| non_empty(self.arabic2))
                .unwrap_or_default(),
            translations,
            embedded_audio: self.audio.map(audio_options),
        }
    }
}

#[derive(Deserialize)]
struct TafsirRecord {
    #[serde(default)]
    tafsirs: Vec<TafsirItemRecord>,
}

#[derive(Deserialize)]
struct TafsirItemRecord {
    #[serde(default)]
    author: String,
    #[serde(default)]
    content: String,
}
impl TafsirItemRecord {
    fn to_domain(self) -> TafsirEntry {
        TafsirEntry {
            author: self.author,
            content: self.content,
        }
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

fn audio_options(records: HashMap<String, AudioRecord>) -> Vec<AudioOption> {
    let mut options: Vec<AudioOption> = records
        .into_iter()
        .filter_map(|(id, record)| record.to_domain(id))
        .collect();
    options.sort_by_key(|option| reciter_sort_key(&option.reciter_id));
    options
}

//=========================================================================================
// `QuranResourceClient` Trait Implementation
//=========================================================================================

#[async_trait]
impl QuranResourceClient for HttpQuranClient {
    async fn fetch_catalog(&self) -> PortResult<Vec<SurahListing>> {
        let records: Vec<SurahRecord> = self.get_json("/surah.json").await?;
        Ok(records.into_iter().map(SurahRecord::to_domain).collect())
    }

    async fn fetch_reciter_catalog(&self) -> PortResult<Vec<Reciter>> {
        let records: HashMap<String, ReciterRecord> = self.get_json("/reciters.json").await?;
        Ok(records
            .into_iter()
            .map(|(id, record)| record.to_domain(id))
            .collect())
    }

    async fn fetch_surah_detail(&self, surah_no: u32) -> Option<SurahDetail> {
        self.get_optional::<SurahDetailRecord>(&format!("/{}.json", surah_no))
            .await
            .map(SurahDetailRecord::to_domain)
    }

    async fn fetch_verse(&self, key: VerseKey) -> Option<Verse> {
        self.get_optional::<VerseRecord>(&format!("/{}/{}.json", key.surah_no(), key.ayah_no()))
            .await
            .map(|record| record.to_domain(key))
    }

    async fn fetch_tafsir(&self, key: VerseKey) -> Option<Vec<TafsirEntry>> {
        self.get_optional::<TafsirRecord>(&format!(
            "/tafsir/{}_{}.json",
            key.surah_no(),
            key.ayah_no()
        ))
        .await
        .map(|record| record.tafsirs.into_iter().map(TafsirItemRecord::to_domain).collect())
    }

    async fn fetch_audio(&self, key: VerseKey) -> Option<Vec<AudioOption>> {
        self.get_optional::<HashMap<String, AudioRecord>>(&format!(
            "/audio/{}/{}.json",
            key.surah_no(),
            key.ayah_no()
        ))
        .await
        .map(audio_options)
    }
}

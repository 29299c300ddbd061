//! crates/quran_browser_core/src/test_helpers.rs
//!
//! In-memory doubles for the ports, shared by the unit tests of this crate.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{
    AudioOption, Reciter, RevelationPlace, SurahDetail, SurahListing, TafsirEntry, Verse, VerseKey,
    LANG_ENGLISH,
};
use crate::ports::{NotificationSink, PortError, PortResult, QuranResourceClient};

#[derive(Debug, Default)]
pub struct CallCounts {
    pub catalog: AtomicUsize,
    pub reciters: AtomicUsize,
    pub surah_detail: AtomicUsize,
    pub verse: AtomicUsize,
    pub tafsir: AtomicUsize,
    pub audio: AtomicUsize,
}

impl CallCounts {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// A resource client answering from maps. `None` catalogs simulate a network failure.
#[derive(Default)]
pub struct FakeClient {
    pub catalog: Option<Vec<SurahListing>>,
    pub reciters: Option<Vec<Reciter>>,
    pub surah_details: HashMap<u32, SurahDetail>,
    pub verses: HashMap<VerseKey, Verse>,
    pub tafsirs: HashMap<VerseKey, Vec<TafsirEntry>>,
    pub audio: HashMap<VerseKey, Vec<AudioOption>>,
    pub calls: CallCounts,
}

#[async_trait]
impl QuranResourceClient for FakeClient {
    async fn fetch_catalog(&self) -> PortResult<Vec<SurahListing>> {
        self.calls.catalog.fetch_add(1, Ordering::SeqCst);
        self.catalog
            .clone()
            .ok_or_else(|| PortError::Network("connection refused".to_string()))
    }

    async fn fetch_reciter_catalog(&self) -> PortResult<Vec<Reciter>> {
        self.calls.reciters.fetch_add(1, Ordering::SeqCst);
        self.reciters
            .clone()
            .ok_or_else(|| PortError::Network("connection refused".to_string()))
    }

    async fn fetch_surah_detail(&self, surah_no: u32) -> Option<SurahDetail> {
        self.calls.surah_detail.fetch_add(1, Ordering::SeqCst);
        self.surah_details.get(&surah_no).cloned()
    }

    async fn fetch_verse(&self, key: VerseKey) -> Option<Verse> {
        self.calls.verse.fetch_add(1, Ordering::SeqCst);
        self.verses.get(&key).cloned()
    }

    async fn fetch_tafsir(&self, key: VerseKey) -> Option<Vec<TafsirEntry>> {
        self.calls.tafsir.fetch_add(1, Ordering::SeqCst);
        self.tafsirs.get(&key).cloned()
    }

    async fn fetch_audio(&self, key: VerseKey) -> Option<Vec<AudioOption>> {
        self.calls.audio.fetch_add(1, Ordering::SeqCst);
        self.audio.get(&key).cloned()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub fn listing(name: &str, total_ayah: u32) -> SurahListing {
    SurahListing {
        surah_name: name.to_string(),
        surah_name_arabic: String::new(),
        total_ayah,
        revelation_place: RevelationPlace::Mecca,
    }
}

pub fn listings(count: usize) -> Vec<SurahListing> {
    (0..count).map(|i| listing(&format!("Surah {i}"), 7)).collect()
}

pub fn verse(key: VerseKey, english: &str) -> Verse {
    Verse {
        key,
        surah_name: "Al-Faatiha".to_string(),
        surah_name_arabic: "الفاتحة".to_string(),
        arabic: "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ".to_string(),
        translations: BTreeMap::from([(LANG_ENGLISH.to_string(), english.to_string())]),
        embedded_audio: None,
    }
}

pub fn audio_option(reciter_id: &str, url: &str) -> AudioOption {
    AudioOption {
        reciter_id: reciter_id.to_string(),
        reciter_name: format!("Reciter {reciter_id}"),
        url: url.to_string(),
    }
}

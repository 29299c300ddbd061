//! crates/quran_browser_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any transport or serialization format.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::aggregator::VerseError;

/// Number of chapters in the Quran; valid surah numbers are `1..=SURAH_COUNT`.
pub const SURAH_COUNT: u32 = 114;

/// Reciter used when a user has not picked one.
pub const DEFAULT_RECITER_ID: &str = "1";

/// Characters of tafsir text kept for a preview.
pub const TAFSIR_PREVIEW_CHARS: usize = 300;

/// Appended to every tafsir preview.
pub const TRUNCATION_MARKER: &str = "...";

/// Language codes of the translations carried by the verse endpoint.
pub const LANG_ENGLISH: &str = "en";
pub const LANG_BENGALI: &str = "bn";
pub const LANG_URDU: &str = "ur";

//=========================================================================================
// Catalog
//=========================================================================================

/// Where a surah was revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevelationPlace {
    Mecca,
    Medina,
    Unknown,
}

impl RevelationPlace {
    /// Maps the free-form label used by the remote API. Anything unrecognised is `Unknown`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
            Some("mecca" | "makkah" | "meccan") => Self::Mecca,
            Some("medina" | "madina" | "madinah" | "medinan") => Self::Medina,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mecca => "Mecca",
            Self::Medina => "Medina",
            Self::Unknown => "Unknown",
        }
    }
}

/// A surah record exactly as the catalog endpoint lists it, before it is numbered.
///
/// There is deliberately no number here: the only trusted surah number is the
/// position in the fetched list, assigned by the catalog store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurahListing {
    pub surah_name: String,
    pub surah_name_arabic: String,
    pub total_ayah: u32,
    pub revelation_place: RevelationPlace,
}

/// One chapter of the catalog, numbered by its 1-based position in the fetched list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surah {
    pub surah_no: u32,
    pub surah_name: String,
    pub surah_name_arabic: String,
    pub total_ayah: u32,
    pub revelation_place: RevelationPlace,
}

impl Surah {
    pub(crate) fn numbered(surah_no: u32, listing: SurahListing) -> Self {
        Self {
            surah_no,
            surah_name: listing.surah_name,
            surah_name_arabic: listing.surah_name_arabic,
            total_ayah: listing.total_ayah,
            revelation_place: listing.revelation_place,
        }
    }
}

/// The full record of one surah, including its per-reciter recitations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurahDetail {
    pub surah_name: String,
    pub surah_name_arabic: String,
    pub total_ayah: u32,
    pub revelation_place: RevelationPlace,
    pub audio: Vec<AudioOption>,
}

impl SurahDetail {
    /// Playback URL of the whole surah for the given reciter, if that reciter recorded it.
    pub fn audio_url_for(&self, reciter_id: &str) -> Option<&str> {
        self.audio
            .iter()
            .find(|option| option.reciter_id == reciter_id)
            .map(|option| option.url.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reciter {
    pub id: String,
    pub name: String,
}

/// Sort key for reciter ids: numeric ids first in numeric order, then the rest lexically.
pub fn reciter_sort_key(id: &str) -> (u64, String) {
    (id.parse::<u64>().unwrap_or(u64::MAX), id.to_string())
}

//=========================================================================================
// Verses
//=========================================================================================

/// A validated (surah, ayah) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerseKey {
    surah_no: u32,
    ayah_no: u32,
}

impl VerseKey {
    /// Validates the pair: surah in `1..=114`, ayah positive. The ayah upper bound is
    /// left to the remote API, which answers with nothing for verses that don't exist.
    pub fn new(surah_no: i64, ayah_no: i64) -> Result<Self, VerseError> {
        let surah_no = validate_surah_no(surah_no)?;
        let ayah_no = u32::try_from(ayah_no)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| {
                VerseError::Validation(format!("ayah number must be a positive integer, got {ayah_no}"))
            })?;
        Ok(Self { surah_no, ayah_no })
    }

    /// Parses raw user input. Anything that is not an integer is a validation error.
    pub fn parse(surah: &str, ayah: &str) -> Result<Self, VerseError> {
        Self::new(parse_integer("surah", surah)?, parse_integer("ayah", ayah)?)
    }

    pub fn surah_no(&self) -> u32 {
        self.surah_no
    }

    pub fn ayah_no(&self) -> u32 {
        self.ayah_no
    }
}

impl std::fmt::Display for VerseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.surah_no, self.ayah_no)
    }
}

/// Checks that a surah number lies in `1..=114`.
pub fn validate_surah_no(surah_no: i64) -> Result<u32, VerseError> {
    u32::try_from(surah_no)
        .ok()
        .filter(|n| (1..=SURAH_COUNT).contains(n))
        .ok_or_else(|| {
            VerseError::Validation(format!(
                "surah number must be between 1 and {SURAH_COUNT}, got {surah_no}"
            ))
        })
}

/// Parses a number typed by a user.
pub fn parse_integer(field: &str, raw: &str) -> Result<i64, VerseError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| VerseError::Validation(format!("{field} number must be an integer, got '{raw}'")))
}

/// One recitation of a verse (or a whole surah) by one reciter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioOption {
    pub reciter_id: String,
    pub reciter_name: String,
    pub url: String,
}

/// A single aya with its script and translations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    pub key: VerseKey,
    pub surah_name: String,
    pub surah_name_arabic: String,
    /// First non-empty of the two script variants delivered by the API.
    pub arabic: String,
    /// Translation text keyed by language code.
    pub translations: BTreeMap<String, String>,
    /// Recitations embedded in the verse record itself, used when the audio endpoint has nothing.
    pub embedded_audio: Option<Vec<AudioOption>>,
}

impl Verse {
    pub fn translation(&self, language: &str) -> Option<&str> {
        self.translations.get(language).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TafsirEntry {
    pub author: String,
    pub content: String,
}

/// The opening of the first tafsir of a verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TafsirPreview {
    pub author: String,
    pub excerpt: String,
}

impl TafsirPreview {
    /// Keeps the first `TAFSIR_PREVIEW_CHARS` characters (not bytes) and appends the marker.
    pub fn from_entry(entry: &TafsirEntry) -> Self {
        let mut excerpt: String = entry.content.chars().take(TAFSIR_PREVIEW_CHARS).collect();
        excerpt.push_str(TRUNCATION_MARKER);
        Self {
            author: entry.author.clone(),
            excerpt,
        }
    }
}

/// Everything the verse-detail view renders, composed from independently fetched parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseViewModel {
    pub verse: Verse,
    /// Empty means "no audio available", which is not an error.
    pub audio: Vec<AudioOption>,
    pub tafsir: Option<TafsirPreview>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyVerse {
    pub key: VerseKey,
    pub arabic: String,
    pub translation: String,
    pub reference: String,
}

//=========================================================================================
// User preferences
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Display settings stored alongside a user's preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub theme: Theme,
    pub font_size: u32,
    pub language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            font_size: 18,
            language: LANG_ENGLISH.to_string(),
        }
    }
}

/// A bookmark or history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseMark {
    pub key: VerseKey,
    pub marked_at: DateTime<Utc>,
}

/// The preference document kept for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPreferences {
    pub user_id: Uuid,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub default_reciter: String,
    pub bookmarks: Vec<VerseMark>,
    pub history: Vec<VerseMark>,
    pub settings: Settings,
}

impl UserPreferences {
    /// A fresh document with the defaults applied at account creation.
    pub fn new(user_id: Uuid, display_name: Option<String>, default_reciter: Option<String>) -> Self {
        Self {
            user_id,
            display_name,
            created_at: Utc::now(),
            default_reciter: default_reciter.unwrap_or_else(|| DEFAULT_RECITER_ID.to_string()),
            bookmarks: Vec::new(),
            history: Vec::new(),
            settings: Settings::default(),
        }
    }
}

/// A transient, dismissible message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: Uuid,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

//! crates/quran_browser_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the HTTP transport, the document store and the UI.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    AudioOption, Reciter, SurahDetail, SurahListing, TafsirEntry, UserPreferences, Verse, VerseKey,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., network, JSON).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Could not decode response: {0}")]
    Decode(String),
    #[error("Item not found: {0}")]
    NotFound(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Typed access to the remote Quran JSON resources.
///
/// The two catalog fetches report failures. Every per-surah and per-verse fetch
/// absorbs transport and decode failures into `None`, so callers can always carry
/// on with whatever partial data they have.
#[async_trait]
pub trait QuranResourceClient: Send + Sync {
    /// The surah list, in canonical order.
    async fn fetch_catalog(&self) -> PortResult<Vec<SurahListing>>;

    async fn fetch_reciter_catalog(&self) -> PortResult<Vec<Reciter>>;

    async fn fetch_surah_detail(&self, surah_no: u32) -> Option<SurahDetail>;

    async fn fetch_verse(&self, key: VerseKey) -> Option<Verse>;

    /// All tafsir entries of a verse, in the order the API lists them.
    async fn fetch_tafsir(&self, key: VerseKey) -> Option<Vec<TafsirEntry>>;

    /// Recitations of a verse, ordered by reciter id.
    async fn fetch_audio(&self, key: VerseKey) -> Option<Vec<AudioOption>>;
}

/// Where user-visible, non-blocking notifications go.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str);
}

/// The per-user preference document store.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Creates the preference document for a newly registered user.
    async fn create_profile(
        &self,
        user_id: Uuid,
        display_name: Option<String>,
        default_reciter: Option<String>,
    ) -> PortResult<UserPreferences>;

    async fn get_preferences(&self, user_id: Uuid) -> PortResult<UserPreferences>;

    async fn set_default_reciter(&self, user_id: Uuid, reciter_id: &str) -> PortResult<()>;

    async fn append_bookmark(&self, user_id: Uuid, key: VerseKey) -> PortResult<()>;

    async fn append_history_entry(&self, user_id: Uuid, key: VerseKey) -> PortResult<()>;
}

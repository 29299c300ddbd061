//! services/reader/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::adapters::NoticeBoard;
use crate::config::Config;
use quran_browser_core::{
    DailyVerseSelector, PreferenceStore, QuranResourceClient, ReciterCatalog, SurahCatalog,
    VerseAggregator,
};
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
///
/// The catalogs are loaded once at startup and only read by handlers afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Arc<dyn QuranResourceClient>,
    pub surahs: Arc<SurahCatalog>,
    pub reciters: Arc<ReciterCatalog>,
    pub aggregator: VerseAggregator,
    pub daily: Arc<DailyVerseSelector>,
    pub preferences: Arc<dyn PreferenceStore>,
    pub notices: Arc<NoticeBoard>,
}

impl AppState {
    /// Wires the core stores and services around the given adapters. Nothing is
    /// fetched yet; call `load_catalogs` before serving.
    pub fn new(
        config: Arc<Config>,
        client: Arc<dyn QuranResourceClient>,
        preferences: Arc<dyn PreferenceStore>,
        notices: Arc<NoticeBoard>,
    ) -> Self {
        let aggregator = VerseAggregator::new(client.clone());
        Self {
            config,
            surahs: Arc::new(SurahCatalog::new(client.clone(), notices.clone())),
            reciters: Arc::new(ReciterCatalog::new(client.clone())),
            daily: Arc::new(DailyVerseSelector::new(aggregator.clone())),
            aggregator,
            client,
            preferences,
            notices,
        }
    }

    /// Loads the surah list, then the reciter list. Neither failure is fatal: a failed
    /// surah load has already raised a notice for the user.
    pub async fn load_catalogs(&self) {
        // The error is already logged and surfaced as a notice.
        let _ = self.surahs.load().await;
        self.reciters.load().await;
    }
}

//! crates/quran_browser_core/src/aggregator.rs
//!
//! Composes the verse-detail view model from the verse, audio and tafsir resources.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{TafsirPreview, Verse, VerseKey, VerseViewModel};
use crate::ports::QuranResourceClient;

/// Failures a caller of the aggregator has to handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerseError {
    /// Bad caller input. Raised before any network call.
    #[error("Invalid verse reference: {0}")]
    Validation(String),
    /// The verse itself could not be fetched, so there is nothing to show.
    #[error("Verse {surah_no}:{ayah_no} not found")]
    NotFound { surah_no: u32, ayah_no: u32 },
}

/// Builds `VerseViewModel`s on demand. Holds no per-request state, so concurrent
/// invocations are independent and none cancels another.
#[derive(Clone)]
pub struct VerseAggregator {
    client: Arc<dyn QuranResourceClient>,
}

impl VerseAggregator {
    pub fn new(client: Arc<dyn QuranResourceClient>) -> Self {
        Self { client }
    }

    pub(crate) fn client(&self) -> &Arc<dyn QuranResourceClient> {
        &self.client
    }

    /// Validates the raw pair, then composes the view model.
    pub async fn aggregate(&self, surah_no: i64, ayah_no: i64) -> Result<VerseViewModel, VerseError> {
        let key = VerseKey::new(surah_no, ayah_no)?;
        self.aggregate_key(key).await
    }

    /// Composes the view model for an already validated key.
    ///
    /// The verse is required. Audio and tafsir are fetched together afterwards and
    /// either may be missing without failing the whole view.
    pub async fn aggregate_key(&self, key: VerseKey) -> Result<VerseViewModel, VerseError> {
        let verse = self.fetch_verse(key).await?;

        let (audio, tafsirs) = futures::join!(self.client.fetch_audio(key), self.client.fetch_tafsir(key));

        let audio = match audio {
            Some(options) => options,
            None => {
                debug!("No audio resource for {}, using the verse's embedded audio.", key);
                verse.embedded_audio.clone().unwrap_or_default()
            }
        };

        let tafsir = tafsirs
            .as_deref()
            .and_then(|entries| entries.first())
            .map(TafsirPreview::from_entry);

        Ok(VerseViewModel { verse, audio, tafsir })
    }

    /// The verse-fetch step on its own: text and translations, no audio or tafsir.
    pub async fn fetch_verse(&self, key: VerseKey) -> Result<Verse, VerseError> {
        self.client.fetch_verse(key).await.ok_or_else(|| {
            info!("Verse {} not found.", key);
            VerseError::NotFound {
                surah_no: key.surah_no(),
                ayah_no: key.ayah_no(),
            }
        })
    }
}

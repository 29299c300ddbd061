//! crates/quran_browser_core/src/daily.rs
//!
//! The "verse of the day" picker.

use rand::Rng;
use tracing::debug;

use crate::aggregator::VerseAggregator;
use crate::domain::{DailyVerse, VerseKey, LANG_ENGLISH, SURAH_COUNT};

/// Only the opening verses of a surah are candidates.
pub const DAILY_AYAH_LIMIT: u32 = 10;

/// Picks a random verse from the opening of a random surah. Stateless; every call is
/// an independent draw.
pub struct DailyVerseSelector {
    aggregator: VerseAggregator,
}

impl DailyVerseSelector {
    pub fn new(aggregator: VerseAggregator) -> Self {
        Self { aggregator }
    }

    /// Returns `None` if the surah detail or the verse cannot be fetched.
    pub async fn pick<R: Rng + Send>(&self, rng: &mut R) -> Option<DailyVerse> {
        let surah_no = rng.gen_range(1..=SURAH_COUNT);
        let detail = self.aggregator.client().fetch_surah_detail(surah_no).await?;

        let upper = detail.total_ayah.clamp(1, DAILY_AYAH_LIMIT);
        let ayah_no = rng.gen_range(1..=upper);
        let key = VerseKey::new(surah_no.into(), ayah_no.into()).ok()?;

        let verse = match self.aggregator.fetch_verse(key).await {
            Ok(verse) => verse,
            Err(e) => {
                debug!("Daily verse {} unavailable: {}", key, e);
                return None;
            }
        };

        Some(DailyVerse {
            key,
            reference: format!("Surah {} ({})", verse.surah_name_arabic, key),
            translation: verse.translation(LANG_ENGLISH).unwrap_or_default().to_string(),
            arabic: verse.arabic,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RevelationPlace, SurahDetail};
    use crate::test_helpers::{verse, CallCounts, FakeClient};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn detail(total_ayah: u32) -> SurahDetail {
        SurahDetail {
            surah_name: "Test".to_string(),
            surah_name_arabic: "اختبار".to_string(),
            total_ayah,
            revelation_place: RevelationPlace::Medina,
            audio: vec![],
        }
    }

    /// Every surah exists with the given length, and every opening verse resolves.
    fn full_client(total_ayah: u32) -> FakeClient {
        let mut verses = HashMap::new();
        for surah in 1..=SURAH_COUNT {
            for ayah in 1..=total_ayah.min(DAILY_AYAH_LIMIT) {
                let k = VerseKey::new(surah.into(), ayah.into()).unwrap();
                verses.insert(k, verse(k, "daily"));
            }
        }
        FakeClient {
            surah_details: (1..=SURAH_COUNT).map(|s| (s, detail(total_ayah))).collect(),
            verses,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_picks_stay_within_opening_verses() {
        let client = Arc::new(full_client(286));
        let selector = DailyVerseSelector::new(VerseAggregator::new(client.clone()));
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let daily = selector.pick(&mut rng).await.unwrap();
            assert!((1..=SURAH_COUNT).contains(&daily.key.surah_no()));
            assert!((1..=DAILY_AYAH_LIMIT).contains(&daily.key.ayah_no()));
            assert_eq!(daily.translation, "daily");
            assert_eq!(daily.reference, format!("Surah الفاتحة ({})", daily.key));
        }
        assert_eq!(CallCounts::get(&client.calls.audio), 0);
        assert_eq!(CallCounts::get(&client.calls.tafsir), 0);
    }

    #[tokio::test]
    async fn test_short_surah_limits_ayah() {
        let client = Arc::new(full_client(3));
        let selector = DailyVerseSelector::new(VerseAggregator::new(client));
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..30 {
            let daily = selector.pick(&mut rng).await.unwrap();
            assert!(daily.key.ayah_no() <= 3);
        }
    }

    #[tokio::test]
    async fn test_missing_detail_yields_none() {
        let client = Arc::new(FakeClient::default());
        let selector = DailyVerseSelector::new(VerseAggregator::new(client.clone()));
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(selector.pick(&mut rng).await, None);
        assert_eq!(CallCounts::get(&client.calls.verse), 0);
    }
}

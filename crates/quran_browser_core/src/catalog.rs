//! crates/quran_browser_core/src/catalog.rs
//!
//! Session-wide, load-once stores for the surah list and the reciter list.
//!
//! Both are constructed once at startup and shared by reference. They are written
//! by `load` and only read afterwards, so readers get a cheap `Arc` snapshot.

use std::sync::{Arc, RwLock};

use tracing::{error, info, warn};

use crate::domain::{reciter_sort_key, Reciter, Surah};
use crate::ports::{NotificationSink, PortResult, QuranResourceClient};

/// Message shown to the user when the surah list cannot be fetched.
pub const CATALOG_LOAD_FAILED: &str = "Failed to load surahs. Please refresh the page.";

fn snapshot<T>(lock: &RwLock<Arc<[T]>>) -> Arc<[T]> {
    match lock.read() {
        Ok(guard) => Arc::clone(&*guard),
        Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
    }
}

fn replace<T>(lock: &RwLock<Arc<[T]>>, items: Arc<[T]>) {
    match lock.write() {
        Ok(mut guard) => *guard = items,
        Err(poisoned) => *poisoned.into_inner() = items,
    }
}

//=========================================================================================
// Surah catalog
//=========================================================================================

/// The authoritative, in-memory surah list for the session.
pub struct SurahCatalog {
    client: Arc<dyn QuranResourceClient>,
    notifier: Arc<dyn NotificationSink>,
    surahs: RwLock<Arc<[Surah]>>,
}

impl SurahCatalog {
    pub fn new(client: Arc<dyn QuranResourceClient>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            client,
            notifier,
            surahs: RwLock::new(Arc::from(Vec::new())),
        }
    }

    /// Fetches the surah list and numbers it `1..=N` in fetch order.
    ///
    /// Meant to be called once at startup; calling it again re-fetches and replaces
    /// the list. On failure the store keeps what it had (nothing, on the first call)
    /// and the user is notified once for this call.
    pub async fn load(&self) -> PortResult<usize> {
        match self.client.fetch_catalog().await {
            Ok(listings) => {
                let surahs: Vec<Surah> = listings
                    .into_iter()
                    .zip(1u32..)
                    .map(|(listing, surah_no)| Surah::numbered(surah_no, listing))
                    .collect();
                let count = surahs.len();
                replace(&self.surahs, Arc::from(surahs));
                info!("Surah catalog loaded with {} entries.", count);
                Ok(count)
            }
            Err(e) => {
                error!("Error loading surahs: {}", e);
                self.notifier.notify(CATALOG_LOAD_FAILED);
                Err(e)
            }
        }
    }

    /// The stored surahs in canonical order. Empty until a load succeeds.
    pub fn get_all(&self) -> Arc<[Surah]> {
        snapshot(&self.surahs)
    }
}

//=========================================================================================
// Reciter catalog
//=========================================================================================

/// The reciter list for the session.
pub struct ReciterCatalog {
    client: Arc<dyn QuranResourceClient>,
    reciters: RwLock<Arc<[Reciter]>>,
}

impl ReciterCatalog {
    pub fn new(client: Arc<dyn QuranResourceClient>) -> Self {
        Self {
            client,
            reciters: RwLock::new(Arc::from(Vec::new())),
        }
    }

    /// Fetches the reciter map and stores it ordered by id.
    ///
    /// A failure is only logged: the reciter list is decorative, so the user gets no
    /// notification and the store stays empty.
    pub async fn load(&self) -> usize {
        match self.client.fetch_reciter_catalog().await {
            Ok(mut reciters) => {
                reciters.sort_by_key(|r| reciter_sort_key(&r.id));
                let count = reciters.len();
                replace(&self.reciters, Arc::from(reciters));
                info!("Reciter catalog loaded with {} entries.", count);
                count
            }
            Err(e) => {
                warn!("Error loading reciters: {}", e);
                0
            }
        }
    }

    pub fn get_all(&self) -> Arc<[Reciter]> {
        snapshot(&self.reciters)
    }
}

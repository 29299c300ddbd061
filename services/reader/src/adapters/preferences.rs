//! services/reader/src/adapters/preferences.rs
//!
//! An in-process implementation of the `PreferenceStore` port. One document per user,
//! lost when the process exits.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use quran_browser_core::domain::{UserPreferences, VerseKey, VerseMark};
use quran_browser_core::ports::{PortError, PortResult, PreferenceStore};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryPreferenceStore {
    documents: RwLock<HashMap<Uuid, UserPreferences>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `change` to an existing document.
    async fn update(
        &self,
        user_id: Uuid,
        change: impl FnOnce(&mut UserPreferences),
    ) -> PortResult<()> {
        let mut documents = self.documents.write().await;
        let prefs = documents
            .get_mut(&user_id)
            .ok_or_else(|| PortError::NotFound(format!("Preferences for user {} not found", user_id)))?;
        change(prefs);
        Ok(())
    }
}

fn mark(key: VerseKey) -> VerseMark {
    VerseMark {
        key,
        marked_at: Utc::now(),
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    /// Writes a fresh document, replacing any previous one for the same user.
    async fn create_profile(
        &self,
        user_id: Uuid,
        display_name: Option<String>,
        default_reciter: Option<String>,
    ) -> PortResult<UserPreferences> {
        let prefs = UserPreferences::new(user_id, display_name, default_reciter);
        self.documents.write().await.insert(user_id, prefs.clone());
        info!("Created preferences for user {}", user_id);
        Ok(prefs)
    }

    async fn get_preferences(&self, user_id: Uuid) -> PortResult<UserPreferences> {
        self.documents
            .read()
            .await
            .get(&user_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Preferences for user {} not found", user_id)))
    }

    async fn set_default_reciter(&self, user_id: Uuid, reciter_id: &str) -> PortResult<()> {
        self.update(user_id, |prefs| prefs.default_reciter = reciter_id.to_string())
            .await
    }

    async fn append_bookmark(&self, user_id: Uuid, key: VerseKey) -> PortResult<()> {
        self.update(user_id, |prefs| prefs.bookmarks.push(mark(key))).await
    }

    async fn append_history_entry(&self, user_id: Uuid, key: VerseKey) -> PortResult<()> {
        self.update(user_id, |prefs| prefs.history.push(mark(key))).await
    }
}

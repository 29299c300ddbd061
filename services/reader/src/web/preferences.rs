//! services/reader/src/web/preferences.rs
//!
//! Endpoints for the per-user preference document: default reciter, bookmarks
//! and reading history. The user is identified by the `x-user-id` header.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use chrono::{DateTime, Utc};
use quran_browser_core::{UserPreferences, VerseKey, VerseMark};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::web::{
    rest::{port_error_response, verse_error_response},
    state::AppState,
};

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct CreateProfileRequest {
    pub display_name: Option<String>,
    pub default_reciter: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct DefaultReciterRequest {
    pub reciter_id: String,
}

/// A verse to bookmark or record in the history.
#[derive(Deserialize, ToSchema)]
pub struct BookmarkRequest {
    pub surah_no: i64,
    pub ayah_no: i64,
}

#[derive(Serialize, ToSchema)]
pub struct VerseMarkResponse {
    pub surah_no: u32,
    pub ayah_no: u32,
    pub marked_at: DateTime<Utc>,
}

impl From<VerseMark> for VerseMarkResponse {
    fn from(mark: VerseMark) -> Self {
        Self {
            surah_no: mark.key.surah_no(),
            ayah_no: mark.key.ayah_no(),
            marked_at: mark.marked_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct SettingsResponse {
    pub theme: String,
    pub font_size: u32,
    pub language: String,
}

#[derive(Serialize, ToSchema)]
pub struct PreferencesResponse {
    pub user_id: Uuid,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub default_reciter: String,
    pub bookmarks: Vec<VerseMarkResponse>,
    pub history: Vec<VerseMarkResponse>,
    pub settings: SettingsResponse,
}

impl From<UserPreferences> for PreferencesResponse {
    fn from(prefs: UserPreferences) -> Self {
        Self {
            user_id: prefs.user_id,
            display_name: prefs.display_name,
            created_at: prefs.created_at,
            default_reciter: prefs.default_reciter,
            bookmarks: prefs.bookmarks.into_iter().map(VerseMarkResponse::from).collect(),
            history: prefs.history.into_iter().map(VerseMarkResponse::from).collect(),
            settings: SettingsResponse {
                theme: prefs.settings.theme.as_str().to_string(),
                font_size: prefs.settings.font_size,
                language: prefs.settings.language,
            },
        }
    }
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /preferences - Create the preference document for a new user
#[utoipa::path(
    post,
    path = "/preferences",
    request_body = CreateProfileRequest,
    params(("x-user-id" = Uuid, Header, description = "The unique ID of the user.")),
    responses(
        (status = 201, description = "Preferences created", body = PreferencesResponse),
        (status = 400, description = "Missing or invalid x-user-id header"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_profile_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<CreateProfileRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let prefs = state
        .preferences
        .create_profile(user_id, req.display_name, req.default_reciter)
        .await
        .map_err(|e| port_error_response("Failed to create preferences", e))?;

    Ok((StatusCode::CREATED, Json(PreferencesResponse::from(prefs))))
}

/// GET /preferences - Read the user's preference document
#[utoipa::path(
    get,
    path = "/preferences",
    params(("x-user-id" = Uuid, Header, description = "The unique ID of the user.")),
    responses(
        (status = 200, description = "Preferences", body = PreferencesResponse),
        (status = 404, description = "No preferences for this user")
    )
)]
pub async fn get_preferences_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let prefs = state
        .preferences
        .get_preferences(user_id)
        .await
        .map_err(|e| port_error_response("Failed to read preferences", e))?;

    Ok(Json(PreferencesResponse::from(prefs)))
}

/// PUT /preferences/default-reciter - Change the default reciter
#[utoipa::path(
    put,
    path = "/preferences/default-reciter",
    request_body = DefaultReciterRequest,
    params(("x-user-id" = Uuid, Header, description = "The unique ID of the user.")),
    responses(
        (status = 204, description = "Default reciter updated"),
        (status = 404, description = "No preferences for this user")
    )
)]
pub async fn set_default_reciter_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<DefaultReciterRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    if req.reciter_id.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "reciter_id must not be empty".to_string()));
    }
    state
        .preferences
        .set_default_reciter(user_id, &req.reciter_id)
        .await
        .map_err(|e| port_error_response("Failed to update default reciter", e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /preferences/bookmarks - Bookmark a verse
#[utoipa::path(
    post,
    path = "/preferences/bookmarks",
    request_body = BookmarkRequest,
    params(("x-user-id" = Uuid, Header, description = "The unique ID of the user.")),
    responses(
        (status = 204, description = "Bookmark added"),
        (status = 400, description = "Invalid verse reference"),
        (status = 404, description = "No preferences for this user")
    )
)]
pub async fn add_bookmark_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<BookmarkRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    let key = VerseKey::new(req.surah_no, req.ayah_no).map_err(verse_error_response)?;
    state
        .preferences
        .append_bookmark(user_id, key)
        .await
        .map_err(|e| port_error_response("Failed to add bookmark", e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /preferences/history - Record a read verse
#[utoipa::path(
    post,
    path = "/preferences/history",
    request_body = BookmarkRequest,
    params(("x-user-id" = Uuid, Header, description = "The unique ID of the user.")),
    responses(
        (status = 204, description = "History entry added"),
        (status = 400, description = "Invalid verse reference"),
        (status = 404, description = "No preferences for this user")
    )
)]
pub async fn add_history_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<BookmarkRequest>,
) -> Result<StatusCode, (StatusCode, String)> {
    let key = VerseKey::new(req.surah_no, req.ayah_no).map_err(verse_error_response)?;
    state
        .preferences
        .append_history_entry(user_id, key)
        .await
        .map_err(|e| port_error_response("Failed to add history entry", e))?;
    Ok(StatusCode::NO_CONTENT)
}

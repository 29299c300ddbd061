//! services/reader/src/web/rest.rs
//!
//! Contains the Axum handlers for the browsing endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::{
    preferences::{
        self, BookmarkRequest, CreateProfileRequest, DefaultReciterRequest, PreferencesResponse,
        SettingsResponse, VerseMarkResponse,
    },
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::{DateTime, Utc};
use quran_browser_core::{
    domain::{parse_integer, validate_surah_no, DEFAULT_RECITER_ID},
    AudioOption, DailyVerse, Notice, PageWindow, Pagination, PortError, Reciter, Surah,
    TafsirPreview, VerseError, VerseKey, VerseViewModel,
};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, num::NonZeroUsize, sync::Arc};
use tracing::error;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        list_surahs_handler,
        surah_audio_handler,
        list_reciters_handler,
        verse_handler,
        daily_verse_handler,
        list_notices_handler,
        dismiss_notice_handler,
        preferences::create_profile_handler,
        preferences::get_preferences_handler,
        preferences::set_default_reciter_handler,
        preferences::add_bookmark_handler,
        preferences::add_history_handler,
    ),
    components(
        schemas(
            SurahResponse, SurahPageResponse, SurahAudioResponse, ReciterResponse,
            AudioOptionResponse, TafsirPreviewResponse, VerseResponse, DailyVerseResponse,
            NoticeResponse, CreateProfileRequest, DefaultReciterRequest, BookmarkRequest,
            PreferencesResponse, SettingsResponse, VerseMarkResponse
        )
    ),
    tags(
        (name = "Quran Browser API", description = "Surah catalog, verse details and user preferences.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Error Mapping
//=========================================================================================

pub(crate) fn verse_error_response(e: VerseError) -> (StatusCode, String) {
    match e {
        VerseError::Validation(message) => (StatusCode::BAD_REQUEST, message),
        not_found @ VerseError::NotFound { .. } => (StatusCode::NOT_FOUND, not_found.to_string()),
    }
}

pub(crate) fn port_error_response(context: &str, e: PortError) -> (StatusCode, String) {
    match e {
        PortError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        other => {
            error!("{}: {:?}", context, other);
            (StatusCode::INTERNAL_SERVER_ERROR, context.to_string())
        }
    }
}

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct SurahResponse {
    surah_no: u32,
    surah_name: String,
    surah_name_arabic: String,
    total_ayah: u32,
    revelation_place: String,
}

impl From<&Surah> for SurahResponse {
    fn from(surah: &Surah) -> Self {
        Self {
            surah_no: surah.surah_no,
            surah_name: surah.surah_name.clone(),
            surah_name_arabic: surah.surah_name_arabic.clone(),
            total_ayah: surah.total_ayah,
            revelation_place: surah.revelation_place.as_str().to_string(),
        }
    }
}

/// The visible prefix of the surah catalog for one page number.
#[derive(Serialize, ToSchema)]
pub struct SurahPageResponse {
    page: usize,
    page_size: usize,
    total: usize,
    has_more: bool,
    surahs: Vec<SurahResponse>,
}

impl From<PageWindow<'_, Surah>> for SurahPageResponse {
    fn from(window: PageWindow<'_, Surah>) -> Self {
        Self {
            page: window.page_number,
            page_size: window.page_size,
            total: window.total,
            has_more: window.has_more,
            surahs: window.items.iter().map(SurahResponse::from).collect(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct SurahAudioResponse {
    surah_no: u32,
    reciter_id: String,
    url: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReciterResponse {
    id: String,
    name: String,
}

impl From<&Reciter> for ReciterResponse {
    fn from(reciter: &Reciter) -> Self {
        Self {
            id: reciter.id.clone(),
            name: reciter.name.clone(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct AudioOptionResponse {
    reciter_id: String,
    reciter_name: String,
    url: String,
}

impl From<AudioOption> for AudioOptionResponse {
    fn from(option: AudioOption) -> Self {
        Self {
            reciter_id: option.reciter_id,
            reciter_name: option.reciter_name,
            url: option.url,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct TafsirPreviewResponse {
    author: String,
    excerpt: String,
}

impl From<TafsirPreview> for TafsirPreviewResponse {
    fn from(preview: TafsirPreview) -> Self {
        Self {
            author: preview.author,
            excerpt: preview.excerpt,
        }
    }
}

/// Everything the verse-detail view shows. An empty `audio` list means no audio is
/// available; a missing `tafsir` means no tafsir is available.
#[derive(Serialize, ToSchema)]
pub struct VerseResponse {
    surah_no: u32,
    ayah_no: u32,
    surah_name: String,
    surah_name_arabic: String,
    arabic: String,
    translations: BTreeMap<String, String>,
    audio: Vec<AudioOptionResponse>,
    tafsir: Option<TafsirPreviewResponse>,
}

impl From<VerseViewModel> for VerseResponse {
    fn from(view: VerseViewModel) -> Self {
        let verse = view.verse;
        Self {
            surah_no: verse.key.surah_no(),
            ayah_no: verse.key.ayah_no(),
            surah_name: verse.surah_name,
            surah_name_arabic: verse.surah_name_arabic,
            arabic: verse.arabic,
            translations: verse.translations,
            audio: view.audio.into_iter().map(AudioOptionResponse::from).collect(),
            tafsir: view.tafsir.map(TafsirPreviewResponse::from),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct DailyVerseResponse {
    surah_no: u32,
    ayah_no: u32,
    arabic: String,
    translation: String,
    reference: String,
}

impl From<DailyVerse> for DailyVerseResponse {
    fn from(daily: DailyVerse) -> Self {
        Self {
            surah_no: daily.key.surah_no(),
            ayah_no: daily.key.ayah_no(),
            arabic: daily.arabic,
            translation: daily.translation,
            reference: daily.reference,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct NoticeResponse {
    id: Uuid,
    message: String,
    raised_at: DateTime<Utc>,
}

impl From<Notice> for NoticeResponse {
    fn from(notice: Notice) -> Self {
        Self {
            id: notice.id,
            message: notice.message,
            raised_at: notice.raised_at,
        }
    }
}

#[derive(Deserialize)]
pub struct PageQuery {
    page: Option<usize>,
}

#[derive(Deserialize)]
pub struct ReciterQuery {
    reciter: Option<String>,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List the visible surahs for a page number. Page `n` holds the first `n * page_size` surahs.
#[utoipa::path(
    get,
    path = "/surahs",
    params(
        ("page" = Option<usize>, Query, description = "Page number, starting at 1.")
    ),
    responses(
        (status = 200, description = "Visible surahs", body = SurahPageResponse),
        (status = 400, description = "Page number is zero")
    )
)]
pub async fn list_surahs_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let page = NonZeroUsize::new(query.page.unwrap_or(1))
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "page must be at least 1".to_string()))?;

    let pagination = Pagination::at_page(page, app_state.config.page_size);
    let surahs = app_state.surahs.get_all();
    Ok(Json(SurahPageResponse::from(pagination.window(&surahs[..]))))
}

/// Recitation URL of a whole surah.
#[utoipa::path(
    get,
    path = "/surahs/{surah_no}/audio",
    params(
        ("surah_no" = u32, Path, description = "Surah number, 1 to 114."),
        ("reciter" = Option<String>, Query, description = "Reciter id, defaults to \"1\".")
    ),
    responses(
        (status = 200, description = "Recitation found", body = SurahAudioResponse),
        (status = 400, description = "Invalid surah number"),
        (status = 404, description = "No recitation for this surah and reciter")
    )
)]
pub async fn surah_audio_handler(
    State(app_state): State<Arc<AppState>>,
    Path(surah_no): Path<String>,
    Query(query): Query<ReciterQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let surah_no = parse_integer("surah", &surah_no)
        .and_then(validate_surah_no)
        .map_err(verse_error_response)?;
    let reciter_id = query.reciter.unwrap_or_else(|| DEFAULT_RECITER_ID.to_string());

    let detail = app_state
        .client
        .fetch_surah_detail(surah_no)
        .await
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Surah {} not available", surah_no)))?;

    let url = detail.audio_url_for(&reciter_id).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            format!("No recitation of surah {} by reciter {}", surah_no, reciter_id),
        )
    })?;

    Ok(Json(SurahAudioResponse {
        surah_no,
        url: url.to_string(),
        reciter_id,
    }))
}

/// List the reciters loaded at startup.
#[utoipa::path(
    get,
    path = "/reciters",
    responses(
        (status = 200, description = "Reciters ordered by id", body = Vec<ReciterResponse>)
    )
)]
pub async fn list_reciters_handler(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    let reciters: Vec<ReciterResponse> = app_state
        .reciters
        .get_all()
        .iter()
        .map(ReciterResponse::from)
        .collect();
    Json(reciters)
}

/// Verse text with its recitations and a tafsir preview.
#[utoipa::path(
    get,
    path = "/verses/{surah_no}/{ayah_no}",
    params(
        ("surah_no" = u32, Path, description = "Surah number, 1 to 114."),
        ("ayah_no" = u32, Path, description = "Ayah number, starting at 1.")
    ),
    responses(
        (status = 200, description = "Verse found", body = VerseResponse),
        (status = 400, description = "Invalid verse reference"),
        (status = 404, description = "Verse not found")
    )
)]
pub async fn verse_handler(
    State(app_state): State<Arc<AppState>>,
    Path((surah_no, ayah_no)): Path<(String, String)>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let key = VerseKey::parse(&surah_no, &ayah_no).map_err(verse_error_response)?;
    let view = app_state
        .aggregator
        .aggregate_key(key)
        .await
        .map_err(verse_error_response)?;
    Ok(Json(VerseResponse::from(view)))
}

/// A random verse from the opening of a random surah. Every call draws again.
#[utoipa::path(
    get,
    path = "/daily-verse",
    responses(
        (status = 200, description = "Verse picked", body = DailyVerseResponse),
        (status = 503, description = "The picked verse could not be fetched")
    )
)]
pub async fn daily_verse_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut rng = StdRng::from_entropy();
    let daily = app_state.daily.pick(&mut rng).await.ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "Daily verse unavailable, try again".to_string(),
        )
    })?;
    Ok(Json(DailyVerseResponse::from(daily)))
}

/// Pending user notices, oldest first.
#[utoipa::path(
    get,
    path = "/notices",
    responses(
        (status = 200, description = "Pending notices", body = Vec<NoticeResponse>)
    )
)]
pub async fn list_notices_handler(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    let notices: Vec<NoticeResponse> = app_state
        .notices
        .list()
        .into_iter()
        .map(NoticeResponse::from)
        .collect();
    Json(notices)
}

/// Dismiss a notice.
#[utoipa::path(
    delete,
    path = "/notices/{id}",
    params(
        ("id" = Uuid, Path, description = "Notice id.")
    ),
    responses(
        (status = 204, description = "Notice dismissed"),
        (status = 404, description = "No such notice")
    )
)]
pub async fn dismiss_notice_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    if app_state.notices.dismiss(id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

pub mod middleware;
pub mod preferences;
pub mod rest;
pub mod state;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

pub use middleware::require_user;
pub use rest::ApiDoc;
pub use state::AppState;

/// Builds the REST router over the shared state.
pub fn router(app_state: Arc<AppState>) -> Router {
    // Browsing routes (no user required)
    let public_routes = Router::new()
        .route("/surahs", get(rest::list_surahs_handler))
        .route("/surahs/{surah_no}/audio", get(rest::surah_audio_handler))
        .route("/reciters", get(rest::list_reciters_handler))
        .route("/verses/{surah_no}/{ayah_no}", get(rest::verse_handler))
        .route("/daily-verse", get(rest::daily_verse_handler))
        .route("/notices", get(rest::list_notices_handler))
        .route("/notices/{id}", delete(rest::dismiss_notice_handler));

    // Preference routes (x-user-id required)
    let preference_routes = Router::new()
        .route(
            "/preferences",
            post(preferences::create_profile_handler).get(preferences::get_preferences_handler),
        )
        .route(
            "/preferences/default-reciter",
            put(preferences::set_default_reciter_handler),
        )
        .route("/preferences/bookmarks", post(preferences::add_bookmark_handler))
        .route("/preferences/history", post(preferences::add_history_handler))
        .route_layer(axum_middleware::from_fn(require_user));

    Router::new()
        .merge(public_routes)
        .merge(preference_routes)
        .with_state(app_state)
}

//! services/reader/src/bin/reader.rs

use axum::{
    http::{header::ACCEPT, header::CONTENT_TYPE, HeaderName, HeaderValue, Method},
    Router,
};
use reader_lib::{
    adapters::{HttpQuranClient, InMemoryPreferenceStore, NoticeBoard},
    config::Config,
    error::ApiError,
    web::{self, middleware::USER_ID_HEADER, ApiDoc, AppState},
};
use std::{sync::Arc, time::Duration};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Service Adapters ---
    let http_client = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .connect_timeout(Duration::from_secs(10))
        .pool_idle_timeout(Duration::from_secs(90))
        .build()?;
    let quran_client = Arc::new(HttpQuranClient::new(http_client, config.quran_api_base.clone()));
    let preferences = Arc::new(InMemoryPreferenceStore::new());
    let notices = Arc::new(NoticeBoard::new());

    // --- 3. Build the Shared AppState & Load the Catalogs ---
    let app_state = Arc::new(AppState::new(
        config.clone(),
        quran_client,
        preferences,
        notices,
    ));
    info!("Loading catalogs from {}...", config.quran_api_base);
    app_state.load_catalogs().await;

    // --- 4. Create the Web Router ---
    let origin = config.cors_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!("Invalid CORS origin '{}': {}", config.cors_origin, e))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT, HeaderName::from_static(USER_ID_HEADER)]);

    let app = Router::new()
        .merge(web::router(app_state).layer(cors))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! services/reader/src/web/middleware.rs
//!
//! User identification middleware for the preference routes.

use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use uuid::Uuid;

/// Header carrying the id of the user whose preferences are addressed.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Middleware that reads the `x-user-id` header and extracts the user id.
///
/// If valid, inserts the user id into request extensions for handlers to use.
/// If missing or malformed, returns 400 Bad Request.
pub async fn require_user(mut req: Request, next: Next) -> Result<Response, (StatusCode, String)> {
    // 1. Extract the header
    let user_id_str = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                format!("{} header is required", USER_ID_HEADER),
            )
        })?;

    // 2. Parse it
    let user_id = Uuid::parse_str(user_id_str).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid {} format", USER_ID_HEADER),
        )
    })?;

    // 3. Insert user_id into request extensions
    req.extensions_mut().insert(user_id);

    // 4. Continue to the handler
    Ok(next.run(req).await)
}

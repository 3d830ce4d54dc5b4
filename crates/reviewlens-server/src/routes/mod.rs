//! HTTP route handlers.

pub mod reviews;
pub mod status;

use axum::http::StatusCode;
use axum::Json;
use axum::Router;
use reviewlens_core::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

/// Build the main Axum router with all routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<SharedState> {
    Router::new()
        .merge(status::routes())
        .merge(reviews::routes())
}

pub(crate) type ApiError = (StatusCode, Json<serde_json::Value>);

/// Map a pipeline error to a status code and `{"error": ...}` body.
pub(crate) fn error_response(err: Error) -> ApiError {
    let status = match err {
        Error::InsufficientData => StatusCode::UNPROCESSABLE_ENTITY,
        Error::InvalidRating(_) | Error::InvalidTrustScore(_) | Error::InvalidEssenceScore(_) => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({ "error": err.to_string() })))
}

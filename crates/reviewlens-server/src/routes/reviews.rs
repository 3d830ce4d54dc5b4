//! Review analysis routes.
//! Each handler is a thin wrapper over one orchestrator entry point.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use reviewlens_core::Review;
use reviewlens_relevance::ClassifiedReview;
use serde::Deserialize;
use tracing::info;

use super::{error_response, ApiError};
use crate::state::SharedState;

pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/reviews/authenticity", post(partition_authenticity))
        .route("/reviews/relevance", post(classify_relevance))
        .route("/reviews/summary", post(summarize))
        .route("/reviews/analyze", post(analyze))
}

#[derive(Debug, Deserialize)]
pub struct AuthenticityRequest {
    pub reviews: Vec<Review>,
}

#[derive(Debug, Deserialize)]
pub struct RelevanceRequest {
    pub reviews: Vec<Review>,
    #[serde(rename = "categoryId")]
    pub category_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub classified: Vec<ClassifiedReview>,
}

/// POST /api/reviews/authenticity: trusted vs. suspicious partition.
async fn partition_authenticity(
    State(state): State<SharedState>,
    Json(req): Json<AuthenticityRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = state
        .orchestrator
        .partition_authenticity(&req.reviews)
        .await
        .map_err(error_response)?;
    Ok(Json(serde_json::json!(result)))
}

/// POST /api/reviews/relevance: essence classification for one category.
async fn classify_relevance(
    State(state): State<SharedState>,
    Json(req): Json<RelevanceRequest>,
) -> Json<serde_json::Value> {
    let classified = state
        .orchestrator
        .classify_relevance(&req.reviews, &req.category_id)
        .await;
    let configured = state.orchestrator.registry().get(&req.category_id).is_some();

    Json(serde_json::json!({
        "categoryId": req.category_id,
        "configured": configured,
        "classified": classified,
    }))
}

/// POST /api/reviews/summary: essence vs. other aggregates.
async fn summarize(
    State(state): State<SharedState>,
    Json(req): Json<SummaryRequest>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!(state.orchestrator.summarize(&req.classified)))
}

/// POST /api/reviews/analyze: both pipelines in one call.
async fn analyze(
    State(state): State<SharedState>,
    Json(req): Json<RelevanceRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let analysis_id = uuid::Uuid::new_v4().to_string();
    info!(
        "Analysis {} started: category={}, reviews={}",
        analysis_id,
        req.category_id,
        req.reviews.len()
    );

    let analysis = state
        .orchestrator
        .analyze(&req.reviews, &req.category_id)
        .await
        .map_err(error_response)?;

    let mut body = serde_json::json!(analysis);
    body["analysisId"] = serde_json::json!(analysis_id);
    body["analyzedAt"] = serde_json::json!(Utc::now().to_rfc3339());
    Ok(Json(body))
}

//! Status and category listing routes.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::SharedState;

pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/status", get(get_status))
        .route("/categories", get(get_categories))
}

/// GET /api/status: judge and pipeline configuration.
async fn get_status(State(state): State<SharedState>) -> Json<serde_json::Value> {
    let runtime = state.orchestrator.status();
    let judge = state.judge_config.to_response();

    Json(serde_json::json!({
        "judgeAvailable": runtime.judge_available,
        "judge": judge,
        "categories": runtime.categories,
        "pipeline": runtime.config,
        "startedAt": state.started_at.to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/categories: configured categories with their essence aspect.
async fn get_categories(State(state): State<SharedState>) -> Json<serde_json::Value> {
    let registry = state.orchestrator.registry();
    let categories: Vec<serde_json::Value> = registry
        .category_ids()
        .into_iter()
        .filter_map(|id| {
            registry.get(id).map(|config| {
                serde_json::json!({
                    "id": id,
                    "essenceAspectName": config.essence_aspect,
                    "otherAspectNames": config.other_aspects,
                    "weightings": config.weightings,
                })
            })
        })
        .collect();

    let total = categories.len();
    Json(serde_json::json!({
        "categories": categories,
        "total": total,
    }))
}

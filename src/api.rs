pub(crate) mod health;
pub(crate) mod metrics;
pub(crate) mod model;
pub(crate) mod rank;
pub(crate) mod score;

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;

use crate::app::AppState;

#[derive(Debug, Serialize)]
pub(crate) struct ErrorResponse {
    error: String,
}

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = Json(ErrorResponse {
        error: message.into(),
    });
    (status, body).into_response()
}

/// ボディのパースに失敗したリクエストも `{"error": ...}` 形式で返す。
pub(crate) fn rejection_response(state: &AppState, rejection: &JsonRejection) -> Response {
    state.telemetry().record_validation_rejection("malformed body");
    error_response(rejection.status(), rejection.body_text())
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health/ready", get(health::ready))
        .route("/health/live", get(health::live))
        .route("/metrics", get(metrics::exporter))
        .route("/v1/model", get(model::describe))
        .route("/v1/score", post(score::score_article))
        .route("/v1/explain", post(score::explain_signals))
        .route("/v1/rank", post(rank::rank_records))
        .route("/v1/score/batch", post(rank::score_batch))
        .with_state(state)
}
